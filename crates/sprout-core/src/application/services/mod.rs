//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a project" or "render a template".

pub mod render_service;
pub mod safety_checker;
pub mod scaffold_service;

pub use render_service::RenderService;
pub use safety_checker::SafetyChecker;
pub use scaffold_service::ScaffoldService;
