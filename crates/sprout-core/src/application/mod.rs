//! Application layer for Sprout.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService, RenderService, SafetyChecker)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Outcome**: The request and terminal result of a scaffold run
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business rules itself. All rules live in `crate::domain`.

pub mod error;
pub mod outcome;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{RenderService, SafetyChecker, ScaffoldService};

pub use outcome::{
    DEFAULT_TEMP_DIR, InstallStatus, ScaffoldOutcome, ScaffoldReport, ScaffoldRequest,
    ScaffoldStage,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    DependencyInstaller, ExitSignal, Filesystem, ProgressReporter, Prompter, TemplateFetcher,
    TemplateRenderer,
};

pub use error::ApplicationError;
