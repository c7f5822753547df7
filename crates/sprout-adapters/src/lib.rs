//! Infrastructure adapters for Sprout.
//!
//! This crate implements the ports defined in `sprout-core::application::ports`.
//! It contains all external dependencies and I/O operations. The prompter
//! lives in the CLI since it owns the terminal.

pub mod fetcher;
pub mod filesystem;
pub mod installer;
pub mod renderer;

// Re-export commonly used adapters
pub use fetcher::{RegistryFetcher, TemplateSource};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use installer::CommandInstaller;
pub use renderer::JinjaRenderer;
