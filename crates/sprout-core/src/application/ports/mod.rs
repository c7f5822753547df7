//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `sprout-adapters` and
//! `sprout-cli` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: directory listing, file I/O, recursive removal
//!   - `TemplateRenderer`: variable substitution for one text file
//!   - `TemplateFetcher`: download a template tree into a temporary location
//!   - `Prompter`: template choice, metadata and install confirmation
//!   - `DependencyInstaller`: package-manager subprocess
//!   - `ProgressReporter`: stage notifications for the user interface
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    DependencyInstaller, ExitSignal, Filesystem, ProgressReporter, Prompter, TemplateFetcher,
    TemplateRenderer,
};

#[cfg(test)]
pub use output::{
    MockDependencyInstaller, MockFilesystem, MockProgressReporter, MockPrompter,
    MockTemplateFetcher, MockTemplateRenderer,
};
