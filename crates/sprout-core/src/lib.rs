//! Sprout Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Sprout
//! project scaffolding tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           sprout-cli (CLI)              │
//! │   (Prompter, config, exit codes)        │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (ScaffoldService, RenderService, ...)   │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, Renderer, Fetcher, ...)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    sprout-adapters (Infrastructure)     │
//! │ (LocalFilesystem, JinjaRenderer, etc)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (ProjectName, allow-list, TemplateKind) │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sprout_core::application::{ScaffoldOutcome, ScaffoldRequest, ScaffoldService};
//!
//! // Adapters come from sprout-adapters and the CLI.
//! let service = ScaffoldService::new(filesystem, renderer, fetcher, prompter, installer);
//!
//! match service.scaffold(ScaffoldRequest::new("my-app", ".")) {
//!     ScaffoldOutcome::Completed(report) => println!("{}", report.project_dir.display()),
//!     ScaffoldOutcome::Failed { stage, error } => eprintln!("{stage}: {error}"),
//! }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        InstallStatus, ScaffoldOutcome, ScaffoldReport, ScaffoldRequest, ScaffoldService,
        ScaffoldStage,
        ports::{
            DependencyInstaller, ExitSignal, Filesystem, ProgressReporter, Prompter,
            TemplateFetcher, TemplateRenderer,
        },
    };
    pub use crate::domain::{
        DirEntry, Metadata, MetadataSchema, ProjectName, RenderContext, TemplateKind,
    };
    pub use crate::error::{ErrorCategory, SproutError, SproutResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
