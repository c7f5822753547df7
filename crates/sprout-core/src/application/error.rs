//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the external
//! collaborators, not rule violations. Rule violations are `DomainError`s.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during a scaffold run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// No source is configured for the chosen template.
    #[error("No source configured for template '{template}'")]
    SourceNotConfigured { template: String },

    /// The template could not be fetched.
    #[error("Failed to fetch template '{template}': {reason}")]
    FetchFailed { template: String, reason: String },

    /// The fetched template tree is absent or holds no files.
    #[error("Template source is missing or empty: {}", .path.display())]
    MissingSource { path: PathBuf },

    /// A template file could not be rendered.
    #[error("Failed to render {}: {reason}", .file.display())]
    TemplateError { file: PathBuf, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {}: {reason}", .path.display())]
    FilesystemError { path: PathBuf, reason: String },

    /// The prompt collaborator failed or was aborted.
    #[error("Prompt failed: {reason}")]
    PromptFailed { reason: String },

    /// The dependency install command failed. Project files stay on disk.
    #[error("Dependency installation failed: `{command}` {status}")]
    InstallFailed { command: String, status: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::SourceNotConfigured { template } => vec![
                format!("Set templates.local_path or templates.registry_url so '{template}' can be found"),
                "Or export SPROUT_TEMPLATES__LOCAL_PATH=<dir>".into(),
            ],
            Self::FetchFailed { .. } => vec![
                "Check your network connection and the template source".into(),
                "Template download failed, please try again".into(),
            ],
            Self::MissingSource { path } => vec![
                format!("Nothing was fetched into {}", path.display()),
                "Check that the template source is not empty".into(),
            ],
            Self::TemplateError { file, .. } => vec![
                format!("Check the placeholders in {}", file.display()),
                "Every {{ variable }} must be provided by the template's metadata".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::PromptFailed { .. } => vec![
                "Run again, or pass --yes to accept the defaults".into(),
            ],
            Self::InstallFailed { command, .. } => vec![
                "The project files were created; only the install step failed".into(),
                format!("Re-run `{command}` inside the project directory"),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SourceNotConfigured { .. } => ErrorCategory::Configuration,
            Self::MissingSource { .. } => ErrorCategory::NotFound,
            Self::PromptFailed { .. } => ErrorCategory::Validation,
            Self::FetchFailed { .. }
            | Self::TemplateError { .. }
            | Self::FilesystemError { .. }
            | Self::InstallFailed { .. } => ErrorCategory::Internal,
        }
    }
}
