// ============================================================================
// domain/error.rs - PRE-FLIGHT ERROR DOMAIN
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::allow_list::DirEntry;
use crate::error::ErrorCategory;

/// Root domain error type.
///
/// Every variant is raised before anything is written, so none of them
/// leaves state behind. Messages enumerate every offending item so the user
/// can fix them all in one pass.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error(
        "Cannot create a project named '{name}' because of npm naming restrictions ({} problem(s))",
        .problems.len()
    )]
    InvalidName { name: String, problems: Vec<String> },

    #[error("Cannot create a project named '{name}' because a dependency with the same name exists")]
    ReservedName { name: String },

    #[error(
        "The directory {} contains {} file(s) that could conflict",
        .path.display(),
        .conflicts.len()
    )]
    UnsafeDirectory {
        path: PathBuf,
        conflicts: Vec<DirEntry>,
    },

    #[error("Unknown template '{0}'")]
    UnknownTemplate(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    #[error("Invalid temporary directory name '{name}': {reason}")]
    InvalidTempDir { name: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidName { problems, .. } => {
                let mut out: Vec<String> = problems.iter().map(|p| format!(" * {p}")).collect();
                out.push("Please choose a different project name.".into());
                out
            }
            Self::ReservedName { name } => vec![
                format!("A generated project depends on '{name}'; a local directory with the same name would shadow it"),
                "Please choose a different project name.".into(),
            ],
            Self::UnsafeDirectory { conflicts, .. } => {
                let mut out: Vec<String> = conflicts.iter().map(|c| format!(" {c}")).collect();
                out.push(
                    "Either try using a new directory name, or remove the files listed above."
                        .into(),
                );
                out
            }
            Self::UnknownTemplate(_) => vec![format!(
                "Available templates: {}",
                crate::domain::TemplateKind::ALL
                    .iter()
                    .map(|t| t.id())
                    .collect::<Vec<_>>()
                    .join(", ")
            )],
            Self::InvalidTempDir { .. } => vec![
                "Set scaffold.temp_dir to a single new directory name, e.g. .download-temp".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidName { .. }
            | Self::ReservedName { .. }
            | Self::UnsafeDirectory { .. }
            | Self::UnknownTemplate(_) => ErrorCategory::Validation,
            Self::InvalidTempDir { .. } => ErrorCategory::Configuration,
        }
    }
}
