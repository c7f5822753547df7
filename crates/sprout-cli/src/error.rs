//! Error handling for the Sprout CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;

use sprout_core::error::SproutError;

// Re-export so callers only need `use crate::error::*`.
pub use sprout_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read or parsed.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `sprout-core` or one of its adapters.
    #[error(transparent)]
    Core(#[from] SproutError),

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The user aborted a prompt.
    #[error("Operation cancelled")]
    Cancelled,

    /// Feature not available (e.g., interactive mode without feature flag).
    #[error("Feature not available: {feature}")]
    FeatureNotAvailable { feature: &'static str },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigError { .. } => {
                let mut out = vec![];
                if let Some(path) = crate::config::AppConfig::config_path() {
                    out.push(format!("Check your config file at {}", path.display()));
                }
                out.push(format!(
                    "Or the local {} file",
                    crate::config::LOCAL_CONFIG_FILE
                ));
                out.push("Environment overrides use SPROUT_<SECTION>__<KEY>".into());
                out
            }

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { .. } => vec![
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],

            Self::Cancelled => vec![
                "Nothing was fetched; the project directory may be left empty".into(),
            ],

            Self::FeatureNotAvailable { feature } => vec![
                format!("The '{}' feature is not available in this build", feature),
                "Pass --template <ID> and --yes to run without prompts".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
            Self::Cancelled => ErrorCategory::UserError,
            Self::FeatureNotAvailable { .. } => ErrorCategory::Configuration,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));

        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push('\n');
            for suggestion in suggestions {
                output.push_str(&format!("{}\n", suggestion.yellow()));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {}\n", self));

        if verbose {
            let mut src = std::error::Error::source(self);
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push('\n');
            for s in &suggestions {
                out.push_str(&format!("{s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    use sprout_core::{
        application::ApplicationError,
        domain::{DirEntry, DomainError},
    };

    fn core(err: impl Into<SproutError>) -> CliError {
        CliError::Core(err.into())
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn name_errors_exit_with_user_error() {
        let err = core(DomainError::ReservedName {
            name: "react".into(),
        });
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_source_exits_not_found() {
        let err = core(ApplicationError::MissingSource {
            path: PathBuf::from("/tmp/x"),
        });
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn unconfigured_source_exits_configuration() {
        let err = core(ApplicationError::SourceNotConfigured {
            template: "react-tpl".into(),
        });
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn install_failure_exits_internal() {
        let err = core(ApplicationError::InstallFailed {
            command: "npm install".into(),
            status: "exited with code 1".into(),
        });
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn io_error_exits_internal() {
        assert_eq!(CliError::from(io::Error::other("e")).exit_code(), 1);
    }

    #[test]
    fn cancelled_is_user_error() {
        assert_eq!(CliError::Cancelled.exit_code(), 2);
    }

    #[test]
    fn missing_feature_is_configuration() {
        let err = CliError::FeatureNotAvailable {
            feature: "interactive",
        };
        assert_eq!(err.exit_code(), 4);
        assert!(err.suggestions()[1].contains("--yes"));
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn format_plain_lists_conflicts() {
        let err = core(DomainError::UnsafeDirectory {
            path: PathBuf::from("/work/my-app"),
            conflicts: vec![DirEntry::file("index.html"), DirEntry::directory("src")],
        });

        let s = err.format_plain(false);
        assert!(s.contains("Error: The directory /work/my-app contains 2 file(s)"));
        assert!(s.contains("\n index.html\n"));
        assert!(s.contains("\n src/\n"));
        assert!(s.contains("remove the files listed above"));
    }

    #[test]
    fn format_plain_verbose_omits_hint() {
        let err = CliError::FeatureNotAvailable {
            feature: "interactive",
        };
        let s = err.format_plain(true);
        assert!(!s.contains("--verbose"));
    }

    #[test]
    fn format_colored_keeps_message() {
        let err = core(DomainError::UnknownTemplate("vue".into()));
        assert!(err.format_colored(false).contains("vue"));
    }
}
