//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `sprout-adapters` crate provides the filesystem, renderer, fetcher and
//! installer; the CLI provides the prompter.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::application::outcome::ScaffoldStage;
use crate::domain::{DirEntry, Metadata, MetadataSchema, TemplateKind};
use crate::error::SproutResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `sprout_adapters::filesystem::LocalFilesystem` (production)
/// - `sprout_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> SproutResult<()>;

    /// Immediate children of a directory.
    fn read_dir(&self, path: &Path) -> SproutResult<Vec<DirEntry>>;

    /// Every regular file below `root`, recursively, as paths relative to `root`.
    fn list_files(&self, root: &Path) -> SproutResult<Vec<PathBuf>>;

    /// Read a file's raw bytes.
    fn read_file(&self, path: &Path) -> SproutResult<Vec<u8>>;

    /// Write raw bytes to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &[u8]) -> SproutResult<()>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> SproutResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> SproutResult<()>;
}

/// Port for variable substitution.
///
/// Implemented by:
/// - `sprout_adapters::renderer::JinjaRenderer` (minijinja)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render one text template.
    ///
    /// `name` identifies the file in error messages. A placeholder naming a
    /// variable absent from `metadata` is an error, never an empty string.
    fn render(&self, name: &str, source: &str, metadata: &Metadata) -> SproutResult<String>;
}

/// Port for acquiring a template tree.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateFetcher: Send + Sync {
    /// Download `template` into `destination` and return the tree's root.
    fn fetch(&self, template: TemplateKind, destination: &Path) -> SproutResult<PathBuf>;
}

/// Port for the interactive questions asked during a run.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter: Send + Sync {
    /// Pick one of `choices`.
    fn choose_template(
        &self,
        choices: &[TemplateKind],
        default: TemplateKind,
    ) -> SproutResult<TemplateKind>;

    /// Fill in every field of `schema`.
    fn collect_metadata(
        &self,
        template: TemplateKind,
        schema: &MetadataSchema,
    ) -> SproutResult<Metadata>;

    /// Whether to install dependencies now.
    fn confirm_install(&self) -> SproutResult<bool>;
}

/// Port for the package-manager install step.
#[cfg_attr(test, mockall::automock)]
pub trait DependencyInstaller: Send + Sync {
    /// Human-readable command line, e.g. `npm install`.
    fn command_line(&self) -> String;

    /// Run the install inside `project_dir` and wait for it to exit.
    fn install(&self, project_dir: &Path) -> SproutResult<ExitSignal>;
}

/// Observer for stage transitions of a run.
///
/// Called after each stage completes. Reporting is best effort and cannot
/// fail the run.
#[cfg_attr(test, mockall::automock)]
pub trait ProgressReporter: Send + Sync {
    fn stage_reached(&self, stage: ScaffoldStage, project_dir: &Path);
}

/// How an external command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitSignal {
    code: Option<i32>,
}

impl ExitSignal {
    /// `None` means the process was terminated by a signal.
    pub const fn from_code(code: Option<i32>) -> Self {
        Self { code }
    }

    pub const fn success() -> Self {
        Self { code: Some(0) }
    }

    pub const fn code(&self) -> Option<i32> {
        self.code
    }

    pub const fn is_success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

impl fmt::Display for ExitSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exited with code {code}"),
            None => f.write_str("was terminated by a signal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_zero_is_success() {
        assert!(ExitSignal::success().is_success());
        assert!(!ExitSignal::from_code(Some(1)).is_success());
        assert!(!ExitSignal::from_code(None).is_success());
    }

    #[test]
    fn display_describes_termination() {
        assert_eq!(ExitSignal::from_code(Some(2)).to_string(), "exited with code 2");
        assert_eq!(ExitSignal::from_code(None).to_string(), "was terminated by a signal");
    }
}
