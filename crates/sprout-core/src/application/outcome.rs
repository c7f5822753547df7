//! Inputs and results of one scaffold run.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::{ProjectName, TemplateKind};
use crate::error::{SproutError, SproutResult};

/// Default name of the temporary directory the template is fetched into.
pub const DEFAULT_TEMP_DIR: &str = ".download-temp";

/// Everything the orchestrator needs to know about the requested project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    pub project_name: String,
    pub base_dir: PathBuf,
    pub temp_dir_name: String,
    pub default_template: TemplateKind,
}

impl ScaffoldRequest {
    pub fn new(project_name: impl Into<String>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_name: project_name.into(),
            base_dir: base_dir.into(),
            temp_dir_name: DEFAULT_TEMP_DIR.to_string(),
            default_template: TemplateKind::default(),
        }
    }

    pub fn with_temp_dir(mut self, name: impl Into<String>) -> Self {
        self.temp_dir_name = name.into();
        self
    }

    pub fn with_default_template(mut self, template: TemplateKind) -> Self {
        self.default_template = template;
        self
    }

    /// `base_dir/project_name`.
    pub fn project_dir(&self) -> PathBuf {
        self.base_dir.join(&self.project_name)
    }

    /// Where the template is fetched for a given project directory.
    ///
    /// Only meaningful once [`check_temp_dir_name`](crate::domain::check_temp_dir_name)
    /// accepted `temp_dir_name`; the service checks it before any I/O.
    pub fn temp_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.temp_dir_name)
    }
}

/// Progress marker of a run. `Failed` outcomes carry the last one reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScaffoldStage {
    Start,
    NameChecked,
    DirectoryPrepared,
    SafetyChecked,
    TemplateChosen,
    MetadataCollected,
    TemplateFetched,
    Rendered,
    InstallPrompted,
    Installed,
    Done,
}

impl ScaffoldStage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::NameChecked => "name checked",
            Self::DirectoryPrepared => "directory prepared",
            Self::SafetyChecked => "safety checked",
            Self::TemplateChosen => "template chosen",
            Self::MetadataCollected => "metadata collected",
            Self::TemplateFetched => "template fetched",
            Self::Rendered => "rendered",
            Self::InstallPrompted => "install prompted",
            Self::Installed => "installed",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for ScaffoldStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether dependencies were installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStatus {
    Installed,
    Declined,
}

/// Summary of a finished project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub project_name: ProjectName,
    pub project_dir: PathBuf,
    pub template: TemplateKind,
    pub install: InstallStatus,
}

/// Terminal result of [`ScaffoldService::scaffold`].
///
/// [`ScaffoldService::scaffold`]: crate::application::ScaffoldService::scaffold
#[derive(Debug)]
pub enum ScaffoldOutcome {
    Completed(ScaffoldReport),
    Failed {
        stage: ScaffoldStage,
        error: SproutError,
    },
}

impl ScaffoldOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn into_result(self) -> SproutResult<ScaffoldReport> {
        match self {
            Self::Completed(report) => Ok(report),
            Self::Failed { error, .. } => Err(error),
        }
    }
}
