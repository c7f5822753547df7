//! Template acquisition: copy from a local directory or shallow-clone a git
//! repository.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};
use sprout_core::{
    application::{ApplicationError, ports::TemplateFetcher},
    domain::TemplateKind,
    error::SproutResult,
};
use thiserror::Error;
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

/// Where templates come from. `local_path` wins when both are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSource {
    /// Directory holding one `<template-id>/` subdirectory per template.
    pub local_path: Option<PathBuf>,
    /// Git base URL; templates are cloned from `<url>/<template-id>.git`.
    pub registry_url: Option<String>,
    /// Branch or tag to clone.
    pub branch: Option<String>,
}

impl TemplateSource {
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self {
            local_path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn registry(url: impl Into<String>) -> Self {
        Self {
            registry_url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn is_configured(&self) -> bool {
        self.local_path.is_some() || self.registry_url.is_some()
    }
}

#[derive(Debug, Error)]
enum FetchError {
    #[error("template directory {} does not exist", .0.display())]
    MissingLocal(PathBuf),

    #[error("failed to copy {}: {source}", .path.display())]
    Copy { path: PathBuf, source: io::Error },

    #[error("failed to run git: {0}")]
    Spawn(io::Error),

    #[error("git clone of {url} {status}: {stderr}")]
    Clone {
        url: String,
        status: String,
        stderr: String,
    },
}

/// Fetches templates according to a [`TemplateSource`].
#[derive(Debug, Clone)]
pub struct RegistryFetcher {
    source: TemplateSource,
}

impl RegistryFetcher {
    pub fn new(source: TemplateSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    fn clone_url(base: &str, template: TemplateKind) -> String {
        format!("{}/{}.git", base.trim_end_matches('/'), template.id())
    }

    fn copy_local(&self, root: &Path, template: TemplateKind, dest: &Path) -> Result<(), FetchError> {
        let src = root.join(template.id());
        if !src.is_dir() {
            return Err(FetchError::MissingLocal(src));
        }

        let copy_err = |path: &Path, source: io::Error| FetchError::Copy {
            path: path.to_path_buf(),
            source,
        };

        std::fs::create_dir_all(dest).map_err(|e| copy_err(dest, e))?;

        let walker = WalkDir::new(&src)
            .min_depth(1)
            .into_iter()
            .filter_entry(|e| e.file_name() != ".git");

        for entry in walker {
            let entry = entry.map_err(|e| copy_err(&src, e.into()))?;
            let Ok(relative) = entry.path().strip_prefix(&src) else {
                continue;
            };
            let target = dest.join(relative);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&target).map_err(|e| copy_err(&target, e))?;
            } else if entry.file_type().is_file() {
                std::fs::copy(entry.path(), &target).map_err(|e| copy_err(entry.path(), e))?;
            }
        }

        debug!(from = %src.display(), "Copied local template");
        Ok(())
    }

    fn clone_remote(&self, base: &str, template: TemplateKind, dest: &Path) -> Result<(), FetchError> {
        let url = Self::clone_url(base, template);

        let mut cmd = Command::new("git");
        cmd.args(["clone", "--depth", "1", "--quiet"]);
        if let Some(branch) = &self.source.branch {
            cmd.arg("--branch").arg(branch);
        }
        cmd.arg(&url).arg(dest);

        debug!(%url, "Cloning template");
        let output = cmd.output().map_err(FetchError::Spawn)?;
        if !output.status.success() {
            return Err(FetchError::Clone {
                url,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        // The template's history is not part of the project.
        let git_dir = dest.join(".git");
        if git_dir.exists() {
            std::fs::remove_dir_all(&git_dir).map_err(|e| FetchError::Copy {
                path: git_dir,
                source: e,
            })?;
        }
        Ok(())
    }
}

impl TemplateFetcher for RegistryFetcher {
    #[instrument(skip(self, destination), fields(destination = %destination.display()))]
    fn fetch(&self, template: TemplateKind, destination: &Path) -> SproutResult<PathBuf> {
        let result = match (&self.source.local_path, &self.source.registry_url) {
            (Some(root), _) => self.copy_local(root, template, destination),
            (None, Some(url)) => self.clone_remote(url, template, destination),
            (None, None) => {
                return Err(ApplicationError::SourceNotConfigured {
                    template: template.id().to_string(),
                }
                .into());
            }
        };

        result.map_err(|e| ApplicationError::FetchFailed {
            template: template.id().to_string(),
            reason: e.to_string(),
        })?;

        info!(%template, "Template downloaded");
        Ok(destination.to_path_buf())
    }
}
