//! The fixed catalogue of templates and the metadata each one needs.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::metadata::Metadata;
use crate::domain::project_name::ProjectName;

/// File extensions treated as opaque binary: copied, never rendered.
pub const OPAQUE_EXTENSIONS: &[&str] = &["ico"];

/// Whether the file at `path` must be copied byte-for-byte.
pub fn is_opaque(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| OPAQUE_EXTENSIONS.contains(&ext))
}

/// A known template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateKind {
    /// Single-page React application.
    #[default]
    #[serde(rename = "react-tpl")]
    React,
    /// Utility package with no per-project metadata.
    #[serde(rename = "tools-tpl", alias = "tools")]
    Tools,
}

impl TemplateKind {
    /// Every template, in menu order.
    pub const ALL: [TemplateKind; 2] = [TemplateKind::React, TemplateKind::Tools];

    /// Identifier passed to the fetcher.
    pub const fn id(&self) -> &'static str {
        match self {
            Self::React => "react-tpl",
            Self::Tools => "tools-tpl",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::React => "React application",
            Self::Tools => "Tools package",
        }
    }

    /// Variables the template expects. Empty for templates rendered as-is.
    pub fn metadata_schema(&self, project_name: &ProjectName) -> MetadataSchema {
        match self {
            Self::React => MetadataSchema::new()
                .with_field("projectName", "Project name", project_name.as_str())
                .with_field(
                    "projectDes",
                    "Project description",
                    format!("A project named {project_name}"),
                ),
            Self::Tools => MetadataSchema::new(),
        }
    }

    /// Commands to suggest once the project exists (after `cd <name>`).
    pub const fn next_steps(&self) -> &'static [&'static str] {
        match self {
            Self::React => &["npm start"],
            Self::Tools => &[],
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TemplateKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "react-tpl" | "react" => Ok(Self::React),
            "tools-tpl" | "tools" => Ok(Self::Tools),
            other => Err(DomainError::UnknownTemplate(other.to_string())),
        }
    }
}

/// One variable a template asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataField {
    pub key: String,
    pub prompt: String,
    pub default: String,
}

/// Ordered list of variables a template asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataSchema {
    fields: Vec<MetadataField>,
}

impl MetadataSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(
        mut self,
        key: impl Into<String>,
        prompt: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        self.fields.push(MetadataField {
            key: key.into(),
            prompt: prompt.into(),
            default: default.into(),
        });
        self
    }

    pub fn fields(&self) -> &[MetadataField] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Metadata with every field set to its default.
    pub fn defaults(&self) -> Metadata {
        self.fields
            .iter()
            .map(|f| (f.key.clone(), f.default.clone()))
            .collect()
    }
}
