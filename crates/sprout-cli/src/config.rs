//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `SPROUT_<SECTION>__<KEY>`, e.g.
//!    `SPROUT_TEMPLATES__LOCAL_PATH`
//! 3. Config file: `--config FILE`, or the platform config file followed by
//!    `.sprout.toml` in the current directory
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use sprout_adapters::{CommandInstaller, TemplateSource};
use sprout_core::{
    application::DEFAULT_TEMP_DIR,
    domain::{TemplateKind, check_temp_dir_name},
};

use crate::error::{CliError, CliResult};

/// Config file looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = ".sprout.toml";

const ENV_PREFIX: &str = "SPROUT";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Answers used when the user is not asked.
    pub defaults: Defaults,
    /// Where templates are fetched from.
    pub templates: TemplateSource,
    /// Dependency install command.
    pub install: InstallConfig,
    /// Scaffolding knobs.
    pub scaffold: ScaffoldConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub template: TemplateKind,
    pub install: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            template: TemplateKind::default(),
            install: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            program: "npm".into(),
            args: vec!["install".into()],
        }
    }
}

impl InstallConfig {
    pub fn installer(&self) -> CommandInstaller {
        CommandInstaller::new(self.program.clone(), self.args.iter().cloned())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    pub temp_dir: String,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            temp_dir: DEFAULT_TEMP_DIR.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration from defaults, files and the environment.
    ///
    /// `config_file` is the path passed via `--config`; it must exist. Without
    /// it, the platform config file and `.sprout.toml` are read when present.
    pub fn load(config_file: Option<&PathBuf>) -> CliResult<Self> {
        let defaults =
            Config::try_from(&Self::default()).map_err(|e| config_error("invalid defaults", e))?;

        let mut builder = Config::builder().add_source(defaults);

        builder = match config_file {
            Some(path) => builder.add_source(toml_file(path).required(true)),
            None => {
                let mut builder = builder;
                if let Some(global) = Self::config_path() {
                    builder = builder.add_source(toml_file(&global).required(false));
                }
                builder.add_source(toml_file(Path::new(LOCAL_CONFIG_FILE)).required(false))
            }
        };

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(" ")
                .with_list_parse_key("install.args"),
        );

        let config = builder
            .build()
            .map_err(|e| config_error("failed to read configuration", e))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| config_error("invalid configuration", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values serde cannot express.
    fn validate(&self) -> CliResult<()> {
        check_temp_dir_name(&self.scaffold.temp_dir).map_err(|e| CliError::ConfigError {
            message: format!("invalid scaffold.temp_dir: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Path to the platform configuration file, if a home directory exists.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "sprout", "sprout")
            .map(|d| d.config_dir().join("config.toml"))
    }
}

fn toml_file(path: &Path) -> File<config::FileSourceFile, FileFormat> {
    File::from(path).format(FileFormat::Toml)
}

fn config_error(message: &str, e: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: format!("{message}: {e}"),
        source: Some(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_core::application::DependencyInstaller;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_the_classic_flow() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.template, TemplateKind::React);
        assert!(cfg.defaults.install);
        assert_eq!(cfg.install.installer().command_line(), "npm install");
        assert_eq!(cfg.scaffold.temp_dir, ".download-temp");
        assert!(!cfg.templates.is_configured());
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sprout.toml");
        std::fs::write(
            &path,
            r#"
[defaults]
template = "tools-tpl"
install = false

[templates]
local_path = "/srv/templates"

[install]
program = "pnpm"
args = ["install", "--frozen-lockfile"]
"#,
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.defaults.template, TemplateKind::Tools);
        assert!(!cfg.defaults.install);
        assert_eq!(cfg.templates.local_path, Some(PathBuf::from("/srv/templates")));
        assert_eq!(cfg.install.program, "pnpm");
        assert_eq!(cfg.install.args, vec!["install", "--frozen-lockfile"]);
        assert_eq!(cfg.scaffold.temp_dir, ".download-temp");
    }

    #[test]
    fn missing_explicit_file_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let err = AppConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn unknown_template_in_file_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sprout.toml");
        std::fs::write(&path, "[defaults]\ntemplate = \"vue-tpl\"\n").unwrap();

        assert!(matches!(
            AppConfig::load(Some(&path)),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn temp_dir_must_be_a_single_child_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sprout.toml");

        for name in ["", ".", "..", "a/b"] {
            std::fs::write(&path, format!("[scaffold]\ntemp_dir = {name:?}\n")).unwrap();
            let err = AppConfig::load(Some(&path)).unwrap_err();
            assert!(
                matches!(&err, CliError::ConfigError { message, .. } if message.contains("scaffold.temp_dir")),
                "{name:?}: {err}"
            );
            assert_eq!(err.exit_code(), 4);
        }
    }

    #[test]
    fn custom_temp_dir_is_accepted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sprout.toml");
        std::fs::write(&path, "[scaffold]\ntemp_dir = \".tmp-tpl\"\n").unwrap();

        assert_eq!(AppConfig::load(Some(&path)).unwrap().scaffold.temp_dir, ".tmp-tpl");
    }
}
