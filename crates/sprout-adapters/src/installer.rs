//! Package-manager install step.

use std::path::Path;
use std::process::{Command, Stdio};

use sprout_core::{
    application::{
        ApplicationError,
        ports::{DependencyInstaller, ExitSignal},
    },
    error::SproutResult,
};
use tracing::{debug, instrument};

/// Runs a configured command (`npm install` by default) inside the project,
/// with the terminal attached so its progress output is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInstaller {
    program: String,
    args: Vec<String>,
}

impl CommandInstaller {
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn npm() -> Self {
        Self::new("npm", ["install"])
    }
}

impl Default for CommandInstaller {
    fn default() -> Self {
        Self::npm()
    }
}

impl DependencyInstaller for CommandInstaller {
    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[instrument(skip(self, project_dir), fields(dir = %project_dir.display()))]
    fn install(&self, project_dir: &Path) -> SproutResult<ExitSignal> {
        debug!(command = %self.command_line(), "Spawning installer");

        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(project_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| ApplicationError::InstallFailed {
                command: self.command_line(),
                status: format!("could not be started: {e}"),
            })?;

        let signal = ExitSignal::from_code(status.code());
        debug!(%signal, "Installer finished");
        Ok(signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn command_line_joins_program_and_args() {
        assert_eq!(CommandInstaller::npm().command_line(), "npm install");
        assert_eq!(
            CommandInstaller::new("pnpm", ["install", "--silent"]).command_line(),
            "pnpm install --silent"
        );
    }

    #[test]
    fn missing_program_is_an_install_failure() {
        let dir = TempDir::new().unwrap();
        let err = CommandInstaller::new("sprout-no-such-program", Vec::<String>::new())
            .install(dir.path())
            .unwrap_err();
        assert!(err.to_string().contains("could not be started"));
    }

    #[cfg(unix)]
    #[test]
    fn exit_code_is_reported() {
        let dir = TempDir::new().unwrap();

        let ok = CommandInstaller::new("sh", ["-c", "exit 0"]).install(dir.path()).unwrap();
        assert!(ok.is_success());

        let failed = CommandInstaller::new("sh", ["-c", "exit 3"]).install(dir.path()).unwrap();
        assert_eq!(failed.code(), Some(3));
    }

    #[cfg(unix)]
    #[test]
    fn runs_inside_project_dir() {
        let dir = TempDir::new().unwrap();
        CommandInstaller::new("sh", ["-c", "touch installed"])
            .install(dir.path())
            .unwrap();
        assert!(dir.path().join("installed").exists());
    }
}
