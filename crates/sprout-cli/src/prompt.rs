//! Terminal implementation of the core `Prompter` port.
//!
//! Flags and `--yes` answer questions up front; anything left is asked with
//! dialoguer when the `interactive` feature is enabled.

use sprout_core::{
    application::{ApplicationError, Prompter},
    domain::{Metadata, MetadataSchema, TemplateKind},
    error::SproutResult,
};
use tracing::debug;

/// Reason carried by `PromptFailed` when the user aborts a question.
pub const PROMPT_CANCELLED: &str = "cancelled by user";

/// Answers known before the run starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PromptSettings {
    /// `--template`.
    pub template: Option<TemplateKind>,
    /// `--yes`.
    pub assume_yes: bool,
    /// `--no-install`.
    pub no_install: bool,
    /// `defaults.install` from config.
    pub install_default: bool,
}

impl PromptSettings {
    /// Whether some question may still reach the terminal.
    pub fn needs_terminal(&self) -> bool {
        !self.assume_yes
    }
}

pub struct CliPrompter {
    settings: PromptSettings,
}

impl CliPrompter {
    pub fn new(settings: PromptSettings) -> Self {
        Self { settings }
    }
}

impl Prompter for CliPrompter {
    fn choose_template(
        &self,
        choices: &[TemplateKind],
        default: TemplateKind,
    ) -> SproutResult<TemplateKind> {
        if let Some(template) = self.settings.template {
            debug!(template = template.id(), "Template given on the command line");
            return Ok(template);
        }
        if self.settings.assume_yes {
            return Ok(default);
        }
        interactive::select_template(choices, default)
    }

    fn collect_metadata(
        &self,
        _template: TemplateKind,
        schema: &MetadataSchema,
    ) -> SproutResult<Metadata> {
        if self.settings.assume_yes {
            return Ok(schema.defaults());
        }
        let mut metadata = Metadata::new();
        for field in schema.fields() {
            let value = interactive::input(&field.prompt, &field.default)?;
            metadata.insert(field.key.clone(), value);
        }
        Ok(metadata)
    }

    fn confirm_install(&self) -> SproutResult<bool> {
        if self.settings.no_install {
            return Ok(false);
        }
        if self.settings.assume_yes {
            return Ok(self.settings.install_default);
        }
        interactive::confirm("Install dependencies?", self.settings.install_default)
    }
}

#[cfg(feature = "interactive")]
mod interactive {
    use std::io::ErrorKind;

    use dialoguer::{Confirm, Error as DialoguerError, Input, Select};
    use sprout_core::{
        application::ApplicationError, domain::TemplateKind, error::SproutResult,
    };

    use super::PROMPT_CANCELLED;

    pub fn select_template(
        choices: &[TemplateKind],
        default: TemplateKind,
    ) -> SproutResult<TemplateKind> {
        let items: Vec<String> = choices
            .iter()
            .map(|t| format!("{} ({})", t.id(), t.description()))
            .collect();
        let default_index = choices.iter().position(|t| *t == default).unwrap_or(0);

        let selection = Select::new()
            .with_prompt("Choose a project template")
            .items(&items)
            .default(default_index)
            .interact_opt()
            .map_err(prompt_error)?;

        match selection {
            Some(index) => choices
                .get(index)
                .copied()
                .ok_or_else(|| prompt_failed(format!("no template at index {index}"))),
            None => Err(prompt_failed(PROMPT_CANCELLED)),
        }
    }

    pub fn input(prompt: &str, default: &str) -> SproutResult<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .default(default.to_string())
            .interact_text()
            .map_err(prompt_error)
    }

    pub fn confirm(prompt: &str, default: bool) -> SproutResult<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn prompt_error(err: DialoguerError) -> sprout_core::error::SproutError {
        match err {
            DialoguerError::IO(e) if e.kind() == ErrorKind::Interrupted => {
                prompt_failed(PROMPT_CANCELLED)
            }
            other => prompt_failed(other.to_string()),
        }
    }

    fn prompt_failed(reason: impl Into<String>) -> sprout_core::error::SproutError {
        ApplicationError::PromptFailed {
            reason: reason.into(),
        }
        .into()
    }
}

#[cfg(not(feature = "interactive"))]
mod interactive {
    use sprout_core::{domain::TemplateKind, error::SproutResult};

    use super::unavailable;

    pub fn select_template(_: &[TemplateKind], _: TemplateKind) -> SproutResult<TemplateKind> {
        Err(unavailable())
    }

    pub fn input(_: &str, _: &str) -> SproutResult<String> {
        Err(unavailable())
    }

    pub fn confirm(_: &str, _: bool) -> SproutResult<bool> {
        Err(unavailable())
    }
}

#[cfg(not(feature = "interactive"))]
fn unavailable() -> sprout_core::error::SproutError {
    ApplicationError::PromptFailed {
        reason: "this build has no interactive prompts; pass --yes".into(),
    }
    .into()
}

/// Whether `err` is a prompt the user aborted.
pub fn is_cancellation(err: &sprout_core::error::SproutError) -> bool {
    matches!(
        err,
        sprout_core::error::SproutError::Application(ApplicationError::PromptFailed { reason })
            if reason == PROMPT_CANCELLED
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_core::domain::ProjectName;

    fn prompter(settings: PromptSettings) -> CliPrompter {
        CliPrompter::new(settings)
    }

    fn react_schema() -> MetadataSchema {
        TemplateKind::React.metadata_schema(&ProjectName::parse("demo").unwrap())
    }

    #[test]
    fn template_flag_wins() {
        let p = prompter(PromptSettings {
            template: Some(TemplateKind::Tools),
            ..Default::default()
        });
        let chosen = p
            .choose_template(&TemplateKind::ALL, TemplateKind::React)
            .unwrap();
        assert_eq!(chosen, TemplateKind::Tools);
    }

    #[test]
    fn yes_takes_the_default_template() {
        let p = prompter(PromptSettings {
            assume_yes: true,
            ..Default::default()
        });
        let chosen = p
            .choose_template(&TemplateKind::ALL, TemplateKind::Tools)
            .unwrap();
        assert_eq!(chosen, TemplateKind::Tools);
    }

    #[test]
    fn yes_fills_metadata_defaults() {
        let p = prompter(PromptSettings {
            assume_yes: true,
            ..Default::default()
        });
        let metadata = p
            .collect_metadata(TemplateKind::React, &react_schema())
            .unwrap();
        assert_eq!(metadata.get("projectName"), Some("demo"));
        assert_eq!(metadata.get("projectDes"), Some("A project named demo"));
    }

    #[test]
    fn no_install_is_never_overridden() {
        let p = prompter(PromptSettings {
            assume_yes: true,
            no_install: true,
            install_default: true,
            ..Default::default()
        });
        assert!(!p.confirm_install().unwrap());
    }

    #[test]
    fn yes_uses_the_configured_install_default() {
        let on = prompter(PromptSettings {
            assume_yes: true,
            install_default: true,
            ..Default::default()
        });
        let off = prompter(PromptSettings {
            assume_yes: true,
            install_default: false,
            ..Default::default()
        });
        assert!(on.confirm_install().unwrap());
        assert!(!off.confirm_install().unwrap());
    }

    #[test]
    fn empty_schema_needs_no_terminal() {
        let p = prompter(PromptSettings::default());
        let metadata = p
            .collect_metadata(TemplateKind::Tools, &MetadataSchema::new())
            .unwrap();
        assert!(metadata.is_empty());
    }

    #[test]
    fn cancellation_is_recognised() {
        let cancelled: sprout_core::error::SproutError = ApplicationError::PromptFailed {
            reason: PROMPT_CANCELLED.into(),
        }
        .into();
        let failed: sprout_core::error::SproutError = ApplicationError::PromptFailed {
            reason: "not a terminal".into(),
        }
        .into();
        assert!(is_cancellation(&cancelled));
        assert!(!is_cancellation(&failed));
    }
}
