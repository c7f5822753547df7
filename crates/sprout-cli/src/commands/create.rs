//! Implementation of `sprout <project-directory>`.
//!
//! Responsibility: wire the adapters from config, hand a `ScaffoldRequest` to
//! the core service, and display the result. No business logic lives here.

use tracing::{debug, info, instrument, warn};

use sprout_adapters::{JinjaRenderer, LocalFilesystem, RegistryFetcher};
use sprout_core::{
    application::DependencyInstaller,
    domain::ProjectName,
    error::SproutError,
    prelude::{ScaffoldOutcome, ScaffoldRequest, ScaffoldService},
};

use crate::{
    cli::Cli,
    config::AppConfig,
    error::{CliError, CliResult},
    output::{Announcer, OutputManager},
    prompt::{CliPrompter, PromptSettings, is_cancellation},
};

/// Execute the scaffold.
///
/// 1. Reject bad names before printing anything
/// 2. Build adapters and the request from config
/// 3. Run the service; the banner prints once a template is chosen
/// 4. Print next-steps guidance
#[instrument(skip_all, fields(project = %name))]
pub fn execute(
    name: String,
    cli: &Cli,
    config: AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    ProjectName::parse(name.as_str()).map_err(SproutError::from)?;

    let settings = PromptSettings {
        template: cli.template,
        assume_yes: cli.yes,
        no_install: cli.no_install,
        install_default: config.defaults.install,
    };
    if settings.needs_terminal() && !cfg!(feature = "interactive") {
        return Err(CliError::FeatureNotAvailable {
            feature: "interactive",
        });
    }

    let base_dir = std::env::current_dir()?;
    let request = ScaffoldRequest::new(name, base_dir)
        .with_temp_dir(config.scaffold.temp_dir.clone())
        .with_default_template(config.defaults.template);

    debug!(
        templates = ?config.templates,
        temp_dir = %request.temp_dir_name,
        "Request built"
    );

    let installer = config.install.installer();
    let install_command = installer.command_line();

    let service = ScaffoldService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(JinjaRenderer::new()?),
        Box::new(RegistryFetcher::new(config.templates)),
        Box::new(CliPrompter::new(settings)),
        Box::new(installer),
    )
    .with_reporter(Box::new(Announcer::new(output.clone())));

    info!(path = %request.project_dir().display(), "Scaffold started");

    match service.scaffold(request) {
        ScaffoldOutcome::Completed(report) => {
            output.finished(&report, &install_command)?;
            Ok(())
        }
        ScaffoldOutcome::Failed { stage, error } => {
            warn!(%stage, "Scaffold stopped");
            if is_cancellation(&error) {
                return Err(CliError::Cancelled);
            }
            Err(CliError::Core(error))
        }
    }
}
