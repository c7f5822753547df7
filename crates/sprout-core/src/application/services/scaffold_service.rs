//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Validate the project name
//! 2. Prepare and safety-check the target directory
//! 3. Choose a template and collect its metadata
//! 4. Fetch the template into a temporary tree
//! 5. Render the tree into the project directory
//! 6. Optionally install dependencies
//!
//! Each step runs only after the previous one settled. The first failure
//! ends the run and is reported together with the last stage reached.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        outcome::{InstallStatus, ScaffoldOutcome, ScaffoldReport, ScaffoldRequest, ScaffoldStage},
        ports::{
            DependencyInstaller, Filesystem, ProgressReporter, Prompter, TemplateFetcher,
            TemplateRenderer,
        },
        services::{RenderService, SafetyChecker},
    },
    domain::{Metadata, ProjectName, RenderContext, TemplateKind, check_temp_dir_name},
    error::SproutResult,
};

/// Main scaffolding service.
///
/// Owns the adapters for one process; every call to
/// [`scaffold`](Self::scaffold) is an independent run.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    renderer: Box<dyn TemplateRenderer>,
    fetcher: Box<dyn TemplateFetcher>,
    prompter: Box<dyn Prompter>,
    installer: Box<dyn DependencyInstaller>,
    reporter: Option<Box<dyn ProgressReporter>>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use sprout_core::application::{ScaffoldRequest, ScaffoldService};
    ///
    /// let service = ScaffoldService::new(
    ///     filesystem, // impl Filesystem
    ///     renderer,   // impl TemplateRenderer
    ///     fetcher,    // impl TemplateFetcher
    ///     prompter,   // impl Prompter
    ///     installer,  // impl DependencyInstaller
    /// );
    /// let outcome = service.scaffold(ScaffoldRequest::new("my-app", "."));
    /// ```
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        renderer: Box<dyn TemplateRenderer>,
        fetcher: Box<dyn TemplateFetcher>,
        prompter: Box<dyn Prompter>,
        installer: Box<dyn DependencyInstaller>,
    ) -> Self {
        Self {
            filesystem,
            renderer,
            fetcher,
            prompter,
            installer,
            reporter: None,
        }
    }

    /// Notify `reporter` whenever a stage completes.
    pub fn with_reporter(mut self, reporter: Box<dyn ProgressReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Scaffold a new project.
    ///
    /// Never panics and never retries: the outcome is either a report of the
    /// finished project or the first error with the stage it interrupted.
    #[instrument(
        skip_all,
        fields(
            project = %request.project_name,
            base_dir = %request.base_dir.display()
        )
    )]
    pub fn scaffold(&self, request: ScaffoldRequest) -> ScaffoldOutcome {
        let mut stage = ScaffoldStage::Start;

        match self.run(&request, &mut stage) {
            Ok(report) => {
                info!(project_dir = %report.project_dir.display(), "Scaffold completed successfully");
                ScaffoldOutcome::Completed(report)
            }
            Err(error) => {
                warn!(%stage, error = %error, "Scaffold failed");
                ScaffoldOutcome::Failed { stage, error }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn run(
        &self,
        request: &ScaffoldRequest,
        stage: &mut ScaffoldStage,
    ) -> SproutResult<ScaffoldReport> {
        check_temp_dir_name(&request.temp_dir_name)?;
        let project_dir = request.project_dir();

        let project_name = ProjectName::parse(request.project_name.as_str())?;
        self.advance(stage, ScaffoldStage::NameChecked, &project_dir);

        self.filesystem.create_dir_all(&project_dir)?;
        self.advance(stage, ScaffoldStage::DirectoryPrepared, &project_dir);

        SafetyChecker::new(self.filesystem.as_ref()).check_safe(&project_dir)?;
        self.advance(stage, ScaffoldStage::SafetyChecked, &project_dir);

        let template = self
            .prompter
            .choose_template(&TemplateKind::ALL, request.default_template)?;
        info!(%template, "Template chosen");
        self.advance(stage, ScaffoldStage::TemplateChosen, &project_dir);

        let metadata = self.collect_metadata(template, &project_name)?;
        self.advance(stage, ScaffoldStage::MetadataCollected, &project_dir);

        let temp_dir = request.temp_dir(&project_dir);
        let source = self.fetch(template, &temp_dir)?;
        self.advance(stage, ScaffoldStage::TemplateFetched, &project_dir);

        let context = RenderContext::new(metadata, source, &project_dir);
        RenderService::new(self.filesystem.as_ref(), self.renderer.as_ref()).render(context)?;
        self.advance(stage, ScaffoldStage::Rendered, &project_dir);

        let wants_install = self.prompter.confirm_install()?;
        self.advance(stage, ScaffoldStage::InstallPrompted, &project_dir);

        let install = if wants_install {
            self.install(&project_dir)?;
            self.advance(stage, ScaffoldStage::Installed, &project_dir);
            InstallStatus::Installed
        } else {
            info!("Dependency install declined");
            InstallStatus::Declined
        };

        self.advance(stage, ScaffoldStage::Done, &project_dir);
        Ok(ScaffoldReport {
            project_name,
            project_dir,
            template,
            install,
        })
    }

    fn advance(&self, stage: &mut ScaffoldStage, next: ScaffoldStage, project_dir: &Path) {
        debug!(from = %stage, to = %next, "Stage transition");
        *stage = next;
        if let Some(reporter) = &self.reporter {
            reporter.stage_reached(next, project_dir);
        }
    }

    fn collect_metadata(
        &self,
        template: TemplateKind,
        project_name: &ProjectName,
    ) -> SproutResult<Metadata> {
        let schema = template.metadata_schema(project_name);
        if schema.is_empty() {
            debug!(%template, "Template needs no metadata");
            return Ok(Metadata::new());
        }
        self.prompter.collect_metadata(template, &schema)
    }

    /// Fetch into `temp_dir`; a failed fetch leaves no partial tree behind.
    fn fetch(&self, template: TemplateKind, temp_dir: &Path) -> SproutResult<PathBuf> {
        match self.fetcher.fetch(template, temp_dir) {
            Ok(source) => {
                info!(source = %source.display(), "Template fetched");
                Ok(source)
            }
            Err(e) => {
                if self.filesystem.exists(temp_dir) {
                    if let Err(cleanup) = self.filesystem.remove_dir_all(temp_dir) {
                        warn!(error = %cleanup, path = %temp_dir.display(), "Failed to remove partial download");
                    }
                }
                Err(e)
            }
        }
    }

    fn install(&self, project_dir: &Path) -> SproutResult<()> {
        let command = self.installer.command_line();
        info!(%command, "Installing dependencies");

        let signal = self.installer.install(project_dir)?;
        if signal.is_success() {
            return Ok(());
        }

        Err(ApplicationError::InstallFailed {
            command,
            status: signal.to_string(),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use crate::application::ports::{
        ExitSignal, MockDependencyInstaller, MockFilesystem, MockProgressReporter, MockPrompter,
        MockTemplateFetcher, MockTemplateRenderer,
    };
    use crate::domain::{DirEntry, DomainError};
    use crate::error::SproutError;

    const BASE: &str = "/work";
    const PROJECT: &str = "/work/my-app";
    const TEMP: &str = "/work/my-app/.download-temp";

    struct Mocks {
        filesystem: MockFilesystem,
        renderer: MockTemplateRenderer,
        fetcher: MockTemplateFetcher,
        prompter: MockPrompter,
        installer: MockDependencyInstaller,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                filesystem: MockFilesystem::new(),
                renderer: MockTemplateRenderer::new(),
                fetcher: MockTemplateFetcher::new(),
                prompter: MockPrompter::new(),
                installer: MockDependencyInstaller::new(),
            }
        }

        /// An empty target that renders a single `index.js`.
        fn happy_filesystem(mut self) -> Self {
            let fs = &mut self.filesystem;
            fs.expect_create_dir_all().returning(|_| Ok(()));
            fs.expect_exists().returning(|p| !p.ends_with("index.js"));
            fs.expect_read_dir().returning(|_| Ok(vec![]));
            fs.expect_list_files()
                .returning(|_| Ok(vec![PathBuf::from("index.js")]));
            fs.expect_read_file()
                .returning(|_| Ok(b"// {{ projectName }}".to_vec()));
            fs.expect_write_file().returning(|_, _| Ok(()));
            fs.expect_remove_dir_all()
                .withf(|p| p == Path::new(TEMP))
                .times(1)
                .returning(|_| Ok(()));
            self.renderer
                .expect_render()
                .returning(|_, source, _| Ok(source.to_string()));
            self.fetcher
                .expect_fetch()
                .returning(|_, dest| Ok(dest.to_path_buf()));
            self
        }

        fn choose(mut self, template: TemplateKind) -> Self {
            self.prompter
                .expect_choose_template()
                .times(1)
                .returning(move |_, _| Ok(template));
            self
        }

        fn service(self) -> ScaffoldService {
            ScaffoldService::new(
                Box::new(self.filesystem),
                Box::new(self.renderer),
                Box::new(self.fetcher),
                Box::new(self.prompter),
                Box::new(self.installer),
            )
        }
    }

    fn request(name: &str) -> ScaffoldRequest {
        ScaffoldRequest::new(name, BASE)
    }

    /// A reporter that records every stage it is told about.
    fn recording_reporter() -> (MockProgressReporter, Arc<Mutex<Vec<ScaffoldStage>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut reporter = MockProgressReporter::new();
        reporter
            .expect_stage_reached()
            .withf(|_, dir| dir == Path::new(PROJECT))
            .returning(move |stage, _| sink.lock().unwrap().push(stage));
        (reporter, seen)
    }

    #[test]
    fn invalid_name_touches_nothing() {
        // Any call on a mock without expectations panics.
        let outcome = Mocks::new().service().scaffold(request("MyApp"));

        match outcome {
            ScaffoldOutcome::Failed { stage, error } => {
                assert_eq!(stage, ScaffoldStage::Start);
                assert!(matches!(
                    error,
                    SproutError::Domain(DomainError::InvalidName { .. })
                ));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn reserved_name_is_rejected() {
        let outcome = Mocks::new().service().scaffold(request("react-dom"));
        let err = outcome.into_result().unwrap_err();
        assert!(matches!(
            err,
            SproutError::Domain(DomainError::ReservedName { .. })
        ));
    }

    #[test]
    fn unsafe_directory_stops_before_prompting() {
        let mut mocks = Mocks::new();
        mocks.filesystem.expect_create_dir_all().returning(|_| Ok(()));
        mocks.filesystem.expect_exists().return_const(true);
        mocks
            .filesystem
            .expect_read_dir()
            .returning(|_| Ok(vec![DirEntry::directory(".git"), DirEntry::file("index.html")]));
        mocks.prompter.expect_choose_template().never();

        match mocks.service().scaffold(request("my-app")) {
            ScaffoldOutcome::Failed { stage, error } => {
                assert_eq!(stage, ScaffoldStage::DirectoryPrepared);
                assert!(error.to_string().contains("my-app"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn tools_template_skips_metadata_and_declines_install() {
        let mut mocks = Mocks::new().happy_filesystem().choose(TemplateKind::Tools);
        mocks.prompter.expect_collect_metadata().never();
        mocks.prompter.expect_confirm_install().returning(|| Ok(false));
        mocks.installer.expect_install().never();

        let report = mocks
            .service()
            .scaffold(request("my-app"))
            .into_result()
            .unwrap();

        assert_eq!(report.project_dir, PathBuf::from(PROJECT));
        assert_eq!(report.template, TemplateKind::Tools);
        assert_eq!(report.install, InstallStatus::Declined);
    }

    #[test]
    fn react_template_collects_metadata_and_installs() {
        let mut mocks = Mocks::new().happy_filesystem().choose(TemplateKind::React);
        mocks
            .prompter
            .expect_collect_metadata()
            .withf(|template, schema| *template == TemplateKind::React && schema.fields().len() == 2)
            .times(1)
            .returning(|_, schema| Ok(schema.defaults()));
        mocks.prompter.expect_confirm_install().returning(|| Ok(true));
        mocks
            .installer
            .expect_command_line()
            .return_const("npm install".to_string());
        mocks
            .installer
            .expect_install()
            .withf(|dir| dir == Path::new(PROJECT))
            .times(1)
            .returning(|_| Ok(ExitSignal::success()));

        let report = mocks
            .service()
            .scaffold(request("my-app"))
            .into_result()
            .unwrap();

        assert_eq!(report.install, InstallStatus::Installed);
        assert_eq!(report.project_name.as_str(), "my-app");
    }

    #[test]
    fn failed_install_keeps_project_and_reports_stage() {
        let mut mocks = Mocks::new().happy_filesystem().choose(TemplateKind::Tools);
        mocks.prompter.expect_confirm_install().returning(|| Ok(true));
        mocks
            .installer
            .expect_command_line()
            .return_const("npm install".to_string());
        mocks
            .installer
            .expect_install()
            .returning(|_| Ok(ExitSignal::from_code(Some(1))));
        mocks.filesystem.expect_remove_file().never();

        match mocks.service().scaffold(request("my-app")) {
            ScaffoldOutcome::Failed { stage, error } => {
                assert_eq!(stage, ScaffoldStage::InstallPrompted);
                assert_eq!(
                    error.to_string(),
                    "Dependency installation failed: `npm install` exited with code 1"
                );
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn fetch_failure_removes_partial_tree() {
        let mut mocks = Mocks::new().choose(TemplateKind::Tools);
        mocks.filesystem.expect_create_dir_all().returning(|_| Ok(()));
        mocks.filesystem.expect_exists().return_const(true);
        mocks.filesystem.expect_read_dir().returning(|_| Ok(vec![]));
        mocks
            .filesystem
            .expect_remove_dir_all()
            .withf(|p| p == Path::new(TEMP))
            .times(1)
            .returning(|_| Ok(()));
        mocks.fetcher.expect_fetch().returning(|template, _| {
            Err(ApplicationError::FetchFailed {
                template: template.id().to_string(),
                reason: "network unreachable".into(),
            }
            .into())
        });
        mocks.prompter.expect_confirm_install().never();

        match mocks.service().scaffold(request("my-app")) {
            ScaffoldOutcome::Failed { stage, error } => {
                assert_eq!(stage, ScaffoldStage::MetadataCollected);
                assert!(error.to_string().contains("network unreachable"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn custom_temp_dir_is_used() {
        let mut mocks = Mocks::new().choose(TemplateKind::Tools);
        mocks.filesystem.expect_create_dir_all().returning(|_| Ok(()));
        mocks.filesystem.expect_exists().return_const(false);
        mocks
            .fetcher
            .expect_fetch()
            .withf(|_, dest| dest == Path::new("/work/my-app/.tmp-tpl"))
            .times(1)
            .returning(|template, _| {
                Err(ApplicationError::SourceNotConfigured {
                    template: template.id().to_string(),
                }
                .into())
            });

        let outcome = mocks
            .service()
            .scaffold(request("my-app").with_temp_dir(".tmp-tpl"));
        assert!(!outcome.is_success());
    }

    #[test]
    fn temp_dir_outside_the_project_touches_nothing() {
        for name in ["", ".", "..", "a/b"] {
            // No expectations: any filesystem or fetcher call would panic.
            let outcome = Mocks::new()
                .service()
                .scaffold(request("my-app").with_temp_dir(name));

            match outcome {
                ScaffoldOutcome::Failed { stage, error } => {
                    assert_eq!(stage, ScaffoldStage::Start, "{name:?}");
                    assert!(
                        matches!(
                            error,
                            SproutError::Domain(DomainError::InvalidTempDir { .. })
                        ),
                        "{name:?}: {error}"
                    );
                    assert_eq!(error.category(), crate::error::ErrorCategory::Configuration);
                }
                other => panic!("expected failure for {name:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn reporter_hears_nothing_past_a_failed_safety_check() {
        let mut mocks = Mocks::new();
        mocks.filesystem.expect_create_dir_all().returning(|_| Ok(()));
        mocks.filesystem.expect_exists().return_const(true);
        mocks
            .filesystem
            .expect_read_dir()
            .returning(|_| Ok(vec![DirEntry::file("index.html")]));
        let (reporter, seen) = recording_reporter();

        let outcome = mocks
            .service()
            .with_reporter(Box::new(reporter))
            .scaffold(request("my-app"));

        assert!(!outcome.is_success());
        assert_eq!(
            *seen.lock().unwrap(),
            vec![ScaffoldStage::NameChecked, ScaffoldStage::DirectoryPrepared]
        );
    }

    #[test]
    fn reporter_sees_every_stage_of_a_run() {
        let mut mocks = Mocks::new().happy_filesystem().choose(TemplateKind::Tools);
        mocks.prompter.expect_confirm_install().returning(|| Ok(false));
        let (reporter, seen) = recording_reporter();

        mocks
            .service()
            .with_reporter(Box::new(reporter))
            .scaffold(request("my-app"))
            .into_result()
            .unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                ScaffoldStage::NameChecked,
                ScaffoldStage::DirectoryPrepared,
                ScaffoldStage::SafetyChecked,
                ScaffoldStage::TemplateChosen,
                ScaffoldStage::MetadataCollected,
                ScaffoldStage::TemplateFetched,
                ScaffoldStage::Rendered,
                ScaffoldStage::InstallPrompted,
                ScaffoldStage::Done,
            ]
        );
    }
}
