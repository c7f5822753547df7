//! Output management and formatting.

use std::io;
use std::path::Path;

use console::Term;
use owo_colors::OwoColorize;
use sprout_core::prelude::{InstallStatus, ProgressReporter, ScaffoldReport, ScaffoldStage};
use tracing::debug;

use crate::cli::global::GlobalArgs;
use crate::config::AppConfig;

const BANNER: &str = r"
  ___ _ __  _ __ ___  _   _| |_
 / __| '_ \| '__/ _ \| | | | __|
 \__ \ |_) | | | (_) | |_| | |_
 |___/ .__/|_|  \___/ \__,_|\__|
     |_|";

/// Manages CLI output based on configuration.
#[derive(Clone)]
pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        Self {
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    // ── Scaffold-specific output ──────────────────────────────────────────

    /// `Creating a new app in <root>.` followed by the banner.
    pub fn announce(&self, root: &Path) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let root = root.display().to_string();
        let root = if self.no_color {
            root
        } else {
            root.green().to_string()
        };
        self.print("")?;
        self.print(&format!("Creating a new app in {root}."))?;
        self.header(BANNER)?;
        self.print("")
    }

    /// Completion message plus the commands to run next.
    pub fn finished(&self, report: &ScaffoldReport, install_command: &str) -> io::Result<()> {
        self.success(&format!("Project {} created", report.project_name))?;
        if report.install == InstallStatus::Declined {
            self.warning(&format!(
                "Dependencies were not installed; run `{install_command}` first"
            ))?;
        }

        self.print("")?;
        self.print("Next steps:")?;
        for step in next_steps(report, install_command) {
            let step = format!("  {step}");
            if self.no_color {
                self.print(&step)?;
            } else {
                self.print(&step.green().to_string())?;
            }
        }
        self.print("")
    }
}

/// Prints the creation banner once the target is known to be safe and a
/// template is chosen, so a refused directory never reads as a started run.
pub struct Announcer {
    output: OutputManager,
}

impl Announcer {
    pub fn new(output: OutputManager) -> Self {
        Self { output }
    }
}

impl ProgressReporter for Announcer {
    fn stage_reached(&self, stage: ScaffoldStage, project_dir: &Path) {
        if stage != ScaffoldStage::TemplateChosen {
            return;
        }
        if let Err(e) = self.output.announce(project_dir) {
            debug!(error = %e, "Could not print the banner");
        }
    }
}

/// `cd <name>`, the install command when it was skipped, then the template's own steps.
fn next_steps(report: &ScaffoldReport, install_command: &str) -> Vec<String> {
    let mut steps = vec![format!("cd {}", report.project_name)];
    if report.install == InstallStatus::Declined {
        steps.push(install_command.to_string());
    }
    steps.extend(report.template.next_steps().iter().map(|s| s.to_string()));
    steps
}

// ── tests ─────────────────────────────────────────────────────────────────────
