//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Parser, ValueEnum};
use sprout_core::domain::{DomainError, TemplateKind};

pub mod global;
pub use global::GlobalArgs;

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "sprout",
    bin_name = "sprout",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Bootstrap a new project from a template",
    long_about = "Sprout creates a project directory from a template, fills in \
                  the project's metadata and installs its dependencies.",
    after_help = "EXAMPLES:\n\
        \x20 sprout my-app\n\
        \x20 sprout my-app --template tools-tpl --yes\n\
        \x20 sprout my-app --template react-tpl --yes --no-install\n\
        \x20 sprout --completions bash > ~/.local/share/bash-completion/completions/sprout",
)]
pub struct Cli {
    /// Flags available on every invocation.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Directory to create; its name becomes the package name.
    #[arg(
        value_name = "PROJECT_DIRECTORY",
        required_unless_present = "completions",
        help = "Name of the project directory to create"
    )]
    pub project_directory: Option<String>,

    /// Template to use instead of asking.
    #[arg(
        short = 't',
        long = "template",
        value_name = "ID",
        value_parser = parse_template,
        help = "Template to use (react-tpl, tools-tpl)"
    )]
    pub template: Option<TemplateKind>,

    /// Accept every default without prompting.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Accept defaults for every question"
    )]
    pub yes: bool,

    /// Never run the dependency install.
    #[arg(long = "no-install", help = "Skip installing dependencies")]
    pub no_install: bool,

    /// Print a completion script and exit.
    #[arg(
        long = "completions",
        value_name = "SHELL",
        value_enum,
        help = "Generate shell completions"
    )]
    pub completions: Option<Shell>,
}

fn parse_template(value: &str) -> Result<TemplateKind, DomainError> {
    value.parse()
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}
