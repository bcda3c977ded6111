// src/cli/mod.rs

//! The command line surface: the fixed global flags, the per-argument flags
//! contributed by [`ArgumentKind`], and the wizard that ties them together.

pub mod preflight;
pub mod report;
pub mod wizard;

use crate::{core::arguments::ArgumentKind, models::PackageManager};
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;

/// Builds the color-aware help string at runtime.
fn build_help_string() -> &'static str {
    let use_colors = colored::control::SHOULD_COLORIZE.should_colorize();

    let template = t!("cli.help.template");

    let title = if use_colors { "\x1b[1;33m" } else { "" }; // Bold Yellow
    let hl = if use_colors { "\x1b[1;36m" } else { "" }; // Bold Cyan
    let dim = if use_colors { "\x1b[2m" } else { "" };
    let reset = if use_colors { "\x1b[0m" } else { "" };

    let formatted_string = template
        .replace("<title>", title)
        .replace("</title>", reset)
        .replace("<hl>", hl)
        .replace("</hl>", reset)
        .replace("<dim>", dim)
        .replace("</dim>", reset);

    Box::leak(formatted_string.into_boxed_str())
}

/// create-relay-app: sets up Relay in an existing React project.
#[derive(Parser, Debug, Default, Clone)]
#[command(
    name = "create-relay-app",
    author,
    version,
    about,
    help_template = { build_help_string() },
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
pub struct Cli {
    /// Never prompt; take flags and computed defaults as they are.
    #[arg(long)]
    pub non_interactive: bool,

    /// The package manager used to install dependencies. Detected when omitted.
    #[arg(short = 'p', long, value_enum, value_name = "manager")]
    pub package_manager: Option<PackageManager>,

    /// Apply the resolved settings without asking for confirmation.
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Do not install any packages.
    #[arg(long)]
    pub skip_install: bool,

    /// Run even if the git working tree has uncommitted changes.
    #[arg(long)]
    pub ignore_git_changes: bool,
}

/// The full command: the global flags plus one flag per argument.
pub fn build_command(arguments: &[ArgumentKind]) -> clap::Command {
    arguments
        .iter()
        .fold(Cli::command(), |command, argument| {
            argument.register_cli_option(command)
        })
}

/// Parses `args` into the global flags and the raw matches the arguments read from.
pub fn try_parse_from<I, T>(
    arguments: &[ArgumentKind],
    args: I,
) -> Result<(Cli, ArgMatches), clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_command(arguments).try_get_matches_from(args)?;
    let cli = Cli::from_arg_matches(&matches)?;
    Ok((cli, matches))
}

/// Parses the process arguments, exiting with clap's usage output on error.
pub fn parse(arguments: &[ArgumentKind]) -> (Cli, ArgMatches) {
    try_parse_from(arguments, std::env::args_os()).unwrap_or_else(|e| e.exit())
}
