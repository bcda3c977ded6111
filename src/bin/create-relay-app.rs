// src/bin/create-relay-app.rs

use anyhow::{Context, Result};
use colored::*;
use create_relay_app::{
    cli::{
        self,
        report::ConsoleReporter,
        wizard::{self, Collaborators},
    },
    core::arguments::{ArgumentKind, ResolutionError},
    t,
    system::{
        environment::Environment, executor::ProcessRunner, filesystem::LocalFilesystem,
        prompt::{DialoguerPrompter, Prompter},
    },
};
use std::{io::IsTerminal, rc::Rc};

/// The main entry point of `create-relay-app`.
/// It sets up logging, runs the wizard and performs centralized error handling.
fn main() {
    env_logger::init();

    if let Err(e) = run_cli() {
        // A cancelled prompt is not a failure worth a message.
        if let Some(ResolutionError::Cancelled) = e.downcast_ref::<ResolutionError>() {
            eprintln!("\n{}", t!("common.info.operation_cancelled").yellow());
            std::process::exit(130);
        }

        eprintln!("\n{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let fs = Rc::new(LocalFilesystem);
    let arguments = ArgumentKind::all(fs.clone());
    let (cli, matches) = cli::parse(&arguments);
    log::debug!("CLI args parsed: {:?}", cli);

    let env = Environment::from_current_dir(cli.package_manager)
        .context(t!("cli.error.environment"))?;

    let interactive = !cli.non_interactive && std::io::stdin().is_terminal();
    let mut dialoguer = DialoguerPrompter;
    let prompter: Option<&mut dyn Prompter> = if interactive {
        Some(&mut dialoguer)
    } else {
        None
    };
    let mut reporter = ConsoleReporter;

    wizard::run(
        &cli,
        &matches,
        &arguments,
        env,
        Collaborators {
            fs,
            runner: Rc::new(ProcessRunner),
            prompter,
            reporter: &mut reporter,
        },
    )
}
