// src/cli/wizard.rs

use super::{Cli, preflight, report};
use crate::{
    core::{
        arguments::{ArgumentKind, ArgumentResolver, ResolutionError},
        context::ProjectContext,
        tasks::{TaskKind, TaskReporter, run_tasks},
    },
    system::{
        environment::Environment, executor::CommandRunner, filesystem::Filesystem,
        prompt::Prompter,
    },
};
use anyhow::{Context, Result};
use clap::ArgMatches;
use std::rc::Rc;

/// Everything the wizard talks to outside of its own logic.
pub struct Collaborators<'a> {
    pub fs: Rc<dyn Filesystem>,
    pub runner: Rc<dyn CommandRunner>,
    /// `None` runs the wizard non-interactively.
    pub prompter: Option<&'a mut dyn Prompter>,
    pub reporter: &'a mut dyn TaskReporter,
}

/// Runs the whole wizard: pre-flight, argument resolution, confirmation and tasks.
///
/// Cancellation surfaces as [`ResolutionError::Cancelled`]; a failed task as
/// its [`TaskError`](crate::core::tasks::TaskError), after the summary was printed.
pub fn run(
    cli: &Cli,
    matches: &ArgMatches,
    arguments: &[ArgumentKind],
    env: Environment,
    collaborators: Collaborators<'_>,
) -> Result<()> {
    let Collaborators {
        fs,
        runner,
        mut prompter,
        reporter,
    } = collaborators;

    if !cli.ignore_git_changes {
        preflight::ensure_clean_git_tree(runner.as_ref(), &env.project_root_directory)?;
    }

    let resolver_prompter = prompter
        .as_deref_mut()
        .map(|prompter| prompter as &mut dyn Prompter);
    let args = ArgumentResolver::new(&env, matches, resolver_prompter).resolve_all(arguments)?;
    log::debug!("Resolved arguments: {:?}", args);

    report::print_settings(&args, &env);

    if !cli.yes
        && let Some(prompter) = prompter.as_deref_mut()
    {
        let proceed = prompter
            .confirm(t!("cli.prompt.proceed"), true)
            .map_err(ResolutionError::from)?;
        if !proceed {
            return Err(ResolutionError::Cancelled.into());
        }
    }

    let ctx = ProjectContext::new(args, env, fs, runner, cli.skip_install);
    let task_report = run_tasks(&TaskKind::all(), &ctx, reporter);
    report::print_summary(&task_report, &ctx.env);

    match task_report.error {
        Some(error) => Err(error).context(t!("cli.error.tasks_failed")),
        None => Ok(()),
    }
}
