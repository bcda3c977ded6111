// src/core/tasks/generate_relay_environment.rs

use super::{Task, TaskError, TaskProgress};
use crate::{
    constants::ASSETS_DIRECTORY,
    core::context::ProjectContext,
    system::environment::RelativePath,
};
use std::path::PathBuf;

/// Copies the bundled `RelayEnvironment` template into the source root.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenerateRelayEnvironmentTask;

impl GenerateRelayEnvironmentTask {
    /// The bundled template matching the project's language and features.
    pub fn template(ctx: &ProjectContext) -> PathBuf {
        let name = match (ctx.args.typescript, ctx.args.subscriptions) {
            (true, true) => "env_ts_subscriptions",
            (true, false) => "env_ts",
            (false, true) => "env_subscriptions",
            (false, false) => "env",
        };
        ctx.env
            .own_package_directory
            .join(ASSETS_DIRECTORY)
            .join(name)
    }
}

impl Task for GenerateRelayEnvironmentTask {
    fn message(&self) -> &'static str {
        t!("task.generate_relay_environment.message")
    }

    fn run(&self, ctx: &ProjectContext, progress: &mut TaskProgress<'_>) -> Result<(), TaskError> {
        let destination = &ctx.relay_env_file;
        progress.update_message(format!("{} {}", progress.message(), destination.rel));

        if ctx.fs.does_exist(&destination.abs) {
            progress.skip(t!("task.skip.file_exists"));
            return Ok(());
        }

        if let Some(directory) = destination.abs.parent() {
            ctx.fs
                .create_directory(directory)
                .map_err(TaskError::io(destination))?;
        }

        let template = Self::template(ctx);
        let source = RelativePath {
            rel: template.display().to_string(),
            abs: template,
        };
        ctx.fs
            .copy_file(&source.abs, &destination.abs)
            .map_err(TaskError::io(&source))
    }
}
