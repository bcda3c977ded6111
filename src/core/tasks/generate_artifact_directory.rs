// src/core/tasks/generate_artifact_directory.rs

use super::{Task, TaskError, TaskProgress};
use crate::core::context::ProjectContext;

/// Creates the artifact directory relay-compiler writes into.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenerateArtifactDirectoryTask;

impl Task for GenerateArtifactDirectoryTask {
    fn message(&self) -> &'static str {
        t!("task.generate_artifact_directory.message")
    }

    fn is_enabled(&self, ctx: &ProjectContext) -> bool {
        ctx.artifact_directory.is_some()
    }

    fn run(&self, ctx: &ProjectContext, progress: &mut TaskProgress<'_>) -> Result<(), TaskError> {
        let Some(directory) = &ctx.artifact_directory else {
            return Ok(());
        };
        progress.update_message(format!("{} {}", progress.message(), directory.rel));

        if ctx.fs.is_directory(&directory.abs) {
            progress.skip(t!("task.skip.directory_exists"));
            return Ok(());
        }

        ctx.fs
            .create_directory(&directory.abs)
            .map_err(TaskError::io(directory))
    }
}
