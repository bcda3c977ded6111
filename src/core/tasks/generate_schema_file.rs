// src/core/tasks/generate_schema_file.rs

use super::{Task, TaskError, TaskProgress};
use crate::core::context::ProjectContext;

/// Written when the project has no schema yet, so the compiler has something to read.
const PLACEHOLDER_SCHEMA: &str = "\
# Replace this file with the schema of your GraphQL server.
type Query {
  hello: String
}
";

#[derive(Debug, Default, Clone, Copy)]
pub struct GenerateSchemaFileTask;

impl Task for GenerateSchemaFileTask {
    fn message(&self) -> &'static str {
        t!("task.generate_schema_file.message")
    }

    fn run(&self, ctx: &ProjectContext, progress: &mut TaskProgress<'_>) -> Result<(), TaskError> {
        let schema = &ctx.schema_file;
        progress.update_message(format!("{} {}", progress.message(), schema.rel));

        if ctx.fs.does_exist(&schema.abs) {
            progress.skip(t!("task.skip.file_exists"));
            return Ok(());
        }

        if let Some(directory) = schema.abs.parent() {
            ctx.fs.create_directory(directory).map_err(TaskError::io(schema))?;
        }
        ctx.fs
            .write(&schema.abs, PLACEHOLDER_SCHEMA)
            .map_err(TaskError::io(schema))
    }
}
