// src/core/tasks/mod.rs

//! Project mutations.
//!
//! Every task follows the same contract: check whether the target state is
//! already there, report a skip with a reason if it is, mutate otherwise.
//! Tasks run strictly in the order of [`TaskKind::all`], driven by
//! [`runner::run_tasks`], which only ever talks to the [`Task`] trait.

pub mod configure_graphql_transform;
pub mod configure_relay_compiler;
pub mod generate_artifact_directory;
pub mod generate_relay_environment;
pub mod generate_schema_file;
pub mod install_dependencies;
pub mod runner;

use crate::{
    core::{context::ProjectContext, manifest::ManifestError},
    system::{environment::RelativePath, executor::ExecutionError},
};
use std::{fmt::Debug, io};
use thiserror::Error;

pub use configure_graphql_transform::ConfigureGraphqlTransformTask;
pub use configure_relay_compiler::ConfigureRelayCompilerTask;
pub use generate_artifact_directory::GenerateArtifactDirectoryTask;
pub use generate_relay_environment::GenerateRelayEnvironmentTask;
pub use generate_schema_file::GenerateSchemaFileTask;
pub use install_dependencies::{InstallDependenciesTask, InstallDevDependenciesTask};
pub use runner::{TaskEntry, TaskReport, run_tasks};

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Could not access '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Could not update '{path}': {source}")]
    Manifest {
        path: String,
        #[source]
        source: ManifestError,
    },
    #[error(transparent)]
    Command(#[from] ExecutionError),
    #[error("Could not configure '{path}': {reason}")]
    Config { path: String, reason: String },
}

impl TaskError {
    /// Maps an I/O failure on `path` into a task error.
    pub fn io(path: &RelativePath) -> impl FnOnce(io::Error) -> Self {
        let path = path.rel.clone();
        move |source| Self::Io { path, source }
    }

    pub fn manifest(path: &RelativePath) -> impl FnOnce(ManifestError) -> Self {
        let path = path.rel.clone();
        move |source| Self::Manifest { path, source }
    }
}

/// The final state of a task after the runner is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Succeeded,
    Skipped(String),
    /// Holds the rendered error; the error itself is kept on the report.
    Failed(String),
    /// The queue stopped before this task was reached.
    NotRun,
}

/// Receives live progress while tasks execute.
pub trait TaskReporter {
    fn started(&mut self, message: &str);

    fn message_updated(&mut self, message: &str);

    fn finished(&mut self, message: &str, outcome: &TaskOutcome);
}

/// The execution helper handed to a running task.
pub struct TaskProgress<'r> {
    message: String,
    skip_reason: Option<String>,
    reporter: &'r mut dyn TaskReporter,
}

impl<'r> TaskProgress<'r> {
    pub(crate) fn new(message: String, reporter: &'r mut dyn TaskReporter) -> Self {
        Self {
            message,
            skip_reason: None,
            reporter,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn update_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.reporter.message_updated(&self.message);
    }

    /// Marks the task as skipped. The task is expected to return `Ok(())` right after.
    pub fn skip(&mut self, reason: impl Into<String>) {
        self.skip_reason = Some(reason.into());
    }

    pub(crate) fn into_parts(self) -> (String, Option<String>) {
        (self.message, self.skip_reason)
    }
}

/// The capability set shared by all tasks.
pub trait Task: Debug {
    /// The initial, human-readable description.
    fn message(&self) -> &'static str;

    fn is_enabled(&self, ctx: &ProjectContext) -> bool {
        let _ = ctx;
        true
    }

    fn run(&self, ctx: &ProjectContext, progress: &mut TaskProgress<'_>) -> Result<(), TaskError>;
}

/// The closed set of tasks.
#[derive(Debug)]
pub enum TaskKind {
    InstallDependencies(InstallDependenciesTask),
    InstallDevDependencies(InstallDevDependenciesTask),
    ConfigureRelayCompiler(ConfigureRelayCompilerTask),
    ConfigureGraphqlTransform(ConfigureGraphqlTransformTask),
    GenerateRelayEnvironment(GenerateRelayEnvironmentTask),
    GenerateSchemaFile(GenerateSchemaFileTask),
    GenerateArtifactDirectory(GenerateArtifactDirectoryTask),
}

macro_rules! dispatch {
    ($kind:expr, $task:ident => $body:expr) => {
        match $kind {
            TaskKind::InstallDependencies($task) => $body,
            TaskKind::InstallDevDependencies($task) => $body,
            TaskKind::ConfigureRelayCompiler($task) => $body,
            TaskKind::ConfigureGraphqlTransform($task) => $body,
            TaskKind::GenerateRelayEnvironment($task) => $body,
            TaskKind::GenerateSchemaFile($task) => $body,
            TaskKind::GenerateArtifactDirectory($task) => $body,
        }
    };
}

impl TaskKind {
    /// Every task in execution order. The manifest is configured before
    /// anything that reads it back.
    pub fn all() -> Vec<Self> {
        vec![
            Self::InstallDependencies(InstallDependenciesTask),
            Self::InstallDevDependencies(InstallDevDependenciesTask),
            Self::ConfigureRelayCompiler(ConfigureRelayCompilerTask),
            Self::ConfigureGraphqlTransform(ConfigureGraphqlTransformTask),
            Self::GenerateRelayEnvironment(GenerateRelayEnvironmentTask),
            Self::GenerateSchemaFile(GenerateSchemaFileTask),
            Self::GenerateArtifactDirectory(GenerateArtifactDirectoryTask),
        ]
    }
}

impl Task for TaskKind {
    fn message(&self) -> &'static str {
        dispatch!(self, task => task.message())
    }

    fn is_enabled(&self, ctx: &ProjectContext) -> bool {
        dispatch!(self, task => task.is_enabled(ctx))
    }

    fn run(&self, ctx: &ProjectContext, progress: &mut TaskProgress<'_>) -> Result<(), TaskError> {
        dispatch!(self, task => task.run(ctx, progress))
    }
}
