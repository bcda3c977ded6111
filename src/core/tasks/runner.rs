// src/core/tasks/runner.rs

use super::{Task, TaskError, TaskKind, TaskOutcome, TaskProgress, TaskReporter};
use crate::core::context::ProjectContext;
use log::{debug, info};

/// One line of the final summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEntry {
    /// The last message the task reported.
    pub message: String,
    pub outcome: TaskOutcome,
}

/// The aggregated result of a run.
#[derive(Debug)]
pub struct TaskReport {
    pub entries: Vec<TaskEntry>,
    /// The failure that stopped the queue.
    pub error: Option<TaskError>,
}

impl TaskReport {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn count(&self, matches: impl Fn(&TaskOutcome) -> bool) -> usize {
        self.entries.iter().filter(|entry| matches(&entry.outcome)).count()
    }
}

/// Runs `tasks` in order against `ctx`, stopping at the first failure.
/// Tasks after the failing one are reported as not run.
pub fn run_tasks(
    tasks: &[TaskKind],
    ctx: &ProjectContext,
    reporter: &mut dyn TaskReporter,
) -> TaskReport {
    let mut entries = Vec::with_capacity(tasks.len());
    let mut error = None;

    for task in tasks {
        if error.is_some() {
            entries.push(TaskEntry {
                message: task.message().to_string(),
                outcome: TaskOutcome::NotRun,
            });
            continue;
        }

        if !task.is_enabled(ctx) {
            debug!("Task '{}' is disabled", task.message());
            let outcome = TaskOutcome::Skipped(t!("task.skip.disabled").to_string());
            reporter.finished(task.message(), &outcome);
            entries.push(TaskEntry {
                message: task.message().to_string(),
                outcome,
            });
            continue;
        }

        reporter.started(task.message());
        let mut progress = TaskProgress::new(task.message().to_string(), reporter);
        let result = task.run(ctx, &mut progress);
        let (message, skip_reason) = progress.into_parts();

        let outcome = match result {
            Ok(()) => match skip_reason {
                Some(reason) => TaskOutcome::Skipped(reason),
                None => TaskOutcome::Succeeded,
            },
            Err(e) => {
                let outcome = TaskOutcome::Failed(e.to_string());
                error = Some(e);
                outcome
            }
        };
        info!("Task '{}' finished: {:?}", message, outcome);
        reporter.finished(&message, &outcome);
        entries.push(TaskEntry { message, outcome });
    }

    TaskReport { entries, error }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::testing::{context, cra_args};
    use crate::core::tasks::testing::RecordingReporter;
    use crate::models::{CliArguments, Toolchain};
    use crate::system::filesystem::LocalFilesystem;
    use std::{fs, path::Path, rc::Rc};

    fn all_files(root: &Path) -> Vec<(String, String)> {
        let mut files = Vec::new();
        let mut stack = vec![root.to_path_buf()];
        while let Some(dir) = stack.pop() {
            for entry in fs::read_dir(&dir).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    files.push((path.display().to_string(), String::new()));
                    stack.push(path);
                } else {
                    files.push((path.display().to_string(), fs::read_to_string(&path).unwrap()));
                }
            }
        }
        files.sort();
        files
    }

    #[test]
    fn test_full_run_configures_an_empty_project() {
        let (temp, ctx, runner) = context("{}", cra_args());
        let mut reporter = RecordingReporter::default();

        let report = run_tasks(&TaskKind::all(), &ctx, &mut reporter);

        assert!(report.is_success(), "{:?}", report.error);
        assert_eq!(report.entries.len(), 7);
        // Both install tasks ran through the package manager.
        assert_eq!(runner.commands.borrow().len(), 2);
        assert!(temp.path().join("src/RelayEnvironment.ts").is_file());
        assert!(temp.path().join("src/schema.graphql").is_file());

        let manifest = fs::read_to_string(temp.path().join("package.json")).unwrap();
        assert!(manifest.contains("\"relay\": \"relay-compiler\""));
    }

    #[test]
    fn test_second_run_skips_everything_and_changes_nothing() {
        let (temp, mut ctx, runner) = context(r#"{ "scripts": { "build": "tsc" } }"#, cra_args());
        ctx.skip_install = true;

        let first = run_tasks(&TaskKind::all(), &ctx, &mut RecordingReporter::default());
        assert!(first.is_success(), "{:?}", first.error);
        let snapshot = all_files(temp.path());

        let second = run_tasks(&TaskKind::all(), &ctx, &mut RecordingReporter::default());

        assert!(second.is_success());
        assert_eq!(
            second.count(|outcome| matches!(outcome, TaskOutcome::Skipped(_))),
            7,
            "{:?}",
            second.entries
        );
        assert_eq!(all_files(temp.path()), snapshot);
        assert!(runner.commands.borrow().is_empty());

        let manifest = fs::read_to_string(temp.path().join("package.json")).unwrap();
        assert_eq!(manifest.matches("relay-compiler --validate").count(), 1);
    }

    #[test]
    fn test_second_next_run_skips_the_transform_and_artifact_directory() {
        let args = CliArguments {
            toolchain: Toolchain::Next,
            src: "./".to_string(),
            artifact_directory: Some("./__generated__".to_string()),
            ..cra_args()
        };
        let (temp, mut ctx, _) = context(r#"{ "dependencies": { "next": "13.1.0" } }"#, args);
        ctx.skip_install = true;
        fs::write(
            temp.path().join("next.config.js"),
            "const nextConfig = {\n  reactStrictMode: true,\n};\n\nmodule.exports = nextConfig;\n",
        )
        .unwrap();

        let first = run_tasks(&TaskKind::all(), &ctx, &mut RecordingReporter::default());
        assert!(first.is_success(), "{:?}", first.error);
        assert_eq!(first.entries[3].outcome, TaskOutcome::Succeeded);
        assert_eq!(first.entries[6].outcome, TaskOutcome::Succeeded);
        assert!(temp.path().join("__generated__").is_dir());
        let snapshot = all_files(temp.path());

        let second = run_tasks(&TaskKind::all(), &ctx, &mut RecordingReporter::default());

        assert!(second.is_success());
        assert_eq!(
            second.entries[3].outcome,
            TaskOutcome::Skipped("Already configured".to_string())
        );
        assert_eq!(
            second.entries[6].outcome,
            TaskOutcome::Skipped("Directory exists".to_string())
        );
        assert_eq!(
            second.count(|outcome| matches!(outcome, TaskOutcome::Skipped(_))),
            7,
            "{:?}",
            second.entries
        );
        assert_eq!(all_files(temp.path()), snapshot);

        let next_config = fs::read_to_string(temp.path().join("next.config.js")).unwrap();
        assert_eq!(next_config.matches("relay: {").count(), 1);
    }

    #[test]
    fn test_failure_stops_the_queue() {
        let (temp, env) = crate::core::arguments::testing::project("{}");
        let runner = Rc::new(crate::system::executor::testing::RecordingRunner {
            fail: true,
            ..Default::default()
        });
        let ctx = ProjectContext::new(cra_args(), env, Rc::new(LocalFilesystem), runner.clone(), false);
        let mut reporter = RecordingReporter::default();

        let report = run_tasks(&TaskKind::all(), &ctx, &mut reporter);

        assert!(matches!(report.error, Some(TaskError::Command(_))));
        assert!(matches!(report.entries[0].outcome, TaskOutcome::Failed(_)));
        assert!(
            report.entries[1..]
                .iter()
                .all(|entry| entry.outcome == TaskOutcome::NotRun)
        );
        // Only the first install was attempted and nothing was written.
        assert_eq!(runner.commands.borrow().len(), 1);
        assert_eq!(
            fs::read_to_string(temp.path().join("package.json")).unwrap(),
            "{}"
        );
    }

    #[test]
    fn test_missing_template_halts_before_later_tasks() {
        let (temp, env) = crate::core::arguments::testing::project("{}");
        let env = crate::system::environment::Environment {
            own_package_directory: temp.path().join("nowhere"),
            ..env
        };
        let runner = Rc::new(crate::system::executor::testing::RecordingRunner::default());
        let ctx = ProjectContext::new(cra_args(), env, Rc::new(LocalFilesystem), runner, true);

        let report = run_tasks(&TaskKind::all(), &ctx, &mut RecordingReporter::default());

        let outcomes: Vec<_> = report.entries.iter().map(|e| e.outcome.clone()).collect();
        assert!(matches!(outcomes[4], TaskOutcome::Failed(_)), "{:?}", outcomes);
        assert_eq!(outcomes[5], TaskOutcome::NotRun);
        assert_eq!(outcomes[6], TaskOutcome::NotRun);
        assert!(matches!(report.error, Some(TaskError::Io { .. })));
        assert!(!temp.path().join("src/schema.graphql").exists());
    }

    #[test]
    fn test_reporter_sees_live_progress() {
        let (_temp, mut ctx, _) = context("{}", cra_args());
        ctx.skip_install = true;
        let mut reporter = RecordingReporter::default();

        run_tasks(&TaskKind::all(), &ctx, &mut reporter);

        assert!(reporter.events[0].starts_with("finish"), "disabled tasks only finish");
        assert!(
            reporter
                .events
                .iter()
                .any(|event| event.starts_with("update") && event.contains("./src/RelayEnvironment.ts"))
        );
    }
}
