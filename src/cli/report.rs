// src/cli/report.rs

use crate::{
    constants::RELAY_SCRIPT_NAME,
    core::tasks::{TaskOutcome, TaskReport, TaskReporter},
    models::CliArguments,
    system::environment::Environment,
};
use colored::*;

/// Prints task progress to stdout as it happens.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl TaskReporter for ConsoleReporter {
    fn started(&mut self, message: &str) {
        println!("{} {}", "→".blue(), message);
    }

    fn message_updated(&mut self, message: &str) {
        log::debug!("{}", message);
    }

    fn finished(&mut self, message: &str, outcome: &TaskOutcome) {
        println!("  {}", render_outcome(message, outcome));
    }
}

fn render_outcome(message: &str, outcome: &TaskOutcome) -> String {
    match outcome {
        TaskOutcome::Succeeded => format!("{} {}", "✔".green(), message),
        TaskOutcome::Skipped(reason) => {
            format!("{} {} {}", "↷".yellow(), message.dimmed(), format!("({})", reason).dimmed())
        }
        TaskOutcome::Failed(error) => format!("{} {}: {}", "✖".red(), message, error.red()),
        TaskOutcome::NotRun => format!("{} {}", "·".dimmed(), message.dimmed()),
    }
}

/// Prints the resolved settings before anything is changed.
pub fn print_settings(args: &CliArguments, env: &Environment) {
    println!("\n{}", t!("cli.settings.header").bold());
    let artifact_directory = args.artifact_directory.as_deref().unwrap_or("-");
    let rows: [(&str, String); 7] = [
        ("toolchain", args.toolchain.to_string()),
        ("typescript", args.typescript.to_string()),
        ("src", args.src.clone()),
        ("schemaFile", args.schema_file.clone()),
        ("artifactDirectory", artifact_directory.to_string()),
        ("subscriptions", args.subscriptions.to_string()),
        ("packageManager", env.package_manager.to_string()),
    ];
    for (name, value) in rows {
        println!("  {:<18} {}", name.cyan(), value);
    }
    println!();
}

/// Prints the per-task summary and, on success, what to do next.
pub fn print_summary(report: &TaskReport, env: &Environment) {
    println!(
        "\n{}",
        format!(
            t!("cli.summary.counts"),
            succeeded = report.count(|o| *o == TaskOutcome::Succeeded),
            skipped = report.count(|o| matches!(o, TaskOutcome::Skipped(_))),
            failed = report.count(|o| matches!(o, TaskOutcome::Failed(_))),
            not_run = report.count(|o| *o == TaskOutcome::NotRun),
        )
        .bold()
    );

    if !report.is_success() {
        return;
    }

    println!("\n{}", t!("common.success").green().bold());
    println!("{}", t!("cli.next_steps.header"));
    println!(
        "  {}",
        env.package_manager
            .run_script_command(RELAY_SCRIPT_NAME)
            .cyan()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_reason_is_rendered() {
        colored::control::set_override(false);
        assert_eq!(
            render_outcome("Generate schema", &TaskOutcome::Skipped("File exists".to_string())),
            "↷ Generate schema (File exists)"
        );
        assert_eq!(
            render_outcome("Add Relay dependencies", &TaskOutcome::Failed("boom".to_string())),
            "✖ Add Relay dependencies: boom"
        );
    }
}
