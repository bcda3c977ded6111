// src/system/executor.rs

use std::fmt::Debug;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command as StdCommand, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Command could not be parsed: {0}")]
    CommandParse(String),
    #[error("No command specified to run.")]
    EmptyCommand,
    #[error("Command '{0}' could not be executed: {1}")]
    CommandFailed(String, std::io::Error),
    #[error("Command '{0}' exited with a non-zero error code.")]
    NonZeroExitStatus(String),
    #[error("Command '{command}' produced output that was not valid UTF-8")]
    InvalidUtf8Output {
        command: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl ExecutionError {
    /// Whether the program itself could not be found on `PATH`.
    pub fn is_program_missing(&self) -> bool {
        matches!(self, Self::CommandFailed(_, e) if e.kind() == ErrorKind::NotFound)
    }
}

/// Spawns external programs (package managers, `git`) on behalf of tasks.
pub trait CommandRunner: Debug {
    /// Runs `command_line` in `cwd`, streaming its output to the terminal.
    fn run(&self, command_line: &str, cwd: &Path) -> Result<(), ExecutionError>;

    /// Runs `command_line` in `cwd` and returns its standard output.
    fn capture(&self, command_line: &str, cwd: &Path) -> Result<String, ExecutionError>;
}

/// The `std::process` backed runner.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

fn split_command_line(command_line: &str) -> Result<(String, Vec<String>), ExecutionError> {
    let trimmed_command = command_line.trim();
    let mut parts = shlex::split(trimmed_command)
        .ok_or_else(|| ExecutionError::CommandParse(trimmed_command.to_string()))?
        .into_iter();
    let program = parts.next().ok_or(ExecutionError::EmptyCommand)?;
    Ok((program, parts.collect()))
}

impl CommandRunner for ProcessRunner {
    fn run(&self, command_line: &str, cwd: &Path) -> Result<(), ExecutionError> {
        let final_command_line = command_line.trim();
        let (program, args) = split_command_line(final_command_line)?;
        let clean_cwd = dunce::simplified(cwd);

        log::debug!(
            "Running '{}' in '{}'",
            final_command_line,
            clean_cwd.display()
        );

        let mut command = StdCommand::new(&program);
        command
            .args(&args)
            .current_dir(clean_cwd)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Package managers are `.cmd` shims on Windows, which `spawn` can't find directly.
        // We try to spawn directly first. If it fails with `NotFound`, we try with `cmd /C`.
        let status = match command.status() {
            Ok(status) => status,
            Err(e) if e.kind() == ErrorKind::NotFound && cfg!(target_os = "windows") => {
                log::debug!("Command '{}' not found. Retrying with cmd /C.", program);
                StdCommand::new("cmd")
                    .arg("/C")
                    .arg(final_command_line)
                    .current_dir(clean_cwd)
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()
                    .map_err(|e| ExecutionError::CommandFailed(final_command_line.to_string(), e))?
            }
            Err(e) => {
                return Err(ExecutionError::CommandFailed(
                    final_command_line.to_string(),
                    e,
                ));
            }
        };

        if !status.success() {
            return Err(ExecutionError::NonZeroExitStatus(
                final_command_line.to_string(),
            ));
        }
        Ok(())
    }

    fn capture(&self, command_line: &str, cwd: &Path) -> Result<String, ExecutionError> {
        let trimmed_command = command_line.trim();
        let (program, args) = split_command_line(trimmed_command)?;
        let clean_cwd = dunce::simplified(cwd);

        let command_output = StdCommand::new(program)
            .args(args)
            .current_dir(clean_cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| ExecutionError::CommandFailed(trimmed_command.to_string(), e))?;

        if !command_output.status.success() {
            return Err(ExecutionError::NonZeroExitStatus(
                trimmed_command.to_string(),
            ));
        }

        String::from_utf8(command_output.stdout).map_err(|e| ExecutionError::InvalidUtf8Output {
            command: trimmed_command.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{CommandRunner, ExecutionError};
    use std::cell::RefCell;
    use std::path::Path;

    /// Records every command line instead of spawning it.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingRunner {
        pub(crate) commands: RefCell<Vec<String>>,
        pub(crate) fail: bool,
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, command_line: &str, _cwd: &Path) -> Result<(), ExecutionError> {
            self.commands.borrow_mut().push(command_line.to_string());
            if self.fail {
                return Err(ExecutionError::NonZeroExitStatus(command_line.to_string()));
            }
            Ok(())
        }

        fn capture(&self, command_line: &str, _cwd: &Path) -> Result<String, ExecutionError> {
            self.commands.borrow_mut().push(command_line.to_string());
            Ok(String::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_command_line_honours_quotes() {
        let (program, args) = split_command_line("  yarn add \"@types/react-relay\" ").unwrap();
        assert_eq!(program, "yarn");
        assert_eq!(args, vec!["add", "@types/react-relay"]);
    }

    #[test]
    fn test_empty_command_is_rejected() {
        assert!(matches!(
            split_command_line("   "),
            Err(ExecutionError::EmptyCommand)
        ));
    }

    #[test]
    fn test_unbalanced_quotes_fail_to_parse() {
        assert!(matches!(
            split_command_line("git commit -m \"oops"),
            Err(ExecutionError::CommandParse(_))
        ));
    }

    #[test]
    fn test_missing_program_is_reported() {
        let error = ProcessRunner
            .capture("definitely-not-a-real-program-4242", Path::new("."))
            .unwrap_err();
        assert!(error.is_program_missing());
    }
}
