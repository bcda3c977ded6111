// src/cli/preflight.rs

use crate::system::executor::CommandRunner;
use log::{debug, warn};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PreflightError {
    #[error(
        "The git working tree has uncommitted changes. Commit or stash them first, or pass --ignore-git-changes."
    )]
    UncommittedChanges,
}

/// Refuses to run on a dirty git working tree.
///
/// A missing `git` or a directory outside any repository is not an error:
/// there is nothing to protect, so the check is skipped.
pub fn ensure_clean_git_tree(runner: &dyn CommandRunner, directory: &Path) -> Result<(), PreflightError> {
    match runner.capture("git status --porcelain", directory) {
        Ok(status) if status.trim().is_empty() => Ok(()),
        Ok(status) => {
            debug!("Uncommitted changes:\n{}", status);
            Err(PreflightError::UncommittedChanges)
        }
        Err(e) if e.is_program_missing() => {
            warn!("git is not installed, skipping the working tree check");
            Ok(())
        }
        Err(e) => {
            debug!("Skipping the working tree check: {}", e);
            Ok(())
        }
    }
}
