// src/system/prompt.rs

use colored::Colorize;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Operation cancelled by user.")]
    Cancelled,
    #[error("User Interface Error: {0}")]
    Io(#[source] std::io::Error),
}

impl From<dialoguer::Error> for PromptError {
    fn from(error: dialoguer::Error) -> Self {
        #[allow(unreachable_patterns)]
        match error {
            dialoguer::Error::IO(e) if e.kind() == std::io::ErrorKind::Interrupted => {
                Self::Cancelled
            }
            dialoguer::Error::IO(e) => Self::Io(e),
            _ => Self::Cancelled,
        }
    }
}

/// The interactive terminal primitives argument resolution suspends on.
pub trait Prompter {
    /// Asks for free text. `initial` is pre-filled and editable.
    fn input(&mut self, message: &str, initial: &str) -> Result<String, PromptError>;

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, PromptError>;

    /// Returns the index of the chosen item.
    fn select(&mut self, message: &str, items: &[&str], default: usize)
    -> Result<usize, PromptError>;

    /// Tells the user why their last answer was rejected.
    fn warn(&mut self, reason: &str);
}

/// Terminal prompts rendered with `dialoguer`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn input(&mut self, message: &str, initial: &str) -> Result<String, PromptError> {
        let answer: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer.trim().to_string())
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, PromptError> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .default(default)
            .interact_opt()?
            .ok_or(PromptError::Cancelled)
    }

    fn select(
        &mut self,
        message: &str,
        items: &[&str],
        default: usize,
    ) -> Result<usize, PromptError> {
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .items(items)
            .default(default)
            .interact_opt()?
            .ok_or(PromptError::Cancelled)
    }

    fn warn(&mut self, reason: &str) {
        println!("{}", format!("Error: {}", reason).red());
    }
}
