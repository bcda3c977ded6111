// src/core/arguments/mod.rs

//! Configuration arguments.
//!
//! Every argument knows how to register its flag, validate a candidate,
//! compute a default and prompt for a value. The resolver in [`resolver`]
//! drives them in declaration order; it only ever sees the [`Argument`] trait.

pub mod artifact_directory;
pub mod resolver;
pub mod schema_file;
pub mod src_root;
pub mod subscriptions;
pub mod toolchain;
pub mod typescript;

use crate::{
    models::{ArgumentName, PartialArguments},
    system::{
        environment::Environment,
        filesystem::Filesystem,
        prompt::{PromptError, Prompter},
    },
};
use clap::{Arg, ArgAction, ArgMatches, Command, builder::ValueParser};
use std::{fmt::Debug, rc::Rc};
use thiserror::Error;

pub use artifact_directory::ArtifactDirectoryArgument;
pub use resolver::ArgumentResolver;
pub use schema_file::SchemaFileArgument;
pub use src_root::SrcArgument;
pub use subscriptions::SubscriptionsArgument;
pub use toolchain::ToolchainArgument;
pub use typescript::TypeScriptArgument;

#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("Invalid value for '{argument}': {reason}")]
    Validation {
        argument: ArgumentName,
        reason: String,
    },
    #[error(
        "No value could be determined for '{argument}'. Pass it as a flag or run interactively."
    )]
    MissingRequiredValue { argument: ArgumentName },
    #[error("Operation cancelled by user.")]
    Cancelled,
    #[error("User Interface Error: {0}")]
    Prompt(#[source] std::io::Error),
}

impl From<PromptError> for ResolutionError {
    fn from(error: PromptError) -> Self {
        match error {
            PromptError::Cancelled => Self::Cancelled,
            PromptError::Io(e) => Self::Prompt(e),
        }
    }
}

/// `Ok(())` when a candidate is accepted, otherwise the reason shown to the user.
pub type Validation = Result<(), String>;

/// The capability set shared by all configuration arguments.
pub trait Argument: Debug {
    type Value: Clone + Debug;

    fn name(&self) -> ArgumentName;

    fn prompt_message(&self) -> &'static str;

    /// Adds the argument's flag to the command line surface.
    fn register_cli_option(&self, command: Command) -> Command;

    /// The candidate given on the command line, if any.
    fn cli_value(&self, matches: &ArgMatches) -> Option<Self::Value>;

    /// Validates `value` against the already resolved arguments.
    fn is_valid(
        &self,
        value: &Self::Value,
        existing: &PartialArguments,
        env: &Environment,
    ) -> Validation;

    /// Asks the user until an accepted value is given. `initial` seeds the prompt.
    fn prompt_for_value(
        &self,
        initial: &Self::Value,
        existing: &PartialArguments,
        env: &Environment,
        prompter: &mut dyn Prompter,
    ) -> Result<Self::Value, ResolutionError>;

    /// Computes a default from the already resolved arguments. Never writes `existing`.
    fn default_value(&self, existing: &PartialArguments, env: &Environment) -> Self::Value;

    /// Whether `value` means "nothing was given".
    fn is_empty(&self, _value: &Self::Value) -> bool {
        false
    }

    /// Stores the accepted value in the accumulator.
    fn record(&self, value: Self::Value, existing: &mut PartialArguments);
}

/// Flag building and prompt looping shared by the concrete arguments.
#[derive(Debug, Clone, Copy)]
pub struct ArgumentBase {
    pub name: ArgumentName,
    pub short: Option<char>,
    pub long: &'static str,
}

impl ArgumentBase {
    pub const fn new(name: ArgumentName, short: Option<char>, long: &'static str) -> Self {
        Self { name, short, long }
    }

    fn arg(&self, help: &'static str) -> Arg {
        let arg = Arg::new(self.name.id()).long(self.long).help(help);
        match self.short {
            Some(short) => arg.short(short),
            None => arg,
        }
    }

    /// Registers `--long <value_name>` holding a plain string.
    pub fn value_option(&self, command: Command, value_name: &'static str, help: &'static str) -> Command {
        self.parsed_option(command, value_name, help, ValueParser::string())
    }

    /// Registers `--long <value_name>` parsed by `parser`.
    pub fn parsed_option(
        &self,
        command: Command,
        value_name: &'static str,
        help: &'static str,
        parser: impl Into<ValueParser>,
    ) -> Command {
        command.arg(
            self.arg(help)
                .value_name(value_name)
                .value_parser(parser.into())
                .action(ArgAction::Set),
        )
    }

    /// Registers a boolean `--long` switch.
    pub fn switch_option(&self, command: Command, help: &'static str) -> Command {
        command.arg(self.arg(help).action(ArgAction::SetTrue))
    }

    pub fn text_value(&self, matches: &ArgMatches) -> Option<String> {
        matches
            .try_get_one::<String>(self.name.id())
            .ok()
            .flatten()
            .map(|value| value.trim().to_string())
    }

    /// A switch only ever yields `Some(true)`; its absence leaves room for a default.
    pub fn switch_value(&self, matches: &ArgMatches) -> Option<bool> {
        matches
            .try_get_one::<bool>(self.name.id())
            .ok()
            .flatten()
            .copied()
            .filter(|set| *set)
    }

    /// Prompts for text until `validate` accepts it, warning about every rejected answer.
    pub fn prompt_text_until_valid(
        &self,
        prompter: &mut dyn Prompter,
        message: &str,
        initial: &str,
        validate: impl Fn(&str) -> Validation,
    ) -> Result<String, ResolutionError> {
        let mut seed = initial.to_string();
        loop {
            let input = prompter.input(message, &seed)?;
            match validate(&input) {
                Ok(()) => return Ok(input),
                Err(reason) => {
                    log::debug!("Rejected '{}' for {}: {}", input, self.name, reason);
                    prompter.warn(&reason);
                    seed = input;
                }
            }
        }
    }
}

/// The closed set of arguments, in resolution order.
#[derive(Debug)]
pub enum ArgumentKind {
    Toolchain(ToolchainArgument),
    TypeScript(TypeScriptArgument),
    Src(SrcArgument),
    SchemaFile(SchemaFileArgument),
    ArtifactDirectory(ArtifactDirectoryArgument),
    Subscriptions(SubscriptionsArgument),
}

macro_rules! dispatch {
    ($kind:expr, $arg:ident => $body:expr) => {
        match $kind {
            ArgumentKind::Toolchain($arg) => $body,
            ArgumentKind::TypeScript($arg) => $body,
            ArgumentKind::Src($arg) => $body,
            ArgumentKind::SchemaFile($arg) => $body,
            ArgumentKind::ArtifactDirectory($arg) => $body,
            ArgumentKind::Subscriptions($arg) => $body,
        }
    };
}

impl ArgumentKind {
    /// All arguments in their dependency order: later ones read earlier values.
    pub fn all(fs: Rc<dyn Filesystem>) -> Vec<Self> {
        vec![
            Self::Toolchain(ToolchainArgument::new(fs.clone())),
            Self::TypeScript(TypeScriptArgument::new(fs.clone())),
            Self::Src(SrcArgument::new(fs.clone())),
            Self::SchemaFile(SchemaFileArgument::new(fs.clone())),
            Self::ArtifactDirectory(ArtifactDirectoryArgument::new(fs)),
            Self::Subscriptions(SubscriptionsArgument::new()),
        ]
    }

    pub fn name(&self) -> ArgumentName {
        dispatch!(self, arg => arg.name())
    }

    pub fn register_cli_option(&self, command: Command) -> Command {
        dispatch!(self, arg => arg.register_cli_option(command))
    }

    pub fn resolve(&self, resolver: &mut ArgumentResolver<'_>) -> Result<(), ResolutionError> {
        dispatch!(self, arg => resolver.resolve(arg))
    }
}
