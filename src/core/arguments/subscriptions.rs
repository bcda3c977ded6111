// src/core/arguments/subscriptions.rs

use super::{Argument, ArgumentBase, ResolutionError, Validation};
use crate::{
    models::{ArgumentName, PartialArguments},
    system::{environment::Environment, prompt::Prompter},
};
use clap::{ArgMatches, Command};

#[derive(Debug)]
pub struct SubscriptionsArgument {
    base: ArgumentBase,
}

impl SubscriptionsArgument {
    pub fn new() -> Self {
        Self {
            base: ArgumentBase::new(ArgumentName::Subscriptions, None, "subscriptions"),
        }
    }
}

impl Default for SubscriptionsArgument {
    fn default() -> Self {
        Self::new()
    }
}

impl Argument for SubscriptionsArgument {
    type Value = bool;

    fn name(&self) -> ArgumentName {
        self.base.name
    }

    fn prompt_message(&self) -> &'static str {
        t!("argument.subscriptions.prompt")
    }

    fn register_cli_option(&self, command: Command) -> Command {
        self.base
            .switch_option(command, t!("argument.subscriptions.help"))
    }

    fn cli_value(&self, matches: &ArgMatches) -> Option<bool> {
        self.base.switch_value(matches)
    }

    fn is_valid(&self, _value: &bool, _existing: &PartialArguments, _env: &Environment) -> Validation {
        Ok(())
    }

    fn prompt_for_value(
        &self,
        initial: &bool,
        _existing: &PartialArguments,
        _env: &Environment,
        prompter: &mut dyn Prompter,
    ) -> Result<bool, ResolutionError> {
        Ok(prompter.confirm(self.prompt_message(), *initial)?)
    }

    fn default_value(&self, _existing: &PartialArguments, _env: &Environment) -> bool {
        false
    }

    fn record(&self, value: bool, existing: &mut PartialArguments) {
        existing.subscriptions = Some(value);
    }
}
