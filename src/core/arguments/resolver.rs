// src/core/arguments/resolver.rs

use super::{Argument, ArgumentKind, ResolutionError};
use crate::{
    models::{CliArguments, PartialArguments},
    system::{environment::Environment, prompt::Prompter},
};
use clap::ArgMatches;
use log::{debug, warn};

/// Resolves arguments one at a time, threading the accumulator through them.
///
/// Without a prompter the resolver runs non-interactively: invalid flags are
/// fatal and defaults are taken as they are computed.
pub struct ArgumentResolver<'a> {
    env: &'a Environment,
    matches: &'a ArgMatches,
    prompter: Option<&'a mut dyn Prompter>,
    resolved: PartialArguments,
}

impl std::fmt::Debug for ArgumentResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArgumentResolver")
            .field("interactive", &self.prompter.is_some())
            .field("resolved", &self.resolved)
            .finish()
    }
}

impl<'a> ArgumentResolver<'a> {
    pub fn new(
        env: &'a Environment,
        matches: &'a ArgMatches,
        prompter: Option<&'a mut dyn Prompter>,
    ) -> Self {
        Self {
            env,
            matches,
            prompter,
            resolved: PartialArguments::default(),
        }
    }

    /// Resolves every argument in order and freezes the result.
    pub fn resolve_all(mut self, arguments: &[ArgumentKind]) -> Result<CliArguments, ResolutionError> {
        for argument in arguments {
            argument.resolve(&mut self)?;
        }
        self.resolved
            .freeze()
            .map_err(|argument| ResolutionError::MissingRequiredValue { argument })
    }

    /// Resolves a single argument from its flag, the user or its default.
    pub fn resolve<A: Argument>(&mut self, argument: &A) -> Result<(), ResolutionError> {
        let name = argument.name();

        let value = match argument.cli_value(self.matches) {
            Some(candidate) => match argument.is_valid(&candidate, &self.resolved, self.env) {
                Ok(()) => {
                    debug!("{}: using command line value {:?}", name, candidate);
                    candidate
                }
                Err(reason) => match self.prompter.as_deref_mut() {
                    Some(prompter) => {
                        // Give the user a chance to correct the flag.
                        prompter.warn(&reason);
                        argument.prompt_for_value(&candidate, &self.resolved, self.env, prompter)?
                    }
                    None => {
                        return Err(ResolutionError::Validation {
                            argument: name,
                            reason,
                        });
                    }
                },
            },
            None => {
                let default = argument.default_value(&self.resolved, self.env);
                match self.prompter.as_deref_mut() {
                    Some(prompter) => {
                        argument.prompt_for_value(&default, &self.resolved, self.env, prompter)?
                    }
                    None => {
                        if let Err(reason) = argument.is_valid(&default, &self.resolved, self.env) {
                            if argument.is_empty(&default) {
                                return Err(ResolutionError::MissingRequiredValue {
                                    argument: name,
                                });
                            }
                            warn!("{}: default {:?} was not validated: {}", name, default, reason);
                        }
                        debug!("{}: using default {:?}", name, default);
                        default
                    }
                }
            }
        };

        argument.record(value, &mut self.resolved);
        Ok(())
    }

    /// The values resolved so far.
    pub fn resolved(&self) -> &PartialArguments {
        &self.resolved
    }
}
