// src/core/arguments/src_root.rs

use super::{Argument, ArgumentBase, ResolutionError, Validation};
use crate::{
    models::{ArgumentName, PartialArguments, Toolchain},
    system::{environment::Environment, filesystem::Filesystem, prompt::Prompter},
};
use clap::{ArgMatches, Command};
use std::rc::Rc;

/// The root directory of the application code, scanned by relay-compiler.
#[derive(Debug)]
pub struct SrcArgument {
    base: ArgumentBase,
    fs: Rc<dyn Filesystem>,
}

impl SrcArgument {
    pub fn new(fs: Rc<dyn Filesystem>) -> Self {
        Self {
            base: ArgumentBase::new(ArgumentName::Src, Some('s'), "src"),
            fs,
        }
    }
}

impl Argument for SrcArgument {
    type Value = String;

    fn name(&self) -> ArgumentName {
        self.base.name
    }

    fn prompt_message(&self) -> &'static str {
        t!("argument.src.prompt")
    }

    fn register_cli_option(&self, command: Command) -> Command {
        self.base
            .value_option(command, "path", t!("argument.src.help"))
    }

    fn cli_value(&self, matches: &ArgMatches) -> Option<String> {
        self.base.text_value(matches)
    }

    fn is_valid(&self, value: &String, _existing: &PartialArguments, env: &Environment) -> Validation {
        if value.trim().is_empty() {
            return Err(t!("validation.required").to_string());
        }

        let path = env.rel(value);
        if !self
            .fs
            .is_sub_directory(&env.project_root_directory, &path.abs)
        {
            return Err(format!(
                t!("validation.directory_outside_root"),
                root = env.project_root_directory.display()
            ));
        }

        Ok(())
    }

    fn prompt_for_value(
        &self,
        initial: &String,
        existing: &PartialArguments,
        env: &Environment,
        prompter: &mut dyn Prompter,
    ) -> Result<String, ResolutionError> {
        self.base
            .prompt_text_until_valid(prompter, self.prompt_message(), initial, |input| {
                self.is_valid(&input.to_string(), existing, env)
            })
    }

    fn default_value(&self, existing: &PartialArguments, _env: &Environment) -> String {
        match existing.toolchain {
            // Next.js projects keep `pages/` at the root.
            Some(Toolchain::Next) => "./".to_string(),
            _ => "./src".to_string(),
        }
    }

    fn is_empty(&self, value: &String) -> bool {
        value.trim().is_empty()
    }

    fn record(&self, value: String, existing: &mut PartialArguments) {
        existing.src = Some(value);
    }
}
