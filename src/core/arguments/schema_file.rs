// src/core/arguments/schema_file.rs

use super::{Argument, ArgumentBase, ResolutionError, Validation};
use crate::{
    constants::{DEFAULT_SCHEMA_FILENAME, GRAPHQL_EXTENSION},
    models::{ArgumentName, PartialArguments, Toolchain},
    system::{environment::Environment, filesystem::Filesystem, prompt::Prompter},
};
use clap::{ArgMatches, Command};
use std::{path::Path, rc::Rc};

#[derive(Debug)]
pub struct SchemaFileArgument {
    base: ArgumentBase,
    fs: Rc<dyn Filesystem>,
}

impl SchemaFileArgument {
    pub fn new(fs: Rc<dyn Filesystem>) -> Self {
        Self {
            base: ArgumentBase::new(ArgumentName::SchemaFile, Some('f'), "schema-file"),
            fs,
        }
    }
}

impl Argument for SchemaFileArgument {
    type Value = String;

    fn name(&self) -> ArgumentName {
        self.base.name
    }

    fn prompt_message(&self) -> &'static str {
        t!("argument.schema_file.prompt")
    }

    fn register_cli_option(&self, command: Command) -> Command {
        self.base
            .value_option(command, "path", t!("argument.schema_file.help"))
    }

    fn cli_value(&self, matches: &ArgMatches) -> Option<String> {
        self.base.text_value(matches)
    }

    fn is_valid(&self, value: &String, _existing: &PartialArguments, env: &Environment) -> Validation {
        if value.trim().is_empty() {
            return Err(t!("validation.required").to_string());
        }

        let filename = Path::new(value)
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        if !filename.ends_with(GRAPHQL_EXTENSION) {
            return Err(format!(
                t!("validation.schema_file.extension"),
                extension = GRAPHQL_EXTENSION
            ));
        }

        let path = env.rel(value);
        if !self.fs.is_file(&path.abs) {
            return Err(t!("validation.schema_file.not_a_file").to_string());
        }

        if !self
            .fs
            .is_sub_directory(&env.project_root_directory, &path.abs)
        {
            return Err(format!(
                t!("validation.schema_file.outside_root"),
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

    fn default_value(&self, existing: &PartialArguments, env: &Environment) -> String {
        let src = match existing.toolchain {
            Some(Toolchain::Next) => "./src",
            _ => existing.src.as_deref().unwrap_or("./src"),
        };

        env.rel(Path::new(src).join(DEFAULT_SCHEMA_FILENAME)).rel
    }

    fn is_empty(&self, value: &String) -> bool {
        value.trim().is_empty()
    }

    fn record(&self, value: String, existing: &mut PartialArguments) {
        existing.schema_file = Some(value);
    }
}
