// src/core/arguments/typescript.rs

use super::{Argument, ArgumentBase, ResolutionError, Validation};
use crate::{
    constants::TSCONFIG_FILENAME,
    core::manifest::PackageManifest,
    models::{ArgumentName, PartialArguments},
    system::{environment::Environment, filesystem::Filesystem, prompt::Prompter},
};
use clap::{ArgMatches, Command};
use std::rc::Rc;

#[derive(Debug)]
pub struct TypeScriptArgument {
    base: ArgumentBase,
    fs: Rc<dyn Filesystem>,
}

impl TypeScriptArgument {
    pub fn new(fs: Rc<dyn Filesystem>) -> Self {
        Self {
            base: ArgumentBase::new(ArgumentName::TypeScript, None, "typescript"),
            fs,
        }
    }
}

impl Argument for TypeScriptArgument {
    type Value = bool;

    fn name(&self) -> ArgumentName {
        self.base.name
    }

    fn prompt_message(&self) -> &'static str {
        t!("argument.typescript.prompt")
    }

    fn register_cli_option(&self, command: Command) -> Command {
        self.base
            .switch_option(command, t!("argument.typescript.help"))
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

    fn default_value(&self, _existing: &PartialArguments, env: &Environment) -> bool {
        let tsconfig = env.root_rel(TSCONFIG_FILENAME);
        if self.fs.is_file(&tsconfig.abs) {
            return true;
        }

        PackageManifest::load_lenient(self.fs.as_ref(), &env.package_json_file().abs)
            .is_some_and(|manifest| manifest.has_dependency("typescript"))
    }

    fn record(&self, value: bool, existing: &mut PartialArguments) {
        existing.typescript = Some(value);
    }
}
