// src/core/arguments/toolchain.rs

use super::{Argument, ArgumentBase, ResolutionError, Validation};
use crate::{
    core::manifest::PackageManifest,
    models::{ArgumentName, PartialArguments, Toolchain},
    system::{environment::Environment, filesystem::Filesystem, prompt::Prompter},
};
use clap::{ArgMatches, Command, value_parser};
use std::rc::Rc;

#[derive(Debug)]
pub struct ToolchainArgument {
    base: ArgumentBase,
    fs: Rc<dyn Filesystem>,
}

impl ToolchainArgument {
    pub fn new(fs: Rc<dyn Filesystem>) -> Self {
        Self {
            base: ArgumentBase::new(ArgumentName::Toolchain, Some('t'), "toolchain"),
            fs,
        }
    }
}

impl Argument for ToolchainArgument {
    type Value = Toolchain;

    fn name(&self) -> ArgumentName {
        self.base.name
    }

    fn prompt_message(&self) -> &'static str {
        t!("argument.toolchain.prompt")
    }

    fn register_cli_option(&self, command: Command) -> Command {
        self.base.parsed_option(
            command,
            "toolchain",
            t!("argument.toolchain.help"),
            value_parser!(Toolchain),
        )
    }

    fn cli_value(&self, matches: &ArgMatches) -> Option<Toolchain> {
        matches
            .try_get_one::<Toolchain>(self.base.name.id())
            .ok()
            .flatten()
            .copied()
    }

    fn is_valid(&self, _value: &Toolchain, _existing: &PartialArguments, _env: &Environment) -> Validation {
        // Every variant is supported; clap already rejected unknown names.
        Ok(())
    }

    fn prompt_for_value(
        &self,
        initial: &Toolchain,
        _existing: &PartialArguments,
        _env: &Environment,
        prompter: &mut dyn Prompter,
    ) -> Result<Toolchain, ResolutionError> {
        let items: Vec<&str> = Toolchain::ALL.iter().map(|t| t.as_str()).collect();
        let default = Toolchain::ALL
            .iter()
            .position(|t| t == initial)
            .unwrap_or_default();
        let selection = prompter.select(self.prompt_message(), &items, default)?;
        Ok(Toolchain::ALL
            .get(selection)
            .copied()
            .unwrap_or(*initial))
    }

    fn default_value(&self, _existing: &PartialArguments, env: &Environment) -> Toolchain {
        let Some(manifest) =
            PackageManifest::load_lenient(self.fs.as_ref(), &env.package_json_file().abs)
        else {
            return Toolchain::Cra;
        };

        if manifest.has_dependency("next") {
            Toolchain::Next
        } else if manifest.has_dependency("vite") {
            Toolchain::Vite
        } else {
            Toolchain::Cra
        }
    }

    fn record(&self, value: Toolchain, existing: &mut PartialArguments) {
        existing.toolchain = Some(value);
    }
}
