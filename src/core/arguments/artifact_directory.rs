// src/core/arguments/artifact_directory.rs

use super::{Argument, ArgumentBase, ResolutionError, Validation};
use crate::{
    constants::{ARTIFACT_DIRECTORY_NAME, NEXT_PAGES_DIRECTORY},
    models::{ArgumentName, PartialArguments, Toolchain},
    system::{environment::Environment, filesystem::Filesystem, prompt::Prompter},
};
use clap::{ArgMatches, Command};
use std::{path::Path, rc::Rc};

/// Where relay-compiler collects all generated artifacts.
/// Optional, except for Next.js where artifacts next to pages would become routes.
#[derive(Debug)]
pub struct ArtifactDirectoryArgument {
    base: ArgumentBase,
    fs: Rc<dyn Filesystem>,
}

impl ArtifactDirectoryArgument {
    pub fn new(fs: Rc<dyn Filesystem>) -> Self {
        Self {
            base: ArgumentBase::new(
                ArgumentName::ArtifactDirectory,
                Some('a'),
                "artifact-directory",
            ),
            fs,
        }
    }
}

impl Argument for ArtifactDirectoryArgument {
    type Value = String;

    fn name(&self) -> ArgumentName {
        self.base.name
    }

    fn prompt_message(&self) -> &'static str {
        t!("argument.artifact_directory.prompt")
    }

    fn register_cli_option(&self, command: Command) -> Command {
        self.base
            .value_option(command, "path", t!("argument.artifact_directory.help"))
    }

    fn cli_value(&self, matches: &ArgMatches) -> Option<String> {
        self.base.text_value(matches)
    }

    fn is_valid(&self, value: &String, existing: &PartialArguments, env: &Environment) -> Validation {
        let is_next = existing.toolchain == Some(Toolchain::Next);

        if value.trim().is_empty() {
            if is_next {
                return Err(t!("validation.required").to_string());
            }
            return Ok(());
        }

        let last_segment = Path::new(value)
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        if last_segment != ARTIFACT_DIRECTORY_NAME {
            return Err(format!(
                t!("validation.artifact_directory.last_segment"),
                name = ARTIFACT_DIRECTORY_NAME
            ));
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

        if is_next {
            let pages_directory = env.root_rel(NEXT_PAGES_DIRECTORY);
            if self.fs.is_sub_directory(&pages_directory.abs, &path.abs) {
                return Err(format!(
                    t!("validation.artifact_directory.under_pages"),
                    pages = pages_directory.rel
                ));
            }
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
            // Outside of ./pages, or the artifacts would be treated as pages.
            Some(Toolchain::Next) => format!("./{}", ARTIFACT_DIRECTORY_NAME),
            _ => String::new(),
        }
    }

    fn is_empty(&self, value: &String) -> bool {
        value.trim().is_empty()
    }

    fn record(&self, value: String, existing: &mut PartialArguments) {
        existing.artifact_directory = Some(value);
    }
}
