// src/core/tasks/install_dependencies.rs

use super::{Task, TaskError, TaskProgress};
use crate::{
    core::{context::ProjectContext, manifest::PackageManifest},
    models::Toolchain,
};
use log::debug;

const REACT_RELAY: &str = "react-relay";
const RELAY_RUNTIME: &str = "relay-runtime";
const GRAPHQL_WS: &str = "graphql-ws";
const RELAY_COMPILER: &str = "relay-compiler";
const BABEL_PLUGIN_RELAY: &str = "babel-plugin-relay";
const VITE_PLUGIN_RELAY: &str = "vite-plugin-relay";
const TYPES_REACT_RELAY: &str = "@types/react-relay";
const TYPES_RELAY_RUNTIME: &str = "@types/relay-runtime";

/// Adds the runtime packages.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstallDependenciesTask;

impl InstallDependenciesTask {
    pub fn packages(ctx: &ProjectContext) -> Vec<&'static str> {
        let mut packages = vec![REACT_RELAY, RELAY_RUNTIME];
        if ctx.args.subscriptions {
            packages.push(GRAPHQL_WS);
        }
        packages
    }
}

impl Task for InstallDependenciesTask {
    fn message(&self) -> &'static str {
        t!("task.install_dependencies.message")
    }

    fn is_enabled(&self, ctx: &ProjectContext) -> bool {
        !ctx.skip_install
    }

    fn run(&self, ctx: &ProjectContext, progress: &mut TaskProgress<'_>) -> Result<(), TaskError> {
        install(ctx, progress, &Self::packages(ctx), false)
    }
}

/// Adds the compiler, the GraphQL transform and, for TypeScript, the typings.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstallDevDependenciesTask;

impl InstallDevDependenciesTask {
    pub fn packages(ctx: &ProjectContext) -> Vec<&'static str> {
        let mut packages = vec![RELAY_COMPILER];
        match ctx.args.toolchain {
            Toolchain::Cra | Toolchain::Next => packages.push(BABEL_PLUGIN_RELAY),
            Toolchain::Vite => packages.push(VITE_PLUGIN_RELAY),
        }
        if ctx.args.typescript {
            packages.extend([TYPES_REACT_RELAY, TYPES_RELAY_RUNTIME]);
        }
        packages
    }
}

impl Task for InstallDevDependenciesTask {
    fn message(&self) -> &'static str {
        t!("task.install_dev_dependencies.message")
    }

    fn is_enabled(&self, ctx: &ProjectContext) -> bool {
        !ctx.skip_install
    }

    fn run(&self, ctx: &ProjectContext, progress: &mut TaskProgress<'_>) -> Result<(), TaskError> {
        install(ctx, progress, &Self::packages(ctx), true)
    }
}

/// Installs whatever part of `packages` the manifest does not list yet.
fn install(
    ctx: &ProjectContext,
    progress: &mut TaskProgress<'_>,
    packages: &[&str],
    dev: bool,
) -> Result<(), TaskError> {
    let manifest = PackageManifest::load_lenient(ctx.fs.as_ref(), &ctx.package_json_file.abs);
    let missing: Vec<&str> = packages
        .iter()
        .copied()
        .filter(|package| {
            !manifest
                .as_ref()
                .is_some_and(|manifest| manifest.has_dependency(package))
        })
        .collect();

    if missing.is_empty() {
        progress.skip(t!("task.skip.already_installed"));
        return Ok(());
    }

    progress.update_message(format!("{} {}", progress.message(), missing.join(", ")));

    let command = ctx.env.package_manager.add_command(&missing, dev);
    debug!("Installing with '{}'", command);
    ctx.runner.run(&command, ctx.working_directory())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::testing::{context, cra_args};
    use crate::core::tasks::testing::run_single;
    use crate::models::CliArguments;

    #[test]
    fn test_runtime_packages_follow_subscriptions() {
        let args = CliArguments {
            subscriptions: true,
            ..cra_args()
        };
        let (_temp, ctx, runner) = context("{}", args);

        run_single(&InstallDependenciesTask, &ctx).unwrap();

        assert_eq!(
            *runner.commands.borrow(),
            vec!["npm install --save react-relay relay-runtime graphql-ws"]
        );
    }

    #[test]
    fn test_dev_packages_depend_on_toolchain_and_language() {
        let args = CliArguments {
            toolchain: Toolchain::Vite,
            typescript: false,
            ..cra_args()
        };
        let (_temp, ctx, _) = context("{}", args);
        assert_eq!(
            InstallDevDependenciesTask::packages(&ctx),
            vec!["relay-compiler", "vite-plugin-relay"]
        );

        let (_temp, ctx, _) = context("{}", cra_args());
        assert_eq!(
            InstallDevDependenciesTask::packages(&ctx),
            vec![
                "relay-compiler",
                "babel-plugin-relay",
                "@types/react-relay",
                "@types/relay-runtime"
            ]
        );
    }

    #[test]
    fn test_only_missing_packages_are_installed() {
        let (_temp, ctx, runner) = context(
            r#"{ "devDependencies": { "relay-compiler": "15.0.0", "@types/react-relay": "14" } }"#,
            cra_args(),
        );

        run_single(&InstallDevDependenciesTask, &ctx).unwrap();

        assert_eq!(
            *runner.commands.borrow(),
            vec!["npm install --save-dev babel-plugin-relay @types/relay-runtime"]
        );
    }

    #[test]
    fn test_listed_packages_are_skipped() {
        let (_temp, ctx, runner) = context(
            r#"{ "dependencies": { "react-relay": "15", "relay-runtime": "15" } }"#,
            cra_args(),
        );

        let skipped = run_single(&InstallDependenciesTask, &ctx).unwrap();

        assert_eq!(skipped.as_deref(), Some("Already installed"));
        assert!(runner.commands.borrow().is_empty());
    }
}
