// src/core/tasks/configure_relay_compiler.rs

use super::{Task, TaskError, TaskProgress};
use crate::{
    constants::{RELAY_SCRIPT, RELAY_SCRIPT_NAME, VALIDATE_RELAY_ARTIFACTS_SCRIPT},
    core::{
        context::ProjectContext,
        manifest::{ManifestError, PackageManifest, RelayConfig},
    },
    models::Toolchain,
};

/// Writes the `relay` script, the build validation and the `relay` section
/// into `package.json`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigureRelayCompilerTask;

impl ConfigureRelayCompilerTask {
    /// Applies the compiler configuration to `manifest` in place.
    pub fn configure(
        manifest: &mut PackageManifest,
        ctx: &ProjectContext,
    ) -> Result<(), ManifestError> {
        if manifest.script(RELAY_SCRIPT_NAME).is_none_or(str::is_empty) {
            manifest.set_script(RELAY_SCRIPT_NAME, RELAY_SCRIPT.to_string())?;
        }

        if let Some(build) = manifest.script("build")
            && !build.contains(VALIDATE_RELAY_ARTIFACTS_SCRIPT)
        {
            let build = format!("{} && {}", VALIDATE_RELAY_ARTIFACTS_SCRIPT, build);
            manifest.set_script("build", build)?;
        }

        let mut relay = manifest.relay_config()?;
        relay.src = Some(ctx.src.rel.clone());
        relay.language = Some(ctx.compiler_language.as_str().to_string());
        relay.schema = Some(ctx.schema_file.rel.clone());
        relay.exclude = Some(RelayConfig::default_exclude());
        if ctx.args.toolchain == Toolchain::Vite {
            // Vite can't consume CommonJS artifacts.
            relay.eager_es_modules = Some(true);
        }
        if let Some(artifact_directory) = &ctx.artifact_directory {
            relay.artifact_directory = Some(artifact_directory.rel.clone());
        }
        manifest.set_relay_config(&relay)
    }
}

impl Task for ConfigureRelayCompilerTask {
    fn message(&self) -> &'static str {
        t!("task.configure_relay_compiler.message")
    }

    fn run(&self, ctx: &ProjectContext, progress: &mut TaskProgress<'_>) -> Result<(), TaskError> {
        let file = &ctx.package_json_file;
        progress.update_message(format!("{} {}", progress.message(), file.rel));

        let content = ctx.fs.read_to_string(&file.abs).map_err(TaskError::io(file))?;
        let original = PackageManifest::parse(&content).map_err(TaskError::manifest(file))?;

        let mut manifest = original.clone();
        Self::configure(&mut manifest, ctx).map_err(TaskError::manifest(file))?;

        if manifest == original {
            progress.skip(t!("task.skip.already_configured"));
            return Ok(());
        }

        let serialized = manifest
            .to_pretty_string()
            .map_err(TaskError::manifest(file))?;
        ctx.fs.write(&file.abs, &serialized).map_err(TaskError::io(file))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::testing::{context, cra_args};
    use crate::core::tasks::testing::run_single;
    use crate::models::CliArguments;
    use serde_json::{Value, json};
    use std::fs;

    fn manifest_json(temp: &tempfile::TempDir) -> Value {
        let content = fs::read_to_string(temp.path().join("package.json")).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    #[test]
    fn test_empty_manifest_gets_script_and_section() {
        let (temp, ctx, _) = context("{}", cra_args());

        run_single(&ConfigureRelayCompilerTask, &ctx).unwrap();

        let manifest = manifest_json(&temp);
        assert_eq!(manifest["scripts"]["relay"], "relay-compiler");
        assert_eq!(
            manifest["relay"],
            json!({
                "src": "./src",
                "language": "typescript",
                "schema": "./src/schema.graphql",
                "exclude": ["**/node_modules/**", "**/__mocks__/**", "**/__generated__/**"]
            })
        );
    }

    #[test]
    fn test_build_script_is_prefixed_once() {
        let (temp, ctx, _) = context(r#"{ "scripts": { "build": "tsc" } }"#, cra_args());

        run_single(&ConfigureRelayCompilerTask, &ctx).unwrap();
        assert_eq!(
            manifest_json(&temp)["scripts"]["build"],
            "relay-compiler --validate && tsc"
        );

        let skipped = run_single(&ConfigureRelayCompilerTask, &ctx).unwrap();
        assert_eq!(skipped.as_deref(), Some("Already configured"));
        assert_eq!(
            manifest_json(&temp)["scripts"]["build"],
            "relay-compiler --validate && tsc"
        );
    }

    #[test]
    fn test_existing_relay_script_is_kept() {
        let (temp, ctx, _) = context(
            r#"{ "scripts": { "relay": "relay-compiler --watch" } }"#,
            cra_args(),
        );

        run_single(&ConfigureRelayCompilerTask, &ctx).unwrap();

        assert_eq!(manifest_json(&temp)["scripts"]["relay"], "relay-compiler --watch");
    }

    #[test]
    fn test_vite_and_artifact_directory_options() {
        let args = CliArguments {
            toolchain: Toolchain::Vite,
            typescript: false,
            artifact_directory: Some("./src/__generated__".to_string()),
            ..cra_args()
        };
        let (temp, ctx, _) = context(
            r#"{ "name": "app", "relay": { "persistConfig": { "file": "q.json" } } }"#,
            args,
        );

        run_single(&ConfigureRelayCompilerTask, &ctx).unwrap();

        let manifest = manifest_json(&temp);
        assert_eq!(manifest["relay"]["language"], "javascript");
        assert_eq!(manifest["relay"]["eagerEsModules"], true);
        assert_eq!(manifest["relay"]["artifactDirectory"], "./src/__generated__");
        assert_eq!(manifest["relay"]["persistConfig"]["file"], "q.json");
        assert_eq!(manifest["name"], "app");
    }

    #[test]
    fn test_invalid_manifest_is_a_task_error() {
        let (_temp, ctx, _) = context("{ nope", cra_args());

        let error = run_single(&ConfigureRelayCompilerTask, &ctx).unwrap_err();

        assert!(matches!(error, TaskError::Manifest { ref path, .. } if path == "./package.json"));
    }
}
