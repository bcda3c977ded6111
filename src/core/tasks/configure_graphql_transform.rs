// src/core/tasks/configure_graphql_transform.rs

use super::{Task, TaskError, TaskProgress};
use crate::{
    core::context::ProjectContext,
    models::Toolchain,
    system::environment::RelativePath,
};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

const VITE_PLUGIN_RELAY: &str = "vite-plugin-relay";
const VITE_PLUGIN_IMPORT: &str = "import relay from \"vite-plugin-relay\";\n";

lazy_static! {
    // Up to the module specifier, across lines for multi-line named imports.
    static ref IMPORT_STATEMENT: Regex =
        Regex::new(r#"(?m)^import\s[^"'`;]*["'][^"'\n]*["'][ \t]*;?"#).unwrap();
    static ref PLUGINS_ARRAY: Regex = Regex::new(r"\bplugins\s*:\s*\[").unwrap();
    static ref RELAY_KEY: Regex = Regex::new(r"\brelay\s*:").unwrap();
    static ref COMPILER_OBJECT: Regex = Regex::new(r"\bcompiler\s*:\s*\{").unwrap();
    static ref NEXT_CONFIG_OBJECT: Regex = Regex::new(
        r"(?:const\s+nextConfig\s*(?::\s*[\w.]+\s*)?=|module\.exports\s*=|export\s+default)\s*\{"
    )
    .unwrap();
}

/// Registers the Relay GraphQL transform with the bundler (Vite) or the
/// framework compiler (Next.js). Babel macros in create-react-app need nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigureGraphqlTransformTask;

impl Task for ConfigureGraphqlTransformTask {
    fn message(&self) -> &'static str {
        t!("task.configure_graphql_transform.message")
    }

    fn is_enabled(&self, ctx: &ProjectContext) -> bool {
        ctx.args.toolchain != Toolchain::Cra && ctx.toolchain_config_file.is_some()
    }

    fn run(&self, ctx: &ProjectContext, progress: &mut TaskProgress<'_>) -> Result<(), TaskError> {
        let Some(file) = &ctx.toolchain_config_file else {
            return Ok(());
        };
        progress.update_message(format!("{} {}", progress.message(), file.rel));

        if !ctx.fs.is_file(&file.abs) {
            return Err(config_error(file, t!("task.error.config_not_found")));
        }
        let content = ctx.fs.read_to_string(&file.abs).map_err(TaskError::io(file))?;

        let patched = match ctx.args.toolchain {
            Toolchain::Vite if content.contains(VITE_PLUGIN_RELAY) => None,
            Toolchain::Vite => Some(patch_vite_config(&content).map_err(|r| config_error(file, r))?),
            Toolchain::Next if RELAY_KEY.is_match(&content) => None,
            Toolchain::Next => Some(patch_next_config(&content, ctx).map_err(|r| config_error(file, r))?),
            Toolchain::Cra => None,
        };

        match patched {
            Some(patched) => {
                debug!("Writing the Relay transform into '{}'", file.rel);
                ctx.fs.write(&file.abs, &patched).map_err(TaskError::io(file))
            }
            None => {
                progress.skip(t!("task.skip.already_configured"));
                Ok(())
            }
        }
    }
}

fn config_error(file: &RelativePath, reason: &str) -> TaskError {
    TaskError::Config {
        path: file.rel.clone(),
        reason: reason.to_string(),
    }
}

/// Imports `vite-plugin-relay` and appends it to the `plugins` array.
fn patch_vite_config(content: &str) -> Result<String, &'static str> {
    let opening = PLUGINS_ARRAY
        .find(content)
        .ok_or(t!("task.error.plugins_not_found"))?;
    let closing = matching_bracket(content, opening.end()).ok_or(t!("task.error.plugins_not_found"))?;

    let items = &content[opening.end()..closing];
    let insert_at = opening.end() + items.trim_end().len();
    let separator = match items.trim() {
        "" => "",
        trimmed if trimmed.ends_with(',') => " ",
        _ => ", ",
    };

    let mut patched = String::with_capacity(content.len() + VITE_PLUGIN_IMPORT.len() + 8);
    let import_at = import_position(&content[..opening.start()]);

    patched.push_str(&content[..import_at]);
    if import_at > 0 && !content[..import_at].ends_with('\n') {
        patched.push('\n');
    }
    patched.push_str(VITE_PLUGIN_IMPORT);
    patched.push_str(&content[import_at..insert_at]);
    patched.push_str(separator);
    patched.push_str("relay");
    patched.push_str(&content[insert_at..]);
    Ok(patched)
}

/// The offset right after the last import statement in `head`, or 0 without imports.
fn import_position(head: &str) -> usize {
    let Some(last) = IMPORT_STATEMENT.find_iter(head).last() else {
        return 0;
    };
    match head[last.end()..].find('\n') {
        Some(newline) => last.end() + newline + 1,
        None => last.end(),
    }
}

/// Adds a `compiler.relay` block to the exported Next.js config.
fn patch_next_config(content: &str, ctx: &ProjectContext) -> Result<String, &'static str> {
    let mut relay = vec![
        format!("src: \"{}\"", ctx.src.rel),
        format!("language: \"{}\"", ctx.compiler_language.as_str()),
    ];
    if let Some(artifact_directory) = &ctx.artifact_directory {
        relay.push(format!("artifactDirectory: \"{}\"", artifact_directory.rel));
    }

    let (insert_at, block) = match COMPILER_OBJECT.find(content) {
        Some(compiler) => {
            let fields: String = relay.iter().map(|f| format!("      {},\n", f)).collect();
            (compiler.end(), format!("\n    relay: {{\n{}    }},", fields))
        }
        None => {
            let object = NEXT_CONFIG_OBJECT
                .find(content)
                .ok_or(t!("task.error.config_object_not_found"))?;
            let fields: String = relay.iter().map(|f| format!("      {},\n", f)).collect();
            (
                object.end(),
                format!("\n  compiler: {{\n    relay: {{\n{}    }},\n  }},", fields),
            )
        }
    };

    let mut patched = String::with_capacity(content.len() + block.len());
    patched.push_str(&content[..insert_at]);
    patched.push_str(&block);
    patched.push_str(&content[insert_at..]);
    Ok(patched)
}

/// Finds the `]` closing the array whose contents start at `start`.
fn matching_bracket(content: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, c) in content[start..].char_indices() {
        match c {
            '[' | '(' | '{' => depth += 1,
            ']' if depth == 0 => return Some(start + offset),
            ']' | ')' | '}' => depth = depth.checked_sub(1)?,
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::arguments::testing::touch;
    use crate::core::context::testing::{context, cra_args};
    use crate::core::tasks::testing::run_single;
    use crate::models::CliArguments;
    use std::fs;

    const VITE_CONFIG: &str = r#"import { defineConfig } from "vite";
import react from "@vitejs/plugin-react";

export default defineConfig({
  plugins: [react()],
});
"#;

    const NEXT_CONFIG: &str = r#"/** @type {import('next').NextConfig} */
const nextConfig = {
  reactStrictMode: true,
};

module.exports = nextConfig;
"#;

    fn vite_args() -> CliArguments {
        CliArguments {
            toolchain: Toolchain::Vite,
            ..cra_args()
        }
    }

    fn next_args() -> CliArguments {
        CliArguments {
            toolchain: Toolchain::Next,
            src: "./".to_string(),
            artifact_directory: Some("./__generated__".to_string()),
            ..cra_args()
        }
    }

    #[test]
    fn test_vite_plugin_is_appended_after_existing_plugins() {
        let patched = patch_vite_config(VITE_CONFIG).unwrap();
        assert!(patched.contains(
            "import react from \"@vitejs/plugin-react\";\nimport relay from \"vite-plugin-relay\";\n"
        ));
        assert!(patched.contains("plugins: [react(), relay],"), "{}", patched);
    }

    #[test]
    fn test_vite_plugin_handles_empty_and_trailing_comma_arrays() {
        let patched = patch_vite_config("export default { plugins: [] };").unwrap();
        assert!(patched.starts_with("import relay from \"vite-plugin-relay\";\n"));
        assert!(patched.contains("plugins: [relay]"));

        let patched = patch_vite_config("export default { plugins: [\n    react(),\n  ] };").unwrap();
        assert!(patched.contains("react(), relay\n  ]"), "{}", patched);
    }

    #[test]
    fn test_vite_import_goes_after_a_multi_line_import() {
        let content = "import {\n  defineConfig,\n} from \"vite\";\n\nexport default defineConfig({ plugins: [] });\n";

        let patched = patch_vite_config(content).unwrap();

        assert!(
            patched.starts_with(
                "import {\n  defineConfig,\n} from \"vite\";\nimport relay from \"vite-plugin-relay\";\n\nexport default"
            ),
            "{}",
            patched
        );
        assert!(patched.contains("plugins: [relay]"));
    }

    #[test]
    fn test_vite_imports_after_the_plugins_array_are_ignored() {
        let content = "export default { plugins: [react()] };\nimport react from \"@vitejs/plugin-react\";\n";

        let patched = patch_vite_config(content).unwrap();

        assert_eq!(
            patched,
            "import relay from \"vite-plugin-relay\";\nexport default { plugins: [react(), relay] };\nimport react from \"@vitejs/plugin-react\";\n"
        );
    }

    #[test]
    fn test_import_position_handles_side_effect_and_unterminated_imports() {
        assert_eq!(import_position(""), 0);
        assert_eq!(import_position("const a = 1;\n"), 0);
        let head = "import \"./polyfill\";\nimport x from 'x'\nconst y = 2;\n";
        assert_eq!(&head[import_position(head)..], "const y = 2;\n");
    }

    #[test]
    fn test_vite_config_without_plugins_is_an_error() {
        assert!(patch_vite_config("export default {};").is_err());
    }

    #[test]
    fn test_vite_task_is_idempotent() {
        let (temp, ctx, _) = context("{}", vite_args());
        fs::write(temp.path().join("vite.config.ts"), VITE_CONFIG).unwrap();

        assert_eq!(run_single(&ConfigureGraphqlTransformTask, &ctx).unwrap(), None);
        let once = fs::read_to_string(temp.path().join("vite.config.ts")).unwrap();

        let skipped = run_single(&ConfigureGraphqlTransformTask, &ctx).unwrap();
        assert_eq!(skipped.as_deref(), Some("Already configured"));
        assert_eq!(fs::read_to_string(temp.path().join("vite.config.ts")).unwrap(), once);
    }

    #[test]
    fn test_next_config_gets_compiler_block() {
        let (temp, ctx, _) = context("{}", next_args());
        fs::write(temp.path().join("next.config.js"), NEXT_CONFIG).unwrap();

        run_single(&ConfigureGraphqlTransformTask, &ctx).unwrap();

        let patched = fs::read_to_string(temp.path().join("next.config.js")).unwrap();
        assert!(patched.contains(
            "const nextConfig = {\n  compiler: {\n    relay: {\n      src: \"./\",\n      language: \"typescript\",\n      artifactDirectory: \"./__generated__\",\n    },\n  },\n  reactStrictMode: true,"
        ), "{}", patched);
    }

    #[test]
    fn test_next_existing_compiler_object_is_extended() {
        let (_temp, ctx, _) = context("{}", next_args());
        let content = "module.exports = {\n  compiler: {\n    styledComponents: true,\n  },\n};\n";

        let patched = patch_next_config(content, &ctx).unwrap();

        assert!(patched.contains("compiler: {\n    relay: {"), "{}", patched);
        assert_eq!(patched.matches("compiler").count(), 1);
        assert!(patched.contains("styledComponents: true"));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let (_temp, ctx, _) = context("{}", vite_args());

        let error = run_single(&ConfigureGraphqlTransformTask, &ctx).unwrap_err();

        assert!(matches!(error, TaskError::Config { ref path, .. } if path == "./vite.config.ts"));
    }

    #[test]
    fn test_disabled_for_create_react_app() {
        let (temp, ctx, _) = context("{}", cra_args());
        touch(temp.path(), "vite.config.ts");
        assert!(!ConfigureGraphqlTransformTask.is_enabled(&ctx));
    }
}
