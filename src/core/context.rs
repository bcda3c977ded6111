// src/core/context.rs

use crate::{
    constants::RELAY_ENVIRONMENT_BASENAME,
    models::{CliArguments, CompilerLanguage, Toolchain},
    system::{
        environment::{Environment, RelativePath},
        executor::CommandRunner,
        filesystem::Filesystem,
    },
};
use std::{fmt, path::Path, rc::Rc};

/// Candidate config files for each toolchain, in lookup order.
const VITE_CONFIG_FILES: [&str; 4] = [
    "vite.config.ts",
    "vite.config.js",
    "vite.config.mts",
    "vite.config.mjs",
];
const NEXT_CONFIG_FILES: [&str; 2] = ["next.config.js", "next.config.mjs"];

/// The frozen snapshot every task works against.
///
/// All paths are resolved once, up front, so tasks never need to know how
/// a value was obtained.
pub struct ProjectContext {
    pub args: CliArguments,
    pub env: Environment,
    pub compiler_language: CompilerLanguage,
    pub package_json_file: RelativePath,
    pub src: RelativePath,
    pub schema_file: RelativePath,
    pub relay_env_file: RelativePath,
    pub artifact_directory: Option<RelativePath>,
    /// The bundler or framework config file the GraphQL transform is registered in.
    pub toolchain_config_file: Option<RelativePath>,
    pub skip_install: bool,
    pub fs: Rc<dyn Filesystem>,
    pub runner: Rc<dyn CommandRunner>,
}

impl fmt::Debug for ProjectContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectContext")
            .field("args", &self.args)
            .field("project_root", &self.env.project_root_directory)
            .field("relay_env_file", &self.relay_env_file.rel)
            .field("skip_install", &self.skip_install)
            .finish()
    }
}

impl ProjectContext {
    pub fn new(
        args: CliArguments,
        env: Environment,
        fs: Rc<dyn Filesystem>,
        runner: Rc<dyn CommandRunner>,
        skip_install: bool,
    ) -> Self {
        let compiler_language = args.compiler_language();
        let package_json_file = env.package_json_file();
        let src = env.rel(&args.src);
        let schema_file = env.rel(&args.schema_file);
        let relay_env_file = env.rel(relay_environment_path(&args));
        let artifact_directory = args.artifact_directory.as_ref().map(|dir| env.rel(dir));
        let toolchain_config_file = toolchain_config_file(&args, &env, fs.as_ref());

        Self {
            args,
            env,
            compiler_language,
            package_json_file,
            src,
            schema_file,
            relay_env_file,
            artifact_directory,
            toolchain_config_file,
            skip_install,
            fs,
            runner,
        }
    }

    /// The directory commands are run in.
    pub fn working_directory(&self) -> &Path {
        &self.env.project_root_directory
    }
}

fn relay_environment_path(args: &CliArguments) -> String {
    let extension = if args.typescript { "ts" } else { "js" };
    let directory = match args.toolchain {
        // Next.js keeps `pages/` at the root, so `src` is usually `./`.
        Toolchain::Next => "./src",
        _ => args.src.as_str(),
    };
    Path::new(directory)
        .join(format!("{}.{}", RELAY_ENVIRONMENT_BASENAME, extension))
        .to_string_lossy()
        .into_owned()
}

/// Picks the first existing config file, falling back to the conventional name.
fn toolchain_config_file(
    args: &CliArguments,
    env: &Environment,
    fs: &dyn Filesystem,
) -> Option<RelativePath> {
    let candidates: &[&str] = match args.toolchain {
        Toolchain::Cra => return None,
        Toolchain::Vite if args.typescript => &VITE_CONFIG_FILES,
        Toolchain::Vite => &VITE_CONFIG_FILES[1..],
        Toolchain::Next => &NEXT_CONFIG_FILES,
    };

    let existing = candidates
        .iter()
        .map(|name| env.root_rel(name))
        .find(|path| fs.is_file(&path.abs));

    existing.or_else(|| candidates.first().map(|name| env.root_rel(name)))
}


#[cfg(test)]
mod tests {
    use super::testing::{context, cra_args};
    use super::*;
    use crate::core::arguments::testing::touch;

    #[test]
    fn test_paths_are_resolved_once() {
        let (_temp, ctx, _) = context("{}", cra_args());
        assert_eq!(ctx.package_json_file.rel, "./package.json");
        assert_eq!(ctx.src.rel, "./src");
        assert_eq!(ctx.schema_file.rel, "./src/schema.graphql");
        assert_eq!(ctx.relay_env_file.rel, "./src/RelayEnvironment.ts");
        assert_eq!(ctx.compiler_language, CompilerLanguage::TypeScript);
        assert!(ctx.artifact_directory.is_none());
        assert!(ctx.toolchain_config_file.is_none());
    }

    #[test]
    fn test_next_places_environment_below_src() {
        let args = CliArguments {
            toolchain: Toolchain::Next,
            typescript: false,
            src: "./".to_string(),
            artifact_directory: Some("./__generated__".to_string()),
            ..cra_args()
        };
        let (_temp, ctx, _) = context("{}", args);
        assert_eq!(ctx.relay_env_file.rel, "./src/RelayEnvironment.js");
        assert_eq!(
            ctx.artifact_directory.map(|dir| dir.rel).as_deref(),
            Some("./__generated__")
        );
        assert_eq!(
            ctx.toolchain_config_file.map(|file| file.rel).as_deref(),
            Some("./next.config.js")
        );
    }

    #[test]
    fn test_existing_vite_config_is_preferred() {
        let args = CliArguments {
            toolchain: Toolchain::Vite,
            ..cra_args()
        };
        let (temp, env) = crate::core::arguments::testing::project("{}");
        touch(temp.path(), "vite.config.js");
        let ctx = ProjectContext::new(
            args,
            env,
            Rc::new(crate::system::filesystem::LocalFilesystem),
            Rc::new(crate::system::executor::testing::RecordingRunner::default()),
            false,
        );
        assert_eq!(
            ctx.toolchain_config_file.map(|file| file.rel).as_deref(),
            Some("./vite.config.js")
        );
    }
}
