// src/system/environment.rs

use crate::{
    constants::{NPM_USER_AGENT_ENV, OWN_PACKAGE_DIRECTORY_ENV, PACKAGE_JSON_FILENAME},
    models::PackageManager,
    system::filesystem::normalize,
};
use log::debug;
use std::{
    env, fmt,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnvironmentError {
    #[error("Could not determine the current working directory: {0}")]
    CurrentDir(#[source] std::io::Error),
    #[error("Could not find a 'package.json' in '{0}' or any of its parent directories.")]
    PackageJsonNotFound(String),
}

/// A path known in two forms: relative to the project root (`./src/x`) and absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativePath {
    pub rel: String,
    pub abs: PathBuf,
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rel)
    }
}

/// Immutable description of the project being configured.
#[derive(Debug, Clone)]
pub struct Environment {
    /// The directory the wizard was started in.
    pub target_directory: PathBuf,
    /// The nearest ancestor of `target_directory` (inclusive) holding a `package.json`.
    pub project_root_directory: PathBuf,
    /// Where the bundled `assets/` directory lives.
    pub own_package_directory: PathBuf,
    pub package_manager: PackageManager,
}

impl Environment {
    /// Builds the environment for the current working directory.
    ///
    /// The package manager is taken from `package_manager` when given, otherwise
    /// it is detected from lockfiles and the npm user agent.
    pub fn from_current_dir(
        package_manager: Option<PackageManager>,
    ) -> Result<Self, EnvironmentError> {
        let cwd = env::current_dir().map_err(EnvironmentError::CurrentDir)?;
        let target_directory = dunce::canonicalize(&cwd).unwrap_or(cwd);
        let own_package_directory = env::var_os(OWN_PACKAGE_DIRECTORY_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")));
        let user_agent = env::var(NPM_USER_AGENT_ENV).ok();

        Self::new(
            target_directory,
            own_package_directory,
            package_manager,
            user_agent.as_deref(),
        )
    }

    pub fn new(
        target_directory: PathBuf,
        own_package_directory: PathBuf,
        package_manager: Option<PackageManager>,
        user_agent: Option<&str>,
    ) -> Result<Self, EnvironmentError> {
        let project_root_directory = find_project_root(&target_directory).ok_or_else(|| {
            EnvironmentError::PackageJsonNotFound(target_directory.display().to_string())
        })?;
        debug!("Project root: '{}'", project_root_directory.display());

        let package_manager = package_manager.unwrap_or_else(|| {
            detect_package_manager(&project_root_directory, user_agent)
        });
        debug!("Package manager: {}", package_manager);

        Ok(Self {
            target_directory,
            project_root_directory,
            own_package_directory,
            package_manager,
        })
    }

    /// Resolves `path` against the target directory and returns both of its forms.
    pub fn rel(&self, path: impl AsRef<Path>) -> RelativePath {
        let abs = normalize(&self.target_directory.join(path.as_ref()));
        let rel = match pathdiff::diff_paths(&abs, &self.project_root_directory) {
            Some(diff) if diff.as_os_str().is_empty() => "./".to_string(),
            Some(diff) if diff.starts_with("..") => to_forward_slashes(&diff),
            Some(diff) => format!("./{}", to_forward_slashes(&diff)),
            None => abs.display().to_string(),
        };
        RelativePath { rel, abs }
    }

    /// Resolves `path` against the project root instead of the target directory.
    pub fn root_rel(&self, path: impl AsRef<Path>) -> RelativePath {
        let relative_to_target =
            pathdiff::diff_paths(&self.project_root_directory, &self.target_directory)
                .unwrap_or_default();
        self.rel(relative_to_target.join(path.as_ref()))
    }

    pub fn package_json_file(&self) -> RelativePath {
        self.root_rel(PACKAGE_JSON_FILENAME)
    }
}

fn to_forward_slashes(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(PACKAGE_JSON_FILENAME).is_file())
        .map(Path::to_path_buf)
}

/// Picks the package manager from the project's lockfile, then from the npm
/// user agent of the launching process, and falls back to npm.
pub fn detect_package_manager(project_root: &Path, user_agent: Option<&str>) -> PackageManager {
    const LOCKFILES: [(&str, PackageManager); 3] = [
        ("yarn.lock", PackageManager::Yarn),
        ("pnpm-lock.yaml", PackageManager::Pnpm),
        ("package-lock.json", PackageManager::Npm),
    ];

    if let Some((lockfile, manager)) = LOCKFILES
        .iter()
        .find(|(lockfile, _)| project_root.join(lockfile).is_file())
    {
        debug!("Found '{}', using {}", lockfile, manager);
        return *manager;
    }

    match user_agent {
        Some(agent) if agent.starts_with("yarn") => PackageManager::Yarn,
        Some(agent) if agent.starts_with("pnpm") => PackageManager::Pnpm,
        _ => PackageManager::Npm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), "{}").unwrap();
        temp
    }

    #[test]
    fn test_project_root_is_found_from_nested_directory() {
        let temp = project();
        let nested = temp.path().join("packages/web");
        fs::create_dir_all(&nested).unwrap();

        let env = Environment::new(nested.clone(), PathBuf::from("/pkg"), None, None).unwrap();

        assert_eq!(env.project_root_directory, temp.path());
        assert_eq!(env.target_directory, nested);
        assert_eq!(env.package_json_file().abs, temp.path().join("package.json"));
        assert_eq!(env.package_json_file().rel, "./package.json");
    }

    #[test]
    fn test_missing_package_json_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = Environment::new(temp.path().to_path_buf(), PathBuf::new(), None, None);
        assert!(matches!(result, Err(EnvironmentError::PackageJsonNotFound(_))));
    }

    #[test]
    fn test_rel_produces_root_relative_form() {
        let temp = project();
        let env = Environment::new(temp.path().to_path_buf(), PathBuf::new(), None, None).unwrap();

        let schema = env.rel("src/../src/schema.graphql");
        assert_eq!(schema.rel, "./src/schema.graphql");
        assert_eq!(schema.abs, temp.path().join("src/schema.graphql"));

        assert_eq!(env.rel("./").rel, "./");
        assert_eq!(env.rel("../outside").rel, "../outside");
    }

    #[test]
    fn test_package_manager_detection_order() {
        let temp = project();
        assert_eq!(detect_package_manager(temp.path(), None), PackageManager::Npm);
        assert_eq!(
            detect_package_manager(temp.path(), Some("pnpm/8.6.0 npm/? node/v18.16.0")),
            PackageManager::Pnpm
        );

        fs::write(temp.path().join("yarn.lock"), "").unwrap();
        assert_eq!(
            detect_package_manager(temp.path(), Some("pnpm/8.6.0")),
            PackageManager::Yarn
        );
    }

    #[test]
    fn test_explicit_package_manager_wins() {
        let temp = project();
        fs::write(temp.path().join("yarn.lock"), "").unwrap();
        let env = Environment::new(
            temp.path().to_path_buf(),
            PathBuf::new(),
            Some(PackageManager::Pnpm),
            None,
        )
        .unwrap();
        assert_eq!(env.package_manager, PackageManager::Pnpm);
    }
}
