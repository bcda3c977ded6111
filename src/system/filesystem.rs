// src/system/filesystem.rs

use log::trace;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// The filesystem capabilities arguments and tasks rely on.
///
/// Paths handed to these methods are expected to be absolute; argument values
/// are resolved through [`Environment::rel`](crate::system::environment::Environment::rel)
/// before they reach the filesystem.
pub trait Filesystem: std::fmt::Debug {
    fn is_file(&self, path: &Path) -> bool;

    fn is_directory(&self, path: &Path) -> bool;

    fn does_exist(&self, path: &Path) -> bool;

    /// Whether `candidate` is `root` itself or lies somewhere below it.
    /// The check is lexical; neither path has to exist.
    fn is_sub_directory(&self, root: &Path, candidate: &Path) -> bool {
        normalize(candidate).starts_with(normalize(root))
    }

    /// Creates `path` and all missing parents. Succeeds if it already exists.
    fn create_directory(&self, path: &Path) -> io::Result<()>;

    fn copy_file(&self, source: &Path, destination: &Path) -> io::Result<()>;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// The `std::fs` backed implementation used by the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFilesystem;

impl Filesystem for LocalFilesystem {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn does_exist(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_directory(&self, path: &Path) -> io::Result<()> {
        trace!("Creating directory '{}'", path.display());
        fs::create_dir_all(path)
    }

    fn copy_file(&self, source: &Path, destination: &Path) -> io::Result<()> {
        trace!(
            "Copying '{}' to '{}'",
            source.display(),
            destination.display()
        );
        fs::copy(source, destination).map(|_| ())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        trace!("Writing {} bytes to '{}'", contents.len(), path.display());
        fs::write(path, contents)
    }
}

/// Lexically normalizes a path: drops `.` segments and folds `..` into its parent.
/// Symlinks are not followed.
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                None | Some(Component::ParentDir) => normalized.push(component),
                Some(Component::RootDir | Component::Prefix(_)) => {}
                Some(_) => {
                    normalized.pop();
                }
            },
            other => normalized.push(other),
        }
    }
    normalized
}
