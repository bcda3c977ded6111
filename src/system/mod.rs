//! # System Interaction Layer
//!
//! This module provides the collaborators the wizard talks to the outside world
//! through. Everything above this layer depends on the traits, never on `std::fs`
//! or `std::process` directly.
//!
//! ## Modules
//!
//! - **`environment`**: Locates the project root, detects the package manager and
//!   turns argument values into project-relative and absolute paths.
//! - **`executor`**: Spawns package-manager and `git` processes.
//! - **`filesystem`**: The `Filesystem` trait and its `std::fs` implementation.
//! - **`prompt`**: The `Prompter` trait and its `dialoguer` implementation.

pub mod environment;
pub mod executor;
pub mod filesystem;
pub mod prompt;
