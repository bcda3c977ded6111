// src/models.rs

//! Shared value types: the argument keys, the enums they resolve to, and the
//! accumulator/snapshot pair produced by argument resolution.

use clap::ValueEnum;
use std::fmt;

// --- ARGUMENT KEYS ---

/// The fixed, enumerable key of every configuration argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentName {
    Toolchain,
    TypeScript,
    Src,
    SchemaFile,
    ArtifactDirectory,
    Subscriptions,
}

impl ArgumentName {
    /// The camelCase name used in messages, matching the `relay` manifest keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Toolchain => "toolchain",
            Self::TypeScript => "typescript",
            Self::Src => "src",
            Self::SchemaFile => "schemaFile",
            Self::ArtifactDirectory => "artifactDirectory",
            Self::Subscriptions => "subscriptions",
        }
    }

    /// The clap argument id the flag is registered under.
    pub fn id(self) -> &'static str {
        match self {
            Self::Toolchain => "toolchain",
            Self::TypeScript => "typescript",
            Self::Src => "src",
            Self::SchemaFile => "schema_file",
            Self::ArtifactDirectory => "artifact_directory",
            Self::Subscriptions => "subscriptions",
        }
    }
}

impl fmt::Display for ArgumentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- ENUMERATED VALUES ---

/// The project integration variant. `Next` is the framework-integrated one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toolchain {
    /// create-react-app
    Cra,
    /// Next.js
    Next,
    /// Vite
    Vite,
}

impl Toolchain {
    pub const ALL: [Self; 3] = [Self::Cra, Self::Next, Self::Vite];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cra => "cra",
            Self::Next => "next",
            Self::Vite => "vite",
        }
    }
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }

    /// Builds the command line that adds `packages` to the project.
    pub fn add_command(self, packages: &[&str], dev: bool) -> String {
        let verb = match (self, dev) {
            (Self::Npm, false) => "npm install --save",
            (Self::Npm, true) => "npm install --save-dev",
            (Self::Yarn, false) => "yarn add",
            (Self::Yarn, true) => "yarn add --dev",
            (Self::Pnpm, false) => "pnpm add",
            (Self::Pnpm, true) => "pnpm add --save-dev",
        };
        format!("{} {}", verb, packages.join(" "))
    }

    /// Builds the command line that runs a manifest script.
    pub fn run_script_command(self, script: &str) -> String {
        format!("{} run {}", self.as_str(), script)
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `language` value written for relay-compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompilerLanguage {
    TypeScript,
    JavaScript,
}

impl CompilerLanguage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::JavaScript => "javascript",
        }
    }
}

// --- RESOLUTION MODELS ---

/// The accumulator threaded through argument resolution.
/// Each field is filled exactly once, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialArguments {
    pub toolchain: Option<Toolchain>,
    pub typescript: Option<bool>,
    pub src: Option<String>,
    pub schema_file: Option<String>,
    /// `Some("")` means "resolved, and no artifact directory was chosen".
    pub artifact_directory: Option<String>,
    pub subscriptions: Option<bool>,
}

impl PartialArguments {
    /// Freezes the accumulator. Returns the name of the first unresolved argument on failure.
    pub fn freeze(self) -> Result<CliArguments, ArgumentName> {
        Ok(CliArguments {
            toolchain: self.toolchain.ok_or(ArgumentName::Toolchain)?,
            typescript: self.typescript.ok_or(ArgumentName::TypeScript)?,
            src: self.src.ok_or(ArgumentName::Src)?,
            schema_file: self.schema_file.ok_or(ArgumentName::SchemaFile)?,
            artifact_directory: self
                .artifact_directory
                .ok_or(ArgumentName::ArtifactDirectory)
                .map(|dir| Some(dir).filter(|d| !d.is_empty()))?,
            subscriptions: self.subscriptions.ok_or(ArgumentName::Subscriptions)?,
        })
    }
}

/// The frozen, fully validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArguments {
    pub toolchain: Toolchain,
    pub typescript: bool,
    pub src: String,
    pub schema_file: String,
    pub artifact_directory: Option<String>,
    pub subscriptions: bool,
}

impl CliArguments {
    pub fn compiler_language(&self) -> CompilerLanguage {
        if self.typescript {
            CompilerLanguage::TypeScript
        } else {
            CompilerLanguage::JavaScript
        }
    }
}
