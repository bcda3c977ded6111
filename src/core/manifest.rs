// src/core/manifest.rs

//! A typed view over `package.json`.
//!
//! The document is kept as an order-preserving JSON map so every key this
//! module does not know about is written back exactly where it was. The keys
//! the wizard reads or writes get typed accessors instead.

use crate::{
    constants::{RELAY_EXCLUDE_GLOBS, RELAY_SECTION_NAME},
    system::filesystem::Filesystem,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("The manifest is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("The manifest must contain a JSON object at its top level.")]
    NotAnObject,
    #[error("The '{0}' section of the manifest must be a JSON object.")]
    SectionNotAnObject(&'static str),
}

/// The `relay` section read by relay-compiler.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RelayConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eager_es_modules: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_directory: Option<String>,
    /// Keys relay-compiler understands that the wizard never touches.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl RelayConfig {
    pub fn default_exclude() -> Vec<String> {
        RELAY_EXCLUDE_GLOBS.iter().map(|g| g.to_string()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PackageManifest {
    document: Map<String, Value>,
}

impl PackageManifest {
    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        match serde_json::from_str::<Value>(content)? {
            Value::Object(document) => Ok(Self { document }),
            _ => Err(ManifestError::NotAnObject),
        }
    }

    /// Reads and parses the manifest at `path`, treating any failure as "no manifest".
    /// Used where the manifest only feeds a default.
    pub fn load_lenient(fs: &dyn Filesystem, path: &Path) -> Option<Self> {
        let content = fs
            .read_to_string(path)
            .map_err(|e| log::debug!("Could not read '{}': {}", path.display(), e))
            .ok()?;
        Self::parse(&content)
            .map_err(|e| log::debug!("Could not parse '{}': {}", path.display(), e))
            .ok()
    }

    /// Serializes with 2-space indentation and a trailing newline.
    pub fn to_pretty_string(&self) -> Result<String, ManifestError> {
        let mut serialized = serde_json::to_string_pretty(&self.document)?;
        serialized.push('\n');
        Ok(serialized)
    }

    /// Whether `name` is listed in `dependencies` or `devDependencies`.
    pub fn has_dependency(&self, name: &str) -> bool {
        ["dependencies", "devDependencies"].iter().any(|section| {
            self.document
                .get(*section)
                .and_then(Value::as_object)
                .is_some_and(|deps| deps.contains_key(name))
        })
    }

    /// Returns the script, if present and a string.
    pub fn script(&self, name: &str) -> Option<&str> {
        self.document
            .get("scripts")
            .and_then(Value::as_object)
            .and_then(|scripts| scripts.get(name))
            .and_then(Value::as_str)
    }

    pub fn set_script(&mut self, name: &str, command: String) -> Result<(), ManifestError> {
        let scripts = self
            .document
            .entry("scripts")
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or(ManifestError::SectionNotAnObject("scripts"))?;
        scripts.insert(name.to_string(), Value::String(command));
        Ok(())
    }

    pub fn relay_config(&self) -> Result<RelayConfig, ManifestError> {
        match self.document.get(RELAY_SECTION_NAME) {
            None => Ok(RelayConfig::default()),
            Some(section @ Value::Object(_)) => Ok(RelayConfig::deserialize(section)?),
            Some(_) => Err(ManifestError::SectionNotAnObject(RELAY_SECTION_NAME)),
        }
    }

    /// Replaces the `relay` section, keeping its position if it already existed.
    pub fn set_relay_config(&mut self, config: &RelayConfig) -> Result<(), ManifestError> {
        let value = serde_json::to_value(config)?;
        self.document.insert(RELAY_SECTION_NAME.to_string(), value);
        Ok(())
    }
}
