//! Serde models of the generated project's descriptors.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::ExtensionConfig;
use crate::constants::SHELL_VERSIONS;
use crate::error::{Error, Result};

/// `metadata.json`, read by GNOME Shell when loading the extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub name: String,
    pub description: String,
    pub uuid: String,
    #[serde(rename = "shell-version")]
    pub shell_version: Vec<String>,
    #[serde(rename = "settings-schema", default, skip_serializing_if = "Option::is_none")]
    pub settings_schema: Option<String>,
    #[serde(default)]
    pub url: String,
}

impl Metadata {
    pub fn from_config(config: &ExtensionConfig) -> Self {
        Self {
            name: config.name.clone(),
            description: config.description.clone(),
            uuid: config.uuid.clone(),
            shell_version: SHELL_VERSIONS.iter().map(|v| v.to_string()).collect(),
            settings_schema: Some(config.settings_schema.clone()),
            url: String::new(),
        }
    }

    /// Reads a metadata descriptor from disk.
    ///
    /// # Errors
    /// * `Error::MetadataError` if the file is missing, malformed or has an empty `uuid`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::MetadataError(format!("cannot read '{}': {}", path.display(), e))
        })?;
        let metadata: Metadata = serde_json::from_str(&content).map_err(|e| {
            Error::MetadataError(format!("invalid '{}': {}", path.display(), e))
        })?;
        if metadata.uuid.trim().is_empty() {
            return Err(Error::MetadataError(format!(
                "no uuid found in '{}'",
                path.display()
            )));
        }
        Ok(metadata)
    }
}

/// `package.json` of the generated project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageJson {
    pub name: String,
    pub version: String,
    pub description: String,
    #[serde(rename = "type")]
    pub module_type: String,
    pub scripts: IndexMap<String, String>,
    #[serde(rename = "devDependencies")]
    pub dev_dependencies: IndexMap<String, String>,
}
