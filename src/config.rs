//! Extension identity and the identifiers derived from its name.
//! Every generated file reads the same [`ExtensionConfig`], built once per run.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::constants::{CLASS_SUFFIX, DESCRIPTION_SUFFIX, UUID_PREFIX};
use crate::error::{Error, Result};

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

static WORD_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-_]+").expect("valid separator pattern"));

static NON_SCHEMA_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9.]").expect("valid schema pattern"));

/// Rendering context shared by templates and built-in generators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionConfig {
    /// Name as supplied by the user.
    pub name: String,
    /// Target directory and package name.
    pub dir_name: String,
    pub uuid: String,
    pub description: String,
    /// Exported class of the primary source file.
    pub class_name: String,
    /// Settings namespace key declared in the metadata descriptor.
    pub settings_schema: String,
}

/// Checks that an extension name is usable.
///
/// # Errors
/// * `Error::ValidationError` if the name is empty after trimming
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::ValidationError("Name is required".to_string()));
    }
    Ok(())
}

/// Lower-cases the name and collapses every whitespace run into one hyphen.
pub fn dir_name(name: &str) -> String {
    WHITESPACE_RUN.replace_all(&name.to_lowercase(), "-").into_owned()
}

/// Default UUID for a directory name.
pub fn default_uuid(dir_name: &str) -> String {
    format!("{UUID_PREFIX}-{dir_name}")
}

/// Default description for an extension name.
pub fn default_description(name: &str) -> String {
    format!("{name} {DESCRIPTION_SUFFIX}")
}

/// Builds the class name by upper-casing the first letter of each word.
///
/// Words are separated by runs of whitespace, hyphens and underscores. The
/// remaining letters of each word keep their original case.
pub fn class_name(name: &str) -> String {
    let mut class_name: String = WORD_SEPARATOR
        .split(name)
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect();
    class_name.push_str(CLASS_SUFFIX);
    class_name
}

/// Replaces every character outside `[a-zA-Z0-9.]` with a dot and lower-cases the result.
pub fn settings_schema(uuid: &str) -> String {
    NON_SCHEMA_CHAR.replace_all(uuid, ".").to_lowercase()
}

impl ExtensionConfig {
    /// Derives the full extension identity from a name and optional answers.
    ///
    /// An explicit `uuid` is used verbatim; the settings key is derived from
    /// whichever UUID ends up in the config.
    ///
    /// # Errors
    /// * `Error::ValidationError` if `name` is blank
    pub fn derive(
        name: &str,
        uuid: Option<&str>,
        description: Option<&str>,
    ) -> Result<Self> {
        validate_name(name)?;

        let dir_name = dir_name(name);
        let uuid = match uuid {
            Some(uuid) => uuid.to_string(),
            None => default_uuid(&dir_name),
        };
        let description = match description {
            Some(description) => description.to_string(),
            None => default_description(name),
        };

        Ok(Self {
            name: name.to_string(),
            class_name: class_name(name),
            settings_schema: settings_schema(&uuid),
            dir_name,
            uuid,
            description,
        })
    }
}
