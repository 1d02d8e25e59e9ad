//! Handling of a project directory that already exists.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::prompt::Prompter;

/// Decision taken for the target directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The target is free, either untouched or removed after confirmation.
    Proceed,
    /// The user declined to overwrite; nothing was changed.
    Cancel,
}

/// Gates the removal of an existing `target` behind a confirmation.
///
/// A missing target proceeds without asking. When it exists, the user is
/// asked (default "no"); on "yes" the whole tree is removed before returning.
///
/// # Arguments
/// * `prompt` - Prompter used for the confirmation
/// * `target` - Project directory about to be created
/// * `force` - Answer "yes" without asking
pub fn check_conflict(prompt: &dyn Prompter, target: &Path, force: bool) -> Result<Resolution> {
    if !target.exists() {
        return Ok(Resolution::Proceed);
    }

    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| target.display().to_string());
    let overwrite =
        prompt.confirm(force, format!("Directory {name} already exists. Overwrite?"))?;
    if !overwrite {
        debug!("Keeping existing directory '{}'.", target.display());
        return Ok(Resolution::Cancel);
    }

    debug!("Removing existing directory '{}'.", target.display());
    if target.is_dir() {
        fs::remove_dir_all(target).map_err(Error::fs(target))?;
    } else {
        fs::remove_file(target).map_err(Error::fs(target))?;
    }
    Ok(Resolution::Proceed)
}
