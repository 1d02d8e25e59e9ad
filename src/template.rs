//! Template variants and the lookup of their template directories.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::debug;

use crate::constants::TEMPLATES_DIR_ENV;
use crate::error::{Error, Result};

/// Extension archetype selecting the generated source and UI scaffolding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Basic,
    Indicator,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Basic, Variant::Indicator];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Basic => "basic",
            Variant::Indicator => "indicator",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Variant::Basic),
            "indicator" => Ok(Variant::Indicator),
            other => Err(format!("unknown template variant '{other}'")),
        }
    }
}

/// How the generated project turns TypeScript into an installable extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildSystem {
    /// esbuild bundles and zips in one step.
    Bundler,
    /// Plain `tsc` plus shell helpers for building and packing.
    Compiler,
}

impl BuildSystem {
    pub fn is_bundler(&self) -> bool {
        matches!(self, BuildSystem::Bundler)
    }
}

/// A resolved template variant.
///
/// `dir` is `None` when no templates root is installed, in which case every
/// file comes from the built-in generators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateHandle {
    pub variant: Variant,
    pub dir: Option<PathBuf>,
}

impl TemplateHandle {
    /// Handle that relies on built-in generators only.
    pub fn builtin(variant: Variant) -> Self {
        Self { variant, dir: None }
    }

    /// Path of `relative` inside the template directory, if it exists.
    pub fn file(&self, relative: &str) -> Option<PathBuf> {
        let path = self.dir.as_ref()?.join(relative);
        path.is_file().then_some(path)
    }
}

/// Candidate templates roots relative to the installed executable.
fn install_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(exe) = std::env::current_exe() {
        if let Some(exe_dir) = exe.parent() {
            candidates.push(exe_dir.join("templates"));
            candidates.push(exe_dir.join("..").join("share").join("gnome-ext").join("templates"));
        }
    }
    candidates.push(Path::new(env!("CARGO_MANIFEST_DIR")).join("templates"));
    candidates
}

/// Locates the templates root.
///
/// An explicit directory wins and is returned even if it does not exist, so
/// that the resolver reports where it looked. Otherwise the environment
/// override and the install-relative candidates are tried in order.
pub fn templates_root(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(dir) = explicit {
        return Some(dir.to_path_buf());
    }
    if let Some(dir) = std::env::var_os(TEMPLATES_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    install_candidates().into_iter().find(|candidate| candidate.is_dir())
}

/// Resolves the requested variant to its template directory.
///
/// # Arguments
/// * `templates_root` - Root holding one directory per variant, if any
/// * `requested` - Variant name as given by the user
///
/// # Errors
/// * `Error::TemplateNotFoundError` if the name is not a known variant, or the
///   root exists but has no directory for it
pub fn resolve_template(templates_root: Option<&Path>, requested: &str) -> Result<TemplateHandle> {
    let searched_path = match templates_root {
        Some(root) => root.join(requested).display().to_string(),
        None => "<built-in templates>".to_string(),
    };
    let not_found = || Error::TemplateNotFoundError {
        variant: requested.to_string(),
        searched_path: searched_path.clone(),
    };

    let variant: Variant = requested.parse().map_err(|_| not_found())?;

    match templates_root {
        Some(root) => {
            let dir = root.join(variant.as_str());
            if !dir.is_dir() {
                return Err(not_found());
            }
            debug!("Using template directory '{}'.", dir.display());
            Ok(TemplateHandle { variant, dir: Some(dir) })
        }
        None => {
            debug!("No templates root found, using built-in generators.");
            Ok(TemplateHandle::builtin(variant))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_round_trips_through_names() {
        for variant in Variant::ALL {
            assert_eq!(variant.as_str().parse::<Variant>(), Ok(variant));
        }
        assert!("widget".parse::<Variant>().is_err());
    }

    #[test]
    fn test_explicit_root_is_returned_even_if_missing() {
        let root = templates_root(Some(Path::new("/definitely/missing")));
        assert_eq!(root, Some(PathBuf::from("/definitely/missing")));
    }
}
