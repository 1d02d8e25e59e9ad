//! Optional steps run after the project tree exists.
//!
//! Failures here are recorded in the [`FinalizeReport`] and printed as
//! warnings; they never fail the command.

use std::fs;
use std::path::Path;

use log::debug;

use crate::constants::GITIGNORE;
use crate::error::{Error, Result};
use crate::output;
use crate::process::{CommandRunner, ExternalCommand, SystemRunner};

/// Initializes version control in a directory.
pub trait VersionControl {
    fn init(&self, dir: &Path) -> Result<()>;
}

/// Installs the dependencies declared by a project.
pub trait PackageManager {
    fn install(&self, dir: &Path) -> Result<()>;
}

/// Creates a git repository with libgit2.
#[derive(Debug, Default)]
pub struct GitVersionControl;

impl VersionControl for GitVersionControl {
    fn init(&self, dir: &Path) -> Result<()> {
        git2::Repository::init(dir)?;
        Ok(())
    }
}

/// Installs dependencies by running `<program> install` in the project.
pub struct NpmPackageManager<'a> {
    program: String,
    runner: &'a dyn CommandRunner,
}

impl<'a> NpmPackageManager<'a> {
    pub fn new<S: Into<String>>(program: S, runner: &'a dyn CommandRunner) -> Self {
        Self { program: program.into(), runner }
    }
}

impl Default for NpmPackageManager<'static> {
    fn default() -> Self {
        NpmPackageManager::new("npm", &SystemRunner)
    }
}

impl PackageManager for NpmPackageManager<'_> {
    fn install(&self, dir: &Path) -> Result<()> {
        self.runner.run(&ExternalCommand::new(&self.program, dir).arg("install"))
    }
}

/// Result of one optional step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Succeeded,
    Skipped,
    Failed(String),
}

impl StepOutcome {
    fn from_result(result: Result<()>) -> Self {
        match result {
            Ok(()) => StepOutcome::Succeeded,
            Err(e) => StepOutcome::Failed(e.to_string()),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StepOutcome::Failed(_))
    }
}

/// Outcomes of the optional steps, recorded independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizeReport {
    pub version_control: StepOutcome,
    pub dependencies: StepOutcome,
}

fn init_repository(vcs: &dyn VersionControl, target: &Path) -> Result<()> {
    vcs.init(target)?;
    let ignore_file = target.join(".gitignore");
    fs::write(&ignore_file, GITIGNORE).map_err(Error::fs(&ignore_file))
}

/// Runs version-control initialization and dependency installation.
///
/// # Arguments
/// * `target` - Materialized project directory
/// * `init_git` - Whether to initialize a repository and write `.gitignore`
/// * `install_deps` - Whether to install dependencies
pub fn finalize(
    target: &Path,
    init_git: bool,
    install_deps: bool,
    vcs: &dyn VersionControl,
    packages: &dyn PackageManager,
) -> FinalizeReport {
    let version_control = if init_git {
        let outcome = StepOutcome::from_result(init_repository(vcs, target));
        match &outcome {
            StepOutcome::Failed(reason) => {
                debug!("git init failed: {}", reason);
                output::warning("Failed to initialize git repository");
            }
            _ => output::success("Initialized git repository"),
        }
        outcome
    } else {
        StepOutcome::Skipped
    };

    let dependencies = if install_deps {
        output::info("\nInstalling dependencies...");
        let outcome = StepOutcome::from_result(packages.install(target));
        match &outcome {
            StepOutcome::Failed(reason) => {
                debug!("dependency install failed: {}", reason);
                output::warning("Failed to install dependencies");
            }
            _ => output::success("Dependencies installed"),
        }
        outcome
    } else {
        StepOutcome::Skipped
    };

    FinalizeReport { version_control, dependencies }
}
