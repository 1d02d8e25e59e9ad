//! Build, pack, install and dev commands for a generated project.
//!
//! Each command prefers the project's own helper (script or bundler config)
//! and otherwise falls back to calling the external tools directly.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use walkdir::WalkDir;

use crate::constants::PACKAGE_JSON;
use crate::error::{Error, Result};
use crate::generators;
use crate::metadata::Metadata;
use crate::output;
use crate::processor::write_script;
use crate::process::{CommandRunner, ExternalCommand};
use crate::template::BuildSystem;

static RESOLUTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+x\d+$").expect("valid resolution pattern"));

/// Options of the `dev` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevOptions {
    pub resolution: String,
    pub watch: bool,
    pub monitors: u8,
}

impl Default for DevOptions {
    fn default() -> Self {
        Self { resolution: "1920x1080".to_string(), watch: false, monitors: 1 }
    }
}

/// Fails unless `project_dir` holds a `package.json`.
pub fn ensure_project(project_dir: &Path) -> Result<()> {
    if !project_dir.join(PACKAGE_JSON).is_file() {
        return Err(Error::NotAnExtensionProjectError {
            project_dir: project_dir.display().to_string(),
        });
    }
    Ok(())
}

fn bash(project_dir: &Path, script: &str) -> ExternalCommand {
    ExternalCommand::new("bash", project_dir).arg(script)
}

fn nodemon(project_dir: &Path, exec: &[&str]) -> ExternalCommand {
    ExternalCommand::new("npx", project_dir)
        .args(["nodemon", "--watch", "src", "-e", "ts,json", "--exec"])
        .args(exec.iter().copied())
}

/// Build system a generated project uses, judged by its bundler config.
pub fn detect_build_system(project_dir: &Path) -> BuildSystem {
    if project_dir.join("esbuild.js").is_file() {
        BuildSystem::Bundler
    } else {
        BuildSystem::Compiler
    }
}

/// Recursively copies `source` into `dest`.
fn copy_dir(source: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry.map_err(|e| Error::IoError(e.into()))?;
        let relative = entry.path().strip_prefix(source).unwrap_or(entry.path());
        let target = dest.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(Error::fs(&target))?;
        } else {
            fs::copy(entry.path(), &target).map_err(Error::fs(&target))?;
        }
    }
    Ok(())
}

/// Builds the project.
///
/// Uses `scripts/build.sh`, then the bundler config, then plain `tsc` with
/// the metadata and assets copied into `dist/`. With `watch`, hands over to
/// nodemon once the first build is done.
pub fn build(project_dir: &Path, watch: bool, runner: &dyn CommandRunner) -> Result<()> {
    ensure_project(project_dir)?;

    if project_dir.join("scripts/build.sh").is_file() {
        runner.run(&bash(project_dir, "scripts/build.sh"))?;
    } else if project_dir.join("esbuild.js").is_file() {
        runner.run(&ExternalCommand::new("node", project_dir).arg("esbuild.js"))?;
    } else {
        output::info("Building extension...");
        let dist = project_dir.join("dist");
        fs::create_dir_all(&dist).map_err(Error::fs(&dist))?;

        let metadata = project_dir.join("src/metadata.json");
        if metadata.is_file() {
            let dest = dist.join("metadata.json");
            fs::copy(&metadata, &dest).map_err(Error::fs(&dest))?;
        }
        let assets = project_dir.join("src/assets");
        if assets.is_dir() {
            copy_dir(&assets, &dist.join("assets"))?;
        }

        runner.run(&ExternalCommand::new("npx", project_dir).arg("tsc"))?;
        output::success("Build complete!");
    }

    if watch {
        output::info("Watching for changes...");
        runner.run(&nodemon(project_dir, &["npm run build"]))?;
    }
    Ok(())
}

/// Packages the project as `<uuid>.zip` and returns the archive path.
pub fn pack(project_dir: &Path, runner: &dyn CommandRunner) -> Result<Option<PathBuf>> {
    ensure_project(project_dir)?;
    output::info("Packaging extension...");

    if project_dir.join("esbuild.js").is_file() {
        runner.run(&ExternalCommand::new("node", project_dir).arg("esbuild.js"))?;
        return Ok(None);
    }
    if project_dir.join("scripts/pack.sh").is_file() {
        runner.run(&bash(project_dir, "scripts/pack.sh"))?;
        return Ok(None);
    }

    let dist = project_dir.join("dist");
    if !dist.is_dir() {
        return Err(Error::MetadataError(
            "dist directory not found, run the build command first".to_string(),
        ));
    }
    let metadata = Metadata::load(dist.join("metadata.json"))?;

    runner.run(
        &ExternalCommand::new("gnome-extensions", project_dir)
            .args(["pack", "dist", "--force", "--out-dir", "."]),
    )?;

    let produced = project_dir.join(format!("{}.shell-extension.zip", metadata.uuid));
    let archive = project_dir.join(format!("{}.zip", metadata.uuid));
    if produced.is_file() {
        fs::rename(&produced, &archive).map_err(Error::fs(&archive))?;
    }

    output::success(&format!("Package created: {}", archive.display()));
    output::line(&format!("Install with: gnome-extensions install {}", archive.display()));
    output::line(&format!("Enable with: gnome-extensions enable {}", metadata.uuid));
    Ok(Some(archive))
}

/// Finds the archive to install: `<uuid>.zip` in the project, else any zip in `dist/`.
pub fn find_archive(project_dir: &Path) -> Option<PathBuf> {
    let uuid = ["dist/metadata.json", "src/metadata.json"]
        .iter()
        .find_map(|candidate| Metadata::load(project_dir.join(candidate)).ok())
        .map(|metadata| metadata.uuid);
    if let Some(uuid) = uuid {
        let archive = project_dir.join(format!("{uuid}.zip"));
        if archive.is_file() {
            return Some(archive);
        }
    }

    let mut zips: Vec<PathBuf> = fs::read_dir(project_dir.join("dist"))
        .ok()?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "zip"))
        .collect();
    zips.sort();
    zips.into_iter().next()
}

/// Installs the packaged extension for the current user.
pub fn install(project_dir: &Path, runner: &dyn CommandRunner) -> Result<()> {
    ensure_project(project_dir)?;

    if project_dir.join("scripts/install.sh").is_file() {
        return runner.run(&bash(project_dir, "scripts/install.sh"));
    }

    output::info("Installing extension...");
    let archive = find_archive(project_dir).ok_or_else(|| {
        Error::MetadataError("no extension archive found, run the pack command first".to_string())
    })?;
    let archive = archive.strip_prefix(project_dir).unwrap_or(&archive);
    runner.run(
        &ExternalCommand::new("gnome-extensions", project_dir)
            .args(["install", "--force"])
            .arg(archive.display().to_string()),
    )?;
    output::success("Extension installed!");
    Ok(())
}

/// Checks the dev session options.
///
/// # Errors
/// * `Error::ValidationError` if the resolution is not `<width>x<height>` or no monitor is requested
pub fn validate_dev_options(options: &DevOptions) -> Result<()> {
    if !RESOLUTION.is_match(&options.resolution) {
        return Err(Error::ValidationError(format!(
            "resolution '{}' must look like 1920x1080",
            options.resolution
        )));
    }
    if options.monitors == 0 {
        return Err(Error::ValidationError("at least one monitor is required".to_string()));
    }
    Ok(())
}

/// Starts a nested GNOME Shell with the extension installed and enabled.
///
/// Writes `scripts/dev.sh` first when the project does not have one.
pub fn dev(project_dir: &Path, options: &DevOptions, runner: &dyn CommandRunner) -> Result<()> {
    ensure_project(project_dir)?;
    validate_dev_options(options)?;

    let script = project_dir.join("scripts/dev.sh");
    if !script.is_file() {
        output::info("Dev script not found, creating one...");
        let metadata = Metadata::load(project_dir.join("src/metadata.json"))?;
        let content = generators::dev_script(&metadata.uuid, detect_build_system(project_dir))?;
        write_script(&script, &content)?;
        debug!("Wrote '{}'.", script.display());
        output::success("Created dev.sh script");
    }

    let monitors = options.monitors.to_string();
    let command = if options.watch {
        output::info("Starting dev environment with file watching...");
        nodemon(project_dir, &["bash", "scripts/dev.sh", options.resolution.as_str(), monitors.as_str()])
    } else {
        output::info("Starting dev environment...");
        bash(project_dir, "scripts/dev.sh").args([options.resolution.as_str(), monitors.as_str()])
    };
    runner.run(&command)
}
