mod common;

use std::fs;

use common::{write, RecordingRunner};
use gnome_ext::error::Error;
use gnome_ext::tasks::{self, DevOptions};
use gnome_ext::template::BuildSystem;
use tempfile::TempDir;

const METADATA: &str = r#"{
  "name": "My Cool Ext",
  "description": "My Cool Ext GNOME Shell extension",
  "uuid": "gnome-shell-extension-my-cool-ext",
  "shell-version": ["45", "46", "47", "48"],
  "url": ""
}
"#;

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "package.json", "{}\n");
    dir
}

#[test]
fn test_commands_require_project() {
    let dir = TempDir::new().unwrap();
    let runner = RecordingRunner::default();

    assert!(matches!(
        tasks::build(dir.path(), false, &runner),
        Err(Error::NotAnExtensionProjectError { .. })
    ));
    assert!(matches!(
        tasks::pack(dir.path(), &runner),
        Err(Error::NotAnExtensionProjectError { .. })
    ));
    assert!(matches!(
        tasks::install(dir.path(), &runner),
        Err(Error::NotAnExtensionProjectError { .. })
    ));
    assert!(matches!(
        tasks::dev(dir.path(), &DevOptions::default(), &runner),
        Err(Error::NotAnExtensionProjectError { .. })
    ));
    assert!(runner.commands.borrow().is_empty());
}

#[test]
fn test_build_prefers_project_helpers() {
    let dir = project();
    write(dir.path(), "esbuild.js", "// bundle\n");
    let runner = RecordingRunner::default();

    tasks::build(dir.path(), false, &runner).unwrap();
    assert_eq!(runner.command_lines(), ["node esbuild.js"]);
    assert_eq!(tasks::detect_build_system(dir.path()), BuildSystem::Bundler);

    write(dir.path(), "scripts/build.sh", "#!/bin/bash\n");
    let runner = RecordingRunner::default();
    tasks::build(dir.path(), true, &runner).unwrap();
    assert_eq!(
        runner.command_lines(),
        [
            "bash scripts/build.sh",
            "npx nodemon --watch src -e ts,json --exec npm run build",
        ]
    );
}

#[test]
fn test_build_fallback_copies_metadata_and_assets() {
    let dir = project();
    write(dir.path(), "src/metadata.json", METADATA);
    write(dir.path(), "src/assets/icons/icon.svg", "<svg/>\n");
    let runner = RecordingRunner::default();

    tasks::build(dir.path(), false, &runner).unwrap();

    assert_eq!(runner.command_lines(), ["npx tsc"]);
    assert_eq!(runner.commands.borrow()[0].cwd, dir.path());
    assert_eq!(fs::read_to_string(dir.path().join("dist/metadata.json")).unwrap(), METADATA);
    assert!(dir.path().join("dist/assets/icons/icon.svg").is_file());
    assert_eq!(tasks::detect_build_system(dir.path()), BuildSystem::Compiler);
}

#[test]
fn test_build_reports_tool_failure() {
    let dir = project();
    let runner = RecordingRunner::failing();

    assert!(matches!(
        tasks::build(dir.path(), false, &runner),
        Err(Error::ProcessError { .. })
    ));
}

#[test]
fn test_pack_fallback_renames_archive() {
    let dir = project();
    let runner = RecordingRunner::default();

    assert!(matches!(tasks::pack(dir.path(), &runner), Err(Error::MetadataError(_))));

    write(dir.path(), "dist/metadata.json", METADATA);
    write(dir.path(), "gnome-shell-extension-my-cool-ext.shell-extension.zip", "zip");

    let archive = tasks::pack(dir.path(), &runner).unwrap();

    let expected = dir.path().join("gnome-shell-extension-my-cool-ext.zip");
    assert_eq!(archive, Some(expected.clone()));
    assert!(expected.is_file());
    assert_eq!(runner.command_lines(), ["gnome-extensions pack dist --force --out-dir ."]);
}

#[test]
fn test_pack_uses_helper_script() {
    let dir = project();
    write(dir.path(), "scripts/pack.sh", "#!/bin/bash\n");
    let runner = RecordingRunner::default();

    assert_eq!(tasks::pack(dir.path(), &runner).unwrap(), None);
    assert_eq!(runner.command_lines(), ["bash scripts/pack.sh"]);
}

#[test]
fn test_install_finds_archive() {
    let dir = project();
    let runner = RecordingRunner::default();

    assert!(matches!(tasks::install(dir.path(), &runner), Err(Error::MetadataError(_))));

    write(dir.path(), "dist/other.zip", "zip");
    assert_eq!(tasks::find_archive(dir.path()), Some(dir.path().join("dist/other.zip")));

    write(dir.path(), "src/metadata.json", METADATA);
    write(dir.path(), "gnome-shell-extension-my-cool-ext.zip", "zip");
    tasks::install(dir.path(), &runner).unwrap();

    assert_eq!(
        runner.command_lines(),
        ["gnome-extensions install --force gnome-shell-extension-my-cool-ext.zip"]
    );
}

#[test]
fn test_install_uses_helper_script() {
    let dir = project();
    write(dir.path(), "scripts/install.sh", "#!/bin/bash\n");
    let runner = RecordingRunner::default();

    tasks::install(dir.path(), &runner).unwrap();
    assert_eq!(runner.command_lines(), ["bash scripts/install.sh"]);
}

#[test]
fn test_dev_options_validation() {
    assert!(tasks::validate_dev_options(&DevOptions::default()).is_ok());

    let options = DevOptions { resolution: "1920 by 1080".to_string(), ..Default::default() };
    assert!(matches!(tasks::validate_dev_options(&options), Err(Error::ValidationError(_))));

    let options = DevOptions { monitors: 0, ..Default::default() };
    assert!(matches!(tasks::validate_dev_options(&options), Err(Error::ValidationError(_))));
}

#[test]
fn test_dev_generates_missing_script() {
    let dir = project();
    write(dir.path(), "src/metadata.json", METADATA);
    let runner = RecordingRunner::default();
    let options = DevOptions { resolution: "1280x720".to_string(), watch: false, monitors: 2 };

    tasks::dev(dir.path(), &options, &runner).unwrap();

    let script = fs::read_to_string(dir.path().join("scripts/dev.sh")).unwrap();
    assert!(script.contains("EXTENSION_UUID=gnome-shell-extension-my-cool-ext\n"));
    assert!(script.contains("npm run rebuild && npm run pack"));
    assert_eq!(runner.command_lines(), ["bash scripts/dev.sh 1280x720 2"]);
}

#[test]
fn test_dev_watch_wraps_script() {
    let dir = project();
    write(dir.path(), "scripts/dev.sh", "#!/bin/bash\n");
    let runner = RecordingRunner::default();
    let options = DevOptions { watch: true, ..Default::default() };

    tasks::dev(dir.path(), &options, &runner).unwrap();

    assert_eq!(
        runner.command_lines(),
        ["npx nodemon --watch src -e ts,json --exec bash scripts/dev.sh 1920x1080 1"]
    );
    assert_eq!(fs::read_to_string(dir.path().join("scripts/dev.sh")).unwrap(), "#!/bin/bash\n");
}

#[test]
fn test_dev_without_metadata_fails() {
    let dir = project();
    let runner = RecordingRunner::default();

    assert!(matches!(
        tasks::dev(dir.path(), &DevOptions::default(), &runner),
        Err(Error::MetadataError(_))
    ));
    assert!(runner.commands.borrow().is_empty());
}
