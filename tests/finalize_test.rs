mod common;

use std::fs;

use common::{RecordingRunner, StubPackages, StubVcs};
use gnome_ext::finalize::{
    finalize, GitVersionControl, NpmPackageManager, PackageManager, StepOutcome,
};
use tempfile::TempDir;

#[test]
fn test_both_steps_succeed() {
    let temp_dir = TempDir::new().unwrap();
    let vcs = StubVcs::default();
    let packages = StubPackages::default();

    let report = finalize(temp_dir.path(), true, true, &vcs, &packages);

    assert_eq!(report.version_control, StepOutcome::Succeeded);
    assert_eq!(report.dependencies, StepOutcome::Succeeded);
    assert_eq!(
        fs::read_to_string(temp_dir.path().join(".gitignore")).unwrap(),
        "node_modules/\ndist/\n*.zip\n"
    );
}

#[test]
fn test_failures_are_recorded_independently() {
    let temp_dir = TempDir::new().unwrap();
    let vcs = StubVcs { fail: true, ..Default::default() };
    let packages = StubPackages::default();

    let report = finalize(temp_dir.path(), true, true, &vcs, &packages);

    assert!(report.version_control.is_failed());
    assert_eq!(report.dependencies, StepOutcome::Succeeded);
    assert_eq!(packages.calls.get(), 1);
    assert!(!temp_dir.path().join(".gitignore").exists());

    let vcs = StubVcs::default();
    let packages = StubPackages { fail: true, ..Default::default() };
    let report = finalize(temp_dir.path(), true, true, &vcs, &packages);

    assert_eq!(report.version_control, StepOutcome::Succeeded);
    match report.dependencies {
        StepOutcome::Failed(reason) => assert!(reason.contains("npm install")),
        other => panic!("Expected a failed install, got {other:?}"),
    }
}

#[test]
fn test_disabled_steps_are_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let vcs = StubVcs::default();
    let packages = StubPackages::default();

    let report = finalize(temp_dir.path(), false, false, &vcs, &packages);

    assert_eq!(report.version_control, StepOutcome::Skipped);
    assert_eq!(report.dependencies, StepOutcome::Skipped);
    assert_eq!(vcs.calls.get(), 0);
    assert_eq!(packages.calls.get(), 0);
    assert!(!temp_dir.path().join(".gitignore").exists());
}

#[test]
fn test_git_repository_is_created() {
    let temp_dir = TempDir::new().unwrap();
    let packages = StubPackages::default();

    let report = finalize(temp_dir.path(), true, false, &GitVersionControl, &packages);

    assert_eq!(report.version_control, StepOutcome::Succeeded);
    assert!(temp_dir.path().join(".git").is_dir());
    assert!(temp_dir.path().join(".gitignore").is_file());
}

#[test]
fn test_npm_install_runs_in_project() {
    let temp_dir = TempDir::new().unwrap();
    let runner = RecordingRunner::default();

    NpmPackageManager::new("pnpm", &runner).install(temp_dir.path()).unwrap();

    let commands = runner.commands.borrow();
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].to_string(), "pnpm install");
    assert_eq!(commands[0].cwd, temp_dir.path());
}
