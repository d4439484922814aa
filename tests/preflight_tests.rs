#![cfg(unix)]

mod common;

use common::*;
use predicates::prelude::*;

const MANIFEST: &str = r#"{"dependencies": {"@nrwl/workspace": "15.9.0"}}"#;

#[test]
fn test_old_nx_fails_without_writing() {
    let project = Project::new(MANIFEST, "v15.9.0");

    project
        .run(&[])
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Nx version is too old"))
        .stdout(predicate::str::contains("nx migrate latest"));

    assert_eq!(project.manifest(), MANIFEST);
    assert!(!project.installed());
}

#[test]
fn test_force_skips_version_check() {
    let project = Project::new(MANIFEST, "v15.9.0");

    project.run(&["--force", "--skip-install"]).success();

    assert!(project.manifest().contains("@nx/workspace"));
}

#[test]
fn test_nx_not_installed_locally() {
    let project = Project::new(MANIFEST, "Not found");

    project
        .run(&[])
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Nx is not installed locally"))
        .stdout(predicate::str::contains("npm i --save-dev nx"));

    assert_eq!(project.manifest(), MANIFEST);
}

#[test]
fn test_force_skips_install_check() {
    let project = Project::new(MANIFEST, "Not found");

    project.run(&["--force", "--dry-run"]).success();
}

#[test]
fn test_missing_manifest() {
    let project = Project::without_manifest("v16.0.0");

    project
        .run(&[])
        .failure()
        .code(1)
        .stdout(predicate::str::contains("No package.json found"))
        .stdout(predicate::str::contains("npm init -y"));

    assert!(!project.manifest_path().exists());
}

#[test]
fn test_malformed_manifest() {
    let project = Project::new("{ \"dependencies\": ", "v16.0.0");

    project
        .run(&[])
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Error parsing package.json"));

    assert!(!project.installed());
}

#[test]
fn test_missing_nx_binary_is_fatal() {
    let project = Project::new(MANIFEST, "v16.0.0");
    project.remove_nx();

    // Keep only the fixture's bin dir so a real `nx` cannot be picked up.
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("nx-rescope");
    cmd.env("PATH", project.root().join("bin"))
        .env("NO_COLOR", "1")
        .current_dir(project.root())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Failed to query the Nx version"));

    assert_eq!(project.manifest(), MANIFEST);
}

#[test]
fn test_unexpected_nx_output_is_fatal() {
    let project = Project::new(MANIFEST, "v16.0.0");
    project.write_script("nx", "echo 16.0.0");

    project
        .run(&[])
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Unexpected `nx --version` output"));

    assert_eq!(project.manifest(), MANIFEST);
}
