//! Shared fixtures for the CLI tests.
//!
//! Each fixture is a temporary project directory holding a `package.json`,
//! a `package-lock.json` (so npm is detected) and a `bin/` directory with
//! fake `nx` and `npm` executables that is put first on `PATH`.

#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Marker written by the fake `npm` when it is invoked.
pub const INSTALL_LOG: &str = "install.log";

pub struct Project {
    pub temp: TempDir,
}

impl Project {
    /// Project with `manifest` as its package.json and Nx `local_version`.
    pub fn new(manifest: &str, local_version: &str) -> Self {
        let project = Self::without_manifest(local_version);
        fs::write(project.manifest_path(), manifest).unwrap();
        project
    }

    pub fn without_manifest(local_version: &str) -> Self {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package-lock.json"), "{}").unwrap();
        fs::create_dir(temp.path().join("bin")).unwrap();

        let project = Self { temp };
        project.write_script(
            "nx",
            &format!(
                "printf 'Nx Version:\\n- Local: {}\\n- Global: Not found\\n'",
                local_version
            ),
        );
        project.write_script("npm", &format!("echo \"$@\" > {}", INSTALL_LOG));
        project
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root().join("package.json")
    }

    pub fn manifest(&self) -> String {
        fs::read_to_string(self.manifest_path()).unwrap()
    }

    pub fn installed(&self) -> bool {
        self.root().join(INSTALL_LOG).exists()
    }

    /// Replaces the fake `npm` with one that fails printing `stderr`.
    pub fn failing_install(&self, stderr: &str) {
        self.write_script("npm", &format!("echo '{}' >&2\nexit 1", stderr));
    }

    /// Removes the fake `nx` executable.
    pub fn remove_nx(&self) {
        fs::remove_file(self.root().join("bin/nx")).unwrap();
    }

    pub fn write_script(&self, name: &str, body: &str) {
        let path = self.root().join("bin").join(name);
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
    }

    /// Runs `nx-rescope` in the project with the fake tools on `PATH`.
    pub fn run(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        let path = format!(
            "{}:{}",
            self.root().join("bin").display(),
            std::env::var("PATH").unwrap_or_default()
        );

        let mut cmd = cargo_bin_cmd!("nx-rescope");
        cmd.args(args)
            .env("PATH", path)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .current_dir(self.root());

        cmd.assert()
    }
}
