//! Adapter for the `nx --version` command.
//!
//! The expected output has three lines; the second and third carry the
//! local and global installation as `<label>: <version>`, where the version
//! is `Not found` when that installation does not exist:
//!
//! ```text
//! Nx Version:
//! - Local: v16.5.0
//! - Global: Not found
//! ```
//!
//! Any other shape is a parse error rather than a guess.

use crate::error::{MigrateError, Result};
use regex::Regex;
use semver::Version;
use std::path::Path;
use std::process::Command;

/// First release that publishes plugins under the new scopes.
pub const MIN_NX_VERSION: Version = Version::new(16, 0, 0);

const NOT_FOUND: &str = "Not found";

const VERSION_PATTERN: &str = r"(\d+)(?:\.(\d+))?(?:\.(\d+))?";

/// Installed Nx versions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NxVersion {
    pub local: Option<Version>,
    pub global: Option<Version>,
}

impl NxVersion {
    /// Runs `nx --version` in `cwd` and parses its output.
    pub fn query(cwd: &Path) -> Result<Self> {
        log::debug!("Running `nx --version` in {}", cwd.display());

        let output = Command::new("nx")
            .arg("--version")
            .current_dir(cwd)
            .output()
            .map_err(|e| MigrateError::NxQuery(format!("could not run `nx`: {}", e)))?;

        if !output.status.success() {
            return Err(MigrateError::NxQuery(format!(
                "`nx --version` exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let version = Self::parse(&stdout)?;
        log::debug!("Nx versions: {:?}", version);
        Ok(version)
    }

    /// Parses the text printed by `nx --version`.
    pub fn parse(stdout: &str) -> Result<Self> {
        let lines: Vec<&str> = stdout.lines().collect();

        let local = version_field(&lines, 1, "local")?;
        let global = version_field(&lines, 2, "global")?;

        Ok(Self {
            local: local.map(coerce).transpose()?.flatten(),
            global: global.map(coerce).transpose()?.flatten(),
        })
    }
}

/// Value of the `label: value` line at `index`, `None` for `Not found`.
fn version_field<'a>(lines: &[&'a str], index: usize, scope: &str) -> Result<Option<&'a str>> {
    let line = lines.get(index).ok_or_else(|| {
        MigrateError::NxVersionParse(format!(
            "missing {} version line (expected at least {} lines, got {})",
            scope,
            index + 1,
            lines.len()
        ))
    })?;

    let (_, value) = line.split_once(": ").ok_or_else(|| {
        MigrateError::NxVersionParse(format!(
            "{} version line is not `label: value`: {:?}",
            scope, line
        ))
    })?;

    let value = value.trim();
    Ok((value != NOT_FOUND).then_some(value))
}

/// Extracts the first `major[.minor[.patch]]` run from `text`.
///
/// Missing components default to zero, so `v16` becomes `16.0.0`. Returns
/// `Ok(None)` when `text` holds no digits at all.
pub fn coerce(text: &str) -> Result<Option<Version>> {
    let re = Regex::new(VERSION_PATTERN)?;

    let Some(caps) = re.captures(text) else {
        return Ok(None);
    };

    let part = |idx: usize| -> Option<u64> {
        caps.get(idx)
            .map_or(Some(0), |m| m.as_str().parse::<u64>().ok())
    };

    Ok(match (part(1), part(2), part(3)) {
        (Some(major), Some(minor), Some(patch)) => Some(Version::new(major, minor, patch)),
        _ => None,
    })
}
