//! Package manager detection and command building.
//!
//! Detection looks for a lockfile in the working directory and its
//! ancestors. The `packageManager` field of the `package.json` next to the
//! lockfile (or in the working directory when there is no lockfile) takes
//! precedence over the lockfile itself.

use crate::error::{MigrateError, Result};
use crate::nx::coerce;
use crate::ops::MANIFEST_FILE;
use semver::Version;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Lockfiles in lookup order.
const LOCKS: &[(&str, Agent)] = &[
    ("bun.lockb", Agent::Bun),
    ("pnpm-lock.yaml", Agent::Pnpm),
    ("yarn.lock", Agent::Yarn),
    ("package-lock.json", Agent::Npm),
    ("npm-shrinkwrap.json", Agent::Npm),
];

/// A package manager flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Agent {
    #[default]
    Npm,
    Yarn,
    YarnBerry,
    Pnpm,
    /// pnpm before v7.
    Pnpm6,
    Bun,
}

/// Operations we ask of a package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentAction {
    Install,
}

impl Agent {
    /// Detects the package manager used by the project at `cwd`.
    pub fn detect(cwd: &Path) -> Option<Agent> {
        let lock = find_lockfile(cwd);
        let manifest_dir = lock
            .as_ref()
            .and_then(|(path, _)| path.parent())
            .unwrap_or(cwd);

        if let Some(agent) = from_package_manager_field(&manifest_dir.join(MANIFEST_FILE)) {
            log::debug!("Package manager from packageManager field: {}", agent);
            return Some(agent);
        }

        lock.map(|(path, agent)| {
            log::debug!("Package manager from lockfile {}: {}", path.display(), agent);
            agent
        })
    }

    /// Executable name.
    pub fn program(self) -> &'static str {
        match self {
            Agent::Npm => "npm",
            Agent::Yarn | Agent::YarnBerry => "yarn",
            Agent::Pnpm | Agent::Pnpm6 => "pnpm",
            Agent::Bun => "bun",
        }
    }

    /// Builds the command line for `action` with `args` appended.
    pub fn command(self, action: AgentAction, args: &[&str]) -> AgentCommand {
        let verb = match (self, action) {
            (Agent::Npm | Agent::Pnpm | Agent::Pnpm6, AgentAction::Install) => "i",
            (Agent::Yarn | Agent::YarnBerry | Agent::Bun, AgentAction::Install) => "install",
        };

        let mut full_args = vec![verb.to_string()];
        full_args.extend(args.iter().map(|arg| arg.to_string()));

        AgentCommand {
            program: self.program(),
            args: full_args,
        }
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Agent::YarnBerry => "yarn@berry",
            Agent::Pnpm6 => "pnpm@6",
            other => other.program(),
        };
        f.write_str(name)
    }
}

/// A package manager invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentCommand {
    program: &'static str,
    args: Vec<String>,
}

impl AgentCommand {
    pub fn program(&self) -> &str {
        self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command in `cwd`, capturing its output.
    pub fn run(&self, cwd: &Path) -> Result<()> {
        log::info!("Installing dependencies using: {}", self);

        let output = Command::new(self.program)
            .args(&self.args)
            .current_dir(cwd)
            .output()
            .map_err(|e| MigrateError::InstallFailed {
                command: self.to_string(),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            log::debug!("{} exited with {}", self, output.status);
            return Err(MigrateError::InstallFailed {
                command: self.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        Ok(())
    }
}

impl fmt::Display for AgentCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

fn find_lockfile(cwd: &Path) -> Option<(PathBuf, Agent)> {
    cwd.ancestors().find_map(|dir| {
        LOCKS.iter().find_map(|(name, agent)| {
            let path = dir.join(name);
            path.is_file().then_some((path, *agent))
        })
    })
}

/// Reads `packageManager` (`name@version`) from the manifest at `path`.
fn from_package_manager_field(path: &Path) -> Option<Agent> {
    let raw = fs::read_to_string(path).ok()?;
    let manifest: Value = serde_json::from_str(&raw).ok()?;
    let field = manifest.get("packageManager")?.as_str()?;
    parse_package_manager(field)
}

/// Maps a `packageManager` value such as `pnpm@8.6.0` to an agent.
pub fn parse_package_manager(field: &str) -> Option<Agent> {
    let (name, version) = match field.split_once('@') {
        Some((name, version)) => (name, coerce(version).ok().flatten()),
        None => (field, None),
    };

    let major = version.as_ref().map(|v: &Version| v.major);
    match name {
        "npm" => Some(Agent::Npm),
        "yarn" if major.is_some_and(|m| m > 1) => Some(Agent::YarnBerry),
        "yarn" => Some(Agent::Yarn),
        "pnpm" if major.is_some_and(|m| m < 7) => Some(Agent::Pnpm6),
        "pnpm" => Some(Agent::Pnpm),
        "bun" => Some(Agent::Bun),
        _ => None,
    }
}
