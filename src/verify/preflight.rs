//! Pre-flight checks performed before touching the manifest.
//!
//! These gates run in a fixed order and stop at the first failure. The two
//! Nx checks are bypassed by `--force`; the manifest check never is.

use crate::agent::{Agent, AgentAction};
use crate::command::migrate::MigrateArgs;
use crate::error::{MigrateError, Result};
use crate::nx::{MIN_NX_VERSION, NxVersion};
use std::path::Path;

/// Fails when there is no project-local Nx installation.
///
/// The error carries the install command for the detected `agent`.
pub fn check_nx_installed(version: &NxVersion, agent: Agent, force: bool) -> Result<()> {
    if force || version.local.is_some() {
        return Ok(());
    }

    let install_command = agent
        .command(AgentAction::Install, &["--save-dev", "nx"])
        .to_string();
    Err(MigrateError::NxNotInstalled { install_command })
}

/// Fails when the local Nx is older than [`MIN_NX_VERSION`].
pub fn check_nx_version(version: &NxVersion, force: bool) -> Result<()> {
    if force {
        return Ok(());
    }

    match &version.local {
        Some(local) if *local < MIN_NX_VERSION => Err(MigrateError::NxTooOld {
            found: local.clone(),
            minimum: MIN_NX_VERSION,
        }),
        _ => Ok(()),
    }
}

/// Fails when `manifest_path` does not exist.
pub fn check_manifest_exists(manifest_path: &Path) -> Result<()> {
    if manifest_path.is_file() {
        Ok(())
    } else {
        Err(MigrateError::ManifestNotFound(manifest_path.to_path_buf()))
    }
}

/// Runs every gate in order.
///
/// # Checks Performed
///
/// 1. Nx is installed locally (unless `--force`)
/// 2. Local Nx is at least 16.0.0 (unless `--force`)
/// 3. `package.json` exists
pub fn preflight_checks(
    args: &MigrateArgs,
    version: &NxVersion,
    agent: Agent,
    manifest_path: &Path,
) -> Result<()> {
    if args.force {
        log::warn!("--force: skipping Nx installation and version checks");
    }

    check_nx_installed(version, agent, args.force)?;
    check_nx_version(version, args.force)?;
    check_manifest_exists(manifest_path)?;

    Ok(())
}
