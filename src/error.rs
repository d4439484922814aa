//! Error types for nx-rescope.
//!
//! All operations return `Result<T>` which aliases `Result<T, MigrateError>`.
//! The `Display` output of each variant is the message shown to the user,
//! including how to fix the problem where there is something to fix.

use colored::Colorize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from a migration run.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// `nx` has no project-local installation.
    #[error(
        "Nx is not installed locally.\nPlease run \"{}\" to install it locally.",
        .install_command.yellow()
    )]
    NxNotInstalled { install_command: String },

    /// Local `nx` is older than the first release with the new scopes.
    #[error(
        "Nx version is too old ({found}).\nPlease update to at least {minimum}.\nTo update run \"{}\"",
        "nx migrate latest".yellow()
    )]
    NxTooOld {
        found: semver::Version,
        minimum: semver::Version,
    },

    /// `nx --version` could not be run or exited unsuccessfully.
    #[error("Failed to query the Nx version: {0}")]
    NxQuery(String),

    /// `nx --version` printed something we do not understand.
    #[error("Unexpected `nx --version` output: {0}")]
    NxVersionParse(String),

    /// No manifest in the working directory.
    #[error(
        "No package.json found at {}.\nPlease run \"{}\" to create one.",
        .0.display(),
        "npm init -y".yellow()
    )]
    ManifestNotFound(PathBuf),

    /// The manifest is not valid JSON.
    #[error("Error parsing package.json: {0}")]
    ManifestParse(#[source] serde_json::Error),

    /// The manifest is valid JSON but not an object.
    #[error("Error parsing package.json: expected a JSON object at the top level")]
    ManifestNotObject,

    /// The package manager exited unsuccessfully.
    #[error(
        "Error while installing dependencies with \"{}\". One of the main reasons for this error is that your current Nx plugins do not have a version with the new scope.\nIf that is the case, you can try to run \"{}\" again and then run this command again.\n{}",
        .command.yellow(),
        "nx migrate latest".yellow(),
        .stderr.red()
    )]
    InstallFailed { command: String, stderr: String },

    /// File system operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex compilation failed (indicates bug).
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Unexpected error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MigrateError {
    /// Process exit code for this error.
    ///
    /// Every failure is terminal and reported the same way; success paths
    /// (including `--skip-install`) never reach here.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Result type alias for nx-rescope operations.
pub type Result<T> = std::result::Result<T, MigrateError>;
