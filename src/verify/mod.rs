//! Validation performed before a migration.

pub mod preflight;

pub use preflight::{check_manifest_exists, check_nx_installed, check_nx_version, preflight_checks};
