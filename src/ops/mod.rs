pub mod keys;
mod manifest;
mod transaction;

pub use keys::{is_truthy, keys_diff, rename_collisions, rename_keys, sort_keys};
pub use manifest::{DependencySection, MANIFEST_FILE, PackageJson, SectionReport};
pub use transaction::{FileUpdate, Transaction};
