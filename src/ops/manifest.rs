//! `package.json` loading, section migration and rendering.
//!
//! The document is held as an ordered JSON object so that every field the
//! migration does not touch comes back out in its original position.

use crate::error::{MigrateError, Result};
use crate::ops::keys::{keys_diff, rename_collisions, rename_keys, sort_keys};
use crate::plugins::PluginMap;
use colored::Colorize;
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Manifest file name looked up in the working directory.
pub const MANIFEST_FILE: &str = "package.json";

/// Dependency-bearing sections of a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencySection {
    Dependencies,
    DevDependencies,
    PeerDependencies,
    Overrides,
}

impl DependencySection {
    const ALWAYS: [DependencySection; 3] = [
        DependencySection::Dependencies,
        DependencySection::DevDependencies,
        DependencySection::PeerDependencies,
    ];

    /// JSON key of the section.
    pub fn key(self) -> &'static str {
        match self {
            DependencySection::Dependencies => "dependencies",
            DependencySection::DevDependencies => "devDependencies",
            DependencySection::PeerDependencies => "peerDependencies",
            DependencySection::Overrides => "overrides",
        }
    }

    /// Sections to migrate, in processing order.
    pub fn selected(update_overrides: bool) -> Vec<DependencySection> {
        let mut sections = Self::ALWAYS.to_vec();
        if update_overrides {
            sections.push(DependencySection::Overrides);
        }
        sections
    }
}

impl fmt::Display for DependencySection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// What changed in one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionReport {
    pub section: DependencySection,
    /// `(old, new)` for each renamed package, in manifest order.
    pub renamed: Vec<(String, String)>,
    /// Names present after the migration that were not there before.
    pub added: Vec<String>,
}

impl SectionReport {
    pub fn is_empty(&self) -> bool {
        self.renamed.is_empty()
    }

    /// Prints the section as a small tree, nothing if it is unchanged.
    pub fn print(&self) {
        if self.is_empty() {
            return;
        }

        println!("{}", self.section.key().blue());
        let last = self.renamed.len() - 1;
        for (idx, (old, new)) in self.renamed.iter().enumerate() {
            let branch = if idx == last { "└─" } else { "├─" };
            println!("{} {} => {}", branch, old.red(), new.green());
        }
    }
}

/// Content of a `package.json` file and its path.
#[derive(Debug)]
pub struct PackageJson {
    path: PathBuf,
    value: Map<String, Value>,
    trailing_newline: bool,
}

impl PackageJson {
    /// Reads and parses the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            log::error!("Failed to read {}: {}", path.display(), e);
            MigrateError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read {}: {}", path.display(), e),
            ))
        })?;
        Self::parse(path.to_path_buf(), &raw)
    }

    /// Parses raw manifest text that was read from `path`.
    pub fn parse(path: PathBuf, raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw).map_err(MigrateError::ManifestParse)?;
        let Value::Object(value) = value else {
            return Err(MigrateError::ManifestNotObject);
        };

        Ok(Self {
            path,
            value,
            trailing_newline: raw.ends_with('\n'),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn value(&self) -> &Map<String, Value> {
        &self.value
    }

    /// Renames and sorts one section in place.
    ///
    /// Returns `None` when the section is absent or is not an object; such
    /// sections are left exactly as they were.
    pub fn migrate_section(
        &mut self,
        section: DependencySection,
        table: &PluginMap,
    ) -> Option<SectionReport> {
        let Some(Value::Object(old)) = self.value.get(section.key()) else {
            log::debug!("Section '{}' not present, skipping", section);
            return None;
        };

        log::info!("Updating {} section", section);

        for (source, target) in rename_collisions(old, table) {
            log::warn!(
                "'{}' in {} renames to '{}', which is already present; keeping the later entry",
                source,
                section,
                target
            );
        }

        let new = rename_keys(old, table);
        let renamed: Vec<(String, String)> = keys_diff(old, &new)
            .into_iter()
            .filter_map(|key| {
                let target = table.get(key.as_str())?;
                Some((key, target.to_string()))
            })
            .collect();
        let added = keys_diff(&new, old);
        log::debug!("{}: added {:?}", section, added);

        let sorted = sort_keys(&new);
        self.value.insert(section.key().to_string(), Value::Object(sorted));

        Some(SectionReport {
            section,
            renamed,
            added,
        })
    }

    /// Migrates every selected section and returns the reports of the
    /// sections that exist.
    pub fn migrate(&mut self, update_overrides: bool, table: &PluginMap) -> Vec<SectionReport> {
        DependencySection::selected(update_overrides)
            .into_iter()
            .filter_map(|section| self.migrate_section(section, table))
            .collect()
    }

    /// Pretty-printed manifest text with two-space indentation.
    pub fn render(&self) -> Result<String> {
        let mut contents = serde_json::to_string_pretty(&self.value)?;
        if self.trailing_newline {
            contents.push('\n');
        }
        Ok(contents)
    }
}
