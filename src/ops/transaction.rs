use crate::error::{MigrateError, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileUpdate {
    pub path: PathBuf,
    pub new: String,
}

/// Staged file writes that are applied together on [`Transaction::commit`].
///
/// In dry-run mode nothing is ever written; the staged updates only feed
/// the summary.
#[must_use = "Transaction must be committed"]
pub struct Transaction {
    updates: Vec<FileUpdate>,
    dry_run: bool,
    committed: bool,
}

impl Transaction {
    pub fn new(dry_run: bool) -> Self {
        Self {
            updates: Vec::new(),
            dry_run,
            committed: false,
        }
    }

    pub fn update_file(&mut self, path: PathBuf, new_content: String) -> Result<()> {
        log::debug!("Transaction::update_file called for: {}", path.display());

        let current = fs::read_to_string(&path).map_err(|e| {
            log::error!("Failed to read file {}: {}", path.display(), e);
            MigrateError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read {}: {}", path.display(), e),
            ))
        })?;

        if current == new_content {
            log::debug!("File content unchanged, skipping: {}", path.display());
            return Ok(());
        }

        if self.dry_run {
            log::info!("Would update: {}", path.display());
        } else {
            log::debug!("Staging update for: {}", path.display());
        }

        self.updates.push(FileUpdate {
            path,
            new: new_content,
        });
        Ok(())
    }

    /// Writes all staged updates, unless this is a dry run.
    pub fn commit(&mut self) -> Result<()> {
        if self.committed {
            return Err(MigrateError::Other(anyhow::anyhow!(
                "Transaction already committed"
            )));
        }

        if self.dry_run {
            self.committed = true;
            return Ok(());
        }

        for update in &self.updates {
            log::info!("Saving {}", update.path.display());
            fs::write(&update.path, &update.new).map_err(|e| {
                MigrateError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to write {}: {}", update.path.display(), e),
                ))
            })?;
        }

        self.committed = true;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// Prints which files were (or would be) written.
    pub fn print_summary(&self, cwd: &Path) {
        if self.updates.is_empty() {
            println!("\n{}", "No changes needed".yellow());
            return;
        }

        let display_path = |path: &Path| -> String {
            path.strip_prefix(cwd)
                .unwrap_or(path)
                .to_string_lossy()
                .replace('\\', "/")
        };

        if self.dry_run {
            println!("\n{}", "DRY RUN - No changes will be made".yellow().bold());
        } else {
            println!("\n{}", "Changes applied:".green().bold());
        }

        for update in &self.updates {
            let path = display_path(&update.path);
            if self.dry_run {
                println!("   • {}", path.dimmed());
            } else {
                println!("   {} {}", "✓".green(), path.dimmed());
            }
        }

        if self.dry_run {
            println!(
                "\n{} {} will be modified. Run without {} to apply.",
                self.updates.len().to_string().cyan().bold(),
                if self.updates.len() > 1 { "files" } else { "file" },
                "--dry-run".cyan()
            );
        }
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if !self.committed && !self.updates.is_empty() && !self.dry_run {
            log::warn!("Transaction dropped without commit - changes were not applied");
        }
    }
}
