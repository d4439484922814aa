use crate::agent::{Agent, AgentAction};
use crate::error::Result;
use crate::nx::NxVersion;
use crate::ops::{MANIFEST_FILE, PackageJson, Transaction};
use crate::plugins::plugin_map;
use crate::verify::preflight_checks;
use clap::Parser;
use colored::Colorize;
use std::path::Path;

#[derive(Parser, Debug, Clone, Default)]
#[clap(verbatim_doc_comment)]
pub struct MigrateArgs {
    /// Skip the Nx installation and minimum version checks
    #[arg(long)]
    pub force: bool,

    /// Also migrate the `overrides` section of package.json
    #[arg(long, alias = "updateOverrides")]
    pub update_overrides: bool,

    /// Write package.json but do not run the package manager
    ///
    /// The install command to run by hand is printed instead.
    #[arg(long, alias = "skipInstall")]
    pub skip_install: bool,

    /// Show what would change without writing package.json or installing
    #[arg(long, short = 'n', alias = "dryRun")]
    pub dry_run: bool,
}

pub fn execute(args: MigrateArgs, cwd: &Path) -> Result<()> {
    let nx_version = NxVersion::query(cwd)?;
    let agent = Agent::detect(cwd).unwrap_or_default();
    log::debug!("Using package manager: {}", agent);

    let manifest_path = cwd.join(MANIFEST_FILE);

    // Pre-flight checks
    preflight_checks(&args, &nx_version, agent, &manifest_path)?;

    log::info!("Reading {}", MANIFEST_FILE);
    let mut manifest = PackageJson::load(&manifest_path)?;

    let reports = manifest.migrate(args.update_overrides, plugin_map());
    for report in &reports {
        report.print();
    }

    let renamed: usize = reports.iter().map(|r| r.renamed.len()).sum();
    if renamed == 0 {
        println!("{}", "No renamed or rescoped Nx plugins found".yellow());
    } else {
        log::info!("{} package(s) renamed", renamed);
    }

    let mut txn = Transaction::new(args.dry_run);
    txn.update_file(manifest.path().to_path_buf(), manifest.render()?)?;
    if txn.is_empty() {
        log::debug!("{} already up to date, nothing to write", MANIFEST_FILE);
    }
    txn.commit()?;
    txn.print_summary(cwd);

    if args.dry_run {
        return Ok(());
    }

    let install = agent.command(AgentAction::Install, &[]);

    if args.skip_install {
        println!(
            "The {} file was updated with the new dependencies.\nPlease run \"{}\" to install the updated dependencies.",
            MANIFEST_FILE,
            install.to_string().yellow()
        );
        return Ok(());
    }

    install.run(cwd)?;

    println!(
        "{} {}",
        "✓ Dependencies installed using".green().bold(),
        install.to_string().yellow()
    );

    Ok(())
}
