use crate::command::migrate::MigrateArgs;
use clap::Parser;

/// Migrate package.json to the renamed and rescoped Nx plugin packages,
/// then reinstall dependencies.
#[derive(Parser, Debug)]
#[command(name = "nx-rescope", version)]
pub struct Cli {
    #[command(flatten)]
    pub args: MigrateArgs,
}
