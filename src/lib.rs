#![doc = include_str!("../README.md")]

pub mod agent;
pub mod cli;
pub mod command;
pub mod error;
pub mod nx;
pub mod ops;
pub mod plugins;
pub mod verify;

pub use error::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn run() -> Result<()> {
    use clap::Parser;

    let cli = cli::Cli::parse();
    let cwd = std::env::current_dir()?;
    command::migrate::execute(cli.args, &cwd)
}
