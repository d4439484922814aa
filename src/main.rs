//! Binary entry point for `nx-rescope`.

use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = nx_rescope::run() {
        println!("{}", e);
        process::exit(e.exit_code());
    }
}
