mod automator;
mod cli;
mod config;
mod error;
mod imaging;
mod launch;
mod locate;
mod paths;
mod platform;
mod results;
mod script;
mod setup;
mod util;

use std::error::Error;

use clap::Parser;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    if let Err(e) = cli::run(cli) {
        eprintln!("error: {}", e);
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
}
