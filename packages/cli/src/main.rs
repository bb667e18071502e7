use clap::Parser;
use log::error;
use std::process::exit;

mod cli;
mod report;

use cli::Cli;

/// Catches errors, prints them through the logger, then exits
pub fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = Cli::parse().run() {
        error!("{e:#}");
        exit(1);
    }
}
