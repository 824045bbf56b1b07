//! confgen CLI entry point.
//!
//! Parses arguments, initializes logging, and dispatches to the selected
//! subcommand:
//! - `generate` - one generation pass, then exit
//! - `serve` - long-running HTTP service
//! - `config` - initialize or show the configuration file

use clap::Parser;
use colored::Colorize;
use confgen::cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.execute().await {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
