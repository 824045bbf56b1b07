//! Command-line interface for confgen.
//!
//! Two invocation modes share the generation engine:
//!
//! - `confgen generate <targets..>` runs one generation pass and exits,
//!   materializing outputs per the `--output`/`--archive` flags.
//! - `confgen serve` starts the long-running HTTP service.
//!
//! `confgen config init|show` manages the YAML configuration file,
//! `confgen inspect` lists the generators found in extension directories,
//! and `confgen fetch` asks a remote service to generate instead of
//! running the engine locally. All commands honor the global `--config`
//! and `--verbose` flags.

mod config;
mod fetch;
mod generate;
mod inspect;
mod serve;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default configuration file consulted when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "confgen.yaml";

/// Top-level CLI: global flags plus one subcommand.
#[derive(Parser)]
#[command(
    name = "confgen",
    about = "Generate cluster configuration files from live inventory data",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Enable verbose diagnostics
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one or more targets and materialize the outputs.
    Generate(generate::GenerateCommand),

    /// Run the long-running generation service.
    Serve(serve::ServeCommand),

    /// Fetch rendered targets from a running service.
    Fetch(fetch::FetchCommand),

    /// List the generators found in extension directories.
    Inspect(inspect::InspectCommand),

    /// Manage the configuration file.
    Config(config::ConfigCommand),
}

impl Cli {
    /// Log filter directive implied by the global flags.
    #[must_use]
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Dispatches to the selected subcommand.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Generate(cmd) => cmd.execute(&self.config, self.verbose).await,
            Commands::Serve(cmd) => cmd.execute(&self.config).await,
            Commands::Fetch(cmd) => cmd.execute().await,
            Commands::Inspect(cmd) => cmd.execute(),
            Commands::Config(cmd) => cmd.execute(&self.config),
        }
    }
}
