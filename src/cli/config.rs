//! Manage the confgen configuration file.

use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::Path;

/// Command to inspect or initialize the configuration file.
///
/// Without a subcommand this behaves like `config show`.
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: Option<ConfigSubcommand>,
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// Write a configuration file with the stock target graph.
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Print the effective configuration as YAML.
    Show,
}

impl ConfigCommand {
    pub fn execute(self, config_path: &Path) -> Result<()> {
        match self.command.unwrap_or(ConfigSubcommand::Show) {
            ConfigSubcommand::Init { force } => Self::init(config_path, force),
            ConfigSubcommand::Show => Self::show(config_path),
        }
    }

    fn init(config_path: &Path, force: bool) -> Result<()> {
        if config_path.exists() && !force {
            return Err(anyhow!(
                "Configuration already exists at {}. Use --force to overwrite",
                config_path.display()
            ));
        }
        Config::with_defaults().save(config_path)?;
        println!(
            "{} configuration at {}",
            "Created".green().bold(),
            config_path.display()
        );
        Ok(())
    }

    fn show(config_path: &Path) -> Result<()> {
        let config = Config::load(config_path)?;
        print!("{}", serde_yaml::to_string(&config)?);
        Ok(())
    }
}
