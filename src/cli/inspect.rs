//! Inspect extension directories.

use crate::extension;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

/// Command to list the generators found in extension directories.
///
/// Loads every extension the directories contain and prints its
/// self-reported name, version, and description; files that fail to load
/// are logged and skipped, same as at generation time.
#[derive(Args)]
pub struct InspectCommand {
    /// Extension directories to scan
    #[arg(required = true, value_name = "DIR")]
    dirs: Vec<PathBuf>,
}

impl InspectCommand {
    pub fn execute(self) -> Result<()> {
        let mut found = 0usize;
        for dir in &self.dirs {
            let mut generators: Vec<_> = extension::load_directory(dir).into_values().collect();
            generators.sort_by(|a, b| a.name().cmp(b.name()));
            for generator in generators {
                println!(
                    "{} {} - {}",
                    generator.name().green().bold(),
                    generator.version(),
                    generator.description()
                );
                found += 1;
            }
        }
        if found == 0 {
            println!("{}", "No extensions found.".yellow());
        }
        Ok(())
    }
}
