//! One-shot generation command.

use crate::config::Config;
use crate::generator::Registry;
use crate::inventory::ClientOptions;
use crate::output::Materializer;
use crate::resolver::{Resolver, RunOptions};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Command to run one generation pass over the named targets.
///
/// Connection flags override the corresponding configuration values for
/// this invocation only; the file on disk is never touched.
#[derive(Args)]
pub struct GenerateCommand {
    /// Target names to generate, in order
    #[arg(required = true)]
    targets: Vec<String>,

    /// Output path; prints to standard output when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Bundle all outputs into `<output>.tar.gz`
    #[arg(long, requires = "output")]
    archive: bool,

    /// Additional extension directories to scan before generating
    #[arg(long = "extensions", value_name = "DIR")]
    extension_dirs: Vec<PathBuf>,

    /// Inventory service base URL (scheme + host)
    #[arg(long)]
    host: Option<String>,

    /// Inventory service port
    #[arg(long)]
    port: Option<u16>,

    /// Bearer token for the inventory service
    #[arg(long, env = "CONFGEN_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// PEM CA certificate to trust for inventory TLS
    #[arg(long)]
    cacert: Option<PathBuf>,
}

impl GenerateCommand {
    pub async fn execute(self, config_path: &Path, verbose: bool) -> Result<()> {
        let config = Config::load(config_path)?;

        let registry = Registry::new();
        for dir in &config.extension_dirs {
            registry.load_directory(dir);
        }
        for dir in &self.extension_dirs {
            registry.load_directory(dir);
        }

        let mut client = ClientOptions::from_config(&config);
        if let Some(host) = self.host {
            client.host = host;
        }
        if let Some(port) = self.port {
            client.port = port;
        }
        if let Some(token) = self.token {
            client.access_token = token;
        }
        if let Some(cacert) = self.cacert {
            client.cacert = cacert.display().to_string();
        }

        let options = RunOptions {
            verbose,
            client: Some(client),
        };
        let resolver = Resolver::new(&config, &registry, options);
        let mut sink = Materializer::new(self.output.clone(), self.archive);
        let merged = resolver.run(&self.targets, &mut sink).await?;

        if merged.is_empty() {
            warn!("no outputs were generated");
            println!("{}", "No outputs were generated.".yellow());
        } else if let Some(output) = &self.output {
            println!(
                "{} {} file(s) under {}",
                "Generated".green().bold(),
                merged.len(),
                output.display()
            );
        }
        Ok(())
    }
}
