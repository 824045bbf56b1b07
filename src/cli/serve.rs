//! Long-running service command.

use crate::config::Config;
use crate::server;
use anyhow::Result;
use clap::Args;
use std::path::Path;

/// Command to start the HTTP generation service.
#[derive(Args)]
pub struct ServeCommand {
    /// Interface to bind, overriding the configuration
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overriding the configuration
    #[arg(long)]
    port: Option<u16>,
}

impl ServeCommand {
    pub async fn execute(self, config_path: &Path) -> Result<()> {
        let mut config = Config::load(config_path)?;
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        server::serve(config).await
    }
}
