//! Fetch rendered targets from a running confgen service.

use anyhow::{bail, Context, Result};
use clap::Args;

/// Command to request generation from a remote service instead of running
/// the engine locally.
///
/// Issues one `GET /generate?target=<name>` per target and prints each
/// response body. Any non-success status fails the invocation.
#[derive(Args)]
pub struct FetchCommand {
    /// Target names to fetch, in order
    #[arg(required = true)]
    targets: Vec<String>,

    /// Base URL of the confgen service
    #[arg(long, default_value = "http://127.0.0.1:3334")]
    host: String,

    /// Bearer token sent with each request
    #[arg(long, env = "CONFGEN_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

impl FetchCommand {
    pub async fn execute(self) -> Result<()> {
        let client = reqwest::Client::new();
        let url = format!("{}/generate", self.host.trim_end_matches('/'));
        for target in &self.targets {
            let mut request = client.get(&url).query(&[("target", target)]);
            if let Some(token) = &self.token {
                request = request.bearer_auth(token);
            }
            let response = request
                .send()
                .await
                .with_context(|| format!("failed to reach {url}"))?;
            let status = response.status();
            let body = response.text().await?;
            if !status.is_success() {
                bail!("service returned {status} for target '{target}': {body}");
            }
            println!("{body}");
        }
        Ok(())
    }
}
