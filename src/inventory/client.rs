//! HTTP client wrapping the state-management API.

use super::types::{Component, EthernetInterface, RedfishEndpoint};
use crate::config::Config;
use crate::core::{ConfgenError, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Fixed base path of the state-management API.
const BASE_PATH: &str = "/hsm/v2";

/// Connection settings for one [`InventoryClient`].
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Base URL (scheme + host) of the inventory service.
    pub host: String,
    /// TCP port of the inventory service.
    pub port: u16,
    /// Bearer token attached to requests when non-empty.
    pub access_token: String,
    /// Path to a PEM CA certificate to trust for TLS.
    pub cacert: String,
}

impl ClientOptions {
    /// Builds options from the configuration document.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            host: config.inventory.host.clone(),
            port: config.inventory.port,
            access_token: config.access_token.clone(),
            cacert: config.cacert.clone(),
        }
    }
}

/// Typed HTTP client for inventory fetches.
///
/// Cheap to clone; the inner `reqwest::Client` is reference-counted.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl InventoryClient {
    /// Creates a client from connection options.
    ///
    /// When `cacert` names a PEM file it is added to the client's root
    /// trust store; an unreadable or malformed certificate is an error.
    pub fn new(options: &ClientOptions) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent("confgen");
        if !options.cacert.is_empty() {
            let pem = std::fs::read(&options.cacert).map_err(|err| {
                ConfgenError::read(
                    format!("failed to read CA certificate '{}'", options.cacert),
                    err,
                )
            })?;
            let cert = reqwest::Certificate::from_pem(&pem)?;
            builder = builder.add_root_certificate(cert);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: format!("{}:{}{}", options.host.trim_end_matches('/'), options.port, BASE_PATH),
            access_token: options.access_token.clone(),
        })
    }

    /// Fetches all ethernet interfaces, optionally filtered by network name.
    ///
    /// The endpoint returns a bare JSON array.
    pub async fn fetch_ethernet_interfaces(
        &self,
        network: Option<&str>,
    ) -> Result<Vec<EthernetInterface>> {
        let mut path = "/Inventory/EthernetInterfaces".to_string();
        if let Some(network) = network {
            path.push_str(&format!("?Network={network}"));
        }
        let body = self.get(&path).await?;
        let eths = serde_json::from_value(body).map_err(|err| ConfgenError::Decode {
            reason: format!("unexpected ethernet interface payload: {err}"),
        })?;
        Ok(eths)
    }

    /// Fetches all Redfish endpoints.
    ///
    /// The payload is wrapped in an envelope object; the `RedfishEndpoints`
    /// sub-array is extracted before decoding.
    pub async fn fetch_redfish_endpoints(&self) -> Result<Vec<RedfishEndpoint>> {
        let body = self.get("/Inventory/RedfishEndpoints").await?;
        Self::unwrap_envelope(body, "RedfishEndpoints")
    }

    /// Fetches all component state records.
    ///
    /// The payload is wrapped in an envelope object; the `Components`
    /// sub-array is extracted before decoding.
    pub async fn fetch_components(&self) -> Result<Vec<Component>> {
        let body = self.get("/State/Components").await?;
        Self::unwrap_envelope(body, "Components")
    }

    /// One GET against the API base path, returning the JSON body.
    async fn get(&self, path: &str) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "fetching inventory data");

        let mut request = self.http.get(&url);
        if !self.access_token.is_empty() {
            request = request.bearer_auth(&self.access_token);
        }

        let response = request.send().await?.error_for_status()?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|err| ConfgenError::Decode {
            reason: format!("response is not valid JSON: {err}"),
        })
    }

    /// Extracts `key` from an envelope object and decodes it as a list.
    fn unwrap_envelope<T: DeserializeOwned>(
        body: serde_json::Value,
        key: &str,
    ) -> Result<Vec<T>> {
        let inner = body
            .get(key)
            .cloned()
            .ok_or_else(|| ConfgenError::Decode {
                reason: format!("response has no '{key}' field"),
            })?;
        serde_json::from_value(inner).map_err(|err| ConfgenError::Decode {
            reason: format!("unexpected '{key}' payload: {err}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::RedfishEndpoint;

    #[test]
    fn test_unwrap_envelope_extracts_named_array() {
        let body = serde_json::json!({
            "RedfishEndpoints": [
                {"ID": "x3000c0s1b0", "Name": "node01-bmc", "User": "root", "Password": "hunter2"}
            ]
        });
        let eps: Vec<RedfishEndpoint> =
            InventoryClient::unwrap_envelope(body, "RedfishEndpoints").unwrap();
        assert_eq!(eps.len(), 1);
        assert_eq!(eps[0].name, "node01-bmc");
    }

    #[test]
    fn test_unwrap_envelope_missing_key_is_decode_error() {
        let err = InventoryClient::unwrap_envelope::<RedfishEndpoint>(
            serde_json::json!({"Other": []}),
            "RedfishEndpoints",
        )
        .unwrap_err();
        assert!(matches!(err, ConfgenError::Decode { .. }));
    }

    #[test]
    fn test_unwrap_envelope_wrong_shape_is_decode_error() {
        let err = InventoryClient::unwrap_envelope::<RedfishEndpoint>(
            serde_json::json!({"RedfishEndpoints": "not-a-list"}),
            "RedfishEndpoints",
        )
        .unwrap_err();
        assert!(matches!(err, ConfgenError::Decode { .. }));
    }

    #[test]
    fn test_base_url_includes_fixed_api_path() {
        let client = InventoryClient::new(&ClientOptions {
            host: "http://10.0.0.2/".to_string(),
            port: 27779,
            ..ClientOptions::default()
        })
        .unwrap();
        assert_eq!(client.base_url, "http://10.0.0.2:27779/hsm/v2");
    }
}
