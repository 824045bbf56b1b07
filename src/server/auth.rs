//! Authorization gate for the service routes.
//!
//! When a JWKS URI is configured, the signing-key set is fetched once from
//! the authorization server through a single-flight cell (concurrent first
//! requests await the same fetch) and reused for every subsequent request.
//! A request is admitted when it carries a bearer token whose JWT header
//! names a key id present in the cached set; everything beyond that
//! (signature verification, claim checks) belongs to the authorization
//! layer in front of this service.

use crate::config::Jwks;
use axum::http::HeaderMap;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::OnceCell;
use tokio_retry::strategy::FixedInterval;
use tokio_retry::Retry;
use tracing::{debug, warn};

/// Why a request was refused.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,
    #[error("malformed bearer token: {0}")]
    MalformedToken(&'static str),
    #[error("token key id not present in signing key set")]
    UnknownKey,
    #[error("failed to fetch signing key set: {0}")]
    KeySetUnavailable(String),
}

/// Process-wide signing-key cache with single-flight initialization.
pub struct JwksCache {
    uri: String,
    retries: u32,
    key_ids: OnceCell<HashSet<String>>,
}

impl JwksCache {
    fn new(uri: String, retries: u32) -> Self {
        Self {
            uri,
            retries,
            key_ids: OnceCell::new(),
        }
    }

    /// Returns the cached key ids, fetching the key set on first use.
    ///
    /// The fetch retries on a fixed interval up to the configured attempt
    /// count; concurrent callers share one fetch.
    async fn key_ids(&self) -> Result<&HashSet<String>, AuthError> {
        self.key_ids
            .get_or_try_init(|| async {
                let strategy = FixedInterval::new(Duration::from_millis(500))
                    .take(self.retries.max(1) as usize);
                let set = Retry::spawn(strategy, || self.fetch())
                    .await
                    .map_err(|err| AuthError::KeySetUnavailable(err.to_string()))?;
                debug!(uri = %self.uri, keys = set.len(), "cached signing key set");
                Ok(set)
            })
            .await
    }

    async fn fetch(&self) -> Result<HashSet<String>, reqwest::Error> {
        let body: serde_json::Value = reqwest::get(&self.uri).await?.json().await?;
        let ids = body
            .get("keys")
            .and_then(serde_json::Value::as_array)
            .map(|keys| {
                keys.iter()
                    .filter_map(|k| k.get("kid").and_then(serde_json::Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Ok(ids)
    }
}

/// Decides whether a caller is authorized before dispatch.
pub struct Authorizer {
    jwks: Option<JwksCache>,
}

impl Authorizer {
    /// Builds an authorizer from the configured JWKS settings.
    ///
    /// An empty URI leaves every route open.
    #[must_use]
    pub fn new(jwks: &Jwks) -> Self {
        let cache = (!jwks.uri.is_empty()).then(|| JwksCache::new(jwks.uri.clone(), jwks.retries));
        Self { jwks: cache }
    }

    /// Whether the gate is active at all.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.jwks.is_some()
    }

    /// Admits or refuses one request based on its headers.
    pub async fn authorize(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let Some(cache) = &self.jwks else {
            return Ok(());
        };
        let token = bearer_token(headers).ok_or(AuthError::MissingToken)?;
        let kid = header_key_id(token)?;
        let key_ids = cache.key_ids().await?;
        if key_ids.contains(&kid) {
            Ok(())
        } else {
            warn!(%kid, "rejected token signed by unknown key");
            Err(AuthError::UnknownKey)
        }
    }
}

/// Extracts the bearer token from the `Authorization` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Decodes the JWT header segment and returns its `kid` claim.
fn header_key_id(token: &str) -> Result<String, AuthError> {
    let header_segment = token
        .split('.')
        .next()
        .filter(|s| !s.is_empty())
        .ok_or(AuthError::MalformedToken("empty header segment"))?;
    if token.split('.').count() != 3 {
        return Err(AuthError::MalformedToken("expected three JWT segments"));
    }
    let raw = URL_SAFE_NO_PAD
        .decode(header_segment)
        .map_err(|_| AuthError::MalformedToken("header is not base64url"))?;
    let header: serde_json::Value =
        serde_json::from_slice(&raw).map_err(|_| AuthError::MalformedToken("header is not JSON"))?;
    header
        .get("kid")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or(AuthError::MalformedToken("header has no kid"))
}
