//! Configuration document for confgen.
//!
//! The persisted configuration is a YAML file describing where the inventory
//! service lives, how to authenticate against it, the target-definition
//! graph, extension search directories, and the service listener settings.
//!
//! # File format
//!
//! ```yaml
//! version: ""
//! inventory:
//!   host: http://127.0.0.1
//!   port: 27779
//! access-token: ""
//! cacert: ""
//! targets:
//!   dnsmasq:
//!     templates:
//!       - templates/dnsmasq.conf.tpl
//!     files: []
//!     plugin: ""
//!     targets: []
//! extensions: []
//! server:
//!   host: 127.0.0.1
//!   port: 3334
//!   jwks:
//!     uri: ""
//!     retries: 5
//! ```
//!
//! Loading a missing file yields the defaults (first-run UX: `confgen
//! config init` writes them out); a file that exists but fails to parse is
//! an error.

use crate::core::{ConfgenError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// A named unit of generation work.
///
/// Maps a target name to the generator that produces it (implicitly by name
/// or explicitly via `plugin`), the template and verbatim file sets it acts
/// on, and the child targets to run after it completes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Target {
    /// Path to an extension definition providing the generator. Empty means
    /// the target name itself selects a registered generator.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub plugin: String,

    /// Template files rendered with variable substitution, in order.
    #[serde(default, rename = "templates", skip_serializing_if = "Vec::is_empty")]
    pub template_paths: Vec<String>,

    /// Files copied verbatim (glob-expanded, directories skipped).
    #[serde(default, rename = "files", skip_serializing_if = "Vec::is_empty")]
    pub file_paths: Vec<String>,

    /// Names of targets to run after this one completes.
    #[serde(default, rename = "targets", skip_serializing_if = "Vec::is_empty")]
    pub run_targets: Vec<String>,
}

/// Inventory service endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct InventoryEndpoint {
    /// Base URL of the inventory service (scheme + host).
    pub host: String,
    /// TCP port the inventory service listens on.
    pub port: u16,
}

impl Default for InventoryEndpoint {
    fn default() -> Self {
        Self {
            host: "http://127.0.0.1".to_string(),
            port: 27779,
        }
    }
}

/// JSON-Web-Key-Set settings for the service's authorization gate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Jwks {
    /// URL of the authorization server's key set. Empty disables the gate.
    #[serde(default)]
    pub uri: String,
    /// Fetch attempts before giving up on the key set.
    #[serde(default = "default_jwks_retries")]
    pub retries: u32,
}

const fn default_jwks_retries() -> u32 {
    5
}

impl Default for Jwks {
    fn default() -> Self {
        Self {
            uri: String::new(),
            retries: default_jwks_retries(),
        }
    }
}

/// Listener settings for the long-running service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Server {
    /// Interface the service binds to.
    pub host: String,
    /// Port the service listens on.
    pub port: u16,
    /// Authorization gate settings.
    #[serde(default)]
    pub jwks: Jwks,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3334,
            jwks: Jwks::default(),
        }
    }
}

/// The whole configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Free-form document version string.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,

    /// Inventory service endpoint.
    #[serde(default)]
    pub inventory: InventoryEndpoint,

    /// Bearer token sent to the inventory service when non-empty.
    #[serde(default, rename = "access-token", skip_serializing_if = "String::is_empty")]
    pub access_token: String,

    /// Path to a PEM CA certificate trusted for inventory TLS.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cacert: String,

    /// The target-definition graph, keyed by target name.
    #[serde(default)]
    pub targets: HashMap<String, Target>,

    /// Directories scanned (non-recursively) for extension definitions.
    #[serde(default, rename = "extensions", skip_serializing_if = "Vec::is_empty")]
    pub extension_dirs: Vec<String>,

    /// Service listener settings.
    #[serde(default)]
    pub server: Server,
}

impl Config {
    /// Creates a configuration with the stock target graph.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut targets = HashMap::new();
        targets.insert("dnsmasq".to_string(), Target::default());
        targets.insert("conman".to_string(), Target::default());
        targets.insert(
            "warewulf".to_string(),
            Target {
                template_paths: vec![
                    "templates/warewulf/node.tpl".to_string(),
                    "templates/warewulf/provision.tpl".to_string(),
                ],
                ..Target::default()
            },
        );
        Self {
            targets,
            ..Self::default()
        }
    }

    /// Loads the configuration from `path`.
    ///
    /// A missing file yields [`Config::with_defaults`]; any other read error
    /// or a parse failure is returned to the caller.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file found, using defaults");
                return Ok(Self::with_defaults());
            }
            Err(err) => {
                return Err(ConfgenError::read(
                    format!("failed to read config file '{}'", path.display()),
                    err,
                ));
            }
        };
        let config = serde_yaml::from_str(&raw)?;
        Ok(config)
    }

    /// Writes the configuration to `path` as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = serde_yaml::to_string(self)?;
        std::fs::write(path, data).map_err(|err| {
            ConfgenError::write(
                format!("failed to write config file '{}'", path.display()),
                err,
            )
        })
    }
}
