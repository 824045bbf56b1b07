//! Declarative generator extensions.
//!
//! Extensions add generators at runtime without loading native code. An
//! extension is a YAML file whose root must contain a `generator` entry
//! (the named entry point) satisfying the full capability set: `name`,
//! `version`, `description`, and a generation recipe (`row`). Example:
//!
//! ```yaml
//! generator:
//!   name: site-dhcp
//!   version: "1.2.0"
//!   description: Site-specific DHCP host rows.
//!   source: ethernet-interfaces
//!   row: "dhcp-host={{mac}},{{component_id}},{{ip}}"
//!   variable: dhcp_hosts
//!   join: "\n"
//! ```
//!
//! The loaded generator renders `row` once per inventory record of the
//! declared `source`, joins the rows, and exposes the result to the
//! target's templates under `variable`. With no templates configured the
//! joined rows become a single synthetic output keyed by the generator
//! name.
//!
//! # Failure mapping
//!
//! - unreadable file or invalid YAML → [`ConfgenError::ExtensionLoad`]
//! - root without a `generator` entry → [`ConfgenError::ExtensionEntryPoint`]
//! - entry missing a capability field → [`ConfgenError::ExtensionCapability`]
//!
//! [`load_directory`] never fails as a whole: it scans one level deep,
//! skips subdirectories, and logs per-file failures.

use crate::core::{ConfgenError, FileMap, Mappings, Result};
use crate::generator::{plugin_mappings, GenerationContext, Generator};
use crate::render;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Inventory data kind a declarative generator consumes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataSource {
    /// No inventory fetch; the row renders once with plugin mappings only.
    #[default]
    None,
    /// Ethernet interfaces; row mappings `id`, `mac`, `ip`, `component_id`, `type`.
    EthernetInterfaces,
    /// Redfish endpoints; row mappings `id`, `name`, `hostname`, `user`, `password`, `ip`.
    RedfishEndpoints,
    /// Components; row mappings `id`, `type`, `state`, `role`, `arch`, `class`.
    Components,
}

/// The `generator` entry of an extension file, after validation.
#[derive(Debug, Clone, Deserialize)]
struct ExtensionSpec {
    #[serde(default)]
    name: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    source: DataSource,
    #[serde(default)]
    row: String,
    #[serde(default = "default_variable")]
    variable: String,
    #[serde(default = "default_join")]
    join: String,
}

fn default_variable() -> String {
    "rows".to_string()
}

fn default_join() -> String {
    "\n".to_string()
}

/// Loads one extension definition from `path`.
pub fn load_extension(path: &Path) -> Result<Arc<dyn Generator>> {
    let raw = std::fs::read_to_string(path).map_err(|err| ConfgenError::ExtensionLoad {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    let root: serde_yaml::Value =
        serde_yaml::from_str(&raw).map_err(|err| ConfgenError::ExtensionLoad {
            path: path.to_path_buf(),
            reason: format!("invalid YAML: {err}"),
        })?;

    let entry = root
        .get("generator")
        .cloned()
        .ok_or_else(|| ConfgenError::ExtensionEntryPoint {
            path: path.to_path_buf(),
        })?;
    let spec: ExtensionSpec =
        serde_yaml::from_value(entry).map_err(|err| ConfgenError::ExtensionLoad {
            path: path.to_path_buf(),
            reason: format!("malformed generator entry: {err}"),
        })?;

    // full capability set required: name, version, description, recipe
    for (field, value) in [
        ("name", &spec.name),
        ("version", &spec.version),
        ("description", &spec.description),
        ("row", &spec.row),
    ] {
        if value.is_empty() {
            return Err(ConfgenError::ExtensionCapability {
                path: path.to_path_buf(),
                capability: field,
            });
        }
    }

    debug!(path = %path.display(), name = spec.name, "loaded extension");
    Ok(Arc::new(DeclarativeGenerator { spec }))
}

/// Loads every extension in `dir`, one level deep.
///
/// Subdirectories are skipped without failing the scan; files that fail to
/// load are logged and skipped. Returns whatever loaded, keyed by
/// self-reported name - last loaded wins on collision, in directory
/// iteration order (not guaranteed stable across platforms).
pub fn load_directory(dir: &Path) -> HashMap<String, Arc<dyn Generator>> {
    let mut generators: HashMap<String, Arc<dyn Generator>> = HashMap::new();
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(dir = %dir.display(), %err, "failed to read extension directory");
            return generators;
        }
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        match load_extension(&path) {
            Ok(generator) => {
                generators.insert(generator.name().to_string(), generator);
            }
            Err(err) => warn!(path = %path.display(), %err, "skipping extension"),
        }
    }
    generators
}

/// A generator built from an [`ExtensionSpec`].
struct DeclarativeGenerator {
    spec: ExtensionSpec,
}

impl DeclarativeGenerator {
    /// Renders the row recipe once per inventory record and joins the rows.
    async fn build_rows(&self, ctx: &GenerationContext<'_>) -> Result<String> {
        let base = plugin_mappings(self);
        let row = self.spec.row.as_bytes();

        let mut record_mappings: Vec<Mappings> = Vec::new();
        match self.spec.source {
            DataSource::None => record_mappings.push(Mappings::new()),
            DataSource::EthernetInterfaces => {
                for eth in ctx.client.fetch_ethernet_interfaces(None).await? {
                    let mut m = Mappings::new();
                    m.insert("id".to_string(), eth.id.clone());
                    m.insert("mac".to_string(), eth.mac_address.clone());
                    m.insert("ip".to_string(), eth.first_ip().to_string());
                    m.insert("component_id".to_string(), eth.component_id.clone());
                    m.insert("type".to_string(), eth.kind.clone());
                    record_mappings.push(m);
                }
            }
            DataSource::RedfishEndpoints => {
                for ep in ctx.client.fetch_redfish_endpoints().await? {
                    let mut m = Mappings::new();
                    m.insert("id".to_string(), ep.id.clone());
                    m.insert("name".to_string(), ep.name.clone());
                    m.insert("hostname".to_string(), ep.hostname.clone());
                    m.insert("user".to_string(), ep.user.clone());
                    m.insert("password".to_string(), ep.password.clone());
                    m.insert("ip".to_string(), ep.ip_address.clone());
                    record_mappings.push(m);
                }
            }
            DataSource::Components => {
                for comp in ctx.client.fetch_components().await? {
                    let mut m = Mappings::new();
                    m.insert("id".to_string(), comp.id.clone());
                    m.insert("type".to_string(), comp.kind.clone());
                    m.insert("state".to_string(), comp.state.clone());
                    m.insert("role".to_string(), comp.role.clone());
                    m.insert("arch".to_string(), comp.arch.clone());
                    m.insert("class".to_string(), comp.class.clone());
                    record_mappings.push(m);
                }
            }
        }

        let mut rows = Vec::new();
        for mut mappings in record_mappings {
            for (k, v) in &base {
                mappings.entry(k.clone()).or_insert_with(|| v.clone());
            }
            rows.push(String::from_utf8_lossy(&render::render(row, &mappings)?).into_owned());
        }
        Ok(rows.join(&self.spec.join))
    }
}

#[async_trait]
impl Generator for DeclarativeGenerator {
    fn name(&self) -> &str {
        &self.spec.name
    }

    fn version(&self) -> &str {
        &self.spec.version
    }

    fn description(&self) -> String {
        self.spec.description.clone()
    }

    async fn generate(&self, ctx: &GenerationContext<'_>) -> Result<FileMap> {
        let rows = self.build_rows(ctx).await?;

        if ctx.definition.template_paths.is_empty() {
            let mut outputs = FileMap::new();
            outputs.insert(self.spec.name.clone(), rows.into_bytes());
            return Ok(outputs);
        }

        let mut mappings = plugin_mappings(self);
        mappings.insert(self.spec.variable.clone(), rows);
        render::render_files(&ctx.definition.template_paths, &mappings)
    }
}
