//! Warewulf-style node provisioning generator.

use super::{GENERATED_FOOTER, GENERATED_HEADER};
use crate::core::{ConfgenError, FileMap, Result};
use crate::generator::{plugin_mappings, GenerationContext, Generator};
use crate::render;
use async_trait::async_trait;
use tracing::debug;

/// Produces warewulf node files: verbatim assets from the target's file set
/// plus templates rendered once with an aggregate `node_entries` mapping.
///
/// Requires both ethernet interfaces and Redfish endpoints; either coming
/// back empty fails the target.
pub struct Warewulf;

#[async_trait]
impl Generator for Warewulf {
    fn name(&self) -> &str {
        "warewulf"
    }

    fn description(&self) -> String {
        "Generates warewulf node provisioning files from inventory.".to_string()
    }

    async fn generate(&self, ctx: &GenerationContext<'_>) -> Result<FileMap> {
        let eths = ctx.client.fetch_ethernet_interfaces(None).await?;
        if eths.is_empty() {
            return Err(ConfgenError::EmptyInventory {
                kind: "ethernet interfaces",
            });
        }
        let endpoints = ctx.client.fetch_redfish_endpoints().await?;
        if endpoints.is_empty() {
            return Err(ConfgenError::EmptyInventory {
                kind: "redfish endpoints",
            });
        }

        let mut node_entries = String::from(GENERATED_HEADER);
        for eth in &eths {
            node_entries.push_str(&format!(
                "{}:\n  network devices:\n    default:\n      hwaddr: {}\n      ipaddr: {}\n",
                eth.component_id,
                eth.mac_address,
                eth.first_ip(),
            ));
        }
        node_entries.push_str(GENERATED_FOOTER);

        let mut mappings = plugin_mappings(self);
        mappings.insert("node_entries".to_string(), node_entries);

        let mut outputs = render::load_files(&ctx.definition.file_paths)?;
        let templates = render::render_files(&ctx.definition.template_paths, &mappings)?;
        // templates win on key collision with verbatim files
        outputs.extend(templates);

        if ctx.verbose {
            debug!(
                target = ctx.target,
                files = outputs.len(),
                "warewulf outputs assembled"
            );
        }
        Ok(outputs)
    }
}
