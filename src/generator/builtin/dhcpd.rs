//! ISC-style DHCP host-map generator.

use super::{GENERATED_FOOTER, GENERATED_HEADER};
use crate::core::{ConfgenError, FileMap, Result};
use crate::generator::{plugin_mappings, GenerationContext, Generator};
use crate::render;
use async_trait::async_trait;

/// Renders an aggregate `compute_nodes` block of ISC dhcpd host stanzas.
///
/// Unlike [`super::Dnsmasq`], templates are rendered once with the whole
/// host block exposed as a single variable; interfaces without any IP
/// address are left out.
pub struct Dhcpd;

#[async_trait]
impl Generator for Dhcpd {
    fn name(&self) -> &str {
        "dhcpd"
    }

    fn description(&self) -> String {
        "Generates ISC dhcpd host declarations from ethernet interface inventory.".to_string()
    }

    async fn generate(&self, ctx: &GenerationContext<'_>) -> Result<FileMap> {
        let eths = ctx.client.fetch_ethernet_interfaces(None).await?;
        if eths.is_empty() {
            return Err(ConfgenError::EmptyInventory {
                kind: "ethernet interfaces",
            });
        }

        let mut block = String::from(GENERATED_HEADER);
        for eth in &eths {
            if eth.ip_addresses.is_empty() {
                continue;
            }
            block.push_str(&format!(
                "host {} {{ hardware ethernet {}; fixed-address {}; }}\n",
                eth.component_id,
                eth.mac_address,
                eth.first_ip(),
            ));
        }
        block.push_str(GENERATED_FOOTER);

        let mut mappings = plugin_mappings(self);
        mappings.insert("compute_nodes".to_string(), block);
        render::render_files(&ctx.definition.template_paths, &mappings)
    }
}
