//! DHCP host-map generator for dnsmasq.

use crate::core::{ConfgenError, FileMap, Result};
use crate::generator::{plugin_mappings, GenerationContext, Generator};
use crate::render;
use async_trait::async_trait;
use tracing::debug;

/// Renders dnsmasq `dhcp-host` entries from ethernet interface inventory.
///
/// Each template is treated as a per-host row: it is rendered once per
/// interface with that interface's `mac`, `ip`, `component_id` and `type`
/// mappings, and the renders are concatenated under the template's output
/// key. A template that only uses static text therefore repeats per host,
/// which is the point of a host map.
pub struct Dnsmasq;

#[async_trait]
impl Generator for Dnsmasq {
    fn name(&self) -> &str {
        "dnsmasq"
    }

    fn description(&self) -> String {
        "Generates dnsmasq DHCP host-map entries from ethernet interface inventory.".to_string()
    }

    async fn generate(&self, ctx: &GenerationContext<'_>) -> Result<FileMap> {
        let eths = ctx.client.fetch_ethernet_interfaces(None).await?;
        if eths.is_empty() {
            return Err(ConfgenError::EmptyInventory {
                kind: "ethernet interfaces",
            });
        }
        if ctx.verbose {
            debug!(target = ctx.target, interfaces = eths.len(), "rendering dnsmasq host map");
        }

        let mut outputs = FileMap::new();
        for path in &ctx.definition.template_paths {
            let Some(template) = render::load_template(path)? else {
                continue;
            };
            let mut content = Vec::new();
            for eth in &eths {
                let mut mappings = plugin_mappings(self);
                mappings.insert("mac".to_string(), eth.mac_address.clone());
                mappings.insert("ip".to_string(), eth.first_ip().to_string());
                mappings.insert("component_id".to_string(), eth.component_id.clone());
                mappings.insert("type".to_string(), eth.kind.clone());
                content.extend(render::render(&template, &mappings)?);
            }
            outputs.insert(path.clone(), content);
        }
        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Target;
    use crate::generator::builtin::testing::{client_for, spawn_inventory_stub};
    use tempfile::TempDir;

    const ONE_INTERFACE: &str = r#"[{"ID":"x3000c0s1b0n0i0","MACAddress":"aa:bb:cc:dd:ee:ff","ComponentID":"x3000c0s1b0n0","Type":"Node","IPAddresses":[{"IPAddress":"10.0.0.1","Network":"nmn"}]}]"#;

    #[tokio::test]
    async fn test_host_row_rendered_per_interface_with_static_tail() {
        let temp = TempDir::new().unwrap();
        let tpl = temp.path().join("dnsmasq.conf.tpl");
        std::fs::write(&tpl, "dhcp-host={{mac}}\n# generated host map\n").unwrap();

        let client = client_for(spawn_inventory_stub(ONE_INTERFACE).await);
        let definition = Target {
            template_paths: vec![tpl.display().to_string()],
            ..Target::default()
        };
        let ctx = GenerationContext {
            target: "dnsmasq",
            definition: &definition,
            client: &client,
            verbose: false,
        };

        let outputs = Dnsmasq.generate(&ctx).await.unwrap();
        assert_eq!(outputs.len(), 1);
        let content = String::from_utf8(outputs.values().next().unwrap().clone()).unwrap();
        assert_eq!(content, "dhcp-host=aa:bb:cc:dd:ee:ff\n# generated host map\n");
    }

    #[tokio::test]
    async fn test_empty_inventory_fails_the_target() {
        let client = client_for(spawn_inventory_stub("[]").await);
        let definition = Target::default();
        let ctx = GenerationContext {
            target: "dnsmasq",
            definition: &definition,
            client: &client,
            verbose: false,
        };

        let err = Dnsmasq.generate(&ctx).await.err().unwrap();
        assert!(matches!(err, ConfgenError::EmptyInventory { .. }));
        assert!(!err.is_fatal());
    }
}
