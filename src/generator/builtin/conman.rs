//! Console-manager (conman) entry generator.

use crate::core::{ConfgenError, FileMap, Result};
use crate::generator::{plugin_mappings, GenerationContext, Generator};
use crate::render;
use async_trait::async_trait;

/// Renders conman `CONSOLE` entries from Redfish endpoint inventory.
///
/// Templates are rendered once per endpoint with `name`, `hostname`,
/// `user`, `password` and `ip` mappings, concatenated per template. A
/// typical template is a single line such as
/// `CONSOLE name={{name}} dev=ipmi:{{name}}-bmc ipmiopts=U:{{user}},P:{{password}},W:solpayloadsize`.
pub struct Conman;

#[async_trait]
impl Generator for Conman {
    fn name(&self) -> &str {
        "conman"
    }

    fn description(&self) -> String {
        "Generates conman console entries from Redfish endpoint inventory.".to_string()
    }

    async fn generate(&self, ctx: &GenerationContext<'_>) -> Result<FileMap> {
        let endpoints = ctx.client.fetch_redfish_endpoints().await?;
        if endpoints.is_empty() {
            return Err(ConfgenError::EmptyInventory {
                kind: "redfish endpoints",
            });
        }

        let mut outputs = FileMap::new();
        for path in &ctx.definition.template_paths {
            let Some(template) = render::load_template(path)? else {
                continue;
            };
            let mut content = Vec::new();
            for ep in &endpoints {
                let mut mappings = plugin_mappings(self);
                mappings.insert("name".to_string(), ep.name.clone());
                mappings.insert("hostname".to_string(), ep.hostname.clone());
                mappings.insert("user".to_string(), ep.user.clone());
                mappings.insert("password".to_string(), ep.password.clone());
                mappings.insert("ip".to_string(), ep.ip_address.clone());
                content.extend(render::render(&template, &mappings)?);
            }
            outputs.insert(path.clone(), content);
        }
        Ok(outputs)
    }
}
