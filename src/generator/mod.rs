//! Generator implementations and their registry.
//!
//! A [`Generator`] turns one target definition plus live inventory data into
//! a [`FileMap`]. The built-in set is registered once at startup; additional
//! generators come from declarative extension definitions (see
//! [`crate::extension`]) loaded from disk.

pub mod builtin;
mod registry;

pub use registry::Registry;

use crate::config::Target;
use crate::core::{FileMap, Mappings, Result, VERSION};
use crate::inventory::InventoryClient;
use async_trait::async_trait;

/// Per-call context handed to a generator.
///
/// Owned by the call that created it; concurrent generations each build
/// their own.
pub struct GenerationContext<'a> {
    /// Name of the target being generated.
    pub target: &'a str,
    /// The target's definition from the configuration graph.
    pub definition: &'a Target,
    /// Client for fetching inventory data.
    pub client: &'a InventoryClient,
    /// Verbose diagnostics requested.
    pub verbose: bool,
}

/// A named implementation producing a [`FileMap`] from inventory data and a
/// target's template/file set.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Self-reported name; the registry key.
    fn name(&self) -> &str;

    /// Implementation version.
    fn version(&self) -> &str {
        VERSION
    }

    /// Human-readable description.
    fn description(&self) -> String;

    /// Produces the output map for one target.
    async fn generate(&self, ctx: &GenerationContext<'_>) -> Result<FileMap>;
}

/// Variable set every generator exposes to its templates.
#[must_use]
pub fn plugin_mappings(generator: &dyn Generator) -> Mappings {
    let mut mappings = Mappings::new();
    mappings.insert("plugin_name".to_string(), generator.name().to_string());
    mappings.insert("plugin_version".to_string(), generator.version().to_string());
    mappings.insert("plugin_description".to_string(), generator.description());
    mappings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FileMap;

    struct Probe;

    #[async_trait]
    impl Generator for Probe {
        fn name(&self) -> &str {
            "probe"
        }
        fn description(&self) -> String {
            "probe generator".to_string()
        }
        async fn generate(&self, _ctx: &GenerationContext<'_>) -> Result<FileMap> {
            Ok(FileMap::new())
        }
    }

    #[test]
    fn test_plugin_mappings_cover_capability_set() {
        let mappings = plugin_mappings(&Probe);
        assert_eq!(mappings["plugin_name"], "probe");
        assert_eq!(mappings["plugin_version"], VERSION);
        assert_eq!(mappings["plugin_description"], "probe generator");
    }
}
