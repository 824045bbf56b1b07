//! Name-keyed generator registry and dispatch.

use super::builtin;
use super::Generator;
use crate::config::Target;
use crate::core::{ConfgenError, Result};
use crate::extension;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// Holds the fixed built-in generator set plus dynamically loaded ones.
///
/// Constructed once at startup and shared by reference with every call
/// site. Built-ins are immutable after construction; the loaded set is
/// read-mostly and guarded by a lock so the service can extend it safely.
pub struct Registry {
    builtin: HashMap<String, Arc<dyn Generator>>,
    loaded: RwLock<HashMap<String, Arc<dyn Generator>>>,
}

impl Registry {
    /// Creates a registry holding the built-in generators.
    #[must_use]
    pub fn new() -> Self {
        let builtin = builtin::all()
            .into_iter()
            .map(|g| (g.name().to_string(), g))
            .collect();
        Self {
            builtin,
            loaded: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a loaded generator under its self-reported name.
    ///
    /// Last registered wins on name collision.
    pub fn register(&self, generator: Arc<dyn Generator>) {
        let name = generator.name().to_string();
        let mut loaded = self.loaded.write().expect("registry lock poisoned");
        if loaded.insert(name.clone(), generator).is_some() {
            debug!(name, "replaced previously loaded generator");
        }
    }

    /// Scans `dir` (non-recursively) for extension definitions and registers
    /// everything that loads; per-file failures are logged, not raised.
    pub fn load_directory(&self, dir: impl AsRef<Path>) {
        for generator in extension::load_directory(dir.as_ref()).into_values() {
            self.register(generator);
        }
    }

    /// Resolves a target name to a generator.
    ///
    /// Lookup order: built-ins, then loaded extensions, then - when the
    /// target definition names an extension path not yet loaded - load and
    /// register it on demand. A name matching nothing fails with
    /// [`ConfgenError::UnknownTarget`].
    pub fn resolve(&self, name: &str, definition: &Target) -> Result<Arc<dyn Generator>> {
        if let Some(generator) = self.builtin.get(name) {
            return Ok(Arc::clone(generator));
        }
        if let Some(generator) = self
            .loaded
            .read()
            .expect("registry lock poisoned")
            .get(name)
        {
            return Ok(Arc::clone(generator));
        }
        if !definition.plugin.is_empty() {
            warn!(target = name, plugin = %definition.plugin, "target not registered, loading extension on demand");
            let generator = extension::load_extension(Path::new(&definition.plugin))?;
            self.register(Arc::clone(&generator));
            return Ok(generator);
        }
        Err(ConfgenError::UnknownTarget(name.to_string()))
    }

    /// Names of every registered generator, built-ins first.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.builtin.keys().cloned().collect();
        names.sort();
        let mut loaded: Vec<String> = self
            .loaded
            .read()
            .expect("registry lock poisoned")
            .keys()
            .cloned()
            .collect();
        loaded.sort();
        names.extend(loaded);
        names
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FileMap;
    use crate::generator::GenerationContext;
    use async_trait::async_trait;

    struct Named(&'static str, &'static str);

    #[async_trait]
    impl Generator for Named {
        fn name(&self) -> &str {
            self.0
        }
        fn description(&self) -> String {
            self.1.to_string()
        }
        async fn generate(&self, _ctx: &GenerationContext<'_>) -> crate::core::Result<FileMap> {
            Ok(FileMap::new())
        }
    }

    #[test]
    fn test_builtins_are_registered() {
        let registry = Registry::new();
        for name in ["dnsmasq", "dhcpd", "conman", "warewulf", "hostfile", "syslog", "powerman", "example"] {
            assert!(
                registry.resolve(name, &Target::default()).is_ok(),
                "missing built-in '{name}'"
            );
        }
    }

    #[test]
    fn test_builtin_preferred_over_loaded() {
        let registry = Registry::new();
        registry.register(Arc::new(Named("dnsmasq", "impostor")));
        let resolved = registry.resolve("dnsmasq", &Target::default()).unwrap();
        assert_ne!(resolved.description(), "impostor");
    }

    #[test]
    fn test_last_registered_wins() {
        let registry = Registry::new();
        registry.register(Arc::new(Named("site", "first")));
        registry.register(Arc::new(Named("site", "second")));
        let resolved = registry.resolve("site", &Target::default()).unwrap();
        assert_eq!(resolved.description(), "second");
    }

    #[test]
    fn test_unknown_name_without_plugin_fails() {
        let registry = Registry::new();
        let err = registry.resolve("nope", &Target::default()).err().unwrap();
        assert!(matches!(err, ConfgenError::UnknownTarget(name) if name == "nope"));
    }

    #[test]
    fn test_failed_on_demand_load_leaves_registry_unmodified() {
        let registry = Registry::new();
        let before = registry.names();
        let definition = Target {
            plugin: "/does/not/exist.yaml".to_string(),
            ..Target::default()
        };
        assert!(registry.resolve("site", &definition).is_err());
        assert_eq!(registry.names(), before);
    }
}
