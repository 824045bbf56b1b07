//! Target resolution and recursion engine.
//!
//! Given one or more root target names, the resolver looks each up in the
//! target-definition graph, dispatches to a generator, merges the produced
//! [`FileMap`] into the accumulated result, and recurses into each target's
//! declared child targets. Work proceeds in waves: the root list is the
//! first wave, the union of its children the second, and so on.
//!
//! Two guards keep the recursion safe:
//! - direct self-references are stripped from every child list, and
//! - a global visited set ensures each target generates at most once per
//!   run, so indirect cycles (A→B→A) terminate too.
//!
//! Failure of one target (unknown name, inventory error, generation error)
//! is logged and skips only that target; materialization failures raised by
//! the sink abort the whole run.

use crate::config::Config;
use crate::core::{ConfgenError, FileMap, Result};
use crate::generator::{GenerationContext, Registry};
use crate::inventory::{ClientOptions, InventoryClient};
use std::collections::HashSet;
use tracing::{debug, error, info};

/// Per-run settings for the resolver.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Verbose diagnostics inside generators.
    pub verbose: bool,
    /// Overrides for the inventory client; defaults come from the config.
    pub client: Option<ClientOptions>,
}

/// Sink invoked once per wave with that wave's outputs and the number of
/// targets still in flight (this wave plus its queued children), so the
/// sink can tell a genuinely single-target run from the first wave of a
/// larger one.
///
/// The CLI plugs the output materializer in here; the service uses
/// [`drain`] and keeps only the merged result. Sinks are held across
/// awaits inside [`Resolver::run`], so the trait requires `Send` to keep
/// the run future spawnable.
pub trait WaveSink: Send {
    /// Handles one wave's outputs. Errors abort the whole run.
    fn write(&mut self, outputs: &FileMap, target_count: usize) -> Result<()>;
}

/// Sink that discards wave outputs (the merged map still accumulates).
pub struct Drain;

impl WaveSink for Drain {
    fn write(&mut self, _outputs: &FileMap, _target_count: usize) -> Result<()> {
        Ok(())
    }
}

/// Convenience constructor for the discarding sink.
#[must_use]
pub fn drain() -> Drain {
    Drain
}

/// The resolution engine. Borrows the configuration graph and generator
/// registry; owns nothing shared.
pub struct Resolver<'a> {
    config: &'a Config,
    registry: &'a Registry,
    options: RunOptions,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver over a configuration and registry.
    #[must_use]
    pub fn new(config: &'a Config, registry: &'a Registry, options: RunOptions) -> Self {
        Self {
            config,
            registry,
            options,
        }
    }

    /// Resolves and generates `targets` and all their descendants.
    ///
    /// Returns the merged output map for the whole run; key collisions
    /// across targets are overwritten by the most recently processed
    /// target (last-write-wins).
    pub async fn run(&self, targets: &[String], sink: &mut dyn WaveSink) -> Result<FileMap> {
        let client_options = self
            .options
            .client
            .clone()
            .unwrap_or_else(|| ClientOptions::from_config(self.config));
        let client = InventoryClient::new(&client_options)?;

        let mut merged = FileMap::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut wave: Vec<String> = targets.to_vec();

        while !wave.is_empty() {
            let wave_count = wave.len();
            let mut wave_outputs = FileMap::new();
            let mut next: Vec<String> = Vec::new();

            for name in &wave {
                if !visited.insert(name.clone()) {
                    debug!(target = %name, "already generated in this run, skipping");
                    continue;
                }
                match self.generate_one(name, &client).await {
                    Ok(outputs) => {
                        info!(target = %name, files = outputs.len(), "generated");
                        // last-write-wins across targets
                        merged.extend(outputs.clone());
                        wave_outputs.extend(outputs);
                        self.queue_children(name, &visited, &mut next);
                    }
                    Err(err) if err.is_fatal() => return Err(err),
                    Err(err) => {
                        error!(target = %name, %err, "failed to generate target, skipping");
                    }
                }
            }

            if !wave_outputs.is_empty() {
                sink.write(&wave_outputs, wave_count + next.len())?;
            }
            wave = next;
        }

        Ok(merged)
    }

    /// Generates a single target: graph lookup, dispatch, generation.
    async fn generate_one(&self, name: &str, client: &InventoryClient) -> Result<FileMap> {
        let definition = self
            .config
            .targets
            .get(name)
            .ok_or_else(|| ConfgenError::UnknownTarget(name.to_string()))?;
        let generator = self.registry.resolve(name, definition)?;
        let ctx = GenerationContext {
            target: name,
            definition,
            client,
            verbose: self.options.verbose,
        };
        generator.generate(&ctx).await
    }

    /// Appends `name`'s children to the next wave, excluding the target
    /// itself and anything already visited or queued.
    fn queue_children(&self, name: &str, visited: &HashSet<String>, next: &mut Vec<String>) {
        let Some(definition) = self.config.targets.get(name) else {
            return;
        };
        for child in &definition.run_targets {
            if child == name {
                debug!(target = %name, "dropping self-referencing child target");
                continue;
            }
            if visited.contains(child) || next.contains(child) {
                continue;
            }
            next.push(child.clone());
        }
    }
}
