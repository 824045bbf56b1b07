//! No-op example generator.

use crate::core::{FileMap, Result};
use crate::generator::{GenerationContext, Generator};
use async_trait::async_trait;

/// Produces one fixed output without touching the inventory service.
///
/// Useful for smoke-testing the pipeline end to end (CLI and service) and
/// as the smallest possible reference for writing a generator.
pub struct Example;

#[async_trait]
impl Generator for Example {
    fn name(&self) -> &str {
        "example"
    }

    fn description(&self) -> String {
        "Example generator producing a single static file.".to_string()
    }

    async fn generate(&self, _ctx: &GenerationContext<'_>) -> Result<FileMap> {
        let mut outputs = FileMap::new();
        outputs.insert(
            "example".to_string(),
            b"This is an example generator. See src/generator/builtin/example.rs \
for the smallest possible Generator implementation."
                .to_vec(),
        );
        Ok(outputs)
    }
}
