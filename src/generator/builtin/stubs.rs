//! Registered-but-unimplemented generators.
//!
//! These names are reserved in the registry so that target definitions can
//! reference them today; generation fails with a clear message instead of
//! an unknown-target error.

use crate::core::{ConfgenError, FileMap, Result};
use crate::generator::{GenerationContext, Generator};
use async_trait::async_trait;

macro_rules! stub_generator {
    ($type:ident, $name:literal, $what:literal) => {
        #[doc = concat!("Stub generator for ", $what, ".")]
        pub struct $type;

        #[async_trait]
        impl Generator for $type {
            fn name(&self) -> &str {
                $name
            }

            fn description(&self) -> String {
                concat!("Generator for ", $what, " (not implemented).").to_string()
            }

            async fn generate(&self, _ctx: &GenerationContext<'_>) -> Result<FileMap> {
                Err(ConfgenError::Unimplemented($name.to_string()))
            }
        }
    };
}

stub_generator!(Hostfile, "hostfile", "DNS forwarder host files");
stub_generator!(Syslog, "syslog", "syslog forwarding configs");
stub_generator!(Powerman, "powerman", "power-manager device maps");
