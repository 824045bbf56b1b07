//! Typed client for the remote state-management (inventory) service.
//!
//! Inventory records are read-only snapshots fetched per generation call;
//! nothing is cached or persisted locally. The client issues one HTTP GET
//! per fetch against a fixed base path, attaches a bearer `Authorization`
//! header when a token is configured, and trusts a custom CA when one is
//! supplied. There are no retries at this layer.

mod client;
mod types;

pub use client::{ClientOptions, InventoryClient};
pub use types::{Component, EthernetInterface, IpAddress, RedfishEndpoint};
