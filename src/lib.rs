//! confgen - cluster configuration generator
//!
//! Renders operator-facing configuration artifacts (DHCP host maps,
//! console-manager entries, warewulf provisioning files) by substituting
//! live inventory data into `{{placeholder}}` templates. Inventory comes
//! from a state-management service over HTTP: ethernet interfaces, Redfish
//! endpoints, and component state records.
//!
//! Two invocation modes share one engine:
//! - the `generate` CLI command runs a single pass and materializes the
//!   outputs (stdout, file, directory, or tar.gz archive), and
//! - the `serve` command exposes generation over HTTP for other services.
//!
//! # Core Modules
//!
//! - [`cli`] - command-line interface and subcommands
//! - [`config`] - YAML configuration document and target graph
//! - [`core`] - shared type aliases and the crate error type
//! - [`extension`] - declarative YAML generator extensions
//! - [`generator`] - the `Generator` trait, built-ins, and the registry
//! - [`inventory`] - typed HTTP client for the state-management API
//! - [`output`] - output materialization (stdout, file, directory, archive)
//! - [`render`] - `{{placeholder}}` template rendering
//! - [`resolver`] - target resolution and the recursion engine
//! - [`server`] - the long-running HTTP service
//!
//! # Generation Flow
//!
//! A target name selects a generator (built-in or extension) and a target
//! definition (templates, verbatim files, child targets). The resolver
//! walks the target graph in waves, each generator fetches the inventory
//! data it needs, renders its templates, and returns a file map; the
//! materializer decides where the bytes land.

pub mod cli;
pub mod config;
pub mod core;
pub mod extension;
pub mod generator;
pub mod inventory;
pub mod output;
pub mod render;
pub mod resolver;
pub mod server;
