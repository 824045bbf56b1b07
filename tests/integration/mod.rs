//! Integration test suite for confgen.
//!
//! End-to-end tests driving the compiled binary through `assert_cmd`.
//! Everything here runs offline: targets either use the `example`
//! generator or declarative extensions with no inventory source, so no
//! state-management service is required.
//!
//! # Running
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! Tests are organized by functionality area:
//! - **config_cmd**: `config init` and `config show`
//! - **generate_cmd**: one-shot generation and output materialization
//! - **extensions**: declarative extension loading and `inspect`
//! - **fetch_cmd**: fetching from a remote service

mod config_cmd;
mod extensions;
mod fetch_cmd;
mod generate_cmd;

use assert_cmd::Command;
use std::path::Path;

/// The binary under test, with its working directory pinned to `dir`.
pub fn confgen(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("confgen").expect("binary builds");
    cmd.current_dir(dir);
    cmd
}

/// Writes a config whose only target is the offline `example` generator.
pub fn write_example_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("confgen.yaml");
    std::fs::write(&path, "targets:\n  example: {}\n").expect("write config");
    path
}
