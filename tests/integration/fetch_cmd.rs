//! Integration tests for fetching from a remote service.

use crate::confgen;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_fetch_unreachable_service_fails_with_context() {
    let temp = TempDir::new().unwrap();

    // port 1 is never listening on loopback
    confgen(temp.path())
        .args(["fetch", "dnsmasq", "--host", "http://127.0.0.1:1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to reach"));
}

#[test]
fn test_fetch_requires_a_target() {
    let temp = TempDir::new().unwrap();
    confgen(temp.path()).arg("fetch").assert().failure();
}
