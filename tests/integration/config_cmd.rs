//! Integration tests for the `config` subcommand.

use crate::confgen;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_config_init_writes_stock_graph() {
    let temp = TempDir::new().unwrap();
    confgen(temp.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let raw = std::fs::read_to_string(temp.path().join("confgen.yaml")).unwrap();
    assert!(raw.contains("dnsmasq"));
    assert!(raw.contains("warewulf"));
    assert!(raw.contains("port: 27779"));
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let temp = TempDir::new().unwrap();
    confgen(temp.path()).args(["config", "init"]).assert().success();
    confgen(temp.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    confgen(temp.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_config_show_defaults_when_file_missing() {
    let temp = TempDir::new().unwrap();
    confgen(temp.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dnsmasq"))
        .stdout(predicate::str::contains("port: 3334"));
}

#[test]
fn test_config_show_is_the_default_subcommand() {
    let temp = TempDir::new().unwrap();
    confgen(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("inventory"));
}

#[test]
fn test_invalid_config_file_fails_loudly() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("confgen.yaml"), "targets: [not, a, map]").unwrap();
    confgen(temp.path())
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}
