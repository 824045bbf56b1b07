//! Integration tests for declarative extension loading through the CLI.

use crate::confgen;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const SITE_EXTENSION: &str = r#"generator:
  name: site-banner
  version: "1.0.0"
  description: Static banner rows.
  row: "banner from {{plugin_name}} {{plugin_version}}"
"#;

fn write_extension(dir: &Path) {
    let ext_dir = dir.join("extensions");
    std::fs::create_dir_all(&ext_dir).unwrap();
    std::fs::write(ext_dir.join("site-banner.yaml"), SITE_EXTENSION).unwrap();
}

#[test]
fn test_extension_loaded_from_config_directory() {
    let temp = TempDir::new().unwrap();
    write_extension(temp.path());
    std::fs::write(
        temp.path().join("confgen.yaml"),
        "targets:\n  site-banner: {}\nextensions:\n  - extensions\n",
    )
    .unwrap();

    confgen(temp.path())
        .args(["generate", "site-banner"])
        .assert()
        .success()
        .stdout(predicate::str::contains("banner from site-banner 1.0.0"));
}

#[test]
fn test_extension_loaded_from_flag() {
    let temp = TempDir::new().unwrap();
    write_extension(temp.path());
    std::fs::write(temp.path().join("confgen.yaml"), "targets:\n  site-banner: {}\n").unwrap();

    confgen(temp.path())
        .args(["generate", "site-banner", "--extensions", "extensions"])
        .assert()
        .success()
        .stdout(predicate::str::contains("banner from site-banner"));
}

#[test]
fn test_extension_loaded_on_demand_via_plugin_path() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("site.yaml"), SITE_EXTENSION).unwrap();
    // the target name matches nothing registered; the plugin path supplies it
    std::fs::write(
        temp.path().join("confgen.yaml"),
        "targets:\n  custom:\n    plugin: site.yaml\n",
    )
    .unwrap();

    confgen(temp.path())
        .args(["generate", "custom"])
        .assert()
        .success()
        .stdout(predicate::str::contains("banner from site-banner"));
}

#[test]
fn test_rows_feed_target_templates() {
    let temp = TempDir::new().unwrap();
    write_extension(temp.path());
    std::fs::write(
        temp.path().join("site.tpl"),
        "# managed file\n{{rows}}\n# end\n",
    )
    .unwrap();
    std::fs::write(
        temp.path().join("confgen.yaml"),
        "targets:\n  site-banner:\n    templates:\n      - site.tpl\nextensions:\n  - extensions\n",
    )
    .unwrap();

    confgen(temp.path())
        .args(["generate", "site-banner"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# managed file"))
        .stdout(predicate::str::contains("banner from site-banner 1.0.0"));
}

#[test]
fn test_inspect_lists_extension_metadata() {
    let temp = TempDir::new().unwrap();
    write_extension(temp.path());

    confgen(temp.path())
        .args(["inspect", "extensions"])
        .assert()
        .success()
        .stdout(predicate::str::contains("site-banner"))
        .stdout(predicate::str::contains("1.0.0"))
        .stdout(predicate::str::contains("Static banner rows."));
}

#[test]
fn test_inspect_empty_directory_reports_nothing_found() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join("empty")).unwrap();

    confgen(temp.path())
        .args(["inspect", "empty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No extensions found"));
}

#[test]
fn test_broken_extension_does_not_break_the_run() {
    let temp = TempDir::new().unwrap();
    write_extension(temp.path());
    std::fs::write(
        temp.path().join("extensions/broken.yaml"),
        "not-a-generator: true\n",
    )
    .unwrap();
    std::fs::write(
        temp.path().join("confgen.yaml"),
        "targets:\n  site-banner: {}\nextensions:\n  - extensions\n",
    )
    .unwrap();

    confgen(temp.path())
        .args(["generate", "site-banner"])
        .assert()
        .success()
        .stdout(predicate::str::contains("banner from site-banner"));
}
