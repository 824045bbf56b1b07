//! Integration tests for one-shot generation and output materialization.

use crate::{confgen, write_example_config};
use flate2::read::GzDecoder;
use predicates::prelude::*;
use std::io::Read as _;
use tempfile::TempDir;

#[test]
fn test_generate_prints_to_stdout_by_default() {
    let temp = TempDir::new().unwrap();
    write_example_config(temp.path());

    confgen(temp.path())
        .args(["generate", "example"])
        .assert()
        .success()
        .stdout(predicate::str::contains("This is an example generator"));
}

#[test]
fn test_generate_writes_single_file_verbatim() {
    let temp = TempDir::new().unwrap();
    write_example_config(temp.path());
    let output = temp.path().join("example.conf");

    confgen(temp.path())
        .args(["generate", "example", "--output"])
        .arg(&output)
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("This is an example generator"));
}

#[test]
fn test_generate_archive_bundles_outputs() {
    let temp = TempDir::new().unwrap();
    write_example_config(temp.path());

    confgen(temp.path())
        .args(["generate", "example", "--archive", "--output", "bundle"])
        .assert()
        .success();

    let decoder = GzDecoder::new(std::fs::File::open(temp.path().join("bundle.tar.gz")).unwrap());
    let mut archive = tar::Archive::new(decoder);
    let mut names = Vec::new();
    for entry in archive.entries().unwrap() {
        let mut entry = entry.unwrap();
        names.push(entry.path().unwrap().to_string_lossy().into_owned());
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        assert!(!content.is_empty());
    }
    assert_eq!(names, vec!["example"]);
}

#[test]
fn test_unknown_target_is_skipped_not_fatal() {
    let temp = TempDir::new().unwrap();
    write_example_config(temp.path());

    // one bad name must not take down the sibling target
    confgen(temp.path())
        .args(["generate", "ghost", "example"])
        .assert()
        .success()
        .stdout(predicate::str::contains("This is an example generator"));
}

#[test]
fn test_generate_with_only_unknown_targets_reports_nothing() {
    let temp = TempDir::new().unwrap();
    write_example_config(temp.path());

    confgen(temp.path())
        .args(["generate", "ghost"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No outputs were generated"));
}

#[test]
fn test_child_targets_run_after_parent() {
    let temp = TempDir::new().unwrap();
    // parent delegates to the example generator through a child target
    std::fs::write(
        temp.path().join("confgen.yaml"),
        "targets:\n  example:\n    targets:\n      - child\n  child:\n    plugin: site.yaml\n",
    )
    .unwrap();
    std::fs::write(
        temp.path().join("site.yaml"),
        concat!(
            "generator:\n",
            "  name: site\n",
            "  version: \"1.0.0\"\n",
            "  description: Static row.\n",
            "  row: \"static-row\"\n",
        ),
    )
    .unwrap();

    confgen(temp.path())
        .args(["generate", "example", "--output", "out"])
        .assert()
        .success();

    // both waves materialized into the same directory
    assert!(temp.path().join("out/example").is_file());
    assert!(temp.path().join("out/site").is_file());
}
