//! End-to-end tests for the `layerpack show` command.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

/// Get a Command for the layerpack binary
fn layerpack_cmd() -> Command {
    Command::cargo_bin("layerpack").unwrap()
}

#[test]
fn test_show_help() {
    layerpack_cmd()
        .arg("show")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("merged configuration"));
}

#[test]
fn test_show_prints_merged_config() {
    let temp = assert_fs::TempDir::new().unwrap();
    common::seed_repository(&temp);

    let output = layerpack_cmd()
        .arg("show")
        .arg("zk")
        .arg("--store")
        .arg(temp.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let config: serde_json::Value = serde_json::from_slice(&output).unwrap();
    // Schema default 3 overlaid with the site layer's 5.
    assert_eq!(config["instances"], serde_json::Value::from(5));
}

#[test]
fn test_show_name_is_case_insensitive() {
    let temp = assert_fs::TempDir::new().unwrap();
    common::seed_repository(&temp);

    layerpack_cmd()
        .arg("show")
        .arg("ZK")
        .arg("--store")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("instances"));
}

#[test]
fn test_show_documents_lists_presence() {
    let temp = assert_fs::TempDir::new().unwrap();
    common::seed_repository(&temp);

    layerpack_cmd()
        .arg("show")
        .arg("zk")
        .arg("--documents")
        .arg("--store")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("zk 2.6.0 (release 1)"))
        .stdout(predicate::str::contains("mantl.json"))
        .stdout(predicate::str::contains("present"));
}

#[test]
fn test_show_unknown_package_suggests_similar() {
    let temp = assert_fs::TempDir::new().unwrap();
    common::seed_repository(&temp);

    layerpack_cmd()
        .arg("show")
        .arg("kafak")
        .arg("--store")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Package not found: kafak"))
        .stderr(predicate::str::contains("Did you mean 'kafka'?"));
}

#[test]
fn test_show_unmatched_version_falls_back_to_latest() {
    let temp = assert_fs::TempDir::new().unwrap();
    common::seed_repository(&temp);

    layerpack_cmd()
        .arg("show")
        .arg("zk")
        .arg("-V")
        .arg("9.9.9")
        .arg("--documents")
        .arg("--store")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("zk 2.6.0"));
}
