//! Shared helpers for CLI end-to-end tests.
//!
//! Seeds a repository store layout into a temp directory so the binary
//! can run against it through the directory store.

use assert_fs::prelude::*;
use assert_fs::TempDir;

/// Seed a two-layer repository with a complete `zk` package and an
/// unsupported `kafka` package.
pub fn seed_repository(temp: &TempDir) {
    temp.child("layerpack/repository/0/name")
        .write_str("base")
        .unwrap();
    temp.child("layerpack/repository/1/name")
        .write_str("site")
        .unwrap();

    temp.child("layerpack/repository/0/repo/meta/index.json")
        .write_str(
            r#"{
                "packages": [
                    {
                        "name": "zk",
                        "description": "coordination service",
                        "framework": true,
                        "currentVersion": "2.5.0",
                        "versions": {"2.5.0": "0", "2.6.0": "1"}
                    },
                    {
                        "name": "kafka",
                        "description": "message broker",
                        "framework": true,
                        "currentVersion": "0.9.0",
                        "versions": {"0.9.0": "0"}
                    }
                ]
            }"#,
        )
        .unwrap();

    let base = "layerpack/repository/0/repo/packages/Z/zk/1";
    temp.child(format!("{}/command.json", base))
        .write_str(r#"{"pip": []}"#)
        .unwrap();
    temp.child(format!("{}/config.json", base))
        .write_str(
            r#"{
                "type": "object",
                "properties": {
                    "instances": {"type": "integer", "default": 3}
                }
            }"#,
        )
        .unwrap();
    temp.child(format!("{}/marathon.json", base))
        .write_str(r#"{"id": "zk", "count": {{instances}}}"#)
        .unwrap();
    temp.child(format!("{}/package.json", base))
        .write_str(r#"{"name": "zk"}"#)
        .unwrap();

    temp.child("layerpack/repository/1/repo/packages/Z/zk/1/mantl.json")
        .write_str(r#"{"instances": 5}"#)
        .unwrap();
}
