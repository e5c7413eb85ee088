//! Loading manifests from disk.

use std::fs;

use dicon_manifest::{Error, Language, Manifest};
use tempfile::TempDir;

const TOML: &str = r#"
[interface]
name = "Container"
package = "app"

[output]
path = "di/container_gen.go"
detect_cycles = true

[[methods]]
name = "Logger"
returns = [{ type = "Logger" }]
"#;

const JSON: &str = r#"{
  "interface": { "name": "Container", "package": "crate::app" },
  "output": { "language": "rust" },
  "methods": [
    { "name": "logger", "returns": [{ "type": "Logger" }] }
  ]
}"#;

#[test]
fn test_toml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dicon.toml");
    fs::write(&path, TOML).unwrap();

    let manifest = Manifest::from_file(&path).unwrap();
    assert_eq!(manifest.language(), Language::Go);
    assert!(manifest.output.detect_cycles);
    assert_eq!(
        manifest.output.path.as_deref(),
        Some(std::path::Path::new("di/container_gen.go"))
    );
}

#[test]
fn test_json_file_by_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dicon.json");
    fs::write(&path, JSON).unwrap();

    let manifest = Manifest::from_file(&path).unwrap();
    assert_eq!(manifest.language(), Language::Rust);
    assert_eq!(manifest.descriptor().methods[0].name, "logger");
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = Manifest::from_file(dir.path().join("dicon.toml")).unwrap_err();
    assert!(matches!(*err, Error::Io { .. }));
}

#[test]
fn test_parse_error_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[interface\nname = 1").unwrap();

    let err = Manifest::from_file(&path).unwrap_err();
    match *err {
        Error::Parse { ref src, .. } => assert!(src.name().ends_with("broken.toml")),
        ref other => panic!("unexpected error: {other:?}"),
    }
}
