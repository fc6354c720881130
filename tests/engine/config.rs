//! Configuration loading and startup validation.

use std::fs;

use crate::common::*;
use tempfile::TempDir;

#[test]
fn duplicate_default_is_rejected() {
    let raw = r#"{
        "stores": {
            "default": {"path": "/config/a"},
            "default": {"path": "/config/b"}
        }
    }"#;
    assert!(matches!(
        DatabaseConfig::from_json_str(raw),
        Err(Error::Config(_))
    ));
}

#[test]
fn directory_default_fails_without_touching_disk() {
    let dir = TempDir::new().unwrap();
    write_layout(dir.path(), "{}");
    let config = DatabaseConfig::new()
        .with_store("default", StoreConfig::dir(dir.path().join("vms")))
        .with_staging_dir(dir.path());

    assert!(matches!(Database::open(config), Err(Error::Config(_))));
    assert_eq!(dir_entries(dir.path()), vec!["db", "net.db", "vms"]);
    assert_eq!(dir_entries(&dir.path().join("vms")), vec!["vm1.db", "vm2.db"]);
}

#[test]
fn open_from_json_file() {
    let dir = TempDir::new().unwrap();
    write_layout(dir.path(), r#"{"hostname":"host1"}"#);
    let root = dir.path().display().to_string();
    let config_path = dir.path().join("dbd.json");
    fs::write(
        &config_path,
        format!(
            r#"{{
                "staging_dir": "{root}",
                "stores": {{
                    "default": {{"path": "{root}/db"}},
                    "vms": {{"path": "{root}/vms", "is_dir": true, "grow_size": 128}}
                }}
            }}"#
        ),
    )
    .unwrap();

    let db = Database::open_file(&config_path).unwrap();
    assert_eq!(db.read("/hostname").unwrap(), "host1");
    assert_eq!(db.list("/vms").unwrap(), vec!["vm1", "vm2"]);
    assert_eq!(db.config().stores["vms"].grow_size, 128);
    db.close();
}

#[test]
fn open_from_toml_file() {
    let dir = TempDir::new().unwrap();
    write_layout(dir.path(), "{}");
    let root = dir.path().display().to_string();
    let config_path = dir.path().join("dbd.toml");
    fs::write(
        &config_path,
        format!(
            r#"
staging_dir = "{root}"

[stores.settings]
path = "{root}/net.db"
"#
        ),
    )
    .unwrap();

    let db = Database::open_file(&config_path).unwrap();
    assert_eq!(db.read("/settings/net/ip").unwrap(), "10.0.0.1");
    // no default store: top-level keys route nowhere
    assert!(matches!(db.read("/hostname"), Err(Error::NotFound(_))));
    assert_eq!(db.list("/").unwrap(), vec!["settings"]);
    db.close();
}

#[test]
fn missing_config_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = Database::open_file(dir.path().join("absent.json"));
    assert!(matches!(result, Err(Error::Io { .. })));
}

#[test]
fn config_error_names_the_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("dbd.json");
    fs::write(&config_path, r#"{"stores": {"default": {"path": "/x", "is_dir": true}}}"#)
        .unwrap();

    match Database::open_file(&config_path) {
        Err(Error::Config(msg)) => assert!(msg.contains("dbd.json"), "{}", msg),
        other => panic!("expected config error, got {:?}", other.err()),
    }
}
