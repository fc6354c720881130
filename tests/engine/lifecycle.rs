//! Open, close and write-back to the origin files.

use std::fs;
use std::sync::Arc;

use crate::common::*;
use tempfile::TempDir;

#[test]
fn every_declared_document_readable_after_open() {
    let t = TestDb::with_default(r#"{"hostname":"host0"}"#);
    assert_eq!(t.db.read("/hostname").unwrap(), "host0");
    assert_eq!(t.db.read("/settings/net/ip").unwrap(), "10.0.0.1");
    assert_eq!(t.db.read("/vms/vm1/mem").unwrap(), "512");
    assert_eq!(t.db.read("/vms/vm2/mem").unwrap(), "1024");
    assert_eq!(t.db.store_names().unwrap(), vec!["settings", "vms"]);
}

#[test]
fn staging_area_exists_only_while_open() {
    let t = TestDb::new();
    let staged = dir_entries(t.root());
    assert!(staged.iter().any(|name| name.starts_with("dbd-cache")));

    t.close();
    assert_eq!(dir_entries(t.root()), vec!["db", "net.db", "vms"]);
}

#[test]
fn close_writes_every_document_back() {
    let t = TestDb::new();
    t.db.write("/hostname", "vm1").unwrap();
    t.db.write("/settings/net/ip", "10.0.0.2").unwrap();
    t.db.rm("/vms/vm2/mem").unwrap();

    let report = t.close();
    assert_eq!(report.documents_flushed, 4);
    assert_eq!(report.flush_failures, 0);

    assert_eq!(fs::read_to_string(t.origin("db")).unwrap(), r#"{"hostname":"vm1"}"#);
    assert_eq!(
        fs::read_to_string(t.origin("net.db")).unwrap(),
        r#"{"ip":"10.0.0.2"}"#
    );
    assert_eq!(fs::read_to_string(t.origin("vms/vm2.db")).unwrap(), "{}");
}

#[test]
fn origin_untouched_until_close() {
    let t = TestDb::new();
    t.db.write("/settings/net/ip", "10.0.0.9").unwrap();
    assert_eq!(t.origin_json("net.db")["ip"], "10.0.0.1");

    t.close();
    assert_eq!(t.origin_json("net.db")["ip"], "10.0.0.9");
}

#[test]
fn operations_after_close_fail() {
    let t = TestDb::new();
    t.close();

    assert!(!t.db.is_open());
    assert!(matches!(t.db.read("/hostname"), Err(Error::Closed)));
    assert!(matches!(t.db.write("/hostname", "x"), Err(Error::Closed)));
    assert!(matches!(t.db.list("/"), Err(Error::Closed)));
    assert!(matches!(t.db.exists("/vms"), Err(Error::Closed)));
}

#[test]
fn second_close_is_empty() {
    let t = TestDb::new();
    assert_eq!(t.close().documents_flushed, 4);
    assert_eq!(t.close(), CloseReport::default());
}

#[test]
fn drop_writes_back() {
    let dir = TempDir::new().unwrap();
    write_layout(dir.path(), "{}");
    {
        let db = Arc::new(Database::open(layout_config(dir.path(), 64)).unwrap());
        db.write("/vms/vm1/name", "guest").unwrap();
    }
    let raw = fs::read_to_string(dir.path().join("vms").join("vm1.db")).unwrap();
    assert_eq!(raw, r#"{"mem":512,"name":"guest"}"#);
    assert_eq!(dir_entries(dir.path()), vec!["db", "net.db", "vms"]);
}

#[test]
fn failed_open_leaves_no_staging() {
    let dir = TempDir::new().unwrap();
    write_layout(dir.path(), "{}");
    fs::write(dir.path().join("vms").join("vm2.db"), "{broken").unwrap();

    let result = Database::open(layout_config(dir.path(), 64));
    assert!(matches!(result, Err(Error::Format { .. })));
    assert_eq!(dir_entries(dir.path()), vec!["db", "net.db", "vms"]);
}

#[test]
fn missing_origin_file_fails_open() {
    let dir = TempDir::new().unwrap();
    write_layout(dir.path(), "{}");
    fs::remove_file(dir.path().join("net.db")).unwrap();

    let result = Database::open(layout_config(dir.path(), 64));
    assert!(matches!(result, Err(Error::Io { .. })));
    assert_eq!(dir_entries(dir.path()), vec!["db", "vms"]);
}
