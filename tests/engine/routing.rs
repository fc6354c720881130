//! Path routing across the default store and named stores.

use crate::common::*;

#[test]
fn host_settings_scenario() {
    let t = TestDb::new();
    let db = &t.db;

    db.write("/hostname", "vm1").unwrap();
    assert_eq!(db.read("/hostname").unwrap(), "vm1");

    db.write("/settings/net/ip", "10.0.0.2").unwrap();
    assert_eq!(db.dump("/settings/net").unwrap(), r#"{"ip":"10.0.0.2"}"#);

    let list = db.list("/").unwrap();
    assert!(list.contains(&"hostname".to_string()));
    assert!(list.contains(&"settings".to_string()));
    assert!(list.contains(&"vms".to_string()));

    let dump: serde_json::Value = serde_json::from_str(&db.dump("/").unwrap()).unwrap();
    assert_eq!(dump["hostname"], "vm1");
    assert_eq!(dump["settings"], serde_json::json!({"net": {"ip": "10.0.0.2"}}));
}

#[test]
fn root_is_not_a_key() {
    let t = TestDb::new();
    assert!(matches!(t.db.read("/"), Err(Error::Path(_))));
    assert!(matches!(t.db.write("/", "x"), Err(Error::Path(_))));
    assert!(matches!(t.db.rm("/"), Err(Error::Path(_))));
    assert!(matches!(t.db.inject("/", "{}"), Err(Error::Path(_))));
}

#[test]
fn reserved_characters_rejected_before_routing() {
    let t = TestDb::new();
    for path in ["/host.name", "/vms/vm#1/mem", "/settings/*", "/a.b/c"] {
        assert!(
            matches!(t.db.read(path), Err(Error::Path(_))),
            "{} should be rejected",
            path
        );
        assert!(matches!(t.db.write(path, "v"), Err(Error::Path(_))));
        assert!(matches!(t.db.exists(path), Err(Error::Path(_))));
    }
    // nothing was created by the rejected writes
    assert_eq!(t.db.dump("/vms/vm1").unwrap(), r#"{"mem":512}"#);
}

#[test]
fn read_of_object_is_type_mismatch_but_dump_works() {
    let t = TestDb::new();
    t.db.inject("/net", r#"{"ip":"10.0.0.3","mask":24}"#).unwrap();

    assert!(matches!(
        t.db.read("/net"),
        Err(Error::TypeMismatch { .. })
    ));
    assert_eq!(t.db.dump("/net").unwrap(), r#"{"ip":"10.0.0.3","mask":24}"#);
    assert_eq!(t.db.read("/net/mask").unwrap(), "24");
}

#[test]
fn store_level_operations() {
    let t = TestDb::new();
    assert_eq!(t.db.list("/vms").unwrap(), vec!["vm1", "vm2"]);
    assert_eq!(
        t.db.dump("/vms").unwrap(),
        r#"{"vm1":{"mem":512},"vm2":{"mem":1024}}"#
    );
    assert!(t.db.exists("/vms").unwrap());
    assert!(matches!(t.db.write("/vms", "x"), Err(Error::Path(_))));
    assert!(matches!(t.db.rm("/vms/vm1"), Err(Error::Path(_))));
}

#[test]
fn missing_targets() {
    let t = TestDb::new();
    assert!(matches!(t.db.read("/vms/vm9/mem"), Err(Error::NotFound(_))));
    assert!(matches!(t.db.read("/nothing"), Err(Error::NotFound(_))));
    assert!(!t.db.exists("/vms/vm9").unwrap());
    assert!(!t.db.exists("/vms/vm1/cpus").unwrap());
    assert!(!t.db.exists("/nothing").unwrap());
}

#[test]
fn rm_then_exists_is_false() {
    let t = TestDb::new();
    t.db.write("/vms/vm2/name", "guest").unwrap();
    assert!(t.db.exists("/vms/vm2/name").unwrap());

    t.db.rm("/vms/vm2/name").unwrap();
    assert!(!t.db.exists("/vms/vm2/name").unwrap());
    assert!(matches!(t.db.rm("/vms/vm2/name"), Err(Error::NotFound(_))));
    assert_eq!(t.db.read("/vms/vm2/mem").unwrap(), "1024");
}

#[test]
fn nested_write_creates_intermediate_objects() {
    let t = TestDb::new();
    t.db.write("/vms/vm1/disk/0/path", "/dev/xvda").unwrap();
    assert_eq!(t.db.list("/vms/vm1/disk").unwrap(), vec!["0"]);
    assert_eq!(t.db.read("/vms/vm1/disk/0/path").unwrap(), "/dev/xvda");
}

#[test]
fn write_through_scalar_leaves_document_unchanged() {
    let t = TestDb::new();
    let before = t.db.dump("/vms/vm1").unwrap();
    assert!(matches!(
        t.db.write("/vms/vm1/mem/size", "1"),
        Err(Error::TypeMismatch { .. })
    ));
    assert_eq!(t.db.dump("/vms/vm1").unwrap(), before);
}

#[test]
fn invalid_inject_leaves_document_unchanged() {
    let t = TestDb::new();
    let before = t.db.dump("/settings/net").unwrap();
    assert!(matches!(
        t.db.inject("/settings/net/extra", "{not json"),
        Err(Error::Format { .. })
    ));
    assert_eq!(t.db.dump("/settings/net").unwrap(), before);
}

#[test]
fn binary_read_matches_text_read() {
    let t = TestDb::new();
    t.db.write("/motd", "héllo").unwrap();
    assert_eq!(t.db.read_binary("/motd").unwrap(), "héllo".as_bytes());
}
