//! Capacity growth when a mutation outgrows the mapped buffer.

use crate::common::*;

#[test]
fn value_larger_than_several_increments() {
    let t = TestDb::small_grow();
    let big = "x".repeat(1000);

    t.db.write("/vms/vm1/blob", &big).unwrap();
    assert_eq!(t.db.read("/vms/vm1/blob").unwrap(), big);
    assert_eq!(t.db.read("/vms/vm1/mem").unwrap(), "512");

    t.close();
    let origin = t.origin_json("vms/vm1.db");
    assert_eq!(origin["blob"].as_str().unwrap().len(), 1000);
    assert_eq!(origin["mem"], 512);
}

#[test]
fn many_small_writes_grow_step_by_step() {
    let t = TestDb::small_grow();
    for i in 0..200 {
        t.db.write(&format!("/key{}", i), &i.to_string()).unwrap();
    }
    for i in 0..200 {
        assert_eq!(t.db.read(&format!("/key{}", i)).unwrap(), i.to_string());
    }
    assert_eq!(t.db.list("/").unwrap().len(), 200 + 2);
}

#[test]
fn shrinking_content_keeps_exact_bytes_on_flush() {
    let t = TestDb::small_grow();
    t.db.inject("/vms/vm2/disks", &format!("[\"{}\"]", "d".repeat(500)))
        .unwrap();
    t.db.rm("/vms/vm2/disks").unwrap();

    t.close();
    let raw = std::fs::read_to_string(t.origin("vms/vm2.db")).unwrap();
    assert_eq!(raw, r#"{"mem":1024}"#);
}

#[test]
fn grown_document_survives_reopen() {
    let mut t = TestDb::small_grow();
    let big = "y".repeat(300);
    t.db.write("/settings/net/note", &big).unwrap();

    t.reopen(16);
    assert_eq!(t.db.read("/settings/net/note").unwrap(), big);
    assert_eq!(t.db.read("/settings/net/ip").unwrap(), "10.0.0.1");
}
