//! Property tests over arbitrary keys and values.

use proptest::prelude::*;

use crate::common::*;

fn key() -> impl Strategy<Value = String> {
    "k_[a-z0-9_]{0,8}"
}

fn value() -> impl Strategy<Value = String> {
    "\\PC{0,64}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn write_then_read_round_trips(key in key(), v in value()) {
        let t = TestDb::new();
        let path = format!("/vms/vm1/{}", key);
        t.db.write(&path, &v).unwrap();
        prop_assert_eq!(t.db.read(&path).unwrap(), v);
    }

    #[test]
    fn repeated_write_is_idempotent(key in key(), v in value()) {
        let t = TestDb::new();
        let path = format!("/{}", key);
        t.db.write(&path, &v).unwrap();
        let once = t.db.dump("/").unwrap();
        t.db.write(&path, &v).unwrap();
        prop_assert_eq!(t.db.dump("/").unwrap(), once);
    }

    #[test]
    fn rm_then_exists_is_false(parent in key(), child in key(), v in value()) {
        let t = TestDb::new();
        let path = format!("/settings/net/{}/{}", parent, child);
        t.db.write(&path, &v).unwrap();
        prop_assert!(t.db.exists(&path).unwrap());
        t.db.rm(&path).unwrap();
        prop_assert!(!t.db.exists(&path).unwrap());
        let parent_path = format!("/settings/net/{}", parent);
        prop_assert!(t.db.exists(&parent_path).unwrap());
    }

    #[test]
    fn value_survives_close_and_reopen(key in key(), v in value()) {
        let mut t = TestDb::small_grow();
        let path = format!("/vms/vm2/{}", key);
        t.db.write(&path, &v).unwrap();
        t.reopen(16);
        prop_assert_eq!(t.db.read(&path).unwrap(), v);
    }
}
