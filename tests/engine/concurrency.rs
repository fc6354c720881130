//! Concurrent readers and writers sharing one database.

use std::fs;
use std::sync::{Arc, Barrier};
use std::thread;

use crate::common::*;
use tempfile::TempDir;

const THREADS: usize = 8;
const WRITES: usize = 50;

fn open_with_vms(count: usize) -> (TempDir, Arc<Database>) {
    let dir = TempDir::new().unwrap();
    write_layout(dir.path(), "{}");
    for i in 3..=count {
        fs::write(dir.path().join("vms").join(format!("vm{}.db", i)), "{}").unwrap();
    }
    let db = Database::open(layout_config(dir.path(), 32)).unwrap();
    (dir, Arc::new(db))
}

#[test]
fn writers_on_distinct_documents_lose_nothing() {
    let (dir, db) = open_with_vms(THREADS);
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (1..=THREADS)
        .map(|t| {
            let db = Arc::clone(&db);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..WRITES {
                    db.write(&format!("/vms/vm{}/k{}", t, i), &format!("{}-{}", t, i))
                        .unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    for t in 1..=THREADS {
        for i in 0..WRITES {
            assert_eq!(
                db.read(&format!("/vms/vm{}/k{}", t, i)).unwrap(),
                format!("{}-{}", t, i)
            );
        }
    }

    db.close();
    let vm5 = fs::read_to_string(dir.path().join("vms").join("vm5.db")).unwrap();
    let vm5: serde_json::Value = serde_json::from_str(&vm5).unwrap();
    assert_eq!(vm5.as_object().unwrap().len(), WRITES);
}

#[test]
fn writers_on_one_document_lose_nothing() {
    let (_dir, db) = open_with_vms(2);
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let db = Arc::clone(&db);
            thread::spawn(move || {
                for i in 0..WRITES {
                    db.write(&format!("/shared/t{}_{}", t, i), "v").unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(db.list("/shared").unwrap().len(), THREADS * WRITES);
}

#[test]
fn readers_never_see_partial_documents() {
    let (_dir, db) = open_with_vms(2);
    let writer = {
        let db = Arc::clone(&db);
        thread::spawn(move || {
            for i in 0..200 {
                db.inject("/vms/vm1/disks", &format!("[{}]", vec!["0"; i % 20].join(",")))
                    .unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let db = Arc::clone(&db);
            thread::spawn(move || {
                for _ in 0..200 {
                    let dump = db.dump("/vms/vm1").unwrap();
                    let value: serde_json::Value = serde_json::from_str(&dump).unwrap();
                    assert_eq!(value["mem"], 512);
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }
}

#[test]
fn close_waits_for_handles_on_other_threads() {
    let (dir, db) = open_with_vms(2);
    let writer = {
        let db = Arc::clone(&db);
        thread::spawn(move || {
            let mut written = 0;
            for i in 0..500 {
                match db.write(&format!("/counter/c{}", i), "1") {
                    Ok(()) => written += 1,
                    Err(Error::Closed) => break,
                    Err(e) => panic!("unexpected error: {}", e),
                }
            }
            written
        })
    };

    let report = db.close();
    let written = writer.join().unwrap();
    assert_eq!(report.flush_failures, 0);

    // everything acknowledged before close reached the origin file
    let origin: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("db")).unwrap()).unwrap();
    let landed = origin
        .get("counter")
        .and_then(|c| c.as_object())
        .map_or(0, |c| c.len());
    assert_eq!(landed, written);
}
