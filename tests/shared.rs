use json_doc_store::{JsonStore, SharedJsonStore};
use serde_json::json;
use std::thread;

#[test]
fn concurrent_pushes_are_not_lost() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");
    std::fs::write(&path, "{}").unwrap();

    let db = JsonStore::builder(&path).build_shared().unwrap();
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let db = db.clone();
            thread::spawn(move || {
                for i in 0..25 {
                    db.push("events", json!({"thread": t, "i": i})).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let events = db.get("events").unwrap().unwrap();
    assert_eq!(events.as_array().unwrap().len(), 100);

    let reopened = JsonStore::open(&path).unwrap();
    assert_eq!(reopened.content()["events"].as_array().unwrap().len(), 100);
}

#[test]
fn handle_delegates_operations() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");
    std::fs::write(&path, "{}").unwrap();

    let db = SharedJsonStore::new(JsonStore::open(&path).unwrap());
    db.set("a", 1).unwrap();
    db.push("l", 1).unwrap();
    db.push("l", 2).unwrap();
    db.remove_from_list("l", 1).unwrap();
    assert!(db.has("a").unwrap());
    assert_eq!(db.get("l").unwrap(), Some(json!([2])));

    db.delete("a").unwrap();
    assert!(!db.has("a").unwrap());

    let keys = db.with(|store| store.keys());
    assert_eq!(keys, vec!["l"]);

    db.clear().unwrap();
    assert!(db.lock().is_empty());
}

#[test]
fn debug_shows_inner_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");
    std::fs::write(&path, "{}").unwrap();

    let db = JsonStore::builder(&path).build_shared().unwrap();
    assert!(format!("{db:?}").contains("JsonStore"));

    let _guard = db.lock();
    assert!(format!("{db:?}").contains("locked"));
}
