use json_doc_store::JsonStore;
use std::thread;

fn main() -> Result<(), json_doc_store::Error> {
    let path = std::env::temp_dir().join("json_doc_store_example_shared.json");
    std::fs::write(&path, "{}")?;

    let db = JsonStore::builder(&path).build_shared()?;
    db.set("counter", 0)?;

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let db = db.clone();
            thread::spawn(move || {
                for _ in 0..10 {
                    db.with(|store| -> Result<(), json_doc_store::Error> {
                        let n = store.get_as::<u64>("counter")?.unwrap_or(0);
                        store.set("counter", n + 1)
                    })
                    .expect("increment");
                }
            })
        })
        .collect();
    for w in workers {
        let _ = w.join();
    }

    println!("counter = {:?}", db.get("counter")?);

    let _ = std::fs::remove_file(&path);
    Ok(())
}
