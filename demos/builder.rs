use json_doc_store::{JsonStore, ReloadPolicy, WriteMode};

fn main() -> Result<(), json_doc_store::Error> {
    let path = std::env::temp_dir().join("json_doc_store_example_builder.json");
    std::fs::write(&path, "{}")?;

    // two-space indent, atomic saves, reload only on request
    let mut db = JsonStore::builder(&path)
        .indent(2)
        .write_mode(WriteMode::Atomic)
        .reload(ReloadPolicy::Manual)
        .build()?;

    db.set("name", "json-doc-store")?;
    db.set("version", "0.1.0")?;
    db.push("tags", "json")?;
    db.push("tags", "storage")?;

    let contents = std::fs::read_to_string(db.path())?;
    println!("On-disk JSON:\n{contents}");

    println!("\nDebug output: {db:?}");

    let _ = std::fs::remove_file(&path);
    Ok(())
}
