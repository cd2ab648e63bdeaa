use json_doc_store::JsonStore;
use serde_json::json;

fn main() -> Result<(), json_doc_store::Error> {
    let path = std::env::temp_dir().join("json_doc_store_example_basic.json");
    std::fs::write(&path, "{}")?;
    let mut db = JsonStore::open(&path)?;

    // set / get / delete
    db.set("apples", 3)?;
    db.set("bananas", 5)?;
    println!("apples  = {:?}", db.get("apples")?);
    println!("bananas = {:?}", db.get("bananas")?);
    db.delete("bananas")?;
    println!("has bananas? {}", db.has("bananas")?);

    // lists
    db.push("basket", "pear")?;
    db.push("basket", json!({"fruit": "plum", "ripe": true}))?;
    db.push("basket", "pear")?;
    db.remove_from_list("basket", "pear")?;
    println!("basket = {:?}", db.get("basket")?);

    // queries
    let numbers = db.filter(|v| v.is_number())?;
    println!("numbers = {numbers:?}");
    println!("first list = {:?}", db.find(|v| v.is_array())?);

    // snapshots
    println!("keys   = {:?}", db.keys());
    println!("values = {:?}", db.values());

    db.clear()?;
    println!("after clear: len = {}", db.len());

    let _ = std::fs::remove_file(&path);
    Ok(())
}
