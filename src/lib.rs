//! Minimal persistent key-value store backed by a single JSON file.
//!
//! The whole file is one JSON document. Every operation re-reads it, works on
//! the in-memory copy, and writes the whole thing back after a mutation.
//!
//! ```rust,no_run
//! use json_doc_store::JsonStore;
//! use serde_json::json;
//!
//! let mut db = JsonStore::open("db.json").unwrap();
//! db.set("hello", "world").unwrap();
//! db.push("tags", json!({"name": "new"})).unwrap();
//! assert!(db.has("hello").unwrap());
//! ```
//!
//! **Single-writer only.** If several stores or processes write the same file
//! they will clobber each other; the last save wins. Use
//! [`SharedJsonStore`] to serialize callers inside one process and advisory
//! file locking or a real database across processes.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod persist;
pub mod policy;
pub mod serializer;
pub mod shared;
pub mod store;

pub use error::{Error, Result};
pub use persist::WriteMode;
pub use policy::ReloadPolicy;
pub use serde_json::Value;
pub use shared::SharedJsonStore;
pub use store::{JsonStore, JsonStoreBuilder};
