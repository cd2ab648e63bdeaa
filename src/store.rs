//! Core store type and builder.

use crate::error::{Error, Result};
use crate::persist::{read_document, write_document, WriteMode};
use crate::policy::ReloadPolicy;
use crate::serializer::{JsonSerializer, DEFAULT_INDENT, MAX_INDENT};
use crate::shared::SharedJsonStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Persistent key-value store backed by a single JSON file.
///
/// The whole document lives in memory as a [`Value`] and is written back in
/// full after every mutation. Under the default [`ReloadPolicy::Always`] each
/// operation that touches a key first re-reads the file, so changes made by
/// other writers are picked up. [`keys`](Self::keys), [`values`](Self::values)
/// and [`clear`](Self::clear) never reload.
///
/// There is no locking. Two stores pointed at the same file race each other
/// and the last save wins. Within one process, wrap the store in a
/// [`SharedJsonStore`] to serialize callers.
pub struct JsonStore {
    path: PathBuf,
    serializer: JsonSerializer,
    reload: ReloadPolicy,
    write_mode: WriteMode,
    content: Value,
}

impl JsonStore {
    /// Open the store at `path` with the default indent of 4. The file must
    /// already exist and hold valid JSON.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder(path).build()
    }

    /// Open with a specific indent. Shorthand for
    /// `builder(path).indent(indent).build()`.
    pub fn open_with_indent(path: impl AsRef<Path>, indent: usize) -> Result<Self> {
        Self::builder(path).indent(indent).build()
    }

    /// Start configuring a new store. Call [`.build()`](JsonStoreBuilder::build)
    /// when ready.
    pub fn builder(path: impl AsRef<Path>) -> JsonStoreBuilder {
        JsonStoreBuilder::new(path)
    }

    // ---- persistence ----

    /// Replace the in-memory document with what is currently on disk.
    ///
    /// On failure the previous in-memory document is kept.
    pub fn load(&mut self) -> Result<()> {
        let bytes = read_document(&self.path)?;
        let content = self.serializer.deserialize(&bytes)?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "loaded document");
        self.content = content;
        Ok(())
    }

    /// Write the in-memory document to disk, replacing the file's contents.
    pub fn save(&self) -> Result<()> {
        let bytes = self.serializer.serialize(&self.content)?;
        write_document(&self.path, &bytes, self.write_mode)?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "saved document");
        Ok(())
    }

    // ---- reads ----

    /// Get the value for `key`, or `None` if absent.
    pub fn get(&mut self, key: &str) -> Result<Option<Value>> {
        self.sync()?;
        trace!(key, "get");
        Ok(self.lookup(key).cloned())
    }

    /// Get the value for `key` and deserialize it into `T`.
    ///
    /// A value that doesn't fit `T` is an [`Error::Type`].
    pub fn get_as<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>> {
        match self.get(key)? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| Error::Type(format!("value at `{key}`: {e}"))),
            None => Ok(None),
        }
    }

    /// `true` if `key` holds a value other than `null`.
    ///
    /// A key explicitly set to `null` reports `false`, same as a missing key.
    /// Use [`contains_key`](Self::contains_key) to tell them apart.
    pub fn has(&mut self, key: &str) -> Result<bool> {
        Ok(matches!(self.get(key)?, Some(value) if !value.is_null()))
    }

    /// `true` if `key` is present, even when it holds `null`.
    pub fn contains_key(&mut self, key: &str) -> Result<bool> {
        self.sync()?;
        Ok(self.lookup(key).is_some())
    }

    /// Keys of the in-memory document, in insertion order. Does not reload.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        match &self.content {
            Value::Object(map) => map.keys().cloned().collect(),
            Value::Array(items) => (0..items.len()).map(|i| i.to_string()).collect(),
            _ => Vec::new(),
        }
    }

    /// Values of the in-memory document, in the same order as
    /// [`keys`](Self::keys). Does not reload.
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.iter_values().cloned().collect()
    }

    /// Number of entries in the in-memory document. Does not reload.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.content {
            Value::Object(map) => map.len(),
            Value::Array(items) => items.len(),
            _ => 0,
        }
    }

    /// `true` when the in-memory document has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every value for which `predicate` returns `true`, in order.
    pub fn filter<F>(&mut self, mut predicate: F) -> Result<Vec<Value>>
    where
        F: FnMut(&Value) -> bool,
    {
        self.sync()?;
        Ok(self
            .iter_values()
            .filter(|&value| predicate(value))
            .cloned()
            .collect())
    }

    /// The first value for which `predicate` returns `true`.
    pub fn find<F>(&mut self, mut predicate: F) -> Result<Option<Value>>
    where
        F: FnMut(&Value) -> bool,
    {
        self.sync()?;
        Ok(self.iter_values().find(|&value| predicate(value)).cloned())
    }

    // ---- writes ----

    /// Set `key` to `value`, creating the key or overwriting whatever was
    /// there. An existing key keeps its position in the file.
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        let value = to_json(value)?;
        self.sync()?;
        trace!(key, "set");
        self.object_mut()?.insert(key.to_owned(), value);
        self.save()
    }

    /// Remove `key`. Removing a missing key is not an error; the document is
    /// saved either way.
    pub fn delete(&mut self, key: &str) -> Result<()> {
        self.sync()?;
        trace!(key, "delete");
        self.object_mut()?.retain(|k, _| k != key);
        self.save()
    }

    /// Replace the whole document with `{}` and save.
    ///
    /// This does not reload first: whatever is on disk is discarded, including
    /// changes made by other writers. It can't be undone.
    pub fn clear(&mut self) -> Result<()> {
        trace!("clear");
        self.content = Value::Object(Map::new());
        self.save()
    }

    /// Append `item` to the list at `key`.
    ///
    /// If `key` is missing it becomes a new list. If it holds anything other
    /// than a list, that value is thrown away and replaced by a new list.
    pub fn push<T: Serialize>(&mut self, key: &str, item: T) -> Result<()> {
        let item = to_json(item)?;
        self.sync()?;
        trace!(key, "push");
        let slot = self
            .object_mut()?
            .entry(key)
            .or_insert_with(|| Value::Array(Vec::new()));
        match slot {
            Value::Array(items) => items.push(item),
            other => {
                warn!(key, previous = kind(other), "push replaced a non-list value");
                *other = Value::Array(vec![item]);
            }
        }
        self.save()
    }

    /// Remove the first element equal to `item` from the list at `key`.
    ///
    /// Equality is structural: `{"a": 1}` matches any object with the same
    /// contents. Numbers compare by representation, so `1` and `1.0` differ.
    /// The document is saved even when nothing matched. If `key` is missing
    /// or doesn't hold a list this fails with [`Error::Type`] and nothing is
    /// written; a missing key counts as "not a list", not as an empty one.
    pub fn remove_from_list<T: Serialize>(&mut self, key: &str, item: T) -> Result<()> {
        let item = to_json(item)?;
        self.sync()?;
        trace!(key, "remove_from_list");
        match self.object_mut()?.get_mut(key) {
            Some(Value::Array(items)) => {
                if let Some(pos) = items.iter().position(|v| *v == item) {
                    items.remove(pos);
                }
            }
            Some(other) => {
                return Err(Error::Type(format!(
                    "value at `{key}` is {}, not a list",
                    kind(other)
                )))
            }
            None => return Err(Error::Type(format!("no list at `{key}`"))),
        }
        self.save()
    }

    // ---- accessors ----

    /// The in-memory document as of the last load or mutation.
    #[must_use]
    pub fn content(&self) -> &Value {
        &self.content
    }

    /// Path to the backing JSON file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Spaces per nesting level used when saving.
    #[must_use]
    pub fn indent(&self) -> usize {
        self.serializer.indent()
    }

    /// When the store re-reads its file.
    #[must_use]
    pub fn reload_policy(&self) -> ReloadPolicy {
        self.reload
    }

    /// How saves reach the disk.
    #[must_use]
    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    // ---- internal ----

    fn sync(&mut self) -> Result<()> {
        if self.reload.reloads() {
            self.load()?;
        }
        Ok(())
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        match &self.content {
            Value::Object(map) => map.get(key),
            Value::Array(items) => key
                .parse::<usize>()
                .ok()
                .filter(|i| i.to_string() == key)
                .and_then(|i| items.get(i)),
            _ => None,
        }
    }

    fn iter_values(&self) -> Box<dyn Iterator<Item = &Value> + '_> {
        match &self.content {
            Value::Object(map) => Box::new(map.values()),
            Value::Array(items) => Box::new(items.iter()),
            _ => Box::new(std::iter::empty()),
        }
    }

    fn object_mut(&mut self) -> Result<&mut Map<String, Value>> {
        match &mut self.content {
            Value::Object(map) => Ok(map),
            other => Err(Error::Type(format!(
                "document root is {}, not an object",
                kind(other)
            ))),
        }
    }
}

impl std::fmt::Debug for JsonStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonStore")
            .field("path", &self.path)
            .field("indent", &self.serializer.indent())
            .field("reload", &self.reload)
            .field("write_mode", &self.write_mode)
            .finish_non_exhaustive()
    }
}

fn to_json<T: Serialize>(value: T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| Error::Serialize(e.to_string()))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn effective_indent(requested: usize) -> usize {
    match requested {
        0 => DEFAULT_INDENT,
        n => n.min(MAX_INDENT),
    }
}

fn validate_path(path: &Path) -> Result<()> {
    let text = path
        .to_str()
        .ok_or_else(|| Error::Config(format!("path {} is not valid UTF-8", path.display())))?;
    if text.is_empty() {
        return Err(Error::Config("path must be a non-empty string".into()));
    }
    if !text.ends_with(".json") {
        return Err(Error::Config(format!("path `{text}` must name a .json file")));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Configures and opens a [`JsonStore`].
///
/// ```rust,no_run
/// use json_doc_store::{JsonStore, ReloadPolicy, WriteMode};
///
/// let db = JsonStore::builder("db.json")
///     .indent(2)
///     .reload(ReloadPolicy::Manual)
///     .write_mode(WriteMode::Atomic)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct JsonStoreBuilder {
    path: PathBuf,
    indent: usize,
    compact: bool,
    reload: ReloadPolicy,
    write_mode: WriteMode,
}

impl JsonStoreBuilder {
    fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            indent: DEFAULT_INDENT,
            compact: false,
            reload: ReloadPolicy::default(),
            write_mode: WriteMode::default(),
        }
    }

    /// Spaces per nesting level when saving. `0` means the default of 4;
    /// widths above [`MAX_INDENT`] are clamped to it.
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Save single-line JSON with no whitespace instead of pretty-printing.
    /// Overrides [`indent`](Self::indent). Off by default.
    pub fn compact(mut self, yes: bool) -> Self {
        self.compact = yes;
        self
    }

    /// Set the reload policy (default: [`ReloadPolicy::Always`]).
    pub fn reload(mut self, policy: ReloadPolicy) -> Self {
        self.reload = policy;
        self
    }

    /// Set how saves are written (default: [`WriteMode::Overwrite`]).
    pub fn write_mode(mut self, mode: WriteMode) -> Self {
        self.write_mode = mode;
        self
    }

    /// Validate the settings and load the file.
    pub fn build(self) -> Result<JsonStore> {
        validate_path(&self.path)?;
        let indent = if self.compact {
            0
        } else {
            effective_indent(self.indent)
        };

        let mut store = JsonStore {
            path: self.path,
            serializer: JsonSerializer::new(indent),
            reload: self.reload,
            write_mode: self.write_mode,
            content: Value::Object(Map::new()),
        };
        store.load()?;
        Ok(store)
    }

    /// Like [`build`](Self::build) but wraps the store in a
    /// [`SharedJsonStore`].
    pub fn build_shared(self) -> Result<SharedJsonStore> {
        self.build().map(SharedJsonStore::new)
    }
}
