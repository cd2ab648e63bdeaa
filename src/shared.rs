//! Cloneable, lock-guarded handle around a [`JsonStore`].

use crate::error::Result;
use crate::store::JsonStore;
use parking_lot::{Mutex, MutexGuard};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Shares one [`JsonStore`] between threads.
///
/// Every call takes the lock for the whole load → mutate → save cycle, so
/// callers in this process never interleave inside an operation. Other
/// processes (or other stores on the same file) are not covered; that still
/// needs external coordination.
#[derive(Clone)]
pub struct SharedJsonStore {
    inner: Arc<Mutex<JsonStore>>,
}

impl SharedJsonStore {
    /// Wrap an opened store.
    pub fn new(store: JsonStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Lock the store for a sequence of calls. Hold the guard as briefly as
    /// you can; everyone else waits on it.
    pub fn lock(&self) -> MutexGuard<'_, JsonStore> {
        self.inner.lock()
    }

    /// Run `f` with exclusive access to the store.
    pub fn with<R>(&self, f: impl FnOnce(&mut JsonStore) -> R) -> R {
        f(&mut *self.inner.lock())
    }

    /// See [`JsonStore::set`].
    pub fn set<T: Serialize>(&self, key: &str, value: T) -> Result<()> {
        self.inner.lock().set(key, value)
    }

    /// See [`JsonStore::get`].
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        self.inner.lock().get(key)
    }

    /// See [`JsonStore::has`].
    pub fn has(&self, key: &str) -> Result<bool> {
        self.inner.lock().has(key)
    }

    /// See [`JsonStore::delete`].
    pub fn delete(&self, key: &str) -> Result<()> {
        self.inner.lock().delete(key)
    }

    /// See [`JsonStore::push`].
    pub fn push<T: Serialize>(&self, key: &str, item: T) -> Result<()> {
        self.inner.lock().push(key, item)
    }

    /// See [`JsonStore::remove_from_list`].
    pub fn remove_from_list<T: Serialize>(&self, key: &str, item: T) -> Result<()> {
        self.inner.lock().remove_from_list(key, item)
    }

    /// See [`JsonStore::clear`].
    pub fn clear(&self) -> Result<()> {
        self.inner.lock().clear()
    }
}

impl std::fmt::Debug for SharedJsonStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.inner.try_lock() {
            Some(store) => std::fmt::Debug::fmt(&*store, f),
            None => f.write_str("SharedJsonStore { <locked> }"),
        }
    }
}
