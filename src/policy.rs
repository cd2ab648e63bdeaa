//! Reload policies.

/// Controls when the store re-reads its backing file.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReloadPolicy {
    /// Re-read the file before every operation that reads or mutates a key,
    /// so edits made by other writers show up on the next call.
    #[default]
    Always,
    /// Only re-read when you call `load()` yourself. Mutations still save
    /// straight away, but anything another writer changed in the meantime is
    /// overwritten.
    Manual,
}

impl ReloadPolicy {
    /// `true` when operations reload implicitly.
    pub fn reloads(self) -> bool {
        matches!(self, ReloadPolicy::Always)
    }
}
