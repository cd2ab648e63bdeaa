//! Disk I/O helpers: read the whole file, write the whole file.
//!
//! [`WriteMode::Overwrite`] truncates and rewrites the file in place, so a
//! crash mid-write can leave it truncated. [`WriteMode::Atomic`] goes through
//! a temp file and a rename, which is close to atomic on most platforms. On
//! NTFS it's reliable; on FAT32 or network shares there are no hard
//! guarantees.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// How [`write_document`] puts bytes on disk.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate the file and write the new contents in place.
    #[default]
    Overwrite,
    /// Write `<path>.tmp`, then rename it over `path`.
    Atomic,
}

/// Reads the full contents of `path`. A missing or unreadable file is an
/// [`Error::Io`]; the store never creates its backing file.
pub fn read_document(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| Error::Io(format!("{}: {e}", path.display())))
}

/// Replace the contents of `path` with `bytes`.
pub fn write_document(path: &Path, bytes: &[u8], mode: WriteMode) -> Result<()> {
    match mode {
        WriteMode::Overwrite => std::fs::write(path, bytes)
            .map_err(|e| Error::Io(format!("{}: {e}", path.display()))),
        WriteMode::Atomic => atomic_write(path, bytes),
    }
}

/// Write `bytes` to `<path>.tmp` and then rename over `path`. This avoids
/// leaving a half-written file if the process crashes mid-write.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = temp_path(path);
    std::fs::write(&tmp, bytes).map_err(|e| Error::Io(format!("{}: {e}", tmp.display())))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(Error::Io(format!("{}: {e}", path.display())));
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    path.with_extension(format!("{ext}.tmp"))
}
