//! Filesystem - The storage contract behind a record store.
//!
//! A [`Filesystem`] exposes a flat, root-relative view of some storage: check,
//! read, write, delete and list. Paths use `/` separators and never leave the
//! root; the record store only ever passes it validated `<id>.<ext>` names.

mod in_memory;
mod local;

use crate::error::RecordError;

/// Kind of a listed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Dir,
}

/// One item returned by [`Filesystem::list_contents`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub kind: EntryKind,
    /// Path relative to the filesystem root, e.g. `people/alice.json`.
    pub path: String,
    /// Last path component, e.g. `alice.json`.
    pub basename: String,
    /// Basename without its extension, e.g. `alice`.
    pub filename: String,
    /// Extension without the dot. `None` for names without one.
    pub extension: Option<String>,
    /// Size in bytes, for files.
    pub size: Option<u64>,
}

impl Entry {
    pub fn file(path: impl Into<String>, size: u64) -> Self {
        Self::new(EntryKind::File, path.into(), Some(size))
    }

    pub fn dir(path: impl Into<String>) -> Self {
        Self::new(EntryKind::Dir, path.into(), None)
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    fn new(kind: EntryKind, path: String, size: Option<u64>) -> Self {
        let basename = path.rsplit('/').next().unwrap_or_default().to_string();
        let (filename, extension) = match basename.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem.to_string(), Some(ext.to_string())),
            _ => (basename.clone(), None),
        };
        Self {
            kind,
            path,
            basename,
            filename,
            extension,
            size,
        }
    }
}

/// Abstract file storage used by [`crate::RecordStore`].
pub trait Filesystem: Send + Sync {
    /// Whether a file exists at the path.
    fn has(&self, path: &str) -> Result<bool, RecordError>;

    /// Read the whole file.
    fn read(&self, path: &str) -> Result<Vec<u8>, RecordError>;

    /// Write (or overwrite) the whole file.
    fn put(&self, path: &str, contents: &[u8]) -> Result<(), RecordError>;

    /// Delete a file. Returns true if one was removed.
    fn delete(&self, path: &str) -> Result<bool, RecordError>;

    /// List the direct children of a directory (`""` or `"/"` is the root).
    fn list_contents(&self, dir: &str) -> Result<Vec<Entry>, RecordError>;
}

/// Strip leading and trailing separators so `"/"`, `""` and `"a/"` normalize.
pub(crate) fn normalize(path: &str) -> &str {
    path.trim_matches('/')
}

pub(crate) fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

pub use in_memory::InMemoryFilesystem;
pub use local::LocalFilesystem;
