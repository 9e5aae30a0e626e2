//! LocalFilesystem - A directory on disk.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{join, normalize, Entry, Filesystem};
use crate::error::RecordError;

/// Filesystem rooted at a local directory.
///
/// Parent directories are created on write. Listings are sorted by name so
/// collection order is stable across platforms.
#[derive(Debug, Clone)]
pub struct LocalFilesystem {
    root: PathBuf,
}

impl LocalFilesystem {
    /// Use an existing (or not yet created) directory as the root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the root directory if needed, then use it.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self, RecordError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(normalize(path))
    }
}

impl Filesystem for LocalFilesystem {
    fn has(&self, path: &str) -> Result<bool, RecordError> {
        match fs::metadata(self.resolve(path)) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn read(&self, path: &str) -> Result<Vec<u8>, RecordError> {
        fs::read(self.resolve(path)).map_err(|e| match e.kind() {
            ErrorKind::NotFound => RecordError::FileNotFound {
                filename: normalize(path).to_string(),
            },
            _ => e.into(),
        })
    }

    fn put(&self, path: &str, contents: &[u8]) -> Result<(), RecordError> {
        let target = self.resolve(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(target, contents)?;
        Ok(())
    }

    fn delete(&self, path: &str) -> Result<bool, RecordError> {
        match fs::remove_file(self.resolve(path)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn list_contents(&self, dir: &str) -> Result<Vec<Entry>, RecordError> {
        let dir = normalize(dir);
        let read_dir = match fs::read_dir(self.resolve(dir)) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for item in read_dir {
            let item = item?;
            let name = match item.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    tracing::warn!(name = ?raw, "skipping non UTF-8 file name");
                    continue;
                }
            };
            let meta = item.metadata()?;
            let path = join(dir, &name);
            if meta.is_dir() {
                entries.push(Entry::dir(path));
            } else if meta.is_file() {
                entries.push(Entry::file(path, meta.len()));
            }
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }
}
