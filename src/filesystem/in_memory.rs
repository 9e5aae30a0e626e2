//! InMemoryFilesystem - BTreeMap-backed filesystem for testing and development.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock};

use super::{join, normalize, Entry, Filesystem};
use crate::error::RecordError;

/// In-memory filesystem backed by a sorted map of path to bytes.
///
/// Directories exist implicitly. Clone-friendly via Arc; clones share files.
#[derive(Clone, Default)]
pub struct InMemoryFilesystem {
    files: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl InMemoryFilesystem {
    /// Create a new empty filesystem.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Filesystem for InMemoryFilesystem {
    fn has(&self, path: &str) -> Result<bool, RecordError> {
        let files = self
            .files
            .read()
            .map_err(|_| RecordError::Storage("lock poisoned".into()))?;
        Ok(files.contains_key(normalize(path)))
    }

    fn read(&self, path: &str) -> Result<Vec<u8>, RecordError> {
        let files = self
            .files
            .read()
            .map_err(|_| RecordError::Storage("lock poisoned".into()))?;
        files
            .get(normalize(path))
            .cloned()
            .ok_or_else(|| RecordError::FileNotFound {
                filename: normalize(path).to_string(),
            })
    }

    fn put(&self, path: &str, contents: &[u8]) -> Result<(), RecordError> {
        let mut files = self
            .files
            .write()
            .map_err(|_| RecordError::Storage("lock poisoned".into()))?;
        files.insert(normalize(path).to_string(), contents.to_vec());
        Ok(())
    }

    fn delete(&self, path: &str) -> Result<bool, RecordError> {
        let mut files = self
            .files
            .write()
            .map_err(|_| RecordError::Storage("lock poisoned".into()))?;
        Ok(files.remove(normalize(path)).is_some())
    }

    fn list_contents(&self, dir: &str) -> Result<Vec<Entry>, RecordError> {
        let files = self
            .files
            .read()
            .map_err(|_| RecordError::Storage("lock poisoned".into()))?;

        let dir = normalize(dir);
        let prefix = if dir.is_empty() {
            String::new()
        } else {
            format!("{}/", dir)
        };

        let mut seen_dirs = BTreeSet::new();
        let mut entries = Vec::new();

        for (path, bytes) in files.iter() {
            let Some(rest) = path.strip_prefix(prefix.as_str()) else {
                continue;
            };
            match rest.split_once('/') {
                Some((child, _)) => {
                    if seen_dirs.insert(child.to_string()) {
                        entries.push(Entry::dir(join(dir, child)));
                    }
                }
                None => entries.push(Entry::file(path.clone(), bytes.len() as u64)),
            }
        }

        Ok(entries)
    }
}
