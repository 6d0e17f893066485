use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;

use crate::foundation::error::{WeaveError, WeaveResult};

/// Content-addressed cache of encoded import results.
pub trait ImportCache {
    /// Return `true` if `key` has an entry.
    fn has(&self, key: &str) -> bool;
    /// Bytes cached under `key`.
    fn get(&self, key: &str) -> WeaveResult<Option<Vec<u8>>>;
    /// Cache `bytes` under `key`, replacing any previous entry.
    fn put(&mut self, key: &str, bytes: &[u8]) -> WeaveResult<()>;
}

/// In-memory cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ImportCache for MemoryCache {
    fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn get(&self, key: &str) -> WeaveResult<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, bytes: &[u8]) -> WeaveResult<()> {
        self.entries.insert(key.to_owned(), bytes.to_vec());
        Ok(())
    }
}

/// Cache storing one file per key in a directory.
#[derive(Clone, Debug)]
pub struct FsCache {
    dir: PathBuf,
}

impl FsCache {
    /// Cache in `dir`; the directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_of(&self, key: &str) -> WeaveResult<PathBuf> {
        let plain = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_';
        if key.is_empty() || !key.chars().all(plain) {
            return Err(WeaveError::internal(
                "cache.bad_key",
                format!("cache key '{key}' is not a plain file name"),
            ));
        }
        Ok(self.dir.join(key))
    }
}

impl ImportCache for FsCache {
    fn has(&self, key: &str) -> bool {
        self.path_of(key).is_ok_and(|p| p.is_file())
    }

    fn get(&self, key: &str) -> WeaveResult<Option<Vec<u8>>> {
        let path = self.path_of(key)?;
        if !path.is_file() {
            return Ok(None);
        }
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read cache entry '{}'", path.display()))?;
        Ok(Some(bytes))
    }

    fn put(&mut self, key: &str, bytes: &[u8]) -> WeaveResult<()> {
        let path = self.path_of(key)?;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create cache dir '{}'", self.dir.display()))?;
        std::fs::write(&path, bytes)
            .with_context(|| format!("write cache entry '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/storage/cache.rs"]
mod tests;
