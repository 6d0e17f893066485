use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Component, Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{WeaveError, WeaveResult};

/// Source and destination of encoded documents, addressed by id.
///
/// Output is staged: bytes written through [`open_output`](Self::open_output) become visible
/// under the id only after [`commit`](Self::commit).
pub trait DocumentStore {
    /// Open the document `id` for reading.
    fn open_input(&self, id: &str) -> WeaveResult<Box<dyn Read + '_>>;
    /// Open a staging area for document `id`, discarding anything staged before.
    fn open_output(&mut self, id: &str) -> WeaveResult<Box<dyn Write + '_>>;
    /// Publish the staged output of `id`.
    fn commit(&mut self, id: &str) -> WeaveResult<()>;
}

/// In-memory store for tests and tooling.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: BTreeMap<String, Vec<u8>>,
    staged: BTreeMap<String, Vec<u8>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `bytes` under `id` directly.
    pub fn insert(&mut self, id: impl Into<String>, bytes: Vec<u8>) {
        self.documents.insert(id.into(), bytes);
    }

    /// Committed bytes of `id`.
    pub fn get(&self, id: &str) -> Option<&[u8]> {
        self.documents.get(id).map(Vec::as_slice)
    }
}

impl DocumentStore for MemoryStore {
    fn open_input(&self, id: &str) -> WeaveResult<Box<dyn Read + '_>> {
        let bytes = self.documents.get(id).ok_or_else(|| {
            WeaveError::reference_not_found("store.missing_document", format!("no document '{id}'"))
        })?;
        Ok(Box::new(bytes.as_slice()))
    }

    fn open_output(&mut self, id: &str) -> WeaveResult<Box<dyn Write + '_>> {
        let buf = self.staged.entry(id.to_owned()).or_default();
        buf.clear();
        Ok(Box::new(buf))
    }

    fn commit(&mut self, id: &str) -> WeaveResult<()> {
        let bytes = self.staged.remove(id).ok_or_else(|| {
            WeaveError::internal(
                "store.nothing_staged",
                format!("no output staged for '{id}'"),
            )
        })?;
        self.documents.insert(id.to_owned(), bytes);
        Ok(())
    }
}

/// Store backed by files under a root directory; ids are relative file names.
#[derive(Clone, Debug)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_of(&self, id: &str) -> WeaveResult<PathBuf> {
        let rel = Path::new(id);
        let escapes = rel.components().any(|c| matches!(c, Component::ParentDir));
        if rel.is_absolute() || escapes {
            return Err(WeaveError::internal(
                "store.bad_id",
                format!("document id '{id}' escapes the store root"),
            ));
        }
        Ok(self.root.join(rel))
    }

    fn staging_path(&self, id: &str) -> WeaveResult<PathBuf> {
        let mut path = self.path_of(id)?.into_os_string();
        path.push(".partial");
        Ok(PathBuf::from(path))
    }
}

impl DocumentStore for FsStore {
    fn open_input(&self, id: &str) -> WeaveResult<Box<dyn Read + '_>> {
        let path = self.path_of(id)?;
        let file = File::open(&path)
            .with_context(|| format!("open document '{}'", path.display()))?;
        Ok(Box::new(std::io::BufReader::new(file)))
    }

    fn open_output(&mut self, id: &str) -> WeaveResult<Box<dyn Write + '_>> {
        let path = self.staging_path(id)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let file = File::create(&path).with_context(|| format!("create '{}'", path.display()))?;
        Ok(Box::new(std::io::BufWriter::new(file)))
    }

    fn commit(&mut self, id: &str) -> WeaveResult<()> {
        let staged = self.staging_path(id)?;
        let path = self.path_of(id)?;
        std::fs::rename(&staged, &path)
            .with_context(|| format!("commit '{}' to '{}'", staged.display(), path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/storage/store.rs"]
mod tests;
