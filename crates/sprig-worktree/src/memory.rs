use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::{WorktreeError, WorktreeResult};
use crate::workdir::{validate_filename, WorkingDir};

/// In-memory working directory for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryWorkingDir {
    files: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryWorkingDir {
    pub fn new() -> Self {
        Self::default()
    }

    /// A working directory pre-populated with `files`.
    pub fn with_files<'a>(files: impl IntoIterator<Item = (&'a str, &'a [u8])>) -> Self {
        let map = files
            .into_iter()
            .map(|(name, content)| (name.to_string(), content.to_vec()))
            .collect();
        Self {
            files: RwLock::new(map),
        }
    }
}

impl WorkingDir for MemoryWorkingDir {
    fn exists(&self, name: &str) -> bool {
        self.files.read().expect("lock poisoned").contains_key(name)
    }

    fn read(&self, name: &str) -> WorktreeResult<Vec<u8>> {
        self.files
            .read()
            .expect("lock poisoned")
            .get(name)
            .cloned()
            .ok_or_else(|| WorktreeError::NotFound(name.to_string()))
    }

    fn write(&self, name: &str, content: &[u8]) -> WorktreeResult<()> {
        validate_filename(name)?;
        self.files
            .write()
            .expect("lock poisoned")
            .insert(name.to_string(), content.to_vec());
        Ok(())
    }

    fn delete(&self, name: &str) -> WorktreeResult<bool> {
        Ok(self
            .files
            .write()
            .expect("lock poisoned")
            .remove(name)
            .is_some())
    }

    fn list(&self) -> WorktreeResult<Vec<String>> {
        Ok(self.files.read().expect("lock poisoned").keys().cloned().collect())
    }
}
