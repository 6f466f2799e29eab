use std::collections::BTreeMap;

use crate::error::{WorktreeError, WorktreeResult};

/// Flat view of the working directory: plain files addressed by name.
pub trait WorkingDir {
    fn exists(&self, name: &str) -> bool;

    /// Read a file, failing with `NotFound` if it is missing.
    fn read(&self, name: &str) -> WorktreeResult<Vec<u8>>;

    /// Create or overwrite a file.
    fn write(&self, name: &str, content: &[u8]) -> WorktreeResult<()>;

    /// Delete a file. Returns `true` if it existed.
    fn delete(&self, name: &str) -> WorktreeResult<bool>;

    /// Names of all plain files, sorted.
    fn list(&self) -> WorktreeResult<Vec<String>>;

    /// Every file with its content.
    fn read_all(&self) -> WorktreeResult<BTreeMap<String, Vec<u8>>> {
        self.list()?
            .into_iter()
            .map(|name| {
                let content = self.read(&name)?;
                Ok((name, content))
            })
            .collect()
    }
}

/// Check that `name` is a plain filename: non-empty, no separators, not a
/// relative directory reference.
pub fn validate_filename(name: &str) -> WorktreeResult<()> {
    let reason = if name.is_empty() {
        "empty filename"
    } else if name.contains(['/', '\\']) {
        "path separators are not allowed"
    } else if name == "." || name == ".." {
        "not a file name"
    } else {
        return Ok(());
    };
    Err(WorktreeError::InvalidPath {
        name: name.to_string(),
        reason: reason.to_string(),
    })
}
