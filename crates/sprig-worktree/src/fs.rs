use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{WorktreeError, WorktreeResult};
use crate::workdir::{validate_filename, WorkingDir};

/// The on-disk working directory.
///
/// Only plain files directly under `root` are visible. Subdirectories,
/// including the repository's own metadata directory, are never listed and
/// their names are refused.
#[derive(Debug, Clone)]
pub struct FsWorkingDir {
    root: PathBuf,
    metadata_dir: String,
}

impl FsWorkingDir {
    pub fn new(root: impl Into<PathBuf>, metadata_dir: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            metadata_dir: metadata_dir.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_of(&self, name: &str) -> WorktreeResult<PathBuf> {
        validate_filename(name)?;
        if name == self.metadata_dir {
            return Err(WorktreeError::InvalidPath {
                name: name.to_string(),
                reason: "reserved for repository metadata".into(),
            });
        }
        Ok(self.root.join(name))
    }
}

impl WorkingDir for FsWorkingDir {
    fn exists(&self, name: &str) -> bool {
        self.path_of(name).map(|p| p.is_file()).unwrap_or(false)
    }

    fn read(&self, name: &str) -> WorktreeResult<Vec<u8>> {
        let path = self.path_of(name)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(WorktreeError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, name: &str, content: &[u8]) -> WorktreeResult<()> {
        let path = self.path_of(name)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn delete(&self, name: &str) -> WorktreeResult<bool> {
        let path = self.path_of(name)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self) -> WorktreeResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
        {
            let entry = entry.map_err(|e| {
                e.into_io_error()
                    .unwrap_or_else(|| io::Error::other("directory walk failed"))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}
