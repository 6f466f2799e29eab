//! On-disk layout of a repository and its process lock.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs4::fs_std::FileExt;

use crate::error::RepoResult;

/// Name of the metadata directory inside the working directory.
pub const META_DIR: &str = ".sprig";

/// Paths under `<root>/.sprig/`.
#[derive(Clone, Debug)]
pub struct RepoLayout {
    root: PathBuf,
}

impl RepoLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The working directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn meta_dir(&self) -> PathBuf {
        self.root.join(META_DIR)
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.meta_dir().join("objects")
    }

    pub fn state_path(&self) -> PathBuf {
        self.meta_dir().join("state.json")
    }

    pub fn config_path(&self) -> PathBuf {
        self.meta_dir().join("config.toml")
    }

    pub fn lock_path(&self) -> PathBuf {
        self.meta_dir().join("LOCK")
    }

    pub fn is_initialized(&self) -> bool {
        self.state_path().is_file()
    }
}

/// Exclusive advisory lock on `.sprig/LOCK`, released on drop.
#[derive(Debug)]
pub struct RepoLock {
    _file: File,
}

impl RepoLock {
    /// Block until the lock is held.
    pub fn acquire(path: &Path) -> RepoResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)?;
        file.lock_exclusive()?;
        tracing::debug!(path = %path.display(), "acquired repository lock");
        Ok(Self { _file: file })
    }
}
