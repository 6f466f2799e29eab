use sprig_store::{Blob, Commit, ObjectStore};

use crate::error::{WorktreeError, WorktreeResult};
use crate::protected::ProtectedPaths;
use crate::workdir::WorkingDir;

/// What a snapshot application changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub written: Vec<String>,
    pub deleted: Vec<String>,
    /// Files that would have been deleted but are protected.
    pub skipped: Vec<String>,
}

/// Applies snapshots and individual writes to the working directory.
pub struct Reconciler<'a> {
    store: &'a dyn ObjectStore,
    workdir: &'a dyn WorkingDir,
    protected: &'a ProtectedPaths,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        store: &'a dyn ObjectStore,
        workdir: &'a dyn WorkingDir,
        protected: &'a ProtectedPaths,
    ) -> Self {
        Self {
            store,
            workdir,
            protected,
        }
    }

    // -----------------------------------------------------------------------
    // Untracked-file guard
    // -----------------------------------------------------------------------

    /// Fail if moving from `current` to `target` would overwrite a working
    /// file that `current` does not track and whose content differs from
    /// the target's version.
    pub fn check_snapshot(&self, current: &Commit, target: &Commit) -> WorktreeResult<()> {
        for name in self.workdir.list()? {
            if current.tracks(&name) {
                continue;
            }
            let Some(target_blob) = target.blob_id(&name) else {
                continue;
            };
            let working = Blob::new(self.workdir.read(&name)?, name.as_str()).id()?;
            if working != *target_blob {
                return Err(WorktreeError::UntrackedFileBlocking { path: name });
            }
        }
        Ok(())
    }

    /// Same guard for an explicit list of pending writes.
    pub fn check_writes<'w>(
        &self,
        current: &Commit,
        writes: impl IntoIterator<Item = (&'w str, &'w [u8])>,
    ) -> WorktreeResult<()> {
        for (name, content) in writes {
            if current.tracks(name) || !self.workdir.exists(name) {
                continue;
            }
            if self.workdir.read(name)? != content {
                return Err(WorktreeError::UntrackedFileBlocking {
                    path: name.to_string(),
                });
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Snapshot application
    // -----------------------------------------------------------------------

    /// Make the working directory match `target`, coming from `current`.
    ///
    /// Every target file is written. Files tracked by `current` but absent
    /// from `target` are deleted unless protected. Untracked files are left
    /// alone. Nothing is touched if the guard fails.
    pub fn apply_snapshot(&self, current: &Commit, target: &Commit) -> WorktreeResult<ReconcileReport> {
        self.check_snapshot(current, target)?;

        let mut report = ReconcileReport::default();
        for (name, blob_id) in &target.snapshot {
            let blob = self.store.read_blob(blob_id)?;
            self.workdir.write(name, &blob.content)?;
            report.written.push(name.clone());
        }
        for name in current.snapshot.keys() {
            if target.tracks(name) {
                continue;
            }
            if self.protected.contains(name) {
                tracing::warn!(file = %name, "not deleting protected path");
                report.skipped.push(name.clone());
                continue;
            }
            if self.workdir.delete(name)? {
                report.deleted.push(name.clone());
            }
        }

        Ok(report)
    }

    /// Overwrite (or create) one working file with its version in `commit`.
    pub fn restore_file(&self, commit: &Commit, name: &str) -> WorktreeResult<()> {
        let blob_id = commit
            .blob_id(name)
            .ok_or_else(|| WorktreeError::FileNotInCommit {
                path: name.to_string(),
            })?;
        let blob = self.store.read_blob(blob_id)?;
        self.workdir.write(name, &blob.content)?;
        tracing::debug!(file = name, "restored file");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Single-file changes
    // -----------------------------------------------------------------------

    pub fn write_file(&self, name: &str, content: &[u8]) -> WorktreeResult<()> {
        self.workdir.write(name, content)
    }

    /// Delete one working file unless protected. Returns `true` if a file
    /// was deleted.
    pub fn remove_file(&self, name: &str) -> WorktreeResult<bool> {
        if self.protected.contains(name) {
            tracing::warn!(file = name, "not deleting protected path");
            return Ok(false);
        }
        self.workdir.delete(name)
    }
}
