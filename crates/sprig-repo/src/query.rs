//! Read-only views over a repository.

use std::collections::BTreeSet;

use sprig_index::{compute_status, WorkdirStatus};
use sprig_store::Commit;
use sprig_types::ObjectId;

use crate::error::RepoResult;
use crate::repository::Repository;

/// One commit as shown by `log` and `global-log`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub id: ObjectId,
    pub commit: Commit,
}

impl Repository {
    pub fn current_branch(&self) -> &str {
        self.state.branches.current()
    }

    pub fn head_id(&self) -> RepoResult<ObjectId> {
        Ok(self.state.branches.head()?)
    }

    pub fn head_commit(&self) -> RepoResult<Commit> {
        self.read_commit(&self.head_id()?)
    }

    pub fn read_commit(&self, id: &ObjectId) -> RepoResult<Commit> {
        Ok(self.store.read_commit(id)?)
    }

    /// Resolve a full or abbreviated commit id against every commit made.
    pub fn resolve_commit(&self, commit_ref: &str) -> RepoResult<ObjectId> {
        self.state.resolve(commit_ref)
    }

    /// All branches and their heads, sorted by name.
    pub fn branches(&self) -> Vec<(String, ObjectId)> {
        self.state
            .branches
            .iter()
            .map(|(name, head)| (name.to_string(), head))
            .collect()
    }

    /// The current head and its first-parent ancestors, newest first.
    pub fn log(&self) -> RepoResult<Vec<LogEntry>> {
        let chain = self.graph().first_parent_chain(self.head_id()?)?;
        Ok(chain
            .into_iter()
            .map(|(id, commit)| LogEntry { id, commit })
            .collect())
    }

    /// Every commit ever made, in creation order.
    pub fn global_log(&self) -> RepoResult<Vec<LogEntry>> {
        self.state
            .history
            .iter()
            .map(|id| {
                Ok(LogEntry {
                    id: *id,
                    commit: self.read_commit(id)?,
                })
            })
            .collect()
    }

    /// Ids of commits whose message is exactly `message`, in creation order.
    pub fn find(&self, message: &str) -> RepoResult<Vec<ObjectId>> {
        Ok(self
            .global_log()?
            .into_iter()
            .filter(|entry| entry.commit.message == message)
            .map(|entry| entry.id)
            .collect())
    }

    pub fn staged_files(&self) -> Vec<String> {
        self.state.staging.filenames().map(str::to_string).collect()
    }

    pub fn removal_marks(&self) -> &BTreeSet<String> {
        &self.state.removal_marks
    }

    /// Removal-marked files `remove` took out of the working directory since
    /// the last commit.
    pub fn removed_files(&self) -> &BTreeSet<String> {
        &self.state.removed_log
    }

    /// Classify the working directory against the head and staging area.
    pub fn status(&self) -> RepoResult<WorkdirStatus> {
        let head = self.head_commit()?;
        let working = self.workdir.read_all()?;
        Ok(compute_status(
            &head,
            &self.state.staging,
            &self.state.removal_marks,
            &self.state.removed_log,
            &working,
        )?)
    }
}
