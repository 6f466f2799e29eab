//! The mutable repository record.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sprig_index::StagingArea;
use sprig_refs::BranchTable;
use sprig_types::ObjectId;

use crate::error::{RepoError, RepoResult};

/// Branches, history, the staging area and removal bookkeeping.
///
/// Loaded once when a repository is opened and written back once by
/// `Repository::persist`. Everything one command changes lives in this one
/// record, so a single rename publishes it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoState {
    pub branches: BranchTable,
    /// Every commit ever made, oldest first.
    pub history: Vec<ObjectId>,
    /// Files excluded from the next commit.
    pub removal_marks: BTreeSet<String>,
    /// Removal-marked files that `rm` took out of the working tree since
    /// the last commit.
    pub removed_log: BTreeSet<String>,
    /// Content captured by `add` for the next commit.
    #[serde(default)]
    pub staging: StagingArea,
}

impl RepoState {
    pub fn new(branches: BranchTable, root: ObjectId) -> Self {
        Self {
            branches,
            history: vec![root],
            removal_marks: BTreeSet::new(),
            removed_log: BTreeSet::new(),
            staging: StagingArea::new(),
        }
    }

    /// Append a commit to the history unless it is already there.
    pub fn record(&mut self, id: ObjectId) {
        if !self.history.contains(&id) {
            self.history.push(id);
        }
    }

    /// Resolve a full or abbreviated hex id against the history.
    pub fn resolve(&self, prefix: &str) -> RepoResult<ObjectId> {
        let prefix = prefix.trim();
        let matches: Vec<ObjectId> = self
            .history
            .iter()
            .copied()
            .filter(|id| id.matches_prefix(prefix))
            .collect();
        match matches.as_slice() {
            [id] => Ok(*id),
            [] => Err(RepoError::CommitNotFound(prefix.to_string())),
            _ => Err(RepoError::AmbiguousCommit {
                prefix: prefix.to_string(),
                count: matches.len(),
            }),
        }
    }

    pub fn to_json(&self) -> RepoResult<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|e| RepoError::CorruptState(e.to_string()))
    }

    pub fn from_json(bytes: &[u8]) -> RepoResult<Self> {
        let state: Self =
            serde_json::from_slice(bytes).map_err(|e| RepoError::CorruptState(e.to_string()))?;
        state
            .branches
            .check()
            .map_err(|e| RepoError::CorruptState(e.to_string()))?;
        Ok(state)
    }
}
