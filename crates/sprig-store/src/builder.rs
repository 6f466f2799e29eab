use std::collections::{BTreeMap, BTreeSet};

use sprig_types::{ObjectId, Timestamp};

use crate::error::{EmptyCommitKind, StoreError, StoreResult};
use crate::object::{Commit, Parents, Snapshot};

/// Builds the next commit from a parent snapshot and pending changes.
///
/// The resulting snapshot is `(parent - removed) ∪ staged`: staged entries
/// override parent entries and removed names are dropped.
#[derive(Clone, Debug)]
pub struct CommitBuilder {
    message: String,
    parents: Parents,
    base: Snapshot,
    staged: BTreeMap<String, ObjectId>,
    removed: BTreeSet<String>,
    timestamp: Option<Timestamp>,
    allow_empty: bool,
}

impl CommitBuilder {
    /// Start an ordinary commit on top of `parent`.
    pub fn on(parent_id: ObjectId, parent: &Commit, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            parents: Parents::Single(parent_id),
            base: parent.snapshot.clone(),
            staged: BTreeMap::new(),
            removed: BTreeSet::new(),
            timestamp: None,
            allow_empty: false,
        }
    }

    /// Start a merge commit. The snapshot is based on the first parent.
    ///
    /// Merge commits are recorded even when the merge changed nothing.
    pub fn merge(
        current_id: ObjectId,
        current: &Commit,
        given_id: ObjectId,
        message: impl Into<String>,
    ) -> Self {
        Self {
            parents: Parents::Merge(current_id, given_id),
            allow_empty: true,
            ..Self::on(current_id, current, message)
        }
    }

    pub fn with_staged(mut self, filename: impl Into<String>, blob: ObjectId) -> Self {
        self.staged.insert(filename.into(), blob);
        self
    }

    pub fn with_staged_all(mut self, staged: impl IntoIterator<Item = (String, ObjectId)>) -> Self {
        self.staged.extend(staged);
        self
    }

    pub fn with_removed(mut self, filename: impl Into<String>) -> Self {
        self.removed.insert(filename.into());
        self
    }

    pub fn with_removed_all(mut self, removed: impl IntoIterator<Item = String>) -> Self {
        self.removed.extend(removed);
        self
    }

    /// Override the commit time (defaults to now).
    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn build(self) -> StoreResult<Commit> {
        if self.message.trim().is_empty() {
            return Err(StoreError::EmptyCommit(EmptyCommitKind::BlankMessage));
        }
        if !self.allow_empty && self.staged.is_empty() && self.removed.is_empty() {
            return Err(StoreError::EmptyCommit(EmptyCommitKind::NoChanges));
        }

        let mut snapshot = self.base;
        snapshot.retain(|name, _| !self.removed.contains(name));
        for (name, blob) in self.staged {
            if !self.removed.contains(&name) {
                snapshot.insert(name, blob);
            }
        }

        Ok(Commit {
            parents: self.parents,
            message: self.message,
            timestamp: self.timestamp.unwrap_or_else(Timestamp::now),
            snapshot,
        })
    }
}
