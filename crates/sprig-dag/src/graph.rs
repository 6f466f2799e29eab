//! Walks over the commit DAG.
//!
//! Nothing is cached: every walk reads commits from the store as it goes.

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use sprig_store::{Commit, ObjectStore};
use sprig_types::ObjectId;

use crate::error::{DagError, DagResult};

/// How the merge base is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SplitStrategy {
    /// First commit of the given head's first-parent chain that also lies on
    /// the current head's first-parent chain. Second parents are ignored, so
    /// after earlier merges this can pick an older base than necessary.
    #[default]
    FirstParent,
    /// A common ancestor of both heads, through any parent, that is not an
    /// ancestor of another common ancestor. Criss-cross histories can have
    /// several; the newest by timestamp wins, then the greatest id.
    FullDag,
}

/// Read-only view of the commit DAG stored in an object store.
pub struct CommitGraph<'a> {
    store: &'a dyn ObjectStore,
}

impl<'a> CommitGraph<'a> {
    pub fn new(store: &'a dyn ObjectStore) -> Self {
        Self { store }
    }

    pub fn commit(&self, id: &ObjectId) -> DagResult<Commit> {
        Ok(self.store.read_commit(id)?)
    }

    /// `start` and its first-parent ancestors, newest first, ending at the
    /// root commit.
    pub fn first_parent_chain(&self, start: ObjectId) -> DagResult<Vec<(ObjectId, Commit)>> {
        let mut chain = Vec::new();
        let mut next = Some(start);
        while let Some(id) = next {
            let commit = self.commit(&id)?;
            next = commit.parents.first();
            chain.push((id, commit));
        }
        Ok(chain)
    }

    /// Every commit reachable from `start` through any parent, `start` included.
    pub fn ancestors(&self, start: ObjectId) -> DagResult<HashSet<ObjectId>> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([start]);
        while let Some(id) = queue.pop_front() {
            if !visited.insert(id) {
                continue;
            }
            let commit = self.commit(&id)?;
            queue.extend(commit.parents.to_vec());
        }
        Ok(visited)
    }

    /// The merge base of `current` and `given`.
    pub fn split_point(
        &self,
        current: ObjectId,
        given: ObjectId,
        strategy: SplitStrategy,
    ) -> DagResult<ObjectId> {
        let split = match strategy {
            SplitStrategy::FirstParent => self.first_parent_split(current, given)?,
            SplitStrategy::FullDag => self.lowest_common_ancestor(current, given)?,
        };
        let split = split.ok_or(DagError::NoCommonAncestor {
            a: current,
            b: given,
        })?;
        tracing::debug!(
            current = %current.short_hex(),
            given = %given.short_hex(),
            split = %split.short_hex(),
            ?strategy,
            "found split point"
        );
        Ok(split)
    }

    fn first_parent_split(&self, current: ObjectId, given: ObjectId) -> DagResult<Option<ObjectId>> {
        let on_current: HashSet<ObjectId> = self
            .first_parent_chain(current)?
            .into_iter()
            .map(|(id, _)| id)
            .collect();

        let mut next = Some(given);
        while let Some(id) = next {
            if on_current.contains(&id) {
                return Ok(Some(id));
            }
            next = self.commit(&id)?.parents.first();
        }
        Ok(None)
    }

    fn lowest_common_ancestor(&self, a: ObjectId, b: ObjectId) -> DagResult<Option<ObjectId>> {
        if a == b {
            return Ok(Some(a));
        }
        let ancestors_a = self.ancestors(a)?;
        let ancestors_b = self.ancestors(b)?;
        let common: HashSet<ObjectId> = ancestors_a.intersection(&ancestors_b).copied().collect();

        let mut lowest = common.clone();
        for id in &common {
            if !lowest.contains(id) {
                continue;
            }
            for older in self.ancestors(*id)? {
                if older != *id {
                    lowest.remove(&older);
                }
            }
        }

        let mut best: Option<(sprig_types::Timestamp, ObjectId)> = None;
        for id in lowest {
            let key = (self.commit(&id)?.timestamp, id);
            if best.map_or(true, |current| key > current) {
                best = Some(key);
            }
        }
        Ok(best.map(|(_, id)| id))
    }
}
