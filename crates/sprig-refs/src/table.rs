use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sprig_types::ObjectId;

use crate::error::{RefError, Result};
use crate::names::validate_branch_name;

/// Every branch head plus the name of the current branch.
///
/// Invariant: `current` is always a key of `branches`. Every mutating method
/// preserves it; [`BranchTable::check`] re-validates a deserialized table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchTable {
    branches: BTreeMap<String, ObjectId>,
    current: String,
}

impl BranchTable {
    /// A table with a single branch, which is current.
    pub fn new(default_branch: &str, head: ObjectId) -> Result<Self> {
        validate_branch_name(default_branch)?;
        let mut branches = BTreeMap::new();
        branches.insert(default_branch.to_string(), head);
        Ok(Self {
            branches,
            current: default_branch.to_string(),
        })
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Head commit of the current branch.
    pub fn head(&self) -> Result<ObjectId> {
        self.get(&self.current)
            .ok_or_else(|| RefError::BranchNotFound {
                name: self.current.clone(),
            })
    }

    pub fn get(&self, name: &str) -> Option<ObjectId> {
        self.branches.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.branches.contains_key(name)
    }

    /// Branches in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ObjectId)> {
        self.branches.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Create `name` pointing at `head`.
    pub fn create(&mut self, name: &str, head: ObjectId) -> Result<()> {
        validate_branch_name(name)?;
        if self.contains(name) {
            return Err(RefError::BranchExists {
                name: name.to_string(),
            });
        }
        self.branches.insert(name.to_string(), head);
        tracing::debug!(branch = name, head = %head.short_hex(), "created branch");
        Ok(())
    }

    /// Delete `name`. The commits it pointed at are untouched.
    pub fn remove(&mut self, name: &str) -> Result<ObjectId> {
        if name == self.current {
            return Err(RefError::CannotRemoveCurrentBranch {
                name: name.to_string(),
            });
        }
        let head = self
            .branches
            .remove(name)
            .ok_or_else(|| RefError::BranchNotFound {
                name: name.to_string(),
            })?;
        tracing::debug!(branch = name, "removed branch");
        Ok(head)
    }

    /// Move the current branch to `head`.
    pub fn advance(&mut self, head: ObjectId) {
        tracing::debug!(branch = %self.current, head = %head.short_hex(), "advanced branch");
        self.branches.insert(self.current.clone(), head);
    }

    /// Make `name` the current branch and return its head.
    pub fn switch(&mut self, name: &str) -> Result<ObjectId> {
        let head = self.get(name).ok_or_else(|| RefError::BranchNotFound {
            name: name.to_string(),
        })?;
        self.current = name.to_string();
        Ok(head)
    }

    /// Check the current-branch invariant.
    pub fn check(&self) -> Result<()> {
        self.head().map(|_| ())
    }
}
