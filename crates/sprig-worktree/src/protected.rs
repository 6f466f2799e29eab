use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Working-tree names that reconciliation never deletes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtectedPaths(BTreeSet<String>);

impl ProtectedPaths {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// No protected names.
    pub fn none() -> Self {
        Self(BTreeSet::new())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for ProtectedPaths {
    fn default() -> Self {
        Self::new([".DS_Store"])
    }
}
