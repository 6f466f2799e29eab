use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sprig_dag::SplitStrategy;
use sprig_worktree::ProtectedPaths;

use crate::error::{RepoError, RepoResult};

/// Contents of `.sprig/config.toml`. Every key is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoConfig {
    pub core: CoreConfig,
    pub worktree: WorktreeConfig,
    pub merge: MergeConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Branch created by `init`.
    pub default_branch: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            default_branch: "master".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorktreeConfig {
    /// Names checkout, reset and merge never delete.
    pub protected: ProtectedPaths,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    pub split_strategy: SplitStrategy,
}

impl RepoConfig {
    pub fn from_toml(text: &str) -> RepoResult<Self> {
        toml::from_str(text).map_err(|e| RepoError::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> RepoResult<String> {
        toml::to_string_pretty(self).map_err(|e| RepoError::Config(e.to_string()))
    }

    /// Load from `path`, falling back to defaults when the file is missing.
    pub fn load(path: &Path) -> RepoResult<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
}
