//! Error types for branch operations.

use thiserror::Error;

/// Errors that can occur during branch operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RefError {
    #[error("branch not found: {name}")]
    BranchNotFound { name: String },

    #[error("branch already exists: {name}")]
    BranchExists { name: String },

    #[error("invalid branch name: {name}: {reason}")]
    InvalidBranchName { name: String, reason: String },

    /// Cannot delete the currently checked-out branch.
    #[error("cannot remove the current branch: {name}")]
    CannotRemoveCurrentBranch { name: String },
}

/// Convenience type alias for branch operations.
pub type Result<T> = std::result::Result<T, RefError>;
