//! Error types for commit graph traversal.

use sprig_types::ObjectId;

/// Errors that can occur during graph traversal.
#[derive(Debug, thiserror::Error)]
pub enum DagError {
    /// Two commits share no ancestor (histories from different roots).
    #[error("no common ancestor between {a:?} and {b:?}")]
    NoCommonAncestor { a: ObjectId, b: ObjectId },

    /// A commit or parent could not be loaded.
    #[error("store error: {0}")]
    Store(#[from] sprig_store::StoreError),
}

/// Convenience alias for graph results.
pub type DagResult<T> = Result<T, DagError>;
