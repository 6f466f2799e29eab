use sprig_crypto::HasherError;
use sprig_types::ObjectId;

/// Why a commit could not be built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyCommitKind {
    /// The message was empty or whitespace only.
    BlankMessage,
    /// Nothing staged and nothing marked for removal.
    NoChanges,
}

impl std::fmt::Display for EmptyCommitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankMessage => write!(f, "blank commit message"),
            Self::NoChanges => write!(f, "no changes added to the commit"),
        }
    }
}

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested object was not found.
    #[error("object not found: {0}")]
    NotFound(ObjectId),

    /// Content hash mismatch on read (data corruption).
    #[error("hash mismatch for {id}: computed {computed}")]
    HashMismatch { id: ObjectId, computed: ObjectId },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The object data is malformed or cannot be decoded.
    #[error("corrupt object {id}: {reason}")]
    CorruptObject { id: ObjectId, reason: String },

    /// A commit was requested with nothing to record.
    #[error("empty commit: {0}")]
    EmptyCommit(EmptyCommitKind),
}

impl From<HasherError> for StoreError {
    fn from(err: HasherError) -> Self {
        match err {
            HasherError::Serialization(msg) => Self::Serialization(msg),
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
