/// Errors from working-tree operations.
#[derive(Debug, thiserror::Error)]
pub enum WorktreeError {
    /// An untracked working file would be overwritten with different content.
    #[error("there is an untracked file in the way: {path}; delete it, or add and commit it first")]
    UntrackedFileBlocking { path: String },

    /// The commit being checked out from does not contain the file.
    #[error("file does not exist in that commit: {path}")]
    FileNotInCommit { path: String },

    /// The working file does not exist.
    #[error("file does not exist: {0}")]
    NotFound(String),

    /// Filenames are flat names inside the working directory.
    #[error("invalid filename {name:?}: {reason}")]
    InvalidPath { name: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store error: {0}")]
    Store(#[from] sprig_store::StoreError),
}

pub type WorktreeResult<T> = Result<T, WorktreeError>;
