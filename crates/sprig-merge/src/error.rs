/// Errors that can occur while planning a merge.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// A blob referenced by one of the three snapshots could not be read.
    #[error("store error: {0}")]
    Store(#[from] sprig_store::StoreError),
}

pub type MergeResult<T> = Result<T, MergeError>;
