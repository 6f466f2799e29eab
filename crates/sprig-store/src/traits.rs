use sprig_types::ObjectId;

use crate::error::{StoreError, StoreResult};
use crate::object::{Blob, Commit, StoredObject};

/// Content-addressed, append-only object store.
///
/// All implementations must satisfy these invariants:
/// - Objects are immutable once written and are never deleted.
/// - Writing an object that already exists is a no-op returning the same id.
/// - The store never interprets object contents.
/// - All I/O errors are propagated, never silently ignored.
pub trait ObjectStore: Send + Sync {
    /// Read an object by its content-addressed ID.
    ///
    /// Returns `Ok(None)` if the object does not exist.
    /// Returns `Err` on I/O failure or data corruption.
    fn read(&self, id: &ObjectId) -> StoreResult<Option<StoredObject>>;

    /// Write an object and return its content-addressed ID.
    fn write(&self, object: &StoredObject) -> StoreResult<ObjectId>;

    /// Check whether an object exists in the store.
    fn exists(&self, id: &ObjectId) -> StoreResult<bool>;

    /// Read multiple objects in a batch.
    fn read_batch(&self, ids: &[ObjectId]) -> StoreResult<Vec<Option<StoredObject>>> {
        ids.iter().map(|id| self.read(id)).collect()
    }

    /// Write multiple objects in a batch and return their IDs.
    fn write_batch(&self, objects: &[StoredObject]) -> StoreResult<Vec<ObjectId>> {
        objects.iter().map(|obj| self.write(obj)).collect()
    }

    /// Read and decode a commit, failing with `NotFound` if absent.
    fn read_commit(&self, id: &ObjectId) -> StoreResult<Commit> {
        let obj = self.read(id)?.ok_or(StoreError::NotFound(*id))?;
        Commit::from_stored_object(&obj)
    }

    /// Read and decode a blob, failing with `NotFound` if absent.
    fn read_blob(&self, id: &ObjectId) -> StoreResult<Blob> {
        let obj = self.read(id)?.ok_or(StoreError::NotFound(*id))?;
        Blob::from_stored_object(&obj)
    }

    fn write_commit(&self, commit: &Commit) -> StoreResult<ObjectId> {
        self.write(&commit.to_stored_object()?)
    }

    fn write_blob(&self, blob: &Blob) -> StoreResult<ObjectId> {
        self.write(&blob.to_stored_object()?)
    }
}
