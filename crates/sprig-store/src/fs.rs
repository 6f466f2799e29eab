use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use sprig_types::ObjectId;

use crate::error::{StoreError, StoreResult};
use crate::object::{ObjectKind, StoredObject};
use crate::traits::ObjectStore;

/// Write `bytes` to `path` atomically.
///
/// The bytes go to a temporary file in the same directory, are fsynced, and
/// the file is renamed over `path`. Readers observe either the old or the new
/// contents, never a partial write.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = path.parent().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("no parent directory for {}", path.display()),
        )
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp_path = dir.join(format!(".{name}.tmp"));

    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);

    fs::rename(&tmp_path, path)
}

/// On-disk object store: one file per object.
///
/// Objects live at `<root>/<hex[..2]>/<hex[2..]>`. Each file holds a one-byte
/// kind tag followed by the canonical encoding; the id is re-verified on read.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, id: &ObjectId) -> PathBuf {
        let hex = id.to_hex();
        self.root.join(&hex[..2]).join(&hex[2..])
    }
}

impl ObjectStore for FsObjectStore {
    fn read(&self, id: &ObjectId) -> StoreResult<Option<StoredObject>> {
        let bytes = match fs::read(self.object_path(id)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let (tag, data) = bytes.split_first().ok_or_else(|| StoreError::CorruptObject {
            id: *id,
            reason: "empty object file".into(),
        })?;
        let kind = ObjectKind::from_tag(*tag).ok_or_else(|| StoreError::CorruptObject {
            id: *id,
            reason: format!("unknown kind tag {tag:#04x}"),
        })?;

        let object = StoredObject::new(kind, data.to_vec());
        let computed = object.compute_id();
        if computed != *id {
            return Err(StoreError::HashMismatch { id: *id, computed });
        }
        Ok(Some(object))
    }

    fn write(&self, object: &StoredObject) -> StoreResult<ObjectId> {
        let id = object.compute_id();
        let path = self.object_path(&id);
        if path.exists() {
            return Ok(id);
        }
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let mut bytes = Vec::with_capacity(object.data.len() + 1);
        bytes.push(object.kind.tag());
        bytes.extend_from_slice(&object.data);
        write_atomic(&path, &bytes)?;

        tracing::debug!(id = %id.short_hex(), kind = %object.kind, size = object.size, "wrote object");
        Ok(id)
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        Ok(self.object_path(id).is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Blob, Commit};

    #[test]
    fn write_atomic_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        write_atomic(&path, b"one").unwrap();
        write_atomic(&path, b"two").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"two");
        assert!(!dir.path().join(".state.json.tmp").exists());
    }

    #[test]
    fn objects_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let blob = Blob::new("hello", "a.txt");
        let commit = Commit::initial();

        let (blob_id, commit_id) = {
            let store = FsObjectStore::open(dir.path().join("objects")).unwrap();
            (store.write_blob(&blob).unwrap(), store.write_commit(&commit).unwrap())
        };

        let store = FsObjectStore::open(dir.path().join("objects")).unwrap();
        assert_eq!(store.read_blob(&blob_id).unwrap(), blob);
        assert_eq!(store.read_commit(&commit_id).unwrap(), commit);
        assert!(store.exists(&blob_id).unwrap());
    }

    #[test]
    fn fan_out_layout() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsObjectStore::open(dir.path()).unwrap();
        let id = store.write_blob(&Blob::new("x", "x.txt")).unwrap();
        let hex = id.to_hex();
        assert!(dir.path().join(&hex[..2]).join(&hex[2..]).is_file());
    }

    #[test]
    fn write_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsObjectStore::open(dir.path()).unwrap();
        let blob = Blob::new("same", "a.txt");
        assert_eq!(store.write_blob(&blob).unwrap(), store.write_blob(&blob).unwrap());
    }

    #[test]
    fn missing_object_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsObjectStore::open(dir.path()).unwrap();
        let id = ObjectId::from_bytes(b"missing");
        assert!(store.read(&id).unwrap().is_none());
        assert!(!store.exists(&id).unwrap());
    }

    #[test]
    fn tampered_object_is_detected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsObjectStore::open(dir.path()).unwrap();
        let id = store.write_blob(&Blob::new("original", "a.txt")).unwrap();

        let path = store.object_path(&id);
        let mut bytes = fs::read(&path).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xff;
        fs::write(&path, bytes).unwrap();

        assert!(matches!(
            store.read(&id),
            Err(StoreError::HashMismatch { .. })
        ));
    }

    #[test]
    fn unknown_tag_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsObjectStore::open(dir.path()).unwrap();
        let id = store.write_blob(&Blob::new("x", "a.txt")).unwrap();
        let path = store.object_path(&id);
        let mut bytes = fs::read(&path).unwrap();
        bytes[0] = b'z';
        fs::write(&path, bytes).unwrap();

        assert!(matches!(
            store.read(&id),
            Err(StoreError::CorruptObject { .. })
        ));
    }
}
