use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sprig_crypto::ContentHasher;
use sprig_types::{ObjectId, Timestamp};

use crate::error::{StoreError, StoreResult};

/// Message carried by the root commit of every repository.
pub const INITIAL_MESSAGE: &str = "initial commit";

/// Filename to blob id, sorted by filename.
pub type Snapshot = BTreeMap<String, ObjectId>;

/// The kind of object stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// File content qualified by its filename.
    Blob,
    /// Snapshot of every tracked file plus history metadata.
    Commit,
}

impl ObjectKind {
    /// Single-byte tag used by on-disk backends.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Blob => b'b',
            Self::Commit => b'c',
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b'b' => Some(Self::Blob),
            b'c' => Some(Self::Commit),
            _ => None,
        }
    }

    fn hasher(&self) -> &'static ContentHasher {
        match self {
            Self::Blob => &ContentHasher::BLOB,
            Self::Commit => &ContentHasher::COMMIT,
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blob => write!(f, "blob"),
            Self::Commit => write!(f, "commit"),
        }
    }
}

/// A stored object: kind tag + canonical encoding + cached size.
///
/// `StoredObject` is the unit of storage. Backends never interpret `data`;
/// they key it by [`StoredObject::compute_id`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredObject {
    pub kind: ObjectKind,
    pub data: Vec<u8>,
    pub size: u64,
}

impl StoredObject {
    pub fn new(kind: ObjectKind, data: Vec<u8>) -> Self {
        let size = data.len() as u64;
        Self { kind, data, size }
    }

    /// Compute the content-addressed ID for this object, using the
    /// domain-separated hasher of its kind.
    pub fn compute_id(&self) -> ObjectId {
        self.kind.hasher().hash(&self.data)
    }

    fn decode<T: for<'de> Deserialize<'de>>(&self, expected: ObjectKind) -> StoreResult<T> {
        if self.kind != expected {
            return Err(StoreError::CorruptObject {
                id: self.compute_id(),
                reason: format!("expected {expected}, got {}", self.kind),
            });
        }
        bincode::deserialize(&self.data).map_err(|e| StoreError::CorruptObject {
            id: self.compute_id(),
            reason: e.to_string(),
        })
    }
}

fn encode<T: Serialize>(kind: ObjectKind, value: &T) -> StoreResult<StoredObject> {
    let data = bincode::serialize(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
    Ok(StoredObject::new(kind, data))
}

// ---------------------------------------------------------------------------
// Blob
// ---------------------------------------------------------------------------

/// File content captured under a filename.
///
/// Identity covers both fields: the same bytes stored under two names are two
/// different blobs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    pub filename: String,
    pub content: Vec<u8>,
}

impl Blob {
    pub fn new(content: impl Into<Vec<u8>>, filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Content-addressed id; equal to `to_stored_object()?.compute_id()`.
    pub fn id(&self) -> StoreResult<ObjectId> {
        Ok(ContentHasher::BLOB.hash_canonical(self)?)
    }

    pub fn to_stored_object(&self) -> StoreResult<StoredObject> {
        encode(ObjectKind::Blob, self)
    }

    pub fn from_stored_object(obj: &StoredObject) -> StoreResult<Self> {
        obj.decode(ObjectKind::Blob)
    }
}

// ---------------------------------------------------------------------------
// Commit
// ---------------------------------------------------------------------------

/// Parent references of a commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parents {
    /// The root commit.
    Root,
    /// An ordinary commit.
    Single(ObjectId),
    /// A merge commit: (current head, merged-in head).
    Merge(ObjectId, ObjectId),
}

impl Parents {
    /// The first parent, followed by `log` and the split-point walk.
    pub fn first(&self) -> Option<ObjectId> {
        match self {
            Self::Root => None,
            Self::Single(p) | Self::Merge(p, _) => Some(*p),
        }
    }

    /// The merged-in parent of a merge commit.
    pub fn second(&self) -> Option<ObjectId> {
        match self {
            Self::Merge(_, p) => Some(*p),
            _ => None,
        }
    }

    pub fn is_merge(&self) -> bool {
        matches!(self, Self::Merge(..))
    }

    /// All parents, first parent first.
    pub fn to_vec(&self) -> Vec<ObjectId> {
        self.first().into_iter().chain(self.second()).collect()
    }
}

/// An immutable commit record.
///
/// The snapshot names every tracked file, not just the ones that changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub parents: Parents,
    pub message: String,
    pub timestamp: Timestamp,
    pub snapshot: Snapshot,
}

impl Commit {
    /// The root commit shared by every repository: no parents, no files,
    /// stamped at the epoch.
    pub fn initial() -> Self {
        Self {
            parents: Parents::Root,
            message: INITIAL_MESSAGE.to_string(),
            timestamp: Timestamp::epoch(),
            snapshot: Snapshot::new(),
        }
    }

    /// Content-addressed id over the full canonical encoding.
    pub fn id(&self) -> StoreResult<ObjectId> {
        Ok(ContentHasher::COMMIT.hash_canonical(self)?)
    }

    /// Blob id tracked under `filename`, if any.
    pub fn blob_id(&self, filename: &str) -> Option<&ObjectId> {
        self.snapshot.get(filename)
    }

    pub fn tracks(&self, filename: &str) -> bool {
        self.snapshot.contains_key(filename)
    }

    pub fn to_stored_object(&self) -> StoreResult<StoredObject> {
        encode(ObjectKind::Commit, self)
    }

    pub fn from_stored_object(obj: &StoredObject) -> StoreResult<Self> {
        obj.decode(ObjectKind::Commit)
    }
}
