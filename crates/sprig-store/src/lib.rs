//! Content-addressed object storage for Sprig.
//!
//! Blobs and commits are stored as immutable objects identified by the
//! domain-separated BLAKE3 hash of their canonical encoding, in the manner of
//! git's `.git/objects/` directory.
//!
//! # Object Types
//!
//! - [`Blob`] -- file content qualified by its filename
//! - [`Commit`] -- full filename-to-blob snapshot plus parents, message, timestamp
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`InMemoryObjectStore`] -- `HashMap`-based store for tests and embedding
//! - [`FsObjectStore`] -- one file per object under a fan-out directory
//!
//! # Design Rules
//!
//! 1. Objects are immutable once written; there is no delete.
//! 2. Writes are idempotent: re-writing an existing id is a no-op.
//! 3. Blobs are written before any commit that references them.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod builder;
pub mod error;
pub mod fs;
pub mod memory;
pub mod object;
pub mod traits;

pub use builder::CommitBuilder;
pub use error::{EmptyCommitKind, StoreError, StoreResult};
pub use fs::{write_atomic, FsObjectStore};
pub use memory::InMemoryObjectStore;
pub use object::{Blob, Commit, ObjectKind, Parents, Snapshot, StoredObject, INITIAL_MESSAGE};
pub use traits::ObjectStore;
