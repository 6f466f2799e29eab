//! Content hashing for Sprig.
//!
//! Every stored record is keyed by a domain-separated BLAKE3 digest of its
//! canonical encoding. Blobs and commits hash under different domains, so the
//! same bytes can never alias across record kinds.

pub mod hasher;

pub use hasher::{ContentHasher, HasherError};
