//! Foundation types for Sprig.
//!
//! Every other Sprig crate depends on `sprig-types` for the identifiers and
//! timestamps stored in blobs and commits.
//!
//! # Key Types
//!
//! - [`ObjectId`] -- Content-addressed identifier (BLAKE3 hash)
//! - [`Timestamp`] -- Millisecond wall-clock time recorded on commits

pub mod error;
pub mod object;
pub mod temporal;

pub use error::TypeError;
pub use object::ObjectId;
pub use temporal::Timestamp;
