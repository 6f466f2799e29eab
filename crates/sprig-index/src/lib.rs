//! Staging area for Sprig.
//!
//! Holds file content captured by `add` until the next commit records it, and
//! classifies the working directory against the head commit for status
//! reports.
//!
//! # Key Types
//!
//! - [`StagingArea`] -- filename to captured bytes (BTreeMap-backed)
//! - [`WorkdirStatus`] -- result of status computation
//! - [`FileStatus`] -- kind of unstaged change (modified or deleted)

pub mod error;
pub mod staging;
pub mod status;

pub use error::{IndexError, IndexResult};
pub use staging::StagingArea;
pub use status::{compute_status, FileStatus, StatusEntry, WorkdirStatus};
