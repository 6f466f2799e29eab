//! Commit graph traversal for Sprig.
//!
//! Commits form a DAG through their parent references. This crate walks it
//! straight out of an [`ObjectStore`](sprig_store::ObjectStore): first-parent
//! history for `log`, full ancestry, and split-point discovery for merges.

pub mod error;
pub mod graph;

pub use error::{DagError, DagResult};
pub use graph::{CommitGraph, SplitStrategy};
