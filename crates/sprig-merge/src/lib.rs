//! Merge engine for Sprig.
//!
//! Merges are whole-file and three-way: every filename in the split point,
//! the current head, or the given head is classified into exactly one
//! [`Resolution`], and the resolutions are turned into a [`MergePlan`] of
//! working-tree writes, removals and conflicts.

pub mod conflict;
pub mod error;
pub mod plan;
pub mod resolution;

pub use conflict::{render_conflict, LINE_SEPARATOR};
pub use error::{MergeError, MergeResult};
pub use plan::{plan_merge, MergeAction, MergePlan};
pub use resolution::{classify, Resolution};
