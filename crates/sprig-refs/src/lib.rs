//! Branch management for Sprig.
//!
//! Branches are mutable, named pointers to commit ids. Exactly one branch is
//! current at any time; committing advances it, checkout switches it.
//!
//! # Modules
//!
//! - [`error`] -- Error types for branch operations
//! - [`table`] -- The [`BranchTable`] holding every branch head
//! - [`names`] -- Branch name validation

pub mod error;
pub mod names;
pub mod table;

pub use error::{RefError, Result};
pub use names::validate_branch_name;
pub use table::BranchTable;
