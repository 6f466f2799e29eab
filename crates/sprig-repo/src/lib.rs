//! The Sprig repository engine.
//!
//! A [`Repository`] ties the object store, the branch table, the staging
//! area and the working directory together and exposes the user-facing
//! operations: add, rm, commit, branch, checkout, reset and merge.
//!
//! # Key Types
//!
//! - [`Repository`] -- one open repository, on disk or in memory
//! - [`RepoState`] -- branches, history, staging area and removal bookkeeping
//! - [`RepoConfig`] -- `.sprig/config.toml`
//! - [`MergeOutcome`] -- merged, fast-forwarded, or nothing to do
//! - [`LogEntry`] -- a commit with its id, for log views
//!
//! # Transactions
//!
//! Each command is one read-modify-write transaction: [`Repository::open`]
//! takes the repository lock and loads the state, operations mutate it in
//! memory, and [`Repository::persist`] writes it back atomically. The lock
//! is released when the repository is dropped.

pub mod checkout;
pub mod config;
pub mod error;
pub mod layout;
pub mod merge;
pub mod query;
pub mod repository;
pub mod state;

pub use config::{CoreConfig, MergeConfig, RepoConfig, WorktreeConfig};
pub use error::{RepoError, RepoResult};
pub use layout::{RepoLayout, RepoLock, META_DIR};
pub use merge::MergeOutcome;
pub use query::LogEntry;
pub use repository::Repository;
pub use state::RepoState;
