//! Working-tree access and reconciliation for Sprig.
//!
//! The [`Reconciler`] is the only component that writes or deletes files in
//! the working directory. Before applying a target snapshot it refuses to
//! overwrite any file that the current head does not track and whose bytes
//! differ from the target's.
//!
//! # Key Types
//!
//! - [`WorkingDir`] -- flat file accessor (`exists`/`read`/`write`/`delete`/`list`)
//! - [`FsWorkingDir`] -- on-disk working directory
//! - [`MemoryWorkingDir`] -- in-memory working directory for tests and embedding
//! - [`ProtectedPaths`] -- names reconciliation never deletes
//! - [`Reconciler`] -- snapshot application with the untracked-file guard

pub mod error;
pub mod fs;
pub mod memory;
pub mod protected;
pub mod reconciler;
pub mod workdir;

pub use error::{WorktreeError, WorktreeResult};
pub use fs::FsWorkingDir;
pub use memory::MemoryWorkingDir;
pub use protected::ProtectedPaths;
pub use reconciler::{ReconcileReport, Reconciler};
pub use workdir::{validate_filename, WorkingDir};
