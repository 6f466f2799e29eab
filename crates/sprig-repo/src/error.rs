use std::path::PathBuf;

use sprig_refs::RefError;
use sprig_store::{EmptyCommitKind, StoreError};
use sprig_worktree::WorktreeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("not a sprig repository: {0}")]
    NotInitialized(PathBuf),

    #[error("a sprig repository already exists in {0}")]
    AlreadyInitialized(PathBuf),

    #[error("file does not exist: {0}")]
    FileNotFound(String),

    #[error("no reason to remove the file: {0}")]
    NothingToRemove(String),

    #[error("please enter a commit message")]
    EmptyCommitMessage,

    #[error("no changes added to the commit")]
    NoChanges,

    #[error("a branch with that name already exists: {0}")]
    BranchExists(String),

    #[error("a branch with that name does not exist: {0}")]
    BranchNotFound(String),

    #[error("cannot remove the current branch: {0}")]
    CannotRemoveCurrentBranch(String),

    #[error("invalid branch name {name:?}: {reason}")]
    InvalidBranchName { name: String, reason: String },

    #[error("no such branch exists: {0}")]
    NoSuchBranch(String),

    #[error("no need to checkout the current branch: {0}")]
    AlreadyOnBranch(String),

    #[error("no commit with that id exists: {0}")]
    CommitNotFound(String),

    #[error("commit id {prefix} is ambiguous: {count} commits match")]
    AmbiguousCommit { prefix: String, count: usize },

    #[error("file does not exist in that commit: {0}")]
    FileNotInCommit(String),

    #[error("there is an untracked file in the way; delete it, or add and commit it first: {0}")]
    UntrackedFileBlocking(String),

    #[error("you have uncommitted changes")]
    UncommittedChanges,

    #[error("cannot merge a branch with itself: {0}")]
    CannotMergeSelf(String),

    #[error("invalid filename {name:?}: {reason}")]
    InvalidPath { name: String, reason: String },

    #[error("corrupt repository state: {0}")]
    CorruptState(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(StoreError),

    #[error("graph error: {0}")]
    Dag(#[from] sprig_dag::DagError),

    #[error("merge error: {0}")]
    Merge(#[from] sprig_merge::MergeError),

    #[error("index error: {0}")]
    Index(#[from] sprig_index::IndexError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for RepoError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EmptyCommit(EmptyCommitKind::BlankMessage) => Self::EmptyCommitMessage,
            StoreError::EmptyCommit(EmptyCommitKind::NoChanges) => Self::NoChanges,
            other => Self::Store(other),
        }
    }
}

impl From<RefError> for RepoError {
    fn from(err: RefError) -> Self {
        match err {
            RefError::BranchNotFound { name } => Self::BranchNotFound(name),
            RefError::BranchExists { name } => Self::BranchExists(name),
            RefError::InvalidBranchName { name, reason } => Self::InvalidBranchName { name, reason },
            RefError::CannotRemoveCurrentBranch { name } => Self::CannotRemoveCurrentBranch(name),
        }
    }
}

impl From<WorktreeError> for RepoError {
    fn from(err: WorktreeError) -> Self {
        match err {
            WorktreeError::UntrackedFileBlocking { path } => Self::UntrackedFileBlocking(path),
            WorktreeError::FileNotInCommit { path } => Self::FileNotInCommit(path),
            WorktreeError::NotFound(path) => Self::FileNotFound(path),
            WorktreeError::InvalidPath { name, reason } => Self::InvalidPath { name, reason },
            WorktreeError::Io(e) => Self::Io(e),
            WorktreeError::Store(e) => e.into(),
        }
    }
}

pub type RepoResult<T> = Result<T, RepoError>;
