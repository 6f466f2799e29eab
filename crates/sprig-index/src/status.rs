//! Working directory status.
//!
//! Compares the working directory against the head commit and the staging
//! area, producing the sections of a status report.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use sprig_store::{Blob, Commit};

use crate::error::IndexResult;
use crate::staging::StagingArea;

/// Complete status of the working directory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkdirStatus {
    /// Files staged for the next commit.
    pub staged: Vec<String>,
    /// Files `rm` took out of the working directory for the next commit.
    pub removed: Vec<String>,
    /// Changes present in the working directory but not staged.
    pub unstaged: Vec<StatusEntry>,
    /// Files present in the working directory but neither staged nor tracked.
    pub untracked: Vec<String>,
}

impl WorkdirStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if there are no changes of any kind.
    pub fn is_clean(&self) -> bool {
        self.staged.is_empty()
            && self.removed.is_empty()
            && self.unstaged.is_empty()
            && self.untracked.is_empty()
    }
}

/// A single unstaged change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub path: String,
    pub status: FileStatus,
}

impl StatusEntry {
    pub fn new(path: impl Into<String>, status: FileStatus) -> Self {
        Self {
            path: path.into(),
            status,
        }
    }
}

/// The kind of unstaged change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileStatus {
    /// Working content differs from what would be committed.
    Modified,
    /// The file would be committed but is missing from the working directory.
    Deleted,
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Modified => write!(f, "modified"),
            Self::Deleted => write!(f, "deleted"),
        }
    }
}

/// Classify every file known to the head, the staging area, or the
/// working directory.
///
/// - removed: in `removed_log` and absent from the working directory.
/// - modified: tracked, not staged, and working bytes differ from the head;
///   or staged and working bytes differ from the staged bytes.
/// - deleted: missing from the working directory while staged, or while
///   tracked and not marked for removal.
/// - untracked: present, neither staged nor tracked by the head.
pub fn compute_status(
    head: &Commit,
    staging: &StagingArea,
    removal_marks: &BTreeSet<String>,
    removed_log: &BTreeSet<String>,
    working: &BTreeMap<String, Vec<u8>>,
) -> IndexResult<WorkdirStatus> {
    let mut status = WorkdirStatus {
        staged: staging.filenames().map(str::to_string).collect(),
        removed: removed_log
            .iter()
            .filter(|name| !working.contains_key(*name))
            .cloned()
            .collect(),
        ..WorkdirStatus::default()
    };

    let names: BTreeSet<&str> = head
        .snapshot
        .keys()
        .map(String::as_str)
        .chain(staging.filenames())
        .chain(working.keys().map(String::as_str))
        .collect();

    for name in names {
        let tracked = head.blob_id(name);
        match (working.get(name), staging.get(name)) {
            (Some(bytes), Some(staged)) => {
                if bytes.as_slice() != staged {
                    status.unstaged.push(StatusEntry::new(name, FileStatus::Modified));
                }
            }
            (Some(bytes), None) => match tracked {
                Some(head_blob) => {
                    let working_blob = Blob::new(bytes.clone(), name).id()?;
                    if working_blob != *head_blob {
                        status.unstaged.push(StatusEntry::new(name, FileStatus::Modified));
                    }
                }
                None => status.untracked.push(name.to_string()),
            },
            (None, Some(_)) => status.unstaged.push(StatusEntry::new(name, FileStatus::Deleted)),
            (None, None) => {
                if tracked.is_some() && !removal_marks.contains(name) {
                    status.unstaged.push(StatusEntry::new(name, FileStatus::Deleted));
                }
            }
        }
    }

    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn head_with(files: &[(&str, &str)]) -> Commit {
        let mut commit = Commit::initial();
        for (name, content) in files {
            commit
                .snapshot
                .insert(name.to_string(), Blob::new(*content, *name).id().unwrap());
        }
        commit
    }

    fn working(files: &[(&str, &str)]) -> BTreeMap<String, Vec<u8>> {
        files
            .iter()
            .map(|(n, c)| (n.to_string(), c.as_bytes().to_vec()))
            .collect()
    }

    #[test]
    fn clean_tree() {
        let head = head_with(&[("a.txt", "a")]);
        let status = compute_status(
            &head,
            &StagingArea::new(),
            &BTreeSet::new(),
            &BTreeSet::new(),
            &working(&[("a.txt", "a")]),
        )
        .unwrap();
        assert!(status.is_clean());
    }

    #[test]
    fn tracked_file_edited_is_modified() {
        let head = head_with(&[("a.txt", "a")]);
        let status = compute_status(
            &head,
            &StagingArea::new(),
            &BTreeSet::new(),
            &BTreeSet::new(),
            &working(&[("a.txt", "changed")]),
        )
        .unwrap();
        assert_eq!(status.unstaged, vec![StatusEntry::new("a.txt", FileStatus::Modified)]);
    }

    #[test]
    fn staged_then_edited_is_modified() {
        let head = head_with(&[]);
        let mut staging = StagingArea::new();
        staging.stage("new.txt", b"v1".to_vec()).unwrap();
        let status = compute_status(
            &head,
            &staging,
            &BTreeSet::new(),
            &BTreeSet::new(),
            &working(&[("new.txt", "v2")]),
        )
        .unwrap();
        assert_eq!(status.staged, vec!["new.txt"]);
        assert_eq!(status.unstaged, vec![StatusEntry::new("new.txt", FileStatus::Modified)]);
    }

    #[test]
    fn missing_files_are_deleted_unless_marked() {
        let head = head_with(&[("gone.txt", "g"), ("rm.txt", "r")]);
        let mut staging = StagingArea::new();
        staging.stage("staged.txt", b"s".to_vec()).unwrap();
        let marks: BTreeSet<String> = ["rm.txt".to_string()].into();
        let status = compute_status(&head, &staging, &marks, &marks, &working(&[])).unwrap();
        assert_eq!(status.removed, vec!["rm.txt"]);
        assert_eq!(
            status.unstaged,
            vec![
                StatusEntry::new("gone.txt", FileStatus::Deleted),
                StatusEntry::new("staged.txt", FileStatus::Deleted),
            ]
        );
    }

    #[test]
    fn untracked_files() {
        let head = head_with(&[("kept.txt", "k")]);
        let status = compute_status(
            &head,
            &StagingArea::new(),
            &BTreeSet::new(),
            &BTreeSet::new(),
            &working(&[("new.txt", "n"), ("kept.txt", "k")]),
        )
        .unwrap();
        assert_eq!(status.untracked, vec!["new.txt"]);
        assert!(status.unstaged.is_empty());
    }

    #[test]
    fn removed_file_recreated_is_in_no_section() {
        let head = head_with(&[("rm.txt", "r")]);
        let marks: BTreeSet<String> = ["rm.txt".to_string()].into();
        let status = compute_status(
            &head,
            &StagingArea::new(),
            &marks,
            &marks,
            &working(&[("rm.txt", "r")]),
        )
        .unwrap();
        assert!(status.is_clean());
    }

    #[test]
    fn removed_file_recreated_with_new_content_is_modified() {
        let head = head_with(&[("rm.txt", "r")]);
        let marks: BTreeSet<String> = ["rm.txt".to_string()].into();
        let status = compute_status(
            &head,
            &StagingArea::new(),
            &marks,
            &marks,
            &working(&[("rm.txt", "other")]),
        )
        .unwrap();
        assert!(status.removed.is_empty());
        assert!(status.untracked.is_empty());
        assert_eq!(status.unstaged, vec![StatusEntry::new("rm.txt", FileStatus::Modified)]);
    }

    #[test]
    fn marked_but_kept_file_is_not_listed_as_removed() {
        let head = head_with(&[(".DS_Store", "x")]);
        let marks: BTreeSet<String> = [".DS_Store".to_string()].into();
        let status = compute_status(
            &head,
            &StagingArea::new(),
            &marks,
            &BTreeSet::new(),
            &working(&[(".DS_Store", "x")]),
        )
        .unwrap();
        assert!(status.removed.is_empty());
        assert!(status.untracked.is_empty());
    }
}
