//! Checkout and reset: moving the working directory between snapshots.

use sprig_types::ObjectId;
use sprig_worktree::ReconcileReport;

use crate::error::{RepoError, RepoResult};
use crate::repository::Repository;

impl Repository {
    /// Switch to `name`, making the working directory match its head.
    ///
    /// Staged files and removal marks are discarded. Files tracked by the
    /// old head but not by the target are deleted; untracked files stay.
    pub fn checkout_branch(&mut self, name: &str) -> RepoResult<()> {
        let Some(target_id) = self.state.branches.get(name) else {
            return Err(RepoError::NoSuchBranch(name.to_string()));
        };
        if self.state.branches.current() == name {
            return Err(RepoError::AlreadyOnBranch(name.to_string()));
        }

        let report = self.move_worktree_to(target_id)?;
        self.state.branches.switch(name)?;
        tracing::info!(
            branch = name,
            head = %target_id.short_hex(),
            written = report.written.len(),
            deleted = report.deleted.len(),
            "switched branch"
        );
        Ok(())
    }

    /// Restore `filename` from the head commit. Staging is left untouched.
    pub fn checkout_file(&mut self, filename: &str) -> RepoResult<()> {
        let head = self.head_commit()?;
        self.reconciler().restore_file(&head, filename)?;
        Ok(())
    }

    /// Restore `filename` from the commit named by a full or abbreviated id.
    pub fn checkout_file_from(&mut self, commit_ref: &str, filename: &str) -> RepoResult<()> {
        let id = self.resolve_commit(commit_ref)?;
        let commit = self.read_commit(&id)?;
        self.reconciler().restore_file(&commit, filename)?;
        Ok(())
    }

    /// Move the current branch to the commit named by `commit_ref` and make
    /// the working directory match it. The current branch does not change.
    pub fn reset(&mut self, commit_ref: &str) -> RepoResult<ObjectId> {
        let target_id = self.resolve_commit(commit_ref)?;
        let report = self.move_worktree_to(target_id)?;
        self.state.branches.advance(target_id);
        tracing::info!(
            branch = self.state.branches.current(),
            head = %target_id.short_hex(),
            written = report.written.len(),
            deleted = report.deleted.len(),
            "reset branch"
        );
        Ok(target_id)
    }

    /// Apply `target`'s snapshot over the current head's and drop all
    /// pending changes. The branch table is the caller's job.
    pub(crate) fn move_worktree_to(&mut self, target: ObjectId) -> RepoResult<ReconcileReport> {
        let current = self.head_commit()?;
        let target = self.read_commit(&target)?;
        let report = self.reconciler().apply_snapshot(&current, &target)?;
        if !report.skipped.is_empty() {
            tracing::debug!(skipped = ?report.skipped, "kept protected files");
        }

        self.state.staging.clear();
        self.state.removal_marks.clear();
        self.state.removed_log.clear();
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use crate::{RepoConfig, RepoError, Repository};
    use sprig_worktree::{MemoryWorkingDir, ProtectedPaths, WorkingDir};

    fn repo() -> Repository {
        Repository::in_memory(MemoryWorkingDir::new(), RepoConfig::default()).unwrap()
    }

    fn commit_file(repo: &mut Repository, name: &str, body: &str) {
        repo.workdir().write(name, body.as_bytes()).unwrap();
        repo.add(name).unwrap();
        repo.commit(&format!("write {name}")).unwrap();
    }

    #[test]
    fn checkout_branch_errors() {
        let mut repo = repo();
        assert!(matches!(
            repo.checkout_branch("nope"),
            Err(RepoError::NoSuchBranch(_))
        ));
        assert!(matches!(
            repo.checkout_branch("master"),
            Err(RepoError::AlreadyOnBranch(_))
        ));
    }

    #[test]
    fn checkout_branch_swaps_tracked_files() {
        let mut repo = repo();
        commit_file(&mut repo, "shared.txt", "v1");
        repo.branch("feature").unwrap();
        commit_file(&mut repo, "master-only.txt", "m");
        repo.workdir().write("scratch.txt", b"untracked").unwrap();

        repo.checkout_branch("feature").unwrap();
        assert_eq!(repo.current_branch(), "feature");
        assert!(!repo.workdir().exists("master-only.txt"));
        assert_eq!(repo.workdir().read("shared.txt").unwrap(), b"v1");
        assert_eq!(repo.workdir().read("scratch.txt").unwrap(), b"untracked");

        repo.checkout_branch("master").unwrap();
        assert_eq!(repo.workdir().read("master-only.txt").unwrap(), b"m");
    }

    #[test]
    fn checkout_branch_clears_pending_changes() {
        let mut repo = repo();
        commit_file(&mut repo, "a.txt", "a");
        repo.branch("feature").unwrap();
        repo.workdir().write("b.txt", b"b").unwrap();
        repo.add("b.txt").unwrap();
        repo.remove("a.txt").unwrap();

        repo.checkout_branch("feature").unwrap();
        assert!(repo.staged_files().is_empty());
        assert!(repo.removal_marks().is_empty());
        assert_eq!(repo.workdir().read("a.txt").unwrap(), b"a");
    }

    #[test]
    fn untracked_file_blocks_checkout_without_changes() {
        let mut repo = repo();
        repo.branch("feature").unwrap();
        commit_file(&mut repo, "a.txt", "committed");
        repo.checkout_branch("feature").unwrap();
        repo.workdir().write("a.txt", b"mine").unwrap();

        let err = repo.checkout_branch("master").unwrap_err();
        assert!(matches!(err, RepoError::UntrackedFileBlocking(ref p) if p == "a.txt"));
        assert_eq!(repo.current_branch(), "feature");
        assert_eq!(repo.workdir().read("a.txt").unwrap(), b"mine");
    }

    #[test]
    fn protected_path_is_not_deleted_on_checkout() {
        let config = RepoConfig::default();
        assert_eq!(config.worktree.protected, ProtectedPaths::default());
        let mut repo = Repository::in_memory(MemoryWorkingDir::new(), config).unwrap();
        repo.branch("bare").unwrap();
        commit_file(&mut repo, ".DS_Store", "junk");

        repo.checkout_branch("bare").unwrap();
        assert!(repo.workdir().exists(".DS_Store"));
    }

    #[test]
    fn checkout_file_restores_head_version() {
        let mut repo = repo();
        commit_file(&mut repo, "a.txt", "committed");
        repo.workdir().write("a.txt", b"edited").unwrap();
        repo.add("a.txt").unwrap();

        repo.checkout_file("a.txt").unwrap();
        assert_eq!(repo.workdir().read("a.txt").unwrap(), b"committed");
        assert_eq!(repo.staged_files(), vec!["a.txt"]);
        assert!(matches!(
            repo.checkout_file("missing.txt"),
            Err(RepoError::FileNotInCommit(_))
        ));
    }

    #[test]
    fn checkout_file_from_abbreviated_commit() {
        let mut repo = repo();
        commit_file(&mut repo, "a.txt", "one");
        let first = repo.head_id().unwrap();
        commit_file(&mut repo, "a.txt", "two");

        repo.checkout_file_from(&first.abbrev(), "a.txt").unwrap();
        assert_eq!(repo.workdir().read("a.txt").unwrap(), b"one");
        assert!(matches!(
            repo.checkout_file_from("zzzzzz", "a.txt"),
            Err(RepoError::CommitNotFound(_))
        ));
    }

    #[test]
    fn reset_moves_branch_and_worktree() {
        let mut repo = repo();
        commit_file(&mut repo, "a.txt", "one");
        let first = repo.head_id().unwrap();
        commit_file(&mut repo, "b.txt", "b");
        repo.workdir().write("c.txt", b"c").unwrap();
        repo.add("c.txt").unwrap();

        let target = repo.reset(&first.to_hex()).unwrap();
        assert_eq!(target, first);
        assert_eq!(repo.head_id().unwrap(), first);
        assert_eq!(repo.current_branch(), "master");
        assert!(!repo.workdir().exists("b.txt"));
        assert!(repo.staged_files().is_empty());
        assert_eq!(repo.global_log().unwrap().len(), 3);
    }

    #[test]
    fn untracked_file_blocks_reset_without_changes() {
        let mut repo = repo();
        commit_file(&mut repo, "a.txt", "committed");
        let with_a = repo.head_id().unwrap();
        repo.remove("a.txt").unwrap();
        repo.commit("drop a").unwrap();
        let head = repo.head_id().unwrap();
        repo.workdir().write("a.txt", b"mine").unwrap();
        repo.workdir().write("b.txt", b"b").unwrap();
        repo.add("b.txt").unwrap();

        let err = repo.reset(&with_a.abbrev()).unwrap_err();
        assert!(matches!(err, RepoError::UntrackedFileBlocking(ref p) if p == "a.txt"));
        assert_eq!(repo.head_id().unwrap(), head);
        assert_eq!(repo.staged_files(), vec!["b.txt"]);
        assert_eq!(repo.workdir().read("a.txt").unwrap(), b"mine");
    }

    #[test]
    fn untracked_file_matching_target_does_not_block_reset() {
        let mut repo = repo();
        commit_file(&mut repo, "a.txt", "same");
        let with_a = repo.head_id().unwrap();
        repo.remove("a.txt").unwrap();
        repo.commit("drop a").unwrap();
        repo.workdir().write("a.txt", b"same").unwrap();

        assert_eq!(repo.reset(&with_a.to_hex()).unwrap(), with_a);
        assert_eq!(repo.workdir().read("a.txt").unwrap(), b"same");
    }

    #[test]
    fn moving_worktree_reports_written_and_deleted() {
        let mut repo = repo();
        repo.branch("bare").unwrap();
        commit_file(&mut repo, "a.txt", "a");
        commit_file(&mut repo, ".DS_Store", "junk");
        let bare = repo.state.branches.get("bare").unwrap();

        let report = repo.move_worktree_to(bare).unwrap();
        assert!(report.written.is_empty());
        assert_eq!(report.deleted, vec!["a.txt"]);
        assert_eq!(report.skipped, vec![".DS_Store"]);
    }
}
