//! Three-way merge of another branch into the current one.

use sprig_merge::{plan_merge, MergeAction, MergePlan};
use sprig_store::CommitBuilder;
use sprig_types::ObjectId;

use crate::error::{RepoError, RepoResult};
use crate::repository::Repository;

/// How a merge finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MergeOutcome {
    /// A merge commit was created. `conflicts` lists the files written with
    /// conflict blocks, sorted.
    Merged {
        commit: ObjectId,
        conflicts: Vec<String>,
    },
    /// The current branch was behind and now points at the given head.
    FastForwarded { head: ObjectId },
    /// The given head is already part of the current history.
    GivenIsAncestor,
}

impl MergeOutcome {
    pub fn has_conflicts(&self) -> bool {
        matches!(self, Self::Merged { conflicts, .. } if !conflicts.is_empty())
    }
}

impl Repository {
    /// Merge branch `given` into the current branch.
    ///
    /// Requires a clean staging area. The working directory is checked
    /// for untracked files in the way before anything is written.
    pub fn merge(&mut self, given: &str) -> RepoResult<MergeOutcome> {
        if !self.state.staging.is_empty() || !self.state.removal_marks.is_empty() {
            return Err(RepoError::UncommittedChanges);
        }
        let Some(given_id) = self.state.branches.get(given) else {
            return Err(RepoError::NoSuchBranch(given.to_string()));
        };
        let current_branch = self.state.branches.current().to_string();
        if current_branch == given {
            return Err(RepoError::CannotMergeSelf(given.to_string()));
        }

        let current_id = self.head_id()?;
        let split_id =
            self.graph()
                .split_point(current_id, given_id, self.config.merge.split_strategy)?;

        if split_id == given_id {
            tracing::info!(given, "given branch is an ancestor of the current branch");
            return Ok(MergeOutcome::GivenIsAncestor);
        }
        if split_id == current_id {
            let report = self.move_worktree_to(given_id)?;
            self.state.branches.advance(given_id);
            tracing::info!(
                given,
                head = %given_id.short_hex(),
                written = report.written.len(),
                deleted = report.deleted.len(),
                "fast-forwarded"
            );
            return Ok(MergeOutcome::FastForwarded { head: given_id });
        }

        let split = self.read_commit(&split_id)?;
        let current = self.read_commit(&current_id)?;
        let given_commit = self.read_commit(&given_id)?;
        let plan = plan_merge(self.store.as_ref(), &split, &current, &given_commit)?;
        self.reconciler().check_writes(&current, plan.writes())?;

        let MergePlan { actions, conflicts } = plan;
        for action in actions {
            match action {
                MergeAction::Write { path, content } => {
                    self.reconciler().write_file(&path, &content)?;
                    self.state.staging.stage(&path, content)?;
                }
                MergeAction::Remove { path } => {
                    self.reconciler().remove_file(&path)?;
                    self.state.removal_marks.insert(path);
                }
            }
        }
        for path in &conflicts {
            tracing::warn!(file = %path, "merge conflict");
        }

        let message = format!("Merged {given} into {current_branch}.");
        let commit = self.finish_commit(CommitBuilder::merge(
            current_id,
            &current,
            given_id,
            message,
        ))?;
        tracing::info!(
            given,
            commit = %commit.short_hex(),
            conflicts = conflicts.len(),
            "merged"
        );
        Ok(MergeOutcome::Merged { commit, conflicts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RepoConfig;
    use sprig_dag::SplitStrategy;
    use sprig_merge::{render_conflict, LINE_SEPARATOR};
    use sprig_store::{Blob, Parents};
    use sprig_worktree::{MemoryWorkingDir, WorkingDir};

    fn repo() -> Repository {
        Repository::in_memory(MemoryWorkingDir::new(), RepoConfig::default()).unwrap()
    }

    fn commit_file(repo: &mut Repository, name: &str, body: &str) -> ObjectId {
        repo.workdir().write(name, body.as_bytes()).unwrap();
        repo.add(name).unwrap();
        repo.commit(&format!("write {name}")).unwrap()
    }

    #[test]
    fn preconditions() {
        let mut repo = repo();
        repo.branch("feature").unwrap();
        assert!(matches!(repo.merge("nope"), Err(RepoError::NoSuchBranch(_))));
        assert!(matches!(repo.merge("master"), Err(RepoError::CannotMergeSelf(_))));

        repo.workdir().write("a.txt", b"a").unwrap();
        repo.add("a.txt").unwrap();
        assert!(matches!(repo.merge("feature"), Err(RepoError::UncommittedChanges)));
    }

    #[test]
    fn merging_an_ancestor_changes_nothing() {
        let mut repo = repo();
        repo.branch("old").unwrap();
        let head = commit_file(&mut repo, "a.txt", "a");

        assert_eq!(repo.merge("old").unwrap(), MergeOutcome::GivenIsAncestor);
        assert_eq!(repo.head_id().unwrap(), head);
        assert_eq!(repo.global_log().unwrap().len(), 2);
    }

    #[test]
    fn fast_forward_moves_head_without_merge_commit() {
        let mut repo = repo();
        repo.branch("feature").unwrap();
        repo.checkout_branch("feature").unwrap();
        let tip = commit_file(&mut repo, "a.txt", "a");
        repo.checkout_branch("master").unwrap();
        assert!(!repo.workdir().exists("a.txt"));

        let outcome = repo.merge("feature").unwrap();
        assert_eq!(outcome, MergeOutcome::FastForwarded { head: tip });
        assert_eq!(repo.head_id().unwrap(), tip);
        assert_eq!(repo.current_branch(), "master");
        assert_eq!(repo.workdir().read("a.txt").unwrap(), b"a");
        assert_eq!(repo.global_log().unwrap().len(), 2);
    }

    #[test]
    fn disjoint_changes_produce_two_parent_commit() {
        let mut repo = repo();
        commit_file(&mut repo, "base.txt", "base");
        repo.branch("feature").unwrap();
        let c2 = commit_file(&mut repo, "master.txt", "m");
        repo.checkout_branch("feature").unwrap();
        let c3 = commit_file(&mut repo, "feature.txt", "f");

        let outcome = repo.merge("master").unwrap();
        let MergeOutcome::Merged { commit, conflicts } = outcome else {
            panic!("expected a merge commit");
        };
        assert!(conflicts.is_empty());

        let merged = repo.read_commit(&commit).unwrap();
        assert_eq!(merged.parents, Parents::Merge(c3, c2));
        assert_eq!(merged.message, "Merged master into feature.");
        let names: Vec<_> = merged.snapshot.keys().cloned().collect();
        assert_eq!(names, vec!["base.txt", "feature.txt", "master.txt"]);
        assert_eq!(repo.workdir().read("master.txt").unwrap(), b"m");
        assert!(repo.staged_files().is_empty());
    }

    #[test]
    fn divergent_edits_conflict_but_still_commit() {
        let mut repo = repo();
        commit_file(&mut repo, "f.txt", "base\n");
        repo.branch("other").unwrap();
        commit_file(&mut repo, "f.txt", "ours\n");
        repo.checkout_branch("other").unwrap();
        commit_file(&mut repo, "f.txt", "theirs\n");
        repo.checkout_branch("master").unwrap();

        let outcome = repo.merge("other").unwrap();
        assert!(outcome.has_conflicts());
        let MergeOutcome::Merged { commit, conflicts } = outcome else {
            panic!("expected a merge commit");
        };
        assert_eq!(conflicts, vec!["f.txt"]);

        let expected = render_conflict(Some(b"ours\n"), Some(b"theirs\n"), LINE_SEPARATOR);
        assert_eq!(repo.workdir().read("f.txt").unwrap(), expected);
        let merged = repo.read_commit(&commit).unwrap();
        assert_eq!(
            merged.blob_id("f.txt"),
            Some(&Blob::new(expected, "f.txt").id().unwrap())
        );
        assert_eq!(repo.head_id().unwrap(), commit);
    }

    #[test]
    fn deletion_on_given_side_is_applied() {
        let mut repo = repo();
        commit_file(&mut repo, "keep.txt", "k");
        commit_file(&mut repo, "gone.txt", "g");
        repo.branch("cleanup").unwrap();
        commit_file(&mut repo, "new.txt", "n");
        repo.checkout_branch("cleanup").unwrap();
        repo.remove("gone.txt").unwrap();
        repo.commit("drop gone").unwrap();
        repo.checkout_branch("master").unwrap();

        let MergeOutcome::Merged { commit, .. } = repo.merge("cleanup").unwrap() else {
            panic!("expected a merge commit");
        };
        assert!(!repo.workdir().exists("gone.txt"));
        let merged = repo.read_commit(&commit).unwrap();
        assert!(!merged.tracks("gone.txt"));
        assert!(merged.tracks("new.txt"));
        assert!(repo.removal_marks().is_empty());
    }

    #[test]
    fn untracked_file_blocks_merge_without_changes() {
        let mut repo = repo();
        commit_file(&mut repo, "base.txt", "base");
        repo.branch("other").unwrap();
        commit_file(&mut repo, "ours.txt", "o");
        repo.checkout_branch("other").unwrap();
        commit_file(&mut repo, "theirs.txt", "t");
        repo.checkout_branch("master").unwrap();
        repo.workdir().write("theirs.txt", b"local").unwrap();
        let head = repo.head_id().unwrap();

        let err = repo.merge("other").unwrap_err();
        assert!(matches!(err, RepoError::UntrackedFileBlocking(ref p) if p == "theirs.txt"));
        assert_eq!(repo.head_id().unwrap(), head);
        assert_eq!(repo.workdir().read("theirs.txt").unwrap(), b"local");
        assert!(repo.staged_files().is_empty());
    }

    /// Merge `side` into `master` twice, with `master` editing `f.txt`
    /// again between the merges. Returns the second outcome and `f.txt`.
    fn repeat_merge(strategy: SplitStrategy) -> (MergeOutcome, Vec<u8>) {
        let mut config = RepoConfig::default();
        config.merge.split_strategy = strategy;
        let mut repo = Repository::in_memory(MemoryWorkingDir::new(), config).unwrap();

        commit_file(&mut repo, "f.txt", "base\n");
        repo.branch("side").unwrap();
        repo.checkout_branch("side").unwrap();
        commit_file(&mut repo, "f.txt", "side\n");
        repo.checkout_branch("master").unwrap();
        commit_file(&mut repo, "m.txt", "m");
        assert!(!repo.merge("side").unwrap().has_conflicts());
        assert_eq!(repo.workdir().read("f.txt").unwrap(), b"side\n");

        commit_file(&mut repo, "f.txt", "master\n");
        repo.checkout_branch("side").unwrap();
        commit_file(&mut repo, "s.txt", "s");
        repo.checkout_branch("master").unwrap();

        let outcome = repo.merge("side").unwrap();
        let f = repo.workdir().read("f.txt").unwrap();
        (outcome, f)
    }

    #[test]
    fn first_parent_split_reports_stale_conflict() {
        let (outcome, f) = repeat_merge(SplitStrategy::FirstParent);
        let MergeOutcome::Merged { conflicts, .. } = outcome else {
            panic!("expected a merge commit");
        };
        assert_eq!(conflicts, vec!["f.txt"]);
        assert_eq!(f, render_conflict(Some(b"master\n"), Some(b"side\n"), LINE_SEPARATOR));
    }

    #[test]
    fn full_dag_split_uses_previous_merge() {
        let (outcome, f) = repeat_merge(SplitStrategy::FullDag);
        assert!(matches!(outcome, MergeOutcome::Merged { .. }));
        assert!(!outcome.has_conflicts());
        assert_eq!(f, b"master\n");
    }
}
