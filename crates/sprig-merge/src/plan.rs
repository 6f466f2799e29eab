use std::collections::BTreeSet;

use sprig_store::{Commit, ObjectStore};
use sprig_types::ObjectId;

use crate::conflict::{render_conflict, LINE_SEPARATOR};
use crate::error::MergeResult;
use crate::resolution::{classify, Resolution};

/// One working-tree change produced by a merge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MergeAction {
    /// Write `content` to `path` and stage it.
    Write { path: String, content: Vec<u8> },
    /// Delete `path` from the working tree and mark it for removal.
    Remove { path: String },
}

impl MergeAction {
    pub fn path(&self) -> &str {
        match self {
            Self::Write { path, .. } | Self::Remove { path } => path,
        }
    }
}

/// Everything a merge will do, computed before anything is touched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergePlan {
    /// Actions in filename order.
    pub actions: Vec<MergeAction>,
    /// Filenames written with conflict blocks, sorted.
    pub conflicts: Vec<String>,
}

impl MergePlan {
    /// Files the merge writes, with the bytes it writes.
    pub fn writes(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.actions.iter().filter_map(|action| match action {
            MergeAction::Write { path, content } => Some((path.as_str(), content.as_slice())),
            MergeAction::Remove { .. } => None,
        })
    }
}

/// Classify every filename across the three snapshots and build the plan.
///
/// Blob contents are read from `store` only for files that are written.
pub fn plan_merge(
    store: &dyn ObjectStore,
    split: &Commit,
    current: &Commit,
    given: &Commit,
) -> MergeResult<MergePlan> {
    let names: BTreeSet<&String> = split
        .snapshot
        .keys()
        .chain(current.snapshot.keys())
        .chain(given.snapshot.keys())
        .collect();

    let mut plan = MergePlan::default();
    for name in names {
        let s = split.blob_id(name);
        let c = current.blob_id(name);
        let g = given.blob_id(name);

        let resolution = classify(s, c, g);
        tracing::debug!(file = %name, ?resolution, "classified");
        match resolution {
            Resolution::Keep => {}
            Resolution::TakeGiven | Resolution::Add => {
                if let Some(g) = g {
                    plan.actions.push(MergeAction::Write {
                        path: name.clone(),
                        content: content(store, g)?,
                    });
                }
            }
            Resolution::Delete => plan.actions.push(MergeAction::Remove { path: name.clone() }),
            Resolution::Conflict => {
                let ours = c.map(|id| content(store, id)).transpose()?;
                let theirs = g.map(|id| content(store, id)).transpose()?;
                plan.actions.push(MergeAction::Write {
                    path: name.clone(),
                    content: render_conflict(ours.as_deref(), theirs.as_deref(), LINE_SEPARATOR),
                });
                plan.conflicts.push(name.clone());
            }
        }
    }
    Ok(plan)
}

fn content(store: &dyn ObjectStore, id: &ObjectId) -> MergeResult<Vec<u8>> {
    Ok(store.read_blob(id)?.content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprig_store::{Blob, InMemoryObjectStore};

    fn snapshot(store: &InMemoryObjectStore, files: &[(&str, &str)]) -> Commit {
        let mut commit = Commit::initial();
        for (name, body) in files {
            let id = store.write_blob(&Blob::new(*body, *name)).unwrap();
            commit.snapshot.insert(name.to_string(), id);
        }
        commit
    }

    #[test]
    fn disjoint_changes_merge_cleanly() {
        let store = InMemoryObjectStore::new();
        let split = snapshot(&store, &[("shared.txt", "s")]);
        let current = snapshot(&store, &[("shared.txt", "s"), ("ours.txt", "o")]);
        let given = snapshot(&store, &[("shared.txt", "s"), ("theirs.txt", "t")]);

        let plan = plan_merge(&store, &split, &current, &given).unwrap();
        assert!(plan.conflicts.is_empty());
        assert_eq!(
            plan.actions,
            vec![MergeAction::Write {
                path: "theirs.txt".into(),
                content: b"t".to_vec()
            }]
        );
    }

    #[test]
    fn deletion_in_given_is_planned() {
        let store = InMemoryObjectStore::new();
        let split = snapshot(&store, &[("a.txt", "a")]);
        let current = snapshot(&store, &[("a.txt", "a")]);
        let given = snapshot(&store, &[]);

        let plan = plan_merge(&store, &split, &current, &given).unwrap();
        assert_eq!(plan.actions, vec![MergeAction::Remove { path: "a.txt".into() }]);
        assert_eq!(plan.writes().count(), 0);
    }

    #[test]
    fn divergent_edit_renders_conflict() {
        let store = InMemoryObjectStore::new();
        let split = snapshot(&store, &[("f.txt", "base\n")]);
        let current = snapshot(&store, &[("f.txt", "ours\n")]);
        let given = snapshot(&store, &[("f.txt", "theirs\n")]);

        let plan = plan_merge(&store, &split, &current, &given).unwrap();
        assert_eq!(plan.conflicts, vec!["f.txt"]);
        let (path, content) = plan.writes().next().unwrap();
        assert_eq!(path, "f.txt");
        assert_eq!(
            content,
            render_conflict(Some(b"ours\n"), Some(b"theirs\n"), LINE_SEPARATOR).as_slice()
        );
    }

    #[test]
    fn conflict_against_deletion_has_one_empty_side() {
        let store = InMemoryObjectStore::new();
        let split = snapshot(&store, &[("f.txt", "base\n")]);
        let current = snapshot(&store, &[]);
        let given = snapshot(&store, &[("f.txt", "theirs\n")]);

        let plan = plan_merge(&store, &split, &current, &given).unwrap();
        assert_eq!(plan.conflicts, vec!["f.txt"]);
        let (_, content) = plan.writes().next().unwrap();
        assert_eq!(content, render_conflict(None, Some(b"theirs\n"), LINE_SEPARATOR).as_slice());
    }

    #[test]
    fn missing_blob_is_an_error() {
        let store = InMemoryObjectStore::new();
        let split = Commit::initial();
        let current = Commit::initial();
        let mut given = Commit::initial();
        given
            .snapshot
            .insert("ghost.txt".into(), ObjectId::from_bytes(b"never written"));
        assert!(plan_merge(&store, &split, &current, &given).is_err());
    }
}
