use std::fs;
use std::path::Path;

use sprig_dag::CommitGraph;
use sprig_refs::BranchTable;
use sprig_store::{
    write_atomic, Blob, Commit, CommitBuilder, FsObjectStore, InMemoryObjectStore, ObjectStore,
};
use sprig_types::ObjectId;
use sprig_worktree::{validate_filename, FsWorkingDir, Reconciler, WorkingDir};

use crate::config::RepoConfig;
use crate::error::{RepoError, RepoResult};
use crate::layout::{RepoLayout, RepoLock, META_DIR};
use crate::state::RepoState;

/// A Sprig repository: object store, working directory and the mutable
/// state loaded for one command.
///
/// Operations mutate the in-memory state only; [`Repository::persist`]
/// writes it back as one record. A failed operation leaves the state as it
/// was.
pub struct Repository {
    pub(crate) store: Box<dyn ObjectStore>,
    pub(crate) workdir: Box<dyn WorkingDir>,
    pub(crate) config: RepoConfig,
    pub(crate) state: RepoState,
    disk: Option<DiskBacking>,
}

struct DiskBacking {
    layout: RepoLayout,
    _lock: RepoLock,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("current_branch", &self.state.branches.current())
            .field("commits", &self.state.history.len())
            .field("staged", &self.state.staging.len())
            .field("on_disk", &self.disk.is_some())
            .finish()
    }
}

impl Repository {
    // ---- Construction ----

    /// Create a repository in `root` with a root commit on the configured
    /// default branch, and write it to disk.
    pub fn init(root: &Path, config: RepoConfig) -> RepoResult<Self> {
        let layout = RepoLayout::new(root);
        if layout.meta_dir().exists() {
            return Err(RepoError::AlreadyInitialized(root.to_path_buf()));
        }
        fs::create_dir_all(layout.meta_dir())?;
        write_atomic(&layout.config_path(), config.to_toml()?.as_bytes())?;

        let lock = RepoLock::acquire(&layout.lock_path())?;
        let store = FsObjectStore::open(layout.objects_dir())?;
        let workdir = FsWorkingDir::new(root, META_DIR);
        let mut repo = Self::bootstrap(Box::new(store), Box::new(workdir), config)?;
        repo.disk = Some(DiskBacking {
            layout,
            _lock: lock,
        });
        repo.persist()?;
        tracing::info!(root = %root.display(), "initialized repository");
        Ok(repo)
    }

    /// Open the repository whose working directory is `root`, taking the
    /// repository lock for the lifetime of the returned value.
    pub fn open(root: &Path) -> RepoResult<Self> {
        let layout = RepoLayout::new(root);
        if !layout.is_initialized() {
            return Err(RepoError::NotInitialized(root.to_path_buf()));
        }
        let lock = RepoLock::acquire(&layout.lock_path())?;
        let config = RepoConfig::load(&layout.config_path())?;
        let state = RepoState::from_json(&fs::read(layout.state_path())?)?;

        Ok(Self {
            store: Box::new(FsObjectStore::open(layout.objects_dir())?),
            workdir: Box::new(FsWorkingDir::new(root, META_DIR)),
            config,
            state,
            disk: Some(DiskBacking {
                layout,
                _lock: lock,
            }),
        })
    }

    /// A repository held entirely in memory over the given working directory.
    pub fn in_memory(workdir: impl WorkingDir + 'static, config: RepoConfig) -> RepoResult<Self> {
        Self::bootstrap(
            Box::new(InMemoryObjectStore::new()),
            Box::new(workdir),
            config,
        )
    }

    fn bootstrap(
        store: Box<dyn ObjectStore>,
        workdir: Box<dyn WorkingDir>,
        config: RepoConfig,
    ) -> RepoResult<Self> {
        let root = store.write_commit(&Commit::initial())?;
        let branches = BranchTable::new(&config.core.default_branch, root)?;
        Ok(Self {
            store,
            workdir,
            config,
            state: RepoState::new(branches, root),
            disk: None,
        })
    }

    /// Write the state record, staging area included, back to disk with a
    /// single atomic rename. A no-op for in-memory repositories.
    pub fn persist(&self) -> RepoResult<()> {
        let Some(disk) = &self.disk else {
            return Ok(());
        };
        write_atomic(&disk.layout.state_path(), &self.state.to_json()?)?;
        tracing::debug!(root = %disk.layout.root().display(), "persisted repository state");
        Ok(())
    }

    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    pub fn workdir(&self) -> &dyn WorkingDir {
        self.workdir.as_ref()
    }

    pub(crate) fn reconciler(&self) -> Reconciler<'_> {
        Reconciler::new(
            self.store.as_ref(),
            self.workdir.as_ref(),
            &self.config.worktree.protected,
        )
    }

    pub(crate) fn graph(&self) -> CommitGraph<'_> {
        CommitGraph::new(self.store.as_ref())
    }

    // ---- Staging ----

    /// Stage the working copy of `filename`.
    ///
    /// If it matches the head's version, any staged copy is dropped instead.
    /// Either way a pending removal of the file is cancelled.
    pub fn add(&mut self, filename: &str) -> RepoResult<()> {
        validate_filename(filename)?;
        if !self.workdir.exists(filename) {
            return Err(RepoError::FileNotFound(filename.to_string()));
        }
        let content = self.workdir.read(filename)?;
        let head = self.head_commit()?;

        let working_blob = Blob::new(content.as_slice(), filename).id()?;
        if head.blob_id(filename) == Some(&working_blob) {
            self.state.staging.unstage(filename);
        } else {
            self.state.staging.stage(filename, content)?;
        }
        self.state.removal_marks.remove(filename);
        self.state.removed_log.remove(filename);
        Ok(())
    }

    /// Unstage `filename`; if the head tracks it, also mark it for removal
    /// and delete the working copy.
    pub fn remove(&mut self, filename: &str) -> RepoResult<()> {
        let head = self.head_commit()?;
        let tracked = head.tracks(filename);
        if !tracked && !self.state.staging.contains(filename) {
            return Err(RepoError::NothingToRemove(filename.to_string()));
        }

        self.state.staging.unstage(filename);
        if tracked {
            // Protected files stay on disk and are not logged.
            if !self.workdir.exists(filename) || self.reconciler().remove_file(filename)? {
                self.state.removed_log.insert(filename.to_string());
            }
            self.state.removal_marks.insert(filename.to_string());
        }
        Ok(())
    }

    // ---- Commits ----

    /// Record staged files and removals as a new commit on the current branch.
    pub fn commit(&mut self, message: &str) -> RepoResult<ObjectId> {
        if message.trim().is_empty() {
            return Err(RepoError::EmptyCommitMessage);
        }
        if self.state.staging.is_empty() && self.state.removal_marks.is_empty() {
            return Err(RepoError::NoChanges);
        }
        let head_id = self.head_id()?;
        let head = self.store.read_commit(&head_id)?;
        self.finish_commit(CommitBuilder::on(head_id, &head, message))
    }

    /// Write staged blobs, then the commit built from `builder`, and move
    /// the current branch to it.
    pub(crate) fn finish_commit(&mut self, builder: CommitBuilder) -> RepoResult<ObjectId> {
        let mut staged = Vec::with_capacity(self.state.staging.len());
        for blob in self.state.staging.to_blobs() {
            let id = self.store.write_blob(&blob)?;
            staged.push((blob.filename, id));
        }

        let commit = builder
            .with_staged_all(staged)
            .with_removed_all(self.state.removal_marks.iter().cloned())
            .build()?;
        let id = self.store.write_commit(&commit)?;

        self.state.branches.advance(id);
        self.state.record(id);
        self.state.staging.clear();
        self.state.removal_marks.clear();
        self.state.removed_log.clear();
        tracing::info!(
            commit = %id.short_hex(),
            branch = self.state.branches.current(),
            files = commit.snapshot.len(),
            "committed"
        );
        Ok(id)
    }

    // ---- Branches ----

    /// Create `name` at the current head. The current branch does not change.
    pub fn branch(&mut self, name: &str) -> RepoResult<()> {
        let head = self.head_id()?;
        self.state.branches.create(name, head)?;
        Ok(())
    }

    pub fn remove_branch(&mut self, name: &str) -> RepoResult<()> {
        self.state.branches.remove(name)?;
        Ok(())
    }
}
