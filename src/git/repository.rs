use crate::domain::ChangedPaths;
use crate::error::{ReleaseTriggerError, Result};
use git2::{Repository as Git2Repo, Tree};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn tree_of(&self, rev: &str) -> Result<Tree<'_>> {
        let object = self.repo.revparse_single(rev).map_err(|e| {
            ReleaseTriggerError::event(format!("cannot resolve revision '{}': {}", rev, e))
        })?;
        let commit = object.peel_to_commit().map_err(|e| {
            ReleaseTriggerError::event(format!("revision '{}' is not a commit: {}", rev, e))
        })?;

        Ok(commit.tree()?)
    }
}

impl super::Repository for Git2Repository {
    fn changed_paths(&self, base: &str, head: &str) -> Result<ChangedPaths> {
        let old_tree = self.tree_of(base)?;
        let new_tree = self.tree_of(head)?;

        let diff = self
            .repo
            .diff_tree_to_tree(Some(&old_tree), Some(&new_tree), None)?;

        let mut paths = ChangedPaths::new();
        for delta in diff.deltas() {
            for file in [delta.old_file(), delta.new_file()] {
                if let Some(path) = file.path().and_then(|p| p.to_str()) {
                    paths.insert(path.replace('\\', "/"));
                }
            }
        }

        Ok(paths)
    }
}

// SAFETY: Git2Repository only performs read operations through libgit2,
// which is thread-safe for concurrent reads.
unsafe impl Sync for Git2Repository {}
