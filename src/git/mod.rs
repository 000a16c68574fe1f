//! Git access for changed-path discovery
//!
//! Push payloads do not always list the files a push touched. When they
//! don't, the changed set is recovered by diffing the pushed revision range
//! in the local checkout.
//!
//! - [repository::Git2Repository]: real implementation using the `git2` crate
//! - [mock::MockRepository]: canned diffs for tests
//!
//! Most code should depend on the [Repository] trait rather than a concrete
//! implementation.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::{ChangedPaths, RevisionRange};
use crate::error::Result;

/// Read-only git operations the trigger needs
///
/// All implementors must be `Send + Sync`.
pub trait Repository: Send + Sync {
    /// Paths that differ between two revisions
    ///
    /// Both added, modified, deleted and renamed files are reported, by their
    /// repository-relative path (renames report both the old and new path).
    ///
    /// # Arguments
    /// * `base` - Revision the push started from (anything rev-parse accepts)
    /// * `head` - Revision the push ended at
    ///
    /// # Returns
    /// * `Ok(ChangedPaths)` - Sorted, de-duplicated paths
    /// * `Err` - If either revision cannot be resolved to a commit
    fn changed_paths(&self, base: &str, head: &str) -> Result<ChangedPaths>;
}

/// Fill in changed paths for a revision range, or return an empty set when
/// the range has nothing to diff against.
pub fn discover_changed_paths<R: Repository + ?Sized>(
    repo: &R,
    range: &RevisionRange,
) -> Result<ChangedPaths> {
    if !range.is_diffable() {
        return Ok(ChangedPaths::new());
    }
    repo.changed_paths(&range.before, &range.after)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_skips_branch_creation() {
        let mut repo = MockRepository::new();
        repo.add_diff("0000000", "abc", ["src/app.py"]);

        let range = RevisionRange::new("0000000", "abc");
        assert!(discover_changed_paths(&repo, &range).unwrap().is_empty());
    }

    #[test]
    fn test_discover_uses_repository() {
        let mut repo = MockRepository::new();
        repo.add_diff("abc", "def", ["README.md", "src/app.py"]);

        let range = RevisionRange::new("abc", "def");
        let paths = discover_changed_paths(&repo, &range).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths.contains("src/app.py"));
    }
}
