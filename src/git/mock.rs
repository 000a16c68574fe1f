use crate::domain::ChangedPaths;
use crate::error::{ReleaseTriggerError, Result};
use crate::git::Repository;
use std::collections::HashMap;

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    diffs: HashMap<(String, String), ChangedPaths>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            diffs: HashMap::new(),
        }
    }

    /// Register the paths reported for a `base..head` diff
    pub fn add_diff<I, S>(&mut self, base: &str, head: &str, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.diffs.insert(
            (base.to_string(), head.to_string()),
            paths.into_iter().map(Into::into).collect(),
        );
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn changed_paths(&self, base: &str, head: &str) -> Result<ChangedPaths> {
        self.diffs
            .get(&(base.to_string(), head.to_string()))
            .cloned()
            .ok_or_else(|| {
                ReleaseTriggerError::event(format!("unknown revision range {}..{}", base, head))
            })
    }
}
