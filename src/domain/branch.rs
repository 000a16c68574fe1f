/// Represents a git branch with context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub is_main: bool,
}

impl BranchContext {
    /// Create a branch context relative to the configured main branch.
    ///
    /// Accepts either a short name or a full `refs/heads/` reference.
    pub fn new(name: impl Into<String>, main_branch: &str) -> Self {
        let name = normalize_branch(&name.into());
        let is_main = name == normalize_branch(main_branch);

        BranchContext { name, is_main }
    }

    /// Check if this branch is the one releases are cut from
    pub fn is_release_branch(&self) -> bool {
        self.is_main
    }
}

/// Strip a `refs/heads/` prefix and surrounding whitespace from a branch name.
pub fn normalize_branch(name: &str) -> String {
    let trimmed = name.trim();
    trimmed
        .strip_prefix("refs/heads/")
        .unwrap_or(trimmed)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_branch() {
        let branch = BranchContext::new("master", "master");
        assert!(branch.is_main);
        assert!(branch.is_release_branch());
    }

    #[test]
    fn test_full_ref() {
        let branch = BranchContext::new("refs/heads/master", "master");
        assert_eq!(branch.name, "master");
        assert!(branch.is_main);
    }

    #[test]
    fn test_main_is_not_master() {
        let branch = BranchContext::new("main", "master");
        assert!(!branch.is_release_branch());
    }

    #[test]
    fn test_configured_main_branch() {
        let branch = BranchContext::new("trunk", "refs/heads/trunk");
        assert!(branch.is_main);
    }

    #[test]
    fn test_develop_branch() {
        let branch = BranchContext::new("develop", "master");
        assert!(!branch.is_main);
    }
}
