use crate::error::{ReleaseTriggerError, Result};
use glob::{MatchOptions, Pattern};

/// Paths whose changes alone never warrant a build on push
pub const DEFAULT_PATHS_IGNORE: [&str; 4] = [".github/**", "README.md", ".gitignore", "CHANGELOG.md"];

// `*` stays within one path segment; `**` crosses segments.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Compiled path-ignore list
#[derive(Debug, Clone)]
pub struct PathFilter {
    patterns: Vec<Pattern>,
}

impl PathFilter {
    /// Compile a list of glob patterns
    ///
    /// # Returns
    /// * `Ok(PathFilter)` - All patterns compiled
    /// * `Err` - If any pattern is not a valid glob
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Pattern::new(p.as_ref()).map_err(|e| {
                    ReleaseTriggerError::config(format!(
                        "invalid ignore pattern '{}': {}",
                        p.as_ref(),
                        e
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(PathFilter { patterns })
    }

    /// True if the path matches any ignore pattern
    pub fn is_ignored(&self, path: &str) -> bool {
        let path = normalize_path(path);
        self.patterns
            .iter()
            .any(|p| p.matches_with(path, MATCH_OPTIONS))
    }

    /// Paths from the input that are not covered by the ignore list
    pub fn relevant<'a, I>(&self, paths: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a String>,
    {
        paths
            .into_iter()
            .map(String::as_str)
            .filter(|p| !self.is_ignored(p))
            .collect()
    }
}

impl Default for PathFilter {
    fn default() -> Self {
        // The built-in patterns are known-valid globs.
        PathFilter {
            patterns: DEFAULT_PATHS_IGNORE
                .iter()
                .filter_map(|p| Pattern::new(p).ok())
                .collect(),
        }
    }
}

fn normalize_path(path: &str) -> &str {
    let path = path.trim();
    path.strip_prefix("./").unwrap_or(path)
}
