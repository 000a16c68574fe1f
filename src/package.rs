use crate::error::{ReleaseTriggerError, Result};
use regex::{Captures, Regex};
use semver::Version;
use std::fs;
use std::path::{Path, PathBuf};

const VERSION_PATTERN: &str = r#"(?m)^(__version__\s*=\s*)(["'])([^"']*)(["'])"#;

/// A Python module that declares the package version as `__version__ = "X.Y.Z"`
#[derive(Debug, Clone, PartialEq)]
pub struct VersionFile {
    path: PathBuf,
}

impl VersionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        VersionFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the declared version.
    ///
    /// # Returns
    /// * `Ok(Version)` - The first `__version__` assignment, parsed as semver
    /// * `Err` - If the file is unreadable, has no assignment, or the value is not semver
    pub fn read_version(&self) -> Result<Version> {
        let content = self.read()?;
        let raw = extract_version(&content).ok_or_else(|| {
            ReleaseTriggerError::version(format!(
                "no __version__ assignment in {}",
                self.path.display()
            ))
        })?;

        Version::parse(&raw).map_err(|e| {
            ReleaseTriggerError::version(format!(
                "{} declares '{}', which is not a semantic version: {}",
                self.path.display(),
                raw,
                e
            ))
        })
    }

    /// Rewrite the first `__version__` assignment, keeping its quote style.
    pub fn write_version(&self, version: &Version) -> Result<()> {
        let content = self.read()?;
        let updated = replace_version(&content, &version.to_string()).ok_or_else(|| {
            ReleaseTriggerError::version(format!(
                "no __version__ assignment in {}",
                self.path.display()
            ))
        })?;

        fs::write(&self.path, updated)?;
        Ok(())
    }

    fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|e| {
            ReleaseTriggerError::version(format!("cannot read {}: {}", self.path.display(), e))
        })
    }
}

/// Pull the raw `__version__` value out of module source
pub fn extract_version(source: &str) -> Option<String> {
    let re = Regex::new(VERSION_PATTERN).ok()?;
    re.captures(source).map(|caps| caps[3].to_string())
}

/// Replace the first `__version__` value; `None` if there is no assignment
pub fn replace_version(source: &str, new_version: &str) -> Option<String> {
    let re = Regex::new(VERSION_PATTERN).ok()?;
    if !re.is_match(source) {
        return None;
    }

    let replaced = re.replace(source, |caps: &Captures| {
        format!("{}{}{}{}", &caps[1], &caps[2], new_version, &caps[4])
    });
    Some(replaced.into_owned())
}
