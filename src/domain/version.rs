use crate::error::{ReleaseTriggerError, Result};
use semver::{BuildMetadata, Prerelease, Version};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic version segment to increment for a release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionPart {
    Patch,
    Minor,
    Major,
}

impl VersionPart {
    pub const ALL: [VersionPart; 3] = [VersionPart::Patch, VersionPart::Minor, VersionPart::Major];

    pub fn as_str(&self) -> &'static str {
        match self {
            VersionPart::Patch => "patch",
            VersionPart::Minor => "minor",
            VersionPart::Major => "major",
        }
    }
}

impl fmt::Display for VersionPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VersionPart {
    type Err = ReleaseTriggerError;

    /// Strict parse: only the exact lowercase names are accepted.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "patch" => Ok(VersionPart::Patch),
            "minor" => Ok(VersionPart::Minor),
            "major" => Ok(VersionPart::Major),
            other => Err(ReleaseTriggerError::invalid_input(format!(
                "unrecognized version bump '{}': expected one of patch, minor, major",
                other
            ))),
        }
    }
}

/// Bumps a version according to the specified part.
///
/// Increments the selected component and resets lower components to 0:
/// - **Major**: major += 1, minor = 0, patch = 0
/// - **Minor**: minor += 1, patch = 0
/// - **Patch**: patch += 1
///
/// Pre-release and build metadata are always cleared.
pub fn bump_version(version: &Version, part: VersionPart) -> Version {
    let mut next = version.clone();
    match part {
        VersionPart::Major => {
            next.major += 1;
            next.minor = 0;
            next.patch = 0;
        }
        VersionPart::Minor => {
            next.minor += 1;
            next.patch = 0;
        }
        VersionPart::Patch => {
            next.patch += 1;
        }
    }
    next.pre = Prerelease::EMPTY;
    next.build = BuildMetadata::EMPTY;
    next
}
