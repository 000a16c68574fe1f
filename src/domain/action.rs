use super::VersionPart;
use serde::Serialize;
use std::fmt;

/// What the pipeline is authorized to do for an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Action {
    /// Build and upload; `bump` is `None` when the version comes from a release tag
    Publish { bump: Option<VersionPart> },
    /// Build without uploading
    BuildOnly,
    /// Run nothing
    Skip,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Publish { .. } => "publish",
            Action::BuildOnly => "build-only",
            Action::Skip => "skip",
        }
    }

    pub fn builds(&self) -> bool {
        !matches!(self, Action::Skip)
    }

    pub fn uploads(&self) -> bool {
        matches!(self, Action::Publish { .. })
    }

    pub fn bump(&self) -> Option<VersionPart> {
        match self {
            Action::Publish { bump } => *bump,
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Publish { bump: Some(part) } => write!(f, "publish ({} bump)", part),
            Action::Publish { bump: None } => write!(f, "publish (version from release tag)"),
            Action::BuildOnly => write!(f, "build only"),
            Action::Skip => write!(f, "skip"),
        }
    }
}
