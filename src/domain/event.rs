use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Repository-relative paths touched by a change, in sorted order
pub type ChangedPaths = BTreeSet<String>;

/// The activation that started this run.
///
/// Dispatch variants keep the bump exactly as the caller supplied it;
/// it is validated when the event is resolved, not when it is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum Event {
    /// A release was created on the hosting platform
    ReleaseCreated,
    /// An operator triggered the workflow by hand
    ManualDispatch { bump: String },
    /// Another workflow invoked this one
    ReusableCall { bump: String },
    /// Commits were pushed to a branch
    Push {
        branch: String,
        changed_paths: ChangedPaths,
    },
    /// A pull request was opened or updated against a branch
    PullRequest { branch: String },
}

impl Event {
    /// Build a push event from any iterable of paths
    pub fn push<I, S>(branch: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Event::Push {
            branch: branch.into(),
            changed_paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Short kebab-case name used in output and step environments
    pub fn kind(&self) -> &'static str {
        match self {
            Event::ReleaseCreated => "release-created",
            Event::ManualDispatch { .. } => "manual-dispatch",
            Event::ReusableCall { .. } => "reusable-call",
            Event::Push { .. } => "push",
            Event::PullRequest { .. } => "pull-request",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::ReleaseCreated => write!(f, "release created"),
            Event::ManualDispatch { bump } => write!(f, "manual dispatch (bump '{}')", bump),
            Event::ReusableCall { bump } => write!(f, "reusable call (bump '{}')", bump),
            Event::Push {
                branch,
                changed_paths,
            } => write!(
                f,
                "push to '{}' ({} changed path(s))",
                branch,
                changed_paths.len()
            ),
            Event::PullRequest { branch } => write!(f, "pull request into '{}'", branch),
        }
    }
}

/// Commit range covered by a push, used to discover changed paths from git
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevisionRange {
    pub before: String,
    pub after: String,
}

impl RevisionRange {
    pub fn new(before: impl Into<String>, after: impl Into<String>) -> Self {
        RevisionRange {
            before: before.into(),
            after: after.into(),
        }
    }

    /// A push that creates a branch reports an all-zero `before` commit,
    /// which has no tree to diff against.
    pub fn is_diffable(&self) -> bool {
        let zero = |s: &str| s.is_empty() || s.chars().all(|c| c == '0');
        !zero(&self.before) && !zero(&self.after)
    }
}

/// An event as received from a trigger source, before resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingEvent {
    pub event: Event,
    pub revision_range: Option<RevisionRange>,
}

impl From<Event> for IncomingEvent {
    fn from(event: Event) -> Self {
        IncomingEvent {
            event,
            revision_range: None,
        }
    }
}
