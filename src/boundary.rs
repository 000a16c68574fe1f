use serde::Serialize;
use std::fmt;

/// Non-fatal conditions noticed while resolving an event.
/// These should be reported to the user but never change the exit status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "warning", rename_all = "kebab-case")]
pub enum TriggerWarning {
    /// Push without any changed-path information; the ignore list cannot apply
    UnknownChangedPaths { branch: String },
    /// Push to a branch the trigger is not wired for
    UntrackedBranch { branch: String, main_branch: String },
    /// Release event with an action other than `created`
    IgnoredReleaseAction { action: String },
    /// Event type the trigger does not react to
    UnrecognizedEvent { name: String },
    /// Publish was decided but upload credentials are not available
    MissingCredentials { detail: String },
}

impl fmt::Display for TriggerWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerWarning::UnknownChangedPaths { branch } => write!(
                f,
                "No changed paths known for push to '{}'; building without path filtering",
                branch
            ),
            TriggerWarning::UntrackedBranch {
                branch,
                main_branch,
            } => write!(
                f,
                "Push to '{}' ignored: only '{}' triggers builds",
                branch, main_branch
            ),
            TriggerWarning::IgnoredReleaseAction { action } => {
                write!(f, "Release action '{}' ignored: only 'created' publishes", action)
            }
            TriggerWarning::UnrecognizedEvent { name } => {
                write!(f, "Event '{}' does not trigger this workflow", name)
            }
            TriggerWarning::MissingCredentials { detail } => write!(
                f,
                "Upload credentials unavailable ({}); a real run would fail before building",
                detail
            ),
        }
    }
}
