//! Event ingestion from the GitHub Actions runtime
//!
//! Turns `GITHUB_EVENT_NAME` plus the JSON payload at `GITHUB_EVENT_PATH`
//! into an [`IncomingEvent`]. Events the workflow is not wired for come back
//! as [`Ingested::Ignored`] with the warning to show.

use crate::boundary::TriggerWarning;
use crate::domain::branch::normalize_branch;
use crate::domain::{ChangedPaths, Event, IncomingEvent, RevisionRange, VersionPart};
use crate::error::{ReleaseTriggerError, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_EVENT_NAME: &str = "GITHUB_EVENT_NAME";
pub const ENV_EVENT_PATH: &str = "GITHUB_EVENT_PATH";
pub const ENV_REF_NAME: &str = "GITHUB_REF_NAME";
pub const ENV_BASE_REF: &str = "GITHUB_BASE_REF";

/// Values read from the Actions environment
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GithubContext {
    pub event_name: String,
    pub event_path: Option<PathBuf>,
    pub ref_name: Option<String>,
    pub base_ref: Option<String>,
}

impl GithubContext {
    /// Read the context from process environment variables.
    ///
    /// # Returns
    /// * `Err` - If `GITHUB_EVENT_NAME` is missing or empty
    pub fn from_env() -> Result<Self> {
        let event_name = non_empty_var(ENV_EVENT_NAME).ok_or_else(|| {
            ReleaseTriggerError::event(format!(
                "{} is not set; not running inside GitHub Actions?",
                ENV_EVENT_NAME
            ))
        })?;

        Ok(GithubContext {
            event_name,
            event_path: non_empty_var(ENV_EVENT_PATH).map(PathBuf::from),
            ref_name: non_empty_var(ENV_REF_NAME),
            base_ref: non_empty_var(ENV_BASE_REF),
        })
    }

    /// Load the payload (if any) and convert it into an event
    pub fn ingest(&self) -> Result<Ingested> {
        let payload = match &self.event_path {
            Some(path) => load_payload(path)?,
            None => Payload::default(),
        };
        ingest_payload(self, &payload)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Result of ingesting a platform event
#[derive(Debug, Clone, PartialEq)]
pub enum Ingested {
    Event(IncomingEvent),
    Ignored(TriggerWarning),
}

/// The subset of webhook payload fields the trigger consumes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Payload {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub inputs: Option<Inputs>,
    #[serde(default, rename = "ref")]
    pub git_ref: Option<String>,
    #[serde(default)]
    pub before: Option<String>,
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub commits: Vec<PushCommit>,
    #[serde(default)]
    pub pull_request: Option<PullRequestPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Inputs {
    #[serde(default)]
    pub version_bump: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushCommit {
    #[serde(default)]
    pub added: Vec<String>,
    #[serde(default)]
    pub modified: Vec<String>,
    #[serde(default)]
    pub removed: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequestPayload {
    #[serde(default)]
    pub base: Option<BaseRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BaseRef {
    #[serde(default, rename = "ref")]
    pub git_ref: Option<String>,
}

/// Read and parse a webhook payload file
pub fn load_payload(path: &Path) -> Result<Payload> {
    let text = fs::read_to_string(path).map_err(|e| {
        ReleaseTriggerError::event(format!("cannot read event payload {}: {}", path.display(), e))
    })?;
    Ok(serde_json::from_str(&text)?)
}

/// Convert an event name and payload into an incoming event.
pub fn ingest_payload(ctx: &GithubContext, payload: &Payload) -> Result<Ingested> {
    let bump_input = payload
        .inputs
        .as_ref()
        .and_then(|inputs| inputs.version_bump.clone());

    let event = match ctx.event_name.as_str() {
        "release" => match payload.action.as_deref() {
            Some("created") => Event::ReleaseCreated,
            other => {
                return Ok(Ingested::Ignored(TriggerWarning::IgnoredReleaseAction {
                    action: other.unwrap_or("<none>").to_string(),
                }))
            }
        },
        "workflow_dispatch" => Event::ManualDispatch {
            bump: bump_input.unwrap_or_else(|| VersionPart::Patch.to_string()),
        },
        "workflow_call" => Event::ReusableCall {
            bump: bump_input.ok_or_else(|| {
                ReleaseTriggerError::invalid_input("workflow_call requires the 'version_bump' input")
            })?,
        },
        "push" => {
            let branch = payload
                .git_ref
                .as_deref()
                .or(ctx.ref_name.as_deref())
                .map(normalize_branch)
                .ok_or_else(|| ReleaseTriggerError::event("push event without a branch ref"))?;

            let revision_range = match (&payload.before, &payload.after) {
                (Some(before), Some(after)) => Some(RevisionRange::new(before, after)),
                _ => None,
            };

            return Ok(Ingested::Event(IncomingEvent {
                event: Event::Push {
                    branch,
                    changed_paths: pushed_paths(&payload.commits),
                },
                revision_range,
            }));
        }
        "pull_request" => {
            let branch = payload
                .pull_request
                .as_ref()
                .and_then(|pr| pr.base.as_ref())
                .and_then(|base| base.git_ref.as_deref())
                .or(ctx.base_ref.as_deref())
                .map(normalize_branch)
                .ok_or_else(|| {
                    ReleaseTriggerError::event("pull_request event without a base branch")
                })?;
            Event::PullRequest { branch }
        }
        other => {
            return Ok(Ingested::Ignored(TriggerWarning::UnrecognizedEvent {
                name: other.to_string(),
            }))
        }
    };

    Ok(Ingested::Event(event.into()))
}

fn pushed_paths(commits: &[PushCommit]) -> ChangedPaths {
    commits
        .iter()
        .flat_map(|c| c.added.iter().chain(&c.modified).chain(&c.removed))
        .cloned()
        .collect()
}
