//! Command-line surface
//!
//! Argument definitions plus the conversion from flags to events. The
//! workflow itself lives in [`orchestration`].

pub mod orchestration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::Config;
use crate::domain::{ChangedPaths, Event, IncomingEvent, RevisionRange, VersionPart};
use crate::error::{ReleaseTriggerError, Result};
use crate::github::{GithubContext, Ingested};
use crate::ui::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "release-trigger",
    version,
    about = "Decide whether a CI event builds, publishes or skips a package release"
)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve an event and print the decision without running anything
    Decide {
        #[command(flatten)]
        event: EventArgs,

        #[arg(long, value_enum, default_value_t = FormatArg::Text, help = "Output format")]
        format: FormatArg,
    },

    /// Resolve an event and run the build/upload steps it authorizes
    Run {
        #[command(flatten)]
        event: EventArgs,

        #[arg(long, help = "Preview what would happen without running steps")]
        dry_run: bool,
    },

    /// Show the package version from the configured version file
    Version {
        #[arg(long, help = "Preview the version after this bump (patch, minor, major)")]
        bump: Option<String>,

        #[arg(long, requires = "bump", help = "Write the bumped version back to the file")]
        write: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Release,
    Dispatch,
    Call,
    Push,
    PullRequest,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Text,
    Json,
    Github,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Github => OutputFormat::Github,
        }
    }
}

/// Where the event comes from: explicit flags or the Actions environment
#[derive(Args, Debug, Clone, Default)]
pub struct EventArgs {
    #[arg(
        long,
        value_enum,
        required_unless_present = "from_github",
        conflicts_with = "from_github",
        help = "Event type to resolve"
    )]
    pub event: Option<EventKind>,

    #[arg(long, help = "Version bump input for dispatch/call events")]
    pub bump: Option<String>,

    #[arg(long, help = "Pushed branch, or pull request base branch")]
    pub branch: Option<String>,

    #[arg(long = "changed", value_name = "PATH", help = "Changed path (repeatable)")]
    pub changed: Vec<String>,

    #[arg(
        long,
        value_name = "BEFORE..AFTER",
        help = "Pushed revision range, used to discover changed paths from git"
    )]
    pub range: Option<String>,

    #[arg(long, help = "Read the event from GITHUB_EVENT_NAME / GITHUB_EVENT_PATH")]
    pub from_github: bool,
}

impl EventArgs {
    /// Paths given with `--changed` that apply on top of the event's own
    pub fn extra_paths(&self) -> ChangedPaths {
        if self.from_github {
            self.changed.iter().cloned().collect()
        } else {
            ChangedPaths::new()
        }
    }

    /// Build the incoming event described by these flags.
    ///
    /// Dispatch defaults the bump to `patch`; call requires one. Push and
    /// pull request default the branch to the configured main branch.
    pub fn ingest(&self, config: &Config) -> Result<Ingested> {
        if self.from_github {
            return GithubContext::from_env()?.ingest();
        }

        let kind = self
            .event
            .ok_or_else(|| ReleaseTriggerError::invalid_input("--event is required"))?;
        let branch = || {
            self.branch
                .clone()
                .unwrap_or_else(|| config.trigger.main_branch.clone())
        };

        let event = match kind {
            EventKind::Release => Event::ReleaseCreated,
            EventKind::Dispatch => Event::ManualDispatch {
                bump: self
                    .bump
                    .clone()
                    .unwrap_or_else(|| VersionPart::Patch.to_string()),
            },
            EventKind::Call => Event::ReusableCall {
                bump: self.bump.clone().ok_or_else(|| {
                    ReleaseTriggerError::invalid_input("call events require --bump")
                })?,
            },
            EventKind::Push => Event::push(branch(), self.changed.iter().cloned()),
            EventKind::PullRequest => Event::PullRequest { branch: branch() },
        };

        let revision_range = self.range.as_deref().map(parse_range).transpose()?;

        Ok(Ingested::Event(IncomingEvent {
            event,
            revision_range,
        }))
    }
}

/// Parse `BEFORE..AFTER`
pub fn parse_range(raw: &str) -> Result<RevisionRange> {
    match raw.split_once("..") {
        Some((before, after)) if !before.is_empty() && !after.is_empty() => {
            Ok(RevisionRange::new(before, after))
        }
        _ => Err(ReleaseTriggerError::invalid_input(format!(
            "invalid revision range '{}': expected BEFORE..AFTER",
            raw
        ))),
    }
}
