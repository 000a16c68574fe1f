//! Main workflow orchestration logic
//!
//! Connects the pieces between CLI argument parsing and the external steps:
//! changed-path discovery, resolution, then the delegated pipeline. Kept
//! free of clap so the workflow can be driven programmatically.

use crate::config::Config;
use crate::domain::{ChangedPaths, Event, IncomingEvent};
use crate::error::Result;
use crate::git::{self, Repository};
use crate::publish::{Credentials, Pipeline, PipelineReport};
use crate::resolver::{Decision, Resolver};

/// Arguments for the release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowArgs {
    /// The event being handled
    pub incoming: IncomingEvent,

    /// Changed paths supplied by the caller, merged with the event's own
    pub changed_paths: ChangedPaths,

    /// Preview mode - resolve and report without running steps
    pub dry_run: bool,
}

/// Result of a successful workflow run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The event after changed-path discovery
    pub event: Event,

    /// The resolver's decision
    pub decision: Decision,

    /// What the pipeline did
    pub report: PipelineReport,
}

/// Resolve an event, filling in changed paths from git where possible.
///
/// Discovery only happens for pushes that carry no paths of their own, no
/// caller-supplied paths, and a diffable revision range. A failure to
/// discover leaves the set empty, which never causes a skip.
pub fn resolve_event(
    resolver: &Resolver,
    incoming: &IncomingEvent,
    changed_paths: &ChangedPaths,
    repo: Option<&dyn Repository>,
) -> Result<(Event, Decision)> {
    let event = match (&incoming.event, &incoming.revision_range, repo) {
        (
            Event::Push {
                branch,
                changed_paths: pushed,
            },
            Some(range),
            Some(repo),
        ) if pushed.is_empty() && changed_paths.is_empty() => {
            let discovered = git::discover_changed_paths(repo, range).unwrap_or_default();
            Event::Push {
                branch: branch.clone(),
                changed_paths: discovered,
            }
        }
        (event, _, _) => event.clone(),
    };

    let decision = resolver.explain(&event, changed_paths)?;
    Ok((event, decision))
}

/// Main release workflow
///
/// Orchestrates the whole run:
/// 1. Build the resolver from `[trigger]` config
/// 2. Discover changed paths for bare pushes
/// 3. Resolve the event (invalid input aborts here, before any step)
/// 4. Hand the action to the pipeline
///
/// # Arguments
///
/// * `args` - Workflow arguments (event, changed paths, dry_run)
/// * `config` - Loaded configuration
/// * `credentials` - Upload capability, or the reason it is unavailable
/// * `repo` - Repository used for changed-path discovery, if any
pub fn run_workflow(
    args: WorkflowArgs,
    config: &Config,
    credentials: Result<Credentials>,
    repo: Option<&dyn Repository>,
) -> Result<WorkflowResult> {
    let resolver = Resolver::from_config(&config.trigger)?;
    let (event, decision) = resolve_event(&resolver, &args.incoming, &args.changed_paths, repo)?;

    let report = Pipeline::new(config, args.dry_run).run(decision.action, credentials)?;

    Ok(WorkflowResult {
        event,
        decision,
        report,
    })
}
