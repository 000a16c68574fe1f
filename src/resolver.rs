//! Release trigger resolution
//!
//! Maps an activation [`Event`] to the [`Action`] the pipeline may take.
//! Resolution is a pure function of the event, the changed paths and the
//! resolver's immutable configuration: no I/O, no hidden state.

use crate::boundary::TriggerWarning;
use crate::config::TriggerConfig;
use crate::domain::{Action, BranchContext, ChangedPaths, Event, PathFilter, VersionPart};
use crate::error::Result;
use serde::Serialize;

/// Outcome of resolving an event, with the reasoning attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub action: Action,
    pub warnings: Vec<TriggerWarning>,
    /// Changed paths not covered by the ignore list (push events only)
    pub relevant_paths: Vec<String>,
}

impl Decision {
    fn new(action: Action) -> Self {
        Decision {
            action,
            warnings: Vec::new(),
            relevant_paths: Vec::new(),
        }
    }
}

/// Decides which action an event authorizes
#[derive(Debug, Clone)]
pub struct Resolver {
    main_branch: String,
    filter: PathFilter,
}

impl Resolver {
    pub fn new(main_branch: impl Into<String>, filter: PathFilter) -> Self {
        Resolver {
            main_branch: main_branch.into(),
            filter,
        }
    }

    /// Build a resolver from the `[trigger]` config section
    pub fn from_config(config: &TriggerConfig) -> Result<Self> {
        Ok(Resolver::new(
            config.main_branch.clone(),
            config.path_filter()?,
        ))
    }

    pub fn main_branch(&self) -> &str {
        &self.main_branch
    }

    /// Resolve an event to an action.
    ///
    /// # Returns
    /// * `Ok(Action)` - The authorized action
    /// * `Err(InvalidInput)` - A dispatch event carried an unrecognized version bump
    pub fn decide(&self, event: &Event, changed_paths: &ChangedPaths) -> Result<Action> {
        self.explain(event, changed_paths).map(|d| d.action)
    }

    /// Resolve an event and report why.
    pub fn explain(&self, event: &Event, changed_paths: &ChangedPaths) -> Result<Decision> {
        match event {
            Event::ReleaseCreated => Ok(Decision::new(Action::Publish { bump: None })),
            Event::ManualDispatch { bump } | Event::ReusableCall { bump } => {
                let part: VersionPart = bump.parse()?;
                Ok(Decision::new(Action::Publish { bump: Some(part) }))
            }
            Event::Push {
                branch,
                changed_paths: pushed,
            } => Ok(self.explain_push(branch, pushed, changed_paths)),
            // Pull requests may come from forks: never expose upload credentials.
            Event::PullRequest { .. } => Ok(Decision::new(Action::BuildOnly)),
        }
    }

    fn explain_push(&self, branch: &str, pushed: &ChangedPaths, extra: &ChangedPaths) -> Decision {
        let branch = BranchContext::new(branch, &self.main_branch);
        if !branch.is_release_branch() {
            let mut decision = Decision::new(Action::Skip);
            decision.warnings.push(TriggerWarning::UntrackedBranch {
                branch: branch.name,
                main_branch: self.main_branch.clone(),
            });
            return decision;
        }

        let considered: ChangedPaths = pushed.union(extra).cloned().collect();
        if considered.is_empty() {
            let mut decision = Decision::new(Action::BuildOnly);
            decision
                .warnings
                .push(TriggerWarning::UnknownChangedPaths { branch: branch.name });
            return decision;
        }

        let relevant: Vec<String> = self
            .filter
            .relevant(&considered)
            .into_iter()
            .map(str::to_string)
            .collect();

        if relevant.is_empty() {
            Decision::new(Action::Skip)
        } else {
            let mut decision = Decision::new(Action::BuildOnly);
            decision.relevant_paths = relevant;
            decision
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Resolver::new("master", PathFilter::default())
    }
}

/// Resolve an event with the default trigger wiring (`master`, default ignore list)
pub fn decide(event: &Event, changed_paths: &ChangedPaths) -> Result<Action> {
    Resolver::default().decide(event, changed_paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReleaseTriggerError;

    fn paths(items: &[&str]) -> ChangedPaths {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_release_publishes_without_bump() {
        let action = decide(&Event::ReleaseCreated, &paths(&["src/app.py"])).unwrap();
        assert_eq!(action, Action::Publish { bump: None });
    }

    #[test]
    fn test_dispatch_valid_bump() {
        let event = Event::ManualDispatch {
            bump: "major".into(),
        };
        assert_eq!(
            decide(&event, &ChangedPaths::new()).unwrap(),
            Action::Publish {
                bump: Some(VersionPart::Major)
            }
        );
    }

    #[test]
    fn test_reusable_call_invalid_bump() {
        let event = Event::ReusableCall {
            bump: "huge".into(),
        };
        let err = decide(&event, &ChangedPaths::new()).unwrap_err();
        assert!(matches!(err, ReleaseTriggerError::InvalidInput(_)));
    }

    #[test]
    fn test_push_only_ignored_paths_skips() {
        let event = Event::push("master", [".github/workflows/ci.yml", "CHANGELOG.md"]);
        let decision = Resolver::default()
            .explain(&event, &ChangedPaths::new())
            .unwrap();
        assert_eq!(decision.action, Action::Skip);
        assert!(decision.warnings.is_empty());
    }

    #[test]
    fn test_push_paths_from_both_sources_are_merged() {
        let event = Event::push("master", ["README.md"]);
        let decision = Resolver::default()
            .explain(&event, &paths(&["src/lib.py"]))
            .unwrap();
        assert_eq!(decision.action, Action::BuildOnly);
        assert_eq!(decision.relevant_paths, vec!["src/lib.py"]);
    }

    #[test]
    fn test_push_unknown_paths_builds_with_warning() {
        let event = Event::push("master", Vec::<String>::new());
        let decision = Resolver::default()
            .explain(&event, &ChangedPaths::new())
            .unwrap();
        assert_eq!(decision.action, Action::BuildOnly);
        assert_eq!(
            decision.warnings,
            vec![TriggerWarning::UnknownChangedPaths {
                branch: "master".into()
            }]
        );
    }

    #[test]
    fn test_push_other_branch_skips() {
        let event = Event::push("feature/x", ["src/app.py"]);
        let decision = Resolver::default()
            .explain(&event, &ChangedPaths::new())
            .unwrap();
        assert_eq!(decision.action, Action::Skip);
        assert!(matches!(
            decision.warnings[0],
            TriggerWarning::UntrackedBranch { .. }
        ));
    }

    #[test]
    fn test_configured_main_branch() {
        let config = TriggerConfig {
            main_branch: "main".into(),
            paths_ignore: vec!["docs/**".into()],
        };
        let resolver = Resolver::from_config(&config).unwrap();

        let docs = Event::push("refs/heads/main", ["docs/index.md"]);
        assert_eq!(
            resolver.decide(&docs, &ChangedPaths::new()).unwrap(),
            Action::Skip
        );

        // README.md is no longer ignored under this config
        let readme = Event::push("main", ["README.md"]);
        assert_eq!(
            resolver.decide(&readme, &ChangedPaths::new()).unwrap(),
            Action::BuildOnly
        );

        let master = Event::push("master", ["src/app.py"]);
        assert_eq!(
            resolver.decide(&master, &ChangedPaths::new()).unwrap(),
            Action::Skip
        );
    }
}
