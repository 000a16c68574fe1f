use crate::domain::{Action, VersionPart};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Steps the pipeline delegates to external tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    Build,
    Upload,
}

impl StepKind {
    /// Get the step name as a string
    pub fn name(&self) -> &'static str {
        match self {
            StepKind::Build => "build",
            StepKind::Upload => "upload",
        }
    }
}

/// Context information passed to a step
#[derive(Debug, Clone)]
pub struct StepContext {
    /// Step being executed
    pub kind: StepKind,
    /// Resolved action for this run
    pub action: Action,
    /// Version bump, if the run publishes with one
    pub bump: Option<VersionPart>,
    /// Package version after any bump, if known
    pub version: Option<String>,
}

impl StepContext {
    /// Convert context to environment variables for the step command
    ///
    /// Maps context fields to RELEASE_TRIGGER_* environment variables
    pub fn to_env_vars(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();

        env.insert(
            "RELEASE_TRIGGER_STEP".to_string(),
            self.kind.name().to_string(),
        );
        env.insert(
            "RELEASE_TRIGGER_ACTION".to_string(),
            self.action.name().to_string(),
        );

        if let Some(bump) = self.bump {
            env.insert("RELEASE_TRIGGER_BUMP".to_string(), bump.to_string());
        }

        if let Some(ref version) = self.version {
            env.insert("RELEASE_TRIGGER_VERSION".to_string(), version.clone());
        }

        env
    }
}
