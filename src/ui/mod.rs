//! User interface module - output formats and formatting.
//!
//! Separates concerns:
//! - `formatter` - Human-readable, styled output
//! - This module - Machine-readable renderings of a decision

use serde::Serialize;

use crate::domain::{Action, Event};
use crate::error::Result;
use crate::resolver::Decision;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_decision, display_error, display_pipeline_report, display_status, display_success,
    display_version_preview, display_warning,
};

/// How `decide` prints its result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Github,
}

/// Serializable view of a resolved event
#[derive(Debug, Clone, Serialize)]
pub struct DecisionReport<'a> {
    #[serde(flatten)]
    pub event: Option<&'a Event>,
    pub decision: &'a Decision,
    pub publish: bool,
    pub build: bool,
}

impl<'a> DecisionReport<'a> {
    pub fn new(event: Option<&'a Event>, decision: &'a Decision) -> Self {
        DecisionReport {
            event,
            decision,
            publish: decision.action.uploads(),
            build: decision.action.builds(),
        }
    }
}

/// Pretty JSON rendering of a decision; `event` is `None` for ignored events
pub fn render_json(event: Option<&Event>, decision: &Decision) -> Result<String> {
    Ok(serde_json::to_string_pretty(&DecisionReport::new(
        event, decision,
    ))?)
}

/// `key=value` lines for appending to `$GITHUB_OUTPUT`
pub fn render_github_outputs(action: &Action) -> String {
    let bump = action.bump().map(|b| b.to_string()).unwrap_or_default();
    format!(
        "action={}\nbump={}\npublish={}\nbuild={}\n",
        action.name(),
        bump,
        action.uploads(),
        action.builds()
    )
}
