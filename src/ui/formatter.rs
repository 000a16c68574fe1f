//! Pure formatting functions for UI output.
//!
//! All display logic lives here, separated from output-format selection.
//! Styling goes through `console`, which drops colors when the stream is
//! not a terminal.

use console::style;

use crate::boundary::TriggerWarning;
use crate::domain::{Action, Event};
use crate::publish::PipelineReport;
use crate::resolver::Decision;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a trigger warning on stderr.
pub fn display_warning(warning: &TriggerWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display the event and the action it resolved to.
///
/// For pushes that will build, the paths that prevented a skip are listed
/// (up to 10).
pub fn display_decision(event: &Event, decision: &Decision) {
    println!("\n{}", style(format!("Event: {}", event)).bold());

    let action = match decision.action {
        Action::Publish { .. } => style(decision.action.to_string()).green(),
        Action::BuildOnly => style(decision.action.to_string()).cyan(),
        Action::Skip => style(decision.action.to_string()).dim(),
    };
    println!("  Action: {}", action);

    if !decision.relevant_paths.is_empty() {
        println!("  Changed paths not ignored:");
        for path in decision.relevant_paths.iter().take(10) {
            println!("    - {}", path);
        }
        if decision.relevant_paths.len() > 10 {
            println!("    ... and {} more", decision.relevant_paths.len() - 10);
        }
    }

    for warning in &decision.warnings {
        display_warning(warning);
    }
}

/// Summarize a pipeline run.
pub fn display_pipeline_report(report: &PipelineReport) {
    for warning in &report.warnings {
        display_warning(warning);
    }

    if let Some(change) = &report.version_change {
        let verb = if change.written { "Bumped" } else { "Would bump" };
        display_status(&format!(
            "{} {} from {} to {}",
            verb,
            change.file.display(),
            style(&change.from).red(),
            style(&change.to).green()
        ));
    }

    if report.steps.is_empty() {
        display_success("Nothing to do");
        return;
    }

    for step in &report.steps {
        if step.executed {
            display_success(&format!("{} step succeeded: {}", step.kind.name(), step.command));
        } else {
            display_status(&format!("{} step (dry run): {}", step.kind.name(), step.command));
        }
    }
}

/// Display the current package version and, if given, the bumped one.
pub fn display_version_preview(file: &str, current: &str, next: Option<&str>) {
    println!("{}", style(format!("Version file: {}", file)).bold());
    match next {
        Some(next) => {
            println!("  From: {}", style(current).red());
            println!("  To:   {}", style(next).green());
        }
        None => println!("  Current: {}", style(current).green()),
    }
}
