use anyhow::Result;
use clap::Parser;

use release_trigger::cli::orchestration::{self, WorkflowArgs};
use release_trigger::cli::{Cli, Command, EventArgs, FormatArg};
use release_trigger::config::{self, Config};
use release_trigger::domain::{bump_version, Action, VersionPart};
use release_trigger::git::{Git2Repository, Repository};
use release_trigger::github::Ingested;
use release_trigger::package::VersionFile;
use release_trigger::publish::Credentials;
use release_trigger::resolver::{Decision, Resolver};
use release_trigger::ui::{self, OutputFormat};
use release_trigger::ReleaseTriggerError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        ui::display_error(&format!("{:#}", e));
        let code = e
            .downcast_ref::<ReleaseTriggerError>()
            .map(ReleaseTriggerError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Decide { event, format } => decide(&config, &event, format),
        Command::Run { event, dry_run } => run_steps(&config, &event, dry_run),
        Command::Version { bump, write } => version(&config, bump.as_deref(), write),
    }
}

fn open_repo() -> Option<Git2Repository> {
    Git2Repository::open(".").ok()
}

fn decide(config: &Config, args: &EventArgs, format: FormatArg) -> Result<()> {
    let resolver = Resolver::from_config(&config.trigger)?;

    let (event, decision) = match args.ingest(config)? {
        Ingested::Event(incoming) => {
            let repo = open_repo();
            let (event, decision) = orchestration::resolve_event(
                &resolver,
                &incoming,
                &args.extra_paths(),
                repo.as_ref().map(|r| r as &dyn Repository),
            )?;
            (Some(event), decision)
        }
        Ingested::Ignored(warning) => (
            None,
            Decision {
                action: Action::Skip,
                warnings: vec![warning],
                relevant_paths: Vec::new(),
            },
        ),
    };

    match OutputFormat::from(format) {
        OutputFormat::Text => match &event {
            Some(event) => ui::display_decision(event, &decision),
            None => {
                for warning in &decision.warnings {
                    ui::display_warning(warning);
                }
                ui::display_status(&format!("Action: {}", decision.action));
            }
        },
        OutputFormat::Json => println!("{}", ui::render_json(event.as_ref(), &decision)?),
        OutputFormat::Github => print!("{}", ui::render_github_outputs(&decision.action)),
    }

    Ok(())
}

fn run_steps(config: &Config, args: &EventArgs, dry_run: bool) -> Result<()> {
    let incoming = match args.ingest(config)? {
        Ingested::Event(incoming) => incoming,
        Ingested::Ignored(warning) => {
            ui::display_warning(&warning);
            ui::display_success("Nothing to do");
            return Ok(());
        }
    };

    // Secrets are read here and nowhere else.
    let credentials = Credentials::from_env(&config.credentials);
    let repo = open_repo();

    let result = orchestration::run_workflow(
        WorkflowArgs {
            incoming,
            changed_paths: args.extra_paths(),
            dry_run,
        },
        config,
        credentials,
        repo.as_ref().map(|r| r as &dyn Repository),
    )?;

    ui::display_decision(&result.event, &result.decision);
    ui::display_pipeline_report(&result.report);

    if dry_run {
        ui::display_status("Dry run: no steps were executed");
    } else if result.report.uploaded() {
        ui::display_success("Package published");
    }

    Ok(())
}

fn version(config: &Config, bump: Option<&str>, write: bool) -> Result<()> {
    let path = config
        .version_file_path()
        .ok_or_else(|| ReleaseTriggerError::config("package.version_file is not configured"))?;
    let file = VersionFile::new(path);
    let current = file.read_version()?;

    let next = bump
        .map(|raw| raw.parse::<VersionPart>())
        .transpose()?
        .map(|part| bump_version(&current, part));

    ui::display_version_preview(
        &file.path().display().to_string(),
        &current.to_string(),
        next.as_ref().map(|v| v.to_string()).as_deref(),
    );

    if let (true, Some(next)) = (write, &next) {
        file.write_version(next)?;
        ui::display_success(&format!("Wrote {} to {}", next, file.path().display()));
    }

    Ok(())
}
