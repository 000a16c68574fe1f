use crate::boundary::TriggerWarning;
use crate::config::Config;
use crate::domain::{bump_version, Action, VersionPart};
use crate::error::{ReleaseTriggerError, Result};
use crate::package::VersionFile;
use crate::publish::{Credentials, StepContext, StepExecutor, StepKind};
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// A step the pipeline ran, or would have run in dry-run mode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    pub kind: StepKind,
    pub command: String,
    pub executed: bool,
}

/// Version change applied (or planned) before building
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionChange {
    pub file: PathBuf,
    pub from: String,
    pub to: String,
    pub written: bool,
}

/// What a pipeline run did
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    pub action: Action,
    pub dry_run: bool,
    pub version: Option<String>,
    pub version_change: Option<VersionChange>,
    pub steps: Vec<StepRecord>,
    pub warnings: Vec<TriggerWarning>,
}

impl PipelineReport {
    pub fn built(&self) -> bool {
        self.executed(StepKind::Build)
    }

    pub fn uploaded(&self) -> bool {
        self.executed(StepKind::Upload)
    }

    fn executed(&self, kind: StepKind) -> bool {
        self.steps.iter().any(|s| s.kind == kind && s.executed)
    }
}

/// Carries out a resolved action by delegating to the configured commands.
///
/// Order for `Publish`: credentials check, version bump, build, upload.
/// Credentials are checked first so a run that cannot upload fails before
/// it touches anything.
pub struct Pipeline<'a> {
    config: &'a Config,
    dry_run: bool,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a Config, dry_run: bool) -> Self {
        Pipeline { config, dry_run }
    }

    /// Run the pipeline for an action.
    ///
    /// # Arguments
    /// * `action` - Resolved action
    /// * `credentials` - Upload capability; required for a real `Publish`
    ///
    /// # Returns
    /// * `Ok(PipelineReport)` - Every step succeeded (or nothing needed to run)
    /// * `Err` - Missing credentials, version file problems, or a failed step
    pub fn run(
        &self,
        action: Action,
        credentials: Result<Credentials>,
    ) -> Result<PipelineReport> {
        let mut report = PipelineReport {
            action,
            dry_run: self.dry_run,
            version: None,
            version_change: None,
            steps: Vec::new(),
            warnings: Vec::new(),
        };

        if !action.builds() {
            return Ok(report);
        }

        let credentials = if action.uploads() {
            match credentials {
                Ok(creds) => Some(creds),
                Err(ReleaseTriggerError::Credentials(detail)) if self.dry_run => {
                    report
                        .warnings
                        .push(TriggerWarning::MissingCredentials { detail });
                    None
                }
                Err(e) => return Err(e),
            }
        } else {
            None
        };

        if action.uploads() {
            self.prepare_version(action.bump(), &mut report)?;
        }

        let build = self.step(StepKind::Build, &self.config.steps.build, &report, &HashMap::new())?;
        report.steps.push(build);

        if action.uploads() {
            let env = credentials
                .as_ref()
                .map(|c| c.forwarded_env(&self.config.credentials))
                .unwrap_or_default();
            let upload = self.step(StepKind::Upload, &self.config.steps.upload, &report, &env)?;
            report.steps.push(upload);
        }

        Ok(report)
    }

    fn step(
        &self,
        kind: StepKind,
        command: &str,
        report: &PipelineReport,
        extra_env: &HashMap<String, String>,
    ) -> Result<StepRecord> {
        if !self.dry_run {
            let context = StepContext {
                kind,
                action: report.action,
                bump: report.action.bump(),
                version: report.version.clone(),
            };
            StepExecutor::execute(
                command,
                self.config.steps.working_dir.as_deref(),
                &context,
                extra_env,
            )?;
        }

        Ok(StepRecord {
            kind,
            command: command.to_string(),
            executed: !self.dry_run,
        })
    }

    fn prepare_version(&self, bump: Option<VersionPart>, report: &mut PipelineReport) -> Result<()> {
        let Some(path) = self.config.version_file_path() else {
            return Ok(());
        };

        let file = VersionFile::new(path);
        let current = file.read_version()?;

        let Some(part) = bump else {
            report.version = Some(current.to_string());
            return Ok(());
        };

        let next = bump_version(&current, part);
        if !self.dry_run {
            file.write_version(&next)?;
        }

        report.version = Some(next.to_string());
        report.version_change = Some(VersionChange {
            file: file.path().to_path_buf(),
            from: current.to_string(),
            to: next.to_string(),
            written: !self.dry_run,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StepsConfig;
    use std::fs;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir, build: &str, upload: &str) -> Config {
        let mut config = Config::default();
        config.steps = StepsConfig {
            build: build.to_string(),
            upload: upload.to_string(),
            working_dir: Some(dir.path().to_path_buf()),
        };
        config
    }

    fn with_version_file(config: &mut Config, dir: &TempDir, version: &str) {
        fs::write(
            dir.path().join("__init__.py"),
            format!("__version__ = \"{}\"\n", version),
        )
        .unwrap();
        config.package.version_file = Some(PathBuf::from("__init__.py"));
    }

    fn creds() -> Result<Credentials> {
        Ok(Credentials::new("__token__", "secret"))
    }

    #[test]
    fn test_skip_runs_nothing() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, "false", "false");
        let report = Pipeline::new(&config, false)
            .run(Action::Skip, creds())
            .unwrap();
        assert!(report.steps.is_empty());
    }

    #[test]
    fn test_build_only_never_uploads() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, "touch built", "touch uploaded");
        let report = Pipeline::new(&config, false)
            .run(Action::BuildOnly, creds())
            .unwrap();

        assert!(report.built());
        assert!(!report.uploaded());
        assert!(dir.path().join("built").exists());
        assert!(!dir.path().join("uploaded").exists());
    }

    #[test]
    fn test_publish_bumps_then_builds_then_uploads() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(
            &dir,
            "echo \"$RELEASE_TRIGGER_VERSION\" > built",
            "echo \"$TWINE_USERNAME\" > uploaded",
        );
        with_version_file(&mut config, &dir, "0.1.3");

        let report = Pipeline::new(&config, false)
            .run(
                Action::Publish {
                    bump: Some(VersionPart::Minor),
                },
                creds(),
            )
            .unwrap();

        assert_eq!(report.version.as_deref(), Some("0.2.0"));
        assert!(report.uploaded());
        let built = fs::read_to_string(dir.path().join("built")).unwrap();
        assert_eq!(built.trim(), "0.2.0");
        let uploaded = fs::read_to_string(dir.path().join("uploaded")).unwrap();
        assert_eq!(uploaded.trim(), "__token__");
        let module = fs::read_to_string(dir.path().join("__init__.py")).unwrap();
        assert!(module.contains("0.2.0"));
    }

    #[test]
    fn test_release_publish_keeps_version() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir, "true", "true");
        with_version_file(&mut config, &dir, "1.4.2");

        let report = Pipeline::new(&config, false)
            .run(Action::Publish { bump: None }, creds())
            .unwrap();

        assert_eq!(report.version.as_deref(), Some("1.4.2"));
        assert!(report.version_change.is_none());
    }

    #[test]
    fn test_missing_credentials_fail_before_build() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, "touch built", "true");
        let err = Pipeline::new(&config, false)
            .run(
                Action::Publish { bump: None },
                Err(ReleaseTriggerError::credentials("PYPIUID is not set")),
            )
            .unwrap_err();

        assert!(matches!(err, ReleaseTriggerError::Credentials(_)));
        assert!(!dir.path().join("built").exists());
    }

    #[test]
    fn test_build_failure_stops_upload() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, "exit 1", "touch uploaded");
        let err = Pipeline::new(&config, false)
            .run(Action::Publish { bump: None }, creds())
            .unwrap_err();

        assert!(matches!(err, ReleaseTriggerError::Build(_)));
        assert!(!dir.path().join("uploaded").exists());
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir, "touch built", "touch uploaded");
        with_version_file(&mut config, &dir, "2.0.0");

        let report = Pipeline::new(&config, true)
            .run(
                Action::Publish {
                    bump: Some(VersionPart::Major),
                },
                Err(ReleaseTriggerError::credentials("PYPIPWD is not set")),
            )
            .unwrap();

        assert_eq!(report.steps.len(), 2);
        assert!(report.steps.iter().all(|s| !s.executed));
        assert_eq!(report.version.as_deref(), Some("3.0.0"));
        assert_eq!(report.warnings.len(), 1);
        assert!(!dir.path().join("built").exists());
        let module = fs::read_to_string(dir.path().join("__init__.py")).unwrap();
        assert!(module.contains("2.0.0"));
    }
}
