use crate::error::{ReleaseTriggerError, Result};
use crate::publish::{StepContext, StepKind};
use std::collections::HashMap;
use std::path::Path;
use std::process::Command;

/// Runs pipeline step commands through the shell
pub struct StepExecutor;

impl StepExecutor {
    /// Execute a step command with the given context
    ///
    /// The command runs under `sh -c` with stdout/stderr inherited, so build
    /// and upload tool output lands in the job log. Context fields and any
    /// `extra_env` entries are added to the environment. Exit code 0 is
    /// success; anything else maps to a `Build` or `Upload` error depending
    /// on the step.
    ///
    /// # Arguments
    /// * `command` - Shell command line
    /// * `working_dir` - Directory to run in (current directory when `None`)
    /// * `context` - Step context exported as RELEASE_TRIGGER_* variables
    /// * `extra_env` - Additional variables (credentials for the upload step)
    pub fn execute(
        command: &str,
        working_dir: Option<&Path>,
        context: &StepContext,
        extra_env: &HashMap<String, String>,
    ) -> Result<()> {
        let fail = |msg: String| match context.kind {
            StepKind::Build => ReleaseTriggerError::build(msg),
            StepKind::Upload => ReleaseTriggerError::upload(msg),
        };

        if command.trim().is_empty() {
            return Err(ReleaseTriggerError::config(format!(
                "no command configured for the {} step",
                context.kind.name()
            )));
        }

        if let Some(dir) = working_dir {
            if !dir.is_dir() {
                return Err(fail(format!(
                    "working directory {} does not exist",
                    dir.display()
                )));
            }
        }

        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);

        if let Some(dir) = working_dir {
            cmd.current_dir(dir);
        }

        for (key, value) in context.to_env_vars().into_iter().chain(extra_env.clone()) {
            cmd.env(key, value);
        }

        let status = cmd
            .status()
            .map_err(|e| fail(format!("cannot start '{}': {}", command, e)))?;

        if !status.success() {
            return Err(fail(format!(
                "'{}' exited with code {}",
                command,
                status.code().unwrap_or(-1)
            )));
        }

        Ok(())
    }
}
