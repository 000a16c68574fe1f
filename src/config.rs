use crate::domain::{PathFilter, DEFAULT_PATHS_IGNORE};
use crate::error::{ReleaseTriggerError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the current directory
pub const CONFIG_FILE_NAME: &str = "release-trigger.toml";

/// Represents the complete configuration for release-trigger.
///
/// Contains trigger rules, package metadata, external step commands and credential wiring.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub trigger: TriggerConfig,

    #[serde(default)]
    pub package: PackageConfig,

    #[serde(default)]
    pub steps: StepsConfig,

    #[serde(default)]
    pub credentials: CredentialsConfig,
}

impl Config {
    /// Version file path, resolved against the step working directory when relative
    pub fn version_file_path(&self) -> Option<PathBuf> {
        let path = self.package.version_file.as_ref()?;
        match &self.steps.working_dir {
            Some(dir) if path.is_relative() => Some(dir.join(path)),
            _ => Some(path.clone()),
        }
    }
}

fn default_main_branch() -> String {
    "master".to_string()
}

fn default_paths_ignore() -> Vec<String> {
    DEFAULT_PATHS_IGNORE.iter().map(|p| p.to_string()).collect()
}

/// Which branch and which paths the trigger reacts to.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TriggerConfig {
    #[serde(default = "default_main_branch")]
    pub main_branch: String,

    #[serde(default = "default_paths_ignore")]
    pub paths_ignore: Vec<String>,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        TriggerConfig {
            main_branch: default_main_branch(),
            paths_ignore: default_paths_ignore(),
        }
    }
}

impl TriggerConfig {
    /// Compile `paths_ignore` into a matcher
    pub fn path_filter(&self) -> Result<PathFilter> {
        PathFilter::new(&self.paths_ignore)
    }
}

/// Where the package declares its version.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct PackageConfig {
    /// Python module holding `__version__`; version bumps are not written when unset
    #[serde(default)]
    pub version_file: Option<PathBuf>,
}

fn default_build_command() -> String {
    "python setup.py sdist bdist_wheel".to_string()
}

fn default_upload_command() -> String {
    "twine upload dist/*".to_string()
}

/// Shell commands the pipeline delegates to.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StepsConfig {
    #[serde(default = "default_build_command")]
    pub build: String,

    #[serde(default = "default_upload_command")]
    pub upload: String,

    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

impl Default for StepsConfig {
    fn default() -> Self {
        StepsConfig {
            build: default_build_command(),
            upload: default_upload_command(),
            working_dir: None,
        }
    }
}

fn default_username_env() -> String {
    "PYPIUID".to_string()
}

fn default_password_env() -> String {
    "PYPIPWD".to_string()
}

fn default_forward_username() -> String {
    "TWINE_USERNAME".to_string()
}

fn default_forward_password() -> String {
    "TWINE_PASSWORD".to_string()
}

/// Names of the secret variables read at startup and the names they are
/// forwarded under to the upload step.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CredentialsConfig {
    #[serde(default = "default_username_env")]
    pub username_env: String,

    #[serde(default = "default_password_env")]
    pub password_env: String,

    #[serde(default = "default_forward_username")]
    pub forward_username_as: String,

    #[serde(default = "default_forward_password")]
    pub forward_password_as: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        CredentialsConfig {
            username_env: default_username_env(),
            password_env: default_password_env(),
            forward_username_as: default_forward_username(),
            forward_password_as: default_forward_password(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release-trigger.toml` in current directory
/// 3. `.release-trigger.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        PathBuf::from(path)
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        PathBuf::from(CONFIG_FILE_NAME)
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if user_path.exists() {
            user_path
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config_str = fs::read_to_string(&path).map_err(|e| {
        ReleaseTriggerError::config(format!("cannot read {}: {}", path.display(), e))
    })?;
    parse_config(&config_str).map_err(|e| match e {
        ReleaseTriggerError::Config(msg) => {
            ReleaseTriggerError::config(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

/// Parse and validate configuration text.
pub fn parse_config(text: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(text).map_err(|e| ReleaseTriggerError::config(e.to_string()))?;

    if config.trigger.main_branch.trim().is_empty() {
        return Err(ReleaseTriggerError::config("trigger.main_branch is empty"));
    }
    config.trigger.path_filter()?;

    Ok(config)
}
