use thiserror::Error;

/// Unified error type for release-trigger operations
#[derive(Error, Debug)]
pub enum ReleaseTriggerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event error: {0}")]
    Event(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("Credentials error: {0}")]
    Credentials(String),

    #[error("Build failed: {0}")]
    Build(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results in release-trigger
pub type Result<T> = std::result::Result<T, ReleaseTriggerError>;

impl ReleaseTriggerError {
    /// Create an invalid input error with context
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        ReleaseTriggerError::InvalidInput(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseTriggerError::Config(msg.into())
    }

    /// Create an event error with context
    pub fn event(msg: impl Into<String>) -> Self {
        ReleaseTriggerError::Event(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseTriggerError::Version(msg.into())
    }

    /// Create a credentials error with context
    pub fn credentials(msg: impl Into<String>) -> Self {
        ReleaseTriggerError::Credentials(msg.into())
    }

    /// Create a build error with context
    pub fn build(msg: impl Into<String>) -> Self {
        ReleaseTriggerError::Build(msg.into())
    }

    /// Create an upload error with context
    pub fn upload(msg: impl Into<String>) -> Self {
        ReleaseTriggerError::Upload(msg.into())
    }

    /// Process exit code for this error.
    ///
    /// Invalid input is 2, build failures 3, upload and credential
    /// failures 4, everything else 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReleaseTriggerError::InvalidInput(_) => 2,
            ReleaseTriggerError::Build(_) => 3,
            ReleaseTriggerError::Upload(_) | ReleaseTriggerError::Credentials(_) => 4,
            _ => 1,
        }
    }
}
