use crate::config::CredentialsConfig;
use crate::error::{ReleaseTriggerError, Result};
use std::collections::HashMap;
use std::fmt;

/// Registry upload credentials.
///
/// Acts as a capability: only code that is handed a `Credentials` value can
/// upload. It is read once at the CLI boundary and never stored globally.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read credentials through a lookup function (usually `std::env::var`).
    ///
    /// # Returns
    /// * `Err(Credentials)` - Naming the first variable that is unset or empty
    pub fn resolve<F>(config: &CredentialsConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fetch = |name: &str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ReleaseTriggerError::credentials(format!("{} is not set", name)))
        };

        Ok(Credentials {
            username: fetch(&config.username_env)?,
            password: fetch(&config.password_env)?,
        })
    }

    /// Read credentials from the process environment
    pub fn from_env(config: &CredentialsConfig) -> Result<Self> {
        Self::resolve(config, |name| std::env::var(name).ok())
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Environment variables handed to the upload tool
    pub fn forwarded_env(&self, config: &CredentialsConfig) -> HashMap<String, String> {
        let mut env = HashMap::new();
        env.insert(config.forward_username_as.clone(), self.username.clone());
        env.insert(config.forward_password_as.clone(), self.password.clone());
        env
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
