//! Credentials resolved from the environment once, at startup

use hirecast_domain::PublishError;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// A setting sourced from a named environment variable
///
/// The variable name is kept so a missing value can be reported as
/// `"<NAME> not set"` without ever printing the value itself.
#[derive(Clone)]
pub struct Credential {
    env: String,
    value: Option<SecretString>,
}

impl Credential {
    /// Read `env` from the process environment; blank values count as unset
    pub fn from_env(env: &str) -> Self {
        Self::from_lookup(env, std::env::var(env).ok())
    }

    fn from_lookup(env: &str, raw: Option<String>) -> Self {
        let value = raw
            .filter(|v| !v.trim().is_empty())
            .map(|v| SecretString::new(v.into()));
        Self {
            env: env.to_string(),
            value,
        }
    }

    pub fn new(env: impl Into<String>, value: impl Into<String>) -> Self {
        let value: String = value.into();
        Self {
            env: env.into(),
            value: Some(SecretString::new(value.into())),
        }
    }

    pub fn missing(env: impl Into<String>) -> Self {
        Self {
            env: env.into(),
            value: None,
        }
    }

    pub fn env(&self) -> &str {
        &self.env
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// The value, or `MissingConfig` naming the variable
    pub fn require(&self) -> Result<&str, PublishError> {
        self.value
            .as_ref()
            .map(|v| v.expose_secret())
            .ok_or_else(|| PublishError::MissingConfig(self.env.clone()))
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("env", &self.env)
            .field("set", &self.is_set())
            .finish()
    }
}
