use std::collections::BTreeMap;

use secrecy::{ExposeSecret, SecretString};

/// Execution context handed to an action: plain environment configuration
/// plus secret material. Missing maps behave as empty.
#[derive(Debug, Default)]
pub struct ActionContext {
    pub environment: BTreeMap<String, String>,
    pub secrets: BTreeMap<String, SecretString>,
}

impl ActionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }

    pub fn with_secret(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.secrets
            .insert(key.into(), SecretString::from(value.into()));
        self
    }

    pub fn env(&self, key: &str) -> Option<&str> {
        self.environment.get(key).map(String::as_str)
    }

    pub fn secret(&self, key: &str) -> Option<&str> {
        self.secrets.get(key).map(ExposeSecret::expose_secret)
    }
}
