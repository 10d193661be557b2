use std::time::Duration;

use serde::Deserialize;
use uam_core::{Actor, UserId};

use crate::error::ConfigError;

/// Prefix shared by every configuration variable
pub const ENV_PREFIX: &str = "UAM_";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the user-management service, e.g. `https://admin.example.com/api`
    pub api_base_url: String,
    /// Bearer token attached to every request
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub env: Environment,
    /// Id of the operator using the console
    #[serde(default)]
    pub actor_id: Option<String>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base_url", &self.api_base_url)
            .field("has_token", &self.api_token.is_some())
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("env", &self.env)
            .field("actor_id", &self.actor_id)
            .finish()
    }
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl ClientConfig {
    /// Read the configuration from `UAM_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(envy::prefixed(ENV_PREFIX).from_env()?)
    }

    /// Read the configuration from explicit `(name, value)` pairs
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::prefixed(ENV_PREFIX).from_iter(vars)?)
    }

    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The signed-in operator, when one is configured
    pub fn actor(&self) -> Option<Actor> {
        self.actor_id.as_ref().map(|id| Actor {
            id: UserId::new(id.clone()),
            username: id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config =
            ClientConfig::from_vars(vars(&[("UAM_API_BASE_URL", "http://localhost:3000")]))
                .unwrap();

        assert_eq!(config.api_base_url, "http://localhost:3000");
        assert_eq!(config.api_token, None);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.env, Environment::Development);
        assert!(config.actor().is_none());
    }

    #[test]
    fn test_all_variables() {
        let config = ClientConfig::from_vars(vars(&[
            ("UAM_API_BASE_URL", "https://admin.example.com/api"),
            ("UAM_API_TOKEN", "secret"),
            ("UAM_REQUEST_TIMEOUT_SECS", "3"),
            ("UAM_ENV", "production"),
            ("UAM_ACTOR_ID", "42"),
            ("UNRELATED", "ignored"),
        ]))
        .unwrap();

        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert!(!config.env.is_development());
        assert_eq!(config.actor().unwrap().id, UserId::from("42"));
    }

    #[test]
    fn test_debug_hides_token() {
        let config = ClientConfig::from_vars(vars(&[
            ("UAM_API_BASE_URL", "http://localhost:3000"),
            ("UAM_API_TOKEN", "very-secret-token"),
        ]))
        .unwrap();

        let debug = format!("{config:?}");
        assert!(!debug.contains("very-secret-token"));
        assert!(debug.contains("has_token: true"));
    }

    #[test]
    fn test_missing_base_url() {
        assert!(ClientConfig::from_vars(vars(&[("UAM_ENV", "production")])).is_err());
    }
}
