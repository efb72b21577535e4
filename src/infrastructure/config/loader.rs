//! Run configuration loading.
//!
//! A run file describes one node execution: which node, the flat
//! parameter map (plus optional per-item overrides), the input items,
//! and where the credential comes from. Loading merges hierarchically:
//! programmatic defaults, then the YAML file, then `NODUS_`-prefixed
//! environment variables.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::models::Credential;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Run config must name a node")]
    EmptyNodeName,

    #[error("Invalid limit: {0}. Must be at least 1 when return_all is disabled")]
    InvalidLimit(u64),

    #[error("No credential configured: set credentials.token or credentials.token_env")]
    MissingCredential,

    #[error("Credential environment variable '{0}' is not set or empty")]
    EmptyCredentialEnv(String),

    #[error("Invalid credential kind: {0}. Must be one of: access_token, oauth2")]
    InvalidCredentialKind(String),
}

/// Where the bearer token comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Credential kind: "access_token" (default) or "oauth2".
    #[serde(default)]
    pub kind: Option<String>,
    /// Inline token. Takes precedence over `token_env`.
    #[serde(default)]
    pub token: Option<String>,
    /// Name of an environment variable holding the token.
    #[serde(default)]
    pub token_env: Option<String>,
}

/// One node execution, fully described.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    /// Node to execute ("sentry" or "google_contacts").
    #[serde(default)]
    pub node: String,
    /// Parameters applied to every input item index.
    #[serde(default)]
    pub parameters: Map<String, Value>,
    /// Per-index parameter overrides; entry `i` overrides item `i`.
    #[serde(default)]
    pub item_parameters: Vec<Map<String, Value>>,
    /// Input items; defaults to a single empty item.
    #[serde(default)]
    pub items: Vec<Value>,
    /// Credential source.
    #[serde(default)]
    pub credentials: CredentialsConfig,
    /// Base URL override for self-hosted deployments and tests.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl RunConfig {
    /// Resolve the configured credential to a concrete token.
    pub fn resolve_credential(&self) -> Result<Credential, ConfigError> {
        let token = if let Some(token) = self.credentials.token.clone() {
            token
        } else if let Some(var) = &self.credentials.token_env {
            match std::env::var(var) {
                Ok(value) if !value.is_empty() => value,
                _ => return Err(ConfigError::EmptyCredentialEnv(var.clone())),
            }
        } else {
            return Err(ConfigError::MissingCredential);
        };

        match self.credentials.kind.as_deref() {
            None | Some("access_token") => Ok(Credential::AccessToken(token)),
            Some("oauth2") => Ok(Credential::OAuth2(token)),
            Some(other) => Err(ConfigError::InvalidCredentialKind(other.to_string())),
        }
    }
}

/// Configuration loader with hierarchical merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a run configuration from a YAML file, with `NODUS_`
    /// environment variables taking highest priority.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<RunConfig> {
        let config: RunConfig = Figment::new()
            .merge(Serialized::defaults(RunConfig::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("NODUS_").split("__"))
            .extract()
            .context(format!(
                "Failed to load run config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate a loaded configuration.
    pub fn validate(config: &RunConfig) -> Result<(), ConfigError> {
        if config.node.is_empty() {
            return Err(ConfigError::EmptyNodeName);
        }

        // A bounded listing needs a usable limit.
        if config.parameters.get("return_all") == Some(&Value::Bool(false)) {
            if let Some(limit) = config.parameters.get("limit").and_then(Value::as_u64) {
                if limit == 0 {
                    return Err(ConfigError::InvalidLimit(limit));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use serde_json::json;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_minimal_run_config() {
        let file = write_config(
            r"
node: sentry
parameters:
  resource: issue
  operation: get
  issue_id: '1234'
credentials:
  token: tok-123
",
        );
        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert_eq!(config.node, "sentry");
        assert_eq!(config.parameters["resource"], json!("issue"));
        assert_eq!(config.parameters["issue_id"], json!("1234"));
        assert!(config.items.is_empty());
    }

    #[test]
    fn test_missing_node_name_fails_validation() {
        let file = write_config("parameters: {}\n");
        assert!(ConfigLoader::load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_zero_limit_rejected_when_bounded() {
        let config = RunConfig {
            node: "sentry".into(),
            parameters: serde_json::from_value(json!({
                "return_all": false,
                "limit": 0,
            }))
            .unwrap(),
            ..Default::default()
        };
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidLimit(0)
        ));
    }

    #[test]
    fn test_resolve_inline_token() {
        let config = RunConfig {
            credentials: CredentialsConfig {
                kind: Some("oauth2".into()),
                token: Some("ya29.abc".into()),
                token_env: None,
            },
            ..Default::default()
        };
        let credential = config.resolve_credential().unwrap();
        assert_eq!(credential.token(), "ya29.abc");
    }

    #[test]
    fn test_resolve_missing_credential() {
        let config = RunConfig::default();
        assert!(matches!(
            config.resolve_credential().unwrap_err(),
            ConfigError::MissingCredential
        ));
    }

    #[test]
    fn test_resolve_unknown_kind() {
        let config = RunConfig {
            credentials: CredentialsConfig {
                kind: Some("basic".into()),
                token: Some("x".into()),
                token_env: None,
            },
            ..Default::default()
        };
        assert!(matches!(
            config.resolve_credential().unwrap_err(),
            ConfigError::InvalidCredentialKind(_)
        ));
    }
}
