// ABOUTME: Configuration file loading, validation, and hierarchical merging for linear-ops
// ABOUTME: Also reads the API key from the environment and checks its shape

use anyhow::{Context, Result, anyhow};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{self, env, timing};
use crate::error::CliError;

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Team key used for bare issue numbers and as the create-* default
    #[serde(default)]
    pub default_team: Option<String>,
    #[serde(default, deserialize_with = "validate_api_url")]
    pub api_url: Option<String>,
    #[serde(default)]
    pub sync_delay_ms: Option<u64>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub pretty_json: Option<bool>,
}

impl Config {
    /// Load configuration from the standard locations plus `LINEAR_OPS_CONFIG`
    pub fn load() -> Result<Self> {
        Self::load_from_paths(&Self::get_config_paths())
    }

    /// Load configuration from file paths ordered lowest precedence first.
    /// Missing files are skipped; unreadable or invalid ones are errors.
    pub fn load_from_paths(paths: &[PathBuf]) -> Result<Self> {
        let mut config = Config::default();

        for path in paths {
            if !path.is_file() {
                log::trace!("No config at {}", path.display());
                continue;
            }
            log::debug!("Loading config from {}", path.display());
            config = config.merge(Self::load_from_file(path)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a single file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse TOML config file: {}",
                path.as_ref().display()
            )
        })?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.as_ref().display()))?;
        Ok(config)
    }

    /// Standard config file paths, lowest precedence first
    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(
                home_dir
                    .join(".config")
                    .join(constants::config::APP_DIR)
                    .join(constants::config::FILE_NAME),
            );
        }

        if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
            let path = PathBuf::from(config_home)
                .join(constants::config::APP_DIR)
                .join(constants::config::FILE_NAME);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }

        if let Ok(current_dir) = std::env::current_dir() {
            paths.push(current_dir.join(constants::config::PROJECT_FILE));
        }

        if let Some(explicit) = std::env::var_os(env::CONFIG_PATH) {
            paths.push(PathBuf::from(explicit));
        }

        paths
    }

    /// Merge this config with another, giving precedence to the other config
    pub fn merge(self, other: Config) -> Config {
        Config {
            default_team: other.default_team.or(self.default_team),
            api_url: other.api_url.or(self.api_url),
            sync_delay_ms: other.sync_delay_ms.or(self.sync_delay_ms),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
            pretty_json: other.pretty_json.or(self.pretty_json),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == Some(0) {
            return Err(anyhow!("timeout_secs must be greater than zero"));
        }

        if let Some(team) = &self.default_team {
            if team.trim().is_empty() {
                return Err(anyhow!("default_team must not be empty"));
            }
        }

        Ok(())
    }

    pub fn sync_delay(&self) -> Duration {
        self.sync_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(timing::SYNC_DELAY)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::Config(format!("{err:#}"))
    }
}

// Reject URLs the client could never talk to before any command runs
fn validate_api_url<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value: Option<String> = Option::deserialize(deserializer)?;

    if let Some(ref url) = value {
        linear_sdk::builder::graphql_endpoint(Some(url.as_str()))
            .map_err(|e| D::Error::custom(format!("Invalid api_url '{url}': {e}")))?;
    }

    Ok(value)
}

/// Check the raw `LINEAR_API_KEY` value. Keys without the personal key
/// prefix are accepted with a warning so OAuth tokens keep working.
pub fn parse_api_key(raw: Option<String>) -> Result<SecretString, CliError> {
    let key = raw.ok_or(CliError::MissingApiKey)?;

    if key.trim().is_empty() {
        return Err(CliError::MalformedApiKey("value is empty".to_string()));
    }
    if key.chars().any(char::is_whitespace) {
        return Err(CliError::MalformedApiKey(
            "value contains whitespace".to_string(),
        ));
    }
    if !key.starts_with(env::API_KEY_PREFIX) {
        log::warn!(
            "{} does not start with '{}'; continuing anyway",
            env::API_KEY,
            env::API_KEY_PREFIX
        );
    }

    Ok(SecretString::new(key.into_boxed_str()))
}

pub fn api_key_from_env() -> Result<SecretString, CliError> {
    parse_api_key(std::env::var(env::API_KEY).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.default_team.is_none());
        assert_eq!(config.sync_delay(), Duration::from_millis(100));
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_merge_configs() {
        let base = Config {
            default_team: Some("BASE".to_string()),
            sync_delay_ms: Some(250),
            ..Default::default()
        };

        let override_config = Config {
            default_team: Some("OVERRIDE".to_string()),
            api_url: Some("https://custom.api.com".to_string()),
            ..Default::default()
        };

        let merged = base.merge(override_config);
        assert_eq!(merged.default_team, Some("OVERRIDE".to_string()));
        assert_eq!(merged.sync_delay_ms, Some(250));
        assert_eq!(merged.api_url, Some("https://custom.api.com".to_string()));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = Config {
            timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_api_key() {
        assert!(matches!(parse_api_key(None), Err(CliError::MissingApiKey)));
        assert!(matches!(
            parse_api_key(Some("   ".into())),
            Err(CliError::MalformedApiKey(_))
        ));
        assert!(matches!(
            parse_api_key(Some("lin_api_abc def".into())),
            Err(CliError::MalformedApiKey(_))
        ));

        let key = parse_api_key(Some("lin_api_abc".into())).unwrap();
        assert_eq!(key.expose_secret(), "lin_api_abc");

        // OAuth-style tokens only warn
        assert!(parse_api_key(Some("oauth_token_123".into())).is_ok());
    }

    #[test]
    fn test_config_error_converts_to_cli_error() {
        let err: CliError = anyhow!("bad file").into();
        assert!(matches!(err, CliError::Config(_)));
    }
}
