use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

// Default constants
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 4000;
pub const DEFAULT_CHART_OUTPUT_DIR: &str = "charts";

// Custom Serde logic for SecretString
fn serialize_secret<S>(secret: &Option<SecretString>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match secret {
        Some(_) => serializer.serialize_str("[REDACTED]"),
        None => serializer.serialize_none(),
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.map(SecretString::from))
}

#[derive(Debug, Serialize, Deserialize, Default, Clone, Validate)]
pub struct AppConfig {
    #[serde(default)]
    #[validate(nested)]
    pub service: ServiceSettings,
    #[serde(default)]
    pub poll: PollSettings,
    #[serde(default)]
    pub charts: ChartSettings,
}

/// Connection settings for the exploration service.
#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct ServiceSettings {
    #[serde(default = "default_base_url")]
    #[validate(custom(function = "validate_base_url"))]
    pub base_url: String,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_secret",
        deserialize_with = "deserialize_secret"
    )]
    pub api_key: Option<SecretString>,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Settings for the result poll loop.
///
/// Defaults reproduce the protocol's fixed 4-second cadence with no upper
/// bound; `max_polls` and `deadline_secs` opt into bounded polling.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct PollSettings {
    #[serde(default = "default_poll_interval_ms")]
    pub interval_ms: u64,
    #[serde(default)]
    pub max_polls: Option<u32>,
    #[serde(default)]
    pub deadline_secs: Option<u64>,
}

impl PollSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_ms: default_poll_interval_ms(),
            max_polls: None,
            deadline_secs: None,
        }
    }
}

/// Where chart commands write rendered SVG files.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChartSettings {
    #[serde(default = "default_chart_output_dir")]
    pub output_dir: String,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            output_dir: default_chart_output_dir(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_chart_output_dir() -> String {
    DEFAULT_CHART_OUTPUT_DIR.to_string()
}

fn validate_base_url(url: &str) -> Result<(), validator::ValidationError> {
    if url.is_empty() {
        return Ok(()); // Allow empty - will use default
    }

    // Use the url crate to parse and validate
    match url::Url::parse(url) {
        Ok(_) => Ok(()),
        Err(_) => Err(validator::ValidationError::new("invalid_url")),
    }
}

impl AppConfig {
    /// Load configuration from an optional file plus SCRY-prefixed
    /// environment variables (e.g. SCRY_SERVICE__BASE_URL maps to
    /// service.base_url).
    pub fn from_file(path: &str) -> Result<Self> {
        let builder = config::Config::builder();

        let builder = if std::path::Path::new(path).exists() {
            builder.add_source(config::File::with_name(path))
        } else {
            builder
        };

        let builder = builder.add_source(
            config::Environment::with_prefix("SCRY")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build().context("Failed to build configuration")?;

        let app_config: AppConfig = cfg
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        app_config
            .validate()
            .map_err(|e| anyhow::anyhow!("Configuration validation failed: {:?}", e))?;

        Ok(app_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_validation() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_base_url_fails_validation() {
        let config = AppConfig {
            service: ServiceSettings {
                base_url: "not_a_url".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_key_serializes_redacted() {
        let settings = ServiceSettings {
            api_key: Some(SecretString::from("super-secret".to_string())),
            ..Default::default()
        };

        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("[REDACTED]"));
        assert!(!json.contains("super-secret"));
    }

    #[test]
    fn test_poll_settings_defaults() {
        let poll = PollSettings::default();
        assert_eq!(poll.interval(), Duration::from_secs(4));
        assert!(poll.max_polls.is_none());
        assert!(poll.deadline().is_none());
    }

    #[test]
    fn test_env_overrides_apply_without_config_file() {
        std::env::set_var("SCRY_SERVICE__BASE_URL", "http://explorer:9000");
        std::env::set_var("SCRY_POLL__INTERVAL_MS", "250");

        let config = AppConfig::from_file("does-not-exist.yaml").unwrap();
        assert_eq!(config.service.base_url, "http://explorer:9000");
        assert_eq!(config.poll.interval_ms, 250);

        std::env::remove_var("SCRY_SERVICE__BASE_URL");
        std::env::remove_var("SCRY_POLL__INTERVAL_MS");
    }
}
