//! Configuration management for ResearchHub
//!
//! Configuration is read from a YAML file, then overridden by `RESEARCHHUB_*`
//! environment variables, then by command-line flags.

use crate::error::{Result, ResearchHubError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Backend connection settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Session persistence settings
    #[serde(default)]
    pub session: SessionConfig,
    /// Terminal output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the ResearchHub backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds; `None` leaves the transport default
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
        }
    }
}

/// Session persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// Keyring slot the session is stored under
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Save the session to the keyring after login
    #[serde(default = "default_persist")]
    pub persist: bool,
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_persist() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            persist: default_persist(),
        }
    }
}

/// Terminal output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// How command results are printed
    #[serde(default)]
    pub format: OutputFormat,
}

/// Output rendering mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Tables and colored text
    #[default]
    Table,
    /// Pretty-printed JSON of the backend records
    Json,
}

impl OutputFormat {
    fn parse_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" => Some(Self::Table),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// A missing file is not an error: defaults are used and a warning is
    /// logged.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ResearchHubError::Yaml)?;
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("RESEARCHHUB_API_URL") {
            self.api.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("RESEARCHHUB_TIMEOUT_SECONDS") {
            match timeout.parse() {
                Ok(v) => self.api.timeout_seconds = Some(v),
                Err(_) => tracing::warn!("Invalid RESEARCHHUB_TIMEOUT_SECONDS: {}", timeout),
            }
        }

        if let Ok(profile) = std::env::var("RESEARCHHUB_PROFILE") {
            self.session.profile = profile;
        }

        if let Ok(format) = std::env::var("RESEARCHHUB_OUTPUT") {
            match OutputFormat::parse_str(&format) {
                Some(f) => self.output.format = f,
                None => tracing::warn!("Invalid RESEARCHHUB_OUTPUT: {}", format),
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(base_url) = &cli.api_url {
            self.api.base_url = base_url.clone();
        }
        if let Some(profile) = &cli.profile {
            self.session.profile = profile.clone();
        }
        if cli.json {
            self.output.format = OutputFormat::Json;
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`ResearchHubError::Config`] describing the first invalid value
    pub fn validate(&self) -> Result<()> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(ResearchHubError::Config("api.base_url cannot be empty".to_string()).into());
        }

        let parsed = url::Url::parse(base_url).map_err(|e| {
            ResearchHubError::Config(format!("api.base_url is not a valid URL: {}", e))
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ResearchHubError::Config(format!(
                "api.base_url must use http or https, got {}",
                parsed.scheme()
            ))
            .into());
        }

        if self.api.timeout_seconds == Some(0) {
            return Err(ResearchHubError::Config(
                "api.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.session.profile.trim().is_empty() {
            return Err(
                ResearchHubError::Config("session.profile cannot be empty".to_string()).into(),
            );
        }

        Ok(())
    }
}
