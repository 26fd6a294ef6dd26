use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

use crate::errors::ConfigError;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and merging command-line overrides.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Minimum caption coverage of the window, in percent
    #[serde(default = "default_required_coverage")]
    pub required_coverage: f64,

    /// Language detection service settings
    #[serde(default)]
    pub language: LanguageConfig,

    /// Number of leading bytes used to sniff the caption format
    #[serde(default = "default_sniff_prefix_bytes")]
    pub sniff_prefix_bytes: usize,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Language detection service configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LanguageConfig {
    // @field: Detection endpoint URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_required_coverage() -> f64 {
    80.0
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_sniff_prefix_bytes() -> usize {
    crate::caption_processor::SNIFF_PREFIX_LEN
}

impl Config {
    /// Load a configuration file; missing fields take their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.language.endpoint.trim();
        if endpoint.is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }

        let invalid = |reason: String| ConfigError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason,
        };
        let url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }

        if !self.required_coverage.is_finite() || self.required_coverage < 0.0 {
            return Err(ConfigError::InvalidCoverage(self.required_coverage));
        }

        if self.language.timeout_secs == 0 {
            return Err(ConfigError::ZeroValue("timeout_secs"));
        }

        if self.sniff_prefix_bytes == 0 {
            return Err(ConfigError::ZeroValue("sniff_prefix_bytes"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            required_coverage: default_required_coverage(),
            language: LanguageConfig::default(),
            sniff_prefix_bytes: default_sniff_prefix_bytes(),
            log_level: LogLevel::default(),
        }
    }
}
