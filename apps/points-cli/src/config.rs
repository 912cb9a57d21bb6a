//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. Command line flags override whatever is loaded here.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default log filter when neither `RUST_LOG` nor `POINTS_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn,points=info,points_core=info";

/// How a score is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Breakdown lines, one per rule, then the total
    #[default]
    Text,
    /// `{"points": N, "breakdown": [...]}`
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidValue("POINTS_OUTPUT_FORMAT".to_string())),
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Fallback tracing filter (RUST_LOG still wins)
    pub log_filter: String,

    /// Output format
    pub output_format: OutputFormat,

    /// Print only the point total, no breakdown
    pub total_only: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            output_format: OutputFormat::Text,
            total_only: false,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_filter = lookup("POINTS_LOG")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let output_format = match lookup("POINTS_OUTPUT_FORMAT") {
            Some(raw) => raw.parse()?,
            None => OutputFormat::default(),
        };

        let total_only = match lookup("POINTS_TOTAL_ONLY") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| ConfigError::InvalidValue("POINTS_TOTAL_ONLY".to_string()))?,
            None => false,
        };

        Ok(CliConfig {
            log_filter,
            output_format,
            total_only,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
