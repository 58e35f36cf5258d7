//! Configuration parsing
//!
//! Supports TOML (primary) and JSON formats.

use contracts::{PublishError, PublisherConfig};

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format (recommended)
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    /// Infer format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse TOML configuration
pub fn parse_toml(content: &str) -> Result<PublisherConfig, PublishError> {
    toml::from_str(content)
        .map_err(|e| PublishError::configuration_with(format!("TOML parse error: {e}"), e))
}

/// Parse JSON configuration
pub fn parse_json(content: &str) -> Result<PublisherConfig, PublishError> {
    serde_json::from_str(content)
        .map_err(|e| PublishError::configuration_with(format!("JSON parse error: {e}"), e))
}

/// Parse configuration in the given format
pub fn parse(content: &str, format: ConfigFormat) -> Result<PublisherConfig, PublishError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}
