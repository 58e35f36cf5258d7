//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON configuration files
//! - Validate configuration legality
//! - Produce a ready-to-use `PublisherConfig`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let config = ConfigLoader::load_from_path(Path::new("publisher.toml")).unwrap();
//! println!("Destination: {}", config.destination);
//! ```

mod parser;
mod validator;

pub use contracts::PublisherConfig;
pub use parser::ConfigFormat;
pub use validator::validate;

use contracts::PublishError;
use std::path::Path;

/// Configuration loader
///
/// Provides static methods to load configuration from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    ///
    /// All of them are configuration-class errors.
    pub fn load_from_path(path: &Path) -> Result<PublisherConfig, PublishError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load configuration from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<PublisherConfig, PublishError> {
        Self::parse_and_validate(content, format)
    }

    /// Serialize PublisherConfig to TOML string
    pub fn to_toml(config: &PublisherConfig) -> Result<String, PublishError> {
        toml::to_string_pretty(config)
            .map_err(|e| PublishError::configuration(format!("TOML serialize error: {e}")))
    }

    /// Serialize PublisherConfig to JSON string
    pub fn to_json(config: &PublisherConfig) -> Result<String, PublishError> {
        serde_json::to_string_pretty(config)
            .map_err(|e| PublishError::configuration(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, PublishError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            PublishError::configuration("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            PublishError::configuration(format!("unsupported config format: .{ext}"))
        })
    }

    /// Read configuration file content
    fn read_file(path: &Path) -> Result<String, PublishError> {
        std::fs::read_to_string(path).map_err(|e| {
            PublishError::configuration_with(
                format!("cannot read config file '{}'", path.display()),
                e,
            )
        })
    }

    /// Parse and validate configuration content
    fn parse_and_validate(
        content: &str,
        format: ConfigFormat,
    ) -> Result<PublisherConfig, PublishError> {
        let config = parser::parse(content, format)?;
        validator::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_TOML: &str = r#"
environment = "staging"

[destination]
kind = "topic"
value = "orders"

[default_attributes]
service = "order-api"

[retry]
max_attempts = 5
"#;

    #[test]
    fn test_load_from_str_toml() {
        let result = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.destination.value, "orders");
        assert_eq!(config.environment.as_deref(), Some("staging"));
    }

    #[test]
    fn test_round_trip_toml() {
        let config = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        let serialized = ConfigLoader::to_toml(&config).unwrap();
        let config2 = ConfigLoader::load_from_str(&serialized, ConfigFormat::Toml).unwrap();
        assert_eq!(config.destination, config2.destination);
        assert_eq!(config.retry, config2.retry);
    }

    #[test]
    fn test_round_trip_json() {
        let config = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        let json = ConfigLoader::to_json(&config).unwrap();
        let config2 = ConfigLoader::load_from_str(&json, ConfigFormat::Json).unwrap();
        assert_eq!(config.destination, config2.destination);
    }

    #[test]
    fn test_validation_runs_after_parse() {
        // Whitespace in the destination should fail validation.
        let content = r#"
[destination]
kind = "topic"
value = "or ders"
"#;
        let result = ConfigLoader::load_from_str(content, ConfigFormat::Toml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("whitespace"));
    }

    #[test]
    fn test_load_from_path_detects_format() {
        use std::io::Write;

        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(MINIMAL_TOML.as_bytes()).unwrap();

        let config = ConfigLoader::load_from_path(file.path()).unwrap();
        assert_eq!(config.destination.value, "orders");
    }

    #[test]
    fn test_unsupported_extension() {
        let result = ConfigLoader::load_from_path(Path::new("publisher.yaml"));
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("unsupported config format"));
    }
}
