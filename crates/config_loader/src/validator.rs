//! Configuration validation
//!
//! Rules:
//! - destination value is non-empty and free of whitespace
//! - environment, when set, is non-empty
//! - default attribute names are non-empty
//! - retry.max_attempts >= 1
//! - retry.initial_backoff_ms <= retry.max_backoff_ms
//! - retry.backoff_multiplier >= 1.0

use contracts::{PublishError, PublisherConfig};

/// Validate a publisher configuration.
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(config: &PublisherConfig) -> Result<(), PublishError> {
    validate_destination(config)?;
    validate_environment(config)?;
    validate_default_attributes(config)?;
    validate_retry(config)?;
    Ok(())
}

fn validation_error(field: &str, message: impl Into<String>) -> PublishError {
    PublishError::configuration(format!(
        "config validation error at '{field}': {}",
        message.into()
    ))
}

/// Validate the destination
fn validate_destination(config: &PublisherConfig) -> Result<(), PublishError> {
    let value = &config.destination.value;

    if value.is_empty() {
        return Err(validation_error(
            "destination.value",
            "destination cannot be empty",
        ));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(validation_error(
            "destination.value",
            format!("destination '{value}' must not contain whitespace"),
        ));
    }
    Ok(())
}

/// Validate the environment name
fn validate_environment(config: &PublisherConfig) -> Result<(), PublishError> {
    if let Some(environment) = &config.environment {
        if environment.is_empty() {
            return Err(validation_error(
                "environment",
                "environment cannot be empty when set",
            ));
        }
    }
    Ok(())
}

/// Validate the static attribute names
fn validate_default_attributes(config: &PublisherConfig) -> Result<(), PublishError> {
    for name in config.default_attributes.keys() {
        if name.is_empty() {
            return Err(validation_error(
                "default_attributes",
                "attribute name cannot be empty",
            ));
        }
    }
    Ok(())
}

/// Validate the retry policy shape
fn validate_retry(config: &PublisherConfig) -> Result<(), PublishError> {
    let retry = &config.retry;

    if retry.max_attempts == 0 {
        return Err(validation_error(
            "retry.max_attempts",
            "max_attempts must be >= 1",
        ));
    }
    if retry.initial_backoff_ms > retry.max_backoff_ms {
        return Err(validation_error(
            "retry.initial_backoff_ms / retry.max_backoff_ms",
            format!(
                "initial_backoff_ms ({}) must be <= max_backoff_ms ({})",
                retry.initial_backoff_ms, retry.max_backoff_ms
            ),
        ));
    }
    if retry.backoff_multiplier < 1.0 {
        return Err(validation_error(
            "retry.backoff_multiplier",
            format!(
                "backoff_multiplier must be >= 1.0, got {}",
                retry.backoff_multiplier
            ),
        ));
    }
    Ok(())
}
