//! Declarative publisher configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Destination;

/// Publisher configuration, loadable from TOML or JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublisherConfig {
    /// Where messages go.
    pub destination: Destination,

    /// Environment name stamped into the default publish context.
    #[serde(default)]
    pub environment: Option<String>,

    /// Static attributes attached to every message.
    #[serde(default)]
    pub default_attributes: HashMap<String, String>,

    /// Retry policy shape. Carried and validated for forward compatibility;
    /// no pipeline component reads it yet.
    #[serde(default)]
    pub retry: RetryPolicy,
}

impl PublisherConfig {
    /// Minimal configuration for a destination.
    pub fn new(destination: Destination) -> Self {
        Self {
            destination,
            environment: None,
            default_attributes: HashMap::new(),
            retry: RetryPolicy::default(),
        }
    }

    /// Set the environment name.
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Add one static attribute.
    pub fn with_default_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_attributes.insert(name.into(), value.into());
        self
    }
}

/// Retry policy shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, first try included.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Backoff before the first retry, in milliseconds.
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Upper bound on the backoff, in milliseconds.
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    /// Multiplier applied to the backoff after each attempt.
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    100
}

fn default_max_backoff_ms() -> u64 {
    5000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}
