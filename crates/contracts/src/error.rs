//! Layered error definitions
//!
//! Callers see exactly three failure classes ([`PublishError`]). Collaborator
//! seams speak their own narrower types, classified at the publisher
//! boundary: transport failures become configuration errors (resolution) or
//! publish errors (send), serializer failures become serialization errors,
//! and enricher failures are folded into the enrichment outcome instead of
//! propagating at all.

use thiserror::Error;

/// Caller-facing publish failure, one of three classes.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Required setup is missing or unusable. Raised when the publisher was
    /// never configured or when the destination cannot be resolved.
    #[error("configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The serializer could not produce a message body. No send is attempted.
    #[error("serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backend send failed. Carries the destination the send targeted.
    #[error("publish to '{destination}' failed: {message}")]
    Publish {
        destination: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PublishError {
    /// Create configuration-class error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration-class error with an underlying cause
    pub fn configuration_with(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create serialization-class error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
            source: None,
        }
    }

    /// Create serialization-class error with an underlying cause
    pub fn serialization_with(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Serialization {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create publish-class error
    pub fn publish(destination: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Publish {
            destination: destination.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create publish-class error with an underlying cause
    pub fn publish_with(
        destination: impl Into<String>,
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Publish {
            destination: destination.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Class name, stable for logs and metric labels
    pub fn class(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "configuration",
            Self::Serialization { .. } => "serialization",
            Self::Publish { .. } => "publish",
        }
    }

    /// True for configuration-class errors
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    /// True for serialization-class errors
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// True for publish-class errors
    pub fn is_publish(&self) -> bool {
        matches!(self, Self::Publish { .. })
    }
}

/// Failure raised by a message backend.
///
/// Transports never speak [`PublishError`] directly; the publisher classifies
/// these at the call site.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The backend could not be reached
    #[error("connection error: {0}")]
    Connection(String),

    /// The backend refused the request
    #[error("request rejected: {0}")]
    Rejected(String),

    /// A destination name could not be looked up or created
    #[error("cannot resolve '{name}': {message}")]
    Resolution { name: String, message: String },

    /// Underlying I/O failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything backend-specific that fits no other category
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Create connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create rejected-request error
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    /// Create resolution error
    pub fn resolution(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Resolution {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create uncategorized backend error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

/// Failure raised by a metadata collaborator (an enricher or a context
/// resolver).
///
/// Deliberately not convertible into [`PublishError`]: the enrichment
/// pipeline reports these in its outcome and keeps going.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct EnrichError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl EnrichError {
    /// Create enrichment failure
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create enrichment failure with an underlying cause
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// Failure raised by a serializer.
///
/// The publisher wraps this into a serialization-class [`PublishError`]
/// before it reaches the caller.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SerializeError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SerializeError {
    /// Create serializer failure
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create serializer failure with an underlying cause
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_are_stable() {
        assert_eq!(PublishError::configuration("x").class(), "configuration");
        assert_eq!(PublishError::serialization("x").class(), "serialization");
        assert_eq!(PublishError::publish("dest", "x").class(), "publish");
    }

    #[test]
    fn class_predicates_match_the_variant() {
        assert!(PublishError::configuration("x").is_configuration());
        assert!(PublishError::serialization("x").is_serialization());
        assert!(PublishError::publish("dest", "x").is_publish());
        assert!(!PublishError::configuration("x").is_publish());
    }

    #[test]
    fn publish_class_reports_destination() {
        let error = PublishError::publish("mem://topic/orders", "backend send failed");
        let rendered = error.to_string();

        assert!(rendered.contains("mem://topic/orders"));
        assert!(rendered.contains("backend send failed"));
    }

    #[test]
    fn wrapped_cause_is_reachable_through_source() {
        use std::error::Error as _;

        let cause = TransportError::rejected("throttled");
        let error = PublishError::publish_with("dest", "backend send failed", cause);

        let source = error.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("request rejected: throttled"));
    }
}
