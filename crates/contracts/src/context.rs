//! Ambient publish context.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::EnrichError;

/// Ambient metadata resolved once per publish call and handed read-only to
/// every enricher.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublishContext {
    /// Correlation id linking the message to the operation that produced it.
    pub correlation_id: Option<String>,
    /// Distributed trace id.
    pub trace_id: Option<String>,
    /// Acting user, if any.
    pub user_id: Option<String>,
    /// Deployment environment name, e.g. "staging".
    pub environment: Option<String>,
    /// Free-form additional fields.
    pub custom: HashMap<String, String>,
}

impl PublishContext {
    /// Context carrying only an environment name.
    pub fn for_environment(environment: impl Into<String>) -> Self {
        Self {
            environment: Some(environment.into()),
            ..Self::default()
        }
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.correlation_id.is_none()
            && self.trace_id.is_none()
            && self.user_id.is_none()
            && self.environment.is_none()
            && self.custom.is_empty()
    }
}

/// Produces the ambient context for a publish call.
///
/// Unlike an enricher failure, a resolver failure is not isolated: it aborts
/// the publish and surfaces to the caller.
#[async_trait]
pub trait ContextResolver: Send + Sync {
    /// Resolve the context for the current publish call.
    ///
    /// # Errors
    ///
    /// A failure fails the whole publish call.
    async fn resolve(&self) -> Result<PublishContext, EnrichError>;
}
