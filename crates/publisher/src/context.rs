//! Context resolvers

use async_trait::async_trait;
use contracts::{ContextResolver, EnrichError, PublishContext};

/// Context resolver returning the same fixed context on every call.
///
/// The publisher installs one automatically when the configuration names an
/// environment and no custom resolver was provided.
#[derive(Debug, Clone, Default)]
pub struct StaticContextResolver {
    context: PublishContext,
}

impl StaticContextResolver {
    /// Create resolver around a fixed context
    pub fn new(context: PublishContext) -> Self {
        Self { context }
    }
}

#[async_trait]
impl ContextResolver for StaticContextResolver {
    async fn resolve(&self) -> Result<PublishContext, EnrichError> {
        Ok(self.context.clone())
    }
}
