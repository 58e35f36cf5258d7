//! Context enricher

use async_trait::async_trait;
use contracts::{AttributeSet, AttributeValue, EnrichError, Enricher, PublishContext};

/// Copies the ambient publish context into message attributes.
///
/// Unset context fields produce no attribute. Custom context entries are
/// copied verbatim and win over the named fields on a name collision.
#[derive(Debug, Clone, Copy)]
pub struct ContextEnricher {
    priority: i32,
}

impl ContextEnricher {
    /// Create context enricher
    pub fn new() -> Self {
        Self { priority: 10 }
    }

    /// Override the execution priority
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl Default for ContextEnricher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<M: Send + Sync> Enricher<M> for ContextEnricher {
    fn name(&self) -> &str {
        "context"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    async fn enrich(
        &self,
        _message: &M,
        context: &PublishContext,
    ) -> Result<AttributeSet, EnrichError> {
        let mut attributes = AttributeSet::new();

        if let Some(correlation_id) = &context.correlation_id {
            attributes.insert(
                "correlationId".to_string(),
                AttributeValue::string(correlation_id),
            );
        }
        if let Some(trace_id) = &context.trace_id {
            attributes.insert("traceId".to_string(), AttributeValue::string(trace_id));
        }
        if let Some(user_id) = &context.user_id {
            attributes.insert("userId".to_string(), AttributeValue::string(user_id));
        }
        if let Some(environment) = &context.environment {
            attributes.insert(
                "environment".to_string(),
                AttributeValue::string(environment),
            );
        }
        for (name, value) in &context.custom {
            attributes.insert(name.clone(), AttributeValue::string(value));
        }

        Ok(attributes)
    }
}
