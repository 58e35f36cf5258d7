//! Timestamp enricher

use async_trait::async_trait;
use chrono::Utc;
use contracts::{AttributeSet, AttributeValue, EnrichError, Enricher, PublishContext};

/// Attribute name the publish time is recorded under.
pub const PUBLISHED_AT_ATTRIBUTE: &str = "publishedAt";

/// Stamps every message with the wall-clock publish time in RFC 3339 form.
#[derive(Debug, Clone, Copy)]
pub struct TimestampEnricher {
    priority: i32,
}

impl TimestampEnricher {
    /// Create timestamp enricher
    pub fn new() -> Self {
        Self { priority: 20 }
    }

    /// Override the execution priority
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl Default for TimestampEnricher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<M: Send + Sync> Enricher<M> for TimestampEnricher {
    fn name(&self) -> &str {
        "timestamp"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    async fn enrich(
        &self,
        _message: &M,
        _context: &PublishContext,
    ) -> Result<AttributeSet, EnrichError> {
        let mut attributes = AttributeSet::new();
        attributes.insert(
            PUBLISHED_AT_ATTRIBUTE.to_string(),
            AttributeValue::string(Utc::now().to_rfc3339()),
        );
        Ok(attributes)
    }
}
