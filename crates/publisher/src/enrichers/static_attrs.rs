//! Static attributes enricher

use std::collections::HashMap;

use async_trait::async_trait;
use contracts::{AttributeSet, AttributeValue, EnrichError, Enricher, PublishContext};

/// Attaches a fixed attribute set to every message.
///
/// The publisher installs one of these automatically for the
/// `default_attributes` section of the configuration.
#[derive(Debug, Clone)]
pub struct StaticAttributesEnricher {
    attributes: AttributeSet,
    priority: i32,
}

impl StaticAttributesEnricher {
    /// Create enricher from an attribute set
    pub fn new(attributes: AttributeSet) -> Self {
        Self {
            attributes,
            priority: 30,
        }
    }

    /// Create enricher from a plain string map (the configuration shape)
    pub fn from_strings(attributes: &HashMap<String, String>) -> Self {
        Self::new(
            attributes
                .iter()
                .map(|(name, value)| (name.clone(), AttributeValue::string(value.clone())))
                .collect(),
        )
    }

    /// Override the execution priority
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

#[async_trait]
impl<M: Send + Sync> Enricher<M> for StaticAttributesEnricher {
    fn name(&self) -> &str {
        "static_attributes"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    async fn enrich(
        &self,
        _message: &M,
        _context: &PublishContext,
    ) -> Result<AttributeSet, EnrichError> {
        Ok(self.attributes.clone())
    }
}
