//! Per-call publish options.

use std::time::Duration;

use crate::{AttributeSet, AttributeValue};

/// Options for a single publish call.
#[derive(Debug, Clone, Default)]
pub struct PublishOptions {
    /// Explicit attributes, merged over the enrichment output. Caller intent
    /// wins over anything an enricher computed.
    pub attributes: AttributeSet,
    /// Deduplication id handed to the backend.
    pub deduplication_id: Option<String>,
    /// Grouping id handed to the backend.
    pub group_id: Option<String>,
    /// Delivery delay handed to the backend.
    pub delay: Option<Duration>,
}

impl PublishOptions {
    /// Empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one explicit attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Set the deduplication id.
    pub fn with_deduplication_id(mut self, id: impl Into<String>) -> Self {
        self.deduplication_id = Some(id.into());
        self
    }

    /// Set the grouping id.
    pub fn with_group_id(mut self, id: impl Into<String>) -> Self {
        self.group_id = Some(id.into());
        self
    }

    /// Set the delivery delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Options for a batch publish call.
#[derive(Debug, Clone)]
pub struct BatchPublishOptions {
    /// Keep dispatching later chunks after a failure. Defaults to `true`.
    /// When `false`, the chunk containing the first failure is still fully
    /// awaited, and no later chunk starts.
    pub continue_on_error: bool,
}

impl Default for BatchPublishOptions {
    fn default() -> Self {
        Self {
            continue_on_error: true,
        }
    }
}

impl BatchPublishOptions {
    /// Stop dispatching after the first chunk that contains a failure.
    pub fn abort_on_error() -> Self {
        Self {
            continue_on_error: false,
        }
    }
}
