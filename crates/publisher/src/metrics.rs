//! Publisher counters for observability

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for a single publisher instance
#[derive(Debug, Default)]
pub struct PublisherMetrics {
    /// Total successful publishes
    publish_count: AtomicU64,
    /// Total failed publishes
    failure_count: AtomicU64,
    /// Total enricher failures (swallowed, per enricher per message)
    enrichment_failure_count: AtomicU64,
    /// Total batch calls
    batch_count: AtomicU64,
}

impl PublisherMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total successful publishes
    pub fn publish_count(&self) -> u64 {
        self.publish_count.load(Ordering::Relaxed)
    }

    /// Increment successful publishes
    pub fn inc_publish_count(&self) {
        self.publish_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total failed publishes
    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    /// Increment failed publishes
    pub fn inc_failure_count(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total swallowed enricher failures
    pub fn enrichment_failure_count(&self) -> u64 {
        self.enrichment_failure_count.load(Ordering::Relaxed)
    }

    /// Add swallowed enricher failures from one publish call
    pub fn add_enrichment_failures(&self, count: u64) {
        self.enrichment_failure_count
            .fetch_add(count, Ordering::Relaxed);
    }

    /// Get total batch calls
    pub fn batch_count(&self) -> u64 {
        self.batch_count.load(Ordering::Relaxed)
    }

    /// Increment batch calls
    pub fn inc_batch_count(&self) {
        self.batch_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            publish_count: self.publish_count(),
            failure_count: self.failure_count(),
            enrichment_failure_count: self.enrichment_failure_count(),
            batch_count: self.batch_count(),
        }
    }
}

/// Snapshot of publisher counters (for reporting)
#[derive(Debug, Clone, Copy)]
pub struct MetricsSnapshot {
    pub publish_count: u64,
    pub failure_count: u64,
    pub enrichment_failure_count: u64,
    pub batch_count: u64,
}
