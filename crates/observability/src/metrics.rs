//! Publish metrics collection
//!
//! Records publish outcomes as Prometheus metrics and aggregates them in
//! memory for summary reports.

use std::collections::HashMap;

use contracts::{BatchPublishResult, PublishError, PublishResult};
use metrics::{counter, histogram};

/// Record one successful publish.
///
/// Call this for every [`PublishResult`] returned to the application.
pub fn record_publish_result(result: &PublishResult) {
    counter!(
        "message_publisher_published_total",
        "destination" => result.destination.clone()
    )
    .increment(1);
}

/// Record one failed publish, labeled with its error class.
pub fn record_publish_failure(error: &PublishError) {
    counter!(
        "message_publisher_publish_failures_total",
        "class" => error.class()
    )
    .increment(1);
}

/// Record one swallowed enricher failure.
pub fn record_enrichment_failure(enricher: &str) {
    counter!(
        "message_publisher_enrichment_failures_total",
        "enricher" => enricher.to_string()
    )
    .increment(1);
}

/// Record the caller-observed latency of one publish call.
pub fn record_publish_latency_ms(latency_ms: f64) {
    histogram!("message_publisher_publish_latency_ms").record(latency_ms);
}

/// Record a whole batch outcome.
///
/// Successes and failures inside the batch are recorded individually, so a
/// caller uses either this or the per-message functions, never both.
pub fn record_batch_result<M>(result: &BatchPublishResult<M>) {
    counter!("message_publisher_batches_total").increment(1);
    histogram!("message_publisher_batch_size").record(result.total_count as f64);

    if !result.is_complete() {
        counter!("message_publisher_batches_stopped_early_total").increment(1);
    }

    for publish_result in &result.successful {
        record_publish_result(publish_result);
    }
    for failed in &result.failed {
        record_publish_failure(&failed.error);
    }
}

/// In-memory aggregator for publish outcomes.
///
/// Complements the Prometheus metrics with process-local totals, handy for
/// end-of-run summaries.
#[derive(Debug, Clone, Default)]
pub struct PublishStatsAggregator {
    /// Total successful publishes
    pub total_published: u64,

    /// Total failed publishes
    pub total_failed: u64,

    /// Failures grouped by error class
    pub failures_by_class: HashMap<String, u64>,

    /// Total batch calls
    pub total_batches: u64,

    /// Batches that stopped before dispatching every message
    pub incomplete_batches: u64,

    /// Publish latency statistics (milliseconds)
    pub latency_ms: RunningStats,

    /// Batch size statistics
    pub batch_sizes: RunningStats,
}

impl PublishStatsAggregator {
    /// Create new aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in the outcome of one single-message publish
    pub fn update_single(&mut self, outcome: &Result<PublishResult, PublishError>) {
        match outcome {
            Ok(_) => self.total_published += 1,
            Err(error) => self.record_failure(error),
        }
    }

    /// Fold in the outcome of one batch publish
    pub fn update_batch<M>(&mut self, result: &BatchPublishResult<M>) {
        self.total_batches += 1;
        self.batch_sizes.push(result.total_count as f64);

        if !result.is_complete() {
            self.incomplete_batches += 1;
        }

        self.total_published += result.success_count() as u64;
        for failed in &result.failed {
            self.record_failure(&failed.error);
        }
    }

    /// Record one caller-observed publish latency
    pub fn record_latency_ms(&mut self, latency_ms: f64) {
        self.latency_ms.push(latency_ms);
    }

    /// Produce a summary report
    pub fn summary(&self) -> PublishSummary {
        let attempts = self.total_published + self.total_failed;
        PublishSummary {
            total_published: self.total_published,
            total_failed: self.total_failed,
            failure_rate: if attempts > 0 {
                self.total_failed as f64 / attempts as f64 * 100.0
            } else {
                0.0
            },
            total_batches: self.total_batches,
            incomplete_batches: self.incomplete_batches,
            failures_by_class: self.failures_by_class.clone(),
            latency_ms: StatsSummary::from(&self.latency_ms),
            batch_sizes: StatsSummary::from(&self.batch_sizes),
        }
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn record_failure(&mut self, error: &PublishError) {
        self.total_failed += 1;
        *self
            .failures_by_class
            .entry(error.class().to_string())
            .or_insert(0) += 1;
    }
}

/// Publish summary report
#[derive(Debug, Clone, Default)]
pub struct PublishSummary {
    pub total_published: u64,
    pub total_failed: u64,
    pub failure_rate: f64,
    pub total_batches: u64,
    pub incomplete_batches: u64,
    pub failures_by_class: HashMap<String, u64>,
    pub latency_ms: StatsSummary,
    pub batch_sizes: StatsSummary,
}

impl std::fmt::Display for PublishSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Publish Metrics Summary ===")?;
        writeln!(f, "Published: {}", self.total_published)?;
        writeln!(
            f,
            "Failed: {} ({:.2}%)",
            self.total_failed, self.failure_rate
        )?;
        writeln!(
            f,
            "Batches: {} ({} stopped early)",
            self.total_batches, self.incomplete_batches
        )?;
        writeln!(f, "Latency (ms): {}", self.latency_ms)?;
        writeln!(f, "Batch size: {}", self.batch_sizes)?;

        if !self.failures_by_class.is_empty() {
            writeln!(f, "Failures by class:")?;
            for (class, count) in &self.failures_by_class {
                writeln!(f, "  {}: {}", class, count)?;
            }
        }

        Ok(())
    }
}

/// Statistics summary
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count(),
            min: stats.min().unwrap_or(0.0),
            max: stats.max().unwrap_or(0.0),
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// Online statistics (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: Option<f64>,
    max: Option<f64>,
}

impl RunningStats {
    /// Add a value
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.min = Some(self.min.map_or(value, |min| min.min(value)));
        self.max = Some(self.max.map_or(value, |max| max.max(value)));

        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    /// Number of samples
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Sample mean
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Sample variance
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// Sample standard deviation
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Smallest sample
    pub fn min(&self) -> Option<f64> {
        self.min
    }

    /// Largest sample
    pub fn max(&self) -> Option<f64> {
        self.max
    }
}
