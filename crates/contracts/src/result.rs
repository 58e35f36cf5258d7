//! Publish results and batch aggregation.

use chrono::{DateTime, Utc};

use crate::PublishError;

/// Outcome of one successful send.
#[derive(Debug, Clone)]
pub struct PublishResult {
    /// Backend-assigned message id.
    pub message_id: String,
    /// Backend sequence number, when the destination orders messages.
    pub sequence_number: Option<String>,
    /// Canonical address the message was sent to.
    pub destination: String,
    /// When the result was produced.
    pub timestamp: DateTime<Utc>,
}

/// A message that could not be published.
#[derive(Debug)]
pub struct FailedPublish<M> {
    /// The message as submitted.
    pub message: M,
    /// Why it failed.
    pub error: PublishError,
    /// Zero-based position in the submitted batch, not in the chunk.
    pub index: usize,
}

/// Aggregated outcome of a batch publish.
///
/// Batch publishing never returns an error: failures are data here, reported
/// alongside the successes.
#[derive(Debug)]
pub struct BatchPublishResult<M> {
    /// Results for the messages that were sent, in submission order.
    pub successful: Vec<PublishResult>,
    /// Messages that failed, with their original indices, in submission
    /// order.
    pub failed: Vec<FailedPublish<M>>,
    /// Length of the submitted batch, even when dispatch stopped early.
    pub total_count: usize,
}

impl<M> BatchPublishResult<M> {
    /// Number of messages sent successfully.
    pub fn success_count(&self) -> usize {
        self.successful.len()
    }

    /// Number of messages that failed.
    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    /// True when every submitted message was dispatched, i.e. the batch did
    /// not stop early.
    pub fn is_complete(&self) -> bool {
        self.success_count() + self.failure_count() == self.total_count
    }

    /// True when every submitted message was sent successfully.
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty() && self.is_complete()
    }
}
