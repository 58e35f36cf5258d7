//! Enricher seam.

use async_trait::async_trait;

use crate::{AttributeSet, EnrichError, PublishContext};

/// Priority used when an enricher does not override [`Enricher::priority`].
pub const DEFAULT_ENRICHER_PRIORITY: i32 = 100;

/// Pluggable producer of message attributes, run before transmission.
///
/// Enrichers run strictly sequentially in ascending priority order; equal
/// priorities keep registration order. Attributes from a later enricher
/// overwrite same-named attributes from an earlier one. A failing enricher
/// is reported and skipped: publication never fails because optional
/// metadata could not be computed.
#[async_trait]
pub trait Enricher<M>: Send + Sync {
    /// Enricher name, used in logs and metrics.
    fn name(&self) -> &str;

    /// Execution priority; lower runs earlier.
    fn priority(&self) -> i32 {
        DEFAULT_ENRICHER_PRIORITY
    }

    /// Produce attributes for the message.
    ///
    /// # Errors
    ///
    /// Failures are folded into the enrichment outcome; they never abort the
    /// publish call.
    async fn enrich(
        &self,
        message: &M,
        context: &PublishContext,
    ) -> Result<AttributeSet, EnrichError>;
}
