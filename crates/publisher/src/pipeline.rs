//! Priority-ordered enrichment pipeline.

use contracts::{AttributeSet, EnrichError, Enricher, PublishContext};
use tracing::{debug, warn};

/// Outcome of one pipeline run: the merged attributes plus every enricher
/// failure that occurred along the way.
///
/// Failures are data here, not errors. A single misbehaving enricher cannot
/// abort enrichment for the message.
#[derive(Debug, Default)]
pub struct EnrichmentOutcome {
    /// Merged attributes from every enricher that succeeded.
    pub attributes: AttributeSet,
    /// Failures in execution order.
    pub failures: Vec<EnrichmentFailure>,
}

/// A single enricher failure, reported but never raised.
#[derive(Debug)]
pub struct EnrichmentFailure {
    /// Name of the failing enricher.
    pub enricher: String,
    /// What went wrong.
    pub error: EnrichError,
}

/// Runs enrichers sequentially in ascending priority order.
///
/// Ordering is fixed at construction with a stable sort, so enrichers that
/// share a priority keep their registration order.
pub struct EnrichmentPipeline<M> {
    enrichers: Vec<Box<dyn Enricher<M>>>,
}

impl<M: Send + Sync> EnrichmentPipeline<M> {
    /// Build a pipeline from enrichers in registration order.
    pub fn new(mut enrichers: Vec<Box<dyn Enricher<M>>>) -> Self {
        // sort_by_key is stable: equal priorities keep registration order.
        enrichers.sort_by_key(|enricher| enricher.priority());
        Self { enrichers }
    }

    /// Enrichers in execution order.
    pub fn enrichers(&self) -> &[Box<dyn Enricher<M>>] {
        &self.enrichers
    }

    /// Number of registered enrichers.
    pub fn len(&self) -> usize {
        self.enrichers.len()
    }

    /// True when no enricher is registered.
    pub fn is_empty(&self) -> bool {
        self.enrichers.is_empty()
    }

    /// Run every enricher against the message and fold the results.
    ///
    /// Later enrichers overwrite same-named attributes from earlier ones. A
    /// failing enricher is logged, recorded in the outcome and skipped.
    pub async fn enrich(&self, message: &M, context: &PublishContext) -> EnrichmentOutcome {
        let mut outcome = EnrichmentOutcome::default();

        for enricher in &self.enrichers {
            match enricher.enrich(message, context).await {
                Ok(attributes) => {
                    debug!(
                        enricher = enricher.name(),
                        count = attributes.len(),
                        "enricher produced attributes"
                    );
                    outcome.attributes.extend(attributes);
                }
                Err(error) => {
                    warn!(
                        enricher = enricher.name(),
                        error = %error,
                        "enricher failed, continuing without its attributes"
                    );
                    outcome.failures.push(EnrichmentFailure {
                        enricher: enricher.name().to_string(),
                        error,
                    });
                }
            }
        }

        outcome
    }
}
