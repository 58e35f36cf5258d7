//! Publish orchestration.

use std::sync::Arc;

use chrono::Utc;
use contracts::{
    to_wire_attributes, AttributeValue, ContextResolver, Destination, Enricher, PublishContext,
    PublishError, PublishOptions, PublishResult, PublisherConfig, SendOptions, SendRequest,
    Serializer, Transport, CONTENT_TYPE_ATTRIBUTE,
};
use tracing::{debug, info, instrument};

use crate::context::StaticContextResolver;
use crate::enrichers::StaticAttributesEnricher;
use crate::metrics::PublisherMetrics;
use crate::pipeline::EnrichmentPipeline;
use crate::resolver::DestinationResolver;

/// Everything [`Publisher::configure`] needs: the declarative configuration
/// plus the runtime collaborators that cannot live in a config file.
pub struct PublisherSetup<M> {
    config: PublisherConfig,
    serializer: Arc<dyn Serializer<M>>,
    enrichers: Vec<Box<dyn Enricher<M>>>,
    context_resolver: Option<Arc<dyn ContextResolver>>,
}

impl<M: Send + Sync> PublisherSetup<M> {
    /// Setup with a configuration and a serializer, no enrichers.
    pub fn new(config: PublisherConfig, serializer: Arc<dyn Serializer<M>>) -> Self {
        Self {
            config,
            serializer,
            enrichers: Vec::new(),
            context_resolver: None,
        }
    }

    /// Register an enricher. Registration order is the tiebreak for equal
    /// priorities.
    pub fn with_enricher(mut self, enricher: impl Enricher<M> + 'static) -> Self {
        self.enrichers.push(Box::new(enricher));
        self
    }

    /// Register already-boxed enrichers, keeping their order.
    pub fn with_enrichers(mut self, enrichers: Vec<Box<dyn Enricher<M>>>) -> Self {
        self.enrichers.extend(enrichers);
        self
    }

    /// Install a context resolver. Without one, a configuration that names
    /// an environment gets a fixed resolver carrying that environment.
    pub fn with_context_resolver(mut self, resolver: impl ContextResolver + 'static) -> Self {
        self.context_resolver = Some(Arc::new(resolver));
        self
    }
}

/// Message publisher bound to one transport.
///
/// Configure it once, then publish single messages or batches from shared
/// references. Re-configuring replaces the collaborators and clears the
/// cached destination resolution. The publisher keeps no per-message state;
/// concurrent publishes are safe.
pub struct Publisher<M, T: Transport> {
    transport: T,
    state: Option<PublisherState<M>>,
    metrics: Arc<PublisherMetrics>,
}

struct PublisherState<M> {
    destination: Destination,
    serializer: Arc<dyn Serializer<M>>,
    pipeline: EnrichmentPipeline<M>,
    context_resolver: Option<Arc<dyn ContextResolver>>,
    resolver: DestinationResolver,
}

impl<M, T> Publisher<M, T>
where
    M: Send + Sync,
    T: Transport,
{
    /// Publisher without a configuration. Publishing in this state fails
    /// with a configuration error before any I/O happens.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: None,
            metrics: Arc::new(PublisherMetrics::new()),
        }
    }

    /// Whether [`Publisher::configure`] has been called.
    pub fn is_configured(&self) -> bool {
        self.state.is_some()
    }

    /// The transport this publisher sends through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Counters for this publisher instance.
    pub fn metrics(&self) -> &Arc<PublisherMetrics> {
        &self.metrics
    }

    /// Configured destination, if any.
    pub fn destination(&self) -> Option<&Destination> {
        self.state.as_ref().map(|state| &state.destination)
    }

    /// Enrichers in execution order. Empty before configuration.
    pub fn enrichers(&self) -> &[Box<dyn Enricher<M>>] {
        self.state
            .as_ref()
            .map(|state| state.pipeline.enrichers())
            .unwrap_or(&[])
    }

    /// Install (or replace) the publisher configuration.
    ///
    /// `default_attributes` from the configuration become a static enricher;
    /// an `environment` becomes a fixed context resolver unless the setup
    /// brought its own. Replacing a configuration clears the cached
    /// destination resolution.
    pub fn configure(&mut self, setup: PublisherSetup<M>) {
        let PublisherSetup {
            config,
            serializer,
            mut enrichers,
            context_resolver,
        } = setup;

        if !config.default_attributes.is_empty() {
            enrichers.push(Box::new(StaticAttributesEnricher::from_strings(
                &config.default_attributes,
            )));
        }
        let pipeline = EnrichmentPipeline::new(enrichers);

        let context_resolver = context_resolver.or_else(|| {
            config.environment.as_ref().map(|environment| {
                Arc::new(StaticContextResolver::new(PublishContext::for_environment(
                    environment,
                ))) as Arc<dyn ContextResolver>
            })
        });

        info!(
            destination = %config.destination,
            transport = self.transport.name(),
            enrichers = pipeline.len(),
            "publisher configured"
        );

        self.state = Some(PublisherState {
            destination: config.destination,
            serializer,
            pipeline,
            context_resolver,
            resolver: DestinationResolver::new(),
        });
    }

    /// Publish one message.
    ///
    /// # Errors
    ///
    /// Configuration-class when the publisher is unconfigured or the
    /// destination cannot be resolved, serialization-class when no body
    /// could be produced, publish-class when the backend send fails.
    #[instrument(name = "publish_message", skip(self, message, options))]
    pub async fn publish(
        &self,
        message: &M,
        options: Option<PublishOptions>,
    ) -> Result<PublishResult, PublishError> {
        self.dispatch_message(message, options.unwrap_or_default())
            .await
    }

    /// Chunk size for batch dispatch, clamped to at least one.
    pub(crate) fn chunk_size(&self) -> usize {
        self.transport.max_batch_size().max(1)
    }

    /// Single-message dispatch shared by [`Publisher::publish`] and the
    /// batch path, including counter updates.
    pub(crate) async fn dispatch_message(
        &self,
        message: &M,
        options: PublishOptions,
    ) -> Result<PublishResult, PublishError> {
        let result = self.run_publish_sequence(message, options).await;

        match &result {
            Ok(publish_result) => {
                self.metrics.inc_publish_count();
                debug!(
                    message_id = %publish_result.message_id,
                    destination = %publish_result.destination,
                    "message published"
                );
            }
            Err(error) => {
                self.metrics.inc_failure_count();
                debug!(class = error.class(), error = %error, "publish failed");
            }
        }

        result
    }

    async fn run_publish_sequence(
        &self,
        message: &M,
        options: PublishOptions,
    ) -> Result<PublishResult, PublishError> {
        let state = self.state.as_ref().ok_or_else(|| {
            PublishError::configuration(
                "publisher is not configured: install a destination and serializer first",
            )
        })?;

        let address = state
            .resolver
            .resolve(&self.transport, &state.destination)
            .await?;

        let context = match &state.context_resolver {
            Some(resolver) => resolver.resolve().await.map_err(|error| {
                PublishError::publish_with(address, "context resolution failed", error)
            })?,
            None => PublishContext::default(),
        };

        let outcome = state.pipeline.enrich(message, &context).await;
        self.metrics
            .add_enrichment_failures(outcome.failures.len() as u64);

        let PublishOptions {
            attributes: overrides,
            deduplication_id,
            group_id,
            delay,
        } = options;

        let mut attributes = outcome.attributes;
        attributes.extend(overrides);

        let serialized = state.serializer.serialize(message).await.map_err(|error| {
            PublishError::serialization_with("serializer could not produce a message body", error)
        })?;

        // The serializer is authoritative for the content type.
        attributes.insert(
            CONTENT_TYPE_ATTRIBUTE.to_string(),
            AttributeValue::string(serialized.content_type.clone()),
        );

        let request = SendRequest {
            address: address.to_string(),
            body: serialized.body,
            attributes: to_wire_attributes(&attributes),
            options: SendOptions {
                deduplication_id,
                group_id,
                delay,
            },
        };

        let receipt = self
            .transport
            .send(request)
            .await
            .map_err(|error| PublishError::publish_with(address, "backend send failed", error))?;

        Ok(PublishResult {
            message_id: receipt.message_id,
            sequence_number: receipt.sequence_number,
            destination: address.to_string(),
            timestamp: Utc::now(),
        })
    }
}
