//! # Publisher
//!
//! Message publishing core.
//!
//! Responsible for:
//! - Orchestrating the publish sequence (resolve, enrich, serialize, send)
//! - Running enrichers sequentially in priority order with failure isolation
//! - Resolving the destination once per configuration
//! - Dispatching batches in backend-sized chunks
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use contracts::{Destination, PublisherConfig};
//! use publisher::{ContextEnricher, JsonSerializer, Publisher, PublisherSetup, TimestampEnricher};
//! use transports::InMemoryTransport;
//!
//! let mut publisher = Publisher::new(InMemoryTransport::new());
//! publisher.configure(
//!     PublisherSetup::new(
//!         PublisherConfig::new(Destination::topic("orders")).with_environment("staging"),
//!         Arc::new(JsonSerializer::new()),
//!     )
//!     .with_enricher(ContextEnricher::new())
//!     .with_enricher(TimestampEnricher::new()),
//! );
//!
//! let result = publisher.publish(&order, None).await?;
//! ```

mod batch;
pub mod context;
pub mod enrichers;
pub mod metrics;
pub mod pipeline;
pub mod publisher;
pub mod resolver;
pub mod serializers;

pub use contracts::{
    BatchPublishOptions, BatchPublishResult, Enricher, PublishError, PublishOptions,
    PublishResult, Serializer, Transport,
};
pub use context::StaticContextResolver;
pub use enrichers::{ContextEnricher, StaticAttributesEnricher, TimestampEnricher};
pub use metrics::{MetricsSnapshot, PublisherMetrics};
pub use pipeline::{EnrichmentFailure, EnrichmentOutcome, EnrichmentPipeline};
pub use publisher::{Publisher, PublisherSetup};
pub use resolver::DestinationResolver;
pub use serializers::{JsonSerializer, JSON_CONTENT_TYPE};
