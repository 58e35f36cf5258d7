//! # Integration Tests
//!
//! End-to-end scenarios against the in-memory backend.
//!
//! Responsible for:
//! - Publish flow: enrichment, attribute merging and wire conversion as delivered
//! - Destination resolution: canonical short-circuit and per-configuration caching
//! - Batch dispatch through a real transport
//! - Configuration files driving a publisher end to end

#[cfg(test)]
mod support {
    use std::sync::Arc;

    use contracts::PublisherConfig;
    use publisher::{JsonSerializer, Publisher, PublisherSetup};
    use serde::{Deserialize, Serialize};
    use transports::InMemoryTransport;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct OrderPlaced {
        pub order_id: String,
        pub amount_cents: u64,
    }

    pub fn order(order_id: &str, amount_cents: u64) -> OrderPlaced {
        OrderPlaced {
            order_id: order_id.to_string(),
            amount_cents,
        }
    }

    pub fn json_setup(config: PublisherConfig) -> PublisherSetup<OrderPlaced> {
        PublisherSetup::new(config, Arc::new(JsonSerializer::new()))
    }

    pub fn configured_publisher(
        config: PublisherConfig,
    ) -> Publisher<OrderPlaced, InMemoryTransport> {
        let mut publisher = Publisher::new(InMemoryTransport::new());
        publisher.configure(json_setup(config));
        publisher
    }
}

#[cfg(test)]
mod publish_flow_tests {
    use contracts::{AttributeValue, Destination, PublishOptions, PublisherConfig};
    use publisher::{ContextEnricher, Publisher, TimestampEnricher};
    use transports::InMemoryTransport;

    use crate::support::{configured_publisher, json_setup, order};

    /// The delivered message carries the serialized body, the serializer's
    /// content type and the backend receipt data.
    #[tokio::test]
    async fn publish_delivers_body_and_content_type() {
        let publisher =
            configured_publisher(PublisherConfig::new(Destination::topic("orders")));
        let message = order("order-1", 2500);

        let result = publisher.publish(&message, None).await.unwrap();

        assert_eq!(result.destination, "mem://topic/orders");
        assert!(result.sequence_number.is_none(), "topics are unordered");

        let delivered = publisher.transport().delivered("mem://topic/orders");
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].message_id, result.message_id);

        let decoded: crate::support::OrderPlaced =
            serde_json::from_slice(&delivered[0].body).unwrap();
        assert_eq!(decoded, message);

        let content_type = &delivered[0].attributes["contentType"];
        assert_eq!(content_type.string_value.as_deref(), Some("application/json"));
    }

    /// A configured environment reaches the wire through the automatic
    /// context resolver, and default attributes ride along on every message.
    #[tokio::test]
    async fn environment_and_defaults_reach_the_wire() {
        let config = PublisherConfig::new(Destination::topic("orders"))
            .with_environment("staging")
            .with_default_attribute("service", "order-api");
        let mut publisher = Publisher::new(InMemoryTransport::new());
        publisher.configure(json_setup(config).with_enricher(ContextEnricher::new()));

        publisher.publish(&order("order-1", 2500), None).await.unwrap();

        let delivered = publisher.transport().delivered("mem://topic/orders");
        let attributes = &delivered[0].attributes;
        assert_eq!(attributes["environment"].string_value.as_deref(), Some("staging"));
        assert_eq!(attributes["service"].string_value.as_deref(), Some("order-api"));
    }

    /// Per-publish attributes win over configured defaults of the same name.
    #[tokio::test]
    async fn explicit_attributes_override_configured_defaults() {
        let config = PublisherConfig::new(Destination::topic("orders"))
            .with_default_attribute("service", "order-api");
        let publisher = configured_publisher(config);

        let options = PublishOptions::new()
            .with_attribute("service", AttributeValue::string("billing-api"));
        publisher
            .publish(&order("order-1", 2500), Some(options))
            .await
            .unwrap();

        let delivered = publisher.transport().delivered("mem://topic/orders");
        assert_eq!(
            delivered[0].attributes["service"].string_value.as_deref(),
            Some("billing-api")
        );
    }

    /// The timestamp enricher stamps every delivered message.
    #[tokio::test]
    async fn timestamp_enricher_stamps_published_at() {
        let mut publisher = Publisher::new(InMemoryTransport::new());
        publisher.configure(
            json_setup(PublisherConfig::new(Destination::topic("orders")))
                .with_enricher(TimestampEnricher::new()),
        );

        publisher.publish(&order("order-1", 2500), None).await.unwrap();

        let delivered = publisher.transport().delivered("mem://topic/orders");
        let published_at = delivered[0].attributes["publishedAt"]
            .string_value
            .as_deref()
            .unwrap();
        assert!(published_at.contains('T'), "expected RFC 3339, got {published_at}");
    }

    /// Send options travel untouched to the backend, and queue destinations
    /// hand out sequence numbers.
    #[tokio::test]
    async fn send_options_travel_to_the_backend() {
        let publisher = configured_publisher(PublisherConfig::new(Destination::queue("jobs")));

        let options = PublishOptions::new()
            .with_deduplication_id("dedup-1")
            .with_group_id("group-1");
        let result = publisher
            .publish(&order("order-1", 2500), Some(options))
            .await
            .unwrap();

        assert_eq!(result.sequence_number.as_deref(), Some("1"));

        let delivered = publisher.transport().delivered("mem://queue/jobs");
        assert_eq!(delivered[0].options.deduplication_id.as_deref(), Some("dedup-1"));
        assert_eq!(delivered[0].options.group_id.as_deref(), Some("group-1"));
    }
}

#[cfg(test)]
mod resolution_tests {
    use contracts::{Destination, PublisherConfig};

    use crate::support::{configured_publisher, order};

    /// Canonical destinations never reach the backend's resolver.
    #[tokio::test]
    async fn canonical_destination_skips_resolution() {
        let publisher = configured_publisher(PublisherConfig::new(Destination::topic(
            "mem://topic/orders",
        )));

        publisher.publish(&order("order-1", 100), None).await.unwrap();
        publisher.publish(&order("order-2", 200), None).await.unwrap();

        assert_eq!(publisher.transport().resolve_calls(), 0);
        assert_eq!(publisher.transport().delivered("mem://topic/orders").len(), 2);
    }

    /// A named destination resolves once; later publishes reuse the cached
    /// address.
    #[tokio::test]
    async fn named_destination_resolves_once() {
        let publisher =
            configured_publisher(PublisherConfig::new(Destination::topic("orders")));

        for index in 0..3 {
            publisher
                .publish(&order(&format!("order-{index}"), 100), None)
                .await
                .unwrap();
        }

        assert_eq!(publisher.transport().resolve_calls(), 1);
        assert_eq!(publisher.transport().delivered("mem://topic/orders").len(), 3);
    }
}

#[cfg(test)]
mod batch_tests {
    use std::time::Duration;

    use contracts::{BatchPublishOptions, Destination, PublisherConfig};
    use publisher::Publisher;
    use transports::{InMemoryTransport, MemoryTransportConfig};

    use crate::support::{configured_publisher, json_setup, order};

    /// A batch larger than the backend chunk size is delivered completely,
    /// with results mapped back to input positions.
    #[tokio::test]
    async fn batch_delivers_all_messages() {
        let publisher = configured_publisher(PublisherConfig::new(Destination::queue("jobs")));
        let messages: Vec<_> = (0..25)
            .map(|index| order(&format!("order-{index}"), index * 100))
            .collect();

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            publisher.publish_batch(&messages, None),
        )
        .await
        .expect("batch timed out");

        assert!(result.all_succeeded());
        assert_eq!(result.total_count, 25);
        assert_eq!(result.success_count(), 25);
        assert_eq!(publisher.transport().delivered("mem://queue/jobs").len(), 25);
        assert_eq!(publisher.transport().resolve_calls(), 1);
        assert_eq!(publisher.metrics().publish_count(), 25);
    }

    /// With abort-on-error, a fully failing first chunk stops the batch
    /// before later chunks are dispatched.
    #[tokio::test]
    async fn abort_on_error_stops_after_failing_chunk() {
        let transport = InMemoryTransport::with_config(MemoryTransportConfig {
            fail_addresses: vec!["mem://queue/jobs".to_string()],
            ..MemoryTransportConfig::default()
        });
        let mut publisher = Publisher::new(transport);
        publisher.configure(json_setup(PublisherConfig::new(Destination::queue("jobs"))));

        let messages: Vec<_> = (0..25)
            .map(|index| order(&format!("order-{index}"), 100))
            .collect();

        let result = publisher
            .publish_batch(&messages, Some(BatchPublishOptions::abort_on_error()))
            .await;

        assert_eq!(result.total_count, 25);
        assert_eq!(result.success_count(), 0);
        assert_eq!(result.failure_count(), 10, "only the first chunk is attempted");
        assert!(!result.is_complete());

        let failed_indices: Vec<_> = result.failed.iter().map(|failure| failure.index).collect();
        assert_eq!(failed_indices, (0..10).collect::<Vec<_>>());
        assert_eq!(publisher.transport().delivered_count(), 0);
    }
}

#[cfg(test)]
mod metrics_tests {
    use contracts::{Destination, PublisherConfig};
    use observability::PublishStatsAggregator;
    use publisher::Publisher;
    use transports::{InMemoryTransport, MemoryTransportConfig};

    use crate::support::{configured_publisher, json_setup, order};

    /// Publisher counters and the stats aggregator agree with each other
    /// across a mix of single publishes and a partially failing batch.
    #[tokio::test]
    async fn counters_and_aggregator_agree() {
        let transport = InMemoryTransport::with_config(MemoryTransportConfig {
            fail_addresses: vec!["mem://queue/poison".to_string()],
            ..MemoryTransportConfig::default()
        });
        let mut failing = Publisher::new(transport);
        failing.configure(json_setup(PublisherConfig::new(Destination::queue("poison"))));

        let publisher = configured_publisher(PublisherConfig::new(Destination::topic("orders")));
        let mut stats = PublishStatsAggregator::new();

        stats.update_single(&publisher.publish(&order("order-1", 100), None).await);
        stats.update_single(&failing.publish(&order("order-2", 200), None).await);

        let batch = publisher
            .publish_batch(&[order("order-3", 300), order("order-4", 400)], None)
            .await;
        stats.update_batch(&batch);

        assert_eq!(stats.total_published, 3);
        assert_eq!(stats.total_failed, 1);
        assert_eq!(stats.failures_by_class.get("publish"), Some(&1));
        assert_eq!(stats.total_batches, 1);
        assert_eq!(stats.incomplete_batches, 0);

        let snapshot = publisher.metrics().snapshot();
        assert_eq!(snapshot.publish_count, 3);
        assert_eq!(snapshot.failure_count, 0);
        assert_eq!(failing.metrics().snapshot().failure_count, 1);

        let summary = stats.summary();
        assert!((summary.failure_rate - 25.0).abs() < 1e-9);
    }
}

#[cfg(test)]
mod config_tests {
    use config_loader::{ConfigFormat, ConfigLoader};
    use publisher::{ContextEnricher, Publisher};
    use transports::InMemoryTransport;

    use crate::support::{json_setup, order, OrderPlaced};

    const BILLING_TOML: &str = r#"
environment = "production"

[destination]
kind = "queue"
value = "billing-jobs"

[default_attributes]
service = "billing"

[retry]
max_attempts = 5
"#;

    /// A TOML configuration file drives a publisher end to end.
    #[tokio::test]
    async fn toml_config_drives_a_publisher() {
        let config = ConfigLoader::load_from_str(BILLING_TOML, ConfigFormat::Toml).unwrap();
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.initial_backoff_ms, 100);

        let mut publisher = Publisher::new(InMemoryTransport::new());
        publisher.configure(json_setup(config).with_enricher(ContextEnricher::new()));

        let message = order("order-1", 990);
        let result = publisher.publish(&message, None).await.unwrap();
        assert_eq!(result.destination, "mem://queue/billing-jobs");
        assert_eq!(result.sequence_number.as_deref(), Some("1"));

        let delivered = publisher.transport().delivered("mem://queue/billing-jobs");
        let decoded: OrderPlaced = serde_json::from_slice(&delivered[0].body).unwrap();
        assert_eq!(decoded, message);

        let attributes = &delivered[0].attributes;
        assert_eq!(
            attributes["environment"].string_value.as_deref(),
            Some("production")
        );
        assert_eq!(attributes["service"].string_value.as_deref(), Some("billing"));
    }
}
