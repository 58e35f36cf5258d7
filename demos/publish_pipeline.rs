//! Publish Pipeline Example
//!
//! Loads a publisher configuration, wires the enrichment pipeline against
//! the in-memory backend, publishes a single message and a batch, and
//! prints the collected metrics.
//!
//! Run with: cargo run --bin publish_pipeline [config_path]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use config_loader::ConfigLoader;
use contracts::{AttributeValue, Destination, PublishOptions, PublisherConfig};
use observability::{
    record_batch_result, record_publish_failure, record_publish_latency_ms, record_publish_result,
    LogFormat, ObservabilityConfig, PublishStatsAggregator,
};
use publisher::{ContextEnricher, JsonSerializer, Publisher, PublisherSetup, TimestampEnricher};
use serde::Serialize;
use tracing::{info, warn};
use transports::InMemoryTransport;

#[derive(Debug, Clone, Serialize)]
struct OrderPlaced {
    order_id: String,
    amount_cents: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Console logs only; a demo run has no Prometheus scraper.
    observability::init_with_config(ObservabilityConfig {
        log_format: LogFormat::Pretty,
        metrics_port: None,
        default_log_level: "info".to_string(),
    })?;

    info!("Starting Publish Pipeline Demo");

    // ==== Stage 1: Load configuration ====
    let config = load_config()?;
    info!(destination = %config.destination, "Configuration loaded");

    // ==== Stage 2: Configure the publisher ====
    let mut publisher = Publisher::new(InMemoryTransport::new());
    publisher.configure(
        PublisherSetup::new(config, Arc::new(JsonSerializer::new()))
            .with_enricher(ContextEnricher::new())
            .with_enricher(TimestampEnricher::new()),
    );
    info!(enrichers = publisher.enrichers().len(), "Publisher configured");

    let mut stats = PublishStatsAggregator::new();

    // ==== Stage 3: Publish a single message ====
    let message = OrderPlaced {
        order_id: "order-001".to_string(),
        amount_cents: 2500,
    };
    let options = PublishOptions::new()
        .with_attribute("priority", AttributeValue::string("high"))
        .with_deduplication_id("order-001");

    let started = Instant::now();
    let outcome = publisher.publish(&message, Some(options)).await;
    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

    record_publish_latency_ms(latency_ms);
    stats.record_latency_ms(latency_ms);
    stats.update_single(&outcome);

    match &outcome {
        Ok(result) => {
            record_publish_result(result);
            info!(
                message_id = %result.message_id,
                destination = %result.destination,
                sequence = result.sequence_number.as_deref().unwrap_or("-"),
                "Message published"
            );
        }
        Err(error) => {
            record_publish_failure(error);
            warn!(class = error.class(), error = %error, "Publish failed");
        }
    }

    // ==== Stage 4: Publish a batch ====
    let orders: Vec<OrderPlaced> = (2..=26)
        .map(|number| OrderPlaced {
            order_id: format!("order-{number:03}"),
            amount_cents: number * 199,
        })
        .collect();

    info!(messages = orders.len(), "Dispatching batch");
    let batch = publisher.publish_batch(&orders, None).await;

    record_batch_result(&batch);
    stats.update_batch(&batch);
    info!(
        total = batch.total_count,
        succeeded = batch.success_count(),
        failed = batch.failure_count(),
        "Batch dispatched"
    );
    for failure in &batch.failed {
        warn!(
            index = failure.index,
            class = failure.error.class(),
            error = %failure.error,
            "Batch entry failed"
        );
    }

    // ==== Stage 5: Inspect the backend and the counters ====
    let transport = publisher.transport();
    for address in transport.addresses() {
        info!(
            address = %address,
            delivered = transport.delivered(&address).len(),
            "Backend mailbox"
        );
    }

    let snapshot = publisher.metrics().snapshot();
    info!(
        published = snapshot.publish_count,
        failed = snapshot.failure_count,
        batches = snapshot.batch_count,
        "Publisher counters"
    );

    println!("{}", stats.summary());

    info!("Publish Pipeline Demo finished");
    Ok(())
}

fn load_config() -> Result<PublisherConfig, Box<dyn std::error::Error>> {
    match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => {
            info!(path = %path.display(), "Loading configuration file");
            Ok(ConfigLoader::load_from_path(path.as_path())?)
        }
        None => Ok(PublisherConfig::new(Destination::queue("orders"))
            .with_environment("demo")
            .with_default_attribute("service", "order-api")),
    }
}
