//! In-memory transport
//!
//! Feature-complete local backend for tests, demos and development,
//! with injectable failure scenarios.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use contracts::{
    Destination, SendOptions, SendReceipt, SendRequest, Transport, TransportError, WireAttribute,
};
use tracing::{debug, instrument};
use uuid::Uuid;

/// Canonical address prefix of the in-memory backend family.
pub const MEMORY_ADDRESS_PREFIX: &str = "mem://";

/// In-memory transport configuration (failure scenarios can be injected).
#[derive(Debug, Default, Clone)]
pub struct MemoryTransportConfig {
    /// Canonical addresses whose sends should fail.
    pub fail_addresses: Vec<String>,
    /// Destination names whose resolution should fail.
    pub fail_resolution: Vec<String>,
}

/// A message as recorded by the in-memory backend.
#[derive(Debug, Clone)]
pub struct DeliveredMessage {
    /// Backend-assigned message id.
    pub message_id: String,
    /// Sequence number, present for queue addresses.
    pub sequence_number: Option<String>,
    /// Message body.
    pub body: Bytes,
    /// Attributes in wire representation.
    pub attributes: HashMap<String, WireAttribute>,
    /// Options the message was sent with.
    pub options: SendOptions,
}

/// In-memory message backend.
///
/// Destinations resolve to `mem://{kind}/{name}` addresses. Queue addresses
/// hand out monotonic sequence numbers; topic addresses do not order
/// messages. Delivered messages are kept per address for inspection.
pub struct InMemoryTransport {
    /// Configuration (failure scenarios can be injected).
    config: MemoryTransportConfig,
    /// Delivered messages per canonical address.
    delivered: Mutex<HashMap<String, Vec<DeliveredMessage>>>,
    /// Sequence counter for queue addresses.
    next_sequence: AtomicU64,
    /// Number of resolve calls that reached the backend.
    resolve_calls: AtomicUsize,
}

impl InMemoryTransport {
    /// Create default in-memory transport.
    pub fn new() -> Self {
        Self::with_config(MemoryTransportConfig::default())
    }

    /// Create in-memory transport with a configuration.
    pub fn with_config(config: MemoryTransportConfig) -> Self {
        Self {
            config,
            delivered: Mutex::new(HashMap::new()),
            next_sequence: AtomicU64::new(1),
            resolve_calls: AtomicUsize::new(0),
        }
    }

    /// Messages delivered to an address, in arrival order.
    pub fn delivered(&self, address: &str) -> Vec<DeliveredMessage> {
        self.delivered
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .unwrap_or_default()
    }

    /// Total number of delivered messages across all addresses.
    pub fn delivered_count(&self) -> usize {
        self.delivered
            .lock()
            .unwrap()
            .values()
            .map(Vec::len)
            .sum()
    }

    /// Addresses known to the backend.
    pub fn addresses(&self) -> Vec<String> {
        self.delivered.lock().unwrap().keys().cloned().collect()
    }

    /// Number of resolve calls that reached the backend.
    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    /// Canonical address for a destination.
    pub fn canonical_address(destination: &Destination) -> String {
        format!(
            "{MEMORY_ADDRESS_PREFIX}{}/{}",
            destination.kind, destination.value
        )
    }

    fn is_queue_address(address: &str) -> bool {
        address
            .strip_prefix(MEMORY_ADDRESS_PREFIX)
            .is_some_and(|rest| rest.starts_with("queue/"))
    }
}

impl Default for InMemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for InMemoryTransport {
    fn name(&self) -> &str {
        "memory"
    }

    fn is_canonical(&self, value: &str) -> bool {
        value.starts_with(MEMORY_ADDRESS_PREFIX)
    }

    #[instrument(name = "memory_resolve", skip(self), fields(destination = %destination))]
    async fn resolve(&self, destination: &Destination) -> Result<String, TransportError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);

        if self.config.fail_resolution.contains(&destination.value) {
            return Err(TransportError::resolution(
                &destination.value,
                "injected resolution failure",
            ));
        }

        let address = Self::canonical_address(destination);
        // Lookup-or-create: first resolution registers the destination.
        self.delivered
            .lock()
            .unwrap()
            .entry(address.clone())
            .or_default();

        debug!(address = %address, "destination resolved");
        Ok(address)
    }

    #[instrument(name = "memory_send", skip(self, request), fields(address = %request.address))]
    async fn send(&self, request: SendRequest) -> Result<SendReceipt, TransportError> {
        if self.config.fail_addresses.contains(&request.address) {
            return Err(TransportError::rejected("injected send failure"));
        }

        let sequence_number = Self::is_queue_address(&request.address)
            .then(|| self.next_sequence.fetch_add(1, Ordering::SeqCst).to_string());

        let receipt = SendReceipt {
            message_id: Uuid::new_v4().to_string(),
            sequence_number,
        };

        let message = DeliveredMessage {
            message_id: receipt.message_id.clone(),
            sequence_number: receipt.sequence_number.clone(),
            body: request.body,
            attributes: request.attributes,
            options: request.options,
        };

        self.delivered
            .lock()
            .unwrap()
            .entry(request.address)
            .or_default()
            .push(message);

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(address: &str, body: &str) -> SendRequest {
        SendRequest {
            address: address.to_string(),
            body: Bytes::copy_from_slice(body.as_bytes()),
            attributes: HashMap::new(),
            options: SendOptions::default(),
        }
    }

    #[tokio::test]
    async fn resolve_registers_and_is_idempotent() {
        let transport = InMemoryTransport::new();
        let destination = Destination::topic("orders");

        let first = transport.resolve(&destination).await.unwrap();
        let second = transport.resolve(&destination).await.unwrap();

        assert_eq!(first, "mem://topic/orders");
        assert_eq!(first, second);
        assert_eq!(transport.resolve_calls(), 2);
        assert!(transport.addresses().contains(&first));
    }

    #[tokio::test]
    async fn send_records_the_message() {
        let transport = InMemoryTransport::new();

        let receipt = transport
            .send(request("mem://topic/orders", "payload"))
            .await
            .unwrap();

        let delivered = transport.delivered("mem://topic/orders");
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].message_id, receipt.message_id);
        assert_eq!(delivered[0].body, "payload");
    }

    #[tokio::test]
    async fn queue_addresses_get_monotonic_sequence_numbers() {
        let transport = InMemoryTransport::new();

        let first = transport
            .send(request("mem://queue/jobs", "a"))
            .await
            .unwrap();
        let second = transport
            .send(request("mem://queue/jobs", "b"))
            .await
            .unwrap();
        let topic = transport
            .send(request("mem://topic/orders", "c"))
            .await
            .unwrap();

        assert_eq!(first.sequence_number.as_deref(), Some("1"));
        assert_eq!(second.sequence_number.as_deref(), Some("2"));
        assert!(topic.sequence_number.is_none());
    }

    #[tokio::test]
    async fn injected_failures_are_reported() {
        let transport = InMemoryTransport::with_config(MemoryTransportConfig {
            fail_addresses: vec!["mem://topic/orders".to_string()],
            fail_resolution: vec!["broken".to_string()],
        });

        let send_error = transport
            .send(request("mem://topic/orders", "payload"))
            .await
            .unwrap_err();
        let resolve_error = transport
            .resolve(&Destination::topic("broken"))
            .await
            .unwrap_err();

        assert!(matches!(send_error, TransportError::Rejected(_)));
        assert!(matches!(resolve_error, TransportError::Resolution { .. }));
        assert_eq!(transport.delivered_count(), 0);
    }
}
