//! Transport seam.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::{Destination, TransportError, WireAttribute};

/// Largest chunk a backend accepts in one batch window. Transports override
/// [`Transport::max_batch_size`] when their backend differs.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 10;

/// Backend-specific per-send options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SendOptions {
    /// Deduplication id, for backends that drop duplicates.
    pub deduplication_id: Option<String>,
    /// Grouping id, for backends that order messages within a group.
    pub group_id: Option<String>,
    /// Delivery delay.
    pub delay: Option<Duration>,
}

/// Everything a transport needs to put one message on the wire.
#[derive(Debug, Clone)]
pub struct SendRequest {
    /// Canonical destination address.
    pub address: String,
    /// Serialized message body.
    pub body: Bytes,
    /// Attributes in wire representation.
    pub attributes: HashMap<String, WireAttribute>,
    /// Backend-specific options.
    pub options: SendOptions,
}

/// Backend acknowledgment for one sent message.
#[derive(Debug, Clone)]
pub struct SendReceipt {
    /// Backend-assigned message id.
    pub message_id: String,
    /// Sequence number, when the destination orders messages.
    pub sequence_number: Option<String>,
}

/// Message backend seam: address heuristics, name resolution and the send
/// primitive.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Transport name, used in logs and metrics.
    fn name(&self) -> &str;

    /// Whether the value is already a canonical address for this backend
    /// family. Canonical destinations are used as-is, without resolution.
    fn is_canonical(&self, value: &str) -> bool;

    /// Resolve a destination name to its canonical address.
    ///
    /// Lookup-or-create: resolving a name that does not exist yet registers
    /// it, and resolving it again returns the same address.
    ///
    /// # Errors
    ///
    /// Fails when the backend cannot look up or create the destination.
    async fn resolve(&self, destination: &Destination) -> Result<String, TransportError>;

    /// Put one message on the wire.
    ///
    /// # Errors
    ///
    /// Fails when the backend rejects or cannot accept the message.
    async fn send(&self, request: SendRequest) -> Result<SendReceipt, TransportError>;

    /// Backend chunk size for batch dispatch. A property of the backend, not
    /// a user-facing knob.
    fn max_batch_size(&self) -> usize {
        DEFAULT_MAX_BATCH_SIZE
    }
}
