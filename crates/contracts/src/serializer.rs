//! Serializer seam.

use async_trait::async_trait;
use bytes::Bytes;

use crate::SerializeError;

/// A serialized message body plus the content type it was encoded with.
#[derive(Debug, Clone)]
pub struct SerializedMessage {
    /// Encoded body.
    pub body: Bytes,
    /// Content type of the body. The publisher injects it as the
    /// `contentType` attribute on every message.
    pub content_type: String,
}

/// Message body encoder.
#[async_trait]
pub trait Serializer<M>: Send + Sync {
    /// Encode the message.
    ///
    /// # Errors
    ///
    /// A failure aborts the publish call before any network I/O happens.
    async fn serialize(&self, message: &M) -> Result<SerializedMessage, SerializeError>;

    /// Content type this serializer produces.
    fn content_type(&self) -> &str;
}
