//! JSON serializer

use async_trait::async_trait;
use bytes::Bytes;
use contracts::{SerializeError, SerializedMessage, Serializer};
use serde::Serialize;

/// Content type reported for JSON bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Serializer producing compact JSON bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl JsonSerializer {
    /// Create JSON serializer
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl<M> Serializer<M> for JsonSerializer
where
    M: Serialize + Send + Sync,
{
    async fn serialize(&self, message: &M) -> Result<SerializedMessage, SerializeError> {
        let body = serde_json::to_vec(message)
            .map_err(|error| SerializeError::with_source("json encoding failed", error))?;

        Ok(SerializedMessage {
            body: Bytes::from(body),
            content_type: JSON_CONTENT_TYPE.to_string(),
        })
    }

    fn content_type(&self) -> &str {
        JSON_CONTENT_TYPE
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[derive(Serialize)]
    struct Order {
        id: String,
        amount: u32,
    }

    #[tokio::test]
    async fn encodes_compact_json() {
        let message = Order {
            id: "order-1".to_string(),
            amount: 250,
        };

        let serialized = JsonSerializer::new().serialize(&message).await.unwrap();

        assert_eq!(serialized.content_type, JSON_CONTENT_TYPE);
        assert_eq!(serialized.body, r#"{"id":"order-1","amount":250}"#);
    }

    #[tokio::test]
    async fn unencodable_message_yields_serializer_failure() {
        // serde_json rejects maps whose keys do not encode as strings.
        let mut message: BTreeMap<Vec<u8>, &str> = BTreeMap::new();
        message.insert(vec![1], "x");

        let error = JsonSerializer::new().serialize(&message).await.unwrap_err();

        assert!(error.to_string().contains("json encoding failed"));
    }
}
