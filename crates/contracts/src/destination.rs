//! Publish destinations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Destination flavor on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationKind {
    /// Fan-out topic.
    Topic,
    /// Point-to-point queue.
    Queue,
}

impl DestinationKind {
    /// Lowercase name, stable for addresses and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Topic => "topic",
            Self::Queue => "queue",
        }
    }
}

impl fmt::Display for DestinationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where messages go: either a short name the transport resolves to a
/// canonical address, or an address that is already canonical (recognized by
/// the transport's prefix heuristic and used as-is, without any lookup).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    /// Topic or queue.
    pub kind: DestinationKind,
    /// Short name or canonical address.
    pub value: String,
}

impl Destination {
    /// Topic destination.
    pub fn topic(value: impl Into<String>) -> Self {
        Self {
            kind: DestinationKind::Topic,
            value: value.into(),
        }
    }

    /// Queue destination.
    pub fn queue(value: impl Into<String>) -> Self {
        Self {
            kind: DestinationKind::Queue,
            value: value.into(),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.value)
    }
}
