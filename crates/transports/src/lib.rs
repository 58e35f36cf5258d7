//! # Transports
//!
//! Message backend implementations of the [`contracts::Transport`] seam.
//!
//! Currently ships the in-memory backend. Real backends plug in by
//! implementing the same trait in their own module.

pub mod memory;

pub use contracts::{Transport, TransportError};
pub use memory::{
    DeliveredMessage, InMemoryTransport, MemoryTransportConfig, MEMORY_ADDRESS_PREFIX,
};
