//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Error Model
//! - Callers see three classes: configuration / serialization / publish
//! - Collaborator seams (transport, serializer, enricher) use narrower types
//!   that the publisher classifies at its boundary

mod attribute;
mod config;
mod context;
mod destination;
mod enricher;
mod error;
mod options;
mod result;
mod serializer;
mod transport;

pub use attribute::*;
pub use config::*;
pub use context::{ContextResolver, PublishContext};
pub use destination::*;
pub use enricher::{Enricher, DEFAULT_ENRICHER_PRIORITY};
pub use error::*;
pub use options::*;
pub use result::*;
pub use serializer::{SerializedMessage, Serializer};
pub use transport::*;
