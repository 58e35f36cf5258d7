//! Built-in enrichers
//!
//! Contains ContextEnricher, TimestampEnricher, and StaticAttributesEnricher.
//! They occupy the low priority tiers (10/20/30) so that custom enrichers
//! registered with the default priority run after them and win conflicts.

mod context;
mod static_attrs;
mod timestamp;

pub use self::context::ContextEnricher;
pub use self::static_attrs::StaticAttributesEnricher;
pub use self::timestamp::TimestampEnricher;
