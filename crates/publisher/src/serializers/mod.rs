//! Built-in serializers

mod json;

pub use self::json::{JsonSerializer, JSON_CONTENT_TYPE};
