//! Typed message attributes and their wire representation.

use std::collections::HashMap;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Name of the attribute carrying the serializer's content type.
///
/// The publisher injects this after serialization on every message. It is
/// authoritative: a same-named attribute supplied by an enricher or by the
/// caller is always overwritten.
pub const CONTENT_TYPE_ATTRIBUTE: &str = "contentType";

/// Data type tag of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Number,
    Binary,
}

/// A typed attribute value.
///
/// The variant carries the representation its type tag requires, so a value
/// can never disagree with its declared type.
///
/// ```
/// use contracts::{AttributeType, AttributeValue};
///
/// let value = AttributeValue::number(42);
/// assert_eq!(value.data_type(), AttributeType::Number);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// UTF-8 text.
    String(String),
    /// Numeric value, kept in its decimal string form.
    Number(String),
    /// Raw bytes.
    Binary(Bytes),
}

impl AttributeValue {
    /// String attribute.
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Number attribute from anything with a decimal rendering.
    pub fn number(value: impl ToString) -> Self {
        Self::Number(value.to_string())
    }

    /// Binary attribute.
    pub fn binary(value: impl Into<Bytes>) -> Self {
        Self::Binary(value.into())
    }

    /// Type tag of this value.
    pub fn data_type(&self) -> AttributeType {
        match self {
            Self::String(_) => AttributeType::String,
            Self::Number(_) => AttributeType::Number,
            Self::Binary(_) => AttributeType::Binary,
        }
    }

    /// Wire representation of this value.
    ///
    /// String and Number travel in the string slot (Number keeps its decimal
    /// string form), Binary travels in the binary slot.
    pub fn to_wire(&self) -> WireAttribute {
        match self {
            Self::String(value) => WireAttribute {
                data_type: AttributeType::String,
                string_value: Some(value.clone()),
                binary_value: None,
            },
            Self::Number(value) => WireAttribute {
                data_type: AttributeType::Number,
                string_value: Some(value.clone()),
                binary_value: None,
            },
            Self::Binary(value) => WireAttribute {
                data_type: AttributeType::Binary,
                string_value: None,
                binary_value: Some(value.clone()),
            },
        }
    }
}

/// Attribute map attached to a message. Keys are unique; merging is
/// last-writer-wins.
pub type AttributeSet = HashMap<String, AttributeValue>;

/// An attribute as handed to a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct WireAttribute {
    /// Declared data type.
    pub data_type: AttributeType,
    /// Set for `String` and `Number` values.
    pub string_value: Option<String>,
    /// Set for `Binary` values.
    pub binary_value: Option<Bytes>,
}

/// Convert a full attribute set to its wire representation.
pub fn to_wire_attributes(attributes: &AttributeSet) -> HashMap<String, WireAttribute> {
    attributes
        .iter()
        .map(|(name, value)| (name.clone(), value.to_wire()))
        .collect()
}
