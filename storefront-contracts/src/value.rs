//! Runtime field values extracted from entities for filtering and sorting.

use chrono::{DateTime, NaiveDate, Utc};
use ordered_float::OrderedFloat;
use std::fmt;

/// Declared type of a searchable field.
///
/// The kind decides which operand literals a query may compare the field
/// against and whether ordering or pattern operators apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Integer,
    /// Identities and references to other entities.
    Unsigned,
    Float,
    Text,
    Bool,
    Timestamp,
    Date,
    /// Text restricted to a fixed set of options.
    Enum(&'static [&'static str]),
}

impl FieldKind {
    /// Whether `gt`/`gte`/`lt`/`lte` (and negations) are meaningful.
    pub fn is_orderable(&self) -> bool {
        !matches!(self, FieldKind::Bool)
    }

    /// Whether `like`/`nlike` apply.
    pub fn is_textual(&self) -> bool {
        matches!(self, FieldKind::Text | FieldKind::Enum(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Integer => "integer",
            FieldKind::Unsigned => "unsigned",
            FieldKind::Float => "float",
            FieldKind::Text => "text",
            FieldKind::Bool => "bool",
            FieldKind::Timestamp => "timestamp",
            FieldKind::Date => "date",
            FieldKind::Enum(_) => "enum",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Enum(options) => write!(f, "enum({})", options.join("|")),
            other => f.write_str(other.name()),
        }
    }
}

/// A single scalar read from an entity field or supplied as a query operand.
///
/// Values of the same variant order naturally (numbers numerically, text
/// lexicographically by byte, timestamps chronologically). Comparisons across
/// variants are never produced by validated queries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldValue {
    Integer(i64),
    Unsigned(u64),
    Float(OrderedFloat<f64>),
    Text(String),
    Bool(bool),
    Timestamp(DateTime<Utc>),
    Date(NaiveDate),
}

impl FieldValue {
    pub fn float(value: f64) -> Self {
        FieldValue::Float(OrderedFloat(value))
    }

    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(value) => Some(*value as f64),
            FieldValue::Unsigned(value) => Some(*value as f64),
            FieldValue::Float(value) => Some(value.0),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(value) => write!(f, "{value}"),
            FieldValue::Unsigned(value) => write!(f, "{value}"),
            FieldValue::Float(value) => write!(f, "{}", value.0),
            FieldValue::Text(value) => write!(f, "{value:?}"),
            FieldValue::Bool(value) => write!(f, "{value}"),
            FieldValue::Timestamp(value) => write!(f, "{}", value.to_rfc3339()),
            FieldValue::Date(value) => write!(f, "{}", value.format("%Y-%m-%d")),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Unsigned(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            FieldValue::Integer(value) => serializer.serialize_i64(*value),
            FieldValue::Unsigned(value) => serializer.serialize_u64(*value),
            FieldValue::Float(value) => serializer.serialize_f64(value.0),
            FieldValue::Text(value) => serializer.serialize_str(value),
            FieldValue::Bool(value) => serializer.serialize_bool(*value),
            FieldValue::Timestamp(value) => {
                serde::Serialize::serialize(value, serializer)
            }
            FieldValue::Date(value) => serde::Serialize::serialize(value, serializer),
        }
    }
}
