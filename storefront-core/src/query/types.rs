//! Wire form of a search request.
//!
//! These types mirror the JSON a routing layer receives. They are deliberately
//! loose (operands are raw JSON values, operators are strings) so that every
//! problem is reported by the validator as a [`Violation`](crate::Violation)
//! instead of surfacing as an opaque deserialization failure.

use crate::error::InvalidQuery;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Operator mapping for one field: operator name to operand.
pub type OperatorMap = BTreeMap<String, Value>;

/// Search request as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Filter tree: field name to operator mapping.
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<BTreeMap<String, OperatorMap>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldsDirective>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortDirective>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl SearchQuery {
    /// Parse a request body.
    ///
    /// A body that is not a well-formed query object is reported as an
    /// [`InvalidQuery`] against the `query` pseudo-field.
    pub fn from_json(body: &str) -> Result<Self, InvalidQuery> {
        serde_json::from_str(body)
            .map_err(|err| InvalidQuery::single("query", format!("malformed query: {err}")))
    }

    pub fn from_value(value: Value) -> Result<Self, InvalidQuery> {
        serde_json::from_value(value)
            .map_err(|err| InvalidQuery::single("query", format!("malformed query: {err}")))
    }

    /// The free-text term, or `None` when absent or whitespace-only.
    pub fn text_term(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

/// Projection directive as sent on the wire.
///
/// Both keys may be present here; the validator rejects that combination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldsDirective {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove: Option<Vec<String>>,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    /// Wire value: `1` ascending, `-1` descending.
    pub fn as_i64(self) -> i64 {
        match self {
            Direction::Ascending => 1,
            Direction::Descending => -1,
        }
    }

    pub fn from_wire(value: &Value) -> Option<Self> {
        match value.as_i64() {
            Some(1) => Some(Direction::Ascending),
            Some(-1) => Some(Direction::Descending),
            _ => None,
        }
    }
}

/// Ordered sort directive, primary key first.
///
/// JSON objects are unordered maps in most libraries; this type keeps the
/// keys in the order they appear in the request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortDirective(pub Vec<(String, Value)>);

impl SortDirective {
    pub fn push(&mut self, field: impl Into<String>, direction: Direction) {
        let field = field.into();
        let value = Value::from(direction.as_i64());
        match self.0.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = value,
            None => self.0.push((field, value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(field, value)| (field.as_str(), value))
    }
}

impl Serialize for SortDirective {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, direction) in &self.0 {
            map.serialize_entry(field, direction)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SortDirective {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = SortDirective;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to sort directions")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((field, direction)) = access.next_entry::<String, Value>()? {
                    entries.push((field, direction));
                }
                Ok(SortDirective(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sort_keeps_declaration_order() {
        let query = SearchQuery::from_json(r#"{"sort": {"price": -1, "brand": 1, "id": 1}}"#)
            .expect("valid json");
        let sort = query.sort.expect("sort present");
        let fields: Vec<&str> = sort.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, vec!["price", "brand", "id"]);
    }

    #[test]
    fn sort_serializes_in_declaration_order() {
        let mut sort = SortDirective::default();
        sort.push("price", Direction::Descending);
        sort.push("brand", Direction::Ascending);
        sort.push("price", Direction::Ascending);

        let json = serde_json::to_string(&sort).expect("serialize");
        assert_eq!(json, r#"{"price":1,"brand":1}"#);
    }

    #[test]
    fn whitespace_text_is_treated_as_absent() {
        let query = SearchQuery {
            text: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(query.text_term(), None);

        let query = SearchQuery {
            text: Some("  acme ".into()),
            ..Default::default()
        };
        assert_eq!(query.text_term(), Some("acme"));
    }

    #[test]
    fn malformed_body_is_an_invalid_query() {
        let err = SearchQuery::from_json(r#"{"limit": "ten"}"#).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].field, "query");
    }
}
