use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use storefront_contracts::{EntitySchema, FieldValue, Searchable};

/// Which fields a result record carries.
///
/// Exactly one of include or exclude applies; there is no state holding both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Projection {
    #[default]
    All,
    /// Identity plus the named fields
    Select(Vec<&'static str>),
    /// Every field except the named ones. Never names the identity field.
    Remove(Vec<&'static str>),
}

impl Projection {
    pub fn is_all(&self) -> bool {
        matches!(self, Projection::All)
    }

    /// Schema fields emitted under this projection, in schema order.
    pub fn resolve(&self, schema: &EntitySchema) -> Vec<&'static str> {
        schema
            .field_names()
            .filter(|name| match self {
                Projection::All => true,
                Projection::Select(names) => {
                    schema.is_identity(name) || names.contains(name)
                }
                Projection::Remove(names) => !names.contains(name),
            })
            .collect()
    }

    /// Project one record onto `fields` (as returned by [`Projection::resolve`]).
    pub fn apply<T: Searchable>(record: &T, fields: &[&'static str]) -> ProjectedRecord {
        let values = fields
            .iter()
            .filter_map(|name| record.field(name).map(|value| (*name, value)))
            .collect();
        ProjectedRecord {
            identity: record.identity(),
            values,
        }
    }
}

/// A record reduced to a subset of its fields.
///
/// Only fields with a value are present. Serializes as a JSON object in
/// schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedRecord {
    identity: u64,
    values: Vec<(&'static str, FieldValue)>,
}

impl ProjectedRecord {
    pub fn identity(&self) -> u64 {
        self.identity
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for ProjectedRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use storefront_model::{Customer, CustomerID, Product, ProductID};

    fn product() -> Product {
        let now = Utc.timestamp_opt(1_700_000_000, 0).single().unwrap();
        Product::new(ProductID(1), "Kettle", "x", 10.0, 0.2, now)
    }

    #[test]
    fn select_always_includes_identity() {
        let projection = Projection::Select(vec!["price"]);
        let fields = projection.resolve(Product::schema());
        assert_eq!(fields, vec!["id", "price"]);
    }

    #[test]
    fn remove_keeps_schema_order() {
        let projection = Projection::Remove(vec!["created", "timestamp", "tax"]);
        let fields = projection.resolve(Product::schema());
        assert_eq!(fields, vec!["id", "name", "price", "brand", "photoURL"]);
    }

    #[test]
    fn projected_record_skips_absent_values() {
        let record = Projection::apply(&product(), &["id", "price", "photoURL"]);
        assert_eq!(record.field_names().collect::<Vec<_>>(), vec!["id", "price"]);
        assert_eq!(record.identity(), 1);
        assert!(!record.contains("photoURL"));
    }

    #[test]
    fn projected_record_serializes_as_object() {
        let now = Utc.timestamp_opt(0, 0).single().unwrap();
        let customer = Customer::new(CustomerID(4), "Ada", now).with_phone("555-0100");
        let fields = Projection::Select(vec!["name", "phone", "address"])
            .resolve(Customer::schema());
        let record = Projection::apply(&customer, &fields);

        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"id": 4, "name": "Ada", "phone": "555-0100"})
        );
    }
}
