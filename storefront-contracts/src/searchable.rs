//! Core trait for entities that take part in structured search.
//!
//! The search evaluator is written once against this trait. Each entity type
//! only declares its field set and how to read a field by name.

use crate::schema::EntitySchema;
use crate::value::FieldValue;

/// Field-accessor capability for a searchable entity.
pub trait Searchable: Send + Sync {
    /// The field set this entity type exposes.
    fn schema() -> &'static EntitySchema;

    /// Identity used for deterministic tie-breaks.
    fn identity(&self) -> u64;

    /// Read a field by its schema name.
    ///
    /// Returns `None` when the record has no value for an optional field or
    /// when `name` is not part of the schema.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Whether an unprojected result may carry the record as-is.
    ///
    /// Entities holding data outside their schema return `false`, and their
    /// unprojected results are built from the schema fields instead.
    fn returns_whole_record() -> bool {
        true
    }

    /// Whether the record carries a soft-delete marker.
    fn is_deleted(&self) -> bool {
        false
    }
}
