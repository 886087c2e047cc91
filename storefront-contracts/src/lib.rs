//! Trait surfaces that describe how Storefront entities take part in search.

pub mod impls;
pub mod schema;
pub mod searchable;
pub mod value;

/// Frequently used trait combinators for search and storage crates.
pub mod prelude {
    pub use super::schema::{EntitySchema, FieldDef};
    pub use super::searchable::Searchable;
    pub use super::value::{FieldKind, FieldValue};
}

pub use schema::{EntitySchema, FieldDef};
pub use searchable::Searchable;
pub use value::{FieldKind, FieldValue};
