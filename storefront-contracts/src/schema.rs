//! Static field sets describing what each entity exposes to search.

use crate::value::FieldKind;

/// A field an entity exposes for filtering, sorting and projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Whether a record may lack a value for this field.
    pub optional: bool,
}

impl FieldDef {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            optional: false,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            optional: true,
        }
    }
}

/// The searchable surface of one entity type.
///
/// `fields` is ordered; projections emit fields in this order. `text_fields`
/// names the subset consulted by free-text search and must only reference
/// textual entries of `fields`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySchema {
    pub entity: &'static str,
    pub identity: &'static str,
    pub fields: &'static [FieldDef],
    pub text_fields: &'static [&'static str],
}

impl EntitySchema {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn is_identity(&self, name: &str) -> bool {
        self.identity == name
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.name)
    }

    /// Position of `name` in the declared field order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }
}
