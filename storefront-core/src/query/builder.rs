use super::operator::Operator;
use super::types::{Direction, FieldsDirective, SearchQuery, SortDirective};
use serde_json::Value;

/// Fluent API for building search queries
///
/// The builder never produces a projection holding both `select` and
/// `remove`: choosing one replaces the other.
#[derive(Debug, Clone, Default)]
pub struct SearchQueryBuilder {
    query: SearchQuery,
}

impl SearchQueryBuilder {
    /// Create a new query builder
    pub fn new() -> Self {
        Self::default()
    }

    // === Search methods ===

    /// Free-text term matched against the entity's text fields
    pub fn text(mut self, term: impl Into<String>) -> Self {
        self.query.text = Some(term.into());
        self
    }

    // === Filter methods ===

    /// Add a match operator entry for `field`
    pub fn filter(
        mut self,
        field: impl Into<String>,
        op: Operator,
        value: impl Into<Value>,
    ) -> Self {
        self.query
            .filter
            .get_or_insert_with(Default::default)
            .entry(field.into())
            .or_default()
            .insert(op.as_str().to_string(), value.into());
        self
    }

    /// Field value must be one of `values`
    pub fn any_of<V: Into<Value>>(
        self,
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.filter(field, Operator::In, values)
    }

    /// Field value must not be any of `values`
    pub fn none_of<V: Into<Value>>(
        self,
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.filter(field, Operator::Nin, values)
    }

    // === Projection methods ===

    /// Return only identity plus `fields`
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query.fields = Some(FieldsDirective {
            select: Some(fields.into_iter().map(Into::into).collect()),
            remove: None,
        });
        self
    }

    /// Return every field except `fields`
    pub fn remove<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query.fields = Some(FieldsDirective {
            select: None,
            remove: Some(fields.into_iter().map(Into::into).collect()),
        });
        self
    }

    // === Sort methods ===

    /// Append a sort key. Re-sorting by a field updates its direction in place.
    pub fn sort_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.query
            .sort
            .get_or_insert_with(SortDirective::default)
            .push(field, direction);
        self
    }

    // === Pagination methods ===

    pub fn offset(mut self, offset: i64) -> Self {
        self.query.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.query.limit = Some(limit);
        self
    }

    /// Zero-based page of `per_page` records
    pub fn page(self, page: i64, per_page: i64) -> Self {
        self.offset(page.saturating_mul(per_page)).limit(per_page)
    }

    /// Build the final query
    pub fn build(self) -> SearchQuery {
        self.query
    }
}
