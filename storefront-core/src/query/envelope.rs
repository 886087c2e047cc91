use super::projection::ProjectedRecord;
use super::validator::Window;
use serde::Serialize;
use storefront_contracts::Searchable;

/// A result row: the whole entity, or a projection of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Item<T> {
    Full(T),
    Projected(ProjectedRecord),
}

impl<T: Searchable> Item<T> {
    pub fn identity(&self) -> u64 {
        match self {
            Item::Full(record) => record.identity(),
            Item::Projected(record) => record.identity(),
        }
    }
}

impl<T> Item<T> {
    pub fn as_full(&self) -> Option<&T> {
        match self {
            Item::Full(record) => Some(record),
            Item::Projected(_) => None,
        }
    }

    pub fn as_projected(&self) -> Option<&ProjectedRecord> {
        match self {
            Item::Projected(record) => Some(record),
            Item::Full(_) => None,
        }
    }
}

/// Uniform paginated response.
///
/// `total` counts every match before the window was applied; `offset` and
/// `limit` echo the effective window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEnvelope<T> {
    pub items: Vec<Item<T>>,
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
}

impl<T> ResultEnvelope<T> {
    pub fn new(items: Vec<Item<T>>, total: usize, window: Window) -> Self {
        Self {
            items,
            total,
            offset: window.offset,
            limit: window.limit,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether matches exist past the end of this page.
    pub fn has_more(&self) -> bool {
        self.offset.saturating_add(self.items.len()) < self.total
    }
}

impl<T: Searchable> ResultEnvelope<T> {
    /// Identities of the returned items, in result order.
    pub fn identities(&self) -> Vec<u64> {
        self.items.iter().map(Item::identity).collect()
    }
}
