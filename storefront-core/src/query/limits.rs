use serde::{Deserialize, Serialize};

/// Bounds applied to every search request.
///
/// `default_limit` fills in a missing `limit`; nothing is ever returned
/// unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryLimits {
    /// Page size used when a query omits `limit`
    pub default_limit: usize,

    /// Largest `limit` a query may request
    pub max_limit: usize,

    /// Maximum number of operator entries across the whole `where` tree
    pub max_predicates: usize,

    /// Maximum number of candidates in one `in`/`nin` array
    pub max_range_values: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 1000,
            max_predicates: 64,
            max_range_values: 256,
        }
    }
}
