//! Intentional query crate surface consumed by request handlers.

pub use super::builder::SearchQueryBuilder;
pub use super::envelope::{Item, ResultEnvelope};
pub use super::evaluator::QueryEvaluator;
pub use super::limits::QueryLimits;
pub use super::operator::Operator;
pub use super::types::{Direction, SearchQuery};
pub use super::validator::{QueryValidator, ValidatedQuery};
pub use crate::error::{InvalidQuery, QueryError, RecordSourceError, Violation};
pub use crate::source::{InMemorySource, RecordSource, Visibility};
