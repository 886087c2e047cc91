//! Structured search for the Storefront back end.
//!
//! A request arrives as a [`SearchQuery`], is checked once by
//! [`QueryValidator`] against the target entity's schema, and is run by
//! [`QueryEvaluator`] against a [`RecordSource`] snapshot. The answer is a
//! [`ResultEnvelope`] carrying the page of items, the total match count and
//! the effective window.
#![allow(missing_docs)]

pub mod error;
pub mod query;
pub mod source;

pub use error::{InvalidQuery, QueryError, RecordSourceError, Result, Violation};
pub use query::{
    Direction, Item, Operator, Predicate, ProjectedRecord, Projection, QueryEvaluator,
    QueryLimits, QueryValidator, ResultEnvelope, SearchQuery, SearchQueryBuilder,
    ValidatedQuery, Window,
};
pub use source::{InMemorySource, RecordSource, SoftDelete, Visibility};

pub use storefront_contracts as contracts;
pub use storefront_model as model;
