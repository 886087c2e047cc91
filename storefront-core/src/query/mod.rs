pub mod builder;
pub mod envelope;
pub mod evaluator;
pub mod limits;
pub mod operator;
pub mod prelude;
pub mod projection;
pub mod types;
pub mod validator;

pub use builder::SearchQueryBuilder;
pub use envelope::{Item, ResultEnvelope};
pub use evaluator::QueryEvaluator;
pub use limits::QueryLimits;
pub use operator::{FieldPredicate, Operator, OperatorFamily, Predicate, UnknownOperator};
pub use projection::{ProjectedRecord, Projection};
pub use types::*;
pub use validator::{QueryValidator, SortKey, ValidatedQuery, Window};
