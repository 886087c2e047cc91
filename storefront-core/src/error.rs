use std::fmt;
use thiserror::Error;

/// One offending (field, rule) pair found while validating a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub rule: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`: {}", self.field, self.rule)
    }
}

/// A search request rejected before evaluation.
///
/// Carries every violation found, in a deterministic order, so identical bad
/// input always produces an identical error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct InvalidQuery {
    pub violations: Vec<Violation>,
}

impl InvalidQuery {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn single(field: impl Into<String>, rule: impl Into<String>) -> Self {
        Self::new(vec![Violation::new(field, rule)])
    }

    /// Fields named by at least one violation, in report order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|violation| violation.field.as_str())
    }
}

impl fmt::Display for InvalidQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid query: ")?;
        for (index, violation) in self.violations.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

/// Failure reported by a record source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordSourceError {
    #[error("record source unavailable: {0}")]
    Unavailable(String),

    #[error("record source timed out")]
    Timeout,

    #[error("{entity} id {id} appears more than once")]
    DuplicateIdentity { entity: &'static str, id: u64 },
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    InvalidQuery(#[from] InvalidQuery),

    /// Storage details stay behind `source()`; the message is generic.
    #[error("record source unavailable")]
    RecordSource(#[from] RecordSourceError),
}

impl QueryError {
    /// Whether the caller sent a bad request, as opposed to a server-side
    /// failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, QueryError::InvalidQuery(_))
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;
