//! Closed operator set and typed predicates.
//!
//! `like`/`nlike` are case-insensitive substring containment. A record with
//! no value for the field never satisfies a positive operator and always
//! satisfies its negation.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use storefront_contracts::FieldValue;

/// Operand shape an operator expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorFamily {
    /// Single scalar operand
    Match,
    /// Array of candidate values
    Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    Eq,
    Neq,
    Gt,
    Ngt,
    Gte,
    Ngte,
    Lt,
    Nlt,
    Lte,
    Nlte,
    Like,
    Nlike,
    In,
    Nin,
}

impl Operator {
    pub fn all() -> &'static [Operator] {
        use Operator::*;
        &[
            Eq, Neq, Gt, Ngt, Gte, Ngte, Lt, Nlt, Lte, Nlte, Like, Nlike, In, Nin,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::Gt => "gt",
            Operator::Ngt => "ngt",
            Operator::Gte => "gte",
            Operator::Ngte => "ngte",
            Operator::Lt => "lt",
            Operator::Nlt => "nlt",
            Operator::Lte => "lte",
            Operator::Nlte => "nlte",
            Operator::Like => "like",
            Operator::Nlike => "nlike",
            Operator::In => "in",
            Operator::Nin => "nin",
        }
    }

    pub fn family(self) -> OperatorFamily {
        match self {
            Operator::In | Operator::Nin => OperatorFamily::Range,
            _ => OperatorFamily::Match,
        }
    }

    /// Whether the operator compares by ordering rather than equality.
    pub fn is_ordering(self) -> bool {
        matches!(
            self,
            Operator::Gt
                | Operator::Ngt
                | Operator::Gte
                | Operator::Ngte
                | Operator::Lt
                | Operator::Nlt
                | Operator::Lte
                | Operator::Nlte
        )
    }

    pub fn is_pattern(self) -> bool {
        matches!(self, Operator::Like | Operator::Nlike)
    }

    pub fn is_negated(self) -> bool {
        matches!(
            self,
            Operator::Neq
                | Operator::Ngt
                | Operator::Ngte
                | Operator::Nlt
                | Operator::Nlte
                | Operator::Nlike
                | Operator::Nin
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperator(pub String);

impl fmt::Display for UnknownOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown operator `{}`", self.0)
    }
}

impl std::error::Error for UnknownOperator {}

impl FromStr for Operator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::all()
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnknownOperator(s.to_string()))
    }
}

/// A validated, type-consistent comparison against one field.
///
/// `Like`/`Nlike` hold the needle already lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Eq(FieldValue),
    Neq(FieldValue),
    Gt(FieldValue),
    Ngt(FieldValue),
    Gte(FieldValue),
    Ngte(FieldValue),
    Lt(FieldValue),
    Nlt(FieldValue),
    Lte(FieldValue),
    Nlte(FieldValue),
    Like(String),
    Nlike(String),
    In(Vec<FieldValue>),
    Nin(Vec<FieldValue>),
}

impl Predicate {
    /// Build a match predicate from an already-coerced scalar.
    ///
    /// Returns `None` for range operators, which need [`Predicate::range`].
    pub fn scalar(op: Operator, operand: FieldValue) -> Option<Self> {
        let predicate = match op {
            Operator::Eq => Predicate::Eq(operand),
            Operator::Neq => Predicate::Neq(operand),
            Operator::Gt => Predicate::Gt(operand),
            Operator::Ngt => Predicate::Ngt(operand),
            Operator::Gte => Predicate::Gte(operand),
            Operator::Ngte => Predicate::Ngte(operand),
            Operator::Lt => Predicate::Lt(operand),
            Operator::Nlt => Predicate::Nlt(operand),
            Operator::Lte => Predicate::Lte(operand),
            Operator::Nlte => Predicate::Nlte(operand),
            Operator::Like | Operator::Nlike => {
                let needle = operand.as_text()?.to_lowercase();
                if op == Operator::Like {
                    Predicate::Like(needle)
                } else {
                    Predicate::Nlike(needle)
                }
            }
            Operator::In | Operator::Nin => return None,
        };
        Some(predicate)
    }

    pub fn range(op: Operator, candidates: Vec<FieldValue>) -> Option<Self> {
        match op {
            Operator::In => Some(Predicate::In(candidates)),
            Operator::Nin => Some(Predicate::Nin(candidates)),
            _ => None,
        }
    }

    pub fn operator(&self) -> Operator {
        match self {
            Predicate::Eq(_) => Operator::Eq,
            Predicate::Neq(_) => Operator::Neq,
            Predicate::Gt(_) => Operator::Gt,
            Predicate::Ngt(_) => Operator::Ngt,
            Predicate::Gte(_) => Operator::Gte,
            Predicate::Ngte(_) => Operator::Ngte,
            Predicate::Lt(_) => Operator::Lt,
            Predicate::Nlt(_) => Operator::Nlt,
            Predicate::Lte(_) => Operator::Lte,
            Predicate::Nlte(_) => Operator::Nlte,
            Predicate::Like(_) => Operator::Like,
            Predicate::Nlike(_) => Operator::Nlike,
            Predicate::In(_) => Operator::In,
            Predicate::Nin(_) => Operator::Nin,
        }
    }

    /// Test a field value. `None` means the record has no value.
    pub fn matches(&self, value: Option<&FieldValue>) -> bool {
        match self {
            Predicate::Eq(operand) => equals(value, operand),
            Predicate::Neq(operand) => !equals(value, operand),
            Predicate::Gt(operand) => ordered(value, operand, Ordering::is_gt),
            Predicate::Ngt(operand) => !ordered(value, operand, Ordering::is_gt),
            Predicate::Gte(operand) => ordered(value, operand, Ordering::is_ge),
            Predicate::Ngte(operand) => !ordered(value, operand, Ordering::is_ge),
            Predicate::Lt(operand) => ordered(value, operand, Ordering::is_lt),
            Predicate::Nlt(operand) => !ordered(value, operand, Ordering::is_lt),
            Predicate::Lte(operand) => ordered(value, operand, Ordering::is_le),
            Predicate::Nlte(operand) => !ordered(value, operand, Ordering::is_le),
            Predicate::Like(needle) => contains(value, needle),
            Predicate::Nlike(needle) => !contains(value, needle),
            Predicate::In(candidates) => member(value, candidates),
            Predicate::Nin(candidates) => !member(value, candidates),
        }
    }
}

fn equals(value: Option<&FieldValue>, operand: &FieldValue) -> bool {
    value.is_some_and(|value| value == operand)
}

fn ordered(
    value: Option<&FieldValue>,
    operand: &FieldValue,
    accept: fn(Ordering) -> bool,
) -> bool {
    value.is_some_and(|value| accept(value.cmp(operand)))
}

fn contains(value: Option<&FieldValue>, needle: &str) -> bool {
    value
        .and_then(FieldValue::as_text)
        .is_some_and(|text| text.to_lowercase().contains(needle))
}

fn member(value: Option<&FieldValue>, candidates: &[FieldValue]) -> bool {
    value.is_some_and(|value| candidates.contains(value))
}

/// A predicate bound to a schema field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPredicate {
    pub field: &'static str,
    pub predicate: Predicate,
}

impl FieldPredicate {
    pub fn new(field: &'static str, predicate: Predicate) -> Self {
        Self { field, predicate }
    }
}
