//! Checks a [`SearchQuery`] against an entity schema and produces the typed
//! [`ValidatedQuery`] the evaluator consumes.
//!
//! Violations are collected, not short-circuited. Report order is fixed:
//! `where` fields in name order (operators in name order within a field),
//! the complexity guard, the projection directive, sort keys in declaration
//! order, then the pagination window.

use super::limits::QueryLimits;
use super::operator::{FieldPredicate, Operator, OperatorFamily, Predicate};
use super::projection::Projection;
use super::types::{Direction, FieldsDirective, OperatorMap, SearchQuery, SortDirective};
use crate::error::{InvalidQuery, Violation};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use storefront_contracts::{EntitySchema, FieldDef, FieldKind, FieldValue, Searchable};
use tracing::{debug, warn};

/// One sort key, resolved against the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: &'static str,
    pub direction: Direction,
}

/// Effective pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: usize,
    pub limit: usize,
}

/// A query proven legal for entity type `T`.
///
/// Only [`QueryValidator::validate`] constructs one, so the evaluator never
/// sees an unknown field or a type-inconsistent operand.
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T> {
    text: Option<String>,
    predicates: Vec<FieldPredicate>,
    projection: Projection,
    sort: Vec<SortKey>,
    window: Window,
    _entity: PhantomData<fn() -> T>,
}

impl<T> ValidatedQuery<T> {
    /// Lowercased free-text needle.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn predicates(&self) -> &[FieldPredicate] {
        &self.predicates
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn sort(&self) -> &[SortKey] {
        &self.sort
    }

    pub fn window(&self) -> Window {
        self.window
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryValidator {
    limits: QueryLimits,
}

impl QueryValidator {
    pub fn new(limits: QueryLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &QueryLimits {
        &self.limits
    }

    pub fn validate<T: Searchable>(
        &self,
        query: &SearchQuery,
    ) -> Result<ValidatedQuery<T>, InvalidQuery> {
        let schema = T::schema();
        let mut violations = Vec::new();

        let predicates = match &query.filter {
            Some(filter) => self.check_filter(schema, filter, &mut violations),
            None => Vec::new(),
        };
        let projection = match &query.fields {
            Some(fields) => check_projection(schema, fields, &mut violations),
            None => Projection::All,
        };
        let sort = match &query.sort {
            Some(sort) => check_sort(schema, sort, &mut violations),
            None => Vec::new(),
        };
        let window = self.check_window(query.offset, query.limit, &mut violations);

        if !violations.is_empty() {
            warn!(
                "Rejected {} query with {} violation(s)",
                schema.entity,
                violations.len()
            );
            return Err(InvalidQuery::new(violations));
        }

        debug!(
            "Validated {} query: predicates={}, sort_keys={}, offset={}, limit={}",
            schema.entity,
            predicates.len(),
            sort.len(),
            window.offset,
            window.limit
        );

        Ok(ValidatedQuery {
            text: query.text_term().map(str::to_lowercase),
            predicates,
            projection,
            sort,
            window,
            _entity: PhantomData,
        })
    }

    fn check_filter(
        &self,
        schema: &EntitySchema,
        filter: &BTreeMap<String, OperatorMap>,
        violations: &mut Vec<Violation>,
    ) -> Vec<FieldPredicate> {
        let mut predicates = Vec::new();
        let mut entries = 0usize;

        for (name, operators) in filter {
            entries += operators.len();
            let Some(def) = schema.field(name) else {
                violations.push(Violation::new(name, "unknown field"));
                continue;
            };
            if operators.is_empty() {
                violations.push(Violation::new(name, "operator mapping is empty"));
                continue;
            }
            for (op_name, operand) in operators {
                match self.check_predicate(def, op_name, operand) {
                    Ok(predicate) => predicates.push(FieldPredicate::new(def.name, predicate)),
                    Err(rule) => violations.push(Violation::new(name, rule)),
                }
            }
        }

        if entries > self.limits.max_predicates {
            violations.push(Violation::new(
                "where",
                format!(
                    "too many predicates: {} exceeds limit of {}",
                    entries, self.limits.max_predicates
                ),
            ));
        }

        predicates
    }

    fn check_predicate(
        &self,
        def: &FieldDef,
        op_name: &str,
        operand: &Value,
    ) -> Result<Predicate, String> {
        let op = op_name
            .parse::<Operator>()
            .map_err(|err| err.to_string())?;

        if op.is_ordering() && !def.kind.is_orderable() {
            return Err(format!("operator `{op}` is not supported on {} fields", def.kind));
        }
        if op.is_pattern() && !def.kind.is_textual() {
            return Err(format!("operator `{op}` requires a text field, found {}", def.kind));
        }

        match (op.family(), operand) {
            (OperatorFamily::Match, Value::Array(_)) => {
                Err(format!("operator `{op}` expects a single value, found an array"))
            }
            (OperatorFamily::Range, Value::Array(items)) => {
                if items.len() > self.limits.max_range_values {
                    return Err(format!(
                        "operator `{op}` lists {} values, exceeding limit of {}",
                        items.len(),
                        self.limits.max_range_values
                    ));
                }
                let candidates = items
                    .iter()
                    .map(|item| coerce(def.kind, item))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|rule| format!("operator `{op}`: {rule}"))?;
                Predicate::range(op, candidates)
                    .ok_or_else(|| format!("operator `{op}` is not a range operator"))
            }
            (OperatorFamily::Range, _) => {
                Err(format!("operator `{op}` expects an array of values"))
            }
            (OperatorFamily::Match, _) => {
                let operand = if op.is_pattern() {
                    pattern_operand(operand)
                } else {
                    coerce(def.kind, operand)
                }
                .map_err(|rule| format!("operator `{op}`: {rule}"))?;
                Predicate::scalar(op, operand)
                    .ok_or_else(|| format!("operator `{op}` is not a match operator"))
            }
        }
    }

    fn check_window(
        &self,
        offset: Option<i64>,
        limit: Option<i64>,
        violations: &mut Vec<Violation>,
    ) -> Window {
        let offset = match offset {
            None => 0,
            Some(value) => usize::try_from(value).unwrap_or_else(|_| {
                violations.push(Violation::new(
                    "offset",
                    "offset must be a non-negative integer",
                ));
                0
            }),
        };

        let limit = match limit {
            None => self.limits.default_limit,
            Some(value) => match usize::try_from(value) {
                Ok(limit) if limit > self.limits.max_limit => {
                    violations.push(Violation::new(
                        "limit",
                        format!(
                            "limit {limit} exceeds maximum of {}",
                            self.limits.max_limit
                        ),
                    ));
                    self.limits.max_limit
                }
                Ok(limit) => limit,
                Err(_) => {
                    violations.push(Violation::new(
                        "limit",
                        "limit must be a non-negative integer",
                    ));
                    self.limits.default_limit
                }
            },
        };

        Window { offset, limit }
    }
}

fn check_projection(
    schema: &EntitySchema,
    fields: &FieldsDirective,
    violations: &mut Vec<Violation>,
) -> Projection {
    if fields.select.is_some() && fields.remove.is_some() {
        violations.push(Violation::new(
            "fields",
            "`select` and `remove` are mutually exclusive",
        ));
    }

    let select = fields
        .select
        .as_deref()
        .map(|names| resolve_names(schema, names, violations));
    let remove = fields.remove.as_deref().map(|names| {
        let resolved = resolve_names(schema, names, violations);
        if let Some(identity) = resolved.iter().find(|name| schema.is_identity(name)) {
            violations.push(Violation::new(*identity, "identity field cannot be removed"));
        }
        resolved
    });

    match (select, remove) {
        (Some(names), None) => Projection::Select(names),
        (None, Some(names)) => Projection::Remove(names),
        _ => Projection::All,
    }
}

fn resolve_names(
    schema: &EntitySchema,
    names: &[String],
    violations: &mut Vec<Violation>,
) -> Vec<&'static str> {
    let mut resolved = Vec::with_capacity(names.len());
    for name in names {
        match schema.field(name) {
            Some(def) if !resolved.contains(&def.name) => resolved.push(def.name),
            Some(_) => {}
            None => violations.push(Violation::new(name, "unknown field")),
        }
    }
    resolved
}

fn check_sort(
    schema: &EntitySchema,
    sort: &SortDirective,
    violations: &mut Vec<Violation>,
) -> Vec<SortKey> {
    let mut keys: Vec<SortKey> = Vec::with_capacity(sort.0.len());
    for (name, direction) in sort.iter() {
        let Some(def) = schema.field(name) else {
            violations.push(Violation::new(name, "unknown field"));
            continue;
        };
        let Some(direction) = Direction::from_wire(direction) else {
            violations.push(Violation::new(name, "sort direction must be 1 or -1"));
            continue;
        };
        if keys.iter().any(|key| key.field == def.name) {
            violations.push(Violation::new(name, "sort field listed more than once"));
            continue;
        }
        keys.push(SortKey {
            field: def.name,
            direction,
        });
    }
    keys
}

fn pattern_operand(operand: &Value) -> Result<FieldValue, String> {
    match operand {
        Value::String(text) => Ok(FieldValue::text(text.as_str())),
        Value::Null => Err("null is not a valid operand".to_string()),
        other => Err(format!("expected a text pattern, found {}", json_kind(other))),
    }
}

/// Convert a JSON operand into a value of the field's kind.
fn coerce(kind: FieldKind, operand: &Value) -> Result<FieldValue, String> {
    if operand.is_null() {
        return Err("null is not a valid operand".to_string());
    }
    let mismatch = || format!("expected {kind}, found {}", json_kind(operand));

    match kind {
        FieldKind::Integer => operand.as_i64().map(FieldValue::Integer).ok_or_else(mismatch),
        FieldKind::Unsigned => operand
            .as_u64()
            .map(FieldValue::Unsigned)
            .ok_or_else(mismatch),
        FieldKind::Float => operand.as_f64().map(FieldValue::float).ok_or_else(mismatch),
        FieldKind::Text => operand
            .as_str()
            .map(FieldValue::text)
            .ok_or_else(mismatch),
        FieldKind::Bool => operand.as_bool().map(FieldValue::Bool).ok_or_else(mismatch),
        FieldKind::Timestamp => {
            let text = operand.as_str().ok_or_else(mismatch)?;
            DateTime::parse_from_rfc3339(text)
                .map(|parsed| FieldValue::Timestamp(parsed.with_timezone(&Utc)))
                .map_err(|_| format!("`{text}` is not an RFC 3339 timestamp"))
        }
        FieldKind::Date => {
            let text = operand.as_str().ok_or_else(mismatch)?;
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map(FieldValue::Date)
                .map_err(|_| format!("`{text}` is not a YYYY-MM-DD date"))
        }
        FieldKind::Enum(options) => {
            let text = operand.as_str().ok_or_else(mismatch)?;
            if options.contains(&text) {
                Ok(FieldValue::text(text))
            } else {
                Err(format!("`{text}` is not one of {}", options.join(", ")))
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(number) if number.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
