//! Generic evaluation pipeline.
//!
//! filter -> count -> sort -> paginate -> project, in that fixed order, over
//! any [`Searchable`] entity. Everything after the single `fetch` is
//! synchronous.

use super::envelope::{Item, ResultEnvelope};
use super::projection::Projection;
use super::types::{Direction, SearchQuery};
use super::validator::{QueryValidator, SortKey, ValidatedQuery};
use crate::error::Result;
use crate::source::{RecordSource, Visibility};
use std::cmp::Ordering;
use storefront_contracts::{FieldValue, Searchable};
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct QueryEvaluator;

impl QueryEvaluator {
    /// Fetch a live snapshot from `source` and evaluate `query` against it.
    ///
    /// Source failures are returned unchanged inside
    /// [`QueryError::RecordSource`](crate::QueryError::RecordSource).
    #[instrument(skip_all, fields(entity = T::schema().entity))]
    pub async fn evaluate<T, S>(
        query: &ValidatedQuery<T>,
        source: &S,
    ) -> Result<ResultEnvelope<T>>
    where
        T: Searchable,
        S: RecordSource<T> + ?Sized,
    {
        let records = source.fetch(Visibility::Live).await.map_err(|err| {
            warn!("Record source failed: {err}");
            err
        })?;
        Ok(Self::evaluate_records(query, records))
    }

    /// Evaluate `query` against an already materialized snapshot.
    pub fn evaluate_records<T: Searchable>(
        query: &ValidatedQuery<T>,
        records: Vec<T>,
    ) -> ResultEnvelope<T> {
        let fetched = records.len();
        let matched: Vec<T> = records
            .into_iter()
            .filter(|record| !record.is_deleted() && matches(query, record))
            .collect();

        let total = matched.len();
        let sorted = sort_records(matched, query.sort());

        let window = query.window();
        let page = sorted.into_iter().skip(window.offset).take(window.limit);

        let items: Vec<Item<T>> = match query.projection() {
            Projection::All if T::returns_whole_record() => page.map(Item::Full).collect(),
            projection => {
                let fields = projection.resolve(T::schema());
                page.map(|record| Item::Projected(Projection::apply(&record, &fields)))
                    .collect()
            }
        };

        debug!(
            "Evaluated {} query: fetched={}, total={}, returned={}",
            T::schema().entity,
            fetched,
            total,
            items.len()
        );

        ResultEnvelope::new(items, total, window)
    }

    /// Validate then evaluate, the sequence a request handler runs.
    pub async fn search<T, S>(
        validator: &QueryValidator,
        query: &SearchQuery,
        source: &S,
    ) -> Result<ResultEnvelope<T>>
    where
        T: Searchable,
        S: RecordSource<T> + ?Sized,
    {
        let validated = validator.validate::<T>(query)?;
        Self::evaluate(&validated, source).await
    }
}

fn matches<T: Searchable>(query: &ValidatedQuery<T>, record: &T) -> bool {
    if let Some(needle) = query.text()
        && !text_matches(record, needle)
    {
        return false;
    }
    query
        .predicates()
        .iter()
        .all(|entry| entry.predicate.matches(record.field(entry.field).as_ref()))
}

fn text_matches<T: Searchable>(record: &T, needle: &str) -> bool {
    T::schema().text_fields.iter().any(|name| {
        record
            .field(name)
            .as_ref()
            .and_then(FieldValue::as_text)
            .is_some_and(|text| text.to_lowercase().contains(needle))
    })
}

/// Stable multi-key sort. Missing values go last whichever the direction;
/// identity ascending breaks remaining ties.
fn sort_records<T: Searchable>(records: Vec<T>, keys: &[SortKey]) -> Vec<T> {
    let mut keyed: Vec<(Vec<Option<FieldValue>>, T)> = records
        .into_iter()
        .map(|record| {
            let values = keys.iter().map(|key| record.field(key.field)).collect();
            (values, record)
        })
        .collect();

    keyed.sort_by(|(left_values, left), (right_values, right)| {
        keys.iter()
            .zip(left_values.iter().zip(right_values))
            .map(|(key, (a, b))| compare_with_direction(a.as_ref(), b.as_ref(), key.direction))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| left.identity().cmp(&right.identity()))
    });

    keyed.into_iter().map(|(_, record)| record).collect()
}

fn compare_with_direction(
    a: Option<&FieldValue>,
    b: Option<&FieldValue>,
    direction: Direction,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match direction {
            Direction::Ascending => a.cmp(b),
            Direction::Descending => b.cmp(a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_sort_last_in_both_directions() {
        let present = FieldValue::Integer(1);
        for direction in [Direction::Ascending, Direction::Descending] {
            assert_eq!(
                compare_with_direction(Some(&present), None, direction),
                Ordering::Less
            );
            assert_eq!(
                compare_with_direction(None, Some(&present), direction),
                Ordering::Greater
            );
        }
    }

    #[test]
    fn descending_reverses_present_values() {
        let low = FieldValue::float(1.0);
        let high = FieldValue::float(2.0);
        assert_eq!(
            compare_with_direction(Some(&low), Some(&high), Direction::Descending),
            Ordering::Greater
        );
    }
}
