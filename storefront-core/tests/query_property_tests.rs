mod support;

use proptest::prelude::*;
use serde_json::json;
use std::collections::BTreeSet;
use storefront_core::QueryEvaluator;
use storefront_core::model::prelude::*;
use support::*;

fn customers_strategy() -> impl Strategy<Value = Vec<Customer>> {
    prop::collection::vec(
        (
            prop::option::of(0u64..6),
            prop::option::of("[a-cA-C]{0,4}"),
            any::<bool>(),
        ),
        0..24,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(index, (user_id, address, is_deleted))| {
                let mut record = customer(index as u64 + 1, "Customer");
                record.user_id = user_id.map(UserID);
                record.address = address;
                if is_deleted {
                    record.meta.mark_deleted(at(500));
                }
                record
            })
            .collect()
    })
}

fn ids(records: &[Customer], body: serde_json::Value) -> BTreeSet<u64> {
    let query = validate::<Customer>(body);
    QueryEvaluator::evaluate_records(&query, records.to_vec())
        .identities()
        .into_iter()
        .collect()
}

fn live_ids(records: &[Customer]) -> BTreeSet<u64> {
    records
        .iter()
        .filter(|record| !record.meta.is_deleted())
        .map(|record| record.id().get())
        .collect()
}

proptest! {
    #[test]
    fn negated_ordering_operators_complement_positive(
        records in customers_strategy(),
        operand in 0u64..6,
    ) {
        let live = live_ids(&records);
        for (positive, negated) in [
            ("eq", "neq"),
            ("gt", "ngt"),
            ("gte", "ngte"),
            ("lt", "nlt"),
            ("lte", "nlte"),
        ] {
            let matched = ids(&records, json!({
                "where": {"user_id": {positive: operand}},
                "limit": 1000
            }));
            let complement = ids(&records, json!({
                "where": {"user_id": {negated: operand}},
                "limit": 1000
            }));

            prop_assert!(matched.is_disjoint(&complement));
            let union: BTreeSet<u64> = matched.union(&complement).copied().collect();
            prop_assert_eq!(union, live.clone());
        }
    }

    #[test]
    fn nlike_complements_like(
        records in customers_strategy(),
        needle in "[a-cA-C]{1,2}",
    ) {
        let live = live_ids(&records);
        let matched = ids(&records, json!({
            "where": {"address": {"like": needle.as_str()}},
            "limit": 1000
        }));
        let complement = ids(&records, json!({
            "where": {"address": {"nlike": needle.as_str()}},
            "limit": 1000
        }));

        prop_assert!(matched.is_disjoint(&complement));
        let union: BTreeSet<u64> = matched.union(&complement).copied().collect();
        prop_assert_eq!(union, live);
    }

    #[test]
    fn total_is_independent_of_the_window(
        records in customers_strategy(),
        offset in 0usize..30,
        limit in 0usize..30,
    ) {
        let query = validate::<Customer>(json!({
            "where": {"user_id": {"gte": 2}},
            "offset": offset,
            "limit": limit
        }));
        let unbounded = validate::<Customer>(json!({
            "where": {"user_id": {"gte": 2}},
            "limit": 1000
        }));

        let page = QueryEvaluator::evaluate_records(&query, records.clone());
        let everything = QueryEvaluator::evaluate_records(&unbounded, records);

        prop_assert_eq!(page.total, everything.total);
        prop_assert_eq!(page.len(), limit.min(everything.total.saturating_sub(offset)));
        let expected: Vec<u64> = everything
            .identities()
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect();
        prop_assert_eq!(page.identities(), expected);
    }
}
