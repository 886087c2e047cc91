#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use serde_json::Value;
use storefront_core::model::prelude::*;
use storefront_core::{QueryValidator, SearchQuery, ValidatedQuery};
use storefront_core::contracts::Searchable;

pub fn at(secs: i64) -> Timestamp {
    Utc.timestamp_opt(1_700_000_000 + secs, 0)
        .single()
        .expect("valid timestamp")
}

pub fn product(id: u64, name: &str, brand: &str, price: f64) -> Product {
    Product::new(ProductID(id), name, brand, price, 0.1, at(id as i64))
}

pub fn deleted(mut product: Product) -> Product {
    product.meta.mark_deleted(at(10_000));
    product
}

pub fn customer(id: u64, name: &str) -> Customer {
    Customer::new(CustomerID(id), name, at(id as i64))
}

pub fn validate<T: Searchable>(body: Value) -> ValidatedQuery<T> {
    let query = SearchQuery::from_value(body).expect("well-formed query");
    QueryValidator::default()
        .validate::<T>(&query)
        .expect("query should validate")
}

/// The three-product catalogue used by the worked pagination examples.
pub fn priced_catalogue() -> Vec<Product> {
    vec![
        product(1, "Kettle", "x", 10.0),
        product(2, "Toaster", "y", 20.0),
        deleted(product(3, "Blender", "z", 30.0)),
    ]
}
