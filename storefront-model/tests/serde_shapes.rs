#![cfg(feature = "serde")]

use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use storefront_model::prelude::*;
use storefront_model::{BearerToken, ExpirableToken};

fn at(secs: i64) -> Timestamp {
    Utc.timestamp_opt(secs, 0).single().unwrap()
}

#[test]
fn customer_uses_wire_field_names() {
    let customer = Customer::new(CustomerID(3), "Ada", at(0))
        .with_user(UserID(1))
        .with_birth_date(NaiveDate::from_ymd_opt(1815, 12, 10).unwrap());

    let value = serde_json::to_value(&customer).unwrap();

    assert_eq!(
        value,
        json!({
            "id": 3,
            "created": "1970-01-01T00:00:00Z",
            "timestamp": "1970-01-01T00:00:00Z",
            "user_id": 1,
            "name": "Ada",
            "birthDate": "1815-12-10"
        })
    );
}

#[test]
fn deleted_marker_round_trips_through_flattened_meta() {
    let mut sale = Sale::open(SaleID(8), CustomerID(3), at(0));
    sale.meta.mark_deleted(at(60));

    let value = serde_json::to_value(&sale).unwrap();
    assert_eq!(value["status"], "opened");
    assert_eq!(value["deleted"], "1970-01-01T00:01:00Z");

    let back: Sale = serde_json::from_value(value).unwrap();
    assert!(back.meta.is_deleted());
}

#[test]
fn public_user_drops_password_when_read_from_a_full_row() {
    let row = json!({
        "id": 1,
        "created": "2024-01-01T00:00:00Z",
        "timestamp": "2024-01-01T00:00:00Z",
        "email": "ada@example.com",
        "password": "$argon2id$hash"
    });

    let user: PublicUser = serde_json::from_value(row).unwrap();
    let value = serde_json::to_value(&user).unwrap();

    assert_eq!(user.email, "ada@example.com");
    assert!(value.get("password").is_none());
}

#[test]
fn bearer_token_carries_type_tag() {
    let token = BearerToken::new(
        ExpirableToken {
            token: "access".into(),
            expires: "2024-01-01T01:00:00Z".into(),
        },
        ExpirableToken {
            token: "refresh".into(),
            expires: "2024-01-08T00:00:00Z".into(),
        },
    );

    let value = serde_json::to_value(&token).unwrap();

    assert_eq!(value["type"], "Bearer");
    assert_eq!(value["refresh"]["token"], "refresh");
}

#[test]
fn sale_details_flatten_the_sale() {
    let kettle = Product::new(ProductID(1), "Kettle", "acme", 30.0, 0.2, at(0));
    let sale = Sale::open(SaleID(5), CustomerID(2), at(0));
    let details = SaleDetails::new(
        sale,
        vec![SaleProduct::from_product(SaleProductID(1), SaleID(5), &kettle, 3)],
    );

    let value = serde_json::to_value(&details).unwrap();

    assert_eq!(value["id"], 5);
    assert_eq!(value["products"][0]["quantity"], 3);
    assert_eq!(details.total(), 90.0);
}
