use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use storefront_contracts::{FieldKind, FieldValue, Searchable};
use storefront_model::prelude::*;

fn at(secs: i64) -> Timestamp {
    Utc.timestamp_opt(secs, 0).single().unwrap()
}

fn present_fields<T: Searchable>(record: &T) -> Vec<&'static str> {
    T::schema()
        .field_names()
        .filter(|name| record.field(name).is_some())
        .collect()
}

#[test]
fn every_required_field_has_a_value() {
    let product = Product::new(ProductID(1), "Kettle", "acme", 30.0, 0.2, at(0));
    let sale = Sale::open(SaleID(2), CustomerID(3), at(0));
    let line = SaleProduct::from_product(SaleProductID(4), sale.id(), &product, 1);

    fn check<T: Searchable>(record: &T) {
        for def in T::schema().fields.iter().filter(|def| !def.optional) {
            assert!(
                record.field(def.name).is_some(),
                "{}.{} has no value",
                T::schema().entity,
                def.name
            );
        }
    }

    check(&product);
    check(&sale);
    check(&line);
    check(&Customer::new(CustomerID(1), "Ada", at(0)));
    check(&User::new(UserID(1), "a@example.com", "hash", at(0)).public());
}

#[test]
fn optional_customer_fields_are_absent_until_set() {
    let bare = Customer::new(CustomerID(1), "Ada", at(0));
    assert_eq!(present_fields(&bare), vec!["id", "created", "timestamp", "name"]);

    let full = bare
        .with_user(UserID(7))
        .with_address("1 Loop Rd")
        .with_phone("555")
        .with_birth_date(NaiveDate::from_ymd_opt(1990, 1, 2).unwrap());
    assert_eq!(full.field("user_id"), Some(FieldValue::Unsigned(7)));
    assert_eq!(
        full.field("birthDate"),
        Some(FieldValue::Date(NaiveDate::from_ymd_opt(1990, 1, 2).unwrap()))
    );
}

#[test]
fn sale_status_reads_as_its_wire_name() {
    let mut sale = Sale::open(SaleID(1), CustomerID(1), at(0));
    sale.status = SaleStatus::Canceled;

    assert_eq!(sale.field("status"), Some(FieldValue::text("canceled")));
    let kind = Sale::schema().field("status").map(|def| def.kind);
    assert_eq!(kind, Some(FieldKind::Enum(&["opened", "closed", "canceled"])));
}

#[test]
fn soft_delete_is_visible_through_the_trait() {
    let mut product = Product::new(ProductID(1), "Kettle", "acme", 30.0, 0.2, at(0));
    assert!(!product.is_deleted());
    product.meta.mark_deleted(at(5));
    assert!(product.is_deleted());

    let line = SaleProduct::from_product(SaleProductID(1), SaleID(1), &product, 1);
    assert!(!line.is_deleted());
}

#[test]
fn unknown_names_read_as_absent() {
    let user = User::new(UserID(1), "a@example.com", "hash", at(0)).public();
    assert_eq!(user.field("password"), None);
    assert_eq!(user.field("nope"), None);
}
