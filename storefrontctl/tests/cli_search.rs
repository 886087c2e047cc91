use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

fn workspace() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("test.env"), "").unwrap();
    let products = json!([
        {"id": 1, "created": "2024-01-01T00:00:00Z", "timestamp": "2024-01-01T00:00:00Z",
         "name": "Kettle", "price": 10, "brand": "x", "tax": 0.1},
        {"id": 2, "created": "2024-01-02T00:00:00Z", "timestamp": "2024-01-02T00:00:00Z",
         "name": "Toaster", "price": 20, "brand": "y", "tax": 0.1},
        {"id": 3, "created": "2024-01-03T00:00:00Z", "timestamp": "2024-01-04T00:00:00Z",
         "deleted": "2024-01-04T00:00:00Z",
         "name": "Blender", "price": 30, "brand": "z", "tax": 0.1}
    ]);
    fs::write(dir.path().join("products.json"), products.to_string()).unwrap();
    let users = json!([
        {"id": 9, "created": "2024-01-01T00:00:00Z", "timestamp": "2024-01-01T00:00:00Z",
         "email": "ada@example.com", "password": "$argon2id$secret"}
    ]);
    fs::write(dir.path().join("users.json"), users.to_string()).unwrap();
    dir
}

fn run(dir: &Path, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = cargo_bin_cmd!("storefrontctl");
    cmd.current_dir(dir)
        .env_remove("STOREFRONT_SEARCH_CONFIG_PATH")
        .env_remove("STOREFRONT_SEARCH_CONFIG_JSON")
        .env_remove("RUST_LOG")
        .arg("--env-file")
        .arg(dir.join("test.env"))
        .args(args)
        .assert()
}

#[test]
fn search_prints_the_result_envelope() {
    let dir = workspace();
    let query = json!({
        "where": {"price": {"gte": 15}},
        "sort": {"price": -1},
        "limit": 10,
        "fields": {"select": ["price"]}
    })
    .to_string();
    let output = run(
        dir.path(),
        &[
            "search",
            "--entity",
            "product",
            "--records",
            "products.json",
            "--query-json",
            &query,
        ],
    )
    .success()
    .get_output()
    .stdout
    .clone();

    let envelope: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(
        envelope,
        json!({"items": [{"id": 2, "price": 20.0}], "total": 1, "offset": 0, "limit": 10})
    );
}

#[test]
fn user_search_never_prints_passwords() {
    let dir = workspace();
    run(
        dir.path(),
        &[
            "search",
            "--entity",
            "user",
            "--records",
            "users.json",
            "--query-json",
            r#"{"text": "ada"}"#,
        ],
    )
    .success()
    .stdout(predicate::str::contains("ada@example.com"))
    .stdout(predicate::str::contains("argon2").not());
}

#[test]
fn invalid_query_exits_with_violations() {
    let dir = workspace();
    run(
        dir.path(),
        &[
            "search",
            "--entity",
            "product",
            "--records",
            "products.json",
            "--query-json",
            r#"{"fields": {"select": ["name"], "remove": ["tax"]}, "limit": -1}"#,
        ],
    )
    .code(2)
    .stderr(predicate::str::contains("mutually exclusive"))
    .stderr(predicate::str::contains("`limit`"));
}

#[test]
fn config_file_limits_apply() {
    let dir = workspace();
    fs::write(
        dir.path().join("search.toml"),
        "[limits]\nmax_limit = 1\ndefault_limit = 1\n",
    )
    .unwrap();

    run(
        dir.path(),
        &[
            "search",
            "--entity",
            "product",
            "--records",
            "products.json",
            "--query-json",
            r#"{"limit": 2}"#,
        ],
    )
    .code(2)
    .stderr(predicate::str::contains("exceeds maximum of 1"));
}

#[test]
fn schema_lists_text_fields() {
    let dir = workspace();
    run(dir.path(), &["schema", "--entity", "sale-product"])
        .success()
        .stdout(predicate::str::contains("sale_product (identity: id)"))
        .stdout(predicate::str::contains("text fields: name, brand"));
}

#[test]
fn unprojected_products_omit_miscellaneous() {
    let dir = workspace();
    let products = json!([
        {"id": 1, "created": "2024-01-01T00:00:00Z", "timestamp": "2024-01-01T00:00:00Z",
         "name": "Kettle", "price": 10, "brand": "x", "tax": 0.1,
         "miscellaneous": [{"key": "colour", "name": "Colour", "value": "red"}]}
    ]);
    fs::write(dir.path().join("attributes.json"), products.to_string()).unwrap();

    run(
        dir.path(),
        &["search", "--entity", "product", "--records", "attributes.json"],
    )
    .success()
    .stdout(predicate::str::contains("Kettle"))
    .stdout(predicate::str::contains("miscellaneous").not());
}

#[test]
fn duplicate_record_ids_are_rejected() {
    let dir = workspace();
    let products = json!([
        {"id": 1, "created": "2024-01-01T00:00:00Z", "timestamp": "2024-01-01T00:00:00Z",
         "name": "Kettle", "price": 10, "brand": "x", "tax": 0.1},
        {"id": 1, "created": "2024-01-02T00:00:00Z", "timestamp": "2024-01-02T00:00:00Z",
         "name": "Toaster", "price": 20, "brand": "y", "tax": 0.1}
    ]);
    fs::write(dir.path().join("dupes.json"), products.to_string()).unwrap();

    run(
        dir.path(),
        &["search", "--entity", "product", "--records", "dupes.json"],
    )
    .code(1)
    .stderr(predicate::str::contains("product id 1 appears more than once"));
}
