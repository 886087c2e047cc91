use assert_cmd::cargo::cargo_bin_cmd;

#[test]
fn search_help_mentions_options() {
    let mut cmd = cargo_bin_cmd!("storefrontctl");
    let output = cmd
        .arg("search")
        .arg("--help")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&output);
    for flag in ["--entity", "--records", "--query", "--query-json", "--pretty"] {
        assert!(text.contains(flag), "search help missing {flag}");
    }
}

#[test]
fn schema_command_is_documented() {
    let mut cmd = cargo_bin_cmd!("storefrontctl");
    let out = cmd
        .arg("--help")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&out);
    assert!(text.contains("schema"), "top-level help missing schema");
    assert!(text.contains("search"), "top-level help missing search");
}

#[test]
fn unknown_entity_is_rejected_by_the_parser() {
    let mut cmd = cargo_bin_cmd!("storefrontctl");
    cmd.args(["schema", "--entity", "invoice"]).assert().failure();
}
