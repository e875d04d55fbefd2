//! End-to-end tests for the `parity` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn parity() -> Command {
    let mut cmd = Command::cargo_bin("parity").unwrap();
    cmd.env_remove("PARITY_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn analyze_demo_table() {
    parity()
        .args(["analyze", "--demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OFZ-26238"))
        .stdout(predicate::str::contains("OFZ-PK 29015"))
        .stdout(predicate::str::contains("3.89%"))
        .stdout(predicate::str::contains("15.50%"));
}

#[test]
fn analyze_demo_json() {
    let assert = parity()
        .args(["--format", "json", "analyze", "--demo"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let records: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let records = records.as_array().unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["type"], "fixed");
    assert!(records[0].get("real_yield").is_none());
    assert!(records[2].get("ytm").is_none());
    let ytm = records[1]["ytm"].as_f64().unwrap();
    let real = records[1]["real_yield"].as_f64().unwrap();
    assert!((ytm - 0.06 - real).abs() < 1e-12);
}

#[test]
fn analyze_base_rate_override() {
    parity()
        .args(["-f", "minimal", "analyze", "--demo", "--base-rate", "0.10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OFZ-PK 29015 coupon=10.50%"));
}

#[test]
fn analyze_csv_has_header() {
    parity()
        .args(["--format", "csv", "analyze", "--demo"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "name,type,current_yield,ytm,real_yield,coupon,error",
        ));
}

#[test]
fn analyze_book_file_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.toml");
    fs::write(
        &path,
        r#"
[market]
inflation = 0.06
base_rate = 0.15

[[bonds]]
name = "GOOD"
type = "fixed"
price = 900
coupon = 35
years = 3

[[bonds]]
name = "BROKEN"
type = "fixed"
price = 900
coupon = 35
years = 0
"#,
    )
    .unwrap();

    parity()
        .args(["-f", "minimal", "analyze", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("GOOD current_yield=3.89%"))
        .stdout(predicate::str::contains("BROKEN error=invalid input"));

    parity()
        .args(["analyze", "--strict", "--file"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 2 bonds failed"));
}

#[test]
fn analyze_requires_input() {
    parity()
        .arg("analyze")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--demo"));
}

#[test]
fn yield_zero_coupon_at_par() {
    parity()
        .args(["-f", "minimal", "yield", "--price", "1000", "--years", "5"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0.0000000000").or(predicate::str::starts_with("-0.0000000000")));
}

#[test]
fn yield_with_cashflows_json() {
    let assert = parity()
        .args([
            "--format", "json", "yield", "--price", "1000", "--coupon", "25", "--years", "2",
            "--frequency", "2", "--annualization", "nominal", "--cashflows",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert!((report["ytm"].as_f64().unwrap() - 0.05).abs() < 1e-8);
    assert_eq!(report["cash_flows"].as_array().unwrap().len(), 4);
}

#[test]
fn yield_unreachable_price_fails() {
    parity()
        .args(["yield", "--price", "0", "--coupon", "35", "--years", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No bracket"));
}

#[test]
fn config_init_and_reuse() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("parity.toml");

    parity().args(["config", "init"]).arg(&path).assert().success();
    assert!(fs::read_to_string(&path).unwrap().contains("[solver]"));

    parity()
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    parity()
        .args(["-f", "minimal", "config", "show", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("max_iterations = 100"));
}

#[test]
fn invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "default_face_value = -5\n").unwrap();

    parity()
        .args(["analyze", "--demo", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("default_face_value"));
}
