//! Integration tests for the `benchdiff` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::path::PathBuf;

fn fixture_path(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
        .to_str()
        .unwrap()
        .to_string()
}

fn benchdiff() -> Command {
    let mut cmd = Command::cargo_bin("benchdiff").unwrap();
    cmd.env_remove("BENCHDIFF_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_default_report() {
    benchdiff()
        .args([fixture_path("old.txt"), fixture_path("new.txt")])
        .assert()
        .success()
        .stdout(include_str!("fixtures/expected_default.txt"))
        .stderr(predicate::str::contains(
            "benchmark BenchmarkRemoved-8 is missing from after",
        ))
        .stderr(predicate::str::contains(
            "benchmark BenchmarkAdded-8 is new in after",
        ));
}

#[test]
fn test_changed_only() {
    benchdiff()
        .arg("--changed")
        .args([fixture_path("old.txt"), fixture_path("new.txt")])
        .assert()
        .success()
        .stdout(predicate::str::contains("-20.00%"))
        .stdout(predicate::str::contains("+50.00%"))
        .stdout(predicate::str::contains("+0.00%").not())
        .stdout(predicate::str::contains("1.00x").not());
}

#[test]
fn test_magnitude_sort() {
    let hash_before_decode = |out: &str| match (out.find("BenchmarkHash-8"), out.find("BenchmarkDecode-8")) {
        (Some(hash), Some(decode)) => hash < decode,
        _ => false,
    };

    benchdiff()
        .arg("--mag")
        .args([fixture_path("old.txt"), fixture_path("new.txt")])
        .assert()
        .success()
        .stdout(predicate::function(hash_before_decode));

    benchdiff()
        .args([fixture_path("old.txt"), fixture_path("new.txt")])
        .assert()
        .success()
        .stdout(predicate::function(hash_before_decode).not());
}

#[test]
fn test_tolerance_violation_flushes_partial_output() {
    benchdiff()
        .args(["--errdelta", "--tnsop", "15"])
        .args([fixture_path("old.txt"), fixture_path("new.txt")])
        .assert()
        .code(1)
        .stdout(
            "benchmark             old ns/op     new ns/op     delta\n\
             BenchmarkEncode-8     15000         12000         -20.00%\n",
        )
        .stderr(predicate::str::contains(
            "benchdiff: BenchmarkEncode-8: -20.00% ns/op delta exceeds tolerance of 15.00%",
        ));
}

#[test]
fn test_tolerances_within_limits_pass() {
    benchdiff()
        .args([
            "--errdelta", "--tnsop", "25", "--tmbs", "30", "--tallocop", "20", "--tbop", "60",
        ])
        .args([fixture_path("old.txt"), fixture_path("new.txt")])
        .assert()
        .success();
}

#[test]
fn test_tolerance_without_errdelta_is_usage_error() {
    benchdiff()
        .args(["--tnsop", "5"])
        .args([fixture_path("old.txt"), fixture_path("new.txt")])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("only valid when failing on deltas"));
}

#[test]
fn test_no_repeated_benchmarks() {
    benchdiff()
        .args([fixture_path("old.txt"), fixture_path("unrelated.txt")])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("benchmark BenchmarkOther-8 is new in after"))
        .stderr(predicate::str::contains("benchdiff: no repeated benchmarks"));
}

#[test]
fn test_unreadable_input() {
    benchdiff()
        .args([fixture_path("old.txt"), fixture_path("does-not-exist.txt")])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read"))
        .stderr(predicate::str::contains("does-not-exist.txt"));
}

#[test]
fn test_repeats_without_best_truncate() {
    benchdiff()
        .args([fixture_path("repeats_old.txt"), fixture_path("repeats_new.txt")])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "benchmark BenchmarkSort-4: before has 3 instances, after has 2; comparing the first 2",
        ))
        .stdout(predicate::str::contains("1500000").and(predicate::str::contains("1400000")))
        .stdout(predicate::str::contains("1450000").not());
}

#[test]
fn test_best_of_repeats() {
    benchdiff()
        .arg("--best")
        .args([fixture_path("repeats_old.txt"), fixture_path("repeats_new.txt")])
        .assert()
        .success()
        .stderr(predicate::str::is_empty())
        .stdout(predicate::str::contains("1400000"))
        .stdout(predicate::str::contains("1390000"))
        .stdout(predicate::str::contains("-0.71%"));
}

#[test]
fn test_json_output() {
    let output = benchdiff()
        .args(["--format", "json"])
        .args([fixture_path("old.txt"), fixture_path("new.txt")])
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["warnings"].as_array().unwrap().len(), 2);
    assert_eq!(doc["tables"].as_array().unwrap().len(), 4);
    assert_eq!(doc["tables"][0]["rows"][0]["name"], "BenchmarkEncode-8");
    assert_eq!(doc["tables"][0]["rows"][0]["delta"]["percent"], -20.0);
}

#[test]
fn test_markdown_output() {
    benchdiff()
        .args(["--format", "markdown"])
        .args([fixture_path("old.txt"), fixture_path("new.txt")])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Benchmark Comparison"))
        .stdout(predicate::str::contains("## MB/s"))
        .stdout(predicate::str::contains("| BenchmarkEncode-8 | 68.27 | 85.33 | 1.25x |"));
}

#[test]
fn test_config_file() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "changed_only = true").unwrap();
    writeln!(config, "fail_on_tolerance_exceeded = true").unwrap();
    writeln!(config, "[tolerances]").unwrap();
    writeln!(config, "ns_per_op = 25.0").unwrap();
    writeln!(config, "mb_per_s = 30.0").unwrap();
    writeln!(config, "allocs_per_op = 20.0").unwrap();
    writeln!(config, "bytes_per_op = 40.0").unwrap();

    benchdiff()
        .env("BENCHDIFF_CONFIG", config.path())
        .args([fixture_path("old.txt"), fixture_path("new.txt")])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("+0.00%").not())
        .stderr(predicate::str::contains(
            "BenchmarkDecode-8: +50.00% bytes/op delta exceeds tolerance of 40.00%",
        ));
}

#[test]
fn test_invalid_config_file() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "sort_by = \"magnitude\"").unwrap();

    benchdiff()
        .arg("--config")
        .arg(config.path())
        .args([fixture_path("old.txt"), fixture_path("new.txt")])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid configuration file"));
}

#[test]
fn test_missing_arguments() {
    benchdiff()
        .arg(fixture_path("old.txt"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}
