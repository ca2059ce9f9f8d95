// End-to-end tests: real project fixtures on disk, gate-driven exit codes,
// and history persistence across runs.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn confgate() -> Command {
    Command::cargo_bin("confgate").expect("binary should exist")
}

/// A project with full doc coverage, adequate tests, a strong fix record,
/// and fresh tier-A documents.
fn write_healthy_project(root: &Path) {
    fs::create_dir_all(root.join("src")).expect("src dir should be created");
    fs::create_dir_all(root.join("docs")).expect("docs dir should be created");
    fs::write(root.join("src/lib.rs"), "pub fn answer() -> u32 { 42 }")
        .expect("file should write");
    fs::write(root.join("src/engine.rs"), "").expect("file should write");
    fs::write(root.join("src/engine_test.rs"), "#[test] fn t() {}")
        .expect("file should write");
    fs::write(
        root.join("BUG_TRACKER.md"),
        r#"# Bug Tracker

"P0": 0, "P1": 0, "P2": 0, "P3": 0

100 bugs tracked, 96 fixed
"#,
    )
    .expect("tracker should write");
    fs::write(
        root.join("docs/CODE_DOC_MAP.md"),
        "`src/lib.rs` `src/engine.rs` `src/engine_test.rs`",
    )
    .expect("map should write");
    fs::write(root.join("docs/INVARIANTS.md"), "invariants").expect("doc should write");
}

#[test]
fn score_healthy_project_passes_all_gates() {
    let dir = TempDir::new().expect("temp dir should be created");
    write_healthy_project(dir.path());

    confgate()
        .args(["score", dir.path().to_str().expect("path should be utf-8")])
        .assert()
        .success()
        .stdout(predicate::str::contains("READY TO SHIP"))
        .stderr(predicate::str::contains("confgate.toml"));
}

#[test]
fn score_blocks_on_open_critical_bugs() {
    let dir = TempDir::new().expect("temp dir should be created");
    write_healthy_project(dir.path());
    fs::write(
        dir.path().join("BUG_TRACKER.md"),
        r#""P0": 2, "P1": 0, "P2": 0, "P3": 0

10 bugs tracked, 8 fixed
"#,
    )
    .expect("tracker should write");

    confgate()
        .args(["score", dir.path().to_str().expect("path should be utf-8")])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("BLOCKED"));
}

#[test]
fn score_blocks_when_tier_a_docs_are_missing() {
    let dir = TempDir::new().expect("temp dir should be created");
    write_healthy_project(dir.path());
    fs::remove_file(dir.path().join("docs/INVARIANTS.md")).expect("doc should remove");

    confgate()
        .args([
            "score",
            dir.path().to_str().expect("path should be utf-8"),
            "--format",
            "json",
        ])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("\"tier_a_mapped\": false"));
}

#[test]
fn score_update_persists_history_and_smooths_next_run() {
    let dir = TempDir::new().expect("temp dir should be created");
    write_healthy_project(dir.path());

    confgate()
        .args([
            "score",
            dir.path().to_str().expect("path should be utf-8"),
            "--update",
        ])
        .assert()
        .success();

    let history_path = dir.path().join(".confgate/history.json");
    assert!(history_path.exists(), "history file should be created");

    confgate()
        .args([
            "score",
            dir.path().to_str().expect("path should be utf-8"),
            "--format",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"previous_score\""));
}

#[test]
fn score_respects_project_config_paths() {
    let dir = TempDir::new().expect("temp dir should be created");
    write_healthy_project(dir.path());
    fs::rename(
        dir.path().join("BUG_TRACKER.md"),
        dir.path().join("BUGS.md"),
    )
    .expect("tracker should rename");
    fs::write(
        dir.path().join("confgate.toml"),
        r#"
[docs]
bug_tracker = "BUGS.md"
"#,
    )
    .expect("project config should write");

    confgate()
        .args([
            "score",
            dir.path().to_str().expect("path should be utf-8"),
            "--format",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"bugs_total\": 100"));
}

#[test]
fn calculate_reads_metrics_from_file() {
    let dir = TempDir::new().expect("temp dir should be created");
    let input = dir.path().join("metrics.json");
    fs::write(
        &input,
        r#"{
            "aggregates": {
                "severity": {
                    "critical": {"open": 0, "found": 2, "fixed": 2},
                    "high": {"open": 1, "found": 10, "fixed": 9},
                    "medium": {"open": 1, "found": 30, "fixed": 29},
                    "low": {"open": 0, "found": 50, "fixed": 50}
                },
                "summary": {"total_found": 92, "total_fixed": 90}
            },
            "stats": {"mapped": 200, "scripts": 200, "tests_count": 35}
        }"#,
    )
    .expect("metrics should write");

    confgate()
        .args(["calculate", input.to_str().expect("path should be utf-8")])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"score\": 100.0"))
        .stdout(predicate::str::contains("\"fix_ratio_bonus\": 7.8"));
}

#[test]
fn calculate_exits_advisory_when_score_gate_fails() {
    // can_ship holds (no criticals, no tier-A data) but the smoothed score
    // lands below the advisory threshold.
    confgate()
        .arg("calculate")
        .write_stdin(
            r#"{
                "aggregates": {"summary": {"total_found": 100, "total_fixed": 0}},
                "stats": {"mapped": 0, "scripts": 100, "tests_count": 0},
                "previous_score": 40.0
            }"#,
        )
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"can_ship\": true"))
        .stdout(predicate::str::contains("\"score_ok\": false"));
}

#[test]
fn calculate_applies_formula_config_overrides() {
    let dir = TempDir::new().expect("temp dir should be created");
    let formula = dir.path().join("formula.json");
    fs::write(
        &formula,
        r#"{"confidence_formula": {"fix_ratio_bonus": {"enabled": false}}}"#,
    )
    .expect("formula should write");

    confgate()
        .args([
            "calculate",
            "--formula-config",
            formula.to_str().expect("path should be utf-8"),
        ])
        .write_stdin(
            r#"{"aggregates": {"summary": {"total_found": 92, "total_fixed": 90}}}"#,
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("\"fix_ratio_bonus_enabled\": false"))
        .stdout(predicate::str::contains("\"fix_ratio_bonus\": 0.0"));
}

#[test]
fn calculate_rejects_invalid_recurrence() {
    confgate()
        .arg("calculate")
        .write_stdin(
            r#"{
                "aggregates": {},
                "fingerprints": {"hotspots": [{"risk": "high", "bug_recurrence": -1.0}]}
            }"#,
        )
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid metric input"));
}
