//! End-to-end checks of the non-interactive subcommands.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn survey_cmd() -> Command {
    let mut cmd = Command::cargo_bin("stepsurvey").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

// =============================================================================
// replay
// =============================================================================

#[test]
fn test_replay_submits_default_selection() {
    survey_cmd()
        .args(["replay", "--action", "submit"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""step":0"#))
        .stdout(predicate::str::contains(
            r#""title":"You submitted the following values:""#,
        ))
        .stdout(predicate::str::contains(r#""values":{"items":["1"]}"#));
}

#[test]
fn test_replay_reports_validation_failure_on_stderr() {
    survey_cmd()
        .args(["replay", "-a", "toggle:1", "-a", "submit"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "step 0: You have to select at least one item.",
        ));
}

#[test]
fn test_replay_runs_every_step_to_completion() {
    let output = survey_cmd()
        .args(["replay", "-a", "toggle:4", "-a", "submit", "-a", "submit", "-a", "submit"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    for (step, line) in lines.iter().enumerate() {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["step"], step);
        assert_eq!(value["values"]["items"], serde_json::json!(["1", "4"]));
    }
}

#[test]
fn test_replay_rejects_unknown_action() {
    survey_cmd()
        .args(["replay", "--action", "jump:2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown action"));
}

#[test]
fn test_replay_honours_per_step_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("survey.yaml");
    fs::write(&config, "selection_scope: per_step\n").unwrap();

    survey_cmd()
        .args(["replay", "--config"])
        .arg(&config)
        .args(["-a", "submit", "-a", "submit"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""values":{"items":["1"]}"#))
        .stderr(predicate::str::contains(
            "step 1: You have to select at least one item.",
        ));
}

#[test]
fn test_replay_rejects_unknown_config_field() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("survey.yaml");
    fs::write(&config, "colour: blue\n").unwrap();

    survey_cmd()
        .args(["replay", "--config"])
        .arg(&config)
        .args(["-a", "submit"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn test_replay_with_empty_initial_selection() {
    survey_cmd()
        .args(["replay", "--no-default-selection", "-a", "submit"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("step 0:"));
}

// =============================================================================
// inspect
// =============================================================================

#[test]
fn test_inspect_lists_bundled_steps() {
    survey_cmd()
        .arg("inspect")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 step(s)"))
        .stdout(predicate::str::contains("recents  Sidebar  (6 items)"))
        .stdout(predicate::str::contains("warning:").not());
}

#[test]
fn test_inspect_reports_lint_warnings() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("steps.json");
    fs::write(
        &data,
        r#"{
            "first": { "title": "", "items": [] },
            "second": { "title": "Two", "items": [{ "id": 1, "label": "A" }, { "id": "1", "label": "B" }] }
        }"#,
    )
    .unwrap();

    survey_cmd()
        .arg("inspect")
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("warning: step 0 (first) has no title"))
        .stdout(predicate::str::contains("warning: step 0 (first) has no items"))
        .stdout(predicate::str::contains("warning: step 1 (second) repeats item id `1`"));
}

#[test]
fn test_inspect_json_keeps_file_order() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("steps.yaml");
    fs::write(
        &data,
        "zeta:\n  title: Last letter\n  items:\n    - id: 1\n      label: One\nalpha:\n  title: First letter\n",
    )
    .unwrap();

    let output = survey_cmd()
        .args(["inspect", "--json"])
        .arg(&data)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["steps"][0]["key"], "zeta");
    assert_eq!(report["steps"][1]["key"], "alpha");
    assert_eq!(report["steps"][1]["items"], serde_json::json!([]));
}

#[test]
fn test_inspect_fails_on_malformed_data() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("steps.json");
    fs::write(&data, r#"{ "only": 42 }"#).unwrap();

    survey_cmd()
        .arg("inspect")
        .arg(&data)
        .assert()
        .failure()
        .stderr(predicate::str::contains("step `only` is malformed"));
}

#[test]
fn test_inspect_fails_on_missing_file() {
    survey_cmd()
        .args(["inspect", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}
