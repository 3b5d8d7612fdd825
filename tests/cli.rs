use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("chart-block").unwrap();
    // keep the user's config file out of the tests
    cmd.env("XDG_CONFIG_HOME", std::env::temp_dir().join("chart-block-cli-tests"));
    cmd
}

#[test]
fn cli_shows_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chart-block"))
        .stdout(predicate::str::contains("render"));
}

#[test]
fn new_then_render_svg() {
    let dir = tempdir().unwrap();
    let json = dir.path().join("chart.json");
    let svg = dir.path().join("chart.svg");
    cli()
        .args(["new", "--type", "pie", "--out"])
        .arg(&json)
        .assert()
        .success();
    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(saved["type"], "pie");

    cli()
        .arg("render")
        .arg(&json)
        .arg("--out")
        .arg(&svg)
        .args(["--width", "400", "--height", "300", "--title", "From CLI"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote plot"));
    let doc = fs::read_to_string(&svg).unwrap();
    assert!(doc.contains("From CLI"));
}

#[test]
fn unknown_chart_type_is_rejected() {
    let dir = tempdir().unwrap();
    cli()
        .args(["new", "--type", "scatter", "--out"])
        .arg(dir.path().join("x.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown chart type"));
}

#[test]
fn tunes_lists_all_types() {
    cli()
        .arg("tunes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Polar Area Chart"))
        .stdout(predicate::str::contains("polarArea"));
}

#[test]
fn spec_and_panel_print_json() {
    let dir = tempdir().unwrap();
    let json = dir.path().join("chart.json");
    fs::write(&json, r#"{"type":"doughnut","title":"Share"}"#).unwrap();

    let out = cli().arg("spec").arg(&json).output().unwrap();
    assert!(out.status.success());
    let spec: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(spec["options"]["plugins"]["title"]["text"], "Share");
    assert_eq!(spec["data"]["datasets"][0]["borderColor"], "#fff");

    let out = cli().arg("panel").arg(&json).output().unwrap();
    assert!(out.status.success());
    let panel: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(panel["datasets"][0]["heading"], "Data");
    assert_eq!(panel["datasets"][0]["rows"]["rows"].as_array().unwrap().len(), 4);
}

#[test]
fn edit_replays_events() {
    let dir = tempdir().unwrap();
    let json = dir.path().join("chart.json");
    let events = dir.path().join("events.json");
    let out = dir.path().join("edited.json");
    let csv = dir.path().join("edited.csv");
    fs::write(&json, "{}").unwrap();
    fs::write(
        &events,
        r#"[
            {"target":"settings","event":"labelsChanged","text":"Mon, Tue"},
            {"target":"settings","event":"addDataset"},
            {"target":"settings","event":"nameChanged","dataset":1,"text":"Second"},
            {"target":"settings","event":"removeDataset","dataset":0}
        ]"#,
    )
    .unwrap();

    cli()
        .arg("edit")
        .arg(&json)
        .arg("--events")
        .arg(&events)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();
    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(saved["labels"], serde_json::json!(["Mon", "Tue"]));
    assert_eq!(saved["datasets"].as_array().unwrap().len(), 1);
    assert_eq!(saved["datasets"][0]["label"], "Second");

    cli().arg("csv").arg(&out).arg("--out").arg(&csv).assert().success();
    assert!(fs::read_to_string(&csv).unwrap().starts_with("label,Second"));
}

#[test]
fn missing_input_fails_with_context() {
    cli()
        .args(["spec", "/definitely/not/here.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reading"));
}
