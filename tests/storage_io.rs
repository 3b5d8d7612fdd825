use chart_block::models::BackgroundColor;
use chart_block::{ChartConfig, ChartType, Dataset, storage};
use std::fs;
use tempfile::tempdir;

fn sample() -> ChartConfig {
    ChartConfig {
        chart_type: ChartType::Bar,
        labels: vec!["Q1".into(), "Q2".into(), "Q3".into()],
        datasets: vec![
            Dataset::new("Plan", vec![10.0, 12.5, 9.0], BackgroundColor::Single("#4A90E2".into())),
            Dataset::new("Actual", vec![11.0], BackgroundColor::Single("#50C878".into())),
        ],
        title: "Budget".into(),
    }
}

#[test]
fn save_and_load_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chart.json");
    let cfg = sample();
    storage::save_config(&cfg, &path).unwrap();
    let txt = fs::read_to_string(&path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&txt).unwrap();
    assert_eq!(v["type"], "bar");
    assert_eq!(v["datasets"].as_array().unwrap().len(), 2);
    assert!(v["datasets"][0].get("useMultiColor").is_none());
    assert_eq!(storage::load_config(&path).unwrap(), cfg);
}

#[test]
fn export_csv_pads_short_datasets() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chart.csv");
    storage::export_csv(&sample(), &path).unwrap();
    let txt = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = txt.lines().collect();
    assert_eq!(lines, vec!["label,Plan,Actual", "Q1,10,11", "Q2,12.5,0", "Q3,9,0"]);
}

#[test]
fn load_reports_bad_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        storage::load_config(&path),
        Err(chart_block::ChartError::Json(_))
    ));
    assert!(matches!(
        storage::load_config(dir.path().join("missing.json")),
        Err(chart_block::ChartError::Io(_))
    ));
}

#[test]
fn load_events_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.json");
    fs::write(
        &path,
        r#"[{"target":"settings","event":"addDataset"},{"target":"tune","chartType":"radar"}]"#,
    )
    .unwrap();
    assert_eq!(storage::load_events(&path).unwrap().len(), 2);
}
