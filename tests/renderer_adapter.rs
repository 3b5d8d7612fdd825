mod common;

use chart_block::models::BackgroundColor;
use chart_block::render::{ColorSpec, build_chart_spec};
use chart_block::{ChartRenderer, ChartType, Dataset, Palette};
use common::{RecordingSurface, chart};
use serde_json::json;

#[test]
fn renderer_keeps_exactly_one_live_chart() {
    let mut renderer = ChartRenderer::new(RecordingSurface::default(), Palette::default());
    let cfg = chart(
        ChartType::Bar,
        &["a", "b"],
        vec![Dataset::new("s", vec![1.0, 2.0], "#4A90E2".into())],
    );
    for _ in 0..5 {
        renderer.render(&cfg).unwrap();
        assert_eq!(renderer.surface().live.len(), 1);
    }
    assert_eq!(renderer.redraws(), 5);
    assert_eq!(renderer.surface().destroyed, vec![1, 2, 3, 4]);
    assert_eq!(renderer.current(), Some(&5));

    renderer.clear();
    assert!(renderer.surface().live.is_empty());
}

#[test]
fn spec_serializes_in_chartjs_shape() {
    let mut cfg = chart(
        ChartType::Line,
        &["Jan", "Feb"],
        vec![Dataset::new("Visits", vec![3.0, 4.0], "#FF6B6B".into())],
    );
    cfg.title = "Traffic".into();
    let v = serde_json::to_value(build_chart_spec(&cfg, &Palette::default())).unwrap();
    assert_eq!(v["type"], "line");
    assert_eq!(v["data"]["labels"], json!(["Jan", "Feb"]));
    let ds = &v["data"]["datasets"][0];
    assert_eq!(ds["label"], "Visits");
    assert_eq!(ds["backgroundColor"], "#FF6B6B");
    assert_eq!(ds["borderColor"], "#FF6B6B");
    assert_eq!(ds["borderWidth"], 2);
    assert_eq!(ds["tension"], 0.4);
    assert_eq!(v["options"]["responsive"], true);
    assert_eq!(v["options"]["maintainAspectRatio"], false);
    assert_eq!(
        v["options"]["plugins"]["legend"],
        json!({"display": false, "position": "top"})
    );
    assert_eq!(
        v["options"]["plugins"]["title"],
        json!({"display": true, "text": "Traffic", "font": {"size": 16, "weight": "bold"}})
    );
}

#[test]
fn segment_charts_get_per_point_fills_and_white_borders() {
    let p = Palette::default();
    let cfg = chart(
        ChartType::PolarArea,
        &["a", "b", "c"],
        vec![Dataset::new("s", vec![1.0, 2.0, 3.0], "#123456".into())],
    );
    let spec = build_chart_spec(&cfg, &p);
    let ds = &spec.data.datasets[0];
    assert_eq!(ds.background_color, ColorSpec::PerPoint(p.cycle(3)));
    assert_eq!(ds.border_color, ColorSpec::Single("#fff".into()));
    assert!(spec.legend_visible());
    assert!(!spec.title_visible());
}

#[test]
fn multi_color_series_border_follows_fill() {
    let p = Palette::default();
    let mut ds = Dataset::new(
        "s",
        vec![1.0, 2.0],
        BackgroundColor::PerPoint(vec!["#000000".into(), "#ffffff".into()]),
    );
    ds.use_multi_color = Some(true);
    let spec = build_chart_spec(&chart(ChartType::Bar, &["a", "b"], vec![ds]), &p);
    let out = &spec.data.datasets[0];
    assert_eq!(out.border_color, out.background_color);
    assert_eq!(out.background_color.at(3), Some("#ffffff"));
}

#[test]
fn legend_shows_for_several_series() {
    let cfg = chart(
        ChartType::Bar,
        &["a"],
        vec![
            Dataset::new("one", vec![1.0], "#4A90E2".into()),
            Dataset::new("two", vec![2.0], "#50C878".into()),
        ],
    );
    assert!(build_chart_spec(&cfg, &Palette::default()).legend_visible());
}

#[test]
fn unknown_dataset_fields_reach_the_spec() {
    let mut ds = Dataset::new("s", vec![1.0], "#4A90E2".into());
    ds.extra.insert("fill".into(), json!(true));
    let v = serde_json::to_value(build_chart_spec(
        &chart(ChartType::Line, &["a"], vec![ds]),
        &Palette::default(),
    ))
    .unwrap();
    assert_eq!(v["data"]["datasets"][0]["fill"], true);
}

#[test]
fn resolved_fields_override_host_fields() {
    let mut ds = Dataset::new("s", vec![1.0], "#4A90E2".into());
    ds.extra.insert("borderColor".into(), json!("#000000"));
    ds.extra.insert("borderWidth".into(), json!(9));
    ds.extra.insert("tension".into(), json!(0));
    ds.extra.insert("pointRadius".into(), json!(3));
    let spec = build_chart_spec(&chart(ChartType::Line, &["a"], vec![ds]), &Palette::default());
    let out = &spec.data.datasets[0];
    assert!(out.extra.get("borderColor").is_none());
    assert!(out.extra.get("borderWidth").is_none());
    assert!(out.extra.get("tension").is_none());
    assert_eq!(out.extra.get("pointRadius"), Some(&json!(3)));

    let text = serde_json::to_string(&spec).unwrap();
    assert_eq!(text.matches("\"borderWidth\"").count(), 1);
    let v: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(v["data"]["datasets"][0]["borderColor"], "#4A90E2");
    assert_eq!(v["data"]["datasets"][0]["borderWidth"], 2);
    assert_eq!(v["data"]["datasets"][0]["tension"], 0.4);
}
