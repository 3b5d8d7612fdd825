mod common;

use chart_block::settings::{PickerEvent, PickerState};
use chart_block::title::{OVERLAY_HEIGHT_PX, OVERLAY_HINT, TitleEvent};
use chart_block::{
    ChartConfig, ChartData, ChartError, ChartTool, ChartType, Refresh, SettingsEvent, ToolEvent,
    ToolInit,
};
use common::RecordingSurface;

fn editable(data: ChartData) -> ChartTool<RecordingSurface> {
    let mut tool = ChartTool::new(ToolInit::editable(data), RecordingSurface::default());
    tool.render().unwrap();
    tool
}

#[test]
fn save_without_edits_round_trips() {
    let src = r##"{
        "type": "doughnut",
        "labels": ["a", "b"],
        "datasets": [{"label": "d", "data": [1.5, 2.5], "backgroundColor": ["#000", "#111"], "hoverOffset": 4}],
        "title": "Mix"
    }"##;
    let data: ChartData = serde_json::from_str(src).unwrap();
    let expected = ChartConfig::from_partial(data.clone());
    let tool = editable(data);
    assert_eq!(tool.save(), &expected);

    let back = serde_json::to_value(tool.save()).unwrap();
    let orig: serde_json::Value = serde_json::from_str(src).unwrap();
    assert_eq!(back, orig);
}

#[test]
fn explicit_multi_color_false_survives_save() {
    let src = r##"{
        "type": "bar",
        "labels": ["a"],
        "datasets": [{"label": "d", "data": [1.5], "backgroundColor": "#fff", "useMultiColor": false}],
        "title": ""
    }"##;
    let tool = editable(serde_json::from_str(src).unwrap());
    let back = serde_json::to_value(tool.save()).unwrap();
    let orig: serde_json::Value = serde_json::from_str(src).unwrap();
    assert_eq!(back, orig);
}

#[test]
fn partial_data_is_default_filled() {
    let tool = editable(ChartData {
        title: Some("Only a title".into()),
        ..ChartData::default()
    });
    let saved = tool.save();
    assert_eq!(saved.chart_type, ChartType::Bar);
    assert_eq!(saved.labels.len(), 4);
    assert_eq!(saved.datasets[0].label, "Dataset 1");
    assert_eq!(saved.title, "Only a title");
}

#[test]
fn render_is_one_shot() {
    let mut tool = editable(ChartData::default());
    assert!(matches!(tool.render(), Err(ChartError::AlreadyRendered)));
}

#[test]
fn editable_view_has_panel_and_overlay() {
    let tool = editable(ChartData::default());
    let view = tool.view().unwrap();
    let overlay = view.title_overlay.as_ref().unwrap();
    assert_eq!(overlay.height_px, OVERLAY_HEIGHT_PX);
    assert_eq!(overlay.hint, OVERLAY_HINT);
    assert!(view.settings.is_some());
    assert_eq!(tool.renderer().surface().drawn.len(), 1);
}

#[test]
fn read_only_tool_has_no_editing_affordances() {
    let mut tool = ChartTool::new(ToolInit::read_only(ChartData::default()), RecordingSurface::default());
    let view = tool.render().unwrap();
    assert!(view.settings.is_none());
    assert!(view.title_overlay.is_none());

    let before = tool.save().clone();
    let events: Vec<ToolEvent> = vec![
        SettingsEvent::AddDataset.into(),
        ToolEvent::Tune { chart_type: ChartType::Pie },
        TitleEvent::Click.into(),
    ];
    for e in events {
        assert_eq!(tool.handle(e).unwrap(), Refresh::None);
    }
    assert_eq!(tool.save(), &before);
    assert_eq!(tool.renderer().surface().drawn.len(), 1);
}

#[test]
fn refresh_kinds_drive_panel_and_redraws() {
    let mut tool = editable(ChartData::default());
    let draws = |t: &ChartTool<RecordingSurface>| t.renderer().surface().drawn.len();

    // redraw-only: same panel generation, value patched in place
    let r = tool
        .handle(SettingsEvent::ValuesChanged { dataset: 0, text: "1, 2, 3".into() })
        .unwrap();
    assert_eq!(r, Refresh::Redraw);
    let panel = tool.settings_panel().unwrap();
    assert_eq!(panel.generation, 0);
    assert_eq!(panel.datasets[0].values.as_ref().unwrap().value, "1, 2, 3");
    assert_eq!(draws(&tool), 2);

    // structural: dataset editors rebuilt
    assert_eq!(tool.handle(SettingsEvent::AddDataset).unwrap(), Refresh::RebuildDatasets);
    let panel = tool.settings_panel().unwrap();
    assert_eq!(panel.generation, 1);
    assert_eq!(panel.datasets.len(), 2);
    assert_eq!(draws(&tool), 3);

    // refused: nothing happens
    assert_eq!(
        tool.handle(SettingsEvent::PointValueChanged { dataset: 9, index: 0, text: "1".into() })
            .unwrap(),
        Refresh::None
    );
    assert_eq!(draws(&tool), 3);

    // tune switch: whole panel rebuilt
    let r = tool.handle(ToolEvent::Tune { chart_type: ChartType::Pie }).unwrap();
    assert_eq!(r, Refresh::RebuildPanel);
    let panel = tool.settings_panel().unwrap();
    assert_eq!(panel.generation, 2);
    assert!(panel.add_button.is_none());
    assert_eq!(panel.datasets[0].heading, "Data");
    assert_eq!(tool.renderer().surface().last().chart_type, ChartType::Pie);
    assert_eq!(tool.renderer().surface().live.len(), 1);
    assert!(tool.render_settings().iter().any(|i| i.is_active && i.descriptor.name == ChartType::Pie));
}

#[test]
fn color_picker_flow_through_the_tool() {
    let mut tool = editable(ChartData {
        chart_type: Some(ChartType::Pie),
        ..ChartData::default()
    });

    tool.handle(PickerEvent::Open { dataset: 0, index: 2 }).unwrap();
    // the opening click must not close the popup
    tool.handle(PickerEvent::ClickOutside).unwrap();
    assert!(tool.picker().is_open());
    tool.handle(PickerEvent::Tick).unwrap();
    tool.handle(PickerEvent::ClickTarget).unwrap();
    assert!(tool.picker().is_open());

    let r = tool.handle(PickerEvent::Pick { color: "#6C5CE7".into() }).unwrap();
    assert_eq!(r, Refresh::Redraw);
    assert_eq!(tool.picker().state(), PickerState::Closed);
    let row = tool.settings_panel().unwrap().datasets[0].row(2).unwrap();
    assert_eq!(row.color, "#6C5CE7");
    let spec = tool.renderer().surface().last();
    assert_eq!(spec.data.datasets[0].background_color.at(2), Some("#6C5CE7"));

    // an armed popup closes on an outside click
    tool.handle(PickerEvent::Open { dataset: 0, index: 0 }).unwrap();
    tool.handle(PickerEvent::Tick).unwrap();
    tool.handle(PickerEvent::ClickOutside).unwrap();
    assert!(!tool.picker().is_open());
}

#[test]
fn title_editing_through_the_tool() {
    let mut tool = editable(ChartData::default());
    let draws_before = tool.renderer().surface().drawn.len();
    tool.handle(TitleEvent::Click).unwrap();
    tool.handle(TitleEvent::Input { text: "  Budget  ".into() }).unwrap();
    assert_eq!(tool.handle(TitleEvent::Enter).unwrap(), Refresh::Redraw);
    assert_eq!(tool.save().title, "Budget");
    let spec = tool.renderer().surface().last();
    assert!(spec.title_visible());
    assert_eq!(spec.title(), "Budget");

    tool.handle(TitleEvent::Click).unwrap();
    tool.handle(TitleEvent::Input { text: "discarded".into() }).unwrap();
    assert_eq!(tool.handle(TitleEvent::Escape).unwrap(), Refresh::None);
    assert_eq!(tool.save().title, "Budget");
    assert_eq!(tool.renderer().surface().drawn.len(), draws_before + 1);
}

#[test]
fn scripted_events_deserialize() {
    let script = r##"[
        {"target": "settings", "event": "labelsChanged", "text": "A, B"},
        {"target": "settings", "event": "colorModeToggled", "dataset": 0, "enabled": true},
        {"target": "picker", "action": "open", "dataset": 0, "index": 1},
        {"target": "picker", "action": "pick", "color": "#E17055"},
        {"target": "tune", "chartType": "line"},
        {"target": "title", "action": "click"},
        {"target": "title", "action": "input", "text": "Scripted"},
        {"target": "title", "action": "blur"}
    ]"##;
    let events: Vec<ToolEvent> = serde_json::from_str(script).unwrap();
    let mut tool = editable(ChartData::default());
    for e in events {
        tool.handle(e).unwrap();
    }
    let saved = tool.save();
    assert_eq!(saved.labels, vec!["A", "B"]);
    assert_eq!(saved.chart_type, ChartType::Line);
    assert_eq!(saved.title, "Scripted");
    assert!(saved.datasets[0].multi_color());
    match &saved.datasets[0].background_color {
        chart_block::BackgroundColor::PerPoint(v) => assert_eq!(v[1], "#E17055"),
        other => panic!("expected per-point colors, got {other:?}"),
    }
}

#[test]
fn static_descriptor() {
    assert_eq!(ChartTool::<RecordingSurface>::toolbox().title, "Chart");
    assert!(ChartTool::<RecordingSurface>::is_read_only_supported());
    assert_eq!(ChartTool::<RecordingSurface>::tunes().len(), 6);
}
