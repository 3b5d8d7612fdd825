//! Per-block tune menu: one entry per chart type.

use serde::Serialize;

use crate::models::{ChartConfig, ChartType};
use crate::refresh::Refresh;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TuneDescriptor {
    pub name: ChartType,
    /// Inline SVG markup.
    pub icon: &'static str,
    pub title: &'static str,
}

pub const TUNES: [TuneDescriptor; 6] = [
    TuneDescriptor {
        name: ChartType::Bar,
        icon: r#"<svg width="17" height="15"><rect x="1" y="5" width="3" height="9" fill="currentColor"/><rect x="7" y="2" width="3" height="12" fill="currentColor"/><rect x="13" y="7" width="3" height="7" fill="currentColor"/></svg>"#,
        title: "Bar Chart",
    },
    TuneDescriptor {
        name: ChartType::Line,
        icon: r#"<svg width="17" height="15"><path d="M1 14L5 8L9 11L16 1" stroke="currentColor" stroke-width="2" fill="none"/></svg>"#,
        title: "Line Chart",
    },
    TuneDescriptor {
        name: ChartType::Pie,
        icon: r#"<svg width="17" height="15"><circle cx="8.5" cy="7.5" r="6.5" fill="none" stroke="currentColor" stroke-width="2"/><path d="M8.5 1V7.5L14 4.5" fill="currentColor"/></svg>"#,
        title: "Pie Chart",
    },
    TuneDescriptor {
        name: ChartType::Doughnut,
        icon: r#"<svg width="17" height="15"><circle cx="8.5" cy="7.5" r="6.5" fill="none" stroke="currentColor" stroke-width="3"/></svg>"#,
        title: "Doughnut Chart",
    },
    TuneDescriptor {
        name: ChartType::Radar,
        icon: r#"<svg width="17" height="15"><polygon points="8.5,1 15,5 13,12 4,12 2,5" fill="none" stroke="currentColor" stroke-width="2"/></svg>"#,
        title: "Radar Chart",
    },
    TuneDescriptor {
        name: ChartType::PolarArea,
        icon: r#"<svg width="17" height="15"><path d="M8.5 1L12 7.5L8.5 14L5 7.5Z" fill="currentColor" opacity="0.5"/></svg>"#,
        title: "Polar Area Chart",
    },
];

/// A tune as offered to the host's menu chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TuneItem {
    #[serde(flatten)]
    pub descriptor: TuneDescriptor,
    pub is_active: bool,
    pub close_on_activate: bool,
}

pub fn descriptor(chart_type: ChartType) -> &'static TuneDescriptor {
    // TUNES covers every ChartType in declaration order
    &TUNES[chart_type as usize]
}

/// Menu items with the active entry marked.
pub fn items(config: &ChartConfig) -> Vec<TuneItem> {
    TUNES
        .iter()
        .map(|t| TuneItem {
            descriptor: *t,
            is_active: t.name == config.chart_type,
            close_on_activate: true,
        })
        .collect()
}

/// Switch chart type. Colors are left as stored; the panel is rebuilt because
/// the segment/series classification may flip.
pub fn select(config: &mut ChartConfig, chart_type: ChartType) -> Refresh {
    log::debug!("chart type {} -> {}", config.chart_type, chart_type);
    config.chart_type = chart_type;
    Refresh::RebuildPanel
}
