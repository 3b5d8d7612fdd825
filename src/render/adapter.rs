//! Translate the chart model into a [`ChartSpec`], resolving colors per dataset.
//!
//! The stored `backgroundColor` is not trusted to match the active color mode;
//! the right form is derived here on every redraw.

use super::spec::{
    ChartDataSpec, ChartOptions, ChartSpec, ColorSpec, DatasetSpec, FontSpec, FontWeight,
    LegendOptions, LegendPosition, PluginOptions, TitleOptions,
};
use crate::models::{BackgroundColor, ChartConfig, Dataset};
use crate::palette::{Palette, SEGMENT_BORDER};

pub const BORDER_WIDTH: u32 = 2;
pub const LINE_TENSION: f64 = 0.4;
pub const TITLE_FONT_SIZE: u32 = 16;

/// Build the full drawing request for `config`.
pub fn build_chart_spec(config: &ChartConfig, palette: &Palette) -> ChartSpec {
    let segment = config.is_segment_based();

    let datasets = config
        .datasets
        .iter()
        .map(|d| resolve_dataset(d, segment, palette))
        .collect();

    ChartSpec {
        chart_type: config.chart_type,
        data: ChartDataSpec {
            labels: config.labels.clone(),
            datasets,
        },
        options: ChartOptions {
            responsive: true,
            maintain_aspect_ratio: false,
            plugins: PluginOptions {
                legend: LegendOptions {
                    display: segment || config.datasets.len() > 1,
                    position: LegendPosition::Top,
                },
                title: TitleOptions {
                    display: !config.title.is_empty(),
                    text: config.title.clone(),
                    font: FontSpec {
                        size: TITLE_FONT_SIZE,
                        weight: FontWeight::Bold,
                    },
                },
            },
        },
    }
}

/// Host fields the adapter always sets itself.
const RESOLVED_KEYS: &[&str] = &["borderColor", "borderWidth", "tension"];

/// Resolve one dataset's fill and border for the active color mode.
pub fn resolve_dataset(dataset: &Dataset, segment: bool, palette: &Palette) -> DatasetSpec {
    let multi = segment || dataset.multi_color();

    let (background_color, border_color) = if multi {
        let fills = match &dataset.background_color {
            BackgroundColor::PerPoint(v) => v.clone(),
            BackgroundColor::Single(_) => palette.cycle(dataset.data.len()),
        };
        let border = if segment {
            ColorSpec::Single(SEGMENT_BORDER.to_string())
        } else {
            ColorSpec::PerPoint(fills.clone())
        };
        (ColorSpec::PerPoint(fills), border)
    } else {
        let fill = dataset.background_color.resolved_scalar(palette);
        (ColorSpec::Single(fill.clone()), ColorSpec::Single(fill))
    };

    let mut extra = dataset.extra.clone();
    for key in RESOLVED_KEYS {
        extra.remove(*key);
    }

    DatasetSpec {
        label: dataset.label.clone(),
        data: dataset.data.clone(),
        background_color,
        border_color,
        border_width: BORDER_WIDTH,
        tension: LINE_TENSION,
        extra,
    }
}
