//! Settings events and the handlers that apply them to a [`ChartConfig`].
//!
//! Handlers never fail: malformed input and out-of-range targets leave the
//! model untouched and report [`Refresh::None`].

use serde::{Deserialize, Serialize};

use crate::models::{BackgroundColor, ChartConfig, Dataset};
use crate::palette::Palette;
use crate::refresh::Refresh;

/// One user edit in the settings panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum SettingsEvent {
    LabelsChanged { text: String },
    AddDataset,
    RemoveDataset { dataset: usize },
    NameChanged { dataset: usize, text: String },
    ValuesChanged { dataset: usize, text: String },
    PointValueChanged { dataset: usize, index: usize, text: String },
    PointColorPicked { dataset: usize, index: usize, color: String },
    ColorModeToggled { dataset: usize, enabled: bool },
    ScalarColorPicked { dataset: usize, color: String },
}

impl SettingsEvent {
    /// Dataset the event addresses, if any.
    pub fn dataset(&self) -> Option<usize> {
        match self {
            SettingsEvent::LabelsChanged { .. } | SettingsEvent::AddDataset => None,
            SettingsEvent::RemoveDataset { dataset }
            | SettingsEvent::NameChanged { dataset, .. }
            | SettingsEvent::ValuesChanged { dataset, .. }
            | SettingsEvent::PointValueChanged { dataset, .. }
            | SettingsEvent::PointColorPicked { dataset, .. }
            | SettingsEvent::ColorModeToggled { dataset, .. }
            | SettingsEvent::ScalarColorPicked { dataset, .. } => Some(*dataset),
        }
    }
}

/// Split comma-separated labels, trimming and dropping empty entries.
pub fn parse_labels(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split comma-separated numbers; entries that do not parse to a finite value are dropped.
pub fn parse_values(text: &str) -> Vec<f64> {
    text.split(',').filter_map(parse_number).collect()
}

/// Lenient float parse: leading whitespace is skipped and the longest numeric
/// prefix is used (`"2.5kg"` → 2.5). Returns `None` for no digits or non-finite results.
pub fn parse_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Apply `event` to `config` and report what has to be refreshed.
pub fn apply(config: &mut ChartConfig, event: &SettingsEvent, palette: &Palette) -> Refresh {
    log::trace!("settings event: {event:?}");
    match event {
        SettingsEvent::LabelsChanged { text } => {
            config.labels = parse_labels(text);
            Refresh::Redraw
        }
        SettingsEvent::AddDataset => {
            let n = config.datasets.len();
            config.datasets.push(Dataset::new(
                format!("Dataset {}", n + 1),
                vec![0.0; config.labels.len()],
                BackgroundColor::Single(palette.color(n).to_string()),
            ));
            log::debug!("added dataset #{}", n + 1);
            Refresh::RebuildDatasets
        }
        SettingsEvent::RemoveDataset { dataset } => {
            if config.datasets.len() <= 1 {
                log::warn!("refusing to remove the last dataset");
                return Refresh::None;
            }
            if *dataset >= config.datasets.len() {
                return Refresh::None;
            }
            config.datasets.remove(*dataset);
            log::debug!("removed dataset at index {dataset}");
            Refresh::RebuildDatasets
        }
        SettingsEvent::NameChanged { dataset, text } => {
            with_dataset(config, *dataset, |ds| {
                ds.label = text.clone();
                Refresh::Redraw
            })
        }
        SettingsEvent::ValuesChanged { dataset, text } => {
            with_dataset(config, *dataset, |ds| {
                ds.data = parse_values(text);
                Refresh::Redraw
            })
        }
        SettingsEvent::PointValueChanged {
            dataset,
            index,
            text,
        } => {
            // rows exist for labels only
            if *index >= config.labels.len() {
                return Refresh::None;
            }
            let Some(value) = parse_number(text) else {
                return Refresh::None;
            };
            with_dataset(config, *dataset, |ds| {
                if ds.data.len() <= *index {
                    ds.data.resize(index + 1, 0.0);
                }
                ds.data[*index] = value;
                Refresh::Redraw
            })
        }
        SettingsEvent::PointColorPicked {
            dataset,
            index,
            color,
        } if *index < config.labels.len() => with_dataset(config, *dataset, |ds| {
            let mut colors = match &ds.background_color {
                BackgroundColor::PerPoint(v) => v.clone(),
                BackgroundColor::Single(_) => palette.cycle(ds.data.len()),
            };
            while colors.len() <= *index {
                colors.push(palette.color(colors.len()).to_string());
            }
            colors[*index] = color.clone();
            ds.background_color = BackgroundColor::PerPoint(colors);
            Refresh::Redraw
        }),
        SettingsEvent::PointColorPicked { .. } => Refresh::None,
        SettingsEvent::ColorModeToggled { dataset, enabled } => {
            let rows = config.labels.len();
            with_dataset(config, *dataset, |ds| {
                set_color_mode(ds, *enabled, rows, palette);
                log::debug!(
                    "dataset {dataset}: per-value colors {}",
                    if *enabled { "on" } else { "off" }
                );
                Refresh::RebuildDatasets
            })
        }
        SettingsEvent::ScalarColorPicked { dataset, color } => {
            with_dataset(config, *dataset, |ds| {
                ds.background_color = BackgroundColor::Single(color.clone());
                Refresh::Redraw
            })
        }
    }
}

fn with_dataset(
    config: &mut ChartConfig,
    idx: usize,
    f: impl FnOnce(&mut Dataset) -> Refresh,
) -> Refresh {
    match config.dataset_mut(idx) {
        Some(ds) => f(ds),
        None => Refresh::None,
    }
}

/// The one eager color conversion in the model.
///
/// Turning per-value colors on sizes the sequence to cover every row, and never
/// below one entry so the current scalar survives a round trip.
fn set_color_mode(ds: &mut Dataset, enabled: bool, rows: usize, palette: &Palette) {
    ds.use_multi_color = Some(enabled);
    if enabled {
        if let BackgroundColor::Single(current) = &ds.background_color {
            let len = ds.data.len().max(rows).max(1);
            let colors = (0..len)
                .map(|i| {
                    if i == 0 {
                        current.clone()
                    } else {
                        palette.color(i).to_string()
                    }
                })
                .collect();
            ds.background_color = BackgroundColor::PerPoint(colors);
        }
    } else {
        ds.background_color = BackgroundColor::Single(ds.background_color.resolved_scalar(palette));
    }
}
