//! The settings panel as plain data: what a host draws and where events come from.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextField {
    pub label: String,
    pub value: String,
    pub placeholder: String,
}

impl TextField {
    pub fn new(label: &str, value: String, placeholder: &str) -> Self {
        Self {
            label: label.to_string(),
            value,
            placeholder: placeholder.to_string(),
        }
    }
}

/// How a value row echoes its category label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "camelCase")]
pub enum LabelEcho {
    /// Greyed-out input (segment-based charts).
    DisabledInput(String),
    /// Plain text cell (series charts in per-value mode).
    Text(String),
}

impl LabelEcho {
    pub fn text(&self) -> &str {
        match self {
            LabelEcho::DisabledInput(s) | LabelEcho::Text(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueRow {
    pub index: usize,
    pub label: LabelEcho,
    /// Text shown in the numeric input.
    pub value: String,
    /// Swatch color of the picker button.
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueRows {
    pub heading: String,
    pub rows: Vec<ValueRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Swatch {
    pub color: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorGrid {
    pub swatches: Vec<Swatch>,
}

impl ColorGrid {
    pub fn selected(&self) -> Option<&str> {
        self.swatches
            .iter()
            .find(|s| s.selected)
            .map(|s| s.color.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorModeToggle {
    pub label: String,
    pub checked: bool,
}

/// Editor block for one dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetEditor {
    pub index: usize,
    pub heading: String,
    pub removable: bool,
    pub name: Option<TextField>,
    pub values: Option<TextField>,
    pub color_mode: Option<ColorModeToggle>,
    pub rows: Option<ValueRows>,
    pub color_grid: Option<ColorGrid>,
}

impl DatasetEditor {
    pub fn row_count(&self) -> usize {
        self.rows.as_ref().map_or(0, |r| r.rows.len())
    }

    pub fn row(&self, idx: usize) -> Option<&ValueRow> {
        self.rows.as_ref().and_then(|r| r.rows.get(idx))
    }

    pub(crate) fn row_mut(&mut self, idx: usize) -> Option<&mut ValueRow> {
        self.rows.as_mut().and_then(|r| r.rows.get_mut(idx))
    }
}

/// The whole settings panel below the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsPanel {
    pub labels_field: TextField,
    pub datasets: Vec<DatasetEditor>,
    /// Caption of the add-dataset button, when shown.
    pub add_button: Option<String>,
    /// Bumped on every dataset-subtree rebuild so hosts can drop stale widget state.
    pub generation: u64,
}

impl SettingsPanel {
    pub fn dataset(&self, idx: usize) -> Option<&DatasetEditor> {
        self.datasets.get(idx)
    }

    pub(crate) fn dataset_mut(&mut self, idx: usize) -> Option<&mut DatasetEditor> {
        self.datasets.get_mut(idx)
    }
}
