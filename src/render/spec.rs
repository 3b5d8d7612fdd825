//! Library-neutral drawing request, shaped like a Chart.js configuration object.

use crate::models::ChartType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fill or border color as handed to the drawing library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Single(String),
    PerPoint(Vec<String>),
}

impl ColorSpec {
    /// Color for data index `idx`. Sequences wrap around when shorter than the data;
    /// an empty sequence yields `None`.
    pub fn at(&self, idx: usize) -> Option<&str> {
        match self {
            ColorSpec::Single(c) => Some(c.as_str()),
            ColorSpec::PerPoint(v) if v.is_empty() => None,
            ColorSpec::PerPoint(v) => Some(v[idx % v.len()].as_str()),
        }
    }

    /// Representative color of the whole series (legend swatch, line stroke).
    pub fn primary(&self) -> Option<&str> {
        self.at(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSpec {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: ColorSpec,
    pub border_color: ColorSpec,
    pub border_width: u32,
    pub tension: f64,
    /// Host fields passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DatasetSpec {
    #[inline]
    pub fn value_at(&self, idx: usize) -> f64 {
        self.data.get(idx).copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataSpec {
    pub labels: Vec<String>,
    pub datasets: Vec<DatasetSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendOptions {
    pub display: bool,
    pub position: LegendPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSpec {
    pub size: u32,
    pub weight: FontWeight,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleOptions {
    pub display: bool,
    pub text: String,
    pub font: FontSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginOptions {
    pub legend: LegendOptions,
    pub title: TitleOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub plugins: PluginOptions,
}

/// Everything one draw call needs: `{type, data: {labels, datasets}, options}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub data: ChartDataSpec,
    pub options: ChartOptions,
}

impl ChartSpec {
    pub fn legend_visible(&self) -> bool {
        self.options.plugins.legend.display
    }

    pub fn title_visible(&self) -> bool {
        self.options.plugins.title.display
    }

    pub fn title(&self) -> &str {
        &self.options.plugins.title.text
    }
}
