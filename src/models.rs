use crate::palette::Palette;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The six supported chart types. Serialized with the names the host stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Pie,
    Doughnut,
    Radar,
    PolarArea,
}

impl ChartType {
    pub const ALL: [ChartType; 6] = [
        ChartType::Bar,
        ChartType::Line,
        ChartType::Pie,
        ChartType::Doughnut,
        ChartType::Radar,
        ChartType::PolarArea,
    ];

    /// Types whose visual encoding is per category, so per-point colors are mandatory.
    pub fn is_segment_based(self) -> bool {
        matches!(
            self,
            ChartType::Pie | ChartType::Doughnut | ChartType::PolarArea | ChartType::Radar
        )
    }

    /// Stored name (`"polarArea"` etc).
    pub fn as_str(self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Pie => "pie",
            ChartType::Doughnut => "doughnut",
            ChartType::Radar => "radar",
            ChartType::PolarArea => "polarArea",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dataset fill: one color for the whole series or one per data index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BackgroundColor {
    Single(String),
    PerPoint(Vec<String>),
}

impl Default for BackgroundColor {
    fn default() -> Self {
        BackgroundColor::Single(Palette::default().first().to_string())
    }
}

impl From<&str> for BackgroundColor {
    fn from(s: &str) -> Self {
        BackgroundColor::Single(s.to_string())
    }
}

impl From<Vec<String>> for BackgroundColor {
    fn from(v: Vec<String>) -> Self {
        BackgroundColor::PerPoint(v)
    }
}

impl BackgroundColor {
    pub fn is_per_point(&self) -> bool {
        matches!(self, BackgroundColor::PerPoint(_))
    }

    /// Scalar color for single-color mode: the stored scalar, or the first
    /// non-empty sequence entry, or the palette's first color.
    pub fn resolved_scalar(&self, palette: &Palette) -> String {
        match self {
            BackgroundColor::Single(c) => c.clone(),
            BackgroundColor::PerPoint(v) => v
                .first()
                .filter(|c| !c.is_empty())
                .cloned()
                .unwrap_or_else(|| palette.first().to_string()),
        }
    }

    /// Per-point color at `idx`, falling back to the palette color for that index.
    pub fn color_at(&self, idx: usize, palette: &Palette) -> String {
        match self {
            BackgroundColor::PerPoint(v) => v
                .get(idx)
                .filter(|c| !c.is_empty())
                .cloned()
                .unwrap_or_else(|| palette.color(idx).to_string()),
            BackgroundColor::Single(_) => palette.color(idx).to_string(),
        }
    }
}

/// One series of values sharing the chart's labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub label: String,
    #[serde(default, deserialize_with = "de_numbers_lenient")]
    pub data: Vec<f64>,
    #[serde(default)]
    pub background_color: BackgroundColor,
    /// Per-value color mode. Kept as given so an explicit `false` is saved back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_multi_color: Option<bool>,
    /// Fields this tool does not interpret; kept so `save()` hands them back.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Dataset {
    pub fn new(label: impl Into<String>, data: Vec<f64>, color: BackgroundColor) -> Self {
        Self {
            label: label.into(),
            data,
            background_color: color,
            use_multi_color: None,
            extra: Map::new(),
        }
    }

    pub fn multi_color(&self) -> bool {
        self.use_multi_color.unwrap_or(false)
    }

    /// Bounds-safe read: indices past the end read as 0.
    #[inline]
    pub fn value_at(&self, idx: usize) -> f64 {
        self.data.get(idx).copied().unwrap_or(0.0)
    }
}

/// Serde helper: accept JSON numbers, numeric strings, and `null` for data values.
/// Anything that does not coerce to a finite number becomes 0.
fn de_numbers_lenient<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Vec<Value> = Vec::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|v| match v {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()).unwrap_or(0.0),
            _ => 0.0,
        })
        .collect())
}

/// The chart block's whole state; what `save()` returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub title: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig::from_partial(ChartData::default())
    }
}

impl ChartConfig {
    /// Fill every missing field of host-provided data with the defaults.
    pub fn from_partial(data: ChartData) -> Self {
        Self {
            chart_type: data.chart_type.unwrap_or_default(),
            labels: data.labels.unwrap_or_else(default_labels),
            datasets: data.datasets.unwrap_or_else(default_datasets),
            title: data.title.unwrap_or_default(),
        }
    }

    pub fn is_segment_based(&self) -> bool {
        self.chart_type.is_segment_based()
    }

    pub fn dataset(&self, idx: usize) -> Option<&Dataset> {
        self.datasets.get(idx)
    }

    pub fn dataset_mut(&mut self, idx: usize) -> Option<&mut Dataset> {
        self.datasets.get_mut(idx)
    }
}

/// Possibly partial chart data as handed over by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<ChartType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasets: Option<Vec<Dataset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl From<ChartConfig> for ChartData {
    fn from(c: ChartConfig) -> Self {
        Self {
            chart_type: Some(c.chart_type),
            labels: Some(c.labels),
            datasets: Some(c.datasets),
            title: Some(c.title),
        }
    }
}

fn default_labels() -> Vec<String> {
    (1..=4).map(|i| format!("Label {i}")).collect()
}

fn default_datasets() -> Vec<Dataset> {
    vec![Dataset::new(
        "Dataset 1",
        vec![12.0, 19.0, 3.0, 5.0],
        BackgroundColor::Single(Palette::default().first().to_string()),
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_classification_is_total() {
        let segment: Vec<ChartType> = ChartType::ALL
            .into_iter()
            .filter(|t| t.is_segment_based())
            .collect();
        assert_eq!(
            segment,
            vec![
                ChartType::Pie,
                ChartType::Doughnut,
                ChartType::Radar,
                ChartType::PolarArea
            ]
        );
    }

    #[test]
    fn chart_type_names_round_trip() {
        for t in ChartType::ALL {
            assert_eq!(ChartType::parse(t.as_str()), Some(t));
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
        assert_eq!(ChartType::parse("scatter"), None);
    }

    #[test]
    fn defaults_fill_missing_fields_independently() {
        let data: ChartData = serde_json::from_str(r#"{"type":"pie","title":"T"}"#).unwrap();
        let cfg = ChartConfig::from_partial(data);
        assert_eq!(cfg.chart_type, ChartType::Pie);
        assert_eq!(cfg.title, "T");
        assert_eq!(cfg.labels, vec!["Label 1", "Label 2", "Label 3", "Label 4"]);
        assert_eq!(cfg.datasets.len(), 1);
        assert_eq!(cfg.datasets[0].data, vec![12.0, 19.0, 3.0, 5.0]);
        assert_eq!(
            cfg.datasets[0].background_color,
            BackgroundColor::Single("#4A90E2".into())
        );
    }

    #[test]
    fn background_color_accepts_string_or_array() {
        let d: Dataset =
            serde_json::from_str(r##"{"label":"a","data":[1],"backgroundColor":"#fff"}"##).unwrap();
        assert_eq!(d.background_color, BackgroundColor::Single("#fff".into()));
        let d: Dataset = serde_json::from_str(
            r##"{"label":"a","data":[1,2],"backgroundColor":["#000","#111"]}"##,
        )
        .unwrap();
        assert!(d.background_color.is_per_point());
    }

    #[test]
    fn data_values_are_coerced() {
        let d: Dataset = serde_json::from_str(r#"{"data":[1, "2.5", null, "x"]}"#).unwrap();
        assert_eq!(d.data, vec![1.0, 2.5, 0.0, 0.0]);
        assert_eq!(d.label, "");
    }

    #[test]
    fn unknown_dataset_fields_survive_serialization() {
        let src = r##"{"label":"a","data":[1],"backgroundColor":"#fff","fill":true}"##;
        let d: Dataset = serde_json::from_str(src).unwrap();
        assert_eq!(d.extra.get("fill"), Some(&Value::Bool(true)));
        let back = serde_json::to_value(&d).unwrap();
        assert_eq!(back["fill"], Value::Bool(true));
        assert!(back.get("useMultiColor").is_none());
    }

    #[test]
    fn explicit_multi_color_flag_is_kept() {
        let src = r##"{"label":"a","data":[1],"backgroundColor":"#fff","useMultiColor":false}"##;
        let d: Dataset = serde_json::from_str(src).unwrap();
        assert_eq!(d.use_multi_color, Some(false));
        assert!(!d.multi_color());
        let back = serde_json::to_value(&d).unwrap();
        assert_eq!(back["useMultiColor"], Value::Bool(false));
    }

    #[test]
    fn bounds_safe_reads() {
        let d = Dataset::new("a", vec![1.0], BackgroundColor::PerPoint(vec!["".into()]));
        let p = Palette::default();
        assert_eq!(d.value_at(0), 1.0);
        assert_eq!(d.value_at(5), 0.0);
        assert_eq!(d.background_color.color_at(0, &p), p.color(0));
        assert_eq!(d.background_color.color_at(3, &p), p.color(3));
        assert_eq!(d.background_color.resolved_scalar(&p), p.first());
    }
}
