//! chart_block
//!
//! A chart block for block-based rich-text editors: the chart model, a live
//! settings panel that keeps labels × datasets × per-point colors in sync, and
//! rendering through a pluggable drawing surface (plotters by default).
//!
//! ### Features
//! - Bar, line, pie, doughnut, radar and polar-area charts
//! - Settings edits as plain events, each reporting what has to be refreshed
//! - Per-value colors for series charts, mandatory per-segment colors for the rest
//! - Click-to-edit title and a per-type tune menu
//! - SVG/PNG output, JSON storage and CSV export
//!
//! ### Example
//! ```no_run
//! use chart_block::{ChartTool, PlottersSurface, SettingsEvent, ToolInit};
//!
//! let mut tool = ChartTool::new(ToolInit::default(), PlottersSurface::svg(800, 400));
//! tool.render()?;
//! tool.handle(SettingsEvent::LabelsChanged { text: "Q1, Q2, Q3".into() })?;
//! tool.handle(SettingsEvent::AddDataset)?;
//! let svg = tool.chart().and_then(|c| c.svg()).unwrap_or_default();
//! chart_block::storage::save_config(tool.save(), "chart.json")?;
//! # let _ = svg;
//! # Ok::<(), chart_block::ChartError>(())
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod palette;
pub mod refresh;
pub mod render;
pub mod settings;
pub mod storage;
pub mod title;
pub mod tool;
pub mod tunes;

pub use config::ToolConfig;
pub use error::{ChartError, Result};
pub use models::{BackgroundColor, ChartConfig, ChartData, ChartType, Dataset};
pub use palette::Palette;
pub use refresh::Refresh;
pub use render::{ChartRenderer, ChartSpec, ChartSurface, PlottersSurface};
pub use settings::{SettingsEvent, SettingsPanel, SettingsPanelBuilder};
pub use tool::{ChartTool, ToolEvent, ToolInit, ToolView};
