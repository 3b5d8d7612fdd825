//! Settings panel: view tree, edit handlers, and the per-value color popup.
//!
//! The builder derives a [`SettingsPanel`] from a [`ChartConfig`]. After an
//! edit the owner decides from the [`Refresh`](crate::Refresh) signal whether
//! to patch one control in place ([`SettingsPanel::patch`]), rebuild the
//! dataset editors ([`SettingsPanelBuilder::refresh_datasets`]) or rebuild
//! everything ([`SettingsPanelBuilder::build`]).

pub mod color_picker;
pub mod events;
pub mod view;

pub use color_picker::{ColorPicker, PickerEvent, PickerState, PickerTarget};
pub use events::{SettingsEvent, apply, parse_labels, parse_number, parse_values};
pub use view::{
    ColorGrid, ColorModeToggle, DatasetEditor, LabelEcho, SettingsPanel, Swatch, TextField,
    ValueRow, ValueRows,
};

use crate::models::{ChartConfig, Dataset};
use crate::palette::Palette;

pub const LABELS_FIELD: &str = "Labels (comma-separated)";
pub const LABELS_PLACEHOLDER: &str = "Label 1, Label 2, Label 3";
pub const ADD_DATASET: &str = "+ Add Dataset";
pub const REMOVE_DATASET: &str = "Remove dataset";
pub const NAME_FIELD: &str = "Name";
pub const NAME_PLACEHOLDER: &str = "Enter dataset name";
pub const VALUES_FIELD: &str = "Values";
pub const VALUES_PLACEHOLDER: &str = "Enter values separated by commas";
pub const PER_VALUE_TOGGLE: &str = "Per value";
pub const SEGMENTS_HEADING: &str = "Segments";
pub const VALUES_COLORS_HEADING: &str = "Values & Colors";

/// `[12.0, 7.5]` → `"12, 7.5"`.
pub fn format_values(data: &[f64]) -> String {
    data.iter()
        .map(|v| format_value(*v))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_value(v: f64) -> String {
    format!("{v}")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsPanelBuilder {
    palette: Palette,
}

impl SettingsPanelBuilder {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn build(&self, config: &ChartConfig) -> SettingsPanel {
        SettingsPanel {
            labels_field: TextField::new(
                LABELS_FIELD,
                config.labels.join(", "),
                LABELS_PLACEHOLDER,
            ),
            datasets: self.dataset_editors(config),
            add_button: (!config.is_segment_based()).then(|| ADD_DATASET.to_string()),
            generation: 0,
        }
    }

    /// Rebuild the dataset editors only; the labels field keeps whatever the user typed.
    pub fn refresh_datasets(&self, panel: &mut SettingsPanel, config: &ChartConfig) {
        panel.datasets = self.dataset_editors(config);
        panel.add_button = (!config.is_segment_based()).then(|| ADD_DATASET.to_string());
        panel.generation += 1;
        log::debug!(
            "rebuilt {} dataset editor(s), generation {}",
            panel.datasets.len(),
            panel.generation
        );
    }

    fn dataset_editors(&self, config: &ChartConfig) -> Vec<DatasetEditor> {
        config
            .datasets
            .iter()
            .enumerate()
            .map(|(i, ds)| self.dataset_editor(config, i, ds))
            .collect()
    }

    fn dataset_editor(&self, config: &ChartConfig, index: usize, ds: &Dataset) -> DatasetEditor {
        let segment = config.is_segment_based();
        let heading = if segment {
            "Data".to_string()
        } else {
            format!("Dataset {}", index + 1)
        };

        if segment {
            return DatasetEditor {
                index,
                heading,
                removable: false,
                name: None,
                values: None,
                color_mode: None,
                rows: Some(self.value_rows(config, ds, true)),
                color_grid: None,
            };
        }

        let multi = ds.multi_color();
        DatasetEditor {
            index,
            heading,
            removable: config.datasets.len() > 1,
            name: Some(TextField::new(NAME_FIELD, ds.label.clone(), NAME_PLACEHOLDER)),
            values: (!multi).then(|| {
                TextField::new(VALUES_FIELD, format_values(&ds.data), VALUES_PLACEHOLDER)
            }),
            color_mode: Some(ColorModeToggle {
                label: PER_VALUE_TOGGLE.to_string(),
                checked: multi,
            }),
            rows: multi.then(|| self.value_rows(config, ds, false)),
            color_grid: (!multi).then(|| self.color_grid(&ds.background_color.resolved_scalar(&self.palette))),
        }
    }

    fn value_rows(&self, config: &ChartConfig, ds: &Dataset, segment: bool) -> ValueRows {
        let rows = config
            .labels
            .iter()
            .enumerate()
            .map(|(idx, label)| ValueRow {
                index: idx,
                label: if segment {
                    LabelEcho::DisabledInput(label.clone())
                } else {
                    LabelEcho::Text(label.clone())
                },
                value: format_value(ds.value_at(idx)),
                color: ds.background_color.color_at(idx, &self.palette),
            })
            .collect();
        ValueRows {
            heading: if segment {
                SEGMENTS_HEADING
            } else {
                VALUES_COLORS_HEADING
            }
            .to_string(),
            rows,
        }
    }

    fn color_grid(&self, selected: &str) -> ColorGrid {
        ColorGrid {
            swatches: self
                .palette
                .colors()
                .iter()
                .map(|c| Swatch {
                    color: c.to_string(),
                    selected: c.eq_ignore_ascii_case(selected),
                })
                .collect(),
        }
    }
}

impl SettingsPanel {
    /// Mirror a redraw-only edit into the existing controls.
    ///
    /// Text inputs keep the raw text the user typed, even when the model
    /// ignored it.
    pub fn patch(&mut self, event: &SettingsEvent) {
        match event {
            SettingsEvent::LabelsChanged { text } => self.labels_field.value = text.clone(),
            SettingsEvent::NameChanged { dataset, text } => {
                if let Some(f) = self.dataset_mut(*dataset).and_then(|d| d.name.as_mut()) {
                    f.value = text.clone();
                }
            }
            SettingsEvent::ValuesChanged { dataset, text } => {
                if let Some(f) = self.dataset_mut(*dataset).and_then(|d| d.values.as_mut()) {
                    f.value = text.clone();
                }
            }
            SettingsEvent::PointValueChanged {
                dataset,
                index,
                text,
            } => {
                if let Some(row) = self.dataset_mut(*dataset).and_then(|d| d.row_mut(*index)) {
                    row.value = text.clone();
                }
            }
            SettingsEvent::PointColorPicked {
                dataset,
                index,
                color,
            } => {
                if let Some(row) = self.dataset_mut(*dataset).and_then(|d| d.row_mut(*index)) {
                    row.color = color.clone();
                }
            }
            SettingsEvent::ScalarColorPicked { dataset, color } => {
                if let Some(grid) = self.dataset_mut(*dataset).and_then(|d| d.color_grid.as_mut()) {
                    for s in &mut grid.swatches {
                        s.selected = s.color.eq_ignore_ascii_case(color);
                    }
                }
            }
            SettingsEvent::AddDataset
            | SettingsEvent::RemoveDataset { .. }
            | SettingsEvent::ColorModeToggled { .. } => {}
        }
    }
}
