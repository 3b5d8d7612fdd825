//! The chart block as the host editor sees it.
//!
//! A [`ChartTool`] is built from possibly partial data, rendered once, then
//! driven by [`ToolEvent`]s. Every event mutates the model and yields a
//! [`Refresh`]; the tool applies it to its view and redraws the chart.

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};
use crate::models::{ChartConfig, ChartData, ChartType};
use crate::palette::Palette;
use crate::refresh::Refresh;
use crate::render::{ChartRenderer, ChartSurface};
use crate::settings::{self, ColorPicker, PickerEvent, SettingsEvent, SettingsPanel, SettingsPanelBuilder};
use crate::title::{OVERLAY_HEIGHT_PX, OVERLAY_HINT, TitleEditor, TitleEvent};
use crate::tunes::{self, TUNES, TuneDescriptor, TuneItem};

/// Construction input handed over by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolInit {
    #[serde(default)]
    pub data: ChartData,
    #[serde(default)]
    pub read_only: bool,
}

impl ToolInit {
    pub fn editable(data: ChartData) -> Self {
        Self {
            data,
            read_only: false,
        }
    }

    pub fn read_only(data: ChartData) -> Self {
        Self {
            data,
            read_only: true,
        }
    }
}

/// Entry for the host's block-insertion menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Toolbox {
    pub title: &'static str,
    pub icon: &'static str,
}

pub const TOOLBOX: Toolbox = Toolbox {
    title: "Chart",
    icon: r#"<svg width="17" height="15" viewBox="0 0 17 15" xmlns="http://www.w3.org/2000/svg"><rect x="1" y="5" width="3" height="9" rx="1" fill="currentColor"/><rect x="7" y="2" width="3" height="12" rx="1" fill="currentColor"/><rect x="13" y="7" width="3" height="7" rx="1" fill="currentColor"/></svg>"#,
};

/// Click-catching band over the top of the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleOverlay {
    pub height_px: u32,
    pub hint: &'static str,
}

/// What `render()` hands to the host besides the chart itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolView {
    pub title_overlay: Option<TitleOverlay>,
    pub settings: Option<SettingsPanel>,
}

/// Every input a host can feed into the tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "camelCase")]
pub enum ToolEvent {
    Settings(SettingsEvent),
    Picker(PickerEvent),
    Tune {
        #[serde(rename = "chartType")]
        chart_type: ChartType,
    },
    Title(TitleEvent),
}

impl From<SettingsEvent> for ToolEvent {
    fn from(e: SettingsEvent) -> Self {
        ToolEvent::Settings(e)
    }
}

impl From<PickerEvent> for ToolEvent {
    fn from(e: PickerEvent) -> Self {
        ToolEvent::Picker(e)
    }
}

impl From<TitleEvent> for ToolEvent {
    fn from(e: TitleEvent) -> Self {
        ToolEvent::Title(e)
    }
}

pub struct ChartTool<S: ChartSurface> {
    config: ChartConfig,
    read_only: bool,
    renderer: ChartRenderer<S>,
    builder: SettingsPanelBuilder,
    view: Option<ToolView>,
    picker: ColorPicker,
    title: TitleEditor,
}

impl<S: ChartSurface> ChartTool<S> {
    pub fn new(init: ToolInit, surface: S) -> Self {
        Self::with_palette(init, surface, Palette::default())
    }

    pub fn with_palette(init: ToolInit, surface: S, palette: Palette) -> Self {
        Self {
            config: ChartConfig::from_partial(init.data),
            read_only: init.read_only,
            renderer: ChartRenderer::new(surface, palette),
            builder: SettingsPanelBuilder::new(palette),
            view: None,
            picker: ColorPicker::new(),
            title: TitleEditor::default(),
        }
    }

    pub fn toolbox() -> Toolbox {
        TOOLBOX
    }

    pub fn is_read_only_supported() -> bool {
        true
    }

    pub fn tunes() -> &'static [TuneDescriptor] {
        &TUNES
    }

    /// Tune items for this block, with the current type marked active.
    pub fn render_settings(&self) -> Vec<TuneItem> {
        tunes::items(&self.config)
    }

    /// Build the view and draw the chart. Callable once per tool.
    pub fn render(&mut self) -> Result<&ToolView> {
        if self.view.is_some() {
            return Err(ChartError::AlreadyRendered);
        }
        let view = if self.read_only {
            ToolView {
                title_overlay: None,
                settings: None,
            }
        } else {
            ToolView {
                title_overlay: Some(TitleOverlay {
                    height_px: OVERLAY_HEIGHT_PX,
                    hint: OVERLAY_HINT,
                }),
                settings: Some(self.builder.build(&self.config)),
            }
        };
        self.renderer.render(&self.config)?;
        log::debug!(
            "rendered {} tool{}",
            self.config.chart_type,
            if self.read_only { " (read-only)" } else { "" }
        );
        Ok(self.view.insert(view))
    }

    /// Apply one host event. Read-only tools refuse every event.
    pub fn handle(&mut self, event: impl Into<ToolEvent>) -> Result<Refresh> {
        let event = event.into();
        if self.read_only {
            log::trace!("read-only tool ignored {event:?}");
            return Ok(Refresh::None);
        }
        let palette = *self.renderer.palette();
        match event {
            ToolEvent::Settings(e) => {
                let refresh = settings::apply(&mut self.config, &e, &palette);
                self.apply_refresh(refresh, Some(&e))
            }
            ToolEvent::Picker(p) => match self.picker.handle(&p) {
                Some(e) => {
                    let refresh = settings::apply(&mut self.config, &e, &palette);
                    self.apply_refresh(refresh, Some(&e))
                }
                None => Ok(Refresh::None),
            },
            ToolEvent::Tune { chart_type } => {
                let refresh = tunes::select(&mut self.config, chart_type);
                self.apply_refresh(refresh, None)
            }
            ToolEvent::Title(t) => {
                let refresh = self.title.handle(&mut self.config, &t);
                self.apply_refresh(refresh, None)
            }
        }
    }

    fn apply_refresh(&mut self, refresh: Refresh, edit: Option<&SettingsEvent>) -> Result<Refresh> {
        let Some(view) = self.view.as_mut() else {
            return Ok(refresh);
        };
        if let Some(panel) = view.settings.as_mut() {
            match refresh {
                Refresh::None | Refresh::Redraw => {
                    if let Some(e) = edit {
                        panel.patch(e);
                    }
                }
                Refresh::RebuildDatasets => self.builder.refresh_datasets(panel, &self.config),
                Refresh::RebuildPanel => {
                    let generation = panel.generation + 1;
                    *panel = self.builder.build(&self.config);
                    panel.generation = generation;
                    log::debug!("rebuilt settings panel, generation {generation}");
                }
            }
        }
        if refresh.is_structural() {
            self.picker.close();
        }
        if refresh.needs_redraw() {
            self.renderer.render(&self.config)?;
        }
        Ok(refresh)
    }

    /// The model, verbatim.
    pub fn save(&self) -> &ChartConfig {
        &self.config
    }

    pub fn into_config(self) -> ChartConfig {
        self.config
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn view(&self) -> Option<&ToolView> {
        self.view.as_ref()
    }

    pub fn settings_panel(&self) -> Option<&SettingsPanel> {
        self.view.as_ref().and_then(|v| v.settings.as_ref())
    }

    /// The live chart handle, once rendered.
    pub fn chart(&self) -> Option<&S::Handle> {
        self.renderer.current()
    }

    pub fn renderer(&self) -> &ChartRenderer<S> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut ChartRenderer<S> {
        &mut self.renderer
    }

    pub fn picker(&self) -> &ColorPicker {
        &self.picker
    }

    pub fn title_editor(&self) -> &TitleEditor {
        &self.title
    }
}
