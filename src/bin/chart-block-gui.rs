/*!
 * Desktop host for chart-block
 *
 * Hosts a single chart block the way a block editor would:
 * - Live chart preview with click-to-edit title
 * - Chart-type tune bar
 * - Settings panel (labels, datasets, per-value colors)
 * - Open/save chart records as JSON, export CSV/SVG/PNG
 */

use anyhow::Result;
use chart_block::palette::parse_color;
use chart_block::render::ChartOutput;
use chart_block::settings::{DatasetEditor, LabelEcho, PickerEvent, SettingsPanel, TextField};
use chart_block::title::{OVERLAY_HEIGHT_PX, TITLE_PLACEHOLDER, TitleEvent};
use chart_block::{
    ChartConfig, ChartTool, Palette, PlottersSurface, SettingsEvent, ToolConfig, ToolEvent, ToolInit,
    render, storage,
};
use eframe::egui;
use std::path::PathBuf;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let tool_cfg = match ToolConfig::load(None) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("{e}; using default configuration");
            ToolConfig::default()
        }
    };
    if !tool_cfg.register_fonts() {
        log::warn!("no font found, the preview will have no text");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 820.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Chart Block"),
        ..Default::default()
    };

    eframe::run_native(
        "Chart Block",
        options,
        Box::new(|_cc| Ok(Box::new(ChartBlockApp::new(tool_cfg)))),
    )
}

struct ChartBlockApp {
    tool_cfg: ToolConfig,
    tool: ChartTool<PlottersSurface>,
    read_only: bool,
    file: Option<PathBuf>,

    // Preview
    texture: Option<egui::TextureHandle>,
    texture_chart_id: u64,
    focus_title: bool,

    // Rect of the swatch button that opened the color popup
    picker_anchor: Option<egui::Rect>,

    status_message: String,
    error_message: String,
}

impl ChartBlockApp {
    fn new(tool_cfg: ToolConfig) -> Self {
        let mut app = Self {
            tool: make_tool(ChartConfig::default(), false, &tool_cfg),
            tool_cfg,
            read_only: false,
            file: None,
            texture: None,
            texture_chart_id: 0,
            focus_title: false,
            picker_anchor: None,
            status_message: String::new(),
            error_message: String::new(),
        };
        app.start();
        app
    }

    fn start(&mut self) {
        if let Err(e) = self.tool.render() {
            self.error_message = format!("Error: {e}");
        }
        self.texture = None;
        self.texture_chart_id = 0;
        self.picker_anchor = None;
    }

    /// Reload the block from `config`, as a host does when a document is opened.
    fn replace(&mut self, config: ChartConfig) {
        self.tool = make_tool(config, self.read_only, &self.tool_cfg);
        self.start();
    }

    fn dispatch(&mut self, events: Vec<ToolEvent>) {
        for ev in events {
            match self.tool.handle(ev) {
                Ok(refresh) => log::trace!("refresh: {refresh:?}"),
                Err(e) => {
                    self.error_message = format!("Error: {e}");
                }
            }
        }
        if !self.tool.picker().is_open() {
            self.picker_anchor = None;
        }
    }

    fn open_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Chart", &["json"])
            .pick_file()
        else {
            return;
        };
        match storage::load_config(&path) {
            Ok(cfg) => {
                self.replace(cfg);
                self.status_message = format!("Opened {}", path.display());
                self.error_message.clear();
                self.file = Some(path);
            }
            Err(e) => self.error_message = format!("Error: {e}"),
        }
    }

    fn save_file(&mut self, ask: bool) {
        let path = match (&self.file, ask) {
            (Some(p), false) => Some(p.clone()),
            _ => rfd::FileDialog::new()
                .add_filter("Chart", &["json"])
                .set_file_name("chart.json")
                .save_file(),
        };
        let Some(path) = path else { return };
        match storage::save_config(self.tool.save(), &path) {
            Ok(()) => {
                self.status_message = format!("Saved {}", path.display());
                self.error_message.clear();
                self.file = Some(path);
            }
            Err(e) => self.error_message = format!("Error: {e}"),
        }
    }

    fn export(&mut self, ext: &str) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter(ext.to_uppercase(), &[ext])
            .set_file_name(format!("chart.{ext}"))
            .save_file()
        else {
            return;
        };
        let cfg = self.tool.save();
        let result = if ext == "csv" {
            storage::export_csv(cfg, &path)
        } else {
            render::render_to_file(cfg, &path, self.tool_cfg.canvas.width, self.tool_cfg.canvas.height)
        };
        match result {
            Ok(()) => self.status_message = format!("Wrote {}", path.display()),
            Err(e) => self.error_message = format!("Error: {e}"),
        }
    }

    /// Upload the current chart bitmap when it changed since the last frame.
    fn sync_texture(&mut self, ctx: &egui::Context) {
        let Some(chart) = self.tool.chart() else { return };
        if self.texture.is_some() && chart.id == self.texture_chart_id {
            return;
        }
        if let ChartOutput::Rgb {
            width,
            height,
            pixels,
        } = &chart.output
        {
            let image = egui::ColorImage::from_rgb([*width as usize, *height as usize], pixels);
            self.texture = Some(ctx.load_texture("chart-preview", image, egui::TextureOptions::LINEAR));
            self.texture_chart_id = chart.id;
        }
    }

    fn menu_bar(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New").clicked() {
                    self.file = None;
                    self.replace(ChartConfig::default());
                    ui.close_menu();
                }
                if ui.button("Open…").clicked() {
                    self.open_file();
                    ui.close_menu();
                }
                if ui.button("Save").clicked() {
                    self.save_file(false);
                    ui.close_menu();
                }
                if ui.button("Save as…").clicked() {
                    self.save_file(true);
                    ui.close_menu();
                }
                ui.separator();
                for ext in ["csv", "svg", "png"] {
                    if ui.button(format!("Export {}…", ext.to_uppercase())).clicked() {
                        self.export(ext);
                        ui.close_menu();
                    }
                }
            });
            ui.separator();
            if ui.checkbox(&mut self.read_only, "Read-only").changed() {
                let cfg = self.tool.save().clone();
                self.replace(cfg);
            }
        });
    }

    fn tune_bar(&self, ui: &mut egui::Ui, events: &mut Vec<ToolEvent>) {
        ui.horizontal(|ui| {
            for item in self.tool.render_settings() {
                let clicked = ui
                    .add_enabled(
                        !self.read_only,
                        egui::SelectableLabel::new(item.is_active, item.descriptor.title),
                    )
                    .clicked();
                if clicked && !item.is_active {
                    events.push(ToolEvent::Tune {
                        chart_type: item.descriptor.name,
                    });
                }
            }
        });
    }

    fn preview(&mut self, ui: &mut egui::Ui, events: &mut Vec<ToolEvent>) {
        let Some(texture) = &self.texture else {
            ui.label("Rendering…");
            return;
        };
        let sized = egui::load::SizedTexture::new(texture.id(), texture.size_vec2());
        let editable = self
            .tool
            .view()
            .is_some_and(|v| v.title_overlay.is_some());
        let image = egui::Image::new(sized);
        let response = if editable {
            ui.add(image.sense(egui::Sense::click()))
                .on_hover_text(chart_block::title::OVERLAY_HINT)
        } else {
            ui.add(image)
        };

        if editable
            && response.clicked()
            && let Some(pos) = response.interact_pointer_pos()
            && pos.y - response.rect.min.y <= OVERLAY_HEIGHT_PX as f32
        {
            events.push(TitleEvent::Click.into());
            self.focus_title = true;
        }

        if let Some(draft) = self.tool.title_editor().draft() {
            let mut text = draft.to_string();
            let edit = ui.add(
                egui::TextEdit::singleline(&mut text)
                    .hint_text(TITLE_PLACEHOLDER)
                    .desired_width(response.rect.width() * 0.6),
            );
            if self.focus_title {
                edit.request_focus();
                self.focus_title = false;
            }
            if edit.changed() {
                events.push(TitleEvent::Input { text }.into());
            }
            let (enter, escape) = ui.input(|i| (i.key_pressed(egui::Key::Enter), i.key_pressed(egui::Key::Escape)));
            if escape {
                events.push(TitleEvent::Escape.into());
            } else if edit.lost_focus() {
                events.push(if enter { TitleEvent::Enter } else { TitleEvent::Blur }.into());
            }
        }
    }

    fn settings(&mut self, ui: &mut egui::Ui, events: &mut Vec<ToolEvent>) {
        let Some(panel) = self.tool.settings_panel().cloned() else {
            return;
        };
        settings_panel(ui, &panel, events, &mut self.picker_anchor);
    }

    fn color_popup(&mut self, ctx: &egui::Context, events: &mut Vec<ToolEvent>) {
        if !self.tool.picker().is_open() {
            return;
        }
        let mut window = egui::Window::new("Pick a color")
            .title_bar(false)
            .collapsible(false)
            .resizable(false);
        if let Some(anchor) = self.picker_anchor {
            window = window.fixed_pos(anchor.left_bottom() + egui::vec2(0.0, 8.0));
        }
        let anchor = self.picker_anchor.unwrap_or(egui::Rect::NOTHING);
        let shown = window.show(ctx, |ui| {
                egui::Grid::new("picker-grid").spacing([6.0, 6.0]).show(ui, |ui| {
                    for (i, color) in Palette::default().colors().iter().enumerate() {
                        if swatch(ui, color, 28.0).clicked() {
                            events.push(PickerEvent::Pick { color: color.to_string() }.into());
                        }
                        if i % 6 == 5 {
                            ui.end_row();
                        }
                    }
                });
            });

        let popup_rect = shown.map(|s| s.response.rect).unwrap_or(egui::Rect::NOTHING);
        let click_pos = ctx.input(|i| {
            i.pointer
                .any_click()
                .then(|| i.pointer.interact_pos())
                .flatten()
        });
        if let Some(pos) = click_pos {
            if anchor.contains(pos) {
                events.push(PickerEvent::ClickTarget.into());
            } else if !popup_rect.contains(pos) {
                events.push(PickerEvent::ClickOutside.into());
            }
        }
        // Arms the outside-click check from the next frame on.
        events.push(PickerEvent::Tick.into());
    }
}

impl eframe::App for ChartBlockApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_texture(ctx);
        let mut events: Vec<ToolEvent> = Vec::new();

        egui::TopBottomPanel::top("menu").show(ctx, |ui| self.menu_bar(ui));

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            if !self.error_message.is_empty() {
                ui.colored_label(egui::Color32::RED, &self.error_message);
            } else if !self.status_message.is_empty() {
                ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
            } else {
                ui.label(self.file.as_ref().map_or("Unsaved chart".to_string(), |p| p.display().to_string()));
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.tune_bar(ui, &mut events);
                ui.add_space(8.0);
                self.preview(ui, &mut events);
                ui.add_space(10.0);
                self.settings(ui, &mut events);
            });
        });

        self.color_popup(ctx, &mut events);

        if !events.is_empty() {
            self.dispatch(events);
            ctx.request_repaint();
        }
    }
}

fn make_tool(config: ChartConfig, read_only: bool, tool_cfg: &ToolConfig) -> ChartTool<PlottersSurface> {
    let surface = PlottersSurface::rgb(tool_cfg.canvas.width, tool_cfg.canvas.height);
    ChartTool::new(
        ToolInit {
            data: config.into(),
            read_only,
        },
        surface,
    )
}

fn color32(css: &str) -> egui::Color32 {
    match parse_color(css) {
        Ok(c) => egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, (c.a.clamp(0.0, 1.0) * 255.0).round() as u8),
        Err(_) => egui::Color32::GRAY,
    }
}

fn swatch(ui: &mut egui::Ui, css: &str, size: f32) -> egui::Response {
    ui.add(
        egui::Button::new("")
            .fill(color32(css))
            .min_size(egui::vec2(size, size)),
    )
    .on_hover_text(css)
}

/// Returns the new text when the user edited the field.
fn text_field(ui: &mut egui::Ui, field: &TextField, width: f32) -> Option<String> {
    let mut text = field.value.clone();
    let mut changed = false;
    ui.vertical(|ui| {
        ui.label(&field.label);
        changed = ui
            .add(
                egui::TextEdit::singleline(&mut text)
                    .hint_text(&field.placeholder)
                    .desired_width(width),
            )
            .changed();
    });
    changed.then_some(text)
}

fn settings_panel(
    ui: &mut egui::Ui,
    panel: &SettingsPanel,
    events: &mut Vec<ToolEvent>,
    picker_anchor: &mut Option<egui::Rect>,
) {
    ui.group(|ui| {
        if let Some(text) = text_field(ui, &panel.labels_field, 420.0) {
            events.push(SettingsEvent::LabelsChanged { text }.into());
        }
        ui.add_space(6.0);

        // A rebuild gets fresh widget ids so no stale edit state survives.
        ui.push_id(panel.generation, |ui| {
            for editor in &panel.datasets {
                ui.push_id(editor.index, |ui| {
                    dataset_editor(ui, editor, events, picker_anchor);
                });
                ui.add_space(6.0);
            }
        });

        if let Some(caption) = &panel.add_button
            && ui.button(caption).clicked()
        {
            events.push(SettingsEvent::AddDataset.into());
        }
    });
}

fn dataset_editor(
    ui: &mut egui::Ui,
    editor: &DatasetEditor,
    events: &mut Vec<ToolEvent>,
    picker_anchor: &mut Option<egui::Rect>,
) {
    let dataset = editor.index;
    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.strong(&editor.heading);
            if editor.removable && ui.button(chart_block::settings::REMOVE_DATASET).clicked() {
                events.push(SettingsEvent::RemoveDataset { dataset }.into());
            }
        });

        if let Some(field) = &editor.name
            && let Some(text) = text_field(ui, field, 260.0)
        {
            events.push(SettingsEvent::NameChanged { dataset, text }.into());
        }
        if let Some(field) = &editor.values
            && let Some(text) = text_field(ui, field, 360.0)
        {
            events.push(SettingsEvent::ValuesChanged { dataset, text }.into());
        }

        if let Some(toggle) = &editor.color_mode {
            let mut checked = toggle.checked;
            if ui.checkbox(&mut checked, &toggle.label).changed() {
                events.push(
                    SettingsEvent::ColorModeToggled {
                        dataset,
                        enabled: checked,
                    }
                    .into(),
                );
            }
        }

        if let Some(rows) = &editor.rows {
            ui.label(&rows.heading);
            for row in &rows.rows {
                ui.horizontal(|ui| {
                    match &row.label {
                        LabelEcho::DisabledInput(text) => {
                            let mut text = text.clone();
                            ui.add_enabled(false, egui::TextEdit::singleline(&mut text).desired_width(140.0));
                        }
                        LabelEcho::Text(text) => {
                            ui.add_sized([140.0, 20.0], egui::Label::new(text.as_str()));
                        }
                    }
                    let mut value = row.value.clone();
                    if ui
                        .add(egui::TextEdit::singleline(&mut value).hint_text("Value").desired_width(90.0))
                        .changed()
                    {
                        events.push(
                            SettingsEvent::PointValueChanged {
                                dataset,
                                index: row.index,
                                text: value,
                            }
                            .into(),
                        );
                    }
                    let button = swatch(ui, &row.color, 24.0).on_hover_text("Click to change color");
                    if button.clicked() {
                        *picker_anchor = Some(button.rect);
                        events.push(
                            PickerEvent::Open {
                                dataset,
                                index: row.index,
                            }
                            .into(),
                        );
                    }
                });
            }
        }

        if let Some(grid) = &editor.color_grid {
            ui.label("Color");
            ui.horizontal_wrapped(|ui| {
                for s in &grid.swatches {
                    let response = swatch(ui, &s.color, 24.0);
                    if s.selected {
                        ui.painter().rect_stroke(
                            response.rect.expand(2.0),
                            3.0,
                            egui::Stroke::new(2.0, ui.visuals().strong_text_color()),
                        );
                    }
                    if response.clicked() {
                        events.push(
                            SettingsEvent::ScalarColorPicked {
                                dataset,
                                color: s.color.clone(),
                            }
                            .into(),
                        );
                    }
                }
            });
        }
    });
}
