use std::path::PathBuf;

use eframe::egui;

use crate::canvas::Canvas;
use crate::config::CanvasConfig;
use crate::event::{CanvasEvent, EventQueue, Orientation};
use crate::file_handler::{FileHandler, LoadedImage};
use crate::input::InputHandler;
use crate::persistence::AnnotationFile;
use crate::renderer::Renderer;

const ZOOM_STEP: f32 = 1.1;
const MIN_SCALE: f32 = 0.05;
const MAX_SCALE: f32 = 20.0;
const LIGHT_STEP: u8 = 16;

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct AnnotatorApp {
    config: CanvasConfig,
    /// Label given to every newly drawn shape.
    default_label: String,

    #[serde(skip)]
    canvas: Canvas,
    #[serde(skip)]
    events: EventQueue,
    // Skip serializing the renderer since it contains GPU resources
    #[serde(skip)]
    renderer: Option<Renderer>,
    #[serde(skip)]
    input: InputHandler,
    #[serde(skip)]
    files: FileHandler,
    #[serde(skip)]
    image_path: Option<PathBuf>,
    #[serde(skip)]
    scroll: egui::Vec2,
    /// Screen position of the canvas widget origin in the last frame.
    #[serde(skip)]
    canvas_origin: egui::Pos2,
    #[serde(skip)]
    light: u8,
    /// Screen position of a pending copy/move menu.
    #[serde(skip)]
    copy_menu: Option<egui::Pos2>,
    #[serde(skip)]
    status: String,
}

impl Default for AnnotatorApp {
    fn default() -> Self {
        let events = EventQueue::new();
        let canvas = Canvas::new();
        canvas.subscribe(Box::new(events.clone()));
        Self {
            config: CanvasConfig::default(),
            default_label: "object".to_owned(),
            canvas,
            events,
            renderer: None,
            input: InputHandler::new(),
            files: FileHandler::new(),
            image_path: None,
            scroll: egui::Vec2::ZERO,
            canvas_origin: egui::Pos2::ZERO,
            light: 0,
            copy_menu: None,
            status: String::new(),
        }
    }
}

impl AnnotatorApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app: Self = match cc.storage {
            Some(storage) => eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default(),
            None => Self::default(),
        };
        if let Err(err) = app.config.validate() {
            log::warn!("Discarding stored config: {err}");
            app.config = CanvasConfig::default();
        }
        app.canvas.set_config(app.config.clone());
        app.renderer = Some(Renderer::new(&cc.egui_ctx));
        app
    }

    fn open_image(&mut self, image: LoadedImage) {
        self.canvas.load_image(image.size_vec2());
        self.canvas.set_verified(false);
        if let Some(path) = &image.path {
            let annotations = AnnotationFile::path_for_image(path);
            if annotations.exists() {
                if let Err(err) = AnnotationFile::load(&annotations).and_then(|file| file.apply_to(&mut self.canvas)) {
                    log::error!("Failed to load {}: {err}", annotations.display());
                }
            }
        }
        if let Some(renderer) = &mut self.renderer {
            renderer.set_image(&image);
        }
        self.status = format!("{} ({}x{})", image.name, image.size[0], image.size[1]);
        self.image_path = image.path;
        self.scroll = egui::Vec2::ZERO;
    }

    fn save_annotations(&mut self) {
        let Some(image_path) = &self.image_path else {
            self.status = "Image has no path; nothing to save next to".to_owned();
            return;
        };
        let path = AnnotationFile::path_for_image(image_path);
        let file = AnnotationFile::from_canvas(&self.canvas, Some(image_path.clone()));
        self.status = match file.save(&path) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(err) => {
                log::error!("Failed to save {}: {err}", path.display());
                format!("Save failed: {err}")
            }
        };
    }

    fn handle_canvas_events(&mut self) {
        for event in self.events.drain() {
            match event {
                CanvasEvent::NewShape(id) => {
                    let label = self.default_label.trim().to_owned();
                    if label.is_empty() {
                        log::warn!("No default label; discarding shape {id}");
                        let _ = self.canvas.reset_all_lines();
                    } else if let Err(err) = self.canvas.set_last_label(&label, None, None) {
                        log::error!("Failed to label shape {id}: {err}");
                    }
                }
                CanvasEvent::ZoomRequest(delta) => {
                    let factor = if delta > 0.0 { ZOOM_STEP } else { 1.0 / ZOOM_STEP };
                    let scale = (self.canvas.transform().scale * factor).clamp(MIN_SCALE, MAX_SCALE);
                    self.canvas.set_scale(scale);
                }
                CanvasEvent::LightRequest(delta) => {
                    self.light = if delta > 0.0 {
                        self.light.saturating_add(LIGHT_STEP)
                    } else {
                        self.light.saturating_sub(LIGHT_STEP)
                    };
                    let overlay = (self.light > 0).then(|| egui::Color32::from_white_alpha(self.light));
                    self.canvas.set_overlay_color(overlay);
                }
                CanvasEvent::ScrollRequest { delta, orientation } => match orientation {
                    Orientation::Horizontal => self.scroll.x -= delta,
                    Orientation::Vertical => self.scroll.y -= delta,
                },
                CanvasEvent::ContextMenuRequested { has_copies, at } => {
                    if has_copies {
                        self.copy_menu = Some(self.canvas_origin + at.to_vec2());
                    }
                }
                CanvasEvent::SelectionChanged(ids) => {
                    self.status = format!("{} selected", ids.len());
                }
                CanvasEvent::ShapeMoved | CanvasEvent::DrawingPolygon(_) => {}
            }
        }
    }

    fn clamp_scroll(&mut self, viewport: egui::Vec2) {
        let max = (self.canvas.minimum_size_hint() - viewport).max(egui::Vec2::ZERO);
        self.scroll = self.scroll.clamp(egui::Vec2::ZERO, max);
    }

    fn controls_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Annotations");
        ui.separator();

        ui.horizontal(|ui| {
            if ui.selectable_label(self.canvas.is_drawing(), "▭ Create").clicked() {
                self.canvas.set_editing(false);
            }
            if ui.selectable_label(self.canvas.is_editing(), "✋ Edit").clicked() {
                self.canvas.set_editing(true);
            }
        });

        ui.horizontal(|ui| {
            ui.label("Label:");
            ui.text_edit_singleline(&mut self.default_label);
        });

        let mut square = self.canvas.config().square_mode;
        if ui.checkbox(&mut square, "Square shapes").changed() {
            self.canvas.set_drawing_shape_to_square(square);
        }
        let mut hide = self.canvas.config().hide_background;
        if ui.checkbox(&mut hide, "Show only selected").changed() {
            self.canvas.hide_background_shapes(hide);
        }
        let mut fill_all = self.canvas.config().highlight_polygons;
        if ui.checkbox(&mut fill_all, "Fill all shapes").changed() {
            self.canvas.set_highlight_polygons(fill_all);
        }
        let mut verified = self.canvas.verified();
        if ui.checkbox(&mut verified, "Verified").changed() {
            self.canvas.set_verified(verified);
        }
        ui.horizontal(|ui| {
            ui.label("Drawing color:");
            let mut color = self.canvas.config().drawing_color;
            if egui::color_picker::color_edit_button_srgba(ui, &mut color, egui::color_picker::Alpha::Opaque).changed() {
                self.canvas.set_drawing_color(color);
            }
        });
        ui.horizontal(|ui| {
            ui.label(format!("Label size: {}", self.canvas.config().label_font_size));
            if ui.small_button("−").clicked() {
                self.canvas.change_font_size(-1);
            }
            if ui.small_button("+").clicked() {
                self.canvas.change_font_size(1);
            }
        });

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Duplicate").clicked() {
                if let Err(err) = self.canvas.copy_selected_shapes() {
                    self.status = err.to_string();
                }
            }
            if ui.button("Delete").clicked() {
                self.canvas.delete_selected();
            }
            if ui.button("Undo last").clicked() {
                if let Err(err) = self.canvas.reset_all_lines() {
                    self.status = err.to_string();
                }
            }
        });
        if ui.button("Save annotations").clicked() {
            self.save_annotations();
        }

        ui.separator();
        let shapes: Vec<_> = self.canvas.shapes().iter().map(|shape| (shape.id(), shape.label.clone(), shape.selected)).collect();
        egui::ScrollArea::vertical().show(ui, |ui| {
            for (id, label, selected) in shapes {
                ui.horizontal(|ui| {
                    let mut visible = self.canvas.is_visible(id);
                    if ui.checkbox(&mut visible, "").changed() {
                        self.canvas.set_shape_visible(id, visible);
                    }
                    let text = if label.is_empty() { "(unlabeled)".to_owned() } else { label };
                    if ui.selectable_label(selected, text).clicked() {
                        if let Err(err) = self.canvas.select_shapes(&[id]) {
                            log::error!("{err}");
                        }
                    }
                });
            }
        });

        ui.separator();
        ui.label(&self.status);
    }

    fn copy_menu(&mut self, ctx: &egui::Context) {
        let Some(at) = self.copy_menu else {
            return;
        };
        let area = egui::Area::new(egui::Id::new("copy_menu")).fixed_pos(at).order(egui::Order::Foreground).show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .show(ui, |ui| {
                    if ui.button("Copy here").clicked() {
                        if let Err(err) = self.canvas.end_move(true) {
                            log::error!("{err}");
                        }
                        return true;
                    }
                    if ui.button("Move here").clicked() {
                        if let Err(err) = self.canvas.end_move(false) {
                            log::error!("{err}");
                        }
                        return true;
                    }
                    if ui.button("Cancel").clicked() {
                        self.canvas.cancel_copy();
                        return true;
                    }
                    false
                })
                .inner
        });

        let mut close = area.inner;
        if !close && ctx.input(|input| dismisses_popup(input, area.response.rect)) {
            log::debug!("copy menu dismissed");
            self.canvas.cancel_copy();
            close = true;
        }
        if close {
            self.copy_menu = None;
        }
    }
}

/// Escape, or a press anywhere outside `popup`, closes a popup.
fn dismisses_popup(input: &egui::InputState, popup: egui::Rect) -> bool {
    input.key_pressed(egui::Key::Escape)
        || (input.pointer.any_pressed() && input.pointer.press_origin().is_some_and(|pos| !popup.contains(pos)))
}

impl eframe::App for AnnotatorApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.config = self.canvas.config().clone();
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.files.preview_files_being_dropped(ctx);
        if self.files.check_for_dropped_files(ctx) {
            if let Some(image) = self.files.process_dropped_files() {
                self.open_image(image);
            }
        }

        egui::SidePanel::left("controls").resizable(true).show(ctx, |ui| {
            self.controls_panel(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            self.canvas.set_viewport_size(rect.size());
            self.clamp_scroll(rect.size());
            let origin = rect.min - self.scroll;
            self.canvas_origin = origin;

            if self.copy_menu.is_none() {
                for event in self.input.process_input(ctx, rect, origin) {
                    self.canvas.handle_input(&event);
                }
            }
            if response.hovered() {
                ctx.set_cursor_icon(self.canvas.cursor().cursor_icon());
            }

            if let Some(renderer) = &self.renderer {
                let canvas_rect = egui::Rect::from_min_size(origin, rect.size());
                renderer.render(&painter, canvas_rect, &self.canvas.snapshot());
            }
        });

        self.handle_canvas_events();
        self.copy_menu(ctx);
    }
}
