// src/renderer.rs
use eframe::egui::{self, pos2, Align2, Color32, FontId, Pos2, Rect, Stroke, Vec2};

use crate::file_handler::LoadedImage;
use crate::shape::{HighlightMode, Shape};
use crate::snapshot::RenderSnapshot;

const BACKGROUND: Color32 = Color32::from_rgb(232, 232, 232);
const VERIFIED_BACKGROUND: Color32 = Color32::from_rgba_premultiplied(92, 120, 19, 128);
const SELECT_LINE_COLOR: Color32 = Color32::WHITE;
const SELECT_FILL_COLOR: Color32 = Color32::from_rgba_premultiplied(0, 78, 155, 155);
const VERTEX_FILL_COLOR: Color32 = Color32::from_rgb(0, 255, 0);
const HIGHLIGHT_VERTEX_FILL_COLOR: Color32 = Color32::from_rgb(255, 0, 0);
const CROSSHAIR_COLOR: Color32 = Color32::BLACK;
const RUBBER_BAND_COLOR: Color32 = Color32::from_rgb(0, 255, 0);

const LINE_WIDTH: f32 = 2.0;
const VERTEX_SIZE: f32 = 6.0;

/// Paints a [`RenderSnapshot`] with egui and owns the image texture.
pub struct Renderer {
    ctx: egui::Context,
    texture: Option<egui::TextureHandle>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("texture", &self.texture.as_ref().map(|texture| texture.size()))
            .finish()
    }
}

impl Renderer {
    pub fn new(ctx: &egui::Context) -> Self {
        Self { ctx: ctx.clone(), texture: None }
    }

    /// Upload `image` as the canvas background, replacing any previous one.
    pub fn set_image(&mut self, image: &LoadedImage) {
        self.texture = Some(self.ctx.load_texture(&image.name, image.to_color_image(), egui::TextureOptions::default()));
    }

    pub fn clear_image(&mut self) {
        self.texture = None;
    }

    pub fn has_image(&self) -> bool {
        self.texture.is_some()
    }

    /// Renders one frame of the canvas
    ///
    /// Args:
    ///     painter (egui::Painter): The painter to draw with, clipped to the canvas
    ///     rect (egui::Rect): Screen rectangle the widget origin maps to
    ///     snapshot (RenderSnapshot): What to draw
    pub fn render(&self, painter: &egui::Painter, rect: Rect, snapshot: &RenderSnapshot<'_>) {
        let background = if snapshot.verified { VERIFIED_BACKGROUND } else { BACKGROUND };
        painter.rect_filled(painter.clip_rect(), 0.0, background);
        if !snapshot.image_loaded {
            return;
        }

        let transform = snapshot.transform;
        let to_screen = |point: Pos2| rect.min + transform.to_widget_space(point).to_vec2();
        let image_rect = Rect::from_min_max(to_screen(Pos2::ZERO), to_screen(transform.image_size.to_pos2()));

        if let Some(texture) = &self.texture {
            let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
            painter.image(texture.id(), image_rect, uv, Color32::WHITE);
        }
        if let Some(overlay) = snapshot.overlay {
            painter.rect_filled(image_rect, 0.0, overlay);
        }

        for view in &snapshot.shapes {
            paint_shape(painter, &to_screen, view.shape, view.fill, snapshot.label_font_size);
        }

        if let Some(current) = snapshot.current {
            let points: Vec<Pos2> = current.points().iter().map(|point| to_screen(*point)).collect();
            painter.add(egui::Shape::line(points, Stroke::new(LINE_WIDTH, snapshot.drawing_color)));
        }
        if let Some(guide) = snapshot.guide {
            let guide = Rect::from_two_pos(to_screen(guide.min), to_screen(guide.max));
            painter.rect_stroke(guide, 0.0, Stroke::new(1.0, snapshot.drawing_color));
        }

        for copy in snapshot.copies {
            paint_shape(painter, &to_screen, copy, true, snapshot.label_font_size);
        }

        if let Some(band) = snapshot.rubber_band {
            let band = Rect::from_two_pos(to_screen(band.min), to_screen(band.max));
            let outline = [band.left_top(), band.right_top(), band.right_bottom(), band.left_bottom(), band.left_top()];
            painter.extend(egui::Shape::dashed_line(&outline, Stroke::new(1.0, RUBBER_BAND_COLOR), 6.0, 4.0));
        }

        if let Some(cross) = snapshot.crosshair {
            let cross = to_screen(cross);
            let stroke = Stroke::new(1.0, CROSSHAIR_COLOR);
            painter.line_segment([pos2(image_rect.left(), cross.y), pos2(image_rect.right(), cross.y)], stroke);
            painter.line_segment([pos2(cross.x, image_rect.top()), pos2(cross.x, image_rect.bottom())], stroke);
        }
    }
}

fn paint_shape(painter: &egui::Painter, to_screen: &dyn Fn(Pos2) -> Pos2, shape: &Shape, fill: bool, font_size: u32) {
    if shape.is_empty() {
        return;
    }
    let line_color = if shape.selected { SELECT_LINE_COLOR } else { shape.line_color };
    let fill_color = if !fill {
        Color32::TRANSPARENT
    } else if shape.selected {
        SELECT_FILL_COLOR
    } else {
        shape.fill_color
    };
    let stroke = Stroke::new(LINE_WIDTH, line_color);
    let points: Vec<Pos2> = shape.points().iter().map(|point| to_screen(*point)).collect();

    if shape.is_closed() {
        painter.add(egui::Shape::convex_polygon(points.clone(), fill_color, stroke));
    } else {
        painter.add(egui::Shape::line(points.clone(), stroke));
    }

    let highlight = shape.highlight();
    for (index, point) in points.iter().enumerate() {
        match highlight.filter(|highlight| highlight.index == index) {
            Some(highlight) => match highlight.mode {
                HighlightMode::NearVertex => {
                    painter.circle_filled(*point, VERTEX_SIZE * 2.0, HIGHLIGHT_VERTEX_FILL_COLOR);
                }
                HighlightMode::MoveVertex => {
                    let square = Rect::from_center_size(*point, Vec2::splat(VERTEX_SIZE * 1.5));
                    painter.rect_filled(square, 0.0, HIGHLIGHT_VERTEX_FILL_COLOR);
                }
            },
            None => {
                let square = Rect::from_center_size(*point, Vec2::splat(VERTEX_SIZE));
                painter.rect_filled(square, 0.0, VERTEX_FILL_COLOR);
            }
        }
    }

    if !shape.label.is_empty() {
        let anchor = to_screen(shape.bounding_rect().left_top());
        painter.text(anchor, Align2::LEFT_BOTTOM, &shape.label, FontId::proportional(font_size as f32), line_color);
    }
}
