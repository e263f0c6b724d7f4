//! Read-only view of everything a frame needs to paint.

use egui::{Color32, Pos2, Rect};

use crate::canvas::Canvas;
use crate::geometry::is_out_of_bounds;
use crate::input::CursorHint;
use crate::shape::Shape;
use crate::state::Mode;
use crate::transform::ViewTransform;

/// A committed shape as it should be painted.
#[derive(Debug, Clone, Copy)]
pub struct ShapeView<'a> {
    pub shape: &'a Shape,
    /// Paint the fill, not only the outline.
    pub fill: bool,
    pub hovered: bool,
}

#[derive(Debug, Clone)]
pub struct RenderSnapshot<'a> {
    pub transform: ViewTransform,
    pub image_loaded: bool,
    /// Visible shapes, bottom to top.
    pub shapes: Vec<ShapeView<'a>>,
    /// Open shape under construction.
    pub current: Option<&'a Shape>,
    /// Preview rectangle from the anchor to the pointer.
    pub guide: Option<Rect>,
    pub drawing_color: Color32,
    /// Ghost copies of a secondary-button drag.
    pub copies: &'a [Shape],
    pub rubber_band: Option<Rect>,
    /// Image-space crosshair position in create mode.
    pub crosshair: Option<Pos2>,
    pub verified: bool,
    pub overlay: Option<Color32>,
    pub label_font_size: u32,
    pub cursor: CursorHint,
}

impl Canvas {
    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        let hovered = self.interaction().hovered().map(|(shape, _)| shape);
        let hiding = self.is_hiding_background();
        let highlight_all = self.config().highlight_polygons;

        let shapes = self
            .document()
            .iter()
            .filter(|shape| (shape.selected || !hiding) && self.is_visible(shape.id()))
            .map(|shape| {
                let is_hovered = hovered == Some(shape.id());
                ShapeView {
                    shape,
                    fill: shape.selected || is_hovered || highlight_all,
                    hovered: is_hovered,
                }
            })
            .collect();

        let crosshair = match (self.mode(), self.prev_point()) {
            (Mode::Create, Some(pos)) if !self.draw_state().is_anchored() && !is_out_of_bounds(pos, self.image_size()) => Some(pos),
            _ => None,
        };

        RenderSnapshot {
            transform: *self.transform(),
            image_loaded: self.has_image(),
            shapes,
            current: self.current(),
            guide: self.draw_state().guide().map(|[start, end]| Rect::from_two_pos(start, end)),
            drawing_color: self.config().drawing_color,
            copies: self.selection().copies(),
            rubber_band: self.interaction().rubber_band(),
            crosshair,
            verified: self.verified(),
            overlay: self.overlay_color(),
            label_font_size: self.config().label_font_size,
            cursor: self.cursor(),
        }
    }
}
