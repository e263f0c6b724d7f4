//! The interactive annotation surface.
//!
//! [`Canvas`] owns the shapes of one image and turns normalized pointer and
//! keyboard events into shape edits. Handlers run synchronously and return a
//! [`CursorHint`]; everything the host has to react to is broadcast on the
//! canvas' [`EventBus`]. Painting is left to whoever reads
//! [`Canvas::snapshot`].
//!
//! | File | Role |
//! |------|------|
//! | `pointer.rs` | event routing, hover, click selection, rubber band |
//! | `drawing.rs` | create-mode state machine |
//! | `movement.rs` | bounded group/vertex moves, nudges, copy commit |
//! | `keyboard.rs` | keys and wheel |

use egui::{Color32, Pos2, Vec2};
use log::{debug, error, info};

use crate::config::{CanvasConfig, MIN_LABEL_FONT_SIZE};
use crate::document::Document;
use crate::error::{CanvasError, CanvasResult};
use crate::event::{CanvasEvent, EventBus, EventHandler};
use crate::input::CursorHint;
use crate::selection::Selection;
use crate::shape::{Shape, ShapeId};
use crate::state::{DrawState, Interaction, Mode};
use crate::transform::ViewTransform;

mod drawing;
mod keyboard;
mod movement;
mod pointer;

pub use movement::MoveTarget;
pub use pointer::PointSelection;

#[derive(Debug, Default)]
pub struct Canvas {
    mode: Mode,
    document: Document,
    selection: Selection,
    draw: DrawState,
    interaction: Interaction,
    transform: ViewTransform,
    config: CanvasConfig,
    events: EventBus,
    /// Image-space pointer position the next group-drag delta is measured
    /// from. Doubles as the create-mode crosshair position.
    prev_point: Option<Pos2>,
    /// Selection bounding box corners relative to the press position.
    offsets: (Vec2, Vec2),
    /// Effective "paint only selected shapes" flag.
    hiding_background: bool,
    verified: bool,
    overlay_color: Option<Color32>,
    cursor: CursorHint,
    has_image: bool,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CanvasConfig) -> Self {
        Self { config, ..Self::default() }
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.events.subscribe(handler);
    }

    pub(crate) fn emit(&self, event: CanvasEvent) {
        self.events.emit(event);
    }

    // --- Queries ---

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_drawing(&self) -> bool {
        self.mode == Mode::Create
    }

    pub fn is_editing(&self) -> bool {
        self.mode == Mode::Edit
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn shapes(&self) -> &[Shape] {
        self.document.shapes()
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.document.get(id)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_ids(&self) -> &[ShapeId] {
        self.selection.ids()
    }

    pub fn draw_state(&self) -> &DrawState {
        &self.draw
    }

    /// The open shape under construction in create mode.
    pub fn current(&self) -> Option<&Shape> {
        self.draw.current()
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn image_size(&self) -> Vec2 {
        self.transform.image_size
    }

    pub fn has_image(&self) -> bool {
        self.has_image
    }

    pub fn prev_point(&self) -> Option<Pos2> {
        self.prev_point
    }

    pub fn offsets(&self) -> (Vec2, Vec2) {
        self.offsets
    }

    pub fn is_hiding_background(&self) -> bool {
        self.hiding_background
    }

    pub fn verified(&self) -> bool {
        self.verified
    }

    pub fn overlay_color(&self) -> Option<Color32> {
        self.overlay_color
    }

    pub fn cursor(&self) -> CursorHint {
        self.cursor
    }

    /// Widget size that shows the whole image at the current zoom.
    pub fn minimum_size_hint(&self) -> Vec2 {
        self.transform.minimum_size()
    }

    // --- View ---

    pub fn set_scale(&mut self, scale: f32) {
        if scale.is_finite() && scale > 0.0 {
            self.transform.scale = scale;
        }
    }

    pub fn set_viewport_size(&mut self, size: Vec2) {
        self.transform.viewport = size;
    }

    pub fn set_verified(&mut self, verified: bool) {
        self.verified = verified;
    }

    /// Tint composited over the image; `None` shows the image untouched.
    pub fn set_overlay_color(&mut self, color: Option<Color32>) {
        self.overlay_color = color;
    }

    pub fn change_font_size(&mut self, increment: i32) {
        let size = i64::from(self.config.label_font_size) + i64::from(increment);
        self.config.label_font_size = u32::try_from(size.max(i64::from(MIN_LABEL_FONT_SIZE))).unwrap_or(MIN_LABEL_FONT_SIZE);
    }

    pub fn set_highlight_polygons(&mut self, enabled: bool) {
        self.config.highlight_polygons = enabled;
    }

    pub fn set_drawing_shape_to_square(&mut self, enabled: bool) {
        self.config.square_mode = enabled;
    }

    pub fn set_drawing_color(&mut self, color: Color32) {
        self.config.drawing_color = color;
    }

    pub fn set_config(&mut self, config: CanvasConfig) {
        self.config = config;
        self.set_hiding(!self.selection.is_empty());
    }

    // --- Mode ---

    /// Switch between edit (`true`) and create (`false`) mode.
    ///
    /// Entering create mode drops hover and selection; leaving it abandons
    /// the shape under construction.
    pub fn set_editing(&mut self, editing: bool) {
        self.mode = if editing { Mode::Edit } else { Mode::Create };
        if editing {
            self.cancel_drawing();
            self.cursor = CursorHint::Default;
        } else {
            self.un_highlight(None);
            self.de_select_shapes();
            self.interaction = Interaction::Idle;
            self.cursor = CursorHint::Draw;
        }
        self.prev_point = None;
        debug!("canvas mode: {:?}", self.mode);
    }

    // --- Selection and hover ---

    /// Replace the selection, keeping every shape's `selected` flag in sync.
    pub fn select_shapes(&mut self, ids: &[ShapeId]) -> CanvasResult<()> {
        if let Some(unknown) = ids.iter().find(|id| !self.document.contains(**id)) {
            error!("cannot select unknown shape {unknown}");
            return Err(CanvasError::UnknownShape(*unknown));
        }
        self.apply_selection(ids);
        Ok(())
    }

    pub(crate) fn apply_selection(&mut self, ids: &[ShapeId]) {
        for id in self.selection.ids() {
            if let Some(shape) = self.document.get_mut(*id) {
                shape.selected = false;
            }
        }
        self.selection.replace(ids);
        for id in self.selection.ids() {
            if let Some(shape) = self.document.get_mut(*id) {
                shape.selected = true;
            }
        }
        self.emit(CanvasEvent::SelectionChanged(self.selection.ids().to_vec()));
    }

    pub fn de_select_shapes(&mut self) {
        if !self.selection.is_empty() {
            self.set_hiding(false);
            self.apply_selection(&[]);
        }
    }

    /// Clear the hover highlight, either unconditionally (`None`) or only if
    /// it is on `shape`.
    pub fn un_highlight(&mut self, shape: Option<ShapeId>) {
        let Some((hovered, _)) = self.interaction.hovered() else {
            return;
        };
        if shape.is_none_or(|id| id == hovered) {
            if let Some(hovered_shape) = self.document.get_mut(hovered) {
                hovered_shape.highlight_clear();
            }
            self.interaction = Interaction::Idle;
        }
    }

    /// Paint only selected shapes while a selection exists.
    pub fn hide_background_shapes(&mut self, hide: bool) {
        self.config.hide_background = hide;
        if !self.selection.is_empty() {
            self.set_hiding(true);
        }
    }

    pub(crate) fn set_hiding(&mut self, enable: bool) {
        self.hiding_background = enable && self.config.hide_background;
    }

    // --- Host document ---

    /// Start over with a new image of `size` pixels. All shapes are dropped.
    pub fn load_image(&mut self, size: Vec2) {
        self.transform.image_size = size;
        self.document.clear();
        self.selection.clear();
        self.draw = DrawState::Idle;
        self.interaction = Interaction::Idle;
        self.prev_point = None;
        self.hiding_background = false;
        self.has_image = true;
        info!("loaded image of {}x{}", size.x, size.y);
    }

    /// Replace every shape. Selection, hover and drawing state are reset.
    pub fn load_shapes(&mut self, shapes: Vec<Shape>) {
        let had_selection = !self.selection.is_empty();
        self.selection.clear();
        self.interaction = Interaction::Idle;
        self.draw = DrawState::Idle;
        let shapes = shapes
            .into_iter()
            .map(|mut shape| {
                shape.selected = false;
                shape.highlight_clear();
                shape
            })
            .collect();
        self.document.replace_all(shapes);
        self.hiding_background = false;
        if had_selection {
            self.emit(CanvasEvent::SelectionChanged(Vec::new()));
        }
        info!("loaded {} shapes", self.document.len());
    }

    pub fn set_shape_visible(&mut self, id: ShapeId, visible: bool) {
        self.document.set_visible(id, visible);
    }

    pub fn is_visible(&self, id: ShapeId) -> bool {
        self.document.is_visible(id)
    }

    /// Label (and optionally recolor) the most recently added shape.
    pub fn set_last_label(&mut self, text: &str, line_color: Option<Color32>, fill_color: Option<Color32>) -> CanvasResult<ShapeId> {
        if text.is_empty() {
            error!("refusing to assign an empty label");
            return Err(CanvasError::EmptyLabel);
        }
        let Some(shape) = self.document.last_mut() else {
            error!("no shape to label");
            return Err(CanvasError::NoShapes);
        };
        shape.label = text.to_owned();
        if let Some(color) = line_color {
            shape.line_color = color;
        }
        if let Some(color) = fill_color {
            shape.fill_color = color;
        }
        Ok(shape.id())
    }

    /// Delete every selected shape and return them, topmost last.
    /// Does nothing when the selection is empty.
    pub fn delete_selected(&mut self) -> Vec<Shape> {
        if self.selection.is_empty() {
            return Vec::new();
        }
        let ids = self.selection.ids().to_vec();
        let mut deleted = Vec::with_capacity(ids.len());
        for id in ids {
            self.un_highlight(Some(id));
            if let Some(shape) = self.document.remove(id) {
                deleted.push(shape);
            }
        }
        self.selection.clear();
        self.set_hiding(false);
        self.emit(CanvasEvent::SelectionChanged(Vec::new()));
        info!("deleted {} shapes", deleted.len());
        deleted
    }

    /// Delete one shape by id, wherever it is.
    pub fn delete_shape(&mut self, id: ShapeId) -> CanvasResult<Shape> {
        self.un_highlight(Some(id));
        let Some(shape) = self.document.remove(id) else {
            error!("cannot delete unknown shape {id}");
            return Err(CanvasError::UnknownShape(id));
        };
        if self.selection.contains(id) {
            self.selection.forget(id);
            self.emit(CanvasEvent::SelectionChanged(self.selection.ids().to_vec()));
        }
        info!("deleted shape {id}");
        Ok(shape)
    }

    /// Put the image away: no selection, hover, copies, drawing or image.
    pub fn reset_state(&mut self) {
        self.de_select_shapes();
        self.un_highlight(None);
        self.selection.clear();
        self.cancel_drawing();
        self.interaction = Interaction::Idle;
        self.prev_point = None;
        self.cursor = CursorHint::Default;
        self.has_image = false;
        self.transform.image_size = Vec2::ZERO;
    }
}
