use egui::{Pos2, Rect};
use log::{debug, trace};

use super::{Canvas, MoveTarget};
use crate::event::{CanvasEvent, Orientation};
use crate::geometry::hit_testing::{hit_test, HitPart};
use crate::input::{CursorHint, HeldButtons, InputEvent, Modifiers, PointerButton};
use crate::shape::{HighlightMode, ShapeId};
use crate::state::{Interaction, Mode};

/// What a press in edit mode landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointSelection {
    /// A corner of the hovered shape; the shape is now the only selection.
    Vertex { shape: ShapeId, vertex: usize },
    /// The body of a shape, now topmost.
    Shape(ShapeId),
}

impl Canvas {
    /// Route one normalized input event. Positions are widget pixels.
    pub fn handle_input(&mut self, event: &InputEvent) -> CursorHint {
        match *event {
            InputEvent::PointerDown { pos, button, modifiers } => self.on_pointer_down(pos, button, modifiers),
            InputEvent::PointerUp { pos, button, modifiers } => self.on_pointer_up(pos, button, modifiers),
            InputEvent::PointerMove { pos, held } => self.on_pointer_move(pos, held),
            InputEvent::DoubleClick { pos, button } => self.on_double_click(pos, button),
            InputEvent::Key { key, modifiers } => self.on_key(key, modifiers),
            InputEvent::Wheel { delta, modifiers } => self.on_wheel(delta, modifiers),
        }
    }

    pub fn on_pointer_down(&mut self, widget_pos: Pos2, button: PointerButton, modifiers: Modifiers) -> CursorHint {
        let pos = self.transform.to_image_space(widget_pos);
        trace!("pointer down {button:?} at {pos:?} in {:?}", self.mode);
        let cursor = match (self.mode, button) {
            (Mode::Create, PointerButton::Primary) => self.press_drawing(pos),
            (Mode::Create, PointerButton::Secondary) => CursorHint::Draw,
            (Mode::Edit, PointerButton::Primary) => self.press_edit(pos, widget_pos, modifiers),
            (Mode::Edit, PointerButton::Secondary) => {
                self.refresh_hover(pos);
                self.select_shape_point(pos, modifiers.is_multi_select());
                if !self.selection.is_empty() {
                    self.calculate_offsets(pos);
                }
                self.prev_point = Some(pos);
                self.clear_hover_highlight();
                self.interaction = Interaction::CopyDragging;
                self.cursor
            }
        };
        self.cursor = cursor;
        cursor
    }

    fn press_edit(&mut self, pos: Pos2, widget_pos: Pos2, modifiers: Modifiers) -> CursorHint {
        self.refresh_hover(pos);
        let hit = self.select_shape_point(pos, modifiers.is_multi_select());
        self.prev_point = Some(pos);

        if modifiers.is_rect_select() {
            self.clear_hover_highlight();
            self.interaction = Interaction::RubberBand { start: pos, end: pos };
            return CursorHint::Default;
        }
        match hit {
            Some(PointSelection::Vertex { shape, vertex }) => {
                self.interaction = Interaction::DraggingVertex { shape, vertex };
                CursorHint::Point
            }
            Some(PointSelection::Shape(shape)) => {
                self.interaction = Interaction::DraggingShapes { hover: Some(shape) };
                CursorHint::Grab
            }
            None => {
                self.interaction = Interaction::Panning { origin: widget_pos };
                CursorHint::Grab
            }
        }
    }

    pub fn on_pointer_move(&mut self, widget_pos: Pos2, held: HeldButtons) -> CursorHint {
        let pos = self.transform.to_image_space(widget_pos);

        if let Interaction::RubberBand { end, .. } = &mut self.interaction {
            *end = pos;
        }
        if self.mode == Mode::Create {
            let cursor = self.move_drawing(pos);
            self.cursor = cursor;
            return cursor;
        }
        if self.interaction.is_pressed() && !held.any() {
            // The release happened outside the widget.
            debug!("ending stale {} gesture", self.interaction.name());
            self.finish_gesture();
        }

        let cursor = match self.interaction.clone() {
            Interaction::CopyDragging => self.drag_copies(pos),
            Interaction::DraggingVertex { shape, vertex } => {
                if self.bounded_move_vertex(shape, vertex, pos) {
                    self.emit(CanvasEvent::ShapeMoved);
                }
                CursorHint::Point
            }
            Interaction::DraggingShapes { .. } => {
                if self.bounded_move_shapes(MoveTarget::Selected, pos) {
                    self.emit(CanvasEvent::ShapeMoved);
                }
                CursorHint::Move
            }
            Interaction::Panning { origin } => {
                let delta = widget_pos - origin;
                self.emit(CanvasEvent::ScrollRequest { delta: delta.x, orientation: Orientation::Horizontal });
                self.emit(CanvasEvent::ScrollRequest { delta: delta.y, orientation: Orientation::Vertical });
                CursorHint::Grab
            }
            Interaction::RubberBand { .. } => CursorHint::Default,
            Interaction::Idle | Interaction::Hovering { .. } => self.refresh_hover(pos),
        };
        self.cursor = cursor;
        cursor
    }

    /// First sample after a secondary press clones the selection, later
    /// samples move the clones.
    fn drag_copies(&mut self, pos: Pos2) -> CursorHint {
        if self.selection.is_empty() {
            return CursorHint::Default;
        }
        if !self.selection.has_copies() {
            let copies = self
                .selection
                .ids()
                .iter()
                .filter_map(|id| self.document.get(*id))
                .map(|shape| shape.duplicate())
                .collect();
            self.selection.begin_copy(copies);
            debug!("started copy drag of {} shapes", self.selection.len());
        } else {
            self.bounded_move_shapes(MoveTarget::Copies, pos);
        }
        CursorHint::Move
    }

    pub fn on_pointer_up(&mut self, widget_pos: Pos2, button: PointerButton, _modifiers: Modifiers) -> CursorHint {
        let pos = self.transform.to_image_space(widget_pos);
        trace!("pointer up {button:?} at {pos:?} in {:?}", self.mode);
        let cursor = match (self.mode, button) {
            (Mode::Create, PointerButton::Primary) => self.release_drawing(),
            (Mode::Create, PointerButton::Secondary) => CursorHint::Draw,
            (Mode::Edit, PointerButton::Primary) => self.finish_gesture(),
            (Mode::Edit, PointerButton::Secondary) => {
                if self.interaction == Interaction::CopyDragging {
                    self.interaction = Interaction::Idle;
                }
                self.emit(CanvasEvent::ContextMenuRequested {
                    has_copies: self.selection.has_copies(),
                    at: widget_pos,
                });
                CursorHint::Default
            }
        };
        self.cursor = cursor;
        cursor
    }

    /// End whatever primary gesture is in progress.
    fn finish_gesture(&mut self) -> CursorHint {
        match std::mem::take(&mut self.interaction) {
            Interaction::DraggingVertex { shape, vertex } => {
                if let Some(dragged) = self.document.get_mut(shape) {
                    dragged.highlight_vertex(vertex, HighlightMode::NearVertex);
                }
                self.interaction = Interaction::Hovering { shape, vertex: Some(vertex) };
                CursorHint::Point
            }
            Interaction::DraggingShapes { hover } => {
                if let Some(shape) = hover {
                    self.interaction = Interaction::Hovering { shape, vertex: None };
                }
                CursorHint::Grab
            }
            Interaction::RubberBand { start, end } => {
                self.select_in_window(Rect::from_two_pos(start, end));
                CursorHint::Default
            }
            Interaction::Panning { .. } | Interaction::CopyDragging => CursorHint::Default,
            idle @ (Interaction::Idle | Interaction::Hovering { .. }) => {
                self.interaction = idle;
                self.cursor
            }
        }
    }

    /// Add every shape whose bounding box lies fully inside `window`.
    pub fn select_in_window(&mut self, window: Rect) {
        let mut ids = self.selection.ids().to_vec();
        let before = ids.len();
        for shape in self.document.iter() {
            if window.contains_rect(shape.bounding_rect()) && !ids.contains(&shape.id()) {
                ids.push(shape.id());
            }
        }
        debug!("rubber band picked {} shapes", ids.len() - before);
        if ids.len() != before {
            self.set_hiding(true);
            self.apply_selection(&ids);
        }
    }

    pub fn on_double_click(&mut self, widget_pos: Pos2, button: PointerButton) -> CursorHint {
        if self.mode == Mode::Create && button == PointerButton::Primary && self.draw.is_anchored() {
            let pos = self.transform.to_image_space(widget_pos);
            trace!("double click at {pos:?} closes the shape");
            self.close_current();
            self.cursor = CursorHint::Draw;
        }
        self.cursor
    }

    /// Drop the vertex highlight of the hovered shape before a gesture that
    /// does not track hover takes over.
    fn clear_hover_highlight(&mut self) {
        if let Some((shape, _)) = self.interaction.hovered() {
            if let Some(shape) = self.document.get_mut(shape) {
                shape.highlight_clear();
            }
        }
    }

    /// Recompute the hover target under `pos` and move the highlight there.
    fn refresh_hover(&mut self, pos: Pos2) -> CursorHint {
        if let Some((previous, _)) = self.interaction.hovered() {
            if let Some(shape) = self.document.get_mut(previous) {
                shape.highlight_clear();
            }
        }
        match hit_test(&self.document, &self.selection, pos, self.config.epsilon) {
            Some(hit) => match hit.part {
                HitPart::Vertex(vertex) => {
                    if let Some(shape) = self.document.get_mut(hit.shape) {
                        shape.highlight_vertex(vertex, HighlightMode::NearVertex);
                    }
                    self.interaction = Interaction::Hovering { shape: hit.shape, vertex: Some(vertex) };
                    CursorHint::Point
                }
                HitPart::Body => {
                    self.interaction = Interaction::Hovering { shape: hit.shape, vertex: None };
                    CursorHint::Grab
                }
            },
            None => {
                self.interaction = Interaction::Idle;
                CursorHint::Default
            }
        }
    }

    /// Select whatever lies under `point`.
    ///
    /// A hovered vertex wins and selects its shape alone. Otherwise the
    /// topmost visible shape containing the point is selected (toggled with
    /// `multiple`), promoted to the top and its drag offsets recorded.
    /// Pressing on empty space clears the selection.
    pub fn select_shape_point(&mut self, point: Pos2, multiple: bool) -> Option<PointSelection> {
        if let Some((shape, vertex)) = self.interaction.hovered_vertex() {
            if let Some(target) = self.document.get_mut(shape) {
                target.highlight_vertex(vertex, HighlightMode::MoveVertex);
            }
            self.apply_selection(&[shape]);
            return Some(PointSelection::Vertex { shape, vertex });
        }

        let hit = self
            .document
            .iter()
            .rev()
            .find(|shape| self.document.is_visible(shape.id()) && shape.contains_point(point))
            .map(|shape| shape.id());
        let Some(id) = hit else {
            self.apply_selection(&[]);
            return None;
        };

        self.set_hiding(true);
        if multiple {
            let mut ids = self.selection.ids().to_vec();
            if let Some(index) = ids.iter().position(|selected| *selected == id) {
                ids.remove(index);
            } else {
                ids.push(id);
            }
            self.apply_selection(&ids);
        } else if !self.selection.contains(id) {
            self.apply_selection(&[id]);
        }
        self.calculate_offsets(point);
        self.document.promote(id);
        Some(PointSelection::Shape(id))
    }
}
