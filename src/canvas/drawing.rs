//! Create mode.
//!
//! A rectangle is drawn either with two clicks or with one drag:
//!
//! ```text
//!   Idle ──press in bounds──► Anchored ──second press / double click──► finalise
//!                               │   └──release after dragging away──► finalise
//!                               └──Escape──► Idle
//! ```
//!
//! While anchored the guide follows the pointer, clamped to the image and
//! snapped onto the anchor when it comes within `epsilon` of it.

use egui::{pos2, Pos2};
use log::{debug, error, info};

use super::Canvas;
use crate::error::{CanvasError, CanvasResult};
use crate::event::CanvasEvent;
use crate::geometry::{clamp_to_bounds, distance, is_out_of_bounds, square_corner};
use crate::input::CursorHint;
use crate::shape::ShapeId;
use crate::state::{DrawState, Mode};

impl Canvas {
    pub(super) fn press_drawing(&mut self, pos: Pos2) -> CursorHint {
        self.handle_drawing(pos);
        CursorHint::Draw
    }

    /// Advance the draw state machine with a primary press at `pos`.
    ///
    /// The first press inside the image anchors a new shape, the next one
    /// completes and closes it.
    pub fn handle_drawing(&mut self, pos: Pos2) {
        if self.draw.is_anchored() {
            self.close_current();
        } else if !is_out_of_bounds(pos, self.image_size()) {
            self.draw = DrawState::anchored(pos);
            self.prev_point = None;
            self.set_hiding(true);
            self.emit(CanvasEvent::DrawingPolygon(true));
            debug!("anchored new shape at {pos:?}");
        }
    }

    /// A release right after dragging away from the anchor completes the
    /// shape; a plain click leaves it anchored for the second click.
    pub(super) fn release_drawing(&mut self) -> CursorHint {
        if let DrawState::Anchored { current, guide } = &self.draw {
            if current.len() == 1 && guide[1] != guide[0] {
                self.close_current();
            }
        }
        CursorHint::Draw
    }

    pub(super) fn move_drawing(&mut self, pos: Pos2) -> CursorHint {
        let image_size = self.image_size();
        let epsilon = self.config.epsilon;
        let square = self.config.square_mode;

        let DrawState::Anchored { current, guide } = &mut self.draw else {
            self.prev_point = Some(pos);
            return CursorHint::Draw;
        };
        let Some(anchor) = current.first() else {
            return CursorHint::Draw;
        };

        let mut cursor = CursorHint::Draw;
        let target = if is_out_of_bounds(pos, image_size) {
            clamp_to_bounds(pos, image_size)
        } else if current.len() > 1 && distance(pos, anchor) < epsilon {
            cursor = CursorHint::Point;
            anchor
        } else {
            pos
        };
        guide[1] = if square { square_corner(anchor, target) } else { target };
        self.prev_point = None;
        cursor
    }

    /// Fill in the three missing corners of a one-point shape from the
    /// guide, then finalise.
    pub(super) fn close_current(&mut self) {
        if let DrawState::Anchored { current, guide } = &mut self.draw {
            if current.len() == 1 {
                let anchor = guide[0];
                let target = guide[1];
                current.add_point(pos2(target.x, anchor.y));
                current.add_point(target);
                current.add_point(pos2(anchor.x, target.y));
            }
        }
        self.finalise();
    }

    /// Close the shape under construction and append it to the document.
    ///
    /// A shape whose first and last corners coincide has no area and is
    /// discarded instead.
    pub fn finalise(&mut self) -> Option<ShapeId> {
        let (mut current, _) = self.draw.take()?;
        if current.first() == current.last() {
            debug!("discarding degenerate shape");
            self.set_hiding(false);
            self.emit(CanvasEvent::DrawingPolygon(false));
            return None;
        }
        current.close();
        let id = current.id();
        self.document.push(current);
        self.set_hiding(false);
        info!("added shape {id}");
        self.emit(CanvasEvent::NewShape(id));
        Some(id)
    }

    /// Whether Enter may close the shape under construction.
    pub fn can_close_shape(&self) -> bool {
        self.mode == Mode::Create && self.draw.current().is_some_and(|current| current.len() > 2)
    }

    /// Drop the shape under construction.
    pub fn cancel_drawing(&mut self) {
        if self.draw.take().is_some() {
            self.set_hiding(false);
            self.emit(CanvasEvent::DrawingPolygon(false));
            debug!("drawing cancelled");
        }
    }

    /// Reopen the most recently added shape for drawing. The next press
    /// closes it again unchanged.
    pub fn undo_last_line(&mut self) -> CanvasResult<()> {
        let Some(mut shape) = self.document.pop() else {
            error!("no shape to reopen");
            return Err(CanvasError::NoShapes);
        };
        self.un_highlight(Some(shape.id()));
        self.forget_selected(shape.id());
        shape.set_open();
        shape.selected = false;
        let guide = match (shape.last(), shape.first()) {
            (Some(last), Some(first)) => [last, first],
            _ => [Pos2::ZERO; 2],
        };
        self.draw = DrawState::Anchored { current: shape, guide };
        self.emit(CanvasEvent::DrawingPolygon(true));
        Ok(())
    }

    /// Throw away the most recently added shape, typically after the label
    /// prompt was cancelled.
    pub fn reset_all_lines(&mut self) -> CanvasResult<()> {
        let Some(shape) = self.document.pop() else {
            error!("no shape to discard");
            return Err(CanvasError::NoShapes);
        };
        self.un_highlight(Some(shape.id()));
        self.forget_selected(shape.id());
        self.draw = DrawState::Idle;
        self.emit(CanvasEvent::DrawingPolygon(false));
        debug!("discarded shape {}", shape.id());
        Ok(())
    }

    fn forget_selected(&mut self, id: ShapeId) {
        if self.selection.contains(id) {
            self.selection.forget(id);
            self.emit(CanvasEvent::SelectionChanged(self.selection.ids().to_vec()));
        }
    }
}
