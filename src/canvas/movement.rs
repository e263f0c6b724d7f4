use egui::{vec2, Pos2, Vec2};
use log::{debug, error};

use super::Canvas;
use crate::error::{CanvasError, CanvasResult};
use crate::event::CanvasEvent;
use crate::geometry::{clamp_to_bounds, is_out_of_bounds, square_corner};
use crate::shape::{ShapeId, MAX_POINTS};

/// Which shapes a bounded group move applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTarget {
    /// The selected shapes in the document.
    Selected,
    /// The ghost copies of a secondary-button drag.
    Copies,
}

impl Canvas {
    /// Record where the selection's bounding box sits relative to `point`.
    ///
    /// The box starts inverted at the image edges so any selected shape
    /// shrinks it to its real extent.
    pub fn calculate_offsets(&mut self, point: Pos2) {
        let size = self.image_size();
        let (mut left, mut top) = (size.x - 1.0, size.y - 1.0);
        let (mut right, mut bottom) = (0.0_f32, 0.0_f32);
        for shape in self.selection.ids().iter().filter_map(|id| self.document.get(*id)) {
            let rect = shape.bounding_rect();
            left = left.min(rect.left());
            right = right.max(rect.right());
            top = top.min(rect.top());
            bottom = bottom.max(rect.bottom());
        }
        self.offsets = (vec2(left - point.x, top - point.y), vec2(right - point.x, bottom - point.y));
    }

    /// Move the target shapes by the pointer travel since the previous
    /// sample, stopping the group at the image edges.
    ///
    /// Returns whether anything moved. A pointer outside the image is
    /// ignored outright.
    pub fn bounded_move_shapes(&mut self, target: MoveTarget, pos: Pos2) -> bool {
        let size = self.image_size();
        if is_out_of_bounds(pos, size) {
            return false;
        }
        let Some(prev) = self.prev_point else {
            return false;
        };

        let (top_left_offset, bottom_right_offset) = self.offsets;
        let mut pos = pos;
        let top_left = pos + top_left_offset;
        if is_out_of_bounds(top_left, size) {
            pos = pos - vec2(top_left.x.min(0.0), top_left.y.min(0.0));
        }
        let bottom_right = pos + bottom_right_offset;
        if is_out_of_bounds(bottom_right, size) {
            pos = pos + vec2((size.x - bottom_right.x).min(0.0), (size.y - bottom_right.y).min(0.0));
        }

        let delta = pos - prev;
        if delta == Vec2::ZERO {
            return false;
        }
        match target {
            MoveTarget::Selected => {
                for id in self.selection.ids() {
                    if let Some(shape) = self.document.get_mut(*id) {
                        shape.move_by(delta);
                    }
                }
            }
            MoveTarget::Copies => {
                for copy in self.selection.copies_mut() {
                    copy.move_by(delta);
                }
            }
        }
        self.prev_point = Some(pos);
        true
    }

    /// Drag corner `index` of `shape` to `pos` while keeping the shape an
    /// axis-aligned rectangle.
    ///
    /// The two neighbours each absorb one component of the shift: for an
    /// even corner the following neighbour takes the y-shift and the
    /// preceding one the x-shift, for an odd corner the other way round.
    /// In square mode the corner lands on the square spanned from the
    /// opposite corner.
    pub fn bounded_move_vertex(&mut self, shape: ShapeId, index: usize, pos: Pos2) -> bool {
        let size = self.image_size();
        let square = self.config.square_mode;
        let pos = if is_out_of_bounds(pos, size) { clamp_to_bounds(pos, size) } else { pos };
        let Some(target) = self.document.get_mut(shape) else {
            return false;
        };
        if target.len() != MAX_POINTS || index >= MAX_POINTS {
            return false;
        }

        let point = target[index];
        let shift = if square { square_corner(target[(index + 2) % 4], pos) - point } else { pos - point };
        if shift == Vec2::ZERO {
            return false;
        }

        let (next_shift, previous_shift) = if index % 2 == 0 {
            (vec2(0.0, shift.y), vec2(shift.x, 0.0))
        } else {
            (vec2(shift.x, 0.0), vec2(0.0, shift.y))
        };
        target.move_vertex_by(index, shift);
        target.move_vertex_by((index + 1) % 4, next_shift);
        target.move_vertex_by((index + 3) % 4, previous_shift);
        true
    }

    /// Nudge the selection by one step in `direction`, or not at all if
    /// any corner would leave the image.
    pub fn move_one_unit(&mut self, direction: Vec2) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        let step = direction * self.config.nudge_step;
        let size = self.image_size();
        let blocked = self
            .selection
            .ids()
            .iter()
            .filter_map(|id| self.document.get(*id))
            .flat_map(|shape| shape.points())
            .any(|point| is_out_of_bounds(*point + step, size));
        if blocked {
            debug!("nudge by {step:?} blocked at the image edge");
            return false;
        }
        for id in self.selection.ids() {
            if let Some(shape) = self.document.get_mut(*id) {
                shape.move_by(step);
            }
        }
        self.emit(CanvasEvent::ShapeMoved);
        true
    }

    /// Resolve a copy drag.
    ///
    /// With `copy` the ghost copies join the document and replace their
    /// originals in the selection. Without it the originals jump to where
    /// the copies are. Either way the copies are gone afterwards.
    pub fn end_move(&mut self, copy: bool) -> CanvasResult<()> {
        if self.selection.is_empty() {
            error!("end_move without a selection");
            return Err(CanvasError::NoSelection);
        }
        if !self.selection.has_copies() {
            error!("end_move without pending copies");
            return Err(CanvasError::NoPendingCopy);
        }
        if self.selection.copies().len() != self.selection.len() {
            let err = CanvasError::CopyMismatch {
                selected: self.selection.len(),
                copies: self.selection.copies().len(),
            };
            error!("{err}");
            return Err(err);
        }

        let ids = self.selection.ids().to_vec();
        let copies = self.selection.take_copies();
        for (index, (id, mut duplicate)) in ids.into_iter().zip(copies).enumerate() {
            if copy {
                if let Some(original) = self.document.get_mut(id) {
                    original.selected = false;
                }
                duplicate.selected = true;
                self.selection.substitute(index, duplicate.id());
                self.document.push(duplicate);
            } else if let Some(original) = self.document.get_mut(id) {
                original.set_points(duplicate.points());
            }
        }

        if copy {
            debug!("committed {} copies", self.selection.len());
            self.emit(CanvasEvent::SelectionChanged(self.selection.ids().to_vec()));
        } else {
            debug!("moved {} shapes onto their copies", self.selection.len());
            self.emit(CanvasEvent::ShapeMoved);
        }
        Ok(())
    }

    /// Discard pending copies. Returns whether there were any.
    pub fn cancel_copy(&mut self) -> bool {
        !self.selection.take_copies().is_empty()
    }

    /// Duplicate the selection in place; the duplicates become the
    /// selection. Returns their ids.
    pub fn copy_selected_shapes(&mut self) -> CanvasResult<Vec<ShapeId>> {
        if self.selection.is_empty() {
            error!("nothing selected to copy");
            return Err(CanvasError::NoSelection);
        }
        let copies = self
            .selection
            .ids()
            .iter()
            .filter_map(|id| self.document.get(*id))
            .map(|shape| shape.duplicate())
            .collect();
        self.selection.begin_copy(copies);
        self.end_move(true)?;
        Ok(self.selection.ids().to_vec())
    }
}
