use egui::Pos2;

use crate::shape::ShapeId;

/// Scroll axis of a [`CanvasEvent::ScrollRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Notifications from the canvas to the host application.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    /// A drawn shape was closed and appended; the host normally asks for a
    /// label and calls `set_last_label`.
    NewShape(ShapeId),
    /// The selection was replaced by these shapes (possibly none).
    SelectionChanged(Vec<ShapeId>),
    /// Shape geometry changed through a drag or a nudge.
    ShapeMoved,
    /// A shape is being drawn (`true`) or drawing stopped (`false`).
    DrawingPolygon(bool),
    /// Wheel with the multi-select modifier: zoom by this many wheel units.
    ZoomRequest(f32),
    /// Wheel with both modifiers: change the overlay intensity.
    LightRequest(f32),
    /// Scroll the view, or pan it during a background drag.
    ScrollRequest {
        delta: f32,
        orientation: Orientation,
    },
    /// The secondary button was released; the host shows its context menu
    /// and answers with `end_move`, `cancel_copy` or nothing.
    ContextMenuRequested {
        has_copies: bool,
        at: Pos2,
    },
}
