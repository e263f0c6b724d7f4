//! Top-level mode and the edit-mode gesture state machine.
//!
//! ```text
//!             hover                    press on vertex
//!   Idle ◄──────────► Hovering ─────────────────────────► DraggingVertex
//!    │                   │        press on shape body
//!    │                   └──────────────────────────────► DraggingShapes
//!    │   press on background ──► Panning
//!    │   press + rect modifier ──► RubberBand
//!    │   secondary press ──► CopyDragging
//!    ◄──────────────── release ends every pressed gesture
//! ```
//!
//! Exactly one variant is active, so hover, drag, pan and rubber-band state
//! can never be set at the same time.

use egui::{Pos2, Rect};

use crate::shape::ShapeId;

/// Whether clicks draw new shapes or edit existing ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    Create,
    #[default]
    Edit,
}

/// Edit-mode gesture.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Interaction {
    /// Nothing under the pointer and no button held.
    #[default]
    Idle,
    /// Pointer over a shape body, or over one of its vertices.
    Hovering {
        shape: ShapeId,
        vertex: Option<usize>,
    },
    /// Primary drag of a single corner.
    DraggingVertex {
        shape: ShapeId,
        vertex: usize,
    },
    /// Primary drag of the whole selection. `hover` is the shape that was
    /// under the pointer at press time.
    DraggingShapes {
        hover: Option<ShapeId>,
    },
    /// Secondary drag of ghost copies of the selection.
    CopyDragging,
    /// Primary drag on the background; scroll requests follow the pointer.
    Panning {
        /// Widget-space press position.
        origin: Pos2,
    },
    /// Rubber-band selection between two image-space corners.
    RubberBand {
        start: Pos2,
        end: Pos2,
    },
}

impl Interaction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Hovering { .. } => "Hovering",
            Self::DraggingVertex { .. } => "DraggingVertex",
            Self::DraggingShapes { .. } => "DraggingShapes",
            Self::CopyDragging => "CopyDragging",
            Self::Panning { .. } => "Panning",
            Self::RubberBand { .. } => "RubberBand",
        }
    }

    /// The highlighted shape and vertex, if any.
    pub fn hovered(&self) -> Option<(ShapeId, Option<usize>)> {
        match self {
            Self::Hovering { shape, vertex } => Some((*shape, *vertex)),
            Self::DraggingVertex { shape, vertex } => Some((*shape, Some(*vertex))),
            Self::DraggingShapes { hover } => hover.map(|shape| (shape, None)),
            Self::Idle | Self::CopyDragging | Self::Panning { .. } | Self::RubberBand { .. } => None,
        }
    }

    /// A vertex is hovered or being dragged.
    pub fn hovered_vertex(&self) -> Option<(ShapeId, usize)> {
        match self.hovered() {
            Some((shape, Some(vertex))) => Some((shape, vertex)),
            _ => None,
        }
    }

    /// A button is down and this gesture owns the pointer.
    pub fn is_pressed(&self) -> bool {
        !matches!(self, Self::Idle | Self::Hovering { .. })
    }

    /// The rubber-band rectangle, normalized so `min <= max`.
    pub fn rubber_band(&self) -> Option<Rect> {
        match self {
            Self::RubberBand { start, end } => Some(Rect::from_two_pos(*start, *end)),
            _ => None,
        }
    }
}
