use thiserror::Error;

use crate::shape::ShapeId;

/// Caller-contract violations reported by the canvas.
///
/// Geometry never fails: out-of-bounds positions are clamped. These errors
/// only signal that the host asked for something the current state cannot
/// satisfy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanvasError {
    #[error("no shapes are selected")]
    NoSelection,

    #[error("there are no ghost copies to commit")]
    NoPendingCopy,

    #[error("{selected} selected shapes but {copies} ghost copies")]
    CopyMismatch { selected: usize, copies: usize },

    #[error("a label must not be empty")]
    EmptyLabel,

    #[error("the canvas has no shapes")]
    NoShapes,

    #[error("unknown shape {0}")]
    UnknownShape(ShapeId),
}

/// Result type for canvas operations
pub type CanvasResult<T> = Result<T, CanvasError>;
