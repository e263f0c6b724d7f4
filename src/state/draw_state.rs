use egui::Pos2;

use crate::shape::Shape;

/// Create-mode progress.
#[derive(Debug, Clone, Default)]
pub enum DrawState {
    /// No shape under construction.
    #[default]
    Idle,
    /// The first corner is placed; `guide` runs from the anchor to the
    /// (clamped, possibly squared) cursor and previews the rectangle.
    Anchored {
        current: Shape,
        guide: [Pos2; 2],
    },
}

impl DrawState {
    pub fn anchored(anchor: Pos2) -> Self {
        let mut current = Shape::new();
        current.add_point(anchor);
        Self::Anchored { current, guide: [anchor, anchor] }
    }

    pub fn is_anchored(&self) -> bool {
        matches!(self, Self::Anchored { .. })
    }

    pub fn current(&self) -> Option<&Shape> {
        match self {
            Self::Anchored { current, .. } => Some(current),
            Self::Idle => None,
        }
    }

    pub fn guide(&self) -> Option<[Pos2; 2]> {
        match self {
            Self::Anchored { guide, .. } => Some(*guide),
            Self::Idle => None,
        }
    }

    /// Give up the shape under construction, leaving `Idle` behind.
    pub fn take(&mut self) -> Option<(Shape, [Pos2; 2])> {
        match std::mem::take(self) {
            Self::Anchored { current, guide } => Some((current, guide)),
            Self::Idle => None,
        }
    }
}
