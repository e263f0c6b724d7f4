use egui::Pos2;

use super::{distance, distance_to_line_segment};
use crate::document::Document;
use crate::selection::Selection;
use crate::shape::ShapeId;

/// Default pick radius around a vertex, in image units.
pub const VERTEX_EPSILON: f32 = 24.0;

/// Points closer than this to an edge count as inside the polygon.
const EDGE_TOLERANCE: f32 = 1e-4;

/// Which part of a shape was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Vertex(usize),
    Body,
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub shape: ShapeId,
    pub part: HitPart,
}

impl Hit {
    pub fn vertex(&self) -> Option<usize> {
        match self.part {
            HitPart::Vertex(index) => Some(index),
            HitPart::Body => None,
        }
    }
}

/// Index of the closest vertex within `epsilon` of `point`.
pub fn nearest_vertex(points: &[Pos2], point: Pos2, epsilon: f32) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, vertex) in points.iter().enumerate() {
        let dist = distance(*vertex, point);
        if dist <= epsilon && best.is_none_or(|(_, min)| dist < min) {
            best = Some((index, dist));
        }
    }
    best.map(|(index, _)| index)
}

/// Even-odd point-in-polygon test. Points on an edge are inside.
pub fn contains_point(points: &[Pos2], point: Pos2) -> bool {
    if points.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if distance_to_line_segment(point, a, b) <= EDGE_TOLERANCE {
            return true;
        }
        if (a.y > point.y) != (b.y > point.y) {
            let crossing_x = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < crossing_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Find the shape under `point`.
///
/// Candidates are the document's shapes followed by the selected ones, tested
/// from last to first, so selected shapes win ties and later shapes sit on
/// top. Hidden shapes are skipped. A vertex within `epsilon` stops the search
/// before the area test of the same shape.
pub fn hit_test(document: &Document, selection: &Selection, point: Pos2, epsilon: f32) -> Option<Hit> {
    let priority: Vec<ShapeId> = document
        .iter()
        .map(|shape| shape.id())
        .chain(selection.ids().iter().copied())
        .collect();

    for id in priority.into_iter().rev() {
        if !document.is_visible(id) {
            continue;
        }
        let Some(shape) = document.get(id) else {
            continue;
        };
        if let Some(index) = nearest_vertex(shape.points(), point, epsilon) {
            return Some(Hit { shape: id, part: HitPart::Vertex(index) });
        }
        if contains_point(shape.points(), point) {
            return Some(Hit { shape: id, part: HitPart::Body });
        }
    }
    None
}
