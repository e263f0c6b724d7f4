//! Point math shared by shapes, hit testing and the canvas.
//!
//! Everything here works in image space and is free of state.

use egui::{Pos2, Rect, Vec2};

pub mod hit_testing;

/// Euclidean distance between two points.
pub fn distance(a: Pos2, b: Pos2) -> f32 {
    (a - b).length()
}

/// Calculate the bounding box for a set of points
pub fn bounding_rect(points: &[Pos2]) -> Rect {
    if points.is_empty() {
        return Rect::NOTHING;
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Rect::from_min_max(Pos2::new(min_x, min_y), Pos2::new(max_x, max_y))
}

/// True unless `0 <= x <= width` and `0 <= y <= height`.
pub fn is_out_of_bounds(point: Pos2, image_size: Vec2) -> bool {
    !(0.0 <= point.x && point.x <= image_size.x && 0.0 <= point.y && point.y <= image_size.y)
}

/// Clip a point into `[0, width] x [0, height]`.
pub fn clamp_to_bounds(point: Pos2, image_size: Vec2) -> Pos2 {
    Pos2::new(
        point.x.max(0.0).min(image_size.x),
        point.y.max(0.0).min(image_size.y),
    )
}

/// The corner of the square anchored at `anchor` that points toward `toward`.
///
/// The side is the shorter of the two axis distances; each axis keeps the
/// sign of `toward - anchor` (zero counts as positive).
pub fn square_corner(anchor: Pos2, toward: Pos2) -> Pos2 {
    let delta = toward - anchor;
    let size = delta.x.abs().min(delta.y.abs());
    let direction_x = if delta.x < 0.0 { -1.0 } else { 1.0 };
    let direction_y = if delta.y < 0.0 { -1.0 } else { 1.0 };
    Pos2::new(anchor.x + direction_x * size, anchor.y + direction_y * size)
}

/// Distance from a point to a line segment.
pub(crate) fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}
