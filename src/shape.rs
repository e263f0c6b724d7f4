use std::fmt;
use std::ops::Index;

use egui::{Color32, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{self, hit_testing};

/// A closed shape always has exactly this many corners.
pub const MAX_POINTS: usize = 4;

pub const DEFAULT_LINE_COLOR: Color32 = Color32::from_rgba_premultiplied(0, 128, 0, 128);
pub const DEFAULT_FILL_COLOR: Color32 = Color32::from_rgba_premultiplied(128, 0, 0, 128);

/// Stable handle for a shape. Two shapes are the same shape only if their
/// ids match; equal points never make them equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(Uuid);

impl ShapeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a highlighted vertex should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HighlightMode {
    /// The cursor is close enough to snap onto the vertex.
    NearVertex,
    /// The vertex will follow the cursor on the next drag.
    MoveVertex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub index: usize,
    pub mode: HighlightMode,
}

/// A labeled quadrilateral in image space.
///
/// Corners are stored clockwise from the anchor; even indices govern x and
/// odd indices govern y when a vertex drag keeps the quad axis-aligned.
#[derive(Debug, Clone)]
pub struct Shape {
    id: ShapeId,
    points: Vec<Pos2>,
    pub label: String,
    pub line_color: Color32,
    pub fill_color: Color32,
    pub selected: bool,
    pub difficult: bool,
    highlight: Option<Highlight>,
    closed: bool,
}

impl Default for Shape {
    fn default() -> Self {
        Self::new()
    }
}

impl Shape {
    /// An open, empty shape with default colors.
    pub fn new() -> Self {
        Self {
            id: ShapeId::new(),
            points: Vec::with_capacity(MAX_POINTS),
            label: String::new(),
            line_color: DEFAULT_LINE_COLOR,
            fill_color: DEFAULT_FILL_COLOR,
            selected: false,
            difficult: false,
            highlight: None,
            closed: false,
        }
    }

    /// A closed axis-aligned rectangle with corners in drawing order:
    /// `min`, top-right, `max`, bottom-left.
    pub fn rectangle(label: impl Into<String>, min: Pos2, max: Pos2) -> Self {
        let mut shape = Self::new();
        shape.label = label.into();
        shape.points = vec![min, Pos2::new(max.x, min.y), max, Pos2::new(min.x, max.y)];
        shape.closed = true;
        shape
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Pos2> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Pos2> {
        self.points.last().copied()
    }

    pub fn reach_max_points(&self) -> bool {
        self.points.len() >= MAX_POINTS
    }

    /// Append a corner. Returns false once the shape already has four.
    pub fn add_point(&mut self, point: Pos2) -> bool {
        if self.reach_max_points() {
            return false;
        }
        self.points.push(point);
        true
    }

    pub fn pop_point(&mut self) -> Option<Pos2> {
        self.points.pop()
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn set_open(&mut self) {
        self.closed = false;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn nearest_vertex(&self, point: Pos2, epsilon: f32) -> Option<usize> {
        hit_testing::nearest_vertex(&self.points, point, epsilon)
    }

    pub fn contains_point(&self, point: Pos2) -> bool {
        hit_testing::contains_point(&self.points, point)
    }

    pub fn bounding_rect(&self) -> Rect {
        geometry::bounding_rect(&self.points)
    }

    /// Translate every corner by `delta`.
    pub fn move_by(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }

    /// Translate a single corner. Out-of-range indices are ignored.
    pub fn move_vertex_by(&mut self, index: usize, delta: Vec2) {
        if let Some(point) = self.points.get_mut(index) {
            *point += delta;
        }
    }

    pub fn highlight_vertex(&mut self, index: usize, mode: HighlightMode) {
        self.highlight = Some(Highlight { index, mode });
    }

    pub fn highlight_clear(&mut self) {
        self.highlight = None;
    }

    pub fn highlight(&self) -> Option<Highlight> {
        self.highlight
    }

    /// Deep copy under a fresh id. The copy keeps the selection flag so it
    /// can stand in for the original inside a selection.
    pub fn duplicate(&self) -> Self {
        Self {
            id: ShapeId::new(),
            points: self.points.clone(),
            label: self.label.clone(),
            line_color: self.line_color,
            fill_color: self.fill_color,
            selected: self.selected,
            difficult: self.difficult,
            highlight: None,
            closed: self.closed,
        }
    }

    /// Overwrite the corners with another shape's corners.
    pub(crate) fn set_points(&mut self, points: &[Pos2]) {
        self.points.clear();
        self.points.extend_from_slice(points);
    }

    pub fn to_record(&self) -> ShapeRecord {
        ShapeRecord {
            label: self.label.clone(),
            points: self.points.clone(),
            line_color: Some(self.line_color),
            fill_color: Some(self.fill_color),
            difficult: self.difficult,
        }
    }

    /// Rebuild a shape from its stored form. Extra points past the fourth are
    /// dropped; only a full quadrilateral comes back closed.
    pub fn from_record(record: &ShapeRecord) -> Self {
        let mut shape = Self::new();
        shape.label = record.label.clone();
        shape.points = record.points.iter().copied().take(MAX_POINTS).collect();
        shape.line_color = record.line_color.unwrap_or(DEFAULT_LINE_COLOR);
        shape.fill_color = record.fill_color.unwrap_or(DEFAULT_FILL_COLOR);
        shape.difficult = record.difficult;
        shape.closed = shape.reach_max_points();
        shape
    }
}

impl Index<usize> for Shape {
    type Output = Pos2;

    fn index(&self, index: usize) -> &Pos2 {
        &self.points[index]
    }
}

/// Serialized form of a shape, without identity or UI flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub label: String,
    pub points: Vec<Pos2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_color: Option<Color32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Color32>,
    #[serde(default)]
    pub difficult: bool,
}
