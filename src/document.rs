use std::collections::HashMap;

use crate::shape::{Shape, ShapeId};

/// The ordered shape collection of one image plus per-shape visibility.
///
/// Order is paint order: the last shape is drawn on top and is the first
/// candidate during hit testing.
#[derive(Debug, Default, Clone)]
pub struct Document {
    shapes: Vec<Shape>,
    visible: HashMap<ShapeId, bool>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Remove and return the topmost shape.
    pub fn pop(&mut self) -> Option<Shape> {
        let shape = self.shapes.pop()?;
        self.visible.remove(&shape.id());
        Some(shape)
    }

    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.position(id)?;
        self.visible.remove(&id);
        Some(self.shapes.remove(index))
    }

    /// Move a shape to the top of the paint order. Returns false if the id
    /// is unknown.
    pub fn promote(&mut self, id: ShapeId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let shape = self.shapes.remove(index);
        self.shapes.push(shape);
        true
    }

    pub fn position(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|shape| shape.id() == id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id() == id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|shape| shape.id() == id)
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut Shape> {
        self.shapes.iter_mut()
    }

    pub fn ids(&self) -> Vec<ShapeId> {
        self.shapes.iter().map(Shape::id).collect()
    }

    pub fn last(&self) -> Option<&Shape> {
        self.shapes.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut Shape> {
        self.shapes.last_mut()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Drop all shapes and visibility entries.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.visible.clear();
    }

    pub fn replace_all(&mut self, shapes: Vec<Shape>) {
        self.visible.clear();
        self.shapes = shapes;
    }

    /// Shapes without an explicit entry are visible.
    pub fn is_visible(&self, id: ShapeId) -> bool {
        self.visible.get(&id).copied().unwrap_or(true)
    }

    pub fn set_visible(&mut self, id: ShapeId, visible: bool) {
        self.visible.insert(id, visible);
    }
}
