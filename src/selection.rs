use crate::shape::{Shape, ShapeId};

/// The selected shapes and their ghost copies.
///
/// `copies` is either empty or holds exactly one detached clone per selected
/// shape, in the same order. The clones are what a secondary-button drag
/// moves before the user decides between duplicating, moving or cancelling.
#[derive(Debug, Default, Clone)]
pub struct Selection {
    selected: Vec<ShapeId>,
    copies: Vec<Shape>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[ShapeId] {
        &self.selected
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.selected.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Replace the selection. Duplicate ids are kept once, in first-seen
    /// order. Pending copies no longer match and are dropped.
    pub fn replace(&mut self, ids: &[ShapeId]) {
        self.selected.clear();
        for id in ids {
            if !self.selected.contains(id) {
                self.selected.push(*id);
            }
        }
        self.copies.clear();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.copies.clear();
    }

    /// Forget a shape that left the document, together with its copy.
    pub fn forget(&mut self, id: ShapeId) {
        if let Some(index) = self.selected.iter().position(|selected| *selected == id) {
            self.selected.remove(index);
            if index < self.copies.len() {
                self.copies.remove(index);
            }
        }
    }

    /// Swap the id at `index` for another, used when a copy takes over
    /// from its original.
    pub(crate) fn substitute(&mut self, index: usize, id: ShapeId) {
        if let Some(slot) = self.selected.get_mut(index) {
            *slot = id;
        }
    }

    pub fn copies(&self) -> &[Shape] {
        &self.copies
    }

    pub fn copies_mut(&mut self) -> &mut [Shape] {
        &mut self.copies
    }

    pub fn has_copies(&self) -> bool {
        !self.copies.is_empty()
    }

    /// Install ghost copies, one per selected shape.
    pub(crate) fn begin_copy(&mut self, copies: Vec<Shape>) {
        debug_assert_eq!(copies.len(), self.selected.len());
        self.copies = copies;
    }

    pub fn take_copies(&mut self) -> Vec<Shape> {
        std::mem::take(&mut self.copies)
    }
}
