//! Single-shape selection.

use crate::shapes::{ShapeId, select_shape};

/// At most one selected shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<ShapeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a shape, replacing any previous selection.
    pub fn select(&mut self, id: ShapeId) {
        self.selected = select_shape(id);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&ShapeId> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, id: &ShapeId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    /// Drop the selection if it names a shape that was just removed.
    /// Returns true if the selection was cleared.
    pub fn shape_removed(&mut self, id: &ShapeId) -> bool {
        if self.is_selected(id) {
            self.selected = None;
            true
        } else {
            false
        }
    }
}
