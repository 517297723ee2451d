//! Drawing document: a name plus an ordered shape collection.

use crate::shapes::{KindCounts, Shape, ShapeId, ShapeKind, ShapeList, coerce_size};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Name shown for drawings without one.
pub const UNTITLED_DRAWING: &str = "Untitled Drawing";

/// Serializable form of a drawing: `{ drawingName, shapes }`.
///
/// Used for saved records and for export files. Reading is lenient: a
/// missing or null `drawingName` becomes [`UNTITLED_DRAWING`] and missing
/// `shapes` become an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawDrawingData")]
pub struct DrawingData {
    pub drawing_name: String,
    pub shapes: Vec<Shape>,
}

impl DrawingData {
    /// Name to display, falling back to [`UNTITLED_DRAWING`] when empty.
    pub fn display_name(&self) -> &str {
        display_name(&self.drawing_name)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDrawingData {
    #[serde(default)]
    drawing_name: Option<String>,
    #[serde(default)]
    shapes: Option<Vec<Shape>>,
}

impl From<RawDrawingData> for DrawingData {
    fn from(raw: RawDrawingData) -> Self {
        let mut seen = HashSet::new();
        let shapes = raw
            .shapes
            .unwrap_or_default()
            .into_iter()
            .map(|mut shape| {
                shape.size = coerce_size(shape.size);
                if !seen.insert(shape.id.clone()) {
                    let fresh = ShapeId::new();
                    log::warn!("Duplicate shape id {} in drawing data, reassigned to {}", shape.id, fresh);
                    seen.insert(fresh.clone());
                    shape.id = fresh;
                }
                shape
            })
            .collect();
        Self {
            drawing_name: raw.drawing_name.unwrap_or_else(|| UNTITLED_DRAWING.to_string()),
            shapes,
        }
    }
}

fn display_name(name: &str) -> &str {
    if name.is_empty() { UNTITLED_DRAWING } else { name }
}

/// The drawing currently being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingDocument {
    name: String,
    shapes: ShapeList,
}

impl Default for DrawingDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingDocument {
    /// Create an empty, untitled document.
    pub fn new() -> Self {
        Self {
            name: UNTITLED_DRAWING.to_string(),
            shapes: ShapeList::new(),
        }
    }

    /// Build a document from its serialized form.
    pub fn from_data(data: DrawingData) -> Self {
        Self {
            name: data.drawing_name,
            shapes: data.shapes.into(),
        }
    }

    /// Stored name, possibly empty.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name to display, falling back to [`UNTITLED_DRAWING`] when empty.
    pub fn display_name(&self) -> &str {
        display_name(&self.name)
    }

    /// Set the name. Stored exactly as given, including empty strings.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replace name and shapes together.
    pub fn replace(&mut self, name: impl Into<String>, shapes: impl Into<ShapeList>) {
        self.name = name.into();
        self.shapes = shapes.into();
    }

    /// Serializable copy of the current state.
    pub fn snapshot(&self) -> DrawingData {
        DrawingData {
            drawing_name: self.name.clone(),
            shapes: self.shapes.iter().cloned().collect(),
        }
    }

    pub fn shapes(&self) -> &ShapeList {
        &self.shapes
    }

    pub fn shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    /// Append a default-sized shape centred at (x, y).
    pub fn add_shape(&mut self, kind: ShapeKind, x: f64, y: f64) -> Shape {
        self.shapes.add_shape(kind, x, y)
    }

    /// Append a shape of the given size centred at (x, y).
    pub fn add_shape_sized(&mut self, kind: ShapeKind, x: f64, y: f64, size: f64) -> Shape {
        self.shapes.add_shape_sized(kind, x, y, size)
    }

    pub fn remove_shape(&mut self, id: &ShapeId) -> Option<Shape> {
        self.shapes.remove_shape(id)
    }

    pub fn move_shape(&mut self, id: &ShapeId, x: f64, y: f64) -> bool {
        self.shapes.move_shape(id, x, y)
    }

    pub fn resize_shape(&mut self, id: &ShapeId, size: f64) -> Option<f64> {
        self.shapes.resize_shape(id, size)
    }

    pub fn kind_counts(&self) -> KindCounts {
        self.shapes.kind_counts()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}
