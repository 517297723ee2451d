//! Shape definitions and the operations that edit a shape collection.

mod id;
mod kind;

pub use id::ShapeId;
pub use kind::{PaletteStyle, ShapeKind};

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Size given to shapes placed from the palette.
pub const DEFAULT_SHAPE_SIZE: f64 = 50.0;
/// Smallest size offered by the size control.
pub const MIN_SHAPE_SIZE: f64 = 20.0;
/// Largest size offered by the size control.
pub const MAX_SHAPE_SIZE: f64 = 200.0;

fn default_size() -> f64 {
    DEFAULT_SHAPE_SIZE
}

/// A shape placed on the canvas.
///
/// Serialized flat as `{ id, type, x, y, size }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// A missing id on read gets a fresh one.
    #[serde(default)]
    pub(crate) id: ShapeId,
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    /// Centroid in canvas coordinates.
    #[serde(flatten)]
    pub position: Point,
    /// Side length of the bounding square.
    #[serde(default = "default_size")]
    pub size: f64,
}

impl Shape {
    /// Create a shape of the default size with a fresh id.
    pub fn new(kind: ShapeKind, position: Point) -> Self {
        Self {
            id: ShapeId::new(),
            kind,
            position,
            size: DEFAULT_SHAPE_SIZE,
        }
    }

    /// Reconstruct a shape with a specific ID (for storage and tests).
    pub fn with_id(id: ShapeId, kind: ShapeKind, position: Point, size: f64) -> Self {
        Self {
            id,
            kind,
            position,
            size: coerce_size(size),
        }
    }

    pub fn id(&self) -> &ShapeId {
        &self.id
    }

    /// Axis-aligned bounding box centred on the centroid.
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.position, (self.size, self.size))
    }

    /// Triangle vertices: apex at top, base along the bottom edge.
    pub fn triangle_vertices(&self) -> [Point; 3] {
        let half = self.size / 2.0;
        let Point { x, y } = self.position;
        [
            Point::new(x, y - half),
            Point::new(x - half, y + half),
            Point::new(x + half, y + half),
        ]
    }

    /// Check whether a canvas point lies on this shape.
    ///
    /// Unknown kinds are never hit; they are not drawn either.
    pub fn hit_test(&self, point: Point) -> bool {
        let half = self.size / 2.0;
        match self.kind {
            ShapeKind::Circle => (point - self.position).hypot() <= half,
            ShapeKind::Square => {
                let b = self.bounds();
                point.x >= b.x0 && point.x <= b.x1 && point.y >= b.y0 && point.y <= b.y1
            }
            ShapeKind::Triangle => point_in_triangle(point, self.triangle_vertices()),
            ShapeKind::Unknown(_) => false,
        }
    }
}

fn point_in_triangle(p: Point, [a, b, c]: [Point; 3]) -> bool {
    let side = |p1: Point, p2: Point| (p.x - p2.x) * (p1.y - p2.y) - (p1.x - p2.x) * (p.y - p2.y);
    let d1 = side(a, b);
    let d2 = side(b, c);
    let d3 = side(c, a);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Force a size to be a positive finite number.
///
/// Values outside the size-control range are kept; only non-positive or
/// non-finite input falls back to [`MIN_SHAPE_SIZE`].
pub fn coerce_size(size: f64) -> f64 {
    if size.is_finite() && size > 0.0 {
        size
    } else {
        MIN_SHAPE_SIZE
    }
}

/// Replace non-finite coordinates with the origin.
fn finite_point(x: f64, y: f64) -> Point {
    let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
    if !(x.is_finite() && y.is_finite()) {
        log::warn!("Non-finite position ({}, {}) placed at the origin", x, y);
    }
    Point::new(finite(x), finite(y))
}

/// The id to record as the current selection.
///
/// Any id is accepted; whether it names a live shape is up to the caller.
pub fn select_shape(id: ShapeId) -> Option<ShapeId> {
    Some(id)
}

/// Ordered shape collection. Insertion order is also paint order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeList {
    shapes: Vec<Shape>,
}

impl ShapeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new default-sized shape and return a copy of it.
    pub fn add_shape(&mut self, kind: ShapeKind, x: f64, y: f64) -> Shape {
        self.add_shape_sized(kind, x, y, DEFAULT_SHAPE_SIZE)
    }

    /// Append a new shape of the given size and return a copy of it.
    ///
    /// Non-finite coordinates are placed at the origin.
    pub fn add_shape_sized(&mut self, kind: ShapeKind, x: f64, y: f64, size: f64) -> Shape {
        let mut shape = Shape::new(kind, finite_point(x, y));
        shape.size = coerce_size(size);
        self.shapes.push(shape.clone());
        shape
    }

    /// Remove a shape. Returns the removed shape, `None` if it was absent.
    pub fn remove_shape(&mut self, id: &ShapeId) -> Option<Shape> {
        let index = self.shapes.iter().position(|s| &s.id == id)?;
        Some(self.shapes.remove(index))
    }

    /// Move a shape's centroid. Returns false if the shape is absent or the
    /// target is not finite.
    pub fn move_shape(&mut self, id: &ShapeId, x: f64, y: f64) -> bool {
        if !(x.is_finite() && y.is_finite()) {
            return false;
        }
        match self.get_mut(id) {
            Some(shape) => {
                shape.position = Point::new(x, y);
                true
            }
            None => false,
        }
    }

    /// Resize a shape. Returns the stored size, `None` if the shape is absent.
    pub fn resize_shape(&mut self, id: &ShapeId, size: f64) -> Option<f64> {
        let shape = self.get_mut(id)?;
        shape.size = coerce_size(size);
        Some(shape.size)
    }

    pub fn get(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| &s.id == id)
    }

    fn get_mut(&mut self, id: &ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| &s.id == id)
    }

    pub fn contains(&self, id: &ShapeId) -> bool {
        self.get(id).is_some()
    }

    /// Topmost shape under a canvas point.
    pub fn shape_at(&self, point: Point) -> Option<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .find(|s| s.hit_test(point))
            .map(|s| s.id.clone())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Count shapes per palette kind. Unknown kinds are not counted.
    pub fn kind_counts(&self) -> KindCounts {
        let mut counts = KindCounts::default();
        for shape in &self.shapes {
            match shape.kind {
                ShapeKind::Circle => counts.circle += 1,
                ShapeKind::Square => counts.square += 1,
                ShapeKind::Triangle => counts.triangle += 1,
                ShapeKind::Unknown(_) => {}
            }
        }
        counts
    }
}

impl From<Vec<Shape>> for ShapeList {
    fn from(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }
}

impl From<ShapeList> for Vec<Shape> {
    fn from(list: ShapeList) -> Self {
        list.shapes
    }
}

impl<'a> IntoIterator for &'a ShapeList {
    type Item = &'a Shape;
    type IntoIter = std::slice::Iter<'a, Shape>;

    fn into_iter(self) -> Self::IntoIter {
        self.shapes.iter()
    }
}

/// Number of shapes of each palette kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindCounts {
    pub circle: usize,
    pub square: usize,
    pub triangle: usize,
}
