//! Canvas surface geometry: converting device positions to canvas coordinates.

use kurbo::{Point, Rect, Size, Vec2};

/// Something that knows where the drawing surface currently sits on screen.
///
/// The rectangle is queried again for every event, since the canvas may
/// have scrolled or moved since the previous one.
pub trait CanvasSurface {
    /// Current screen rectangle of the drawing surface.
    fn screen_rect(&self) -> Rect;

    /// Convert a device (page) position into canvas-local coordinates.
    fn to_canvas(&self, device: Point) -> Point {
        device - self.screen_rect().origin().to_vec2()
    }
}

impl CanvasSurface for Rect {
    fn screen_rect(&self) -> Rect {
        *self
    }
}

/// A surface at a fixed page offset, useful for headless hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSurface {
    /// Page offset of the surface's top-left corner.
    pub offset: Vec2,
    pub size: Size,
}

impl FixedSurface {
    pub fn new(offset: Vec2, size: Size) -> Self {
        Self { offset, size }
    }

    /// Scroll the page, moving the surface by `delta`.
    pub fn scroll_by(&mut self, delta: Vec2) {
        self.offset += delta;
    }
}

impl CanvasSurface for FixedSurface {
    fn screen_rect(&self) -> Rect {
        Rect::from_origin_size(self.offset.to_point(), self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_at_origin() {
        let surface = Rect::new(0.0, 0.0, 1600.0, 800.0);
        let p = Point::new(100.0, 200.0);
        assert_eq!(surface.to_canvas(p), p);
    }

    #[test]
    fn test_subtracts_offset() {
        let surface = FixedSurface::new(Vec2::new(220.0, 96.0), Size::new(1600.0, 800.0));
        let canvas = surface.to_canvas(Point::new(320.0, 246.0));
        assert!((canvas.x - 100.0).abs() < f64::EPSILON);
        assert!((canvas.y - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scroll_changes_mapping() {
        let mut surface = FixedSurface::new(Vec2::new(10.0, 10.0), Size::new(100.0, 100.0));
        let device = Point::new(50.0, 50.0);
        let before = surface.to_canvas(device);
        surface.scroll_by(Vec2::new(0.0, -30.0));
        let after = surface.to_canvas(device);
        assert!((after.y - before.y - 30.0).abs() < f64::EPSILON);
    }
}
