//! Pointer events delivered to the canvas.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// A pointer event on the drawing surface.
///
/// Positions are in device (page) coordinates; the controller maps them onto
/// the canvas using the surface's current screen rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    Click { position: Point },
    DoubleClick { position: Point },
    /// A palette drag was released over the canvas.
    Drop { position: Point },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position }
            | PointerEvent::Click { position }
            | PointerEvent::DoubleClick { position }
            | PointerEvent::Drop { position } => position,
        }
    }
}

/// Double-click detection constants.
const DOUBLE_CLICK_TIME: Duration = Duration::from_millis(500);
const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Turns raw clicks into `Click` / `DoubleClick` events.
///
/// For hosts whose windowing layer reports only button presses.
#[derive(Debug, Clone, Default)]
pub struct ClickTracker {
    last_click: Option<(Instant, Point)>,
}

impl ClickTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a click made at `at`.
    pub fn click(&mut self, position: Point, at: Instant) -> PointerEvent {
        if let Some((last_time, last_pos)) = self.last_click {
            let elapsed = at.saturating_duration_since(last_time);
            if elapsed < DOUBLE_CLICK_TIME && last_pos.distance(position) < DOUBLE_CLICK_DISTANCE {
                // Reset so a third click starts a new pair.
                self.last_click = None;
                return PointerEvent::DoubleClick { position };
            }
        }
        self.last_click = Some((at, position));
        PointerEvent::Click { position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_click_detection() {
        let mut tracker = ClickTracker::new();
        let t0 = Instant::now();
        let p = Point::new(100.0, 100.0);

        assert!(matches!(tracker.click(p, t0), PointerEvent::Click { .. }));
        assert!(matches!(
            tracker.click(Point::new(102.0, 101.0), t0 + Duration::from_millis(200)),
            PointerEvent::DoubleClick { .. }
        ));
        // Third click starts over.
        assert!(matches!(
            tracker.click(p, t0 + Duration::from_millis(300)),
            PointerEvent::Click { .. }
        ));
    }

    #[test]
    fn test_double_click_too_far() {
        let mut tracker = ClickTracker::new();
        let t0 = Instant::now();
        tracker.click(Point::new(100.0, 100.0), t0);
        assert!(matches!(
            tracker.click(Point::new(150.0, 100.0), t0 + Duration::from_millis(100)),
            PointerEvent::Click { .. }
        ));
    }

    #[test]
    fn test_double_click_too_slow() {
        let mut tracker = ClickTracker::new();
        let t0 = Instant::now();
        let p = Point::new(10.0, 10.0);
        tracker.click(p, t0);
        assert!(matches!(
            tracker.click(p, t0 + Duration::from_millis(800)),
            PointerEvent::Click { .. }
        ));
    }

    #[test]
    fn test_event_json_shape() {
        let event = PointerEvent::Drop {
            position: Point::new(1.0, 2.0),
        };
        let value = serde_json::to_value(event).unwrap();
        assert_eq!(value["type"], "drop");
        assert_eq!(event.position(), Point::new(1.0, 2.0));
    }
}
