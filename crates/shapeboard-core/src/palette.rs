//! Palette drag source: tracks a shape kind being dragged towards the canvas.

use crate::shapes::{DEFAULT_SHAPE_SIZE, PaletteStyle, ShapeKind};
use kurbo::{Point, Rect};

/// State of a palette drag.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    /// Nothing is being dragged.
    #[default]
    Idle,
    /// A palette entry is being dragged.
    Dragging {
        /// Kind that will be placed on drop.
        kind: ShapeKind,
        /// Last pointer position in page coordinates, once a move has been seen.
        pointer: Option<Point>,
    },
}

/// Floating preview drawn under the pointer while dragging.
#[derive(Debug, Clone)]
pub struct DragPreview {
    pub kind: ShapeKind,
    /// Page-space rectangle centred on the pointer.
    pub rect: Rect,
    pub style: Option<PaletteStyle>,
}

/// Palette side of the drag-and-drop protocol.
///
/// Only one drag exists at a time; a new drag replaces the current one.
#[derive(Debug, Clone, Default)]
pub struct PaletteDragSource {
    state: DragState,
}

impl PaletteDragSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Kind currently being dragged.
    pub fn payload(&self) -> Option<&ShapeKind> {
        match &self.state {
            DragState::Dragging { kind, .. } => Some(kind),
            DragState::Idle => None,
        }
    }

    /// Start dragging a palette entry.
    pub fn begin_drag(&mut self, kind: ShapeKind) {
        if let DragState::Dragging { kind: previous, .. } = &self.state {
            log::debug!("Palette drag of {} replaced by {}", previous, kind);
        }
        self.state = DragState::Dragging { kind, pointer: None };
    }

    /// Track the pointer during a drag. Ignored when idle.
    pub fn drag_to(&mut self, position: Point) -> bool {
        match &mut self.state {
            DragState::Dragging { pointer, .. } => {
                *pointer = Some(position);
                true
            }
            DragState::Idle => false,
        }
    }

    /// End the drag without placing anything.
    pub fn end_drag(&mut self) {
        self.state = DragState::Idle;
    }

    /// Consume the payload for a drop, returning to idle.
    pub fn take_payload(&mut self) -> Option<ShapeKind> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { kind, .. } => Some(kind),
            DragState::Idle => None,
        }
    }

    /// Preview under the pointer, once the pointer position is known.
    pub fn preview(&self) -> Option<DragPreview> {
        let DragState::Dragging {
            kind,
            pointer: Some(pointer),
        } = &self.state
        else {
            return None;
        };
        Some(DragPreview {
            kind: kind.clone(),
            rect: Rect::from_center_size(*pointer, (DEFAULT_SHAPE_SIZE, DEFAULT_SHAPE_SIZE)),
            style: kind.palette_style(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_lifecycle() {
        let mut palette = PaletteDragSource::new();
        assert!(!palette.is_dragging());

        palette.begin_drag(ShapeKind::Circle);
        assert_eq!(palette.payload(), Some(&ShapeKind::Circle));
        assert!(palette.preview().is_none());

        assert!(palette.drag_to(Point::new(300.0, 40.0)));
        let preview = palette.preview().unwrap();
        assert_eq!(preview.kind, ShapeKind::Circle);
        assert_eq!(preview.rect, Rect::new(275.0, 15.0, 325.0, 65.0));
        assert!(preview.style.is_some());

        palette.end_drag();
        assert_eq!(palette.state(), &DragState::Idle);
        assert!(palette.preview().is_none());
    }

    #[test]
    fn test_move_while_idle_is_ignored() {
        let mut palette = PaletteDragSource::new();
        assert!(!palette.drag_to(Point::new(1.0, 1.0)));
        assert_eq!(palette.state(), &DragState::Idle);
    }

    #[test]
    fn test_new_drag_replaces_active_one() {
        let mut palette = PaletteDragSource::new();
        palette.begin_drag(ShapeKind::Square);
        palette.drag_to(Point::new(5.0, 5.0));
        palette.begin_drag(ShapeKind::Triangle);

        assert_eq!(
            palette.state(),
            &DragState::Dragging {
                kind: ShapeKind::Triangle,
                pointer: None
            }
        );
    }

    #[test]
    fn test_take_payload_resets() {
        let mut palette = PaletteDragSource::new();
        palette.begin_drag(ShapeKind::Square);

        assert_eq!(palette.take_payload(), Some(ShapeKind::Square));
        assert!(!palette.is_dragging());
        assert_eq!(palette.take_payload(), None);
    }
}
