//! Canvas interaction: turns pointer events into shape placement, selection,
//! removal and moves.
//!
//! The controller owns an [`InteractionSession`] holding everything transient
//! about the user's interaction (selection, palette drag, move gesture). The
//! session lives as long as the editor and is reset whenever the document is
//! replaced wholesale.

use crate::config::CanvasConfig;
use crate::document::DrawingDocument;
use crate::input::PointerEvent;
use crate::palette::PaletteDragSource;
use crate::selection::Selection;
use crate::shapes::{ShapeId, ShapeKind};
use crate::surface::CanvasSurface;
use kurbo::{Point, Vec2};

/// State of a direct-manipulation move.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MoveGesture {
    #[default]
    Idle,
    /// The selected shape follows the pointer.
    Moving {
        id: ShapeId,
        /// Pointer minus centroid at gesture start.
        grab_offset: Vec2,
    },
}

/// Transient interaction state for one editor.
#[derive(Debug, Clone, Default)]
pub struct InteractionSession {
    pub selection: Selection,
    pub palette: PaletteDragSource,
    pub gesture: MoveGesture,
}

impl InteractionSession {
    pub fn new() -> Self {
        Self::default()
    }
}

/// What a pointer event did.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionOutcome {
    /// A palette shape was placed on the canvas.
    Placed { id: ShapeId, kind: ShapeKind, position: Point },
    /// A shape became the selection.
    Selected(ShapeId),
    /// A shape was removed.
    Removed { id: ShapeId, was_selected: bool },
    /// A move gesture started on the selected shape.
    MoveStarted(ShapeId),
    /// The shape under a move gesture was moved.
    Moved { id: ShapeId, position: Point },
    /// A move gesture finished.
    MoveEnded(ShapeId),
    /// The event had no effect.
    Ignored,
}

/// Cursor hint for the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    /// A palette drag is over the canvas.
    Crosshair,
    /// A shape is selected and can be grabbed.
    Pointer,
    /// A shape is being moved.
    Grabbing,
}

/// Interprets pointer events on the drawing surface.
#[derive(Debug, Clone, Default)]
pub struct CanvasController {
    session: InteractionSession,
    config: CanvasConfig,
}

impl CanvasController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CanvasConfig) -> Self {
        Self {
            session: InteractionSession::new(),
            config,
        }
    }

    pub fn session(&self) -> &InteractionSession {
        &self.session
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn selected(&self) -> Option<&ShapeId> {
        self.session.selection.selected()
    }

    pub fn palette(&self) -> &PaletteDragSource {
        &self.session.palette
    }

    pub fn gesture(&self) -> &MoveGesture {
        &self.session.gesture
    }

    /// Start dragging a kind from the palette.
    pub fn begin_palette_drag(&mut self, kind: ShapeKind) {
        self.session.palette.begin_drag(kind);
    }

    /// Track the pointer during a palette drag, in page coordinates.
    pub fn palette_drag_to(&mut self, position: Point) -> bool {
        self.session.palette.drag_to(position)
    }

    /// Palette drag released somewhere other than the canvas.
    pub fn end_palette_drag(&mut self) {
        self.session.palette.end_drag();
    }

    /// Select a shape programmatically. The id is not checked against the document.
    pub fn select(&mut self, id: ShapeId) {
        self.session.selection.select(id);
    }

    pub fn clear_selection(&mut self) {
        self.session.selection.clear();
    }

    /// Forget all transient state, e.g. after the document was replaced.
    pub fn reset(&mut self) {
        self.session = InteractionSession::new();
    }

    /// Current cursor hint.
    pub fn cursor(&self) -> Cursor {
        if self.session.palette.is_dragging() {
            Cursor::Crosshair
        } else if matches!(self.session.gesture, MoveGesture::Moving { .. }) {
            Cursor::Grabbing
        } else if self.session.selection.selected().is_some() {
            Cursor::Pointer
        } else {
            Cursor::Default
        }
    }

    /// Size shown by the size control: the selected shape's size, or the default.
    pub fn selected_size(&self, document: &DrawingDocument) -> f64 {
        self.selected()
            .and_then(|id| document.shape(id))
            .map(|s| s.size)
            .unwrap_or(self.config.default_shape_size)
    }

    /// Apply a size-control value to the selected shape.
    ///
    /// The value is clamped to the control's range before resizing. Returns
    /// the new size, or `None` with no live selection.
    pub fn set_selected_size(&mut self, document: &mut DrawingDocument, value: f64) -> Option<f64> {
        let id = self.selected()?.clone();
        document.resize_shape(&id, self.config.clamp_size(value))
    }

    /// Remove a shape, dropping the selection and any move gesture that
    /// refer to it.
    pub fn remove_shape(&mut self, document: &mut DrawingDocument, id: &ShapeId) -> InteractionOutcome {
        if document.remove_shape(id).is_none() {
            return InteractionOutcome::Ignored;
        }
        let was_selected = self.session.selection.shape_removed(id);
        if matches!(&self.session.gesture, MoveGesture::Moving { id: moving, .. } if moving == id) {
            self.session.gesture = MoveGesture::Idle;
        }
        log::debug!("Removed shape {}", id);
        InteractionOutcome::Removed {
            id: id.clone(),
            was_selected,
        }
    }

    /// Handle one pointer event.
    pub fn handle<S>(&mut self, event: PointerEvent, surface: &S, document: &mut DrawingDocument) -> InteractionOutcome
    where
        S: CanvasSurface + ?Sized,
    {
        let point = surface.to_canvas(event.position());
        match event {
            PointerEvent::Drop { .. } => self.drop_at(point, document),
            PointerEvent::Click { .. } => self.click_at(point, document),
            PointerEvent::DoubleClick { .. } => self.double_click_at(point, document),
            PointerEvent::Down { .. } => self.pointer_down(point, document),
            PointerEvent::Move { .. } => self.pointer_move(point, document),
            PointerEvent::Up { .. } => self.pointer_up(),
        }
    }

    fn drop_at(&mut self, point: Point, document: &mut DrawingDocument) -> InteractionOutcome {
        let Some(kind) = self.session.palette.take_payload() else {
            return InteractionOutcome::Ignored;
        };
        let shape = document.add_shape_sized(kind, point.x, point.y, self.config.default_shape_size);
        log::debug!("Placed {} {} at ({}, {})", shape.kind, shape.id, point.x, point.y);
        InteractionOutcome::Placed {
            id: shape.id,
            kind: shape.kind,
            position: shape.position,
        }
    }

    fn click_at(&mut self, point: Point, document: &mut DrawingDocument) -> InteractionOutcome {
        // A click with a palette payload places it, like a drop.
        if self.session.palette.is_dragging() {
            return self.drop_at(point, document);
        }
        match document.shapes().shape_at(point) {
            Some(id) => {
                self.session.selection.select(id.clone());
                InteractionOutcome::Selected(id)
            }
            None => InteractionOutcome::Ignored,
        }
    }

    fn double_click_at(&mut self, point: Point, document: &mut DrawingDocument) -> InteractionOutcome {
        let Some(id) = document.shapes().shape_at(point) else {
            return InteractionOutcome::Ignored;
        };
        self.remove_shape(document, &id)
    }

    fn pointer_down(&mut self, point: Point, document: &DrawingDocument) -> InteractionOutcome {
        let Some(id) = self.selected().cloned() else {
            return InteractionOutcome::Ignored;
        };
        let Some(shape) = document.shape(&id) else {
            return InteractionOutcome::Ignored;
        };
        if !shape.hit_test(point) {
            return InteractionOutcome::Ignored;
        }
        self.session.gesture = MoveGesture::Moving {
            id: id.clone(),
            grab_offset: point - shape.position,
        };
        InteractionOutcome::MoveStarted(id)
    }

    fn pointer_move(&mut self, point: Point, document: &mut DrawingDocument) -> InteractionOutcome {
        let MoveGesture::Moving { id, grab_offset } = &self.session.gesture else {
            return InteractionOutcome::Ignored;
        };
        let id = id.clone();
        let position = point - *grab_offset;
        if document.move_shape(&id, position.x, position.y) {
            InteractionOutcome::Moved { id, position }
        } else {
            InteractionOutcome::Ignored
        }
    }

    fn pointer_up(&mut self) -> InteractionOutcome {
        match std::mem::take(&mut self.session.gesture) {
            MoveGesture::Moving { id, .. } => InteractionOutcome::MoveEnded(id),
            MoveGesture::Idle => InteractionOutcome::Ignored,
        }
    }
}
