//! Shapeboard Core Library
//!
//! Shape model, palette drag-and-drop, canvas interaction and persistence
//! contracts for the Shapeboard drawing editor.

pub mod config;
pub mod controller;
pub mod document;
pub mod editor;
pub mod input;
pub mod palette;
pub mod selection;
pub mod shapes;
pub mod storage;
pub mod surface;

pub use config::CanvasConfig;
pub use controller::{CanvasController, Cursor, InteractionOutcome, InteractionSession, MoveGesture};
pub use document::{DrawingData, DrawingDocument, UNTITLED_DRAWING};
pub use editor::{Editor, EditorError, LoadJob, PendingOperation, SaveJob};
pub use input::{ClickTracker, PointerEvent};
pub use palette::{DragPreview, DragState, PaletteDragSource};
pub use selection::Selection;
pub use shapes::{KindCounts, Shape, ShapeId, ShapeKind, ShapeList};
pub use storage::{
    DrawingGateway, FileGateway, GatewayError, GatewayResult, MemoryGateway, RecordId,
    SavedDrawingRecord, export_to_bytes, import_from_bytes,
};
pub use surface::{CanvasSurface, FixedSurface};
