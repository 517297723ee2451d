//! Editor session: the current document, its interaction controller, and
//! the save/load lifecycle against a [`DrawingGateway`].

use crate::config::CanvasConfig;
use crate::controller::{CanvasController, InteractionOutcome};
use crate::document::{DrawingData, DrawingDocument};
use crate::input::PointerEvent;
use crate::shapes::{Shape, ShapeId, ShapeKind};
use crate::storage::{
    DrawingGateway, GatewayError, GatewayResult, RecordId, SavedDrawingRecord, export_to_bytes,
    import_from_bytes, validate_owner,
};
use crate::surface::CanvasSurface;
use thiserror::Error;

/// A persistence operation that suspends the editor's save/load controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingOperation {
    Save,
    Load,
}

/// Editor-level errors.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Another save or load has not finished yet.
    #[error("A {0:?} is already in progress")]
    Busy(PendingOperation),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// A save that has been started but not yet run against a gateway.
///
/// Holds its own snapshot, so the editor stays usable while it runs.
#[derive(Debug, Clone)]
pub struct SaveJob {
    pub owner: String,
    pub data: DrawingData,
}

impl SaveJob {
    pub async fn run<G: DrawingGateway + ?Sized>(&self, gateway: &G) -> GatewayResult<RecordId> {
        gateway.save(&self.owner, &self.data).await
    }
}

/// A load that has been started but not yet run against a gateway.
#[derive(Debug, Clone)]
pub struct LoadJob {
    pub owner: String,
}

impl LoadJob {
    pub async fn run<G: DrawingGateway + ?Sized>(
        &self,
        gateway: &G,
    ) -> GatewayResult<Vec<SavedDrawingRecord>> {
        gateway.list_by_owner(&self.owner).await
    }
}

/// One open editor.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    document: DrawingDocument,
    controller: CanvasController,
    pending: Option<PendingOperation>,
}

impl Editor {
    /// Create an editor with an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CanvasConfig) -> Self {
        Self {
            document: DrawingDocument::new(),
            controller: CanvasController::with_config(config),
            pending: None,
        }
    }

    pub fn document(&self) -> &DrawingDocument {
        &self.document
    }

    pub fn controller(&self) -> &CanvasController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut CanvasController {
        &mut self.controller
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.document.rename(name);
    }

    /// Add a default-sized shape centred at (x, y).
    pub fn add_shape(&mut self, kind: ShapeKind, x: f64, y: f64) -> Shape {
        self.document.add_shape(kind, x, y)
    }

    pub fn move_shape(&mut self, id: &ShapeId, x: f64, y: f64) -> bool {
        self.document.move_shape(id, x, y)
    }

    /// Remove a shape, clearing the selection if it was the selected one.
    pub fn remove_shape(&mut self, id: &ShapeId) -> InteractionOutcome {
        self.controller.remove_shape(&mut self.document, id)
    }

    /// Replace the whole document and start a fresh interaction session.
    pub fn replace(&mut self, name: impl Into<String>, shapes: Vec<Shape>) {
        self.document.replace(name, shapes);
        self.controller.reset();
    }

    /// Route a pointer event through the controller.
    pub fn handle_pointer<S>(&mut self, event: PointerEvent, surface: &S) -> InteractionOutcome
    where
        S: CanvasSurface + ?Sized,
    {
        self.controller.handle(event, surface, &mut self.document)
    }

    /// Apply a size-control value to the selected shape.
    pub fn set_selected_size(&mut self, value: f64) -> Option<f64> {
        self.controller.set_selected_size(&mut self.document, value)
    }

    pub fn selected_size(&self) -> f64 {
        self.controller.selected_size(&self.document)
    }

    /// Whether a save or load is in flight.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<PendingOperation> {
        self.pending
    }

    fn begin(&mut self, op: PendingOperation) -> Result<(), EditorError> {
        if let Some(current) = self.pending {
            return Err(EditorError::Busy(current));
        }
        self.pending = Some(op);
        Ok(())
    }

    /// Clear `op` if it is the pending operation.
    fn finish(&mut self, op: PendingOperation) {
        match self.pending {
            Some(current) if current == op => self.pending = None,
            other => log::warn!("Finished {:?} while {:?} is pending, ignoring", op, other),
        }
    }

    /// Start a save for `owner`, snapshotting the document.
    pub fn begin_save(&mut self, owner: &str) -> Result<SaveJob, EditorError> {
        validate_owner(owner)?;
        self.begin(PendingOperation::Save)?;
        Ok(SaveJob {
            owner: owner.to_string(),
            data: self.document.snapshot(),
        })
    }

    /// Finish the pending save with the gateway's result.
    pub fn finish_save(&mut self, result: GatewayResult<RecordId>) -> Result<RecordId, EditorError> {
        self.finish(PendingOperation::Save);
        match result {
            Ok(id) => {
                log::info!("Saved drawing as record {}", id);
                Ok(id)
            }
            Err(e) => {
                log::warn!("Save failed: {}", e);
                Err(e.into())
            }
        }
    }

    /// Start listing saved drawings for `owner`.
    pub fn begin_load(&mut self, owner: &str) -> Result<LoadJob, EditorError> {
        validate_owner(owner)?;
        self.begin(PendingOperation::Load)?;
        Ok(LoadJob {
            owner: owner.to_string(),
        })
    }

    /// Finish the pending load. The document is not touched; pick a record
    /// and pass it to [`Editor::adopt`].
    pub fn finish_load(
        &mut self,
        result: GatewayResult<Vec<SavedDrawingRecord>>,
    ) -> Result<Vec<SavedDrawingRecord>, EditorError> {
        self.finish(PendingOperation::Load);
        result.map_err(|e| {
            log::warn!("Load failed: {}", e);
            e.into()
        })
    }

    /// Save the current document through `gateway`.
    pub async fn save<G: DrawingGateway + ?Sized>(
        &mut self,
        gateway: &G,
        owner: &str,
    ) -> Result<RecordId, EditorError> {
        let job = self.begin_save(owner)?;
        let result = job.run(gateway).await;
        self.finish_save(result)
    }

    /// List saved drawings for `owner` through `gateway`.
    pub async fn load<G: DrawingGateway + ?Sized>(
        &mut self,
        gateway: &G,
        owner: &str,
    ) -> Result<Vec<SavedDrawingRecord>, EditorError> {
        let job = self.begin_load(owner)?;
        let result = job.run(gateway).await;
        self.finish_load(result)
    }

    /// Make a saved record the active document.
    ///
    /// An empty stored name is shown as "Untitled Drawing" and adopted as such.
    pub fn adopt(&mut self, record: &SavedDrawingRecord) {
        self.replace(record.display_name(), record.data.shapes.clone());
    }

    /// Serialize the current document for download.
    pub fn export(&self) -> Result<Vec<u8>, EditorError> {
        Ok(export_to_bytes(&self.document)?)
    }

    /// Replace the current document with an imported file.
    /// On failure the current document is left unchanged.
    pub fn import(&mut self, bytes: &[u8]) -> Result<(), EditorError> {
        let imported = import_from_bytes(bytes)?;
        self.document = imported;
        self.controller.reset();
        Ok(())
    }
}
