//! Persistence boundary: saved drawings keyed by owner, plus file export/import.

mod file;
mod memory;

pub use file::{FileGateway, export_to_path, import_from_path};
pub use memory::MemoryGateway;

use crate::document::{DrawingData, DrawingDocument};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Persistence errors.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The caller supplied incomplete or invalid input.
    #[error("Validation error: {0}")]
    Validation(String),
    /// A payload could not be parsed.
    #[error("Format error: {0}")]
    Format(String),
    /// The underlying store failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for persistence operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Boxed future for gateway operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Identifier assigned to a saved drawing by the store.
pub type RecordId = i64;

/// A drawing as stored for an owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedDrawingRecord {
    pub id: RecordId,
    pub data: DrawingData,
    /// When the record was created (RFC 3339 on the wire).
    pub timestamp: DateTime<Utc>,
}

impl SavedDrawingRecord {
    /// Name to display in a load dialog.
    pub fn display_name(&self) -> &str {
        self.data.display_name()
    }
}

/// Storage backend for saved drawings.
///
/// Implementations serialize their own writes; callers may share one
/// gateway between tasks.
pub trait DrawingGateway: Send + Sync {
    /// Store a new record for `owner` and return its id.
    fn save(&self, owner: &str, data: &DrawingData) -> BoxFuture<'_, GatewayResult<RecordId>>;

    /// All records for `owner`, newest first. Empty when there are none.
    fn list_by_owner(&self, owner: &str) -> BoxFuture<'_, GatewayResult<Vec<SavedDrawingRecord>>>;
}

/// Reject blank owner names.
pub fn validate_owner(owner: &str) -> GatewayResult<()> {
    if owner.trim().is_empty() {
        return Err(GatewayError::Validation("owner is required".to_string()));
    }
    Ok(())
}

/// Order records newest first; later ids win ties on equal timestamps.
pub(crate) fn sort_newest_first(records: &mut [SavedDrawingRecord]) {
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
}

/// Serialize a document as an export file (`{ drawingName, shapes }`, UTF-8 JSON).
pub fn export_to_bytes(document: &DrawingDocument) -> GatewayResult<Vec<u8>> {
    serde_json::to_vec_pretty(&document.snapshot())
        .map_err(|e| GatewayError::Format(format!("Failed to serialize drawing: {}", e)))
}

/// Parse an export file. Missing fields take their defaults.
pub fn import_from_bytes(bytes: &[u8]) -> GatewayResult<DrawingDocument> {
    let data: DrawingData = serde_json::from_slice(bytes)
        .map_err(|e| GatewayError::Format(format!("Invalid drawing file: {}", e)))?;
    Ok(DrawingDocument::from_data(data))
}

#[cfg(test)]
pub(crate) mod test_util {
    /// Simple blocking executor for tests.
    pub fn block_on<F: std::future::Future>(f: F) -> F::Output {
        use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

        fn dummy_raw_waker() -> RawWaker {
            fn no_op(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                dummy_raw_waker()
            }
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
            RawWaker::new(std::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
        let mut cx = Context::from_waker(&waker);
        let mut f = std::pin::pin!(f);

        loop {
            match f.as_mut().poll(&mut cx) {
                Poll::Ready(result) => return result,
                Poll::Pending => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::UNTITLED_DRAWING;
    use crate::shapes::{ShapeId, ShapeKind};

    fn roundtrip(doc: &DrawingDocument) -> DrawingDocument {
        import_from_bytes(&export_to_bytes(doc).unwrap()).unwrap()
    }

    #[test]
    fn test_export_import_empty() {
        let mut doc = DrawingDocument::new();
        doc.rename("Blank");
        assert_eq!(roundtrip(&doc), doc);
    }

    #[test]
    fn test_export_import_many() {
        let mut doc = DrawingDocument::new();
        doc.rename("Many");
        let a = doc.add_shape(ShapeKind::Circle, 100.0, 150.0).id;
        doc.add_shape(ShapeKind::Square, -5.5, 0.25);
        doc.add_shape(ShapeKind::Triangle, 1e6, 3.0);
        doc.resize_shape(&a, 137.5);

        assert_eq!(roundtrip(&doc), doc);
    }

    #[test]
    fn test_export_import_keeps_unknown_kind() {
        let mut doc = DrawingDocument::new();
        doc.add_shape(ShapeKind::from("hexagon"), 1.0, 2.0);
        let back = roundtrip(&doc);
        assert_eq!(back, doc);
        assert_eq!(back.shapes().iter().next().unwrap().kind.as_str(), "hexagon");
    }

    #[test]
    fn test_import_missing_shapes() {
        let doc = import_from_bytes(br#"{"drawingName":"Sketch"}"#).unwrap();
        assert_eq!(doc.name(), "Sketch");
        assert!(doc.is_empty());
    }

    #[test]
    fn test_import_missing_name() {
        let doc = import_from_bytes(br#"{"shapes":[]}"#).unwrap();
        assert_eq!(doc.name(), UNTITLED_DRAWING);
    }

    #[test]
    fn test_import_numeric_and_missing_ids() {
        let bytes = br#"{"drawingName":"Old client","shapes":[
            {"id":1718000000000.5,"type":"circle","x":100,"y":150,"size":50},
            {"type":"square","x":300,"y":200,"size":80}
        ]}"#;
        let doc = import_from_bytes(bytes).unwrap();
        assert_eq!(doc.len(), 2);

        let shapes: Vec<_> = doc.shapes().iter().collect();
        assert!(matches!(shapes[0].id(), ShapeId::Number(_)));
        assert!(matches!(shapes[1].id(), ShapeId::Uuid(_)));

        // The numeric id is written back as it was read.
        let value: serde_json::Value = serde_json::from_slice(&export_to_bytes(&doc).unwrap()).unwrap();
        assert_eq!(value["shapes"][0]["id"], 1718000000000.5);
        assert_eq!(roundtrip(&doc), doc);
    }

    #[test]
    fn test_import_malformed() {
        assert!(matches!(import_from_bytes(b"not json"), Err(GatewayError::Format(_))));
        assert!(matches!(
            import_from_bytes(br#"{"shapes":"nope"}"#),
            Err(GatewayError::Format(_))
        ));
        assert!(matches!(import_from_bytes(b"[1,2]"), Err(GatewayError::Format(_))));
    }

    #[test]
    fn test_validate_owner() {
        assert!(validate_owner("alice").is_ok());
        assert!(matches!(validate_owner(""), Err(GatewayError::Validation(_))));
        assert!(matches!(validate_owner("   "), Err(GatewayError::Validation(_))));
    }

    #[test]
    fn test_record_wire_format() {
        let record = SavedDrawingRecord {
            id: 7,
            data: DrawingDocument::new().snapshot(),
            timestamp: "2024-05-01T12:00:00Z".parse().unwrap(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["data"]["drawingName"], UNTITLED_DRAWING);
        assert_eq!(value["timestamp"], "2024-05-01T12:00:00Z");
    }
}
