//! File-based gateway and export file helpers for native platforms.

use super::{
    BoxFuture, DrawingGateway, GatewayError, GatewayResult, RecordId, SavedDrawingRecord,
    export_to_bytes, import_from_bytes, sort_newest_first, validate_owner,
};
use crate::document::{DrawingData, DrawingDocument};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const STORE_FILE: &str = "drawings.json";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreFile {
    last_id: RecordId,
    drawings: Vec<StoredDrawing>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredDrawing {
    owner: String,
    #[serde(flatten)]
    record: SavedDrawingRecord,
}

/// File-based gateway for native platforms.
///
/// Keeps every owner's drawings in a single JSON file inside the base
/// directory. Writes go through a temporary file and a rename.
pub struct FileGateway {
    /// Base directory for the store.
    base_path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileGateway {
    /// Create a file gateway with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> GatewayResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                GatewayError::Storage(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self {
            base_path,
            write_lock: Mutex::new(()),
        })
    }

    /// Create a file gateway in the default location.
    ///
    /// On Unix: `~/.local/share/shapeboard/drawings/`
    /// On Windows: `%LOCALAPPDATA%\shapeboard\drawings\`
    pub fn default_location() -> GatewayResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| GatewayError::Storage("Could not determine home directory".to_string()))?;

        Self::new(base.join("shapeboard").join("drawings"))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn store_path(&self) -> PathBuf {
        self.base_path.join(STORE_FILE)
    }

    fn read_store(&self) -> GatewayResult<StoreFile> {
        let path = self.store_path();
        if !path.exists() {
            return Ok(StoreFile::default());
        }
        let json = fs::read(&path).map_err(|e| {
            GatewayError::Storage(format!("Failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_slice(&json).map_err(|e| {
            GatewayError::Storage(format!("Corrupt store {}: {}", path.display(), e))
        })
    }

    fn write_store(&self, store: &StoreFile) -> GatewayResult<()> {
        let path = self.store_path();
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_vec_pretty(store)
            .map_err(|e| GatewayError::Storage(format!("Failed to serialize store: {}", e)))?;
        fs::write(&tmp, json).map_err(|e| {
            GatewayError::Storage(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &path).map_err(|e| {
            GatewayError::Storage(format!("Failed to replace {}: {}", path.display(), e))
        })
    }

    fn insert(&self, owner: &str, data: &DrawingData) -> GatewayResult<RecordId> {
        validate_owner(owner)?;
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| GatewayError::Storage(format!("Lock error: {}", e)))?;

        let mut store = self.read_store()?;
        store.last_id += 1;
        let id = store.last_id;
        store.drawings.push(StoredDrawing {
            owner: owner.to_string(),
            record: SavedDrawingRecord {
                id,
                data: data.clone(),
                timestamp: Utc::now(),
            },
        });
        self.write_store(&store)?;
        log::debug!("Saved drawing {} for {}", id, owner);
        Ok(id)
    }

    fn records_for(&self, owner: &str) -> GatewayResult<Vec<SavedDrawingRecord>> {
        validate_owner(owner)?;
        let store = self.read_store()?;
        let mut records: Vec<_> = store
            .drawings
            .into_iter()
            .filter(|d| d.owner == owner)
            .map(|d| d.record)
            .collect();
        sort_newest_first(&mut records);
        Ok(records)
    }
}

impl DrawingGateway for FileGateway {
    fn save(&self, owner: &str, data: &DrawingData) -> BoxFuture<'_, GatewayResult<RecordId>> {
        let result = self.insert(owner, data);
        Box::pin(async move { result })
    }

    fn list_by_owner(&self, owner: &str) -> BoxFuture<'_, GatewayResult<Vec<SavedDrawingRecord>>> {
        let result = self.records_for(owner);
        Box::pin(async move { result })
    }
}

/// Write a document to an export file.
pub fn export_to_path(document: &DrawingDocument, path: &Path) -> GatewayResult<()> {
    let bytes = export_to_bytes(document)?;
    fs::write(path, bytes).map_err(|e| {
        GatewayError::Storage(format!("Failed to write {}: {}", path.display(), e))
    })
}

/// Read a document from an export file.
pub fn import_from_path(path: &Path) -> GatewayResult<DrawingDocument> {
    let bytes = fs::read(path).map_err(|e| {
        GatewayError::Storage(format!("Failed to read {}: {}", path.display(), e))
    })?;
    import_from_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeKind;
    use crate::storage::test_util::block_on;
    use tempfile::tempdir;

    fn drawing(name: &str) -> DrawingData {
        let mut doc = DrawingDocument::new();
        doc.rename(name);
        doc.add_shape(ShapeKind::Square, 1.0, 2.0);
        doc.snapshot()
    }

    #[test]
    fn test_file_gateway_save_list() {
        let dir = tempdir().unwrap();
        let gateway = FileGateway::new(dir.path().to_path_buf()).unwrap();
        let data = drawing("Test Drawing");

        let id = block_on(gateway.save("alice", &data)).unwrap();
        let records = block_on(gateway.list_by_owner("alice")).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert_eq!(records[0].data, data);
    }

    #[test]
    fn test_file_gateway_persists_across_instances() {
        let dir = tempdir().unwrap();
        let first = {
            let gateway = FileGateway::new(dir.path().to_path_buf()).unwrap();
            block_on(gateway.save("alice", &drawing("a"))).unwrap()
        };

        let gateway = FileGateway::new(dir.path().to_path_buf()).unwrap();
        let second = block_on(gateway.save("alice", &drawing("b"))).unwrap();
        assert!(second > first);

        let ids: Vec<_> = block_on(gateway.list_by_owner("alice"))
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[test]
    fn test_file_gateway_separates_owners() {
        let dir = tempdir().unwrap();
        let gateway = FileGateway::new(dir.path().to_path_buf()).unwrap();
        block_on(gateway.save("alice", &drawing("a"))).unwrap();

        assert!(block_on(gateway.list_by_owner("bob")).unwrap().is_empty());
    }

    #[test]
    fn test_file_gateway_rejects_empty_owner() {
        let dir = tempdir().unwrap();
        let gateway = FileGateway::new(dir.path().to_path_buf()).unwrap();

        let result = block_on(gateway.save("", &drawing("a")));
        assert!(matches!(result, Err(GatewayError::Validation(_))));
        assert!(!dir.path().join(STORE_FILE).exists());
    }

    #[test]
    fn test_file_gateway_corrupt_store() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(STORE_FILE), "{broken").unwrap();
        let gateway = FileGateway::new(dir.path().to_path_buf()).unwrap();

        let result = block_on(gateway.list_by_owner("alice"));
        assert!(matches!(result, Err(GatewayError::Storage(_))));
    }

    #[test]
    fn test_export_import_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("drawing.json");
        let doc = DrawingDocument::from_data(drawing("Exported"));

        export_to_path(&doc, &path).unwrap();
        let loaded = import_from_path(&path).unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_import_missing_file() {
        let dir = tempdir().unwrap();
        let result = import_from_path(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(GatewayError::Storage(_))));
    }
}
