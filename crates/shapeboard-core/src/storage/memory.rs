//! In-memory gateway implementation.

use super::{
    BoxFuture, DrawingGateway, GatewayError, GatewayResult, RecordId, SavedDrawingRecord,
    sort_newest_first, validate_owner,
};
use crate::document::DrawingData;
use chrono::Utc;
use std::sync::RwLock;

#[derive(Debug, Default)]
struct MemoryState {
    last_id: RecordId,
    records: Vec<(String, SavedDrawingRecord)>,
}

/// In-memory gateway for testing and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    state: RwLock<MemoryState>,
}

impl MemoryGateway {
    /// Create a new empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&self, owner: &str, data: &DrawingData) -> GatewayResult<RecordId> {
        validate_owner(owner)?;
        let mut state = self
            .state
            .write()
            .map_err(|e| GatewayError::Storage(format!("Lock error: {}", e)))?;
        state.last_id += 1;
        let record = SavedDrawingRecord {
            id: state.last_id,
            data: data.clone(),
            timestamp: Utc::now(),
        };
        state.records.push((owner.to_string(), record));
        Ok(state.last_id)
    }

    fn records_for(&self, owner: &str) -> GatewayResult<Vec<SavedDrawingRecord>> {
        validate_owner(owner)?;
        let state = self
            .state
            .read()
            .map_err(|e| GatewayError::Storage(format!("Lock error: {}", e)))?;
        let mut records: Vec<_> = state
            .records
            .iter()
            .filter(|(o, _)| o == owner)
            .map(|(_, r)| r.clone())
            .collect();
        sort_newest_first(&mut records);
        Ok(records)
    }
}

impl DrawingGateway for MemoryGateway {
    fn save(&self, owner: &str, data: &DrawingData) -> BoxFuture<'_, GatewayResult<RecordId>> {
        let result = self.insert(owner, data);
        Box::pin(async move { result })
    }

    fn list_by_owner(&self, owner: &str) -> BoxFuture<'_, GatewayResult<Vec<SavedDrawingRecord>>> {
        let result = self.records_for(owner);
        Box::pin(async move { result })
    }
}
