//! HTTP routes for saving and listing drawings.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use shapeboard_core::{DrawingData, DrawingGateway, GatewayError, RecordId, SavedDrawingRecord};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

/// Shared application state
pub struct AppState {
    pub gateway: Arc<dyn DrawingGateway>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn DrawingGateway>) -> Self {
        Self { gateway }
    }
}

/// Body of `POST /api/drawings`
#[derive(Debug, Deserialize)]
pub struct SaveDrawingRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub data: Option<DrawingData>,
}

/// Response of `POST /api/drawings`
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveDrawingResponse {
    pub id: RecordId,
}

/// Gateway error rendered as `{ "error": ... }` with a matching status.
#[derive(Debug)]
pub struct ApiError(GatewayError);

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            GatewayError::Validation(_) | GatewayError::Format(_) => StatusCode::BAD_REQUEST,
            GatewayError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        } else {
            warn!("Rejected request: {}", self.0);
        }
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

/// Build the router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/drawings", post(save_drawing))
        .route("/api/drawings/{username}", get(list_drawings))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check
async fn health() -> &'static str {
    "ok"
}

/// Store a drawing for a user
async fn save_drawing(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SaveDrawingRequest>, JsonRejection>,
) -> Result<Json<SaveDrawingResponse>, ApiError> {
    let Json(request) = body.map_err(|rejection| GatewayError::Format(rejection.body_text()))?;
    let (Some(username), Some(data)) = (request.username, request.data) else {
        return Err(GatewayError::Validation("username and data required".to_string()).into());
    };
    let id = state.gateway.save(&username, &data).await?;
    info!("Saved drawing {} for {}", id, username);
    Ok(Json(SaveDrawingResponse { id }))
}

/// List a user's drawings, newest first
async fn list_drawings(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<Vec<SavedDrawingRecord>>, ApiError> {
    let records = state.gateway.list_by_owner(&username).await?;
    info!("Listed {} drawings for {}", records.len(), username);
    Ok(Json(records))
}
