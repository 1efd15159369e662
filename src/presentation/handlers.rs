// HTTP request handlers
use crate::application::page_service::SlotState;
use crate::domain::page::{ControlId, ControlValues};
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiResult;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct UpdateRequest {
    pub changed: ControlId,
    #[serde(default)]
    pub inputs: ControlValues,
}

#[derive(Serialize)]
pub struct UpdateResponse {
    pub updates: Vec<SlotState>,
}

#[derive(Deserialize)]
pub struct StreamQuery {
    pub pathname: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Render the page for any path; unknown paths get the home page
pub async fn render_page(
    uri: Uri,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Response> {
    let view = state.page_service.render(uri.path())?;
    Ok(json_response(&view, accepts_brotli(&headers)).await?)
}

/// Recompute the chart slots bound to the control that changed.
/// Answers 204 when none of them can be drawn yet so the client keeps its
/// current figures.
pub async fn update_component(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UpdateRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(request) = payload?;
    let updates = state
        .view_engine
        .on_control_change(request.changed, &request.inputs)?;

    if !updates.iter().any(|(_, update)| update.is_computed()) {
        tracing::debug!(changed = request.changed.name(), "Nothing to redraw");
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let response = UpdateResponse {
        updates: updates
            .into_iter()
            .map(|(slot, update)| SlotState::new(slot, update))
            .collect(),
    };
    Ok(json_response(&response, accepts_brotli(&headers)).await?)
}

/// Stream a page progressively (skeleton, slot figures, completion)
pub async fn stream_page(
    Query(query): Query<StreamQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let pathname = query.pathname.unwrap_or_else(|| "/".to_string());
    let rx = state.page_service.stream(&pathname);
    stream_from_receiver(rx, accepts_brotli(&headers))
}
