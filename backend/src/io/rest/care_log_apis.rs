//! # REST API for Care Logs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::info;

use super::error_response;
use super::mappers::care_log_mapper::CareLogMapper;
use crate::AppState;
use shared::AddCareLogRequest;

// Query parameters for log listing API
#[derive(Debug, Deserialize)]
pub struct CareLogListQuery {
    pub limit: Option<usize>,
}

/// List the most recent logs of a cat, newest first
pub async fn list_logs(
    State(state): State<AppState>,
    Path(cat_id): Path<String>,
    Query(query): Query<CareLogListQuery>,
) -> impl IntoResponse {
    info!("GET /api/cats/{}/logs - query: {:?}", cat_id, query);

    match state
        .care_log_service
        .list_logs_for_cat(&cat_id, query.limit)
        .await
    {
        Ok(logs) => (StatusCode::OK, Json(CareLogMapper::to_log_list_dto(logs))).into_response(),
        Err(e) => error_response("list care logs", e),
    }
}

/// Record a care event
pub async fn add_log(
    State(state): State<AppState>,
    Path(cat_id): Path<String>,
    Json(request): Json<AddCareLogRequest>,
) -> impl IntoResponse {
    info!("POST /api/cats/{}/logs - request: {:?}", cat_id, request);

    match state.care_log_service.add_log(&cat_id, request).await {
        Ok(log) => (StatusCode::CREATED, Json(CareLogMapper::to_dto(log))).into_response(),
        Err(e) => error_response("add care log", e),
    }
}
