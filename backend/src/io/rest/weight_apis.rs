//! # REST API for Weight Tracking
//!
//! Weight history, weight observations, reconciliation and the cat
//! dashboard, which is built around the weight chart.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::error_response;
use super::mappers::care_log_mapper::CareLogMapper;
use super::mappers::cat_mapper::CatMapper;
use crate::AppState;
use shared::{
    CatDashboardResponse, ReconcileWeightResponse, RecordWeightRequest, WeightHistoryResponse,
    WeightObservationResponse,
};

/// Weight series and trend of a cat
pub async fn get_weight_history(
    State(state): State<AppState>,
    Path(cat_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/cats/{}/weight", cat_id);

    match state.care_log_service.weight_history(&cat_id).await {
        Ok(history) => {
            let response = WeightHistoryResponse {
                series: CareLogMapper::to_weight_series_dto(history.series),
                trend: history.trend,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("get weight history", e),
    }
}

/// Record a weight observation and update the cat
pub async fn record_weight(
    State(state): State<AppState>,
    Path(cat_id): Path<String>,
    Json(request): Json<RecordWeightRequest>,
) -> impl IntoResponse {
    info!("POST /api/cats/{}/weight - request: {:?}", cat_id, request);

    match state
        .care_log_service
        .apply_weight_observation(&cat_id, request.weight, request.notes.unwrap_or_default())
        .await
    {
        Ok(observation) => {
            let response = WeightObservationResponse {
                log: CareLogMapper::to_dto(observation.log),
                cat: CatMapper::to_dto(observation.cat),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => error_response("record weight", e),
    }
}

pub async fn reconcile_weight(
    State(state): State<AppState>,
    Path(cat_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/cats/{}/weight/reconcile", cat_id);

    match state.care_log_service.reconcile_weight(&cat_id).await {
        Ok(reconciliation) => {
            let response = ReconcileWeightResponse {
                cat: CatMapper::to_dto(reconciliation.cat),
                corrected: reconciliation.corrected,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("reconcile weight", e),
    }
}

/// Profile, recent logs and weight chart in one call
pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(cat_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/cats/{}/dashboard", cat_id);

    match state.care_log_service.dashboard(&cat_id).await {
        Ok(dashboard) => {
            let response = CatDashboardResponse {
                cat: CatMapper::to_dto(dashboard.cat),
                recent_logs: CareLogMapper::to_log_list_dto(dashboard.recent_logs).logs,
                weight_series: CareLogMapper::to_weight_series_dto(dashboard.weight_series),
                trend: dashboard.trend,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("build dashboard", e),
    }
}
