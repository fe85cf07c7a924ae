//! # REST API for Cat Management
//!
//! Endpoints for creating, retrieving, updating, and deleting cats.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::error_response;
use super::mappers::cat_mapper::CatMapper;
use crate::AppState;
use shared::{CreateCatRequest, UpdateCatRequest};

/// List all cats
pub async fn list_cats(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/cats");

    match state.cat_service.list_cats().await {
        Ok(cats) => (StatusCode::OK, Json(CatMapper::to_cat_list_dto(cats))).into_response(),
        Err(e) => error_response("list cats", e),
    }
}

/// Create a new cat
pub async fn create_cat(
    State(state): State<AppState>,
    Json(request): Json<CreateCatRequest>,
) -> impl IntoResponse {
    info!("POST /api/cats - request: {:?}", request);

    match state.cat_service.create_cat(request).await {
        Ok(cat) => {
            let message = format!("Cat '{}' created successfully", cat.name);
            (
                StatusCode::CREATED,
                Json(CatMapper::to_cat_response_dto(cat, &message)),
            )
                .into_response()
        }
        Err(e) => error_response("create cat", e),
    }
}

/// Get a cat by ID
pub async fn get_cat(
    State(state): State<AppState>,
    Path(cat_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/cats/{}", cat_id);

    match state.cat_service.get_cat(&cat_id).await {
        Ok(cat) => (StatusCode::OK, Json(CatMapper::to_dto(cat))).into_response(),
        Err(e) => error_response("get cat", e),
    }
}

/// Edit a cat profile
pub async fn update_cat(
    State(state): State<AppState>,
    Path(cat_id): Path<String>,
    Json(request): Json<UpdateCatRequest>,
) -> impl IntoResponse {
    info!("PUT /api/cats/{} - request: {:?}", cat_id, request);

    match state.cat_service.update_cat(&cat_id, request).await {
        Ok(cat) => {
            let message = format!("Cat '{}' updated successfully", cat.name);
            (
                StatusCode::OK,
                Json(CatMapper::to_cat_response_dto(cat, &message)),
            )
                .into_response()
        }
        Err(e) => error_response("update cat", e),
    }
}

/// Delete a cat and its whole care history
pub async fn delete_cat(
    State(state): State<AppState>,
    Path(cat_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/cats/{}", cat_id);

    match state.cat_service.delete_cat(&cat_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("delete cat", e),
    }
}
