//! # REST API for the AI Assistant

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use tracing::info;

use super::error_response;
use crate::domain::models::care_log::format_timestamp;
use crate::AppState;
use shared::{AdviceRequest, AiAdvice, IdentifyImageRequest};

/// Ask the assistant a question about one cat
pub async fn ask_advice(
    State(state): State<AppState>,
    Path(cat_id): Path<String>,
    Json(request): Json<AdviceRequest>,
) -> impl IntoResponse {
    info!("POST /api/cats/{}/advice - request: {:?}", cat_id, request);

    match state
        .advice_service
        .ask_about_cat(&cat_id, &request.question)
        .await
    {
        Ok(advice) => {
            let response = AiAdvice {
                text: advice.text,
                timestamp: format_timestamp(&advice.timestamp),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("get advice", e),
    }
}

/// Analyze a photo, e.g. to identify the breed or a visible problem
pub async fn identify_image(
    State(state): State<AppState>,
    Json(request): Json<IdentifyImageRequest>,
) -> impl IntoResponse {
    // The image payload is too large to log
    info!(
        "POST /api/vision/identify - prompt: {:?}, mime_type: {:?}",
        request.prompt, request.mime_type
    );

    match state
        .advice_service
        .identify_breed_or_issue(
            &request.image_base64,
            request.mime_type.as_deref(),
            &request.prompt,
        )
        .await
    {
        Ok(text) => {
            let response = AiAdvice {
                text,
                timestamp: format_timestamp(&Utc::now()),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("analyze image", e),
    }
}
