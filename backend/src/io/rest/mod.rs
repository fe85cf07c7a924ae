//! # REST API Interface Layer
//!
//! HTTP endpoints for the cat care tracker. Handlers are a pure translation
//! layer: they deserialize the request, call one domain service, map the
//! domain result to a shared DTO and translate domain errors into status
//! codes. No business rules live here.
//!
//! ## Error translation
//!
//! | domain error kind | status |
//! |-------------------|--------|
//! | Validation        | 400    |
//! | NotFound          | 404    |
//! | Dependency        | 500    |
//!
//! The response body is the error text.

pub mod advice_apis;
pub mod care_log_apis;
pub mod cat_apis;
pub mod mappers;
pub mod weight_apis;

pub use advice_apis::*;
pub use care_log_apis::*;
pub use cat_apis::*;
pub use weight_apis::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::domain::errors::{CareError, ErrorKind};

pub fn status_for(error: &CareError) -> StatusCode {
    match error.kind() {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Dependency => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Log a failed operation and turn it into an HTTP response
pub fn error_response(action: &str, error: CareError) -> Response {
    let status = status_for(&error);
    if status.is_server_error() {
        error!("Failed to {}: {}", action, error);
    } else {
        warn!("Failed to {}: {}", action, error);
    }
    (status, error.to_string()).into_response()
}

/// Liveness check
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
