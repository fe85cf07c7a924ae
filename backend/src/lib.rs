//! # Cat Care Backend
//!
//! Contains all non-UI logic for the cat care tracker.
//!
//! This crate is the orchestration layer that brings together:
//! - **Domain**: cat profiles, care logs, weight tracking and assistant rules
//! - **Storage**: the file-backed care log store
//! - **Advisor**: the generative AI gateway
//! - **IO**: the REST API exposed to the UI
//!
//! ## Architecture
//!
//! ```text
//! UI (any HTTP client)
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (services, invariants)
//!     ↓
//! Storage Layer (YAML + CSV files)    Advisor (Gemini)
//! ```

pub mod advisor;
pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::advisor::{AdvisoryGateway, GeminiClient};
use crate::config::AppConfig;
use crate::domain::{AdviceService, CareLogService, CatService};
use crate::storage::{CareLogRepository, CatRepository, CareLogStorage, CatStorage, CsvConnection};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub cat_service: CatService,
    pub care_log_service: CareLogService,
    pub advice_service: AdviceService,
}

impl AppState {
    /// Wire every service over one store and one assistant gateway
    pub fn new(connection: CsvConnection, gateway: AdvisoryGateway) -> Self {
        let cats: Arc<dyn CatStorage> = Arc::new(CatRepository::new(connection.clone()));
        let logs: Arc<dyn CareLogStorage> = Arc::new(CareLogRepository::new(connection));

        let cat_service = CatService::new(cats, logs.clone());
        let care_log_service = CareLogService::new(logs, cat_service.clone());
        let advice_service = AdviceService::new(
            Arc::new(gateway),
            cat_service.clone(),
            care_log_service.clone(),
        );

        Self {
            cat_service,
            care_log_service,
            advice_service,
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up care log store in {:?}", config.data_dir);
    let connection = CsvConnection::new(&config.data_dir)?;

    let gateway = match &config.gemini.api_key {
        Some(api_key) => {
            let client = GeminiClient::new(
                api_key.clone(),
                config.gemini.model.clone(),
                config.gemini.endpoint.clone(),
            )?;
            info!("AI assistant enabled with model {}", client.model());
            AdvisoryGateway::new(Arc::new(client))
        }
        None => {
            warn!("No Gemini API key configured, AI assistant disabled");
            AdvisoryGateway::disabled()
        }
    };

    info!("Setting up application state");
    Ok(AppState::new(connection, gateway))
}

/// CORS policy allowing the given frontend origin
pub fn cors_layer(origin: &str) -> Result<CorsLayer> {
    let origin = origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", origin))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors: CorsLayer) -> Router {
    let api_routes = Router::new()
        .route("/cats", get(io::list_cats).post(io::create_cat))
        .route(
            "/cats/:cat_id",
            get(io::get_cat).put(io::update_cat).delete(io::delete_cat),
        )
        .route("/cats/:cat_id/logs", get(io::list_logs).post(io::add_log))
        .route(
            "/cats/:cat_id/weight",
            get(io::get_weight_history).post(io::record_weight),
        )
        .route("/cats/:cat_id/weight/reconcile", post(io::reconcile_weight))
        .route("/cats/:cat_id/dashboard", get(io::get_dashboard))
        .route("/cats/:cat_id/advice", post(io::ask_advice))
        .route("/vision/identify", post(io::identify_image));

    Router::new()
        .route("/health", get(io::health))
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
