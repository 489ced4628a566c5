//! API handlers for the server.

use crate::database::Database;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use cgol_core::{EngineConfig, GameOutcome, GameRequest};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub engine: Arc<EngineConfig>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/cgol/game", post(run_game))
        .route("/api/stats", get(get_stats))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
pub struct StatsResponse {
    cached_outcomes: usize,
}

/// Get server statistics
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let cached_outcomes = state.db.count_outcomes().await?;
    Ok(Json(StatsResponse { cached_outcomes }))
}

/// Run a simulation seeded from a word, serving cached outcomes when present
pub async fn run_game(
    State(state): State<AppState>,
    payload: Result<Json<GameRequest>, JsonRejection>,
) -> Result<Json<GameOutcome>, ApiError> {
    let Json(req) = payload?;
    req.validate()?;

    match state.db.get_outcome(&req.word).await {
        Ok(Some(outcome)) => {
            debug!("Cache hit for word {:?}", req.word);
            return Ok(Json(outcome));
        }
        Ok(None) => {}
        Err(e) => warn!("Cache lookup failed for word {:?}: {}", req.word, e),
    }

    let word = req.word.clone();
    let engine = state.engine.clone();
    let outcome = tokio::task::spawn_blocking(move || cgol_engine::run_word(&word, &engine))
        .await
        .map_err(|e| ApiError::Internal(format!("Simulation task failed: {}", e)))??;

    info!(
        word = %req.word,
        num_generations = outcome.num_generations,
        score = outcome.score,
        stop_reason = %outcome.stop_reason,
        "Simulation finished"
    );

    if let Err(e) = state.db.store_outcome(&req.word, &outcome).await {
        warn!("Failed to cache outcome for word {:?}: {}", req.word, e);
    }

    Ok(Json(outcome))
}

// Error handling
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

impl From<cgol_core::Error> for ApiError {
    fn from(err: cgol_core::Error) -> Self {
        if err.is_caller_error() {
            debug!("Rejected request: {}", err);
            ApiError::BadRequest(err.to_string())
        } else {
            error!("Core error: {}", err);
            ApiError::Internal(err.to_string())
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!("Rejected request body: {}", rejection.body_text());
        ApiError::BadRequest(rejection.body_text())
    }
}
