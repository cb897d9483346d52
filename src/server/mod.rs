//! HTTP service exposing search-and-fetch.
//!
//! - `GET /health` - fixed liveness payload
//! - `POST /search` - typed [`SearchRequest`]
//! - `POST /run` - agent-service style [`RunRequest`]

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::app::{AppContext, GleanerError, Result};
use crate::domain::{RunRequest, SearchAndFetchResult, SearchRequest};

pub const SERVICE_NAME: &str = "web-search-fetch-agent";

#[derive(Clone)]
struct ServerState {
    ctx: Arc<AppContext>,
}

pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/search", post(search))
        .route("/run", post(run))
        .with_state(ServerState { ctx })
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(ctx: Arc<AppContext>, addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!("Listening on http://{}", local_addr);
    axum::serve(listener, router(ctx)).await?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
    })
}

async fn search(
    State(state): State<ServerState>,
    request: std::result::Result<Json<SearchRequest>, JsonRejection>,
) -> std::result::Result<Json<SearchAndFetchResult>, ApiError> {
    let Json(request) = request?;
    let budget = request.budget()?;
    let result = state.ctx.search_and_fetch(&request.query, &budget).await?;
    Ok(Json(result))
}

async fn run(
    State(state): State<ServerState>,
    request: std::result::Result<Json<RunRequest>, JsonRejection>,
) -> std::result::Result<Json<SearchAndFetchResult>, ApiError> {
    let Json(request) = request?;
    let query = request
        .resolve_query()
        .ok_or_else(|| GleanerError::InvalidInput("No query provided".into()))?;
    let budget = request.budget()?;
    let result = state.ctx.search_and_fetch(query, &budget).await?;
    Ok(Json(result))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

/// Maps caller mistakes to 400 and everything else to 500.
struct ApiError(GleanerError);

impl From<GleanerError> for ApiError {
    fn from(e: GleanerError) -> Self {
        Self(e)
    }
}

// Malformed bodies and mistyped budgets are caller errors too.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(GleanerError::InvalidInput(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self.0 {
            GleanerError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            other => {
                tracing::error!("Request failed: {}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}
