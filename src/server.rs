//! HTTP API over the plan store and pipeline

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::error::{ProviderError, QueueError, StoreError};
use crate::planner::{DailyTask, Plan, PlanRequest, Task, TaskRef, Video};
use crate::provider::VideoSearch;
use crate::runner::Pipeline;
use crate::store::PlanStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PlanStore>,
    /// `None` when generation credentials are missing
    pub pipeline: Option<Arc<Pipeline>>,
    pub search: Arc<dyn VideoSearch>,
    pub search_configured: bool,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    retriable: Option<bool>,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            retriable: None,
        }
    }

    fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    fn upstream(err: ProviderError) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: err.to_string(),
            retriable: Some(err.is_retriable()),
        }
    }

    /// Map a store error. `exhausted` is what "no pending task" means to
    /// the calling endpoint.
    fn store(err: StoreError, exhausted: (StatusCode, &str)) -> Self {
        match err {
            StoreError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "User not found"),
            StoreError::Queue(QueueError::NoPendingTask) => Self::new(exhausted.0, exhausted.1),
            StoreError::Queue(e @ QueueError::TaskNotFound { .. }) => {
                Self::new(StatusCode::NOT_FOUND, e.to_string())
            }
            StoreError::Queue(e @ QueueError::AlreadyDone(_)) => {
                Self::new(StatusCode::CONFLICT, e.to_string())
            }
            other => {
                error!("Store failure: {}", other);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = match self.retriable {
            Some(retriable) => {
                serde_json::json!({ "detail": self.message, "retriable": retriable })
            }
            None => serde_json::json!({ "detail": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}

const NOT_PENDING_ON_READ: (StatusCode, &str) = (StatusCode::NOT_FOUND, "All tasks completed");
const NOT_PENDING_ON_MARK: (StatusCode, &str) = (StatusCode::BAD_REQUEST, "No pending task");

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Upper bound the search API accepts per request
const MAX_SEARCH_RESULTS: usize = 50;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    #[serde(default = "default_search_results")]
    pub max_results: usize,
}

fn default_search_results() -> usize {
    5
}

#[derive(Debug, Serialize)]
pub struct PipelineResponse {
    pub user_id: String,
    pub roadmap: Plan,
}

#[derive(Debug, Serialize)]
pub struct MarkedResponse {
    pub status: &'static str,
    pub marked: Task,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub generation_configured: bool,
    pub search_configured: bool,
    pub plan_count: usize,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/full_pipeline", post(full_pipeline))
        .route("/api/user_roadmap/{id}", get(user_roadmap))
        .route("/api/user_daily_task/{id}", get(user_daily_task))
        .route("/api/mark_task_done/{id}", post(mark_task_done))
        .route(
            "/api/mark_task_done/{id}/{month}/{week}/{task}",
            post(mark_task_done_at),
        )
        .route("/api/search_videos", get(search_videos))
        .route("/api/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(state: AppState, bind: &str, port: u16) -> Result<()> {
    let app = build_router(state);
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    info!("navi serve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("navi serve shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Could not listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn full_pipeline(
    State(state): State<AppState>,
    Json(request): Json<PlanRequest>,
) -> Result<Json<PipelineResponse>, ApiError> {
    let pipeline = state
        .pipeline
        .as_ref()
        .ok_or_else(|| ApiError::unavailable("Roadmap generation is not configured"))?;

    let report = pipeline.run(&request).await.map_err(|e| {
        warn!("Pipeline failed: {}", e);
        ApiError::upstream(e)
    })?;

    let user_id = state
        .store
        .insert(report.plan.clone())
        .await
        .map_err(|e| ApiError::store(e, NOT_PENDING_ON_READ))?;

    Ok(Json(PipelineResponse {
        user_id,
        roadmap: report.plan,
    }))
}

async fn user_roadmap(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Plan>, ApiError> {
    let record = state
        .store
        .get(&id)
        .await
        .map_err(|e| ApiError::store(e, NOT_PENDING_ON_READ))?;
    Ok(Json(record.plan))
}

async fn user_daily_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DailyTask>, ApiError> {
    let task = state
        .store
        .peek_next(&id)
        .await
        .map_err(|e| ApiError::store(e, NOT_PENDING_ON_READ))?;
    Ok(Json(task))
}

async fn mark_task_done(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MarkedResponse>, ApiError> {
    let task = state
        .store
        .mark_next_done(&id)
        .await
        .map_err(|e| ApiError::store(e, NOT_PENDING_ON_MARK))?;
    Ok(Json(MarkedResponse {
        status: "ok",
        marked: task,
    }))
}

async fn mark_task_done_at(
    State(state): State<AppState>,
    Path((id, month, week, task)): Path<(String, u32, u32, u32)>,
) -> Result<Json<MarkedResponse>, ApiError> {
    let at = TaskRef { month, week, task };
    let task = state
        .store
        .mark_done_at(&id, at)
        .await
        .map_err(|e| ApiError::store(e, NOT_PENDING_ON_MARK))?;
    Ok(Json(MarkedResponse {
        status: "ok",
        marked: task,
    }))
}

async fn search_videos(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Video>>, ApiError> {
    let query = params.query.trim();
    if query.is_empty() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "query must not be empty"));
    }

    let max_results = params.max_results.clamp(1, MAX_SEARCH_RESULTS);
    let videos = state.search.search(query, max_results).await.map_err(|e| {
        warn!("Video search failed: {}", e);
        ApiError::upstream(e)
    })?;
    Ok(Json(videos))
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        generation_configured: state.pipeline.is_some(),
        search_configured: state.search_configured,
        plan_count: state.store.len().await,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
