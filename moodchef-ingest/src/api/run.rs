//! Run trigger and run log endpoints
//!
//! `POST /run` executes the pipeline inline and answers with its summary. Only
//! one run may be in flight per process; a second request gets 409.

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::db::runs::{list_recent_runs, RunRecord};
use crate::error::{ApiError, ApiResult};
use crate::models::RunSummary;
use crate::services::execute_run;
use crate::AppState;

const DEFAULT_RUN_LIMIT: u32 = 20;
const MAX_RUN_LIMIT: u32 = 200;

/// GET /runs query parameters
#[derive(Debug, Deserialize)]
pub struct RunsQuery {
    pub limit: Option<u32>,
}

/// POST /run
///
/// A summary is returned with 200 even when some batches failed; callers
/// inspect `errors`. Fatal precondition failures map to an error body.
pub async fn trigger_run(State(state): State<AppState>) -> ApiResult<Json<RunSummary>> {
    let Ok(_guard) = state.run_lock.try_lock() else {
        return Err(ApiError::Conflict("Ingest run already in progress".to_string()));
    };

    tracing::info!("Ingest run triggered over HTTP");

    match execute_run(&state.db, &state.config).await {
        Ok(summary) => {
            *state.last_run.write().await = Some(summary.status_label().to_string());
            *state.last_error.write().await = None;
            Ok(Json(summary))
        }
        Err(e) => {
            tracing::error!(error = %e, "Ingest run failed");
            *state.last_run.write().await = Some("failed".to_string());
            *state.last_error.write().await = Some(e.to_string());
            Err(e.into())
        }
    }
}

/// GET /runs
pub async fn recent_runs(
    State(state): State<AppState>,
    Query(query): Query<RunsQuery>,
) -> ApiResult<Json<Vec<RunRecord>>> {
    let limit = query.limit.unwrap_or(DEFAULT_RUN_LIMIT);
    if limit == 0 || limit > MAX_RUN_LIMIT {
        return Err(ApiError::BadRequest(format!(
            "limit must be within 1..={}",
            MAX_RUN_LIMIT
        )));
    }

    let runs = list_recent_runs(&state.db, limit).await?;
    Ok(Json(runs))
}

/// Build run routes
pub fn run_routes() -> Router<AppState> {
    Router::new()
        .route("/run", post(trigger_run))
        .route("/runs", get(recent_runs))
}
