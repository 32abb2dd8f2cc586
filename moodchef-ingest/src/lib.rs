//! moodchef-ingest library interface
//!
//! Recipe acquisition and mood classification: fetch from the catalog,
//! classify against the mood taxonomy, balance across categories, and persist
//! in batches. Exposed as a library for the binary and the integration tests.

pub mod api;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use moodchef_common::config::TomlConfig;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Destination database pool
    pub db: SqlitePool,
    /// Loaded configuration; credentials are resolved per run
    pub config: Arc<TomlConfig>,
    /// Held for the duration of a run
    pub run_lock: Arc<Mutex<()>>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Status label of the last run
    pub last_run: Arc<RwLock<Option<String>>>,
    /// Last fatal run error
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: TomlConfig) -> Self {
        Self {
            db,
            config: Arc::new(config),
            run_lock: Arc::new(Mutex::new(())),
            startup_time: Utc::now(),
            last_run: Arc::new(RwLock::new(None)),
            last_error: Arc::new(RwLock::new(None)),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::run_routes())
        .merge(api::health_routes())
        .with_state(state)
}
