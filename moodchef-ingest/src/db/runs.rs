//! Ingest run log
//!
//! One row per finished run, so operators can see partial failures after the
//! fact without scraping logs.

use crate::models::{BatchError, RunSummary};
use chrono::{DateTime, SecondsFormat, Utc};
use moodchef_common::{Error, Result};
use serde::Serialize;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Stored run record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRecord {
    pub run_id: Uuid,
    pub status: String,
    pub total_processed: usize,
    pub success_count: usize,
    pub errors: Vec<BatchError>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunRecord {
    pub fn from_summary(summary: &RunSummary, started_at: DateTime<Utc>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            status: summary.status_label().to_string(),
            total_processed: summary.total_processed(),
            success_count: summary.success_count(),
            errors: summary.errors().to_vec(),
            started_at,
            finished_at: Utc::now(),
        }
    }
}

/// Save a run record
pub async fn save_run(pool: &SqlitePool, record: &RunRecord) -> Result<()> {
    let errors = serde_json::to_string(&record.errors)
        .map_err(|e| Error::Internal(format!("Failed to serialize errors: {}", e)))?;

    sqlx::query(
        r#"
        INSERT INTO ingest_runs (
            run_id, status, total_processed, success_count, errors, started_at, finished_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(record.run_id.to_string())
    .bind(&record.status)
    .bind(record.total_processed as i64)
    .bind(record.success_count as i64)
    .bind(&errors)
    .bind(record.started_at.to_rfc3339_opts(SecondsFormat::Micros, true))
    .bind(record.finished_at.to_rfc3339_opts(SecondsFormat::Micros, true))
    .execute(pool)
    .await?;

    Ok(())
}

/// Most recent runs, newest first
pub async fn list_recent_runs(pool: &SqlitePool, limit: u32) -> Result<Vec<RunRecord>> {
    let rows = sqlx::query(
        r#"
        SELECT run_id, status, total_processed, success_count, errors, started_at, finished_at
        FROM ingest_runs
        ORDER BY finished_at DESC
        LIMIT ?
        "#,
    )
    .bind(limit as i64)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| {
            let run_id: String = row.get("run_id");
            let errors: String = row.get("errors");
            let started_at: String = row.get("started_at");
            let finished_at: String = row.get("finished_at");
            let total_processed: i64 = row.get("total_processed");
            let success_count: i64 = row.get("success_count");

            Ok(RunRecord {
                run_id: Uuid::parse_str(&run_id)
                    .map_err(|e| Error::Internal(format!("Invalid run_id: {}", e)))?,
                status: row.get("status"),
                total_processed: total_processed.max(0) as usize,
                success_count: success_count.max(0) as usize,
                errors: serde_json::from_str(&errors)
                    .map_err(|e| Error::Internal(format!("Failed to deserialize errors: {}", e)))?,
                started_at: parse_timestamp(&started_at)?,
                finished_at: parse_timestamp(&finished_at)?,
            })
        })
        .collect()
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Internal(format!("Failed to parse timestamp: {}", e)))
}
