//! Run results reported to the caller
//!
//! A summary is returned whenever the run got past its preconditions, even if
//! some batches failed. Callers must inspect `errors` to detect degradation.

use super::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A persistence batch that failed to write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchError {
    /// Zero-based chunk position
    pub batch_index: usize,
    pub error_message: String,
}

/// Outcome of writing every batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub success_count: usize,
    pub errors: Vec<BatchError>,
}

/// Counts gathered over a run that did work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Recipes allocated to a category (and handed to the batcher)
    pub total_processed: usize,
    /// Recipes written successfully
    pub success_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<BatchError>,
    /// Distinct records after merge and dedup
    pub fetched: usize,
    /// Records with at least one candidate category
    pub classified: usize,
    /// Classified records dropped because every candidate category was full
    pub dropped: usize,
    /// Shortfall per category before the run
    pub needed: BTreeMap<Category, usize>,
    /// New assignments per category
    pub assigned: BTreeMap<Category, usize>,
}

/// Result of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunSummary {
    /// Every category already meets its target; nothing was fetched
    NothingToDo {
        message: String,
        current: BTreeMap<Category, usize>,
    },
    Completed(RunReport),
}

impl RunSummary {
    pub fn status_label(&self) -> &'static str {
        match self {
            RunSummary::NothingToDo { .. } => "nothing_to_do",
            RunSummary::Completed(report) if report.errors.is_empty() => "completed",
            RunSummary::Completed(_) => "partial",
        }
    }

    pub fn total_processed(&self) -> usize {
        match self {
            RunSummary::NothingToDo { .. } => 0,
            RunSummary::Completed(report) => report.total_processed,
        }
    }

    pub fn success_count(&self) -> usize {
        match self {
            RunSummary::NothingToDo { .. } => 0,
            RunSummary::Completed(report) => report.success_count,
        }
    }

    pub fn errors(&self) -> &[BatchError] {
        match self {
            RunSummary::NothingToDo { .. } => &[],
            RunSummary::Completed(report) => &report.errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_completed_json_shape() {
        let summary = RunSummary::Completed(RunReport {
            total_processed: 3,
            success_count: 2,
            errors: vec![BatchError {
                batch_index: 1,
                error_message: "disk full".to_string(),
            }],
            fetched: 5,
            classified: 4,
            dropped: 1,
            needed: BTreeMap::from([(Category::Happy, 3)]),
            assigned: BTreeMap::from([(Category::Happy, 3)]),
        });

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["status"], "completed");
        assert_eq!(value["total_processed"], 3);
        assert_eq!(value["success_count"], 2);
        assert_eq!(value["errors"], json!([{"batch_index": 1, "error_message": "disk full"}]));
        assert_eq!(value["assigned"]["Happy"], 3);
        assert_eq!(summary.status_label(), "partial");
    }

    #[test]
    fn test_errors_omitted_when_empty() {
        let summary = RunSummary::Completed(RunReport {
            total_processed: 0,
            success_count: 0,
            errors: Vec::new(),
            fetched: 0,
            classified: 0,
            dropped: 0,
            needed: BTreeMap::new(),
            assigned: BTreeMap::new(),
        });

        let value = serde_json::to_value(&summary).unwrap();
        assert!(value.get("errors").is_none());
        assert_eq!(summary.status_label(), "completed");
    }

    #[test]
    fn test_nothing_to_do_is_distinct() {
        let summary = RunSummary::NothingToDo {
            message: "All categories are at target".to_string(),
            current: BTreeMap::new(),
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["status"], "nothing_to_do");
        assert!(value.get("total_processed").is_none());
    }
}
