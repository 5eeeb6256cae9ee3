//! Aggregation result types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::release::ReleaseMetadata;

/// How a single source's query ended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceStatus {
    Success,
    Error { message: String },
    /// The source exceeded its deadline or was abandoned at the global
    /// deadline; any partial results were discarded.
    TimedOut,
}

impl SourceStatus {
    /// Stable label for metrics and logs.
    pub fn label(&self) -> &'static str {
        match self {
            SourceStatus::Success => "success",
            SourceStatus::Error { .. } => "error",
            SourceStatus::TimedOut => "timed_out",
        }
    }
}

/// Per-source outcome record for observability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceOutcome {
    pub source: String,
    pub status: SourceStatus,
    /// Raw result count before deduplication.
    pub results: u32,
    pub latency_ms: u64,
}

/// Result of one aggregated search. Created per invocation, fully
/// consumed by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationResult {
    /// Correlation id for logs.
    pub search_id: Uuid,
    /// Deduplicated releases. Order is deterministic but otherwise
    /// unspecified; ranking is the decision policy's job.
    pub releases: Vec<ReleaseMetadata>,
    pub source_outcomes: Vec<SourceOutcome>,
    pub duration_ms: u64,
}

impl AggregationResult {
    /// Whether every queried source failed. Lets callers distinguish
    /// "search found nothing" from "search mostly failed".
    pub fn all_sources_failed(&self) -> bool {
        !self.source_outcomes.is_empty()
            && self
                .source_outcomes
                .iter()
                .all(|o| o.status != SourceStatus::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(source: &str, status: SourceStatus) -> SourceOutcome {
        SourceOutcome {
            source: source.to_string(),
            status,
            results: 0,
            latency_ms: 10,
        }
    }

    #[test]
    fn test_all_sources_failed() {
        let result = AggregationResult {
            search_id: Uuid::new_v4(),
            releases: vec![],
            source_outcomes: vec![
                outcome("a", SourceStatus::TimedOut),
                outcome(
                    "b",
                    SourceStatus::Error {
                        message: "boom".to_string(),
                    },
                ),
            ],
            duration_ms: 100,
        };
        assert!(result.all_sources_failed());
    }

    #[test]
    fn test_one_success_is_not_all_failed() {
        let result = AggregationResult {
            search_id: Uuid::new_v4(),
            releases: vec![],
            source_outcomes: vec![
                outcome("a", SourceStatus::Success),
                outcome("b", SourceStatus::TimedOut),
            ],
            duration_ms: 100,
        };
        assert!(!result.all_sources_failed());
    }

    #[test]
    fn test_no_sources_is_not_all_failed() {
        let result = AggregationResult {
            search_id: Uuid::new_v4(),
            releases: vec![],
            source_outcomes: vec![],
            duration_ms: 0,
        };
        assert!(!result.all_sources_failed());
    }

    #[test]
    fn test_source_status_serialization() {
        let json = serde_json::to_string(&SourceStatus::TimedOut).unwrap();
        assert_eq!(json, "{\"status\":\"timed_out\"}");
        assert_eq!(SourceStatus::Success.label(), "success");
    }

    #[test]
    fn test_aggregation_result_roundtrips_with_search_id() {
        let result = AggregationResult {
            search_id: Uuid::new_v4(),
            releases: vec![],
            source_outcomes: vec![outcome("a", SourceStatus::Success)],
            duration_ms: 42,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains(&result.search_id.to_string()));
        let parsed: AggregationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.search_id, result.search_id);
        assert_eq!(parsed.duration_ms, 42);
    }
}
