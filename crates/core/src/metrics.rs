//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Aggregation (searches, per-source outcomes, result counts)
//! - Evaluation (outcomes, rejection reasons, upgrade decisions)

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Aggregation Metrics
// =============================================================================

/// Aggregated searches total.
pub static SEARCHES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("screenpick_searches_total", "Total aggregated searches").unwrap()
});

/// Aggregated search duration in seconds.
pub static SEARCH_DURATION: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "screenpick_search_duration_seconds",
            "Duration of aggregated searches",
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
    )
    .unwrap()
});

/// Per-source query outcomes.
pub static SOURCE_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "screenpick_source_requests_total",
            "Total per-source search requests",
        ),
        &["source", "status"], // status: "success", "error", "timed_out"
    )
    .unwrap()
});

/// Deduplicated releases returned per search.
pub static RELEASES_FOUND: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "screenpick_releases_found",
            "Number of deduplicated releases per search",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0]),
    )
    .unwrap()
});

// =============================================================================
// Evaluation Metrics
// =============================================================================

/// Candidate evaluations total by outcome.
pub static EVALUATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "screenpick_evaluations_total",
            "Total candidate evaluations",
        ),
        &["outcome"], // "selected", "empty"
    )
    .unwrap()
});

/// Candidate rejections by reason.
pub static REJECTIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "screenpick_rejections_total",
            "Total candidate rejections by reason",
        ),
        &["reason"],
    )
    .unwrap()
});

/// Upgrade gate decisions.
pub static UPGRADE_DECISIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "screenpick_upgrade_decisions_total",
            "Total upgrade gate decisions",
        ),
        &["result"],
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Aggregation
        Box::new(SEARCHES_TOTAL.clone()),
        Box::new(SEARCH_DURATION.clone()),
        Box::new(SOURCE_REQUESTS.clone()),
        Box::new(RELEASES_FOUND.clone()),
        // Evaluation
        Box::new(EVALUATIONS_TOTAL.clone()),
        Box::new(REJECTIONS_TOTAL.clone()),
        Box::new(UPGRADE_DECISIONS.clone()),
    ]
}
