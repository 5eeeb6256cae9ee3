//! Multi-source release aggregation.
//!
//! One concurrent task per source, each with its own deadline; a slow
//! or failing source never blocks or fails the whole search. The
//! global timeout is a hard cancellation signal: tasks still in flight
//! when it expires are aborted and recorded as timed out, and the
//! aggregator returns immediately with whatever completed.

mod dedup;
mod source;
mod types;

pub use source::{Source, SourceError};
pub use types::{AggregationResult, SourceOutcome, SourceStatus};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::AggregatorConfig;
use crate::metrics;
use crate::release::{ReleaseMetadata, SearchCriteria};

/// Fans a search out to sources and collects normalized results.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: AggregatorConfig,
}

impl Aggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    /// The configured default global timeout.
    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.config.timeout_ms)
    }

    /// Execute one aggregated search with the given global timeout.
    pub async fn search(
        &self,
        criteria: &SearchCriteria,
        sources: &[Arc<dyn Source>],
        timeout: Duration,
    ) -> AggregationResult {
        let search_id = Uuid::new_v4();
        let start = std::time::Instant::now();
        let deadline = tokio::time::Instant::now() + timeout;

        // Each task gets its own deadline, never past the global one
        let per_source = self
            .config
            .source_timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(timeout)
            .min(timeout);

        debug!(
            %search_id,
            query = %criteria.title,
            sources = sources.len(),
            timeout_ms = timeout.as_millis() as u64,
            "Starting aggregated search"
        );

        let mut tasks: JoinSet<(Result<Vec<ReleaseMetadata>, SourceError>, u64)> = JoinSet::new();
        let mut pending: HashMap<tokio::task::Id, String> = HashMap::new();

        for source in sources {
            let source = Arc::clone(source);
            let criteria = criteria.clone();
            let name = source.name().to_string();
            let handle = tasks.spawn(async move {
                let fetch_start = std::time::Instant::now();
                let result = match tokio::time::timeout(per_source, source.fetch(&criteria)).await
                {
                    Ok(result) => result,
                    Err(_) => Err(SourceError::Timeout),
                };
                (result, fetch_start.elapsed().as_millis() as u64)
            });
            pending.insert(handle.id(), name);
        }

        let mut raw: Vec<ReleaseMetadata> = Vec::new();
        let mut outcomes: Vec<SourceOutcome> = Vec::new();

        loop {
            tokio::select! {
                joined = tasks.join_next_with_id() => {
                    match joined {
                        None => break,
                        Some(task_result) => self.collect_outcome(
                            task_result,
                            &mut pending,
                            &mut raw,
                            &mut outcomes,
                        ),
                    }
                }
                _ = tokio::time::sleep_until(deadline) => {
                    // Hard cancellation: abort in-flight tasks and drain
                    // the set so every outcome is still accounted for
                    warn!(%search_id, pending = pending.len(), "Global search deadline hit, aborting in-flight sources");
                    tasks.abort_all();
                    while let Some(task_result) = tasks.join_next_with_id().await {
                        self.collect_outcome(task_result, &mut pending, &mut raw, &mut outcomes);
                    }
                    break;
                }
            }
        }

        let mut releases = dedup::deduplicate(raw);
        if let Some(limit) = self.config.max_results {
            releases.truncate(limit as usize);
        }

        // Outcome order independent of completion order
        outcomes.sort_by(|a, b| a.source.cmp(&b.source));

        let duration_ms = start.elapsed().as_millis() as u64;

        metrics::SEARCHES_TOTAL.inc();
        metrics::SEARCH_DURATION.observe(duration_ms as f64 / 1000.0);
        metrics::RELEASES_FOUND.observe(releases.len() as f64);

        debug!(
            %search_id,
            releases = releases.len(),
            duration_ms,
            "Aggregated search complete"
        );

        AggregationResult {
            search_id,
            releases,
            source_outcomes: outcomes,
            duration_ms,
        }
    }

    fn collect_outcome(
        &self,
        task_result: Result<
            (
                tokio::task::Id,
                (Result<Vec<ReleaseMetadata>, SourceError>, u64),
            ),
            tokio::task::JoinError,
        >,
        pending: &mut HashMap<tokio::task::Id, String>,
        raw: &mut Vec<ReleaseMetadata>,
        outcomes: &mut Vec<SourceOutcome>,
    ) {
        let (source, status, results, latency_ms) = match task_result {
            Ok((id, (Ok(mut releases), latency_ms))) => {
                let source = pending.remove(&id).unwrap_or_default();
                let count = releases.len() as u32;
                raw.append(&mut releases);
                (source, SourceStatus::Success, count, latency_ms)
            }
            Ok((id, (Err(SourceError::Timeout), latency_ms))) => {
                let source = pending.remove(&id).unwrap_or_default();
                warn!(source = %source, "Source timed out");
                (source, SourceStatus::TimedOut, 0, latency_ms)
            }
            Ok((id, (Err(err), latency_ms))) => {
                let source = pending.remove(&id).unwrap_or_default();
                warn!(source = %source, error = %err, "Source search failed");
                (
                    source,
                    SourceStatus::Error {
                        message: err.to_string(),
                    },
                    0,
                    latency_ms,
                )
            }
            Err(join_err) => {
                // Aborted at the global deadline, or the task panicked.
                // Either way the outcome is recorded, never dropped.
                let source = pending.remove(&join_err.id()).unwrap_or_default();
                if join_err.is_cancelled() {
                    (source, SourceStatus::TimedOut, 0, 0)
                } else {
                    warn!(source = %source, error = %join_err, "Source task panicked");
                    (
                        source,
                        SourceStatus::Error {
                            message: join_err.to_string(),
                        },
                        0,
                        0,
                    )
                }
            }
        };

        metrics::SOURCE_REQUESTS
            .with_label_values(&[&source, status.label()])
            .inc();
        outcomes.push(SourceOutcome {
            source,
            status,
            results,
            latency_ms,
        });
    }
}
