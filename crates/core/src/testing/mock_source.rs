//! Mock source for testing.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::aggregator::{Source, SourceError};
use crate::release::{ReleaseMetadata, SearchCriteria};

/// Mock implementation of the [`Source`] trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable releases
/// - Track fetch calls for assertions
/// - Simulate failures and delays
///
/// # Example
///
/// ```rust,ignore
/// use screenpick_core::testing::{fixtures, MockSource};
///
/// let source = MockSource::named("indexer-a");
/// source.set_results(vec![fixtures::release("Some Movie 2024 1080p")]).await;
/// source.set_delay(Duration::from_millis(50)).await;
/// ```
pub struct MockSource {
    name: String,
    /// Configured releases to return.
    results: Arc<RwLock<Vec<ReleaseMetadata>>>,
    /// If set, every fetch fails with an error built by this factory.
    error: Arc<RwLock<Option<Box<dyn Fn() -> SourceError + Send + Sync>>>>,
    /// Artificial latency before answering.
    delay: Arc<RwLock<Option<Duration>>>,
    /// Recorded fetch criteria.
    fetches: Arc<RwLock<Vec<SearchCriteria>>>,
}

impl std::fmt::Debug for MockSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSource")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl MockSource {
    /// Create a named mock source with no results.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            results: Arc::new(RwLock::new(Vec::new())),
            error: Arc::new(RwLock::new(None)),
            delay: Arc::new(RwLock::new(None)),
            fetches: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Set the releases returned by subsequent fetches.
    pub async fn set_results(&self, results: Vec<ReleaseMetadata>) {
        *self.results.write().await = results;
    }

    /// Make every fetch fail with errors built by `factory`.
    pub async fn set_error<F>(&self, factory: F)
    where
        F: Fn() -> SourceError + Send + Sync + 'static,
    {
        *self.error.write().await = Some(Box::new(factory));
    }

    /// Clear any configured error.
    pub async fn clear_error(&self) {
        *self.error.write().await = None;
    }

    /// Delay every fetch by `delay`.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    /// Get the criteria of every fetch so far.
    pub async fn recorded_fetches(&self) -> Vec<SearchCriteria> {
        self.fetches.read().await.clone()
    }

    /// Number of fetches performed.
    pub async fn fetch_count(&self) -> usize {
        self.fetches.read().await.len()
    }
}

#[async_trait]
impl Source for MockSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, criteria: &SearchCriteria) -> Result<Vec<ReleaseMetadata>, SourceError> {
        self.fetches.write().await.push(criteria.clone());

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(factory) = self.error.read().await.as_ref() {
            return Err(factory());
        }

        Ok(self.results.read().await.clone())
    }
}
