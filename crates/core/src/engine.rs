//! Engine facade.
//!
//! Bundles an aggregator, a compiled format library snapshot and the
//! configured source handles behind the two call contracts the rest of
//! the application consumes. Profiles are injected per call; the
//! library is an immutable `Arc` snapshot, so replacing it (e.g. after
//! a config reload) means building a new `Engine`; readers never see
//! a half-updated library.

use std::sync::Arc;
use std::time::Duration;

use crate::aggregator::{AggregationResult, Aggregator, Source};
use crate::config::{build_format_library, Config, ConfigError};
use crate::decision::{evaluate_candidates, Evaluation};
use crate::format::FormatLibrary;
use crate::profile::ScoringProfile;
use crate::release::{MediaType, ReleaseMetadata, SearchCriteria};

pub struct Engine {
    aggregator: Aggregator,
    library: Arc<FormatLibrary>,
    sources: Vec<Arc<dyn Source>>,
}

impl Engine {
    /// Build an engine from a validated config and the source handles
    /// the provider layer supplies. Sources disabled in the config are
    /// dropped here.
    pub fn new(config: &Config, sources: Vec<Arc<dyn Source>>) -> Result<Self, ConfigError> {
        let library = Arc::new(build_format_library(config)?);
        let sources = sources
            .into_iter()
            .filter(|s| config.source_enabled(s.name()))
            .collect();
        Ok(Self {
            aggregator: Aggregator::new(config.aggregator.clone()),
            library,
            sources,
        })
    }

    /// The compiled format library snapshot this engine evaluates with.
    pub fn library(&self) -> &Arc<FormatLibrary> {
        &self.library
    }

    /// Names of the enabled source handles.
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Fan a search out to every enabled source. `timeout` of `None`
    /// uses the configured default.
    pub async fn aggregate_search(
        &self,
        criteria: &SearchCriteria,
        timeout: Option<Duration>,
    ) -> AggregationResult {
        let timeout = timeout.unwrap_or_else(|| self.aggregator.default_timeout());
        self.aggregator
            .search(criteria, &self.sources, timeout)
            .await
    }

    /// Score and filter candidates against a profile, optionally
    /// judging them against an existing file's score.
    pub fn evaluate_candidates(
        &self,
        releases: &[ReleaseMetadata],
        profile: &ScoringProfile,
        media_type: MediaType,
        existing_file_score: Option<i64>,
    ) -> Evaluation {
        evaluate_candidates(
            releases,
            &self.library,
            profile,
            media_type,
            existing_file_score,
        )
    }
}
