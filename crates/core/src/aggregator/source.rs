//! Source handle abstraction.
//!
//! A source is one external indexer (torrent tracker, usenet indexer,
//! streaming provider) capable of answering a single search call with
//! already-parsed release metadata. Provider-specific transport and
//! scraping live behind this trait, outside this crate.

use async_trait::async_trait;
use thiserror::Error;

use crate::release::{ReleaseMetadata, SearchCriteria};

/// Errors a single source can report. These are recovered locally by
/// the aggregator and recorded per source, never fatal for the whole
/// search.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("provider API error: {0}")]
    Api(String),

    #[error("malformed provider response: {0}")]
    Parse(String),

    #[error("source timed out")]
    Timeout,
}

/// One searchable indexer.
#[async_trait]
pub trait Source: Send + Sync {
    /// Source name for outcome records and logging.
    fn name(&self) -> &str;

    /// Execute a single search call.
    async fn fetch(&self, criteria: &SearchCriteria) -> Result<Vec<ReleaseMetadata>, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_display() {
        let err = SourceError::ConnectionFailed("refused".to_string());
        assert_eq!(err.to_string(), "connection failed: refused");
        assert_eq!(SourceError::Timeout.to_string(), "source timed out");
    }
}
