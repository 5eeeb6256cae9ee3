//! Release aggregation and quality-decision engine.
//!
//! The pipeline: a search request fans out to indexer sources
//! concurrently ([`aggregator`]), raw results are normalized into
//! [`release::ReleaseMetadata`] and deduplicated, each release is
//! tagged by the [`format`] library, scored against a
//! [`profile::ScoringProfile`] by the [`scoring`] engine, and the
//! [`decision`] policy ranks the survivors and judges
//! upgrade-worthiness against any existing file.
//!
//! This crate is an in-process library: transport, persistence and the
//! web layer live with its consumers.

pub mod aggregator;
pub mod config;
pub mod decision;
pub mod engine;
pub mod format;
pub mod metrics;
pub mod profile;
pub mod release;
pub mod scoring;
pub mod testing;

pub use aggregator::{
    AggregationResult, Aggregator, Source, SourceError, SourceOutcome, SourceStatus,
};
pub use config::{
    build_format_library, load_config, load_config_from_str, validate_config, AggregatorConfig,
    Config, ConfigError, SourceConfig,
};
pub use decision::{
    evaluate_candidates, Evaluation, RejectionReason, ScoredRelease, UpgradeDecision, Verdict,
};
pub use engine::Engine;
pub use format::{
    builtin_formats, Condition, FormatDefinition, FormatError, FormatLibrary, BUILTIN_LIBRARY,
};
pub use profile::{builtin_profile, FormatScore, ScoringProfile, SizeBounds, BUILTIN_PROFILES};
pub use release::{
    AudioCodec, HdrFormat, MediaType, Protocol, ReleaseMetadata, Resolution, SearchCriteria,
    SearchKind, SourceType, VideoCodec,
};
pub use scoring::{score, ScoreOutcome};
