use serde::{Deserialize, Serialize};

use crate::format::FormatDefinition;
use crate::profile::ScoringProfile;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub aggregator: AggregatorConfig,
    /// Per-source knobs, keyed by the source handle's name.
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
    /// User-defined format detectors, loaded alongside the built-ins.
    #[serde(default)]
    pub formats: Vec<FormatDefinition>,
    /// User-defined scoring profiles.
    #[serde(default)]
    pub profiles: Vec<ScoringProfile>,
    /// Whether the built-in format library is included (default: true).
    #[serde(default = "default_true")]
    pub include_builtin_formats: bool,
}

/// Aggregator configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AggregatorConfig {
    /// Default global search timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Per-source deadline in milliseconds; capped at the global
    /// timeout. Absent means each source gets the global timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_timeout_ms: Option<u64>,
    /// Truncate the deduplicated result list (absent: unlimited).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            source_timeout_ms: None,
            max_results: None,
        }
    }
}

fn default_timeout_ms() -> u64 {
    30_000
}

/// Per-source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Must match the source handle's `name()`.
    pub name: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aggregator: AggregatorConfig::default(),
            sources: Vec::new(),
            formats: Vec::new(),
            profiles: Vec::new(),
            include_builtin_formats: true,
        }
    }
}

impl Config {
    /// Whether a source handle is enabled. Sources without a config
    /// entry are enabled by default.
    pub fn source_enabled(&self, name: &str) -> bool {
        self.sources
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.enabled)
            .unwrap_or(true)
    }
}
