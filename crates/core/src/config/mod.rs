//! Configuration loading and validation.
//!
//! TOML file with `SCREENPICK__`-prefixed environment overrides. A
//! malformed format condition or a profile referencing an unknown
//! format is fatal here, at load time, never during matching.

mod loader;
mod types;
mod validate;

pub use loader::{load_config, load_config_from_str};
pub use types::{AggregatorConfig, Config, SourceConfig};
pub use validate::{build_format_library, validate_config};

use thiserror::Error;

use crate::format::FormatError;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),

    #[error("Invalid format definition: {0}")]
    Format(#[from] FormatError),

    #[error("Invalid configuration: {0}")]
    Validation(String),
}
