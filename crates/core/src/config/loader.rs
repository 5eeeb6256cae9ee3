use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Load configuration from file with environment variable overrides.
///
/// Nesting in variable names uses a double underscore so snake_case
/// keys survive: `SCREENPICK__AGGREGATOR__TIMEOUT_MS` maps to
/// `aggregator.timeout_ms`.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("SCREENPICK__").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    super::validate::validate_config(&config)?;
    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    let config: Config =
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    super::validate::validate_config(&config)?;
    Ok(config)
}
