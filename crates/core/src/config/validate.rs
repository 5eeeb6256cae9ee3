use std::collections::HashSet;

use super::{types::Config, ConfigError};
use crate::format::{builtin_formats, FormatError, FormatLibrary};

/// Build the effective format library for a config: the built-ins
/// (unless disabled) plus user-defined formats. Fails fast on duplicate
/// ids and malformed conditions.
pub fn build_format_library(config: &Config) -> Result<FormatLibrary, FormatError> {
    let mut definitions = if config.include_builtin_formats {
        builtin_formats()
    } else {
        Vec::new()
    };
    definitions.extend(config.formats.iter().cloned());
    FormatLibrary::load(definitions)
}

/// Cross-validate a loaded config. The engine refuses to run with an
/// invalid profile/format set rather than guessing at matching time.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let library = build_format_library(config)?;

    let mut profile_ids: HashSet<&str> = HashSet::new();
    for profile in &config.profiles {
        if profile.id.is_empty() {
            return Err(ConfigError::Validation(
                "profile id must not be empty".to_string(),
            ));
        }
        if !profile_ids.insert(&profile.id) {
            return Err(ConfigError::Validation(format!(
                "duplicate profile id: {}",
                profile.id
            )));
        }
        if profile.resolution_order.is_empty() {
            return Err(ConfigError::Validation(format!(
                "profile '{}' has an empty resolution_order",
                profile.id
            )));
        }
        for tag in profile.format_scores.keys() {
            if !library.contains(tag) {
                return Err(ConfigError::Validation(format!(
                    "profile '{}' scores unknown format '{}'",
                    profile.id, tag
                )));
            }
        }
    }

    let mut source_names: HashSet<&str> = HashSet::new();
    for source in &config.sources {
        if !source_names.insert(&source.name) {
            return Err(ConfigError::Validation(format!(
                "duplicate source name: {}",
                source.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;

    #[test]
    fn test_profile_with_unknown_format_rejected() {
        let toml_str = r#"
[[profiles]]
id = "bad"
name = "Bad"
resolution_order = ["1080p"]
upgrade_until_score = 5000
allowed_protocols = ["torrent"]

[profiles.format_scores]
"no-such-format" = 1000
"#;
        let result = load_config_from_str(toml_str);
        match result {
            Err(ConfigError::Validation(msg)) => {
                assert!(msg.contains("no-such-format"));
            }
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_profile_scoring_builtin_format_accepted() {
        let toml_str = r#"
[[profiles]]
id = "ok"
name = "Ok"
resolution_order = ["2160p", "1080p"]
upgrade_until_score = 5000
allowed_protocols = ["torrent"]

[profiles.format_scores]
"remux" = 5000
"cam" = "banned"
"#;
        let config = load_config_from_str(toml_str).unwrap();
        assert_eq!(config.profiles.len(), 1);
    }

    #[test]
    fn test_duplicate_profile_id_rejected() {
        let toml_str = r#"
[[profiles]]
id = "dup"
name = "First"
resolution_order = ["1080p"]
upgrade_until_score = 5000
allowed_protocols = ["torrent"]
format_scores = {}

[[profiles]]
id = "dup"
name = "Second"
resolution_order = ["1080p"]
upgrade_until_score = 5000
allowed_protocols = ["torrent"]
format_scores = {}
"#;
        let result = load_config_from_str(toml_str);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_empty_resolution_order_rejected() {
        let toml_str = r#"
[[profiles]]
id = "empty-order"
name = "Empty"
resolution_order = []
upgrade_until_score = 5000
allowed_protocols = ["torrent"]
format_scores = {}
"#;
        let result = load_config_from_str(toml_str);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_user_format_duplicating_builtin_rejected() {
        let toml_str = r#"
[[formats]]
id = "remux"

[formats.condition]
kind = "title_matches"
pattern = "remux"
"#;
        let result = load_config_from_str(toml_str);
        assert!(matches!(result, Err(ConfigError::Format(_))));
    }

    #[test]
    fn test_builtins_disabled_allows_redefinition() {
        let toml_str = r#"
include_builtin_formats = false

[[formats]]
id = "remux"

[formats.condition]
kind = "title_matches"
pattern = "\\bremux\\b"

[[profiles]]
id = "minimal"
name = "Minimal"
resolution_order = ["1080p"]
upgrade_until_score = 5000
allowed_protocols = ["torrent"]

[profiles.format_scores]
"remux" = 100
"#;
        let config = load_config_from_str(toml_str).unwrap();
        let library = build_format_library(&config).unwrap();
        assert_eq!(library.len(), 1);
    }
}
