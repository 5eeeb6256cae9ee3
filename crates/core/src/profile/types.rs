//! Scoring profile value objects.

use std::collections::{HashMap, HashSet};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::release::{MediaType, Protocol, Resolution};

/// Any numeric score at or below this is treated as the legacy "banned"
/// sentinel when deserializing profile files.
pub const LEGACY_BANNED_SENTINEL: i64 = -10_000_000;

/// Score assigned to a format tag.
///
/// Banning is a distinct variant rather than a large negative number:
/// a banned tag rejects the release outright and no amount of positive
/// score from other tags can claw it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatScore {
    Points(i64),
    Banned,
}

impl Serialize for FormatScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FormatScore::Points(points) => serializer.serialize_i64(*points),
            FormatScore::Banned => serializer.serialize_str("banned"),
        }
    }
}

impl<'de> Deserialize<'de> for FormatScore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) if n <= LEGACY_BANNED_SENTINEL => Ok(FormatScore::Banned),
            Raw::Number(n) => Ok(FormatScore::Points(n)),
            Raw::Text(s) if s == "banned" => Ok(FormatScore::Banned),
            Raw::Text(s) => Err(D::Error::custom(format!(
                "invalid format score '{s}': expected an integer or \"banned\""
            ))),
        }
    }
}

/// Optional size bounds, by media type. Absent bounds mean unbounded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie_min_gb: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie_max_gb: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_min_mb: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_max_mb: Option<u64>,
}

/// Which bound a release size fell outside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeViolation {
    TooSmall,
    TooLarge,
}

const GB: f64 = 1024.0 * 1024.0 * 1024.0;
const MB: u64 = 1024 * 1024;

impl SizeBounds {
    /// Check a release size against the bounds for its media type.
    pub fn violation(&self, media_type: MediaType, size_bytes: u64) -> Option<SizeViolation> {
        match media_type {
            MediaType::Movie => {
                if let Some(min) = self.movie_min_gb {
                    if (size_bytes as f64) < min * GB {
                        return Some(SizeViolation::TooSmall);
                    }
                }
                if let Some(max) = self.movie_max_gb {
                    if (size_bytes as f64) > max * GB {
                        return Some(SizeViolation::TooLarge);
                    }
                }
                None
            }
            MediaType::Episode => {
                if let Some(min) = self.episode_min_mb {
                    if size_bytes < min * MB {
                        return Some(SizeViolation::TooSmall);
                    }
                }
                if let Some(max) = self.episode_max_mb {
                    if size_bytes > max * MB {
                        return Some(SizeViolation::TooLarge);
                    }
                }
                None
            }
        }
    }
}

/// A named scoring policy: format tag scores plus acceptance and
/// upgrade thresholds. Immutable value object once loaded; built-in
/// profiles are constants, user profiles deserialize from config with
/// the same shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringProfile {
    pub id: String,
    pub name: String,
    /// Format tag -> score. Tags absent from the table are neutral.
    pub format_scores: HashMap<String, FormatScore>,
    /// Tie-break preference when total scores are equal: earlier is
    /// better.
    pub resolution_order: Vec<Resolution>,
    #[serde(default = "default_true")]
    pub upgrades_allowed: bool,
    /// Floor below which a release is rejected outright.
    #[serde(default)]
    pub min_score: i64,
    /// Ceiling above which no further upgrade is attempted.
    pub upgrade_until_score: i64,
    /// Minimum score delta required to replace an existing file.
    #[serde(default)]
    pub min_score_increment: i64,
    pub allowed_protocols: HashSet<Protocol>,
    #[serde(default)]
    pub size_bounds: SizeBounds,
}

fn default_true() -> bool {
    true
}

impl ScoringProfile {
    /// Score for a tag; `None` when the tag is not in the table.
    pub fn score_for(&self, tag: &str) -> Option<FormatScore> {
        self.format_scores.get(tag).copied()
    }

    /// Position of a resolution in the tie-break order, or `usize::MAX`
    /// when absent (sorts last).
    pub fn resolution_rank(&self, resolution: Option<Resolution>) -> usize {
        resolution
            .and_then(|r| self.resolution_order.iter().position(|o| *o == r))
            .unwrap_or(usize::MAX)
    }
}
