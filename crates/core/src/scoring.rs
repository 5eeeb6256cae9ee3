//! Scoring engine.
//!
//! The engine knows nothing about resolutions, codecs or groups: it
//! sums whatever the profile's table says about the matched tags.
//! Category philosophy lives entirely in profile data, which is what
//! lets opposed profiles share this code unchanged.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::profile::{FormatScore, ScoringProfile};

/// Result of scoring one release's tag set against a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    /// Sum of the point entries for matched tags. Banned tags do not
    /// contribute to the total.
    pub total: i64,
    /// Whether any matched tag is banned in the profile. Banning is
    /// absolute: no total can override it.
    pub banned_hit: bool,
}

/// Score a matched tag set. Tags absent from the profile's table are
/// neutral, not an error.
pub fn score(tags: &BTreeSet<String>, profile: &ScoringProfile) -> ScoreOutcome {
    let mut total: i64 = 0;
    let mut banned_hit = false;

    for tag in tags {
        match profile.score_for(tag) {
            Some(FormatScore::Points(points)) => total += points,
            Some(FormatScore::Banned) => banned_hit = true,
            None => {}
        }
    }

    ScoreOutcome { total, banned_hit }
}

/// The first banned tag in a tag set, if any, for rejection reporting.
pub fn first_banned_tag<'a>(
    tags: &'a BTreeSet<String>,
    profile: &ScoringProfile,
) -> Option<&'a str> {
    tags.iter()
        .find(|tag| profile.score_for(tag) == Some(FormatScore::Banned))
        .map(|tag| tag.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    use crate::profile::SizeBounds;
    use crate::release::{Protocol, Resolution};

    fn profile(entries: &[(&str, FormatScore)]) -> ScoringProfile {
        ScoringProfile {
            id: "test".to_string(),
            name: "Test".to_string(),
            format_scores: entries
                .iter()
                .map(|(id, s)| (id.to_string(), *s))
                .collect::<HashMap<_, _>>(),
            resolution_order: vec![Resolution::R2160p, Resolution::R1080p],
            upgrades_allowed: true,
            min_score: 0,
            upgrade_until_score: 50_000,
            min_score_increment: 0,
            allowed_protocols: HashSet::from([Protocol::Torrent]),
            size_bounds: SizeBounds::default(),
        }
    }

    fn tags(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_score_is_pure_sum() {
        let profile = profile(&[
            ("a", FormatScore::Points(100)),
            ("b", FormatScore::Points(-30)),
            ("zero", FormatScore::Points(0)),
        ]);

        let outcome = score(&tags(&["a", "b"]), &profile);
        assert_eq!(outcome.total, 70);
        assert!(!outcome.banned_hit);

        // Adding a zero-score tag or an unknown tag never changes the total
        let outcome = score(&tags(&["a", "b", "zero", "unknown"]), &profile);
        assert_eq!(outcome.total, 70);
    }

    #[test]
    fn test_unknown_tags_are_neutral() {
        let profile = profile(&[("a", FormatScore::Points(100))]);
        let outcome = score(&tags(&["completely-unknown"]), &profile);
        assert_eq!(outcome.total, 0);
        assert!(!outcome.banned_hit);
    }

    #[test]
    fn test_banned_hit_regardless_of_total() {
        let profile = profile(&[
            ("2160p-remux", FormatScore::Points(25_000)),
            ("banned-cam", FormatScore::Banned),
        ]);

        let outcome = score(&tags(&["2160p-remux"]), &profile);
        assert_eq!(outcome.total, 25_000);
        assert!(!outcome.banned_hit);

        // Positive score cannot un-ban
        let outcome = score(&tags(&["2160p-remux", "banned-cam"]), &profile);
        assert_eq!(outcome.total, 25_000);
        assert!(outcome.banned_hit);
    }

    #[test]
    fn test_empty_tag_set_scores_zero() {
        let profile = profile(&[("a", FormatScore::Points(100))]);
        let outcome = score(&BTreeSet::new(), &profile);
        assert_eq!(outcome.total, 0);
        assert!(!outcome.banned_hit);
    }

    #[test]
    fn test_first_banned_tag() {
        let profile = profile(&[
            ("cam", FormatScore::Banned),
            ("telesync", FormatScore::Banned),
            ("1080p", FormatScore::Points(1000)),
        ]);
        assert_eq!(
            first_banned_tag(&tags(&["1080p", "cam", "telesync"]), &profile),
            Some("cam") // BTreeSet order: first alphabetically
        );
        assert_eq!(first_banned_tag(&tags(&["1080p"]), &profile), None);
    }
}
