//! Built-in scoring profiles.
//!
//! Two stock profiles with opposed philosophies, both expressed through
//! the same generic score table: "quality-first" chases remuxes and
//! lossless audio, "space-saver" scores remuxes negative and efficient
//! encodes positive. The engine has no special-cased knowledge of
//! either; a new philosophy is a new table, not new code.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use super::types::{FormatScore, ScoringProfile, SizeBounds};
use crate::release::{Protocol, Resolution};

fn scores(entries: &[(&str, FormatScore)]) -> HashMap<String, FormatScore> {
    entries
        .iter()
        .map(|(id, score)| (id.to_string(), *score))
        .collect()
}

const fn pts(points: i64) -> FormatScore {
    FormatScore::Points(points)
}

fn quality_first() -> ScoringProfile {
    ScoringProfile {
        id: "quality-first".to_string(),
        name: "Quality first".to_string(),
        format_scores: scores(&[
            // Resolution tiers
            ("2160p", pts(4000)),
            ("1080p", pts(2000)),
            ("720p", pts(500)),
            ("576p", pts(-500)),
            ("480p", pts(-1000)),
            // Source tiers
            ("remux", pts(8000)),
            ("bluray", pts(5000)),
            ("web-dl", pts(3000)),
            ("webrip", pts(1500)),
            ("hdtv", pts(500)),
            ("dvd", pts(100)),
            ("telecine", pts(-5000)),
            ("telesync", FormatScore::Banned),
            ("cam", FormatScore::Banned),
            // HDR tiers
            ("hdr-dolby-vision", pts(1500)),
            ("hdr10-plus", pts(1200)),
            ("hdr10", pts(1000)),
            ("hlg", pts(300)),
            // Audio tiers
            ("atmos", pts(1200)),
            ("truehd", pts(1000)),
            ("dts-hd", pts(800)),
            ("dts", pts(500)),
            ("eac3", pts(300)),
            ("ac3", pts(150)),
            ("flac-audio", pts(300)),
            ("opus-audio", pts(150)),
            ("aac", pts(50)),
            ("mp3-audio", pts(-200)),
            // Codec tiers
            ("av1", pts(500)),
            ("x265", pts(300)),
            ("x264", pts(100)),
            ("xvid", pts(-2000)),
            // Flags
            ("proper", pts(150)),
            ("repack", pts(100)),
            ("3d", pts(-500)),
            // Group tiers
            ("remux-tier-group", pts(1000)),
            ("scene-tier-group", pts(200)),
            ("micro-encode-group", pts(-3000)),
            ("upscaled", pts(-4000)),
        ]),
        resolution_order: vec![
            Resolution::R2160p,
            Resolution::R1080p,
            Resolution::R720p,
            Resolution::R576p,
            Resolution::R480p,
        ],
        upgrades_allowed: true,
        min_score: 0,
        upgrade_until_score: 14_000,
        min_score_increment: 500,
        allowed_protocols: HashSet::from([Protocol::Torrent, Protocol::Usenet]),
        size_bounds: SizeBounds::default(),
    }
}

fn space_saver() -> ScoringProfile {
    ScoringProfile {
        id: "space-saver".to_string(),
        name: "Space saver".to_string(),
        format_scores: scores(&[
            // Resolution tiers: 1080p is the sweet spot
            ("2160p", pts(-1000)),
            ("1080p", pts(2500)),
            ("720p", pts(1500)),
            ("576p", pts(200)),
            ("480p", pts(-500)),
            // Source tiers: remuxes are storage poison here
            ("remux", pts(-4000)),
            ("bluray", pts(500)),
            ("web-dl", pts(2000)),
            ("webrip", pts(1200)),
            ("hdtv", pts(400)),
            ("dvd", pts(100)),
            ("telecine", pts(-5000)),
            ("telesync", FormatScore::Banned),
            ("cam", FormatScore::Banned),
            // HDR barely matters at these bitrates
            ("hdr-dolby-vision", pts(100)),
            ("hdr10-plus", pts(100)),
            ("hdr10", pts(200)),
            // Audio tiers: lossless is wasted bytes
            ("atmos", pts(-300)),
            ("truehd", pts(-500)),
            ("dts-hd", pts(-500)),
            ("dts", pts(-200)),
            ("eac3", pts(300)),
            ("ac3", pts(100)),
            ("flac-audio", pts(-200)),
            ("opus-audio", pts(350)),
            ("aac", pts(400)),
            ("mp3-audio", pts(-100)),
            // Codec tiers: efficiency wins
            ("av1", pts(2500)),
            ("x265", pts(2000)),
            ("x264", pts(200)),
            ("xvid", pts(-1500)),
            // Flags
            ("proper", pts(150)),
            ("repack", pts(100)),
            ("3d", pts(-1000)),
            // Group tiers: micro encoders are the point
            ("remux-tier-group", pts(-1000)),
            ("scene-tier-group", pts(100)),
            ("micro-encode-group", pts(1500)),
            ("upscaled", pts(-2000)),
        ]),
        resolution_order: vec![
            Resolution::R1080p,
            Resolution::R720p,
            Resolution::R2160p,
            Resolution::R576p,
            Resolution::R480p,
        ],
        upgrades_allowed: true,
        min_score: 0,
        upgrade_until_score: 8000,
        min_score_increment: 300,
        allowed_protocols: HashSet::from([
            Protocol::Torrent,
            Protocol::Usenet,
            Protocol::Streaming,
        ]),
        size_bounds: SizeBounds {
            movie_min_gb: Some(0.5),
            movie_max_gb: Some(10.0),
            episode_min_mb: Some(80),
            episode_max_mb: Some(1500),
        },
    }
}

/// The stock profiles, loaded once.
pub static BUILTIN_PROFILES: Lazy<Vec<ScoringProfile>> =
    Lazy::new(|| vec![quality_first(), space_saver()]);

/// Look up a built-in profile by id.
pub fn builtin_profile(id: &str) -> Option<&'static ScoringProfile> {
    BUILTIN_PROFILES.iter().find(|p| p.id == id)
}
