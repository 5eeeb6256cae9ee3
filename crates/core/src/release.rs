//! Normalized release metadata.
//!
//! A `ReleaseMetadata` is the shape every indexer result is parsed into
//! before matching and scoring. Construction happens in the per-source
//! provider layer; everything downstream treats it as read-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Video resolution of a release.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Resolution {
    #[serde(rename = "480p")]
    R480p,
    #[serde(rename = "576p")]
    R576p,
    #[serde(rename = "720p")]
    R720p,
    #[serde(rename = "1080p")]
    R1080p,
    #[serde(rename = "2160p")]
    R2160p,
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Resolution::R480p => "480p",
            Resolution::R576p => "576p",
            Resolution::R720p => "720p",
            Resolution::R1080p => "1080p",
            Resolution::R2160p => "2160p",
        };
        f.write_str(s)
    }
}

/// Where the video was ripped from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Cam,
    Telesync,
    Telecine,
    Dvd,
    Hdtv,
    WebRip,
    WebDl,
    BluRay,
    Remux,
}

/// Video codec.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VideoCodec {
    Xvid,
    H264,
    H265,
    Av1,
}

/// HDR variant, when the release carries one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HdrFormat {
    Hdr10,
    Hdr10Plus,
    DolbyVision,
    Hlg,
}

/// Audio codec.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AudioCodec {
    Aac,
    Mp3,
    Ac3,
    Eac3,
    Dts,
    DtsHd,
    TrueHd,
    Atmos,
    Flac,
    Opus,
}

/// Delivery protocol of a release.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    Torrent,
    Usenet,
    Streaming,
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Protocol::Torrent => "torrent",
            Protocol::Usenet => "usenet",
            Protocol::Streaming => "streaming",
        };
        f.write_str(s)
    }
}

/// A single discovered, downloadable unit of content with parsed
/// quality metadata. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseMetadata {
    /// Full release title as published by the indexer.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_codec: Option<VideoCodec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdr: Option<HdrFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_codec: Option<AudioCodec>,
    /// Channel layout as parsed, e.g. "5.1".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_channels: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_group: Option<String>,
    /// Edition tag, e.g. "Director's Cut".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,
    #[serde(default)]
    pub proper: bool,
    #[serde(default)]
    pub repack: bool,
    #[serde(default)]
    pub three_d: bool,
    /// Size in bytes.
    pub size_bytes: u64,
    pub protocol: Protocol,
    /// Seeders (torrent only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seeders: Option<u32>,
    /// Leechers (torrent only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leechers: Option<u32>,
    /// Which indexer returned this release.
    pub indexer: String,
    /// Info hash (lowercase hex), when the indexer reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_hash: Option<String>,
    /// Raw download reference: magnet URI, .torrent URL or NZB URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<DateTime<Utc>>,
}

/// What kind of content a search is for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    Movie,
    Season,
    Episode,
}

/// Media type for size-bound selection: movie bounds are in GB,
/// episode bounds in MB.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Movie,
    Episode,
}

/// Search request passed to every source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<u32>,
    pub kind: SearchKind,
}

impl SearchCriteria {
    /// Which size-bound table applies to results of this search.
    pub fn media_type(&self) -> MediaType {
        match self.kind {
            SearchKind::Movie => MediaType::Movie,
            SearchKind::Season | SearchKind::Episode => MediaType::Episode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_serialization() {
        assert_eq!(
            serde_json::to_string(&Resolution::R2160p).unwrap(),
            "\"2160p\""
        );
        let parsed: Resolution = serde_json::from_str("\"1080p\"").unwrap();
        assert_eq!(parsed, Resolution::R1080p);
    }

    #[test]
    fn test_protocol_serialization() {
        assert_eq!(
            serde_json::to_string(&Protocol::Usenet).unwrap(),
            "\"usenet\""
        );
        assert_eq!(Protocol::Torrent.to_string(), "torrent");
    }

    #[test]
    fn test_release_minimal_deserialization() {
        let json = r#"{
            "title": "Some Movie 2024 1080p WEB-DL",
            "size_bytes": 4000000000,
            "protocol": "torrent",
            "indexer": "indexer-a"
        }"#;
        let release: ReleaseMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(release.title, "Some Movie 2024 1080p WEB-DL");
        assert!(release.resolution.is_none());
        assert!(!release.proper);
        assert!(release.seeders.is_none());
    }

    #[test]
    fn test_search_criteria_media_type() {
        let movie = SearchCriteria {
            title: "Some Movie".to_string(),
            year: Some(2024),
            season: None,
            episode: None,
            kind: SearchKind::Movie,
        };
        assert_eq!(movie.media_type(), MediaType::Movie);

        let episode = SearchCriteria {
            title: "Some Show".to_string(),
            year: None,
            season: Some(2),
            episode: Some(5),
            kind: SearchKind::Episode,
        };
        assert_eq!(episode.media_type(), MediaType::Episode);
    }
}
