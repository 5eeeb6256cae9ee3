//! Release fixtures for tests.

use crate::release::{Protocol, ReleaseMetadata, Resolution, SearchCriteria, SearchKind, SourceType};

/// A minimal torrent release with only required fields set. Tests
/// mutate the fields they care about.
pub fn release(title: &str) -> ReleaseMetadata {
    ReleaseMetadata {
        title: title.to_string(),
        resolution: None,
        source_type: None,
        video_codec: None,
        hdr: None,
        audio_codec: None,
        audio_channels: None,
        release_group: None,
        edition: None,
        proper: false,
        repack: false,
        three_d: false,
        size_bytes: 4_000_000_000,
        protocol: Protocol::Torrent,
        seeders: None,
        leechers: None,
        indexer: "mock-indexer".to_string(),
        info_hash: None,
        download_uri: None,
        publish_date: None,
    }
}

/// A 1080p BluRay release with typical fields populated.
pub fn bluray_1080p(title: &str, indexer: &str, seeders: u32) -> ReleaseMetadata {
    let mut r = release(title);
    r.resolution = Some(Resolution::R1080p);
    r.source_type = Some(SourceType::BluRay);
    r.indexer = indexer.to_string();
    r.seeders = Some(seeders);
    r.leechers = Some(seeders / 4);
    r
}

/// A 2160p remux release.
pub fn remux_2160p(title: &str, indexer: &str) -> ReleaseMetadata {
    let mut r = release(title);
    r.resolution = Some(Resolution::R2160p);
    r.source_type = Some(SourceType::Remux);
    r.size_bytes = 60_000_000_000;
    r.indexer = indexer.to_string();
    r.seeders = Some(20);
    r
}

/// Movie search criteria.
pub fn movie_criteria(title: &str, year: u16) -> SearchCriteria {
    SearchCriteria {
        title: title.to_string(),
        year: Some(year),
        season: None,
        episode: None,
        kind: SearchKind::Movie,
    }
}

/// Single-episode search criteria.
pub fn episode_criteria(title: &str, season: u32, episode: u32) -> SearchCriteria {
    SearchCriteria {
        title: title.to_string(),
        year: None,
        season: Some(season),
        episode: Some(episode),
        kind: SearchKind::Episode,
    }
}
