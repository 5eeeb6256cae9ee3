//! Cross-source deduplication.
//!
//! Releases from different sources describing the same underlying
//! content collapse to one entry. Identity is the info hash when the
//! indexer reports one; otherwise a digest of the normalized title and
//! a bucketed size. The kept copy is the one with richer metadata,
//! with missing fields filled in from the duplicates.

use std::collections::HashMap;

use sha2::{Digest, Sha256};

use crate::release::ReleaseMetadata;

/// Size bucket width for the fallback dedup key. Two listings of the
/// same content from different sources rarely disagree by more than a
/// rounding error; 50 MiB buckets absorb that.
const SIZE_BUCKET_BYTES: u64 = 50 * 1024 * 1024;

/// Deduplicate raw releases, deterministically.
///
/// Input is sorted first so the outcome does not depend on source
/// completion order. The returned order is the deterministic scan
/// order, not a ranking.
pub(crate) fn deduplicate(mut raw: Vec<ReleaseMetadata>) -> Vec<ReleaseMetadata> {
    // Stable identity regardless of which source answered first
    raw.sort_by(|a, b| {
        a.indexer
            .cmp(&b.indexer)
            .then_with(|| a.title.cmp(&b.title))
            .then_with(|| a.size_bytes.cmp(&b.size_bytes))
    });

    let mut order: Vec<String> = Vec::new();
    let mut by_key: HashMap<String, ReleaseMetadata> = HashMap::new();

    for release in raw {
        let key = dedup_key(&release);
        match by_key.get_mut(&key) {
            Some(existing) => {
                if richness(&release) > richness(existing) {
                    let poorer = std::mem::replace(existing, release);
                    fill_missing(existing, &poorer);
                } else {
                    fill_missing(existing, &release);
                }
            }
            None => {
                order.push(key.clone());
                by_key.insert(key, release);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|key| by_key.remove(&key))
        .collect()
}

/// Identity key for a release.
pub(crate) fn dedup_key(release: &ReleaseMetadata) -> String {
    if let Some(hash) = release.info_hash.as_deref().filter(|h| !h.is_empty()) {
        return format!("hash:{}", hash.to_lowercase());
    }

    let mut hasher = Sha256::new();
    hasher.update(normalize_title(&release.title));
    hasher.update([0u8]);
    hasher.update((release.size_bytes / SIZE_BUCKET_BYTES).to_le_bytes());
    format!("key:{:x}", hasher.finalize())
}

/// Lowercased, alphanumeric-only view of a title. "Some.Movie.2024"
/// and "some movie 2024" collapse to the same key; year and episode
/// markers embedded in the title stay part of it.
fn normalize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// How much metadata a copy carries. Used to pick the kept copy when
/// merging duplicates.
fn richness(release: &ReleaseMetadata) -> u32 {
    let mut n = 0;
    n += release.seeders.is_some() as u32;
    n += release.leechers.is_some() as u32;
    n += release.resolution.is_some() as u32;
    n += release.source_type.is_some() as u32;
    n += release.video_codec.is_some() as u32;
    n += release.hdr.is_some() as u32;
    n += release.audio_codec.is_some() as u32;
    n += release.release_group.is_some() as u32;
    n += release.info_hash.is_some() as u32;
    n += release.download_uri.is_some() as u32;
    n += release.publish_date.is_some() as u32;
    n
}

/// Copy fields the kept release lacks from a duplicate.
fn fill_missing(kept: &mut ReleaseMetadata, other: &ReleaseMetadata) {
    if kept.seeders.is_none() {
        kept.seeders = other.seeders;
    }
    if kept.leechers.is_none() {
        kept.leechers = other.leechers;
    }
    if kept.resolution.is_none() {
        kept.resolution = other.resolution;
    }
    if kept.source_type.is_none() {
        kept.source_type = other.source_type;
    }
    if kept.video_codec.is_none() {
        kept.video_codec = other.video_codec;
    }
    if kept.hdr.is_none() {
        kept.hdr = other.hdr;
    }
    if kept.audio_codec.is_none() {
        kept.audio_codec = other.audio_codec;
    }
    if kept.release_group.is_none() {
        kept.release_group = other.release_group.clone();
    }
    if kept.info_hash.is_none() {
        kept.info_hash = other.info_hash.clone();
    }
    if kept.download_uri.is_none() {
        kept.download_uri = other.download_uri.clone();
    }
    match (kept.publish_date, other.publish_date) {
        (None, Some(date)) => kept.publish_date = Some(date),
        (Some(ours), Some(theirs)) if theirs < ours => kept.publish_date = Some(theirs),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::release::Resolution;
    use crate::testing::fixtures;

    fn from_indexer(title: &str, indexer: &str, size: u64) -> ReleaseMetadata {
        let mut r = fixtures::release(title);
        r.indexer = indexer.to_string();
        r.size_bytes = size;
        r
    }

    #[test]
    fn test_identical_hash_collapses() {
        let mut a = from_indexer("Movie A", "indexer-1", 1_000_000_000);
        a.info_hash = Some("ABC123".to_string());
        let mut b = from_indexer("Movie A (mirror)", "indexer-2", 1_000_000_123);
        b.info_hash = Some("abc123".to_string());

        let result = deduplicate(vec![a, b]);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_same_normalized_title_and_size_collapses() {
        let a = from_indexer("Some.Movie.2024.1080p", "indexer-1", 4_000_000_000);
        let b = from_indexer("some movie 2024 1080p", "indexer-2", 4_000_000_000);

        let result = deduplicate(vec![a, b]);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_different_size_stays_separate() {
        let a = from_indexer("Some.Movie.2024.1080p", "indexer-1", 4_000_000_000);
        let b = from_indexer("Some.Movie.2024.1080p", "indexer-2", 9_000_000_000);

        let result = deduplicate(vec![a, b]);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_richer_copy_preferred() {
        // indexer-1's copy knows nothing; indexer-2's knows seeders and
        // resolution
        let poor = from_indexer("Some.Movie.2024", "indexer-1", 4_000_000_000);
        let mut rich = from_indexer("Some.Movie.2024", "indexer-2", 4_000_000_000);
        rich.seeders = Some(42);
        rich.resolution = Some(Resolution::R1080p);

        let result = deduplicate(vec![poor, rich]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].seeders, Some(42));
        assert_eq!(result[0].indexer, "indexer-2");
    }

    #[test]
    fn test_missing_fields_filled_from_duplicate() {
        let mut a = from_indexer("Some.Movie.2024", "indexer-1", 4_000_000_000);
        a.seeders = Some(10);
        a.resolution = Some(Resolution::R1080p);
        let mut b = from_indexer("Some.Movie.2024", "indexer-2", 4_000_000_000);
        b.download_uri = Some("magnet:?xt=urn:btih:abc".to_string());

        let result = deduplicate(vec![a, b]);
        assert_eq!(result.len(), 1);
        // Kept the richer copy, filled in the magnet from the other
        assert_eq!(result[0].seeders, Some(10));
        assert_eq!(
            result[0].download_uri.as_deref(),
            Some("magnet:?xt=urn:btih:abc")
        );
    }

    #[test]
    fn test_deterministic_regardless_of_input_order() {
        let mut a = from_indexer("Some.Movie.2024", "indexer-1", 4_000_000_000);
        a.seeders = Some(10);
        let mut b = from_indexer("Some.Movie.2024", "indexer-2", 4_000_000_000);
        b.seeders = Some(20);
        b.resolution = Some(Resolution::R1080p);

        let forward = deduplicate(vec![a.clone(), b.clone()]);
        let backward = deduplicate(vec![b, a]);

        assert_eq!(forward.len(), 1);
        assert_eq!(backward.len(), 1);
        assert_eq!(forward[0].indexer, backward[0].indexer);
        assert_eq!(forward[0].seeders, backward[0].seeders);
    }

    #[test]
    fn test_distinct_titles_kept() {
        let a = from_indexer("Movie One 2024", "indexer-1", 4_000_000_000);
        let b = from_indexer("Movie Two 2024", "indexer-1", 4_000_000_000);
        let result = deduplicate(vec![a, b]);
        assert_eq!(result.len(), 2);
    }
}
