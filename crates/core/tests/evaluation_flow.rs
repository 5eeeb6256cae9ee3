//! End-to-end evaluation tests: aggregate with mock sources, then
//! score and decide with real profiles.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use screenpick_core::testing::{fixtures, MockSource};
use screenpick_core::{
    builtin_profile, evaluate_candidates, Condition, Config, Engine, FormatDefinition,
    FormatLibrary, FormatScore, MediaType, Protocol, RejectionReason, Resolution, ScoringProfile,
    SizeBounds, Source, SourceType, UpgradeDecision, Verdict, VideoCodec,
};

fn profile_with(
    scores: &[(&str, FormatScore)],
    min_increment: i64,
    upgrade_until: i64,
) -> ScoringProfile {
    ScoringProfile {
        id: "test".to_string(),
        name: "Test".to_string(),
        format_scores: scores
            .iter()
            .map(|(id, s)| (id.to_string(), *s))
            .collect::<HashMap<_, _>>(),
        resolution_order: vec![Resolution::R2160p, Resolution::R1080p, Resolution::R720p],
        upgrades_allowed: true,
        min_score: 0,
        upgrade_until_score: upgrade_until,
        min_score_increment: min_increment,
        allowed_protocols: HashSet::from([Protocol::Torrent, Protocol::Usenet]),
        size_bounds: SizeBounds::default(),
    }
}

/// Library with two detectors driven purely by title markers, so tests
/// can hit exact score totals.
fn marker_library() -> FormatLibrary {
    FormatLibrary::load(vec![
        FormatDefinition {
            id: "2160p-remux".to_string(),
            condition: Condition::TitleMatches {
                pattern: r"\bremux\b".to_string(),
            },
        },
        FormatDefinition {
            id: "banned-cam".to_string(),
            condition: Condition::TitleMatches {
                pattern: r"\bcam\b".to_string(),
            },
        },
    ])
    .unwrap()
}

#[test]
fn test_banned_is_absolute() {
    // Profile: {"2160p-remux": 25000, "banned-cam": banned}
    let profile = profile_with(
        &[
            ("2160p-remux", FormatScore::Points(25_000)),
            ("banned-cam", FormatScore::Banned),
        ],
        500,
        50_000,
    );
    let library = marker_library();

    let clean = fixtures::release("Movie.2024.REMUX");
    let tainted = fixtures::release("Movie.2024.REMUX.CAM");

    let eval = evaluate_candidates(
        &[clean, tainted],
        &library,
        &profile,
        MediaType::Movie,
        None,
    );

    // The clean remux scores 25000 and is accepted
    assert_eq!(eval.accepted.len(), 1);
    assert_eq!(eval.accepted[0].total_score, 25_000);
    assert_eq!(eval.accepted[0].release.title, "Movie.2024.REMUX");

    // The tainted one is rejected despite the positive tag
    assert_eq!(eval.rejected.len(), 1);
    assert_eq!(
        eval.rejected[0].rejection,
        Some(RejectionReason::BannedFormat {
            format_id: "banned-cam".to_string()
        })
    );
}

#[test]
fn test_upgrade_increment_boundary() {
    let library = marker_library();
    let existing = Some(10_000);

    // Candidate totalling 10400: 400 < 500, upgrade rejected
    let profile = profile_with(&[("2160p-remux", FormatScore::Points(10_400))], 500, 50_000);
    let eval = evaluate_candidates(
        &[fixtures::release("Movie REMUX")],
        &library,
        &profile,
        MediaType::Movie,
        existing,
    );
    assert_eq!(
        eval.upgrade,
        UpgradeDecision::InsufficientIncrement {
            existing_score: 10_000,
            candidate_score: 10_400,
            required_increment: 500,
        }
    );
    // The candidate is reported, not silently dropped
    assert_eq!(eval.accepted.len(), 1);

    // Candidate totalling 10500: exactly 500, upgrade approved
    let profile = profile_with(&[("2160p-remux", FormatScore::Points(10_500))], 500, 50_000);
    let eval = evaluate_candidates(
        &[fixtures::release("Movie REMUX")],
        &library,
        &profile,
        MediaType::Movie,
        existing,
    );
    assert!(eval.upgrade.is_approved());
    assert_eq!(eval.selected.unwrap().verdict, Verdict::UpgradeCandidate);
}

#[test]
fn test_upgrade_ceiling_stops_chasing() {
    let library = marker_library();
    let profile = profile_with(&[("2160p-remux", FormatScore::Points(30_000))], 500, 12_000);

    let eval = evaluate_candidates(
        &[fixtures::release("Movie REMUX")],
        &library,
        &profile,
        MediaType::Movie,
        Some(12_000),
    );
    assert_eq!(
        eval.upgrade,
        UpgradeDecision::AlreadyAtCeiling {
            existing_score: 12_000,
            upgrade_until_score: 12_000,
        }
    );
}

#[tokio::test]
async fn test_search_then_evaluate_with_builtin_profile() {
    // Two indexers: one lists a 1080p BluRay and a cam rip, the other
    // a 2160p remux
    let a = MockSource::named("indexer-a");
    let mut cam = fixtures::release("Movie.2024.HDCAM.x264");
    cam.source_type = Some(SourceType::Cam);
    a.set_results(vec![
        fixtures::bluray_1080p("Movie.2024.1080p.BluRay.x264", "indexer-a", 80),
        cam,
    ])
    .await;

    let b = MockSource::named("indexer-b");
    b.set_results(vec![fixtures::remux_2160p(
        "Movie.2024.2160p.REMUX",
        "indexer-b",
    )])
    .await;

    let sources: Vec<Arc<dyn Source>> = vec![Arc::new(a), Arc::new(b)];
    let engine = Engine::new(&Config::default(), sources).unwrap();

    let criteria = fixtures::movie_criteria("Movie", 2024);
    let result = engine
        .aggregate_search(&criteria, Some(Duration::from_secs(5)))
        .await;
    assert_eq!(result.releases.len(), 3);

    let profile = builtin_profile("quality-first").unwrap();
    let eval = engine.evaluate_candidates(
        &result.releases,
        profile,
        criteria.media_type(),
        None,
    );

    // The cam rip is banned, the remux wins over the bluray
    assert_eq!(eval.accepted.len(), 2);
    assert_eq!(eval.rejected.len(), 1);
    assert!(matches!(
        eval.rejected[0].rejection,
        Some(RejectionReason::BannedFormat { .. })
    ));
    let selected = eval.selected.unwrap();
    assert_eq!(selected.release.title, "Movie.2024.2160p.REMUX");
    assert!(selected.matched_formats.contains("remux"));
    assert!(selected.matched_formats.contains("2160p"));
}

#[tokio::test]
async fn test_space_saver_inverts_the_choice() {
    // Same candidates, opposite philosophy: the compact profile must
    // prefer the 1080p encode and reject the 60 GB remux on size
    let a = MockSource::named("indexer-a");
    let mut encode = fixtures::bluray_1080p("Movie.2024.1080p.WEB-DL.x265", "indexer-a", 40);
    encode.source_type = Some(SourceType::WebDl);
    encode.video_codec = Some(VideoCodec::H265);
    encode.size_bytes = 3_000_000_000;
    a.set_results(vec![
        encode,
        fixtures::remux_2160p("Movie.2024.2160p.REMUX", "indexer-a"),
    ])
    .await;

    let sources: Vec<Arc<dyn Source>> = vec![Arc::new(a)];
    let engine = Engine::new(&Config::default(), sources).unwrap();

    let criteria = fixtures::movie_criteria("Movie", 2024);
    let result = engine
        .aggregate_search(&criteria, Some(Duration::from_secs(5)))
        .await;

    let profile = builtin_profile("space-saver").unwrap();
    let eval = engine.evaluate_candidates(
        &result.releases,
        profile,
        criteria.media_type(),
        None,
    );

    let selected = eval.selected.unwrap();
    assert_eq!(selected.release.title, "Movie.2024.1080p.WEB-DL.x265");
    // The remux blew the 10 GB movie cap
    assert!(eval
        .rejected
        .iter()
        .any(|r| matches!(r.rejection, Some(RejectionReason::TooLarge { .. }))));
}

#[test]
fn test_evaluation_idempotent_over_aggregated_input() {
    let library = marker_library();
    let profile = profile_with(
        &[
            ("2160p-remux", FormatScore::Points(5000)),
            ("banned-cam", FormatScore::Banned),
        ],
        500,
        50_000,
    );

    let releases = vec![
        fixtures::release("A REMUX"),
        fixtures::release("B REMUX"),
        fixtures::release("C plain"),
    ];

    let first = evaluate_candidates(&releases, &library, &profile, MediaType::Movie, Some(1000));
    let second = evaluate_candidates(&releases, &library, &profile, MediaType::Movie, Some(1000));

    let order = |eval: &screenpick_core::Evaluation| {
        eval.accepted
            .iter()
            .map(|s| s.release.title.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(order(&first), order(&second));
    assert_eq!(
        first.selected.as_ref().map(|s| s.release.title.as_str()),
        second.selected.as_ref().map(|s| s.release.title.as_str())
    );
    assert_eq!(first.upgrade, second.upgrade);
}

#[test]
fn test_protocol_allow_list() {
    let library = marker_library();
    let mut profile = profile_with(&[("2160p-remux", FormatScore::Points(5000))], 500, 50_000);
    profile.allowed_protocols = HashSet::from([Protocol::Usenet]);

    let torrent = fixtures::release("Movie REMUX"); // fixtures default to torrent
    let mut usenet = fixtures::release("Movie REMUX nzb");
    usenet.protocol = Protocol::Usenet;

    let eval = evaluate_candidates(
        &[torrent, usenet],
        &library,
        &profile,
        MediaType::Movie,
        None,
    );

    assert_eq!(eval.accepted.len(), 1);
    assert_eq!(eval.accepted[0].release.protocol, Protocol::Usenet);
    assert_eq!(
        eval.rejected[0].rejection,
        Some(RejectionReason::ProtocolNotAllowed {
            protocol: Protocol::Torrent
        })
    );
}
