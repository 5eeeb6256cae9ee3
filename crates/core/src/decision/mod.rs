//! Decision policy: accept/reject/upgrade.
//!
//! Evaluation of each candidate short-circuits on the first rejection,
//! in a fixed order: protocol filter, banned check, size bounds,
//! minimum score floor. Survivors are ranked (score, then the profile's
//! resolution preference, then seeders, then discovery order) and the
//! top candidate is judged against any existing file's score by the
//! upgrade gate.
//!
//! An empty accepted list is a normal outcome. Internally inconsistent
//! profiles are applied as written; profile sanity is a load-time
//! concern, not this module's.

mod types;

pub use types::{Evaluation, RejectionReason, ScoredRelease, UpgradeDecision, Verdict};

use std::cmp::Ordering;

use tracing::debug;

use crate::format::FormatLibrary;
use crate::metrics;
use crate::profile::{ScoringProfile, SizeViolation};
use crate::release::{MediaType, ReleaseMetadata};
use crate::scoring;

/// Evaluate candidates against a profile and, optionally, an existing
/// file's score.
///
/// Pure and idempotent: identical inputs yield identical output,
/// including ordering.
pub fn evaluate_candidates(
    releases: &[ReleaseMetadata],
    library: &FormatLibrary,
    profile: &ScoringProfile,
    media_type: MediaType,
    existing_file_score: Option<i64>,
) -> Evaluation {
    let mut accepted: Vec<ScoredRelease> = Vec::new();
    let mut rejected: Vec<ScoredRelease> = Vec::new();

    for release in releases {
        let tags = library.matches(release);
        let outcome = scoring::score(&tags, profile);

        let rejection = first_rejection(release, &tags, outcome, profile, media_type);

        let scored = ScoredRelease {
            release: release.clone(),
            matched_formats: tags,
            total_score: outcome.total,
            verdict: if rejection.is_some() {
                Verdict::Reject
            } else {
                Verdict::Accept
            },
            rejection,
        };

        match scored.verdict {
            Verdict::Reject => {
                if let Some(reason) = &scored.rejection {
                    metrics::REJECTIONS_TOTAL
                        .with_label_values(&[reason.label()])
                        .inc();
                }
                rejected.push(scored);
            }
            _ => accepted.push(scored),
        }
    }

    // Rank survivors. The sort is stable, so full ties keep discovery
    // order.
    accepted.sort_by(|a, b| rank(a, b, profile));

    let mut selected = accepted.first().cloned();

    let upgrade = match existing_file_score {
        None => UpgradeDecision::NotRequested,
        Some(existing) => match &selected {
            None => UpgradeDecision::NoCandidates,
            Some(best) => upgrade_gate(existing, best.total_score, profile),
        },
    };

    if upgrade.is_approved() {
        if let Some(best) = accepted.first_mut() {
            best.verdict = Verdict::UpgradeCandidate;
        }
        if let Some(best) = selected.as_mut() {
            best.verdict = Verdict::UpgradeCandidate;
        }
    }

    metrics::EVALUATIONS_TOTAL
        .with_label_values(&[if accepted.is_empty() {
            "empty"
        } else {
            "selected"
        }])
        .inc();
    metrics::UPGRADE_DECISIONS
        .with_label_values(&[upgrade.label()])
        .inc();

    debug!(
        candidates = releases.len(),
        accepted = accepted.len(),
        rejected = rejected.len(),
        profile = %profile.id,
        upgrade = upgrade.label(),
        "Candidate evaluation complete"
    );

    Evaluation {
        accepted,
        rejected,
        selected,
        upgrade,
    }
}

/// Apply the rejection checks in evaluation order, returning the first
/// failure.
fn first_rejection(
    release: &ReleaseMetadata,
    tags: &std::collections::BTreeSet<String>,
    outcome: scoring::ScoreOutcome,
    profile: &ScoringProfile,
    media_type: MediaType,
) -> Option<RejectionReason> {
    if !profile.allowed_protocols.contains(&release.protocol) {
        return Some(RejectionReason::ProtocolNotAllowed {
            protocol: release.protocol,
        });
    }

    if outcome.banned_hit {
        let format_id = scoring::first_banned_tag(tags, profile)
            .unwrap_or_default()
            .to_string();
        return Some(RejectionReason::BannedFormat { format_id });
    }

    match profile.size_bounds.violation(media_type, release.size_bytes) {
        Some(SizeViolation::TooSmall) => {
            return Some(RejectionReason::TooSmall {
                size_bytes: release.size_bytes,
            })
        }
        Some(SizeViolation::TooLarge) => {
            return Some(RejectionReason::TooLarge {
                size_bytes: release.size_bytes,
            })
        }
        None => {}
    }

    if outcome.total < profile.min_score {
        return Some(RejectionReason::BelowMinScore {
            total: outcome.total,
            min_score: profile.min_score,
        });
    }

    None
}

/// Ranking: total score descending, then the profile's resolution
/// preference, then seeders descending. Discovery order breaks any
/// remaining tie via stable sort.
fn rank(a: &ScoredRelease, b: &ScoredRelease, profile: &ScoringProfile) -> Ordering {
    b.total_score
        .cmp(&a.total_score)
        .then_with(|| {
            profile
                .resolution_rank(a.release.resolution)
                .cmp(&profile.resolution_rank(b.release.resolution))
        })
        .then_with(|| {
            b.release
                .seeders
                .unwrap_or(0)
                .cmp(&a.release.seeders.unwrap_or(0))
        })
}

/// The upgrade gate: approved iff upgrades are allowed, the existing
/// file is below the ceiling, and the candidate clears the minimum
/// increment.
fn upgrade_gate(existing: i64, candidate: i64, profile: &ScoringProfile) -> UpgradeDecision {
    if !profile.upgrades_allowed {
        return UpgradeDecision::UpgradesDisabled;
    }
    if existing >= profile.upgrade_until_score {
        return UpgradeDecision::AlreadyAtCeiling {
            existing_score: existing,
            upgrade_until_score: profile.upgrade_until_score,
        };
    }
    if candidate - existing < profile.min_score_increment {
        return UpgradeDecision::InsufficientIncrement {
            existing_score: existing,
            candidate_score: candidate,
            required_increment: profile.min_score_increment,
        };
    }
    UpgradeDecision::Approved {
        existing_score: existing,
        candidate_score: candidate,
    }
}
