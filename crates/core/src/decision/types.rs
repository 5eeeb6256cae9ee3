//! Types for candidate evaluation outcomes.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::release::{Protocol, ReleaseMetadata};

/// Per-candidate verdict.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Accept,
    Reject,
    UpgradeCandidate,
}

/// Why a candidate was rejected. Banned hits are deliberately distinct
/// from low scores so the UI can tell the user "this is banned" rather
/// than "this scored poorly".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectionReason {
    ProtocolNotAllowed {
        protocol: Protocol,
    },
    BannedFormat {
        format_id: String,
    },
    TooSmall {
        size_bytes: u64,
    },
    TooLarge {
        size_bytes: u64,
    },
    BelowMinScore {
        total: i64,
        min_score: i64,
    },
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectionReason::ProtocolNotAllowed { protocol } => {
                write!(f, "protocol '{protocol}' is not allowed by the profile")
            }
            RejectionReason::BannedFormat { format_id } => {
                write!(f, "release matches banned format '{format_id}'")
            }
            RejectionReason::TooSmall { size_bytes } => {
                write!(f, "release is too small ({size_bytes} bytes)")
            }
            RejectionReason::TooLarge { size_bytes } => {
                write!(f, "release is too large ({size_bytes} bytes)")
            }
            RejectionReason::BelowMinScore { total, min_score } => {
                write!(f, "score {total} is below the profile minimum {min_score}")
            }
        }
    }
}

impl RejectionReason {
    /// Stable label for metrics and logs.
    pub fn label(&self) -> &'static str {
        match self {
            RejectionReason::ProtocolNotAllowed { .. } => "protocol_not_allowed",
            RejectionReason::BannedFormat { .. } => "banned_format",
            RejectionReason::TooSmall { .. } => "too_small",
            RejectionReason::TooLarge { .. } => "too_large",
            RejectionReason::BelowMinScore { .. } => "below_min_score",
        }
    }
}

/// A release with its matched tags, total score and verdict. Created
/// per evaluation call, never persisted by this subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredRelease {
    pub release: ReleaseMetadata,
    pub matched_formats: BTreeSet<String>,
    pub total_score: i64,
    pub verdict: Verdict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection: Option<RejectionReason>,
}

/// Outcome of the upgrade gate. Lets the caller distinguish "no
/// candidates at all" from "candidates exist but do not clear the bar".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum UpgradeDecision {
    /// No existing file score was supplied; this was a fresh decision.
    NotRequested,
    /// No candidate survived filtering.
    NoCandidates,
    Approved {
        existing_score: i64,
        candidate_score: i64,
    },
    UpgradesDisabled,
    /// The existing file already meets the profile's upgrade ceiling.
    AlreadyAtCeiling {
        existing_score: i64,
        upgrade_until_score: i64,
    },
    /// The best candidate does not beat the existing file by the
    /// required increment.
    InsufficientIncrement {
        existing_score: i64,
        candidate_score: i64,
        required_increment: i64,
    },
}

impl UpgradeDecision {
    pub fn is_approved(&self) -> bool {
        matches!(self, UpgradeDecision::Approved { .. })
    }

    /// Stable label for metrics and logs.
    pub fn label(&self) -> &'static str {
        match self {
            UpgradeDecision::NotRequested => "not_requested",
            UpgradeDecision::NoCandidates => "no_candidates",
            UpgradeDecision::Approved { .. } => "approved",
            UpgradeDecision::UpgradesDisabled => "upgrades_disabled",
            UpgradeDecision::AlreadyAtCeiling { .. } => "already_at_ceiling",
            UpgradeDecision::InsufficientIncrement { .. } => "insufficient_increment",
        }
    }
}

/// Full result of evaluating a candidate list against a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    /// Survivors, best first.
    pub accepted: Vec<ScoredRelease>,
    /// Rejected candidates with their reasons.
    pub rejected: Vec<ScoredRelease>,
    /// The winning candidate, when any survived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<ScoredRelease>,
    pub upgrade: UpgradeDecision,
}

impl Evaluation {
    /// Normal "nothing acceptable found this cycle" outcome.
    pub fn is_empty_cycle(&self) -> bool {
        self.accepted.is_empty()
    }
}
