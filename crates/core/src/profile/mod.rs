//! Scoring profiles.
//!
//! A profile maps format tags to point values and carries the
//! acceptance and upgrade thresholds the decision policy applies.
//! Profiles are immutable snapshots passed into evaluation calls; there
//! is no global profile registry.

mod builtin;
mod types;

pub use builtin::{builtin_profile, BUILTIN_PROFILES};
pub use types::{
    FormatScore, ScoringProfile, SizeBounds, SizeViolation, LEGACY_BANNED_SENTINEL,
};
