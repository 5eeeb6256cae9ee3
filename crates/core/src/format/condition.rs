//! Format condition trees.
//!
//! A condition is a boolean expression over release metadata fields,
//! declared as data (TOML/JSON) and compiled into an evaluable form when
//! the format library is loaded. Regexes are compiled exactly once, at
//! load time, so a malformed pattern is a configuration error rather
//! than a per-release runtime failure.

use regex_lite::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::release::{
    AudioCodec, HdrFormat, Protocol, ReleaseMetadata, Resolution, SourceType, VideoCodec,
};

/// Errors surfaced when loading a format library.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("format id must not be empty")]
    EmptyId,

    #[error("duplicate format id: {0}")]
    DuplicateId(String),

    #[error("invalid regex in format '{format_id}': {message}")]
    InvalidRegex { format_id: String, message: String },

    #[error("empty '{list}' list in format '{format_id}'")]
    EmptyList { format_id: String, list: String },
}

/// Declarative condition over release metadata.
///
/// Conditions referencing a field the release does not carry evaluate
/// to `false`; they never error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    /// True iff every child condition is true.
    All { of: Vec<Condition> },
    /// True iff at least one child condition is true.
    Any { of: Vec<Condition> },
    /// Negation.
    Not { not: Box<Condition> },
    ResolutionIs { resolution: Resolution },
    SourceIs { source: SourceType },
    CodecIs { codec: VideoCodec },
    HdrIs { hdr: HdrFormat },
    AudioIs { audio: AudioCodec },
    ProtocolIs { protocol: Protocol },
    /// Case-insensitive regex over the full release title.
    TitleMatches { pattern: String },
    /// Case-insensitive regex over the release group.
    GroupMatches { pattern: String },
    SizeAtLeast { bytes: u64 },
    SizeAtMost { bytes: u64 },
    SeedersAtLeast { count: u32 },
    IsProper,
    IsRepack,
    Is3d,
}

/// Compiled form of a [`Condition`], ready to evaluate.
#[derive(Debug)]
pub(crate) enum CompiledCondition {
    All(Vec<CompiledCondition>),
    Any(Vec<CompiledCondition>),
    Not(Box<CompiledCondition>),
    ResolutionIs(Resolution),
    SourceIs(SourceType),
    CodecIs(VideoCodec),
    HdrIs(HdrFormat),
    AudioIs(AudioCodec),
    ProtocolIs(Protocol),
    TitleMatches(Regex),
    GroupMatches(Regex),
    SizeAtLeast(u64),
    SizeAtMost(u64),
    SeedersAtLeast(u32),
    IsProper,
    IsRepack,
    Is3d,
}

impl CompiledCondition {
    /// Compile a declarative condition, attributing failures to
    /// `format_id` for error reporting.
    pub(crate) fn compile(condition: &Condition, format_id: &str) -> Result<Self, FormatError> {
        let compiled = match condition {
            Condition::All { of } => {
                if of.is_empty() {
                    return Err(FormatError::EmptyList {
                        format_id: format_id.to_string(),
                        list: "all".to_string(),
                    });
                }
                CompiledCondition::All(
                    of.iter()
                        .map(|c| Self::compile(c, format_id))
                        .collect::<Result<_, _>>()?,
                )
            }
            Condition::Any { of } => {
                if of.is_empty() {
                    return Err(FormatError::EmptyList {
                        format_id: format_id.to_string(),
                        list: "any".to_string(),
                    });
                }
                CompiledCondition::Any(
                    of.iter()
                        .map(|c| Self::compile(c, format_id))
                        .collect::<Result<_, _>>()?,
                )
            }
            Condition::Not { not } => {
                CompiledCondition::Not(Box::new(Self::compile(not, format_id)?))
            }
            Condition::ResolutionIs { resolution } => CompiledCondition::ResolutionIs(*resolution),
            Condition::SourceIs { source } => CompiledCondition::SourceIs(*source),
            Condition::CodecIs { codec } => CompiledCondition::CodecIs(*codec),
            Condition::HdrIs { hdr } => CompiledCondition::HdrIs(*hdr),
            Condition::AudioIs { audio } => CompiledCondition::AudioIs(*audio),
            Condition::ProtocolIs { protocol } => CompiledCondition::ProtocolIs(*protocol),
            Condition::TitleMatches { pattern } => {
                CompiledCondition::TitleMatches(compile_regex(pattern, format_id)?)
            }
            Condition::GroupMatches { pattern } => {
                CompiledCondition::GroupMatches(compile_regex(pattern, format_id)?)
            }
            Condition::SizeAtLeast { bytes } => CompiledCondition::SizeAtLeast(*bytes),
            Condition::SizeAtMost { bytes } => CompiledCondition::SizeAtMost(*bytes),
            Condition::SeedersAtLeast { count } => CompiledCondition::SeedersAtLeast(*count),
            Condition::IsProper => CompiledCondition::IsProper,
            Condition::IsRepack => CompiledCondition::IsRepack,
            Condition::Is3d => CompiledCondition::Is3d,
        };
        Ok(compiled)
    }

    /// Evaluate against a release. Pure and side-effect-free.
    pub(crate) fn eval(&self, release: &ReleaseMetadata) -> bool {
        match self {
            CompiledCondition::All(children) => children.iter().all(|c| c.eval(release)),
            CompiledCondition::Any(children) => children.iter().any(|c| c.eval(release)),
            CompiledCondition::Not(inner) => !inner.eval(release),
            CompiledCondition::ResolutionIs(want) => release.resolution == Some(*want),
            CompiledCondition::SourceIs(want) => release.source_type == Some(*want),
            CompiledCondition::CodecIs(want) => release.video_codec == Some(*want),
            CompiledCondition::HdrIs(want) => release.hdr == Some(*want),
            CompiledCondition::AudioIs(want) => release.audio_codec == Some(*want),
            CompiledCondition::ProtocolIs(want) => release.protocol == *want,
            CompiledCondition::TitleMatches(re) => re.is_match(&release.title),
            CompiledCondition::GroupMatches(re) => release
                .release_group
                .as_deref()
                .map(|g| re.is_match(g))
                .unwrap_or(false),
            CompiledCondition::SizeAtLeast(bytes) => release.size_bytes >= *bytes,
            CompiledCondition::SizeAtMost(bytes) => release.size_bytes <= *bytes,
            CompiledCondition::SeedersAtLeast(count) => {
                release.seeders.map(|s| s >= *count).unwrap_or(false)
            }
            CompiledCondition::IsProper => release.proper,
            CompiledCondition::IsRepack => release.repack,
            CompiledCondition::Is3d => release.three_d,
        }
    }
}

fn compile_regex(pattern: &str, format_id: &str) -> Result<Regex, FormatError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| FormatError::InvalidRegex {
            format_id: format_id.to_string(),
            message: e.to_string(),
        })
}
