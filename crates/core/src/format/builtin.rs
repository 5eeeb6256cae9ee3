//! Built-in format definitions.
//!
//! These cover the detectors a stock install needs: resolution and
//! source tiers, HDR variants, audio codecs, release-group tiers and
//! junk detectors. User-defined formats from configuration are loaded
//! alongside them.

use once_cell::sync::Lazy;

use super::condition::Condition;
use super::library::{FormatDefinition, FormatLibrary};
use crate::release::{AudioCodec, HdrFormat, Resolution, SourceType, VideoCodec};

fn resolution(id: &str, resolution: Resolution) -> FormatDefinition {
    FormatDefinition {
        id: id.to_string(),
        condition: Condition::ResolutionIs { resolution },
    }
}

fn source(id: &str, source: SourceType) -> FormatDefinition {
    FormatDefinition {
        id: id.to_string(),
        condition: Condition::SourceIs { source },
    }
}

fn codec(id: &str, codec: VideoCodec) -> FormatDefinition {
    FormatDefinition {
        id: id.to_string(),
        condition: Condition::CodecIs { codec },
    }
}

fn hdr(id: &str, hdr: HdrFormat) -> FormatDefinition {
    FormatDefinition {
        id: id.to_string(),
        condition: Condition::HdrIs { hdr },
    }
}

fn audio(id: &str, audio: AudioCodec) -> FormatDefinition {
    FormatDefinition {
        id: id.to_string(),
        condition: Condition::AudioIs { audio },
    }
}

fn group(id: &str, pattern: &str) -> FormatDefinition {
    FormatDefinition {
        id: id.to_string(),
        condition: Condition::GroupMatches {
            pattern: pattern.to_string(),
        },
    }
}

/// The stock format definitions.
pub fn builtin_formats() -> Vec<FormatDefinition> {
    vec![
        // Resolution tiers
        resolution("2160p", Resolution::R2160p),
        resolution("1080p", Resolution::R1080p),
        resolution("720p", Resolution::R720p),
        resolution("576p", Resolution::R576p),
        resolution("480p", Resolution::R480p),
        // Source tiers
        source("remux", SourceType::Remux),
        source("bluray", SourceType::BluRay),
        source("web-dl", SourceType::WebDl),
        source("webrip", SourceType::WebRip),
        source("hdtv", SourceType::Hdtv),
        source("dvd", SourceType::Dvd),
        // Junk sources: cam and telesync match on parsed source type or
        // on telltale title markers the parser may have missed
        FormatDefinition {
            id: "cam".to_string(),
            condition: Condition::Any {
                of: vec![
                    Condition::SourceIs {
                        source: SourceType::Cam,
                    },
                    Condition::TitleMatches {
                        pattern: r"\b(cam(rip)?|hdcam)\b".to_string(),
                    },
                ],
            },
        },
        FormatDefinition {
            id: "telesync".to_string(),
            condition: Condition::Any {
                of: vec![
                    Condition::SourceIs {
                        source: SourceType::Telesync,
                    },
                    Condition::TitleMatches {
                        pattern: r"\b(telesync|hd-?ts|ts-?rip)\b".to_string(),
                    },
                ],
            },
        },
        source("telecine", SourceType::Telecine),
        // HDR variants
        hdr("hdr-dolby-vision", HdrFormat::DolbyVision),
        hdr("hdr10-plus", HdrFormat::Hdr10Plus),
        hdr("hdr10", HdrFormat::Hdr10),
        hdr("hlg", HdrFormat::Hlg),
        // Video codecs
        codec("av1", VideoCodec::Av1),
        codec("x265", VideoCodec::H265),
        codec("x264", VideoCodec::H264),
        codec("xvid", VideoCodec::Xvid),
        // Audio tiers
        audio("atmos", AudioCodec::Atmos),
        audio("truehd", AudioCodec::TrueHd),
        audio("dts-hd", AudioCodec::DtsHd),
        audio("dts", AudioCodec::Dts),
        audio("eac3", AudioCodec::Eac3),
        audio("ac3", AudioCodec::Ac3),
        audio("flac-audio", AudioCodec::Flac),
        audio("opus-audio", AudioCodec::Opus),
        audio("aac", AudioCodec::Aac),
        audio("mp3-audio", AudioCodec::Mp3),
        // Flags
        FormatDefinition {
            id: "proper".to_string(),
            condition: Condition::IsProper,
        },
        FormatDefinition {
            id: "repack".to_string(),
            condition: Condition::IsRepack,
        },
        FormatDefinition {
            id: "3d".to_string(),
            condition: Condition::Is3d,
        },
        // Release-group tiers
        group(
            "remux-tier-group",
            r"^(framestor|ctrlhd|flux|wildcat|bhdstudio)$",
        ),
        group(
            "scene-tier-group",
            r"^(sparks|amiable|rovers|geckos|drones)$",
        ),
        group("micro-encode-group", r"^(yify|yts(\.[a-z]+)?|x0r|galaxyrg|psa)$"),
        // Upscale detector: UHD resolution claimed from a non-UHD source
        FormatDefinition {
            id: "upscaled".to_string(),
            condition: Condition::Any {
                of: vec![
                    Condition::TitleMatches {
                        pattern: r"\bupscal".to_string(),
                    },
                    Condition::All {
                        of: vec![
                            Condition::ResolutionIs {
                                resolution: Resolution::R2160p,
                            },
                            Condition::Any {
                                of: vec![
                                    Condition::SourceIs {
                                        source: SourceType::Hdtv,
                                    },
                                    Condition::SourceIs {
                                        source: SourceType::Dvd,
                                    },
                                ],
                            },
                        ],
                    },
                ],
            },
        },
    ]
}

/// Compiled library of the built-in formats.
pub static BUILTIN_LIBRARY: Lazy<FormatLibrary> =
    Lazy::new(|| FormatLibrary::load(builtin_formats()).expect("built-in formats are valid"));
