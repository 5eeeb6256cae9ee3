//! Format detection.
//!
//! A "format" is a named, boolean-detectable attribute of a release
//! (a specific HDR type, a release group tier, a junk marker). Formats
//! are declared as condition trees over release metadata, compiled and
//! validated when the library is loaded, and evaluated per release to
//! produce the tag set the scoring engine consumes.

mod builtin;
mod condition;
mod library;

pub use builtin::{builtin_formats, BUILTIN_LIBRARY};
pub use condition::{Condition, FormatError};
pub use library::{FormatDefinition, FormatLibrary};
