//! Format library: named detectors over release metadata.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use super::condition::{CompiledCondition, Condition, FormatError};
use crate::release::ReleaseMetadata;

/// A named format detector: a globally-unique id and the condition a
/// release must satisfy to carry the tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatDefinition {
    pub id: String,
    pub condition: Condition,
}

#[derive(Debug)]
struct CompiledFormat {
    id: String,
    condition: CompiledCondition,
}

/// A validated, compiled set of format definitions.
///
/// Loading fails fast on duplicate ids and malformed conditions; once
/// loaded, matching cannot fail. The library is immutable and safe to
/// share across threads behind an `Arc`.
#[derive(Debug)]
pub struct FormatLibrary {
    formats: Vec<CompiledFormat>,
}

impl FormatLibrary {
    /// Compile and validate a set of definitions.
    pub fn load(definitions: Vec<FormatDefinition>) -> Result<Self, FormatError> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut formats = Vec::with_capacity(definitions.len());

        for def in definitions {
            if def.id.is_empty() {
                return Err(FormatError::EmptyId);
            }
            if !seen.insert(def.id.clone()) {
                return Err(FormatError::DuplicateId(def.id));
            }
            let condition = CompiledCondition::compile(&def.condition, &def.id)?;
            formats.push(CompiledFormat {
                id: def.id,
                condition,
            });
        }

        Ok(Self { formats })
    }

    /// Evaluate every format against a release and return the matched
    /// tag set. Pure and deterministic; no ordering dependency between
    /// formats.
    pub fn matches(&self, release: &ReleaseMetadata) -> BTreeSet<String> {
        self.formats
            .iter()
            .filter(|f| f.condition.eval(release))
            .map(|f| f.id.clone())
            .collect()
    }

    /// Whether a format id exists in this library.
    pub fn contains(&self, id: &str) -> bool {
        self.formats.iter().any(|f| f.id == id)
    }

    /// All format ids, in definition order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.formats.iter().map(|f| f.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}
