//! Compiled exclusion patterns.

use regex::Regex;

use crate::error::DiffError;
use crate::features::ExclusionSet;

/// Exclusion patterns ready to be matched against object keys.
///
/// Each pattern must match a whole key. Patterns are validated as written
/// before being anchored, so a pattern cannot escape its anchors.
#[derive(Debug, Clone, Default)]
pub struct ExclusionMatcher {
    patterns: Vec<Regex>,
}

impl ExclusionMatcher {
    /// Compile every pattern of `exclusions`.
    pub fn new(exclusions: &ExclusionSet) -> Result<Self, DiffError> {
        let patterns = exclusions
            .iter()
            .map(|pattern| compile(pattern))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Whether `key` is excluded.
    pub fn is_excluded(&self, key: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(key))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn compile(pattern: &str) -> Result<Regex, DiffError> {
    let invalid = |source| DiffError::InvalidExclusion {
        pattern: pattern.to_string(),
        source,
    };

    // A pattern that parses on its own stays a single group once wrapped.
    Regex::new(pattern).map_err(invalid)?;
    Regex::new(&format!("^(?:{pattern})$")).map_err(invalid)
}
