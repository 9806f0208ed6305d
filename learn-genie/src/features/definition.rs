//! Feature definition and the exclusion capability.

use indexmap::IndexSet;

/// Anything that can answer which fields a feature ignores by default.
pub trait DeclaredExclusions {
    /// The declaration for `feature`, or [`Declaration::Undeclared`].
    fn declared_exclusions(&self, feature: &str) -> Declaration<'_>;
}

/// Result of asking for a feature's default exclusions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declaration<'a> {
    /// The feature declares these patterns.
    Declared(&'a IndexSet<String>),

    /// Nothing is known about the feature.
    Undeclared,
}

impl Declaration<'_> {
    /// The declared patterns; undeclared features have none.
    pub fn to_set(&self) -> IndexSet<String> {
        match self {
            Self::Declared(patterns) => (*patterns).clone(),
            Self::Undeclared => IndexSet::new(),
        }
    }
}

/// Definition of one learnable feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureDefinition {
    /// Feature name as Genie spells it (e.g., "bgp", "interface").
    pub name: String,

    /// Field patterns ignored by default when diffing this feature.
    pub exclusions: IndexSet<String>,
}

impl FeatureDefinition {
    /// Create a definition with no exclusions.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exclusions: IndexSet::new(),
        }
    }

    /// Add one exclusion pattern.
    pub fn with_exclusion(mut self, pattern: impl Into<String>) -> Self {
        self.exclusions.insert(pattern.into());
        self
    }

    /// Add several exclusion patterns.
    pub fn with_exclusions<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusions.extend(patterns.into_iter().map(Into::into));
        self
    }
}
