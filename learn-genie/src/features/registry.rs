//! Registry of feature definitions.

use std::collections::HashMap;

use super::builtin;
use super::definition::{Declaration, DeclaredExclusions, FeatureDefinition};

/// Registry for feature definitions.
///
/// Built per invocation; there is no process-wide instance.
#[derive(Debug, Default, Clone)]
pub struct FeatureRegistry {
    features: HashMap<String, FeatureDefinition>,
}

impl FeatureRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            features: HashMap::new(),
        }
    }

    /// Registry preloaded with the definitions of the Genie ops library.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for feature in builtin::definitions() {
            registry.register(feature);
        }
        registry
    }

    /// Register a definition, replacing any previous one of the same name.
    pub fn register(&mut self, feature: FeatureDefinition) -> Option<FeatureDefinition> {
        self.features.insert(feature.name.clone(), feature)
    }

    /// Get a definition by name.
    pub fn get(&self, name: &str) -> Option<&FeatureDefinition> {
        self.features.get(name)
    }

    /// Check if a feature is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.features.contains_key(name)
    }

    /// List all registered feature names.
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.features.keys()
    }
}

impl DeclaredExclusions for FeatureRegistry {
    fn declared_exclusions(&self, feature: &str) -> Declaration<'_> {
        match self.features.get(feature) {
            Some(definition) => Declaration::Declared(&definition.exclusions),
            None => Declaration::Undeclared,
        }
    }
}
