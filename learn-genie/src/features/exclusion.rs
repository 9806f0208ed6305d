//! Exclusion set resolution.

use indexmap::{IndexMap, IndexSet};

use super::definition::DeclaredExclusions;
use crate::catalog::CapabilityCatalog;

/// Field patterns ignored while diffing.
pub type ExclusionSet = IndexSet<String>;

/// Default exclusions for every feature of a catalog.
#[derive(Debug, Clone, Default)]
pub struct DefaultExclusions {
    by_feature: IndexMap<String, ExclusionSet>,
}

impl DefaultExclusions {
    /// Collect the declared exclusions of every catalog feature.
    ///
    /// Features without a declaration get an empty set; this never fails.
    pub fn collect(catalog: &CapabilityCatalog, declarations: &impl DeclaredExclusions) -> Self {
        let by_feature = catalog
            .features()
            .map(|feature| {
                let set = declarations.declared_exclusions(feature).to_set();
                (feature.to_string(), set)
            })
            .collect();
        Self { by_feature }
    }

    /// Defaults for one feature (empty when unknown).
    pub fn for_feature(&self, feature: &str) -> ExclusionSet {
        self.by_feature.get(feature).cloned().unwrap_or_default()
    }
}

/// Merge user exclusions with a feature's defaults.
///
/// | user list | override | result             |
/// |-----------|----------|--------------------|
/// | some      | false    | user ∪ defaults    |
/// | some      | true     | user               |
/// | none      | false    | defaults           |
/// | none      | true     | nothing            |
///
/// An empty user list counts as none.
pub fn resolve_exclusions(
    user: Option<&[String]>,
    defaults: &ExclusionSet,
    no_default_exclusion: bool,
) -> ExclusionSet {
    let user = user.filter(|patterns| !patterns.is_empty());

    match (user, no_default_exclusion) {
        (Some(user), false) => user.iter().cloned().chain(defaults.iter().cloned()).collect(),
        (Some(user), true) => user.iter().cloned().collect(),
        (None, false) => defaults.clone(),
        (None, true) => ExclusionSet::new(),
    }
}
