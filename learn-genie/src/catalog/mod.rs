//! Capability catalog: which features Genie can learn, and on which OS.
//!
//! The catalog is read from the `ops.json` manifest that ships with the
//! `genie.libs.ops` package. It is loaded once per invocation and
//! consulted before any device is contacted.

mod manifest;

pub use manifest::{DISCOVERY_SCRIPT, locate_manifest};

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::CatalogError;
use crate::params::OsTag;

/// Support metadata for one feature on one OS (opaque).
pub type SupportInfo = Value;

/// Platform entry of a manifest feature, as written.
#[derive(Deserialize)]
#[serde(untagged)]
enum Platforms {
    Table(IndexMap<String, SupportInfo>),
    Other(Value),
}

/// Mapping of feature name to supported OS tags.
#[derive(Debug, Clone, Default)]
pub struct CapabilityCatalog {
    features: IndexMap<String, IndexMap<String, SupportInfo>>,
}

impl CapabilityCatalog {
    /// Parse a manifest document.
    ///
    /// Every feature must map to a non-empty object of OS tags.
    pub fn from_json_str(source: &str, path: &Path) -> Result<Self, CatalogError> {
        let malformed = |message: String| CatalogError::ManifestMalformed {
            path: path.to_path_buf(),
            message,
        };

        let document: IndexMap<String, Platforms> =
            serde_json::from_str(source).map_err(|e| malformed(e.to_string()))?;

        let mut features = IndexMap::with_capacity(document.len());
        for (feature, platforms) in document {
            let Platforms::Table(platforms) = platforms else {
                return Err(malformed(format!(
                    "feature '{feature}' must map to an object of platforms"
                )));
            };
            if platforms.is_empty() {
                return Err(malformed(format!(
                    "feature '{feature}' does not list any platform"
                )));
            }
            features.insert(feature, platforms);
        }

        Ok(Self { features })
    }

    /// Read and parse the manifest at `path`.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();
        let source = tokio::fs::read_to_string(&path).await.map_err(|source| {
            CatalogError::ManifestUnreadable {
                path: path.clone(),
                source,
            }
        })?;
        let catalog = Self::from_json_str(&source, &path)?;
        log::debug!(
            "loaded {} features from {}",
            catalog.features.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Add a feature supported on the given OS tags.
    pub fn with_feature<'a>(
        mut self,
        feature: impl Into<String>,
        platforms: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let platforms: IndexMap<String, SupportInfo> = platforms
            .into_iter()
            .map(|os| (os.to_string(), Value::Object(Default::default())))
            .collect();
        self.features.insert(feature.into(), platforms);
        self
    }

    /// Names of all known features, in manifest order.
    pub fn features(&self) -> impl Iterator<Item = &str> {
        self.features.keys().map(String::as_str)
    }

    /// Number of known features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// OS tags a feature is supported on, in manifest order.
    pub fn platforms(&self, feature: &str) -> Option<impl Iterator<Item = &str>> {
        self.features
            .get(feature)
            .map(|platforms| platforms.keys().map(String::as_str))
    }

    /// Check that `feature` can be learned on `os`.
    pub fn check(&self, feature: &str, os: OsTag) -> Result<&SupportInfo, CatalogError> {
        let platforms = self
            .features
            .get(feature)
            .ok_or_else(|| CatalogError::UnsupportedFeature {
                feature: feature.to_string(),
                known: self.features().map(str::to_string).collect(),
            })?;

        platforms
            .get(os.as_str())
            .ok_or_else(|| CatalogError::UnsupportedPlatform {
                feature: feature.to_string(),
                os: os.to_string(),
                supported: platforms.keys().cloned().collect(),
            })
    }
}
