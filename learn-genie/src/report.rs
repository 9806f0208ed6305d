//! Result documents handed back to the automation engine.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::Error;

/// Diff text in the shape the engine displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreparedDiff {
    pub prepared: String,
}

/// Outcome of one invocation.
///
/// Success and failure are separate variants, so a document never
/// carries both a snapshot and a failure message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModuleResult {
    /// A feature was learned, and possibly compared.
    Learned {
        changed: bool,
        genie: IndexMap<String, Value>,
        #[serde(skip_serializing_if = "Option::is_none")]
        diff: Option<PreparedDiff>,
    },

    /// Check mode: parameters were valid and nothing was done.
    CheckMode { changed: bool },

    /// The invocation failed.
    Failed {
        changed: bool,
        failed: bool,
        msg: String,
    },
}

impl ModuleResult {
    /// Success document for a learned `snapshot`.
    ///
    /// `diff` is the rendered diff when a baseline was supplied; the result
    /// is changed only when that text is non-empty.
    pub fn learned(feature: impl Into<String>, snapshot: Value, diff: Option<String>) -> Self {
        let changed = diff.as_deref().is_some_and(|text| !text.is_empty());
        let mut genie = IndexMap::with_capacity(1);
        genie.insert(feature.into(), snapshot);
        Self::Learned {
            changed,
            genie,
            diff: diff.map(|prepared| PreparedDiff { prepared }),
        }
    }

    pub fn check_mode() -> Self {
        Self::CheckMode { changed: false }
    }

    /// Failure document carrying `msg`.
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed {
            changed: false,
            failed: true,
            msg: msg.into(),
        }
    }

    pub fn changed(&self) -> bool {
        match self {
            Self::Learned { changed, .. } => *changed,
            Self::CheckMode { .. } | Self::Failed { .. } => false,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Process exit code for the module binary.
    pub fn exit_code(&self) -> u8 {
        if self.is_failed() { 1 } else { 0 }
    }

    /// Serialize the document for the engine.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<&Error> for ModuleResult {
    fn from(err: &Error) -> Self {
        Self::failed(err.to_string())
    }
}

impl From<Error> for ModuleResult {
    fn from(err: Error) -> Self {
        Self::from(&err)
    }
}
