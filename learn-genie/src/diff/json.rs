//! Line diff of pretty-printed JSON snapshots.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use similar::TextDiff;

use super::{DiffOutcome, Differ, ExclusionMatcher};
use crate::error::DiffError;

/// Header of the baseline side of the diff.
const BEFORE_HEADER: &str = "compare_to";

/// Header of the learned side of the diff.
const AFTER_HEADER: &str = "current";

/// Diffs snapshots as sorted, pretty-printed JSON.
///
/// Object keys matching an exclusion pattern are dropped at any depth
/// before the comparison.
#[derive(Debug, Clone)]
pub struct JsonDiffer {
    context_radius: usize,
}

impl Default for JsonDiffer {
    fn default() -> Self {
        Self { context_radius: 3 }
    }
}

impl JsonDiffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of unchanged lines shown around each change (default: 3).
    pub fn context_radius(mut self, lines: usize) -> Self {
        self.context_radius = lines;
        self
    }
}

impl Differ for JsonDiffer {
    fn diff(
        &self,
        before: &Value,
        after: &Value,
        exclusions: &ExclusionMatcher,
    ) -> Result<DiffOutcome, DiffError> {
        let before = pretty(&prune(before, exclusions))?;
        let after = pretty(&prune(after, exclusions))?;

        if before == after {
            return Ok(DiffOutcome::default());
        }

        let diff = TextDiff::from_lines(&before, &after);
        let text = diff
            .unified_diff()
            .context_radius(self.context_radius)
            .header(BEFORE_HEADER, AFTER_HEADER)
            .to_string();
        Ok(DiffOutcome::new(text))
    }
}

/// Copy of `value` without excluded keys, objects sorted by key.
fn prune(value: &Value, matcher: &ExclusionMatcher) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<&String, Value> = map
                .iter()
                .filter(|(key, _)| !matcher.is_excluded(key))
                .map(|(key, value)| (key, prune(value, matcher)))
                .collect();
            let pruned: Map<String, Value> = sorted
                .into_iter()
                .map(|(key, value)| (key.clone(), value))
                .collect();
            Value::Object(pruned)
        }
        Value::Array(items) => {
            Value::Array(items.iter().map(|item| prune(item, matcher)).collect())
        }
        other => other.clone(),
    }
}

fn pretty(value: &Value) -> Result<String, DiffError> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}
