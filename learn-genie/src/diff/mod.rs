//! Snapshot comparison and diff rendering.
//!
//! A [`Differ`] compares two learned snapshots, ignoring excluded fields,
//! and produces unified-diff text. The text is then turned into display
//! lines by a [`LineRenderer`], plain or colorized.

mod json;
mod matcher;
mod render;

pub use json::JsonDiffer;
pub use matcher::ExclusionMatcher;
pub use render::{
    LineKind, LineRenderer, PlainRenderer, RenderedLines, render_lines, select_renderer,
};

#[cfg(feature = "color")]
pub use render::AnsiRenderer;

use serde_json::Value;

use crate::error::DiffError;

/// Compares a baseline snapshot with a freshly learned one.
pub trait Differ {
    /// Diff `before` against `after`, skipping fields matched by `exclusions`.
    fn diff(
        &self,
        before: &Value,
        after: &Value,
        exclusions: &ExclusionMatcher,
    ) -> Result<DiffOutcome, DiffError>;
}

/// Unified-diff text between two snapshots.
///
/// Empty text means the snapshots are equal once exclusions are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffOutcome {
    text: String,
}

impl DiffOutcome {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The raw diff text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the snapshots differ.
    pub fn changed(&self) -> bool {
        !self.is_empty()
    }

    /// Render every diff line with `renderer`.
    pub fn render<'a>(&'a self, renderer: &'a dyn LineRenderer) -> RenderedLines<'a> {
        render_lines(&self.text, renderer)
    }
}
