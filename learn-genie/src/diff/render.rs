//! Diff line classification and rendering.

use std::borrow::Cow;
use std::str::Lines;

#[cfg(feature = "color")]
use colored::Color;

/// The role of one line in a unified diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `---` / `+++` file header
    Header,
    /// `@@` hunk marker
    Hunk,
    Added,
    Removed,
    Context,
}

impl LineKind {
    /// Classify a diff line by its prefix.
    pub fn classify(line: &str) -> Self {
        if line.starts_with("+++") || line.starts_with("---") {
            Self::Header
        } else if line.starts_with("@@") {
            Self::Hunk
        } else if line.starts_with('+') {
            Self::Added
        } else if line.starts_with('-') {
            Self::Removed
        } else {
            Self::Context
        }
    }
}

/// Turns diff lines into display lines.
pub trait LineRenderer: Send + Sync {
    fn render<'a>(&self, kind: LineKind, line: &'a str) -> Cow<'a, str>;
}

/// Leaves every line as it is.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl LineRenderer for PlainRenderer {
    fn render<'a>(&self, _kind: LineKind, line: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(line)
    }
}

/// Wraps changed lines in ANSI color escapes.
///
/// Escapes are built per line; no terminal or global color state is
/// consulted.
#[cfg(feature = "color")]
#[derive(Debug, Clone, Copy)]
pub struct AnsiRenderer {
    pub header: Color,
    pub hunk: Color,
    pub added: Color,
    pub removed: Color,
}

#[cfg(feature = "color")]
impl Default for AnsiRenderer {
    fn default() -> Self {
        Self {
            header: Color::Yellow,
            hunk: Color::Cyan,
            added: Color::Green,
            removed: Color::Red,
        }
    }
}

#[cfg(feature = "color")]
impl LineRenderer for AnsiRenderer {
    fn render<'a>(&self, kind: LineKind, line: &'a str) -> Cow<'a, str> {
        let color = match kind {
            LineKind::Header => self.header,
            LineKind::Hunk => self.hunk,
            LineKind::Added => self.added,
            LineKind::Removed => self.removed,
            LineKind::Context => return Cow::Borrowed(line),
        };
        Cow::Owned(format!("\x1b[{}m{line}\x1b[0m", color.to_fg_str()))
    }
}

/// Pick the renderer for one invocation.
pub fn select_renderer(colors: bool) -> Box<dyn LineRenderer> {
    if colors {
        color_renderer()
    } else {
        Box::new(PlainRenderer)
    }
}

#[cfg(feature = "color")]
fn color_renderer() -> Box<dyn LineRenderer> {
    Box::new(AnsiRenderer::default())
}

#[cfg(not(feature = "color"))]
fn color_renderer() -> Box<dyn LineRenderer> {
    log::warn!("colored diff requested but learn-genie was built without the `color` feature");
    Box::new(PlainRenderer)
}

/// Lazily rendered lines of a diff.
///
/// Cloning restarts from the clone point; the source text is not copied.
#[derive(Clone)]
pub struct RenderedLines<'a> {
    lines: Lines<'a>,
    renderer: &'a dyn LineRenderer,
}

impl<'a> Iterator for RenderedLines<'a> {
    type Item = Cow<'a, str>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        Some(self.renderer.render(LineKind::classify(line), line))
    }
}

/// Render every line of `text`.
pub fn render_lines<'a>(text: &'a str, renderer: &'a dyn LineRenderer) -> RenderedLines<'a> {
    RenderedLines {
        lines: text.lines(),
        renderer,
    }
}
