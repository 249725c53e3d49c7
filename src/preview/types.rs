//! Preview line types.

/// A preview document: the interpreted form of the converter's markup,
/// ready for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewDoc {
    lines: Vec<PreviewLine>,
}

impl PreviewDoc {
    /// Create an empty preview document.
    pub const fn empty() -> Self {
        Self { lines: Vec::new() }
    }

    /// Interpret a markup string into preview lines.
    ///
    /// Never fails: unknown or unbalanced tags are skipped and their text
    /// content is kept, so any string the converter can produce (including
    /// its quirkier outputs) yields a displayable document.
    pub fn from_markup(markup: &str) -> Self {
        super::markup::interpret(markup)
    }

    pub(crate) fn from_lines(lines: Vec<PreviewLine>) -> Self {
        Self { lines }
    }

    /// Total number of preview lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// All preview lines.
    pub fn lines(&self) -> &[PreviewLine] {
        &self.lines
    }

    /// Lines from `offset` to `offset + count`, clamped to the document.
    pub fn visible_lines(&self, offset: usize, count: usize) -> &[PreviewLine] {
        let start = offset.min(self.lines.len());
        let end = (start + count).min(self.lines.len());
        &self.lines[start..end]
    }
}

/// A single preview line with styling information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLine {
    kind: LineKind,
    spans: Vec<InlineSpan>,
}

impl PreviewLine {
    pub const fn new(kind: LineKind, spans: Vec<InlineSpan>) -> Self {
        Self { kind, spans }
    }

    /// An empty spacer line.
    pub const fn blank() -> Self {
        Self {
            kind: LineKind::Empty,
            spans: Vec::new(),
        }
    }

    /// The kind of line (for styling).
    pub const fn kind(&self) -> LineKind {
        self.kind
    }

    /// The styled spans making up the line.
    pub fn spans(&self) -> &[InlineSpan] {
        &self.spans
    }

    /// The plain text content of the line.
    pub fn content(&self) -> String {
        self.spans.iter().map(InlineSpan::text).collect()
    }
}

/// Kind of a preview line, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Normal paragraph text
    Paragraph,
    /// Heading with level (1-3)
    Heading(u8),
    /// Code line (fenced block content)
    Code,
    /// Block quote line
    Quote,
    /// List item (bullet or ordinal marker baked into the spans)
    ListItem,
    /// Table row; header rows carry strong cell spans
    TableRow,
    /// Horizontal rule, drawn to pane width at render time
    Rule,
    /// Spacer between blocks
    Empty,
}

/// Inline style flags for a text span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub strong: bool,
    pub emphasis: bool,
    pub code: bool,
    pub link: bool,
    pub image: bool,
}

/// A styled inline span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    text: String,
    style: InlineStyle,
}

impl InlineSpan {
    pub const fn new(text: String, style: InlineStyle) -> Self {
        Self { text, style }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: InlineStyle::default(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn style(&self) -> InlineStyle {
        self.style
    }
}
