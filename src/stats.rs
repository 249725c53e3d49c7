//! Word, character, and line counters for the status bar.

/// Counts derived from the full source text.
///
/// Recomputed on every edit; the text is small enough that a fresh scan is
/// cheaper than tracking increments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    /// Whitespace-separated, non-empty tokens.
    pub words: usize,
    /// Unicode scalar values, not bytes.
    pub chars: usize,
    /// Newline-delimited lines; an empty text still has one.
    pub lines: usize,
}

impl TextStats {
    /// Count words, characters, and lines in `text`.
    pub fn of(text: &str) -> Self {
        Self {
            words: text.split_whitespace().count(),
            chars: text.chars().count(),
            lines: text.split('\n').count(),
        }
    }
}

impl std::fmt::Display for TextStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} words  {} chars  {} lines",
            self.words, self.chars, self.lines
        )
    }
}
