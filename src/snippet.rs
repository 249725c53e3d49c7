//! Formatting shortcut snippets.
//!
//! Each shortcut inserts a small markdown template at the cursor and places
//! the caret where typing should continue: inside a fresh emphasis pair,
//! after a heading marker, or over the link URL placeholder.

/// A formatting construct insertable via a keyboard shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Snippet {
    Bold,
    Italic,
    Heading,
    List,
    Link,
    Image,
    InlineCode,
    CodeBlock,
    Quote,
    Table,
    Rule,
}

impl Snippet {
    /// The text to insert and the byte offset where the caret lands.
    pub fn expansion(self) -> (&'static str, usize) {
        match self {
            // Caret between the asterisk pairs.
            Self::Bold => ("****", 2),
            Self::Italic => ("**", 1),
            // Line templates leave the caret at the end, ready to type over.
            Self::Heading => ("## Heading", 10),
            Self::List => ("- List item", 11),
            // Caret on the `url` placeholder.
            Self::Link => ("[link text](url)", 12),
            Self::Image => ("![alt text](image-url)", 12),
            Self::InlineCode => ("``", 1),
            // Caret at the start of the code line inside the fence.
            Self::CodeBlock => ("```\ncode\n```", 4),
            Self::Quote => ("> Quote", 7),
            Self::Table => (TABLE_TEMPLATE, TABLE_TEMPLATE.len()),
            Self::Rule => ("\n---\n", 5),
        }
    }
}

const TABLE_TEMPLATE: &str = "\
| Header 1 | Header 2 | Header 3 |\n\
|----------|----------|----------|\n\
| Cell 1   | Cell 2   | Cell 3   |\n\
| Cell 4   | Cell 5   | Cell 6   |";
