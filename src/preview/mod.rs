//! Live preview of converted markup.
//!
//! This module handles:
//! - Interpreting the converter's markup vocabulary
//! - Producing styled lines for the preview pane

mod markup;
mod types;

pub use types::{InlineSpan, InlineStyle, LineKind, PreviewDoc, PreviewLine};
