//! Markup interpretation.
//!
//! Walks the converter's output string and assembles styled preview lines.
//! The interpreter is deliberately forgiving: the converter performs no
//! validation, so its output can contain stray paragraph tags, unbalanced
//! emphasis containers, or paragraph wrappers spliced into code blocks.
//! Tags that are unknown or out of place are dropped; text always survives.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{InlineSpan, InlineStyle, LineKind, PreviewDoc, PreviewLine};

static ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([a-z-]+)="([^"]*)""#).expect("attribute pattern"));

/// Interpret a markup string into a preview document.
pub(super) fn interpret(markup: &str) -> PreviewDoc {
    let mut interp = Interpreter::new();
    let mut rest = markup;
    while let Some(open) = rest.find('<') {
        let (text, tail) = rest.split_at(open);
        interp.text(text);
        // Only a letter or `/` after `<` starts a tag; anything else is
        // literal text (`a < b` survives).
        let starts_tag = tail[1..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '/');
        if !starts_tag {
            interp.text("<");
            rest = &tail[1..];
            continue;
        }
        match tail.find('>') {
            Some(close) => {
                interp.tag(&tail[1..close]);
                rest = &tail[close + 1..];
            }
            None => {
                // An unterminated tag at end of input is literal text.
                interp.text(tail);
                rest = "";
            }
        }
    }
    interp.text(rest);
    interp.finish()
}

/// Numbering state for the list container currently being interpreted.
struct ListContext {
    ordered: bool,
    index: usize,
}

/// Cell-separator state for the table row currently being interpreted.
struct RowContext {
    cells: usize,
}

struct Interpreter {
    lines: Vec<PreviewLine>,
    spans: Vec<InlineSpan>,
    block: LineKind,
    strong: u8,
    emphasis: u8,
    code: u8,
    link: u8,
    in_pre: bool,
    list: Option<ListContext>,
    row: Option<RowContext>,
}

impl Interpreter {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            spans: Vec::new(),
            block: LineKind::Paragraph,
            strong: 0,
            emphasis: 0,
            code: 0,
            link: 0,
            in_pre: false,
            list: None,
            row: None,
        }
    }

    fn finish(mut self) -> PreviewDoc {
        self.flush_if_content();
        PreviewDoc::from_lines(self.lines)
    }

    /// Append literal text, breaking lines at embedded newlines.
    fn text(&mut self, text: &str) {
        for (i, part) in text.split('\n').enumerate() {
            if i > 0 {
                self.break_line();
            }
            if !part.is_empty() {
                let style = self.current_style();
                self.push_span(InlineSpan::new(part.to_string(), style));
            }
        }
    }

    fn tag(&mut self, inner: &str) {
        let closing = inner.starts_with('/');
        let body = inner.trim_start_matches('/');
        let name_len = body
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(body.len());
        let (name, attrs) = body.split_at(name_len);

        match (name, closing) {
            ("p", false) => {
                if !self.in_pre {
                    self.block = LineKind::Paragraph;
                }
            }
            ("p", true) => self.end_paragraph(),
            ("h1", false) => self.open_block(LineKind::Heading(1)),
            ("h2", false) => self.open_block(LineKind::Heading(2)),
            ("h3", false) => self.open_block(LineKind::Heading(3)),
            ("h1" | "h2" | "h3", true) => self.close_block(),
            ("blockquote", false) => self.open_block(LineKind::Quote),
            ("blockquote", true) => self.close_block(),
            ("pre", false) => {
                self.flush_if_content();
                self.in_pre = true;
                self.block = LineKind::Code;
            }
            ("pre", true) => {
                self.flush_if_content();
                self.in_pre = false;
                self.block = LineKind::Paragraph;
            }
            ("strong", false) => self.strong = self.strong.saturating_add(1),
            ("strong", true) => self.strong = self.strong.saturating_sub(1),
            ("em", false) => self.emphasis = self.emphasis.saturating_add(1),
            ("em", true) => self.emphasis = self.emphasis.saturating_sub(1),
            ("code", false) => self.code = self.code.saturating_add(1),
            ("code", true) => self.code = self.code.saturating_sub(1),
            ("a", false) => self.link = self.link.saturating_add(1),
            ("a", true) => self.link = self.link.saturating_sub(1),
            ("ul", false) => {
                self.flush_if_content();
                self.list = Some(ListContext {
                    ordered: false,
                    index: 0,
                });
            }
            ("ol", false) => {
                self.flush_if_content();
                self.list = Some(ListContext {
                    ordered: true,
                    index: 0,
                });
            }
            ("ul" | "ol", true) => {
                self.flush_if_content();
                self.list = None;
                self.block = LineKind::Paragraph;
            }
            ("li", false) => {
                self.flush_if_content();
                self.block = LineKind::ListItem;
                let marker = match self.list.as_mut() {
                    Some(ctx) if ctx.ordered => {
                        ctx.index += 1;
                        format!("{}. ", ctx.index)
                    }
                    _ => "• ".to_string(),
                };
                self.push_span(InlineSpan::plain(marker));
            }
            ("li", true) => self.flush_if_content(),
            ("table", false | true) => {
                self.flush_if_content();
                self.row = None;
                if closing {
                    self.block = LineKind::Paragraph;
                }
            }
            ("tr", false) => {
                self.flush_if_content();
                self.block = LineKind::TableRow;
                self.row = Some(RowContext { cells: 0 });
            }
            ("tr", true) => {
                self.flush_if_content();
                self.row = None;
            }
            ("td", false) => self.open_cell(),
            ("th", false) => {
                // Header cells render strong.
                self.strong = self.strong.saturating_add(1);
                self.open_cell();
            }
            ("th", true) => self.strong = self.strong.saturating_sub(1),
            ("td", true) => {}
            ("img", false) => {
                let (src, alt) = image_attributes(attrs);
                let label = if alt.is_empty() { src } else { alt };
                self.push_span(InlineSpan::new(
                    format!("[image: {label}]"),
                    InlineStyle {
                        image: true,
                        ..InlineStyle::default()
                    },
                ));
            }
            ("hr", false) => {
                self.flush_if_content();
                self.lines.push(PreviewLine::new(LineKind::Rule, Vec::new()));
            }
            ("br", false | true) => self.break_line(),
            _ => {}
        }
    }

    fn current_style(&self) -> InlineStyle {
        InlineStyle {
            strong: self.strong > 0,
            emphasis: self.emphasis > 0,
            code: self.code > 0 && !self.in_pre,
            link: self.link > 0,
            image: false,
        }
    }

    fn push_span(&mut self, span: InlineSpan) {
        if let Some(last) = self.spans.last_mut()
            && last.style() == span.style()
        {
            let merged = format!("{}{}", last.text(), span.text());
            *last = InlineSpan::new(merged, span.style());
            return;
        }
        self.spans.push(span);
    }

    fn open_cell(&mut self) {
        if let Some(row) = self.row.as_mut() {
            if row.cells > 0 {
                self.spans.push(InlineSpan::plain(" │ "));
            }
            row.cells += 1;
        }
    }

    fn open_block(&mut self, kind: LineKind) {
        self.flush_if_content();
        self.block = kind;
    }

    fn close_block(&mut self) {
        self.flush_if_content();
        self.block = LineKind::Paragraph;
    }

    /// A paragraph boundary: emit the pending line, then one spacer.
    fn end_paragraph(&mut self) {
        self.flush_if_content();
        if !matches!(
            self.lines.last().map(PreviewLine::kind),
            None | Some(LineKind::Empty)
        ) {
            self.lines.push(PreviewLine::blank());
        }
    }

    /// A hard break: emit the pending line even when it is empty.
    fn break_line(&mut self) {
        if self.spans.is_empty() {
            self.lines.push(PreviewLine::blank());
        } else {
            self.flush_if_content();
        }
    }

    fn flush_if_content(&mut self) {
        if self.spans.is_empty() {
            return;
        }
        let kind = if self.row.is_some() {
            LineKind::TableRow
        } else if self.in_pre {
            LineKind::Code
        } else {
            self.block
        };
        let spans = std::mem::take(&mut self.spans);
        self.lines.push(PreviewLine::new(kind, spans));
    }
}

/// Pull `src` and `alt` out of an image tag's attribute text.
fn image_attributes(attrs: &str) -> (String, String) {
    let mut src = String::new();
    let mut alt = String::new();
    for caps in ATTRIBUTE.captures_iter(attrs) {
        match &caps[1] {
            "src" => src = caps[2].to_string(),
            "alt" => alt = caps[2].to_string(),
            _ => {}
        }
    }
    (src, alt)
}
