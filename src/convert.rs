//! Markdown-to-markup conversion.
//!
//! The converter is an ordered substitution pipeline: a fixed sequence of
//! rules, each rewriting the whole working string before the next rule runs.
//! Later rules see (and may re-match) markup inserted by earlier rules; there
//! is no escaping or protection pass. Rule order is load-bearing: images must
//! run before links, longer heading markers before shorter ones, and emphasis
//! before horizontal rules.
//!
//! [`render`] is pure and total: the same input always produces the same
//! output, and malformed or unbalanced constructs fall through as literal
//! text instead of failing.

use std::sync::LazyLock;

use regex::Regex;

static FENCED_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(\w+)?\n(.*?)```").expect("fenced code pattern"));
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("inline code pattern"));

static HEADING_3: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^###(#*) (.*)$").expect("h3 pattern"));
static HEADING_2: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^## (.*)$").expect("h2 pattern"));
static HEADING_1: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^# (.*)$").expect("h1 pattern"));

static BOLD_ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*\*(.+?)\*\*\*").expect("bold italic pattern"));
static BOLD_STARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern"));
static ITALIC_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.+?)\*").expect("italic pattern"));
static BOLD_UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__(.+?)__").expect("bold underscore pattern"));
static ITALIC_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_(.+?)_").expect("italic underscore pattern"));

static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("image pattern"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern"));

static BLOCKQUOTE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^> (.+)$").expect("blockquote pattern"));

static BULLET_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\* (.+)$").expect("star bullet pattern"));
static BULLET_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^- (.+)$").expect("dash bullet pattern"));
static BULLET_PLUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\+ (.+)$").expect("plus bullet pattern"));
static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\d+\. (.+)$").expect("ordered item pattern"));

static ADJACENT_UL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</ul>\s*<ul>").expect("ul merge pattern"));
static ADJACENT_OL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</ol>\s*<ol>").expect("ol merge pattern"));
static ADJACENT_QUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</blockquote>\s*<blockquote>").expect("quote merge pattern"));

static PIPE_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\|(.+)\|$").expect("pipe row pattern"));
static SEPARATOR_CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-:]+$").expect("separator cell pattern"));
static TABLE_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<tr>.*?</tr>").expect("table row pattern"));
static ADJACENT_TABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</table>\s*<table>").expect("table merge pattern"));
static DOUBLED_TABLE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<table>\s*<table>").expect("doubled table open pattern"));
static DOUBLED_TABLE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</table>\s*</table>").expect("doubled table close pattern"));
static TABLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<table>(.*?)</table>").expect("table block pattern"));

static RULE_DASHES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^---$").expect("dashed rule pattern"));
static RULE_STARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\*\*\*$").expect("starred rule pattern"));

// The paragraph heuristic only recognizes tags whose names begin with one of
// these letters; everything else gets wrapped.
static OPENS_WITH_BLOCK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^<[huobptica]").expect("block open pattern"));
static ENDS_WITH_BLOCK_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</[huobptica][^>]*>$").expect("block close pattern"));

/// Convert markdown-flavored source text into markup.
///
/// Every call starts from the raw string; no state is carried between calls.
/// The output's tag vocabulary is fixed: `h1`-`h3`, `strong`/`em`, `code` and
/// `pre`, `blockquote`, `ul`/`ol`/`li`, `table`/`tr`/`th`/`td`, `img`, `a`,
/// `hr`, `p` and `br`.
pub fn render(source: &str) -> String {
    let markup = code_blocks(source);
    let markup = headings(&markup);
    let markup = emphasis(&markup);
    let markup = images_and_links(&markup);
    let markup = BLOCKQUOTE_LINE
        .replace_all(&markup, "<blockquote>$1</blockquote>")
        .into_owned();
    let markup = list_items(&markup);
    let markup = merge_adjacent_blocks(&markup);
    let markup = table_rows(&markup);
    let markup = wrap_tables(&markup);
    let markup = promote_header_rows(&markup);
    let markup = horizontal_rules(&markup);
    paragraphs(&markup)
}

/// Fenced blocks first so their delimiters never reach the inline rule; the
/// language tag is discarded. Content is not protected from later rules.
fn code_blocks(input: &str) -> String {
    let markup = FENCED_CODE.replace_all(input, "<pre><code>$2</code></pre>");
    INLINE_CODE.replace_all(&markup, "<code>$1</code>").into_owned()
}

/// Longest marker first, so `#` does not swallow `##`/`###` lines. Only up to
/// three hashes are recognized; any beyond that stay as literal text inside
/// the h3.
fn headings(input: &str) -> String {
    let markup = HEADING_3.replace_all(input, |caps: &regex::Captures<'_>| {
        let extra = &caps[1];
        let text = &caps[2];
        if extra.is_empty() {
            format!("<h3>{text}</h3>")
        } else {
            format!("<h3>{extra} {text}</h3>")
        }
    });
    let markup = HEADING_2.replace_all(&markup, "<h2>$1</h2>");
    HEADING_1.replace_all(&markup, "<h1>$1</h1>").into_owned()
}

/// Most-specific delimiter first. Matches are non-greedy and span the whole
/// string rather than single lines; an unmatched opener passes through.
fn emphasis(input: &str) -> String {
    let markup = BOLD_ITALIC.replace_all(input, "<strong><em>$1</em></strong>");
    let markup = BOLD_STARS.replace_all(&markup, "<strong>$1</strong>");
    let markup = ITALIC_STAR.replace_all(&markup, "<em>$1</em>");
    let markup = BOLD_UNDERSCORES.replace_all(&markup, "<strong>$1</strong>");
    ITALIC_UNDERSCORE.replace_all(&markup, "<em>$1</em>").into_owned()
}

/// Images before links: the link pattern is the image pattern minus the
/// leading `!`, so the order resolves the overlap.
fn images_and_links(input: &str) -> String {
    let markup = IMAGE.replace_all(input, r#"<img src="$2" alt="$1">"#);
    LINK.replace_all(&markup, r#"<a href="$2" target="_blank">$1</a>"#)
        .into_owned()
}

/// Each list line is wrapped in its own single-item list; coalescing into one
/// container happens in [`merge_adjacent_blocks`].
fn list_items(input: &str) -> String {
    let markup = BULLET_STAR.replace_all(input, "<ul><li>$1</li></ul>");
    let markup = BULLET_DASH.replace_all(&markup, "<ul><li>$1</li></ul>");
    let markup = BULLET_PLUS.replace_all(&markup, "<ul><li>$1</li></ul>");
    ORDERED_ITEM
        .replace_all(&markup, "<ol><li>$1</li></ol>")
        .into_owned()
}

/// Consecutive single-item lists collapse into one container. Adjacent
/// blockquotes are joined with a line break instead of merged.
fn merge_adjacent_blocks(input: &str) -> String {
    let markup = ADJACENT_UL.replace_all(input, "");
    let markup = ADJACENT_OL.replace_all(&markup, "");
    ADJACENT_QUOTE.replace_all(&markup, "<br>").into_owned()
}

/// A `|cell|cell|` line becomes a row of data cells, unless every cell is
/// only dashes and colons; such a line was an alignment separator and is
/// dropped entirely.
fn table_rows(input: &str) -> String {
    PIPE_ROW
        .replace_all(input, |caps: &regex::Captures<'_>| {
            let cells: Vec<&str> = caps[0]
                .split('|')
                .map(str::trim)
                .filter(|cell| !cell.is_empty())
                .collect();
            if cells.iter().all(|cell| SEPARATOR_CELL.is_match(cell)) {
                return String::new();
            }
            let data: String = cells
                .iter()
                .map(|cell| format!("<td>{cell}</td>"))
                .collect();
            format!("<tr>{data}</tr>")
        })
        .into_owned()
}

/// Wrap every row in a table container, then coalesce adjacent containers the
/// same way adjacent lists are coalesced.
fn wrap_tables(input: &str) -> String {
    let markup = TABLE_ROW.replace_all(input, "<table>$0</table>");
    let markup = ADJACENT_TABLE.replace_all(&markup, "");
    let markup = DOUBLED_TABLE_OPEN.replace_all(&markup, "<table>");
    DOUBLED_TABLE_CLOSE
        .replace_all(&markup, "</table>")
        .into_owned()
}

/// The first row of each table becomes header cells; remaining rows stay data
/// rows. Text between rows is dropped when the table is reassembled.
fn promote_header_rows(input: &str) -> String {
    TABLE_BLOCK
        .replace_all(input, |caps: &regex::Captures<'_>| {
            let rows: Vec<&str> = TABLE_ROW.find_iter(&caps[1]).map(|m| m.as_str()).collect();
            let Some((first, rest)) = rows.split_first() else {
                return caps[0].to_string();
            };
            let header = first.replace("<td>", "<th>").replace("</td>", "</th>");
            format!("<table>{header}{}</table>", rest.concat())
        })
        .into_owned()
}

/// `---` on its own line becomes a rule. The `***` pattern is checked too,
/// but by this point the emphasis rules have already rewritten a lone `***`
/// as `<em>*</em>`, so it never fires. The dead rule is kept to preserve the
/// pipeline's observable behavior.
fn horizontal_rules(input: &str) -> String {
    let markup = RULE_DASHES.replace_all(input, "<hr>");
    RULE_STARS.replace_all(&markup, "<hr>").into_owned()
}

/// Double newlines become paragraph boundaries, then a per-line heuristic
/// opens a paragraph on any line that does not already start with a
/// recognized tag and closes one on any line that does not already end with
/// a recognized closing tag. Best effort only: the letter set is incomplete
/// (`<em>` at line start gets wrapped, `<code>` does not), which can both
/// over- and under-wrap.
fn paragraphs(input: &str) -> String {
    let joined = input.replace("\n\n", "</p><p>");
    let lines: Vec<String> = joined
        .split('\n')
        .map(|line| {
            let open = if OPENS_WITH_BLOCK_TAG.is_match(line) { "" } else { "<p>" };
            let close = if ENDS_WITH_BLOCK_CLOSE.is_match(line) { "" } else { "</p>" };
            format!("{open}{line}{close}")
        })
        .collect();
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Headings ---

    #[test]
    fn test_heading_levels_one_to_three() {
        assert_eq!(render("# Title"), "<h1>Title</h1>");
        assert_eq!(render("## Title"), "<h2>Title</h2>");
        assert_eq!(render("### Title"), "<h3>Title</h3>");
    }

    #[test]
    fn test_fourth_hash_stays_literal_inside_h3() {
        // Only three leading hashes are recognized; the h3 rule fires first
        // and keeps the fourth hash as content.
        assert_eq!(render("#### Title"), "<h3># Title</h3>");
    }

    #[test]
    fn test_hash_without_space_is_not_a_heading() {
        let out = render("#Title");
        assert!(!out.contains("<h1>"));
        assert!(out.contains("#Title"));
    }

    #[test]
    fn test_heading_markers_mid_line_ignored() {
        let out = render("not a # heading");
        assert!(!out.contains("<h1>"));
    }

    // --- Emphasis ---

    #[test]
    fn test_bold_with_asterisks() {
        assert_eq!(render("**bold**"), "<p><strong>bold</strong></p>");
    }

    #[test]
    fn test_bold_italic_nesting_order() {
        assert_eq!(
            render("***both***"),
            "<p><strong><em>both</em></strong></p>"
        );
    }

    #[test]
    fn test_italic_with_single_asterisk() {
        assert_eq!(render("*it*"), "<p><em>it</em></p>");
    }

    #[test]
    fn test_underscore_variants() {
        assert_eq!(render("__bold__"), "<p><strong>bold</strong></p>");
        assert_eq!(render("_it_"), "<p><em>it</em></p>");
    }

    #[test]
    fn test_unbalanced_emphasis_passes_through() {
        let out = render("**no closer");
        assert!(!out.contains("<strong>"));
        assert!(out.contains("**no closer"));
    }

    #[test]
    fn test_emphasis_is_non_greedy() {
        assert_eq!(
            render("**a** and **b**"),
            "<p><strong>a</strong> and <strong>b</strong></p>"
        );
    }

    // --- Code ---

    #[test]
    fn test_inline_code_span() {
        // `<code>` starts and ends with recognized letters, so the paragraph
        // heuristic leaves the line bare.
        assert_eq!(render("`x = 1`"), "<code>x = 1</code>");
    }

    #[test]
    fn test_fenced_code_block_discards_language_tag() {
        let out = render("```rust\nfn main() {}\n```");
        assert!(out.contains("<pre><code>fn main() {}"));
        assert!(out.contains("</code></pre>"));
        assert!(!out.contains("rust"));
    }

    #[test]
    fn test_fenced_code_content_is_not_protected_from_later_rules() {
        // No escaping pass exists: emphasis still rewrites text that already
        // sits inside a pre/code container.
        let out = render("```\n**x**\n```");
        assert!(out.contains("<strong>x</strong>"));
    }

    #[test]
    fn test_unclosed_fence_passes_through() {
        let out = render("```\ncode");
        assert!(!out.contains("<pre>"));
    }

    // --- Images and links ---

    #[test]
    fn test_image_element() {
        // `<img>` has no closing tag, so the paragraph heuristic still
        // appends a stray `</p>` after it.
        assert_eq!(render("![a](u)"), r#"<img src="u" alt="a"></p>"#);
    }

    #[test]
    fn test_image_is_not_also_a_link() {
        let out = render("![alt](pic.png)");
        assert!(!out.contains("<a href"));
    }

    #[test]
    fn test_link_opens_new_context() {
        assert_eq!(
            render("[text](url)"),
            r#"<a href="url" target="_blank">text</a>"#
        );
    }

    #[test]
    fn test_image_with_empty_alt() {
        assert_eq!(render("![](u)"), r#"<img src="u" alt=""></p>"#);
    }

    // --- Blockquotes ---

    #[test]
    fn test_blockquote_line() {
        assert_eq!(
            render("> quoted"),
            "<blockquote>quoted</blockquote>"
        );
    }

    #[test]
    fn test_adjacent_blockquotes_joined_with_break() {
        assert_eq!(
            render("> one\n> two"),
            "<blockquote>one<br>two</blockquote>"
        );
    }

    // --- Lists ---

    #[test]
    fn test_bullet_markers() {
        for src in ["* item", "- item", "+ item"] {
            assert_eq!(render(src), "<ul><li>item</li></ul>", "marker: {src}");
        }
    }

    #[test]
    fn test_consecutive_bullets_coalesce_into_one_list() {
        assert_eq!(
            render("- one\n- two"),
            "<ul><li>one</li><li>two</li></ul>"
        );
    }

    #[test]
    fn test_ordered_list_items_coalesce() {
        assert_eq!(
            render("1. one\n2. two"),
            "<ol><li>one</li><li>two</li></ol>"
        );
    }

    #[test]
    fn test_unordered_and_ordered_do_not_merge() {
        let out = render("- one\n1. two");
        assert!(out.contains("</ul>"));
        assert!(out.contains("<ol>"));
    }

    // --- Tables ---

    #[test]
    fn test_two_row_table_with_separator() {
        let out = render("| H1 | H2 |\n|----|----|\n| a | b |");
        assert!(out.contains("<table>"));
        assert!(out.contains("<th>H1</th><th>H2</th>"));
        assert!(out.contains("<td>a</td><td>b</td>"));
        assert!(!out.contains("----"), "separator row must be dropped");
        assert_eq!(out.matches("<table>").count(), 1, "rows share one table");
    }

    #[test]
    fn test_single_row_table_promotes_to_header() {
        let out = render("| only | row |");
        assert!(out.contains("<th>only</th><th>row</th>"));
    }

    #[test]
    fn test_table_cells_are_trimmed() {
        let out = render("|  padded  |  cells  |");
        assert!(out.contains("<th>padded</th><th>cells</th>"));
    }

    #[test]
    fn test_alignment_separator_with_colons_dropped() {
        let out = render("| :--- | ---: |");
        assert!(!out.contains("<tr>"));
        assert!(!out.contains(":---"));
    }

    #[test]
    fn test_line_without_trailing_pipe_is_not_a_row() {
        let out = render("| a | b");
        assert!(!out.contains("<tr>"));
    }

    // --- Horizontal rules ---

    #[test]
    fn test_dashed_rule() {
        // `<hr>` is not a closing tag, so the heuristic appends `</p>`.
        assert_eq!(render("---"), "<hr></p>");
    }

    #[test]
    fn test_starred_rule_is_dead_and_yields_emphasis() {
        // Emphasis runs before the rule check, so a lone `***` has already
        // become `<em>*</em>` by the time the hr pattern scans the line.
        assert_eq!(render("***"), "<p><em>*</em></p>");
    }

    // --- Paragraph heuristic ---

    #[test]
    fn test_empty_input_is_minimally_wrapped() {
        assert_eq!(render(""), "<p></p>");
    }

    #[test]
    fn test_double_newline_becomes_paragraph_boundary() {
        assert_eq!(render("one\n\ntwo"), "<p>one</p><p>two</p>");
    }

    #[test]
    fn test_plain_text_line_is_wrapped() {
        assert_eq!(render("hello"), "<p>hello</p>");
    }

    #[test]
    fn test_heading_line_is_not_rewrapped() {
        assert_eq!(render("# Title"), "<h1>Title</h1>");
    }

    #[test]
    fn test_em_at_line_start_is_wrapped_code_is_not() {
        // The recognized-letter set covers `c` but not `e`, so a line-leading
        // `<em>` gains a paragraph while `<code>` does not.
        assert_eq!(render("*x*"), "<p><em>x</em></p>");
        assert_eq!(render("`x`"), "<code>x</code>");
    }

    // --- Determinism and end-to-end ---

    #[test]
    fn test_render_is_deterministic() {
        let src = "# A\n\n**b** *c* `d`\n\n- e\n- f\n\n> g\n\n| h |\n";
        assert_eq!(render(src), render(src));
    }

    #[test]
    fn test_end_to_end_document() {
        let out = render("# Title\n\nSome **bold** and *italic* text.\n\n- item1\n- item2");

        let heading = out.find("<h1>Title</h1>").expect("heading present");
        let bold = out.find("<strong>bold</strong>").expect("bold present");
        let italic = out.find("<em>italic</em>").expect("italic present");
        let list = out.find("<ul><li>item1</li><li>item2</li></ul>").expect("one list");
        assert!(heading < bold && bold < italic && italic < list);

        let first_boundary = out.find("</p><p>").expect("paragraph boundary");
        assert!(heading < first_boundary && first_boundary < bold);
        assert_eq!(out.matches("<ul>").count(), 1, "list containers coalesce");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn render_never_panics(src in ".{0,400}") {
                let _ = render(&src);
            }

            #[test]
            fn render_is_deterministic(src in ".{0,400}") {
                prop_assert_eq!(render(&src), render(&src));
            }

            #[test]
            fn markdown_ish_input_is_deterministic(
                src in "([#>*_`|\\[\\]()!-]|[a-z ]|\n){0,200}"
            ) {
                prop_assert_eq!(render(&src), render(&src));
            }
        }
    }
}
