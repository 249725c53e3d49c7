use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

use crate::app::Model;
use crate::config::ViewMode;
use crate::preview::LineKind;

use super::{line_number_width, overlays, split_panes, status, style};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();

    let toast_active = model.active_toast().is_some() && !model.fullscreen;
    let footer_rows = if model.fullscreen {
        0
    } else {
        1 + u16::from(toast_active)
    };
    let content_area = Rect {
        height: area.height.saturating_sub(footer_rows),
        ..area
    };

    match model.view_mode {
        ViewMode::Split => {
            let chunks = split_panes(content_area);
            render_editor_pane(model, frame, chunks[0]);
            render_preview_pane(model, frame, chunks[1]);
        }
        ViewMode::Editor => render_editor_pane(model, frame, content_area),
        ViewMode::Preview => render_preview_pane(model, frame, content_area),
    }

    if !model.fullscreen {
        if toast_active {
            let toast_area = Rect {
                y: area.y + area.height.saturating_sub(2),
                height: 1,
                ..area
            };
            status::render_toast_bar(model, frame, toast_area);
        }
        let status_area = Rect {
            y: area.y + area.height.saturating_sub(1),
            height: 1,
            ..area
        };
        status::render_status_bar(model, frame, status_area);
    }

    if model.splash_visible {
        overlays::render_splash_overlay(model, frame, area);
    } else if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

/// The editing pane: line-number gutter, source text, block cursor.
fn render_editor_pane(model: &Model, frame: &mut Frame, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let buf = &model.buffer;
    let gutter_width = line_number_width(buf.line_count());
    let gutter_style = style::gutter_style(model.theme);
    let cursor = buf.cursor();

    let mut content: Vec<Line> = Vec::new();
    for line_idx in model.editor_viewport.visible_range() {
        let line_text = buf.line_at(line_idx).unwrap_or_default();
        let line_num = format!("{:>width$} ", line_idx + 1, width = gutter_width as usize);
        let mut spans = vec![Span::styled(line_num, gutter_style)];

        if line_idx == cursor.line {
            // Split the line around the cursor cell.
            let col = cursor.col.min(line_text.len());
            let before = &line_text[..col];
            let cursor_char = next_char_slice(&line_text, col);
            let after = &line_text[(col + cursor_char.len()).min(line_text.len())..];

            if !before.is_empty() {
                spans.push(Span::raw(before.to_string()));
            }
            let shown = if cursor_char.is_empty() { " " } else { cursor_char };
            spans.push(Span::styled(
                shown.to_string(),
                style::cursor_style(model.theme),
            ));
            if !after.is_empty() {
                spans.push(Span::raw(after.to_string()));
            }
        } else {
            spans.push(Span::raw(line_text));
        }

        content.push(Line::from(spans));
    }

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content), area);
}

/// The preview pane: interpreted markup lines with theme styling.
fn render_preview_pane(model: &Model, frame: &mut Frame, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let visible = model
        .preview
        .visible_lines(model.preview_viewport.offset(), area.height as usize);

    let mut content: Vec<Line> = Vec::new();
    for line in visible {
        let base = style::style_for_kind(line.kind(), model.theme);
        if line.kind() == LineKind::Rule {
            content.push(Line::styled("─".repeat(area.width as usize), base));
            continue;
        }
        let spans: Vec<Span> = line
            .spans()
            .iter()
            .map(|span| {
                Span::styled(
                    span.text().to_string(),
                    style::style_for_inline(base, span.style(), model.theme),
                )
            })
            .collect();
        content.push(Line::from(spans));
    }

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content), area);
}

/// The char starting at byte `col`, or an empty slice at end of line.
fn next_char_slice(text: &str, col: usize) -> &str {
    if col >= text.len() {
        return "";
    }
    let len = text[col..].chars().next().map_or(0, char::len_utf8);
    &text[col..col + len]
}
