use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

/// The startup splash, dismissed by any key or after a few seconds.
pub fn render_splash_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let _ = model;
    let popup = centered_popup_rect(44, 9, area);

    let lines = vec![
        Line::raw(""),
        Line::styled(
            "inkdown",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .centered(),
        Line::raw(""),
        Line::raw("markdown in, markup out").centered(),
        Line::styled(
            "press any key to start writing",
            Style::default().fg(Color::Indexed(245)),
        )
        .centered(),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(6).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut all_lines: Vec<Line> = Vec::new();

    all_lines.push(Line::styled("Formatting", section_style));
    all_lines.push(Line::raw("  Ctrl-b / Ctrl-i    Bold / italic"));
    all_lines.push(Line::raw("  Ctrl-h              Heading"));
    all_lines.push(Line::raw("  Ctrl-l              List item"));
    all_lines.push(Line::raw("  Ctrl-k / Ctrl-g     Link / image"));
    all_lines.push(Line::raw("  Ctrl-` / Ctrl-f     Inline code / code block"));
    all_lines.push(Line::raw("  Ctrl-q              Quote"));
    all_lines.push(Line::raw("  Ctrl-t              Table"));
    all_lines.push(Line::raw("  Ctrl-r              Horizontal rule"));
    all_lines.push(Line::raw("  Tab                 Four spaces"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Document", section_style));
    all_lines.push(Line::raw("  Ctrl-s              Save file / draft"));
    all_lines.push(Line::raw("  Ctrl-e              Export timestamped .md"));
    all_lines.push(Line::raw("  Ctrl-n              New document"));
    all_lines.push(Line::raw("  Ctrl-d              Clear document"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("View", section_style));
    all_lines.push(Line::raw("  F2                  Cycle split/editor/preview"));
    all_lines.push(Line::raw("  F3                  Toggle theme"));
    all_lines.push(Line::raw("  F4                  Toggle fullscreen"));
    all_lines.push(Line::raw("  PageUp/PageDown     Page through the document"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Other", section_style));
    all_lines.push(Line::raw("  Ctrl-c              Quit (press twice if unsaved)"));
    all_lines.push(Line::raw("  ? any key           Close this help"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Config", section_style));
    all_lines.push(Line::raw(format!("  Global: {global_cfg}")));
    all_lines.push(Line::raw(format!("  Local override: {local_cfg}")));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(all_lines).block(block), popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
