use std::time::Instant;

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;
use crate::config::ThemeMode;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let dirty_indicator = if model.buffer.is_dirty() {
        " [modified]"
    } else {
        ""
    };
    let cursor = model.buffer.cursor();

    let status = format!(
        " {}{}  Ln {}, Col {}  {}  [{}·{}]{}  F1:help",
        model.file_label(),
        dirty_indicator,
        cursor.line + 1,
        model.cursor_display_col(),
        model.stats,
        model.view_mode.as_str(),
        model.theme.as_str(),
        save_segment(model),
    );

    let style = match model.theme {
        ThemeMode::Dark => Style::default().bg(Color::DarkGray).fg(Color::White),
        ThemeMode::Light => Style::default().bg(Color::Indexed(252)).fg(Color::Black),
    };
    frame.render_widget(Paragraph::new(status).style(style), area);
}

/// The autosave segment: last save age, pending marker, or off.
fn save_segment(model: &Model) -> String {
    if !model.autosave_enabled {
        return "  autosave off".to_string();
    }
    if model.autosave_pending {
        return "  saving…".to_string();
    }
    match model.saved_age(Instant::now()) {
        Some(secs) if secs < 5 => "  saved just now".to_string(),
        Some(secs) if secs < 60 => format!("  saved {secs}s ago"),
        Some(secs) if secs < 3600 => format!("  saved {}m ago", secs / 60),
        Some(secs) => format!("  saved {}h ago", secs / 3600),
        None => String::new(),
    }
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        crate::app::ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        crate::app::ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        crate::app::ToastLevel::Error => {
            ("[error]", Style::default().bg(Color::Red).fg(Color::White))
        }
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
