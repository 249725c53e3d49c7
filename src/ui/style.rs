//! Theming and color definitions.
//!
//! Styles resolve per theme so the preview stays readable on both dark and
//! light terminal backgrounds. Uses ANSI colors that adapt to the terminal's
//! palette, with indexed fallbacks for the light theme.

use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeMode;
use crate::preview::{InlineStyle, LineKind};

/// Get the base style for a preview line kind.
pub fn style_for_kind(kind: LineKind, theme: ThemeMode) -> Style {
    let light = theme == ThemeMode::Light;
    match kind {
        LineKind::Heading(1) => Style::default()
            .fg(if light { Color::Indexed(24) } else { Color::Cyan })
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        LineKind::Heading(2) => Style::default()
            .fg(if light { Color::Indexed(22) } else { Color::Green })
            .add_modifier(Modifier::BOLD),
        LineKind::Heading(_) => Style::default()
            .fg(if light { Color::Indexed(58) } else { Color::Yellow })
            .add_modifier(Modifier::BOLD),

        LineKind::Code => Style::default()
            .fg(if light {
                Color::Indexed(238)
            } else {
                Color::Indexed(245)
            })
            .add_modifier(Modifier::DIM),

        LineKind::Quote => Style::default()
            .fg(if light { Color::Indexed(24) } else { Color::Blue })
            .add_modifier(Modifier::ITALIC),

        LineKind::Rule => Style::default()
            .fg(if light {
                Color::Indexed(241)
            } else {
                Color::Indexed(240)
            })
            .add_modifier(Modifier::DIM),

        LineKind::ListItem | LineKind::TableRow | LineKind::Paragraph | LineKind::Empty => {
            Style::default()
        }
    }
}

/// Merge a span's inline flags into its line's base style.
pub fn style_for_inline(base: Style, inline: InlineStyle, theme: ThemeMode) -> Style {
    let light = theme == ThemeMode::Light;
    let mut style = base;

    if inline.strong {
        style = style.add_modifier(Modifier::BOLD);
    }
    if inline.emphasis {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if inline.code {
        style = style
            .fg(if light {
                Color::Indexed(94)
            } else {
                Color::Indexed(215)
            })
            .remove_modifier(Modifier::DIM);
    }
    if inline.link {
        style = style
            .fg(if light { Color::Indexed(26) } else { Color::Cyan })
            .add_modifier(Modifier::UNDERLINED);
    }
    if inline.image {
        style = style
            .fg(if light { Color::Indexed(90) } else { Color::Magenta })
            .add_modifier(Modifier::ITALIC);
    }

    style
}

/// Style for the editor pane's line-number gutter.
pub fn gutter_style(theme: ThemeMode) -> Style {
    match theme {
        ThemeMode::Dark => Style::default().fg(Color::DarkGray),
        ThemeMode::Light => Style::default().fg(Color::Indexed(248)),
    }
}

/// Style for the block cursor in the editor pane.
pub fn cursor_style(theme: ThemeMode) -> Style {
    match theme {
        ThemeMode::Dark => Style::default().bg(Color::White).fg(Color::Black),
        ThemeMode::Light => Style::default().bg(Color::Black).fg(Color::White),
    }
}
