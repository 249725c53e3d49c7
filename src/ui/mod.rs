//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll position and visible range management
//! - [`style`]: Theming and colors
//! - Pane layout, status bar, and overlay rendering

pub mod style;
pub mod viewport;

mod overlays;
mod render;
mod status;

pub use render::render;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::config::ViewMode;

pub const EDITOR_WIDTH_PERCENT: u16 = 50;
pub const PREVIEW_WIDTH_PERCENT: u16 = 50;

/// Pane sizes derived from the terminal size and view mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneLayout {
    pub editor_width: u16,
    pub preview_width: u16,
    pub content_height: u16,
}

/// Split the content columns for the split view.
pub fn split_panes(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(EDITOR_WIDTH_PERCENT),
            Constraint::Percentage(PREVIEW_WIDTH_PERCENT),
        ])
        .split(area)
}

/// Compute pane sizes for a terminal of `width` x `height`.
///
/// The bottom row is reserved for the status bar unless fullscreen is on.
/// A hidden pane gets zero width so its viewport scrolls nothing.
pub fn pane_layout(width: u16, height: u16, view: ViewMode, fullscreen: bool) -> PaneLayout {
    let content_height = if fullscreen {
        height
    } else {
        height.saturating_sub(1)
    };
    let (editor_width, preview_width) = match view {
        ViewMode::Split => {
            let area = Rect::new(0, 0, width, 1);
            let chunks = split_panes(area);
            (chunks[0].width, chunks[1].width)
        }
        ViewMode::Editor => (width, 0),
        ViewMode::Preview => (0, width),
    };
    PaneLayout {
        editor_width,
        preview_width,
        content_height,
    }
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}

#[cfg(test)]
mod tests;
