use super::*;
use crate::app::Model;
use crate::config::ThemeMode;
use ratatui::Terminal;
use ratatui::backend::TestBackend;

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(80, 24);
    Terminal::new(backend).unwrap()
}

fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer.cell((x, y)).map_or(" ", |c| c.symbol()));
        }
        out.push('\n');
    }
    out
}

#[test]
fn test_pane_layout_split_halves_width() {
    let layout = pane_layout(80, 24, ViewMode::Split, false);
    assert_eq!(layout.editor_width + layout.preview_width, 80);
    assert_eq!(layout.content_height, 23, "one row reserved for status");
}

#[test]
fn test_pane_layout_editor_only() {
    let layout = pane_layout(80, 24, ViewMode::Editor, false);
    assert_eq!(layout.editor_width, 80);
    assert_eq!(layout.preview_width, 0);
}

#[test]
fn test_pane_layout_fullscreen_keeps_all_rows() {
    let layout = pane_layout(80, 24, ViewMode::Preview, true);
    assert_eq!(layout.content_height, 24);
}

#[test]
fn test_line_number_width_grows_with_line_count() {
    assert_eq!(line_number_width(5), 1);
    assert_eq!(line_number_width(42), 2);
    assert_eq!(line_number_width(999), 3);
    assert_eq!(line_number_width(5_000), 4);
    assert_eq!(line_number_width(200_000), 6);
}

#[test]
fn test_render_shows_source_and_preview_in_split() {
    let mut model = Model::new("# Title\n\nhello world", (80, 24));
    model.splash_visible = false;

    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();
    let screen = buffer_text(&terminal);

    // Source (with the hash marker) on the left, rendered heading on the right.
    assert!(screen.contains("# Title"), "editor shows raw source");
    assert!(screen.contains("hello world"));
}

#[test]
fn test_render_status_bar_shows_counts() {
    let mut model = Model::new("one two three", (80, 24));
    model.splash_visible = false;

    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();
    let screen = buffer_text(&terminal);

    assert!(screen.contains("3 words"), "status bar: {screen}");
    assert!(screen.contains("draft"));
}

#[test]
fn test_render_fullscreen_hides_status_bar() {
    let mut model = Model::new("one two three", (80, 24));
    model.splash_visible = false;
    model.fullscreen = true;
    model.apply_layout();

    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();
    let screen = buffer_text(&terminal);

    assert!(!screen.contains("3 words"));
}

#[test]
fn test_render_splash_overlay_text() {
    let mut model = Model::new("", (80, 24));
    model.splash_visible = true;

    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();
    let screen = buffer_text(&terminal);

    assert!(screen.contains("inkdown"));
    assert!(screen.contains("press any key"));
}

#[test]
fn test_render_help_overlay_lists_shortcuts() {
    let mut model = Model::new("", (80, 24));
    model.splash_visible = false;
    model.help_visible = true;

    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();
    let screen = buffer_text(&terminal);

    assert!(screen.contains("Formatting"));
    assert!(screen.contains("Ctrl-s"));
}

#[test]
fn test_render_preview_only_hides_gutter() {
    let mut model = Model::new("alpha", (80, 24));
    model.splash_visible = false;
    model.view_mode = ViewMode::Preview;
    model.apply_layout();

    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();
    let screen = buffer_text(&terminal);

    assert!(screen.contains("alpha"));
    // No "1 " gutter column in preview-only view; the first cell is content.
    let first_line = screen.lines().next().unwrap_or_default();
    assert!(!first_line.trim_start().starts_with("1 "));
}

#[test]
fn test_styles_differ_for_heading_levels() {
    let h1 = style::style_for_kind(crate::preview::LineKind::Heading(1), ThemeMode::Dark);
    let h2 = style::style_for_kind(crate::preview::LineKind::Heading(2), ThemeMode::Dark);
    assert_ne!(h1, h2);
}
