use super::{Message, Model, ToastLevel, update};
use crate::config::{ThemeMode, ViewMode};
use crate::editor::Direction;
use crate::snippet::Snippet;

fn create_test_model() -> Model {
    Model::new("# Test\n\nHello world", (80, 24))
}

fn type_text(mut model: Model, text: &str) -> Model {
    for ch in text.chars() {
        model = update(model, Message::InsertChar(ch));
    }
    model
}

// --- Editing updates derived state ---

#[test]
fn test_insert_char_updates_buffer_and_stats() {
    let model = Model::new("", (80, 24));
    let model = type_text(model, "hi there");
    assert_eq!(model.buffer.text(), "hi there");
    assert_eq!(model.stats.words, 2);
    assert!(model.autosave_pending);
}

#[test]
fn test_insert_newline_splits_line() {
    let model = Model::new("", (80, 24));
    let model = type_text(model, "ab");
    let model = update(model, Message::InsertNewline);
    assert_eq!(model.buffer.line_count(), 2);
    assert_eq!(model.buffer.cursor().line, 1);
}

#[test]
fn test_typing_heading_reaches_preview() {
    let model = Model::new("", (80, 24));
    let model = type_text(model, "# Big");
    let first = &model.preview.lines()[0];
    assert_eq!(first.kind(), crate::preview::LineKind::Heading(1));
    assert_eq!(first.content(), "Big");
}

#[test]
fn test_insert_tab_is_four_spaces() {
    let model = Model::new("", (80, 24));
    let model = update(model, Message::InsertTab);
    assert_eq!(model.buffer.text(), "    ");
}

#[test]
fn test_delete_back_updates_stats() {
    let model = Model::new("", (80, 24));
    let model = type_text(model, "abc");
    let model = update(model, Message::DeleteBack);
    assert_eq!(model.buffer.text(), "ab");
    assert_eq!(model.stats.chars, 2);
}

#[test]
fn test_snippet_insertion_via_message() {
    let model = Model::new("", (80, 24));
    let model = update(model, Message::InsertSnippet(Snippet::Bold));
    assert_eq!(model.buffer.text(), "****");
    assert_eq!(model.buffer.cursor().col, 2);
    assert!(model.buffer.is_dirty());
}

// --- Cursor movement ---

#[test]
fn test_move_cursor_follows_in_editor_viewport() {
    let mut text = String::new();
    for i in 0..100 {
        text.push_str(&format!("line {i}\n"));
    }
    let mut model = Model::new(&text, (80, 24));
    model.buffer.move_to(90, 0);
    let model = update(model, Message::MoveCursor(Direction::Down));
    assert!(
        model.editor_viewport.visible_range().contains(&91),
        "cursor line stays visible, offset {}",
        model.editor_viewport.offset()
    );
}

#[test]
fn test_cursor_page_moves_by_viewport_height() {
    let mut text = String::new();
    for i in 0..100 {
        text.push_str(&format!("line {i}\n"));
    }
    let model = Model::new(&text, (80, 24));
    let page = model.editor_viewport.height() as usize;
    let model = update(model, Message::CursorPage(Direction::Down));
    assert_eq!(model.buffer.cursor().line, page);
}

#[test]
fn test_cursor_display_col_counts_cells_not_bytes() {
    let mut model = Model::new("日本", (80, 24));
    model.buffer.move_end();
    // Six bytes into the line, but only four display cells wide.
    assert_eq!(model.buffer.cursor().col, 6);
    assert_eq!(model.cursor_display_col(), 5);
}

// --- Preview scrolling ---

#[test]
fn test_preview_scroll_messages() {
    let mut text = String::new();
    for i in 0..200 {
        text.push_str(&format!("para {i}\n\n"));
    }
    let model = Model::new(&text, (80, 24));
    let model = update(model, Message::PreviewScrollDown(7));
    assert_eq!(model.preview_viewport.offset(), 7);
    let model = update(model, Message::PreviewScrollUp(3));
    assert_eq!(model.preview_viewport.offset(), 4);
}

// --- Toggles ---

#[test]
fn test_cycle_view_rotates_modes() {
    let model = create_test_model();
    assert_eq!(model.view_mode, ViewMode::Split);
    let model = update(model, Message::CycleView);
    assert_eq!(model.view_mode, ViewMode::Editor);
    let model = update(model, Message::CycleView);
    assert_eq!(model.view_mode, ViewMode::Preview);
    let model = update(model, Message::CycleView);
    assert_eq!(model.view_mode, ViewMode::Split);
}

#[test]
fn test_cycle_view_resizes_panes() {
    let model = create_test_model();
    let split_width = model.editor_viewport.width();
    let model = update(model, Message::CycleView);
    assert!(model.editor_viewport.width() > split_width);
}

#[test]
fn test_toggle_theme() {
    let model = create_test_model();
    assert_eq!(model.theme, ThemeMode::Dark);
    let model = update(model, Message::ToggleTheme);
    assert_eq!(model.theme, ThemeMode::Light);
    let model = update(model, Message::ToggleTheme);
    assert_eq!(model.theme, ThemeMode::Dark);
}

#[test]
fn test_toggle_fullscreen_reclaims_status_row() {
    let model = create_test_model();
    let height = model.editor_viewport.height();
    let model = update(model, Message::ToggleFullscreen);
    assert_eq!(model.editor_viewport.height(), height + 1);
}

#[test]
fn test_close_splash() {
    let mut model = create_test_model();
    model.splash_visible = true;
    let model = update(model, Message::CloseSplash);
    assert!(!model.splash_visible);
}

#[test]
fn test_help_toggle_and_hide() {
    let model = create_test_model();
    let model = update(model, Message::ToggleHelp);
    assert!(model.help_visible);
    let model = update(model, Message::HideHelp);
    assert!(!model.help_visible);
}

// --- Quit confirmation ---

#[test]
fn test_quit_with_clean_buffer_quits_immediately() {
    let model = create_test_model();
    let model = update(model, Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_quit_with_dirty_buffer_needs_double_press() {
    let model = type_text(Model::new("", (80, 24)), "unsaved");
    let model = update(model, Message::Quit);
    assert!(!model.should_quit);
    assert!(model.quit_confirmed);
    let model = update(model, Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_other_message_withdraws_quit_confirmation() {
    let model = type_text(Model::new("", (80, 24)), "unsaved");
    let model = update(model, Message::Quit);
    assert!(model.quit_confirmed);
    let model = update(model, Message::MoveCursor(Direction::Left));
    assert!(!model.quit_confirmed);
}

// --- New / clear document ---

#[test]
fn test_new_document_over_content_needs_double_press() {
    let model = type_text(Model::new("", (80, 24)), "something");
    let model = update(model, Message::NewDocument);
    assert_eq!(model.buffer.text(), "something", "first press only warns");
    assert!(model.new_confirmed);
    let model = update(model, Message::NewDocument);
    assert_eq!(model.buffer.text(), "");
    assert!(model.file_path.is_none());
}

#[test]
fn test_new_document_on_empty_buffer_is_immediate() {
    let model = Model::new("", (80, 24));
    let model = update(model, Message::NewDocument);
    assert_eq!(model.buffer.text(), "");
    assert!(!model.new_confirmed);
}

#[test]
fn test_clear_document_double_press_wipes_buffer() {
    let model = type_text(Model::new("", (80, 24)), "wipe me");
    let model = update(model, Message::ClearDocument);
    assert!(model.clear_confirmed);
    let model = update(model, Message::ClearDocument);
    assert_eq!(model.buffer.text(), "");
    assert_eq!(model.stats.words, 0);
}

#[test]
fn test_whitespace_only_buffer_skips_confirmation() {
    let model = type_text(Model::new("", (80, 24)), "   ");
    let model = update(model, Message::NewDocument);
    assert_eq!(model.buffer.text(), "");
}

// --- Window ---

#[test]
fn test_resize_updates_layout() {
    let model = create_test_model();
    let model = update(model, Message::Resize(120, 40));
    assert_eq!(model.terminal_size, (120, 40));
    assert_eq!(
        model.editor_viewport.width() + model.preview_viewport.width(),
        120
    );
    assert_eq!(model.editor_viewport.height(), 39);
}

// --- Toasts ---

#[test]
fn test_toggle_theme_shows_toast() {
    let model = create_test_model();
    let model = update(model, Message::ToggleTheme);
    let (message, level) = model.active_toast().expect("toast shown");
    assert!(message.contains("light"));
    assert_eq!(level, ToastLevel::Info);
}

#[test]
fn test_toast_expires() {
    let mut model = create_test_model();
    model.show_toast(ToastLevel::Info, "hello");
    assert!(model.active_toast().is_some());
    let later = std::time::Instant::now() + std::time::Duration::from_secs(10);
    assert!(model.expire_toast(later));
    assert!(model.active_toast().is_none());
}

// --- Autosave bookkeeping ---

#[test]
fn test_edits_buffer_classification() {
    assert!(Message::InsertChar('a').edits_buffer());
    assert!(Message::InsertSnippet(Snippet::Table).edits_buffer());
    assert!(Message::DeleteBack.edits_buffer());
    assert!(!Message::MoveHome.edits_buffer());
    assert!(!Message::ToggleTheme.edits_buffer());
}

#[test]
fn test_movement_does_not_arm_autosave() {
    let model = create_test_model();
    assert!(!model.autosave_pending);
    let model = update(model, Message::MoveCursor(Direction::Right));
    assert!(!model.autosave_pending);
}

#[test]
fn test_save_and_export_are_pure_noops_in_update() {
    // The effects layer owns the filesystem; update must not touch state.
    let model = create_test_model();
    let text = model.buffer.text();
    let model = update(model, Message::SaveFile);
    assert_eq!(model.buffer.text(), text);
    let model = update(model, Message::ExportFile);
    assert_eq!(model.buffer.text(), text);
}
