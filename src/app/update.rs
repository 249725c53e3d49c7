use crate::app::Model;
use crate::app::model::ToastLevel;
use crate::editor::Direction;
use crate::snippet::Snippet;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Type a character at the cursor
    InsertChar(char),
    /// Split the line at the cursor (Enter)
    InsertNewline,
    /// Insert a soft tab (four spaces)
    InsertTab,
    /// Insert a formatting snippet at the cursor
    InsertSnippet(Snippet),
    /// Delete the character before the cursor (Backspace)
    DeleteBack,
    /// Delete the character at the cursor (Delete)
    DeleteForward,

    // Cursor movement
    /// Move the cursor one step
    MoveCursor(Direction),
    /// Move to beginning of line (Home)
    MoveHome,
    /// Move to end of line (End)
    MoveEnd,
    /// Move to start of buffer (Ctrl+Home)
    MoveToStart,
    /// Move to end of buffer (Ctrl+End)
    MoveToEnd,
    /// Move the cursor a page up or down (editor-only view)
    CursorPage(Direction),

    // Preview navigation
    /// Scroll the preview up by n lines
    PreviewScrollUp(usize),
    /// Scroll the preview down by n lines
    PreviewScrollDown(usize),
    /// Scroll the preview up one page
    PreviewPageUp,
    /// Scroll the preview down one page
    PreviewPageDown,

    // Toggles
    /// Cycle through split, editor-only, and preview-only views
    CycleView,
    /// Switch between dark and light theme
    ToggleTheme,
    /// Hide or show the status bar
    ToggleFullscreen,
    /// Toggle the help overlay
    ToggleHelp,
    /// Hide the help overlay
    HideHelp,
    /// Dismiss the startup splash
    CloseSplash,

    // Document actions
    /// Start an empty document (double-press over unsaved content)
    NewDocument,
    /// Wipe the buffer (double-press over unsaved content)
    ClearDocument,
    /// Save to the backing file, or the draft store when unnamed
    SaveFile,
    /// Write the buffer to a timestamped markdown file
    ExportFile,

    // Window
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit the application
    Quit,
}

impl Message {
    /// Whether this message can change the buffer text.
    pub const fn edits_buffer(self) -> bool {
        matches!(
            self,
            Self::InsertChar(_)
                | Self::InsertNewline
                | Self::InsertTab
                | Self::InsertSnippet(_)
                | Self::DeleteBack
                | Self::DeleteForward
                | Self::NewDocument
                | Self::ClearDocument
        )
    }
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// Side effects (file and store writes) run afterwards in the effects layer.
pub fn update(mut model: Model, msg: Message) -> Model {
    // A destructive action must be pressed twice in a row; any other message
    // in between withdraws the pending confirmation.
    if !matches!(msg, Message::Quit | Message::NewDocument | Message::ClearDocument) {
        model.reset_confirmations();
    }

    match msg {
        // Editing
        Message::InsertChar(ch) => {
            model.buffer.insert_char(ch);
            model.after_edit();
        }
        Message::InsertNewline => {
            model.buffer.split_line();
            model.after_edit();
        }
        Message::InsertTab => {
            model.buffer.insert_str("    ");
            model.after_edit();
        }
        Message::InsertSnippet(snippet) => {
            let (text, caret) = snippet.expansion();
            model.buffer.insert_snippet(text, caret);
            model.after_edit();
        }
        Message::DeleteBack => {
            if model.buffer.delete_back() {
                model.after_edit();
            }
        }
        Message::DeleteForward => {
            if model.buffer.delete_forward() {
                model.after_edit();
            }
        }

        // Cursor movement
        Message::MoveCursor(direction) => {
            model.buffer.move_cursor(direction);
            model.follow_cursor();
        }
        Message::MoveHome => {
            model.buffer.move_home();
            model.follow_cursor();
        }
        Message::MoveEnd => {
            model.buffer.move_end();
            model.follow_cursor();
        }
        Message::MoveToStart => {
            model.buffer.move_to_start();
            model.follow_cursor();
        }
        Message::MoveToEnd => {
            model.buffer.move_to_end();
            model.follow_cursor();
        }
        Message::CursorPage(direction) => {
            let page = model.editor_viewport.height().max(1) as usize;
            let cursor = model.buffer.cursor();
            let target = match direction {
                Direction::Up | Direction::Left => cursor.line.saturating_sub(page),
                Direction::Down | Direction::Right => cursor.line + page,
            };
            model.buffer.move_to(target, cursor.col);
            model.follow_cursor();
        }

        // Preview navigation
        Message::PreviewScrollUp(n) => model.preview_viewport.scroll_up(n),
        Message::PreviewScrollDown(n) => model.preview_viewport.scroll_down(n),
        Message::PreviewPageUp => model.preview_viewport.page_up(),
        Message::PreviewPageDown => model.preview_viewport.page_down(),

        // Toggles
        Message::CycleView => {
            model.view_mode = model.view_mode.next();
            model.apply_layout();
            model.follow_cursor();
            model.show_toast(ToastLevel::Info, format!("View: {}", model.view_mode.as_str()));
        }
        Message::ToggleTheme => {
            model.theme = model.theme.toggled();
            model.show_toast(ToastLevel::Info, format!("Theme: {}", model.theme.as_str()));
        }
        Message::ToggleFullscreen => {
            model.fullscreen = !model.fullscreen;
            model.apply_layout();
            model.follow_cursor();
        }
        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,
        Message::CloseSplash => model.splash_visible = false,

        // Document actions
        Message::NewDocument => {
            if model.has_content() && !model.new_confirmed {
                model.new_confirmed = true;
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved content will be lost. Press again to start new",
                );
            } else {
                model.new_confirmed = false;
                model.buffer.replace_all("");
                model.file_path = None;
                model.after_edit();
                model.show_toast(ToastLevel::Info, "New document");
            }
        }
        Message::ClearDocument => {
            if model.has_content() && !model.clear_confirmed {
                model.clear_confirmed = true;
                model.show_toast(
                    ToastLevel::Warning,
                    "This cannot be undone. Press again to clear",
                );
            } else {
                model.clear_confirmed = false;
                model.buffer.replace_all("");
                model.after_edit();
                model.show_toast(ToastLevel::Info, "Cleared");
            }
        }

        // Save and export take effect in the effects layer.
        Message::SaveFile | Message::ExportFile => {}

        // Window
        Message::Resize(width, height) => {
            model.terminal_size = (width, height);
            model.apply_layout();
            model.follow_cursor();
        }

        // Application
        Message::Quit => {
            if model.buffer.is_dirty() && !model.quit_confirmed {
                model.quit_confirmed = true;
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes. Press again to quit",
                );
            } else {
                model.should_quit = true;
            }
        }
    }

    model
}

impl Model {
    /// Shared follow-up for every buffer mutation: re-render the preview and
    /// arm the autosave debounce.
    fn after_edit(&mut self) {
        self.refresh_preview();
        if self.autosave_enabled {
            self.autosave_pending = true;
        }
    }
}
