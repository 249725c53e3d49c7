use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::Frame;

use crate::app::{App, Message, Model};
use crate::config::ViewMode;
use crate::editor::Direction;
use crate::snippet::Snippet;

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(w, h) => {
                tracing::debug!(width = *w, height = *h, "resize queued");
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.splash_visible {
            return Some(Message::CloseSplash);
        }
        match mouse.kind {
            MouseEventKind::ScrollDown if model.view_mode == ViewMode::Editor => {
                Some(Message::CursorPage(Direction::Down))
            }
            MouseEventKind::ScrollUp if model.view_mode == ViewMode::Editor => {
                Some(Message::CursorPage(Direction::Up))
            }
            MouseEventKind::ScrollDown if model.preview_viewport.can_scroll_down() => {
                Some(Message::PreviewScrollDown(3))
            }
            MouseEventKind::ScrollUp if model.preview_viewport.can_scroll_up() => {
                Some(Message::PreviewScrollUp(3))
            }
            _ => None,
        }
    }

    fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        // The splash goes away on the first key press, before anything else.
        if model.splash_visible {
            return Some(Message::CloseSplash);
        }
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl {
            return Self::handle_ctrl_key(key.code);
        }

        // Function keys and toggles
        match key.code {
            KeyCode::F(1) => return Some(Message::ToggleHelp),
            KeyCode::F(2) => return Some(Message::CycleView),
            KeyCode::F(3) => return Some(Message::ToggleTheme),
            KeyCode::F(4) => return Some(Message::ToggleFullscreen),
            _ => {}
        }

        // In preview-only view the arrows drive the preview scroll instead
        // of the (hidden) cursor.
        if model.view_mode == ViewMode::Preview {
            return match key.code {
                KeyCode::Up | KeyCode::Char('k') => Some(Message::PreviewScrollUp(1)),
                KeyCode::Down | KeyCode::Char('j') => Some(Message::PreviewScrollDown(1)),
                KeyCode::PageUp => Some(Message::PreviewPageUp),
                KeyCode::PageDown | KeyCode::Char(' ') => Some(Message::PreviewPageDown),
                KeyCode::Home => Some(Message::PreviewScrollUp(usize::MAX)),
                KeyCode::End => Some(Message::PreviewScrollDown(usize::MAX)),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => Some(Message::InsertChar(c)),
            KeyCode::Enter => Some(Message::InsertNewline),
            KeyCode::Tab => Some(Message::InsertTab),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Left => Some(Message::MoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::MoveCursor(Direction::Right)),
            KeyCode::Up => Some(Message::MoveCursor(Direction::Up)),
            KeyCode::Down => Some(Message::MoveCursor(Direction::Down)),
            KeyCode::Home => Some(Message::MoveHome),
            KeyCode::End => Some(Message::MoveEnd),
            KeyCode::PageUp => Some(Message::CursorPage(Direction::Up)),
            KeyCode::PageDown => Some(Message::CursorPage(Direction::Down)),
            _ => None,
        }
    }

    /// Ctrl shortcuts: formatting snippets plus file and app actions.
    fn handle_ctrl_key(code: KeyCode) -> Option<Message> {
        match code {
            // Formatting
            KeyCode::Char('b') => Some(Message::InsertSnippet(Snippet::Bold)),
            KeyCode::Char('i') => Some(Message::InsertSnippet(Snippet::Italic)),
            KeyCode::Char('h') => Some(Message::InsertSnippet(Snippet::Heading)),
            KeyCode::Char('l') => Some(Message::InsertSnippet(Snippet::List)),
            KeyCode::Char('k') => Some(Message::InsertSnippet(Snippet::Link)),
            KeyCode::Char('g') => Some(Message::InsertSnippet(Snippet::Image)),
            KeyCode::Char('`') => Some(Message::InsertSnippet(Snippet::InlineCode)),
            KeyCode::Char('f') => Some(Message::InsertSnippet(Snippet::CodeBlock)),
            KeyCode::Char('q') => Some(Message::InsertSnippet(Snippet::Quote)),
            KeyCode::Char('t') => Some(Message::InsertSnippet(Snippet::Table)),
            KeyCode::Char('r') => Some(Message::InsertSnippet(Snippet::Rule)),

            // Document
            KeyCode::Char('s') => Some(Message::SaveFile),
            KeyCode::Char('e') => Some(Message::ExportFile),
            KeyCode::Char('n') => Some(Message::NewDocument),
            KeyCode::Char('d') => Some(Message::ClearDocument),

            // Cursor
            KeyCode::Home => Some(Message::MoveToStart),
            KeyCode::End => Some(Message::MoveToEnd),

            // Application
            KeyCode::Char('c') => Some(Message::Quit),
            _ => None,
        }
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}
