use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::{ThemeMode, ViewMode};
use crate::convert;
use crate::editor::EditorBuffer;
use crate::preview::PreviewDoc;
use crate::stats::TextStats;
use crate::ui::viewport::Viewport;

/// Severity of a transient status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state. The preview document
/// is derived state: it is recomputed from the buffer on every edit and never
/// mutated directly.
pub struct Model {
    /// The source text being edited
    pub buffer: EditorBuffer,
    /// Last known terminal size, the basis for pane layout
    pub terminal_size: (u16, u16),
    /// File backing the buffer; `None` for an unnamed draft
    pub file_path: Option<PathBuf>,
    /// Which panes are shown
    pub view_mode: ViewMode,
    /// Current color theme
    pub theme: ThemeMode,
    /// Hide the status bar for distraction-free writing
    pub fullscreen: bool,
    /// Whether the startup splash is still up
    pub splash_visible: bool,
    /// Whether the help overlay is visible
    pub help_visible: bool,
    /// Interpreted preview of the converted markup
    pub preview: PreviewDoc,
    /// Scroll state of the preview pane
    pub preview_viewport: Viewport,
    /// Scroll state of the editor pane
    pub editor_viewport: Viewport,
    /// Word/char/line counters for the status bar
    pub stats: TextStats,
    /// Whether edits schedule a draft autosave
    pub autosave_enabled: bool,
    /// An edit happened since the last autosave
    pub autosave_pending: bool,
    /// When the draft or file was last written
    pub last_saved: Option<Instant>,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Set after a first quit attempt with unsaved changes
    pub quit_confirmed: bool,
    /// Set after a first new-document attempt over a non-empty buffer
    pub new_confirmed: bool,
    /// Set after a first clear attempt over a non-empty buffer
    pub clear_confirmed: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("file_path", &self.file_path)
            .field("view_mode", &self.view_mode)
            .field("theme", &self.theme)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model around `text` with default settings.
    pub fn new(text: &str, terminal_size: (u16, u16)) -> Self {
        let buffer = EditorBuffer::from_text(text);
        let (width, height) = terminal_size;
        let mut model = Self {
            buffer,
            terminal_size,
            file_path: None,
            view_mode: ViewMode::Split,
            theme: ThemeMode::Dark,
            fullscreen: false,
            splash_visible: false,
            help_visible: false,
            preview: PreviewDoc::empty(),
            preview_viewport: Viewport::new(width, height, 0),
            editor_viewport: Viewport::new(width, height, 0),
            stats: TextStats::default(),
            autosave_enabled: true,
            autosave_pending: false,
            last_saved: None,
            config_global_path: None,
            config_local_path: None,
            toast: None,
            should_quit: false,
            quit_confirmed: false,
            new_confirmed: false,
            clear_confirmed: false,
        };
        model.apply_layout();
        model.refresh_preview();
        model
    }

    /// Recompute pane viewports for the stored terminal size and the current
    /// view mode.
    pub fn apply_layout(&mut self) {
        let (width, height) = self.terminal_size;
        let layout = crate::ui::pane_layout(width, height, self.view_mode, self.fullscreen);
        self.editor_viewport.resize(layout.editor_width, layout.content_height);
        self.preview_viewport
            .resize(layout.preview_width, layout.content_height);
    }

    /// Re-run the converter over the whole buffer and refresh derived state.
    ///
    /// Called after every buffer-changing message, mirroring the original
    /// editor's render-on-every-keystroke contract.
    pub fn refresh_preview(&mut self) {
        let text = self.buffer.text();
        let markup = convert::render(&text);
        self.preview = PreviewDoc::from_markup(&markup);
        self.preview_viewport.set_total_lines(self.preview.line_count());
        self.editor_viewport.set_total_lines(self.buffer.line_count());
        self.stats = TextStats::of(&text);
        self.follow_cursor();
    }

    /// Keep the cursor row visible and drag the preview along
    /// proportionally, like the original's scroll-synced gutter.
    pub fn follow_cursor(&mut self) {
        let cursor_line = self.buffer.cursor().line;
        self.editor_viewport.ensure_visible(cursor_line);
        let last = self.buffer.line_count().saturating_sub(1);
        if last > 0 {
            // Line position as a fraction of the document
            #[allow(clippy::cast_precision_loss)]
            self.preview_viewport
                .go_to_fraction(cursor_line as f64 / last as f64);
        }
    }

    /// Whether the buffer has text worth a destructive-action confirmation.
    pub fn has_content(&self) -> bool {
        !self.buffer.text().trim().is_empty()
    }

    /// Label for the status bar: the file name or "draft".
    pub fn file_label(&self) -> String {
        self.file_path.as_ref().map_or_else(
            || "draft".to_string(),
            |p| {
                p.file_name()
                    .map_or_else(|| p.display().to_string(), |n| n.to_string_lossy().to_string())
            },
        )
    }

    /// Seconds since the last save, if any.
    pub fn saved_age(&self, now: Instant) -> Option<u64> {
        self.last_saved
            .map(|at| now.saturating_duration_since(at).as_secs())
    }

    /// One-based visual column of the cursor, in display cells rather than
    /// bytes (wide characters count for their rendered width).
    pub fn cursor_display_col(&self) -> usize {
        use unicode_width::UnicodeWidthStr;
        let cursor = self.buffer.cursor();
        let line = self.buffer.line_at(cursor.line).unwrap_or_default();
        let col = cursor.col.min(line.len());
        line[..col].width() + 1
    }

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    /// Drop the toast once its deadline passes. Returns `true` when a
    /// repaint is needed.
    pub fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Reset all double-press confirmation flags.
    pub const fn reset_confirmations(&mut self) {
        self.quit_confirmed = false;
        self.new_confirmed = false;
        self.clear_confirmed = false;
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self::new("", (80, 24))
    }
}
