use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};
use crate::config::ThemeMode;

/// How long the startup splash stays up without a key press.
const SPLASH_MS: u64 = 3000;
/// Edits settle for this long before the draft autosaves.
const AUTOSAVE_DELAY_MS: u64 = 1000;

/// Collapses resize event bursts into one relayout.
pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Holds the autosave back until typing pauses, like the original editor's
/// one-second timer that restarts on every input event.
pub(super) struct AutosaveDebouncer {
    delay_ms: u64,
    queued_at: Option<u64>,
}

impl AutosaveDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            queued_at: None,
        }
    }

    /// (Re)start the countdown; called on every edit.
    pub(super) const fn queue(&mut self, now_ms: u64) {
        self.queued_at = Some(now_ms);
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> bool {
        let Some(queued_at) = self.queued_at else {
            return false;
        };
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.queued_at = None;
            true
        } else {
            false
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.queued_at.is_some()
    }
}

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization fails or the initial
    /// file cannot be read.
    pub fn run(&mut self) -> Result<()> {
        // Resolve the initial text before touching the terminal.
        let (text, restored_age) = self.initial_text()?;

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal — inkdown requires an interactive terminal")?;
        let size = terminal.size()?;
        execute!(stdout(), EnableMouseCapture)?;

        let mut model = Model::new(&text, (size.width, size.height));
        model.file_path.clone_from(&self.file_path);
        model.view_mode = self.view.unwrap_or(model.view_mode);
        model.theme = self.resolve_theme();
        model.fullscreen = self.fullscreen;
        model.autosave_enabled = self.autosave_enabled;
        model.splash_visible = self.splash_enabled;
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        if let Some(age) = restored_age {
            model.last_saved = Instant::now().checked_sub(Duration::from_secs(age));
        }
        model.apply_layout();
        model.refresh_preview();

        let result = self.event_loop(&mut terminal, &mut model);

        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        result
    }

    /// Load the named file, or fall back to the stored draft.
    fn initial_text(&self) -> Result<(String, Option<u64>)> {
        if let Some(path) = &self.file_path {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            return Ok((text, None));
        }
        match self.store.load_draft() {
            Ok(Some(draft)) => {
                let age = draft
                    .last_saved
                    .map(|at| crate::storage::unix_now().saturating_sub(at));
                Ok((draft.content, age))
            }
            Ok(None) => Ok((String::new(), None)),
            Err(err) => {
                tracing::warn!(%err, "draft restore failed, starting empty");
                Ok((String::new(), None))
            }
        }
    }

    /// CLI/config theme wins; otherwise the stored preference; dark last.
    fn resolve_theme(&self) -> ThemeMode {
        self.theme
            .or_else(|| self.store.theme().as_deref().and_then(ThemeMode::parse))
            .unwrap_or(ThemeMode::Dark)
    }

    fn event_loop(&self, terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let splash_deadline = start + Duration::from_millis(SPLASH_MS);
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut autosave_debouncer = AutosaveDebouncer::new(AUTOSAVE_DELAY_MS);
        let mut needs_render = true;

        loop {
            let now = Instant::now();
            if model.expire_toast(now) {
                needs_render = true;
            }
            if model.splash_visible && now >= splash_deadline {
                *model = update(std::mem::take(model), Message::CloseSplash);
                needs_render = true;
            }

            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                tracing::debug!(width, height, "resize applied");
                *model = update(std::mem::take(model), Message::Resize(width, height));
                needs_render = true;
            }

            if autosave_debouncer.take_ready(now_ms) && model.autosave_pending {
                self.autosave(model);
                needs_render = true;
            }

            let poll_ms = if needs_render {
                0
            } else if resize_debouncer.is_pending() || autosave_debouncer.is_pending() {
                10
            } else if model.splash_visible {
                50
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                // Refresh the timestamp after the poll wait so debouncers
                // measure from the actual event time.
                let mut event_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                let mut pending = Some(event::read()?);
                while let Some(ev) = pending.take() {
                    if let Some(msg) =
                        Self::handle_event(&ev, model, event_ms, &mut resize_debouncer)
                    {
                        tracing::trace!(?msg, "message");
                        let side_msg = msg;
                        *model = update(std::mem::take(model), msg);
                        self.handle_message_side_effects(model, &side_msg);
                        if side_msg.edits_buffer() && model.autosave_enabled {
                            autosave_debouncer.queue(event_ms);
                        }
                        needs_render = true;
                    }
                    // Coalesce key repeat bursts into a single render.
                    if event::poll(Duration::from_millis(0))? {
                        event_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                        pending = Some(event::read()?);
                    }
                }
            }

            if needs_render {
                terminal.draw(|frame| Self::view(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}
