//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::config::{ThemeMode, ViewMode};
use crate::storage::DraftStore;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: Option<PathBuf>,
    theme: Option<ThemeMode>,
    view: Option<ViewMode>,
    autosave_enabled: bool,
    fullscreen: bool,
    splash_enabled: bool,
    store: DraftStore,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application over the default draft store.
    pub fn new() -> Self {
        Self {
            file_path: None,
            theme: None,
            view: None,
            autosave_enabled: true,
            fullscreen: false,
            splash_enabled: true,
            store: DraftStore::open_default(),
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Edit a file instead of the unnamed draft.
    pub fn with_file(mut self, path: Option<PathBuf>) -> Self {
        self.file_path = path;
        self
    }

    /// Force a theme, overriding the stored preference.
    pub const fn with_theme(mut self, theme: Option<ThemeMode>) -> Self {
        self.theme = theme;
        self
    }

    /// Set the initial view mode.
    pub const fn with_view(mut self, view: Option<ViewMode>) -> Self {
        self.view = view;
        self
    }

    /// Enable or disable draft autosaving.
    pub const fn with_autosave(mut self, enabled: bool) -> Self {
        self.autosave_enabled = enabled;
        self
    }

    /// Start with the status bar hidden.
    pub const fn with_fullscreen(mut self, enabled: bool) -> Self {
        self.fullscreen = enabled;
        self
    }

    /// Enable or disable the startup splash.
    pub const fn with_splash(mut self, enabled: bool) -> Self {
        self.splash_enabled = enabled;
        self
    }

    /// Use a specific draft store (tests, `--store-dir`).
    pub fn with_store(mut self, store: DraftStore) -> Self {
        self.store = store;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
