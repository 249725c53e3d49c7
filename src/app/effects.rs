use std::time::Instant;

use crate::app::{App, Message, Model, ToastLevel};
use crate::storage;

impl App {
    /// Run the side effects a message calls for, after the pure update.
    ///
    /// File and store writes live here so [`super::update`] stays a pure
    /// state transition.
    pub(super) fn handle_message_side_effects(&self, model: &mut Model, msg: &Message) {
        match msg {
            Message::SaveFile => self.save_document(model),
            Message::ExportFile => Self::export_document(model),
            Message::NewDocument | Message::ClearDocument => {
                // Only when the wipe actually happened (not the first,
                // confirmation-requesting press) does the stored draft go too.
                if !model.has_content()
                    && let Err(err) = self.store.clear_draft()
                {
                    model.show_toast(ToastLevel::Error, format!("Store cleanup failed: {err}"));
                }
            }
            Message::ToggleTheme => {
                if let Err(err) = self.store.save_theme(model.theme.as_str()) {
                    tracing::warn!(%err, "failed to persist theme preference");
                }
            }
            _ => {}
        }
    }

    /// Write the buffer to its backing file, or to the draft store for an
    /// unnamed document.
    fn save_document(&self, model: &mut Model) {
        let text = model.buffer.text();
        let outcome = match model.file_path.clone() {
            Some(path) => std::fs::write(&path, &text)
                .map(|()| format!("Saved {}", path.display()))
                .map_err(|err| format!("Save failed: {err}")),
            None => self
                .store
                .save_draft(&text)
                .map(|()| "Draft saved".to_string())
                .map_err(|err| format!("Save failed: {err}")),
        };
        match outcome {
            Ok(message) => {
                model.buffer.mark_clean();
                model.autosave_pending = false;
                model.last_saved = Some(Instant::now());
                model.show_toast(ToastLevel::Info, message);
            }
            Err(message) => model.show_toast(ToastLevel::Error, message),
        }
    }

    /// Write the buffer to a timestamped markdown file in the working
    /// directory.
    fn export_document(model: &mut Model) {
        let name = format!("document-{}.md", storage::unix_now());
        match std::fs::write(&name, model.buffer.text()) {
            Ok(()) => model.show_toast(ToastLevel::Info, format!("Exported {name}")),
            Err(err) => model.show_toast(ToastLevel::Error, format!("Export failed: {err}")),
        }
    }

    /// The debounced autosave: mirror the buffer into the draft store.
    pub(super) fn autosave(&self, model: &mut Model) {
        if let Err(err) = self.store.save_draft(&model.buffer.text()) {
            tracing::warn!(%err, "autosave failed");
            model.show_toast(ToastLevel::Warning, format!("Autosave failed: {err}"));
            return;
        }
        model.autosave_pending = false;
        model.last_saved = Some(Instant::now());
        tracing::debug!(chars = model.stats.chars, "draft autosaved");
    }
}
