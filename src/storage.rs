//! Draft persistence and preferences.
//!
//! The store is the terminal counterpart of the original web editor's local
//! storage: the raw markdown source lives in `draft.md`, while `meta.json`
//! carries the last-saved timestamp and the theme preference. Unnamed
//! documents autosave here and are restored on the next launch.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const DRAFT_FILE: &str = "draft.md";
const META_FILE: &str = "meta.json";

/// A restored draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    /// The raw markdown source.
    pub content: String,
    /// UNIX seconds of the last save, when recorded.
    pub last_saved: Option<u64>,
}

/// Sidecar metadata kept next to the draft.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    last_saved: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    theme: Option<String>,
}

/// File-backed draft and preference store.
#[derive(Debug, Clone)]
pub struct DraftStore {
    dir: PathBuf,
}

impl DraftStore {
    /// Open the store at the platform's default data directory.
    pub fn open_default() -> Self {
        Self::at(default_store_dir())
    }

    /// Open a store rooted at `dir` (used by tests and `--store-dir`).
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory backing this store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load the saved draft, if one exists.
    pub fn load_draft(&self) -> Result<Option<Draft>> {
        let path = self.dir.join(DRAFT_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read draft {}", path.display()))?;
        Ok(Some(Draft {
            content,
            last_saved: self.read_meta().last_saved,
        }))
    }

    /// Save `content` as the current draft, stamping the save time.
    pub fn save_draft(&self, content: &str) -> Result<()> {
        self.ensure_dir()?;
        let path = self.dir.join(DRAFT_FILE);
        fs::write(&path, content)
            .with_context(|| format!("Failed to write draft {}", path.display()))?;
        let mut meta = self.read_meta();
        meta.last_saved = Some(unix_now());
        self.write_meta(&meta)
    }

    /// Remove the draft and its timestamp, keeping the theme preference.
    pub fn clear_draft(&self) -> Result<()> {
        if !self.dir.exists() {
            return Ok(());
        }
        let path = self.dir.join(DRAFT_FILE);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        let mut meta = self.read_meta();
        meta.last_saved = None;
        self.write_meta(&meta)
    }

    /// The saved theme preference, if any.
    pub fn theme(&self) -> Option<String> {
        self.read_meta().theme
    }

    /// Persist the theme preference.
    pub fn save_theme(&self, theme: &str) -> Result<()> {
        self.ensure_dir()?;
        let mut meta = self.read_meta();
        meta.theme = Some(theme.to_string());
        self.write_meta(&meta)
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create store dir {}", self.dir.display()))
    }

    /// Unreadable or corrupt metadata degrades to defaults; the draft text
    /// itself is the thing worth protecting.
    fn read_meta(&self) -> Meta {
        let path = self.dir.join(META_FILE);
        fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    fn write_meta(&self, meta: &Meta) -> Result<()> {
        let path = self.dir.join(META_FILE);
        let raw = serde_json::to_string_pretty(meta).context("Failed to encode store metadata")?;
        fs::write(&path, raw)
            .with_context(|| format!("Failed to write metadata {}", path.display()))
    }
}

/// Seconds since the UNIX epoch.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

/// Platform data directory for the store.
pub fn default_store_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("inkdown");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("inkdown");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("inkdown");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("inkdown");
        }
    }

    PathBuf::from(".inkdown")
}
