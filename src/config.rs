use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Color theme for the UI.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    /// The other theme.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }
}

/// Which panes are shown.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Editor and preview side by side
    Split,
    /// Editing pane only
    Editor,
    /// Preview pane only
    Preview,
}

impl ViewMode {
    /// The next mode in the split, editor, preview cycle.
    pub const fn next(self) -> Self {
        match self {
            Self::Split => Self::Editor,
            Self::Editor => Self::Preview,
            Self::Preview => Self::Split,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Split => "split",
            Self::Editor => "editor",
            Self::Preview => "preview",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "split" => Some(Self::Split),
            "editor" => Some(Self::Editor),
            "preview" => Some(Self::Preview),
            _ => None,
        }
    }
}

/// Flags collected from config files and the command line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub no_autosave: bool,
    pub fullscreen: bool,
    pub no_splash: bool,
    pub theme: Option<ThemeMode>,
    pub view: Option<ViewMode>,
    pub store_dir: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` over `self`: booleans OR together, options prefer
    /// `other` (the caller passes CLI flags as `other` so they win).
    pub fn union(&self, other: &Self) -> Self {
        Self {
            no_autosave: self.no_autosave || other.no_autosave,
            fullscreen: self.fullscreen || other.fullscreen,
            no_splash: self.no_splash || other.no_splash,
            theme: other.theme.or(self.theme),
            view: other.view.or(self.view),
            store_dir: other.store_dir.clone().or_else(|| self.store_dir.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("inkdown").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("inkdown")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("inkdown").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("inkdown")
                .join("config");
        }
    }

    PathBuf::from(".inkdownrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".inkdownrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# inkdown defaults (saved with --save)".to_string());
    if flags.no_autosave {
        lines.push("--no-autosave".to_string());
    }
    if flags.fullscreen {
        lines.push("--fullscreen".to_string());
    }
    if flags.no_splash {
        lines.push("--no-splash".to_string());
    }
    if let Some(theme) = flags.theme {
        lines.push(format!("--theme {}", theme.as_str()));
    }
    if let Some(view) = flags.view {
        lines.push(format!("--view {}", view.as_str()));
    }
    if let Some(dir) = &flags.store_dir {
        lines.push(format!("--store-dir {}", dir.display()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--no-autosave" {
            flags.no_autosave = true;
        } else if token == "--fullscreen" {
            flags.fullscreen = true;
        } else if token == "--no-splash" {
            flags.no_splash = true;
        } else if token == "--theme" {
            if let Some(next) = tokens.get(i + 1) {
                flags.theme = ThemeMode::parse(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--theme=") {
            flags.theme = ThemeMode::parse(value);
        } else if token == "--view" {
            if let Some(next) = tokens.get(i + 1) {
                flags.view = ViewMode::parse(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--view=") {
            flags.view = ViewMode::parse(value);
        } else if token == "--store-dir" {
            if let Some(next) = tokens.get(i + 1) {
                flags.store_dir = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--store-dir=") {
            flags.store_dir = Some(PathBuf::from(value));
        }
        i += 1;
    }
    flags
}
