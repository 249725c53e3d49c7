//! Inkdown - A terminal markdown editor with live preview.
//!
//! # Usage
//!
//! ```bash
//! inkdown                # edit the autosaved draft
//! inkdown notes.md       # edit a file
//! inkdown --view preview notes.md
//! inkdown --theme light --no-splash
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use inkdown::app::App;
use inkdown::config::{
    ConfigFlags, ThemeMode, ViewMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use inkdown::storage::DraftStore;

/// A terminal markdown editor with live preview
#[derive(Parser, Debug)]
#[command(name = "inkdown", version, about, long_about = None)]
struct Cli {
    /// Markdown file to edit (omit to restore the autosaved draft)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Color theme (defaults to the stored preference)
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Initial view mode
    #[arg(long, value_enum)]
    view: Option<ViewMode>,

    /// Disable debounced draft autosaving
    #[arg(long)]
    no_autosave: bool,

    /// Start with the status bar hidden
    #[arg(long)]
    fullscreen: bool,

    /// Skip the startup splash
    #[arg(long)]
    no_splash: bool,

    /// Directory for the draft store (defaults to the platform data dir)
    #[arg(long, value_name = "DIR")]
    store_dir: Option<PathBuf>,

    /// Save current command-line flags as defaults in .inkdownrc
    #[arg(long)]
    save: bool,

    /// Clear saved defaults in .inkdownrc
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    // Verify the file exists before taking over the terminal
    if let Some(file) = &cli.file
        && !file.exists()
    {
        anyhow::bail!("File not found: {}", file.display());
    }

    let store = effective
        .store_dir
        .clone()
        .map_or_else(DraftStore::open_default, DraftStore::at);

    let mut app = App::new()
        .with_file(cli.file)
        .with_theme(effective.theme)
        .with_view(effective.view)
        .with_autosave(!effective.no_autosave)
        .with_fullscreen(effective.fullscreen)
        .with_splash(!effective.no_splash)
        .with_store(store)
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Application error")
}
