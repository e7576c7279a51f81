//! Settings persistence.
//!
//! Settings live in `settings.json` under the platform config directory.
//! A missing or unreadable file means defaults.

use anyhow::{Context, Result};
use shared::settings::AppSettings;
use std::path::PathBuf;

fn config_path() -> Result<PathBuf> {
    let proj = directories::ProjectDirs::from("dev", "Portfolio Lab", "PortfolioLab")
        .context("no home directory to store settings in")?;
    Ok(proj.config_dir().join("settings.json"))
}

/// Returns the settings and whether they are fresh defaults.
pub fn load_settings_or_default() -> (AppSettings, bool) {
    match config_path() {
        Ok(path) => match AppSettings::load_from(&path) {
            Some(settings) => {
                tracing::debug!(path = %path.display(), "loaded settings");
                (settings, false)
            }
            None => (AppSettings::default(), true),
        },
        Err(e) => {
            tracing::warn!(error = %e, "using default settings");
            (AppSettings::default(), true)
        }
    }
}

pub fn save_settings(settings: &AppSettings) {
    if let Err(e) = try_save(settings) {
        tracing::warn!(error = %e, "could not save settings");
    }
}

fn try_save(settings: &AppSettings) -> Result<()> {
    let path = config_path()?;
    settings
        .save_to(&path)
        .with_context(|| format!("writing {}", path.display()))
}
