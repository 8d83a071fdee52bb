use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::settings::config::Settings;

/// Locates and reads the settings file. Settings are read once and then
/// treated as immutable by the rest of the crate.
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    settings_path: PathBuf,
}

impl SettingsLoader {
    /// Loader for the default location (~/.voicebox/settings.toml)
    pub fn new() -> Result<Self> {
        Ok(Self::from_path(Self::default_settings_path()?))
    }

    pub fn from_path(path: PathBuf) -> Self {
        Self {
            settings_path: path,
        }
    }

    fn default_settings_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Failed to get home directory")?;
        Ok(home.join(".voicebox").join("settings.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.settings_path
    }

    /// Read settings, creating a default file when none exists. A file that
    /// does not parse is moved aside to `settings.toml.backup`.
    pub fn load(&self) -> Result<Settings> {
        let path = &self.settings_path;
        if !path.exists() {
            let defaults = Settings::default();
            self.save(&defaults)?;
            tracing::info!(?path, "Created default settings");
            return Ok(defaults);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {path:?}"))?;

        match toml::from_str(&contents) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                let backup_path = path.with_extension("toml.backup");
                tracing::warn!(?path, ?backup_path, error = %e, "Settings file is corrupt, resetting");
                fs::rename(path, &backup_path).with_context(|| {
                    format!("Failed to backup corrupted settings to {backup_path:?}")
                })?;

                let defaults = Settings::default();
                self.save(&defaults)?;
                Ok(defaults)
            }
        }
    }

    /// `load` followed by the AWS environment overrides
    pub fn load_with_env(&self) -> Result<Settings> {
        Ok(self.load()?.apply_env())
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {parent:?}"))?;
        }

        let contents = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.settings_path, contents)
            .with_context(|| format!("Failed to write settings to {:?}", self.settings_path))?;
        Ok(())
    }
}
