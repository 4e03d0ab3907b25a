use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::catalog::{CatalogError, ContextLibrary};
use crate::engine::{Pacing, SimulatorOptions};
use crate::util::paths::{config_path, progress_path};

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("playback.speed must be a non-negative number, got {0}")]
    InvalidSpeed(f64),
}

/// Playback configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackConfig {
    /// Multiplier applied to scripted delays; 0 plays instantly
    pub speed: f64,
    /// Cancel a console's running sessions on each new submission
    pub cancel_on_submit: bool,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub playback: PlaybackConfig,
    /// Catalog file replacing the built-in one
    pub catalog_path: Option<PathBuf>,
    /// Where challenge progress is saved
    pub progress_path: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlPlaybackConfig {
    pub speed: Option<f64>,
    pub cancel_on_submit: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlCatalogConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlProgressConfig {
    pub file: Option<PathBuf>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub playback: Option<TomlPlaybackConfig>,
    pub catalog: Option<TomlCatalogConfig>,
    pub progress: Option<TomlProgressConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            playback: PlaybackConfig {
                speed: 1.0,
                cancel_on_submit: false,
            },
            catalog_path: None,
            progress_path: progress_path(),
        }
    }
}

impl Config {
    /// Load configuration from the data directory, merging with defaults.
    ///
    /// Writes the example config on first run. A config that cannot be read or
    /// parsed is reported and ignored.
    pub fn load() -> Self {
        let config_file = config_path();

        if !config_file.exists() {
            Self::create_default_config(&config_file);
        }

        match Self::load_from(&config_file) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    path = %config_file.display(),
                    error = %e,
                    "Ignoring invalid config file"
                );
                eprintln!("Ignoring invalid config {}: {}", config_file.display(), e);
                Config::default()
            }
        }
    }

    /// Load configuration from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Merge a TOML document over the defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let toml_config: TomlConfig = toml::from_str(contents)?;
        let mut config = Config::default();

        if let Some(playback) = toml_config.playback {
            if let Some(speed) = playback.speed {
                if !speed.is_finite() || speed < 0.0 {
                    return Err(ConfigError::InvalidSpeed(speed));
                }
                config.playback.speed = speed;
            }
            if let Some(cancel) = playback.cancel_on_submit {
                config.playback.cancel_on_submit = cancel;
            }
        }

        if let Some(catalog) = toml_config.catalog {
            config.catalog_path = catalog.path;
        }

        if let Some(progress) = toml_config.progress {
            if let Some(file) = progress.file {
                config.progress_path = file;
            }
        }

        Ok(config)
    }

    /// Create the default config file from the bundled example
    fn create_default_config(path: &Path) {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                if let Err(e) = fs::create_dir_all(parent) {
                    eprintln!("Failed to create config directory: {}", e);
                    return;
                }
            }
        }

        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            eprintln!("Failed to write default config: {}", e);
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.playback.speed = speed;
        self
    }

    pub fn with_catalog_path(mut self, path: PathBuf) -> Self {
        self.catalog_path = Some(path);
        self
    }

    /// Engine options derived from the playback settings
    pub fn simulator_options(&self) -> SimulatorOptions {
        SimulatorOptions {
            pacing: Pacing::from_speed(self.playback.speed),
            cancel_on_submit: self.playback.cancel_on_submit,
        }
    }

    /// Load the configured catalog, or the built-in one
    pub fn load_library(&self) -> Result<ContextLibrary, CatalogError> {
        match &self.catalog_path {
            Some(path) => ContextLibrary::from_path(path),
            None => ContextLibrary::builtin(),
        }
    }
}
