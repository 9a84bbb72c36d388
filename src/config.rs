//! Configuration loading and validation.
//!
//! Settings live in `$CONFIG_DIR/ttyplay/config.toml`:
//!
//! ```toml
//! [playback]
//! speed = 2.0
//! max_delay_ms = 500
//! autostart = true
//! ```
//!
//! Every field is optional. A missing file means defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::player::timing::Speed;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid playback speed {0}: must be a finite number greater than 0")]
    InvalidSpeed(f64),

    #[error("Failed to read config file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Playback timing and startup behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Speed multiplier (2.0 plays twice as fast)
    pub speed: f64,
    /// Cap on any single inter-frame delay, in milliseconds
    pub max_delay_ms: u64,
    /// Start playing as soon as a recording is opened
    pub autostart: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            max_delay_ms: 1_000,
            autostart: true,
        }
    }
}

impl PlaybackConfig {
    /// Check the speed multiplier, returning it validated.
    pub fn validate(&self) -> Result<Speed, ConfigError> {
        Speed::new(self.speed)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub playback: PlaybackConfig,
}

impl Config {
    /// Default config file location, if the platform has a config dir.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ttyplay").join("config.toml"))
    }

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`. A missing file yields defaults; the result is
    /// validated.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::parse_at(&content, path)
    }

    /// Parse and validate TOML content not backed by a file.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Self::parse_at(content, Path::new("<inline>"))
    }

    /// Parse and validate TOML content read from `path`.
    fn parse_at(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.playback.validate()?;
        Ok(config)
    }
}
