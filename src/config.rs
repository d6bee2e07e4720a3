//! Optional TOML configuration, loaded once at startup.
//!
//! Resolution order for the file path: `$ZOO_CONFIG` if set, else `zoo.toml`
//! in the working directory. A missing file is normal; a broken file is
//! logged and ignored. Configuration can slow the demo down or speed it up,
//! but it can never make startup fail.

use std::{
    env, fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;

/// Reasons a config file could not be turned into a [`ZooConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ZooConfig {
    pub clock: ClockConfig,
    pub window: WindowConfig,
    pub hud: HudConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Seconds between day/night flips.
    pub cycle_seconds: f64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    /// Whether the stats window starts open.
    pub show_stats: bool,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { cycle_seconds: 10.0 }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 480.0,
            height: 640.0,
        }
    }
}

impl Default for HudConfig {
    fn default() -> Self {
        Self { show_stats: true }
    }
}

impl ZooConfig {
    /// Where the config is looked for.
    pub fn path() -> PathBuf {
        env::var_os("ZOO_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("zoo.toml"))
    }

    /// Load the config, falling back to defaults when the file is missing or
    /// broken. Never fatal.
    pub fn load() -> Self {
        let path = Self::path();
        if !path.exists() {
            return Self::default();
        }
        match Self::from_path(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("ignoring config at {}: {err}", path.display());
                Self::default()
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Flip period for the clock, clamped so a typo cannot spin the ticker
    /// or park it for longer than a day.
    pub fn cycle_period(&self) -> Duration {
        let secs = self.clock.cycle_seconds;
        if secs.is_finite() {
            Duration::from_secs_f64(secs.clamp(0.1, 86_400.0))
        } else {
            Duration::from_secs(10)
        }
    }
}
