//! Runtime settings
//!
//! Loaded from an optional JSON file; anything missing falls back to the
//! defaults below.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{FRAME_RATE, GAME_OVER_PAUSE_MS};
use crate::sim::{KeyEvent, SpriteSizes};

/// Errors that can occur while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// File could not be read.
    #[error("Failed to read settings '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON parsing failed.
    #[error("Parse error in '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Parsed fine but a value is out of range.
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; a clock-derived seed is used when absent
    pub seed: Option<u64>,
    /// Target simulation steps per second
    pub frame_rate: u32,
    /// Pause after the fatal hit before the session closes (ms)
    pub game_over_pause_ms: u64,
    /// Stop after this many frames (headless runs)
    pub max_frames: Option<u64>,
    /// Key events to replay, one batch per frame. The session quits once a
    /// non-empty script runs out.
    pub script: Vec<Vec<KeyEvent>>,
    /// Sprite bounding sizes reported by the asset provider
    pub sprites: SpriteSizes,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            frame_rate: FRAME_RATE,
            game_over_pause_ms: GAME_OVER_PAUSE_MS,
            max_frames: None,
            script: Vec::new(),
            sprites: SpriteSizes::default(),
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str, path: &Path) -> Result<Self, SettingsError> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json, path)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if given, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path.map(Self::load) {
            Some(Ok(settings)) => settings,
            Some(Err(e)) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Reject values the game loop cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.frame_rate == 0 {
            return Err(SettingsError::Invalid("frame_rate must be positive".into()));
        }
        if !self.sprites.is_valid() {
            return Err(SettingsError::Invalid(
                "sprite sizes must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Configured seed, or one derived from the current time
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }

    pub fn game_over_pause(&self) -> Duration {
        Duration::from_millis(self.game_over_pause_ms)
    }
}
