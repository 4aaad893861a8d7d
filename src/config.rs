//! Runtime configuration loaded from a TOML file.
//!
//! Only driver concerns are configurable (frame rate, input hold window,
//! bell, log and score file locations); the game rules are fixed.  Missing
//! keys fall back to the defaults, so a minimal file can override just the
//! values you care about:
//!
//! ```toml
//! fps = 60
//! hold_window_ms = 400
//! bell = false
//! ```

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;

use crate::error::{GameError, GameResult};

pub const DEFAULT_CONFIG_FILE: &str = "slide_and_shoot.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Simulation and redraw rate; every rule is counted in frames.
    pub fps: u32,
    /// How long a key stays "held" after its last press/repeat on terminals
    /// that don't report releases.  Must cover the OS key-repeat delay.
    pub hold_window_ms: u64,
    /// Ring the terminal bell on hits, fails and stage results.
    pub bell: bool,
    pub muted: bool,
    /// Log destination; stderr when unset.
    pub log_file: Option<PathBuf>,
    /// Best-score file; `$HOME/.slide_and_shoot_score` when unset.
    pub high_score_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            fps: 30,
            hold_window_ms: 500,
            bell: true,
            muted: false,
            log_file: None,
            high_score_file: None,
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(contents: &str, path: &Path) -> GameResult<Self> {
        let config: GameConfig =
            toml::from_str(contents).map_err(|source| GameError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GameResult<()> {
        validate_fps(self.fps)?;
        validate_hold_window(self.hold_window_ms)
    }

    /// The hold window in frames at the configured rate, rounded up.
    pub fn hold_window_frames(&self) -> u64 {
        (self.hold_window_ms * self.fps as u64).div_ceil(1000)
    }

    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_micros(1_000_000 / self.fps.max(1) as u64)
    }
}

/// Load the config.  An explicitly named file must exist; the default file
/// is optional and its absence means compiled defaults.
pub fn load_config(explicit: Option<&Path>) -> GameResult<GameConfig> {
    let (path, required) = match explicit {
        Some(p) => (p.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    match std::fs::read_to_string(&path) {
        Ok(contents) => {
            let config = GameConfig::from_toml_str(&contents, &path)?;
            info!("loaded config from {}", path.display());
            Ok(config)
        }
        Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
            warn!("no {} found; using compiled defaults", path.display());
            Ok(GameConfig::default())
        }
        Err(source) => Err(GameError::ConfigRead { path, source }),
    }
}

// ── Validation helpers ────────────────────────────────────────────────────────

pub fn validate_fps(value: u32) -> GameResult<()> {
    if (1..=240).contains(&value) {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            name: "fps",
            value: value.to_string(),
            expected: "[1, 240]",
        })
    }
}

pub fn validate_hold_window(value: u64) -> GameResult<()> {
    if value <= 5_000 {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            name: "hold_window_ms",
            value: value.to_string(),
            expected: "[0, 5000]",
        })
    }
}
