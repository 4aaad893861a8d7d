//! Error types for the driver side: config, high-score file and terminal I/O.
//!
//! The game rules themselves are total and never fail.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum GameError {
    /// Terminal or file I/O failed.
    Io(std::io::Error),

    /// A config file could not be read.
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A config file is not valid TOML for `GameConfig`.
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is outside its accepted range.
    InvalidConfig {
        /// Name of the key (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: String,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Io(e) => write!(f, "I/O error: {}", e),
            GameError::ConfigRead { path, source } => {
                write!(f, "cannot read config '{}': {}", path.display(), source)
            }
            GameError::ConfigParse { path, source } => {
                write!(f, "cannot parse config '{}': {}", path.display(), source)
            }
            GameError::InvalidConfig {
                name,
                value,
                expected,
            } => write!(
                f,
                "config key '{}' = {} is outside accepted range {}",
                name, value, expected
            ),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io(e) => Some(e),
            GameError::ConfigRead { source, .. } => Some(source),
            GameError::ConfigParse { source, .. } => Some(source),
            GameError::InvalidConfig { .. } => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Io(e)
    }
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;
