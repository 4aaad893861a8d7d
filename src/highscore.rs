//! Best-score persistence for the driver.  The file holds a single integer.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::GameResult;

pub fn default_high_score_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".slide_and_shoot_score")
}

/// Read the best score; anything unreadable counts as no score yet.
pub fn load_high_score(path: &Path) -> i32 {
    match std::fs::read_to_string(path) {
        Ok(s) => match s.trim().parse() {
            Ok(score) => {
                info!("loaded best score {} from {}", score, path.display());
                score
            }
            Err(_) => {
                warn!("ignoring malformed score file {}", path.display());
                0
            }
        },
        Err(_) => 0,
    }
}

pub fn save_high_score(path: &Path, score: i32) -> GameResult<()> {
    std::fs::write(path, score.to_string())?;
    info!("saved best score {} to {}", score, path.display());
    Ok(())
}
