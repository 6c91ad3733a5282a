//! High-score persistence: a single integer, read at session start and
//! rewritten only when beaten.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::warn;

const HIGH_SCORE_FILE: &str = "highscore";

/// Reads the stored high score, defaulting to 0 when the file is missing
/// or unreadable.
#[must_use]
pub fn load_high_score() -> u32 {
    let path = high_score_file_path();
    match fs::read_to_string(&path) {
        Ok(contents) => contents.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring unparsable high score in {}", path.display());
            0
        }),
        Err(_) => 0,
    }
}

pub fn save_high_score(score: u32) -> Result<()> {
    let path = high_score_file_path();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(&path, score.to_string())
        .with_context(|| format!("writing {}", path.display()))?;

    Ok(())
}

fn high_score_file_path() -> PathBuf {
    // Check for environment variable override
    if let Ok(path) = std::env::var("QUADFALL_HIGH_SCORE") {
        return PathBuf::from(path);
    }

    if let Some(data_dir) = dirs::data_dir() {
        data_dir.join("quadfall").join(HIGH_SCORE_FILE)
    } else {
        PathBuf::from(HIGH_SCORE_FILE)
    }
}
