//! High-score leaderboard persistence
//!
//! A small ranked list kept in a JSON file: append, sort descending by
//! score, keep the top five. A missing or unreadable file simply means an
//! empty board.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Number of entries the leaderboard keeps
pub const MAX_HIGH_SCORES: usize = 5;

/// One leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Max distance traveled, in tiles
    pub score: i32,
    /// Survival time in whole seconds
    pub time: u64,
    /// How the run was played ("normal", "agent")
    pub mode: String,
}

impl ScoreEntry {
    pub fn new(score: i32, time: u64, mode: impl Into<String>) -> Self {
        Self {
            score,
            time,
            mode: mode.into(),
        }
    }
}

/// Load the leaderboard; missing or corrupt files load as empty
pub fn load_high_scores(path: &Path) -> Vec<ScoreEntry> {
    match fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
        Err(_) => Vec::new(),
    }
}

/// Append an entry, re-rank, truncate to the top five, and write back
///
/// Returns the updated leaderboard. The sort is stable, so equal scores
/// keep their insertion order.
pub fn save_high_score(path: &Path, entry: ScoreEntry) -> Result<Vec<ScoreEntry>> {
    let mut scores = load_high_scores(path);
    scores.push(entry);
    scores.sort_by(|a, b| b.score.cmp(&a.score));
    scores.truncate(MAX_HIGH_SCORES);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {parent:?}"))?;
        }
    }

    let json = serde_json::to_string_pretty(&scores).context("failed to serialize high scores")?;
    fs::write(path, json).with_context(|| format!("failed to write high scores to {path:?}"))?;

    Ok(scores)
}
