use crate::leaderboard::DEFAULT_MAX_SCORES;
use std::path::PathBuf;

/// Settings of a game session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Folder holding `level1.txt`, `level2.txt`, ...
    pub levels_dir: PathBuf,
    /// File the JSON leaderboard store writes to.
    pub leaderboard_path: PathBuf,
    /// How many scores the leaderboard keeps.
    pub max_scores: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            levels_dir: PathBuf::from("levels"),
            leaderboard_path: PathBuf::from("leaderboard.json"),
            max_scores: DEFAULT_MAX_SCORES,
        }
    }
}
