//! Top scores, kept in a pluggable store.
//!
//! The `LeaderBoard` never caches scores: every query reloads the whole list
//! from its `ScoreStore` and every insertion writes the whole list back.
use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Capacity used when a leaderboard is created with a capacity of zero.
pub const DEFAULT_MAX_SCORES: usize = 5;

/// A player's name and the points they scored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub name: String,
    pub points: i64,
}

impl Score {
    pub fn new(name: impl Into<String>, points: i64) -> Self {
        Score {
            name: name.into(),
            points,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {} pts", self.name.to_uppercase(), self.points)
    }
}

/// Somewhere to keep the list of scores between runs.
///
/// Stores are read and written as a whole; there is no partial update.
pub trait ScoreStore {
    fn load(&self) -> Result<Vec<Score>, StoreError>;
    fn save(&mut self, scores: &[Score]) -> Result<(), StoreError>;
}

/// Keeps the scores as a JSON array in a file. A missing file is an empty list.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Score>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, scores: &[Score]) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(scores)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

/// Keeps the scores in memory only.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    scores: Vec<Score>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scores(scores: Vec<Score>) -> Self {
        MemoryStore { scores }
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<Vec<Score>, StoreError> {
        Ok(self.scores.clone())
    }

    fn save(&mut self, scores: &[Score]) -> Result<(), StoreError> {
        self.scores = scores.to_vec();
        Ok(())
    }
}

/// The best `max_scores` scores, best first.
#[derive(Debug)]
pub struct LeaderBoard<S: ScoreStore> {
    max_scores: usize,
    store: S,
}

impl<S: ScoreStore> LeaderBoard<S> {
    /// Creates a leaderboard keeping `max_scores` entries (5 if zero is given).
    pub fn new(max_scores: usize, store: S) -> Self {
        let max_scores = if max_scores == 0 {
            DEFAULT_MAX_SCORES
        } else {
            max_scores
        };
        LeaderBoard { max_scores, store }
    }

    pub fn max_scores(&self) -> usize {
        self.max_scores
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current scores, best first. An unreadable store reads as empty.
    pub fn scores(&self) -> Vec<Score> {
        match self.store.load() {
            Ok(mut scores) => {
                scores.sort_by(|a, b| b.points.cmp(&a.points));
                scores
            }
            Err(e) => {
                warn!(error = %e, "could not load the leaderboard, starting empty");
                Vec::new()
            }
        }
    }

    fn accepts(&self, scores: &[Score], points: i64) -> bool {
        scores.len() < self.max_scores
            || scores
                .get(self.max_scores - 1)
                .map_or(true, |lowest| lowest.points < points)
    }

    /// Would a score of `points` make it into the leaderboard?
    pub fn is_in_the_top(&self, points: i64) -> bool {
        self.accepts(&self.scores(), points)
    }

    /// Inserts a score if it deserves a place, keeping the best `max_scores`.
    ///
    /// Returns whether the score was kept.
    ///
    /// # Errors
    /// If the store cannot be written.
    pub fn add(&mut self, name: &str, points: i64) -> Result<bool, StoreError> {
        let mut scores = self.scores();
        if !self.accepts(&scores, points) {
            debug!(name, points, "score too low for the leaderboard");
            return Ok(false);
        }

        scores.push(Score::new(name, points));
        // Stable sort: on ties the older score stays ahead.
        scores.sort_by(|a, b| b.points.cmp(&a.points));
        scores.truncate(self.max_scores);
        self.store.save(&scores)?;
        debug!(name, points, "score added to the leaderboard");
        Ok(true)
    }
}

impl<S: ScoreStore> fmt::Display for LeaderBoard<S> {
    /// One `N) NAME : P pts` line per score, best first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, score) in self.scores().iter().enumerate() {
            writeln!(f, "{}) {}", i + 1, score)?;
        }
        Ok(())
    }
}
