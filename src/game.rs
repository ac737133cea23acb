//! Game session: a sequence of levels read from a folder, the running score
//! and the leaderboard.
use crate::config::GameConfig;
use crate::engine::Cell;
use crate::error::{LevelError, StoreError};
use crate::leaderboard::{JsonFileStore, LeaderBoard, ScoreStore};
use crate::level::{Level, LevelDifficulty};
use crate::movement::MoveResult;
use crate::position::Direction;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Returns the file name of level number `number` (1-based).
pub fn level_file_name(number: usize) -> String {
    format!("level{}.txt", number)
}

/// Is `name` of the form `level<N>.txt`?
fn is_level_file_name(name: &str) -> bool {
    name.strip_prefix("level")
        .and_then(|rest| rest.strip_suffix(".txt"))
        .map_or(false, |digits| {
            !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
        })
}

/// Counts the level files in `dir`.
fn count_levels(dir: &Path) -> Result<usize, LevelError> {
    let mut count = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() && is_level_file_name(&entry.file_name().to_string_lossy()) {
            count += 1;
        }
    }
    Ok(count)
}

/// Manages the levels of a game and the score across them.
///
/// Levels are numbered from 1. A fresh game has no level loaded; call
/// `next_level` to load the first one. Until then every query about the
/// current level fails with `LevelError::NoLevelLoaded`.
#[derive(Debug)]
pub struct Game<S: ScoreStore> {
    levels_dir: PathBuf,
    current_level: usize,
    max_levels: usize,
    score: i64,
    level: Option<Level>,
    leaderboard: LeaderBoard<S>,
}

impl Game<JsonFileStore> {
    /// Creates a game whose leaderboard lives in the JSON file named by `config`.
    pub fn from_config(config: &GameConfig) -> Result<Self, LevelError> {
        Game::new(config, JsonFileStore::new(&config.leaderboard_path))
    }
}

impl<S: ScoreStore> Game<S> {
    /// Creates a game over the levels found in `config.levels_dir`.
    ///
    /// # Errors
    /// `LevelError::Io` if the folder cannot be listed.
    pub fn new(config: &GameConfig, store: S) -> Result<Self, LevelError> {
        let max_levels = count_levels(&config.levels_dir)?;
        info!(dir = %config.levels_dir.display(), max_levels, "levels found");
        Ok(Game {
            levels_dir: config.levels_dir.clone(),
            current_level: 0,
            max_levels,
            score: 0,
            level: None,
            leaderboard: LeaderBoard::new(config.max_scores, store),
        })
    }

    /// The level being played.
    pub fn level(&self) -> Result<&Level, LevelError> {
        self.level.as_ref().ok_or(LevelError::NoLevelLoaded)
    }

    fn level_mut(&mut self) -> Result<&mut Level, LevelError> {
        self.level.as_mut().ok_or(LevelError::NoLevelLoaded)
    }

    pub fn board_size(&self) -> Result<usize, LevelError> {
        Ok(self.level()?.size())
    }

    pub fn cell(&self, row: usize, column: usize) -> Result<&Cell, LevelError> {
        self.level()?.get_cell(row, column)
    }

    pub fn difficulty(&self) -> Result<LevelDifficulty, LevelError> {
        Ok(self.level()?.difficulty())
    }

    pub fn num_moves(&self) -> Result<u32, LevelError> {
        Ok(self.level()?.num_moves())
    }

    /// Lives left in the current level; unlimited lives read as `u32::MAX`.
    pub fn num_lives(&self) -> Result<u32, LevelError> {
        Ok(self.level()?.num_lives())
    }

    /// Number of the level being played, 0 before the first one is loaded.
    pub fn current_level(&self) -> usize {
        self.current_level
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    /// There are no levels left after the current one.
    pub fn is_finished(&self) -> bool {
        self.current_level == self.max_levels
    }

    /// Sum of the scores of the levels already left behind.
    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn level_score(&self) -> Result<i64, LevelError> {
        Ok(self.level()?.score())
    }

    /// Game score including the level being played, if any.
    pub fn total_score(&self) -> i64 {
        self.score + self.level.as_ref().map_or(0, Level::score)
    }

    /// The current level has been won or lost.
    pub fn is_level_completed(&self) -> Result<bool, LevelError> {
        let level = self.level()?;
        Ok(level.has_won() || level.has_lost())
    }

    pub fn has_lost(&self) -> Result<bool, LevelError> {
        Ok(self.level()?.has_lost())
    }

    fn load_level(&mut self) -> Result<(), LevelError> {
        let path = self.levels_dir.join(level_file_name(self.current_level));
        let level = Level::from_file(&path)?;
        info!(
            level = self.current_level,
            size = level.size(),
            difficulty = %level.difficulty(),
            gems = level.num_gems_init(),
            "level loaded"
        );
        self.level = Some(level);
        Ok(())
    }

    /// Leaves the current level, banking its score, and loads the next one.
    ///
    /// Returns `Ok(false)` when there are no levels left; in that case the
    /// game keeps no current level and `total_score` is final.
    pub fn next_level(&mut self) -> Result<bool, LevelError> {
        if let Some(level) = self.level.take() {
            self.score += level.score();
        }
        if self.is_finished() {
            return Ok(false);
        }
        self.current_level += 1;
        self.load_level()?;
        Ok(true)
    }

    /// Loads the current level again from scratch.
    pub fn reload(&mut self) -> Result<(), LevelError> {
        if self.current_level == 0 {
            return Err(LevelError::NoLevelLoaded);
        }
        self.load_level()
    }

    pub fn move_player(&mut self, direction: Direction) -> Result<MoveResult, LevelError> {
        self.level_mut()?.move_player(direction)
    }

    pub fn undo(&mut self) -> Result<bool, LevelError> {
        self.level_mut()?.undo()
    }

    pub fn leaderboard(&self) -> &LeaderBoard<S> {
        &self.leaderboard
    }

    /// Does the total score deserve a place in the leaderboard?
    pub fn is_in_leaderboard(&self) -> bool {
        self.leaderboard.is_in_the_top(self.total_score())
    }

    /// Records the total score under `name`. Returns whether it was kept.
    pub fn add_to_leaderboard(&mut self, name: &str) -> Result<bool, StoreError> {
        let points = self.total_score();
        self.leaderboard.add(name, points)
    }
}

impl<S: ScoreStore> fmt::Display for Game<S> {
    /// The board followed by the status line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.level {
            Some(level) => {
                writeln!(f, "{}", level)?;
                write!(
                    f,
                    "#Lives: {} | #Moves: {} | #Gems: {} | Level Score: {} pts | Game Score: {} pts",
                    level.lives(),
                    level.num_moves(),
                    level.num_gems_got(),
                    level.score(),
                    self.score
                )
            }
            None => write!(f, "No level loaded | Game Score: {} pts", self.score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::MemoryStore;
    use std::sync::atomic::{AtomicU64, Ordering};

    const LEVEL_ONE: &str = "3\n3\nEASY\n###\n@-*\n###\n";
    const LEVEL_TWO: &str = "/ second level\n1\n4\nHARD\n@--X\n----\n----\n*---\n";

    fn levels_dir(levels: &[&str]) -> PathBuf {
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);
        let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "inertia-game-test-{}-{}",
            std::process::id(),
            test_id
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        for (i, text) in levels.iter().enumerate() {
            fs::write(dir.join(level_file_name(i + 1)), text).unwrap();
        }
        dir
    }

    fn game(levels: &[&str]) -> Game<MemoryStore> {
        let config = GameConfig {
            levels_dir: levels_dir(levels),
            ..GameConfig::default()
        };
        Game::new(&config, MemoryStore::new()).unwrap()
    }

    #[test]
    fn test_level_file_names() {
        assert!(is_level_file_name("level1.txt"));
        assert!(is_level_file_name("level12.txt"));
        assert!(!is_level_file_name("level.txt"));
        assert!(!is_level_file_name("levelA.txt"));
        assert!(!is_level_file_name("notes.txt"));
        assert_eq!(level_file_name(3), "level3.txt");
    }

    #[test]
    fn test_new_game_counts_levels() {
        let game = game(&[LEVEL_ONE, LEVEL_TWO]);
        assert_eq!(game.max_levels(), 2);
        assert_eq!(game.current_level(), 0);
        assert!(!game.is_finished());
        assert!(matches!(game.board_size(), Err(LevelError::NoLevelLoaded)));
        assert_eq!(game.to_string(), "No level loaded | Game Score: 0 pts");
    }

    #[test]
    fn test_other_files_are_not_levels() {
        let config = GameConfig {
            levels_dir: levels_dir(&[LEVEL_ONE]),
            ..GameConfig::default()
        };
        fs::write(config.levels_dir.join("README"), "hello").unwrap();
        let game = Game::new(&config, MemoryStore::new()).unwrap();
        assert_eq!(game.max_levels(), 1);
    }

    #[test]
    fn test_missing_folder_is_an_error() {
        let config = GameConfig {
            levels_dir: std::env::temp_dir().join("inertia-no-such-levels-dir"),
            ..GameConfig::default()
        };
        assert!(matches!(
            Game::new(&config, MemoryStore::new()),
            Err(LevelError::Io(_))
        ));
    }

    #[test]
    fn test_play_through_two_levels() {
        let mut game = game(&[LEVEL_ONE, LEVEL_TWO]);
        assert!(game.next_level().unwrap());
        assert_eq!(game.current_level(), 1);
        assert_eq!(game.board_size().unwrap(), 3);
        assert_eq!(game.difficulty().unwrap(), LevelDifficulty::Easy);

        assert_eq!(game.move_player(Direction::Right).unwrap(), MoveResult::Ok);
        assert!(game.is_level_completed().unwrap());
        assert!(!game.has_lost().unwrap());
        assert_eq!(game.level_score().unwrap(), 9 + 10 - 1);
        assert_eq!(game.score(), 0);

        assert!(game.next_level().unwrap());
        assert_eq!(game.score(), 18);
        assert_eq!(game.current_level(), 2);
        assert!(game.is_finished());
        assert_eq!(game.num_lives().unwrap(), 1);

        assert_eq!(game.move_player(Direction::Right).unwrap(), MoveResult::Die);
        assert!(game.has_lost().unwrap());
        assert!(game.is_level_completed().unwrap());
        assert_eq!(game.total_score(), 18 + 16 - 1);

        assert!(!game.next_level().unwrap());
        assert_eq!(game.score(), 33);
        assert_eq!(game.total_score(), 33);
        assert!(!game.next_level().unwrap());
        assert_eq!(game.score(), 33);
    }

    #[test]
    fn test_reload_resets_the_level() {
        let mut game = game(&[LEVEL_TWO]);
        assert!(matches!(game.reload(), Err(LevelError::NoLevelLoaded)));
        game.next_level().unwrap();
        game.move_player(Direction::Down).unwrap();
        assert_eq!(game.num_moves().unwrap(), 1);
        assert!(game.undo().unwrap());
        game.reload().unwrap();
        assert_eq!(game.num_moves().unwrap(), 0);
        assert_eq!(game.level_score().unwrap(), 16);
        assert_eq!(game.cell(0, 0).unwrap().element(), crate::engine::Element::Player);
    }

    #[test]
    fn test_broken_level_file() {
        let mut game = game(&["3\n3\nEASY\n@--\n---\n---\n"]);
        assert!(matches!(game.next_level(), Err(LevelError::Parsing)));
    }

    #[test]
    fn test_status_line() {
        let mut game = game(&[LEVEL_ONE]);
        game.next_level().unwrap();
        assert_eq!(
            game.to_string(),
            "###\n@-*\n###\n#Lives: 3 | #Moves: 0 | #Gems: 0 | Level Score: 9 pts | Game Score: 0 pts"
        );
    }

    #[test]
    fn test_bundled_levels_load() {
        let config = GameConfig {
            levels_dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("levels"),
            ..GameConfig::default()
        };
        let mut game = Game::new(&config, MemoryStore::new()).unwrap();
        assert!(game.max_levels() >= 1);
        while game.next_level().unwrap() {
            let level = game.level().unwrap();
            assert!(level.num_gems_init() >= 1);
            assert!(level.player_position().is_ok());
        }
        assert!(game.is_finished());
    }

    #[test]
    fn test_leaderboard_uses_total_score() {
        let mut game = game(&[LEVEL_ONE]);
        game.next_level().unwrap();
        game.move_player(Direction::Right).unwrap();
        assert!(game.is_in_leaderboard());
        assert!(game.add_to_leaderboard("ana").unwrap());
        let scores = game.leaderboard().scores();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].points, 18);
    }
}
