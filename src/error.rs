//! Error types shared by the level engine, the game session and the leaderboard.
//!
//! - `PositionError`: raised only when a `Position` is built from negative coordinates.
//! - `LevelError`: everything that can go wrong while loading or playing a level.
//! - `StoreError`: failures of a leaderboard `ScoreStore`.

use thiserror::Error;

/// Raised by `Position::new` when a coordinate is negative.
///
/// The offset helpers never surface this error; they turn it into `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("position's row cannot be a negative value (got {0})")]
    NegativeRow(i64),
    #[error("position's column cannot be a negative value (got {0})")]
    NegativeColumn(i64),
}

/// Errors produced by `Level` and by the `Game` session around it.
///
/// Level files report a single `Parsing` error to callers whatever went wrong.
/// `SizeTooSmall`, `WrongNumberOfPlayers` and `NotEnoughGems` are the causes the
/// parser distinguishes internally before collapsing them.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("there was an error while parsing the level file")]
    Parsing,
    #[error("the board size must be at least {min}, found {found}")]
    SizeTooSmall { min: usize, found: i64 },
    #[error("a level must contain exactly one player, found {0}")]
    WrongNumberOfPlayers(usize),
    #[error("a level must contain at least one gem")]
    NotEnoughGems,
    #[error("cell position ({row}, {column}) is outside the board")]
    IncorrectCellPosition { row: usize, column: usize },
    #[error("the number of lives to add cannot be negative (got {0})")]
    NegativeLivesIncrease(i32),
    #[error("the number of gems to add cannot be negative (got {0})")]
    NegativeGemsIncrease(i32),
    #[error("no player found on the board")]
    PlayerNotFound,
    #[error("no level has been loaded yet")]
    NoLevelLoaded,
    #[error("could not read the levels folder")]
    Io(#[from] std::io::Error),
}

/// Errors raised by a leaderboard `ScoreStore`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("leaderboard storage I/O failed")]
    Io(#[from] std::io::Error),
    #[error("leaderboard data is malformed")]
    Json(#[from] serde_json::Error),
}
