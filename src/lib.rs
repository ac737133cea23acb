//! # Inertia
//!
//! This library provides the game logic for a sliding gem puzzle. The player
//! slides across a square board until something stops them, collecting gems
//! and extra lives and avoiding mines. A level is won once every gem has been
//! collected and lost when the player runs out of lives.
//!
//! It is used by the `human_player` binary, which lets you play a folder of
//! level files from the command line.
//!
//! ## Modules
//! - `position`: Board coordinates (`Position`) and the four `Direction`s.
//! - `engine`: Cell contents (`Element`), cells (`Cell`) and the board (`Board`).
//! - `history`: The undo history (`StackItem`, `UndoStack`).
//! - `level`: A playable level (`Level`): parsing, counters, undo and score.
//! - `movement`: The sliding move (`Level::move_player`, `MoveResult`).
//! - `game`: A session over a folder of levels (`Game`).
//! - `leaderboard`: Top scores behind a pluggable `ScoreStore`.
//! - `config`: Session settings (`GameConfig`).
//! - `error`: Error types.
//! - `utils`: Helpers to read the text format of levels.
//!
//! ## Level files
//!
//! ```text
//! / lines starting with '/' and blank lines are ignored
//! 3        <- lives (0 or less means unlimited)
//! 5        <- board size (at least 3)
//! EASY     <- difficulty: EASY, MEDIUM or HARD
//! #####
//! #@-*#    <- '-' empty, 'L' extra life, '*' gem, 'X' mine,
//! #S-L#       '@' player, 'S' stop, '$' player on stop, '#' wall
//! #X-*#
//! #####
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod history;
pub mod leaderboard;
pub mod level;
pub mod movement;
pub mod position;
pub mod utils;
