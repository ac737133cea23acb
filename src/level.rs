//! A single playable level.
//!
//! A `Level` owns its `Board` and its `UndoStack` and keeps the counters the
//! score is derived from: lives, moves, collected gems and undone moves.
//! The sliding move itself lives in `crate::movement`.
use crate::engine::{Board, Cell, Element, MIN_SIZE};
use crate::error::LevelError;
use crate::history::{StackItem, UndoStack};
use crate::position::Position;
use crate::utils::{board_from_str_array, content_lines};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, instrument};

/// Number of lives the player has left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lives {
    Unlimited,
    Finite(u32),
}

impl Lives {
    /// Interprets the lives header of a level file: zero or less means unlimited.
    pub fn from_header(value: i32) -> Self {
        if value <= 0 {
            Lives::Unlimited
        } else {
            Lives::Finite(value as u32)
        }
    }

    /// Adds `n` lives. Unlimited stays unlimited.
    pub fn gain(self, n: u32) -> Self {
        match self {
            Lives::Unlimited => Lives::Unlimited,
            Lives::Finite(lives) => Lives::Finite(lives.saturating_add(n)),
        }
    }

    /// Removes `n` lives, never going below zero. Unlimited stays unlimited.
    pub fn lose(self, n: u32) -> Self {
        match self {
            Lives::Unlimited => Lives::Unlimited,
            Lives::Finite(lives) => Lives::Finite(lives.saturating_sub(n)),
        }
    }

    /// Lives as a plain number; unlimited lives are reported as `u32::MAX`.
    pub fn count(&self) -> u32 {
        match self {
            Lives::Unlimited => u32::MAX,
            Lives::Finite(lives) => *lives,
        }
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self, Lives::Unlimited)
    }
}

impl fmt::Display for Lives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lives::Unlimited => write!(f, "unlimited"),
            Lives::Finite(lives) => write!(f, "{}", lives),
        }
    }
}

/// Informational difficulty tag read from the level file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LevelDifficulty {
    Easy,
    Medium,
    Hard,
}

impl FromStr for LevelDifficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "EASY" => Ok(LevelDifficulty::Easy),
            "MEDIUM" => Ok(LevelDifficulty::Medium),
            "HARD" => Ok(LevelDifficulty::Hard),
            other => Err(format!("Unknown difficulty '{}'", other)),
        }
    }
}

impl fmt::Display for LevelDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LevelDifficulty::Easy => "EASY",
            LevelDifficulty::Medium => "MEDIUM",
            LevelDifficulty::Hard => "HARD",
        };
        write!(f, "{}", name)
    }
}

/// State of one level being played.
///
/// # Examples
/// ```
/// use inertia::level::{Level, Lives};
/// use inertia::movement::MoveResult;
/// use inertia::position::Direction;
///
/// let mut level: Level = "3\n3\nEASY\n@-*\n---\n---\n".parse().unwrap();
/// assert_eq!(level.lives(), Lives::Finite(3));
/// assert_eq!(level.move_player(Direction::Right).unwrap(), MoveResult::Ok);
/// assert!(level.has_won());
/// assert_eq!(level.score(), 9 + 10 - 1);
/// ```
#[derive(Clone, Debug)]
pub struct Level {
    board: Board,
    difficulty: LevelDifficulty,
    pub(crate) lives: Lives,
    pub(crate) num_moves: u32,
    pub(crate) num_gems_got: u32,
    num_gems_init: u32,
    pub(crate) undo_stack: UndoStack,
}

/// Logs why a level could not be parsed and returns the generic parsing error.
fn syntax_error(cause: impl fmt::Display) -> LevelError {
    debug!(%cause, "malformed level description");
    LevelError::Parsing
}

fn parse_level(text: &str) -> Result<Level, LevelError> {
    let mut lines = content_lines(text);

    let lives_line = lines.next().ok_or_else(|| syntax_error("missing lives line"))?;
    let lives = lives_line
        .trim()
        .parse::<i32>()
        .map_err(|e| syntax_error(format!("invalid lives '{}': {}", lives_line, e)))?;

    let size_line = lines.next().ok_or_else(|| syntax_error("missing size line"))?;
    let size = size_line
        .trim()
        .parse::<i64>()
        .map_err(|e| syntax_error(format!("invalid size '{}': {}", size_line, e)))?;
    if size < MIN_SIZE as i64 {
        return Err(LevelError::SizeTooSmall {
            min: MIN_SIZE,
            found: size,
        });
    }
    let size = size as usize;

    let difficulty_line = lines
        .next()
        .ok_or_else(|| syntax_error("missing difficulty line"))?;
    let difficulty = difficulty_line.parse::<LevelDifficulty>().map_err(syntax_error)?;

    let rows: Vec<&str> = lines.by_ref().take(size).collect();
    let board = board_from_str_array(&rows, size).map_err(syntax_error)?;

    let players = board.cells().filter(|c| c.element().is_player()).count();
    if players != 1 || board.count(Element::Player) != 1 {
        return Err(LevelError::WrongNumberOfPlayers(players));
    }

    let num_gems_init = board.count(Element::Gem) as u32;
    if num_gems_init < 1 {
        return Err(LevelError::NotEnoughGems);
    }

    Ok(Level {
        board,
        difficulty,
        lives: Lives::from_header(lives),
        num_moves: 0,
        num_gems_got: 0,
        num_gems_init,
        undo_stack: UndoStack::new(),
    })
}

impl FromStr for Level {
    type Err = LevelError;

    /// Parses a level description.
    ///
    /// Whatever the cause, a malformed description is reported as
    /// `LevelError::Parsing`; the specific cause is only logged.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse_level(text).map_err(|cause| match cause {
            LevelError::Parsing => LevelError::Parsing,
            other => syntax_error(other),
        })
    }
}

impl Level {
    /// Reads and parses the level file at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| syntax_error(format!("cannot read {}: {}", path.display(), e)))?;
        text.parse()
    }

    /// Number of rows (and columns) of the board.
    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn difficulty(&self) -> LevelDifficulty {
        self.difficulty
    }

    pub fn lives(&self) -> Lives {
        self.lives
    }

    /// Number of lives left; unlimited lives are reported as `u32::MAX`.
    pub fn num_lives(&self) -> u32 {
        self.lives.count()
    }

    pub fn num_moves(&self) -> u32 {
        self.num_moves
    }

    pub fn num_gems_got(&self) -> u32 {
        self.num_gems_got
    }

    pub fn num_gems_init(&self) -> u32 {
        self.num_gems_init
    }

    /// Number of moves that have been undone so far.
    pub fn num_undos(&self) -> u32 {
        self.undo_stack.num_pops()
    }

    /// Number of moves that can still be undone.
    pub fn history_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Adds `num` lives.
    ///
    /// # Errors
    /// `LevelError::NegativeLivesIncrease` if `num` is negative.
    pub fn increase_num_lives(&mut self, num: i32) -> Result<(), LevelError> {
        if num < 0 {
            return Err(LevelError::NegativeLivesIncrease(num));
        }
        self.lives = self.lives.gain(num as u32);
        Ok(())
    }

    /// Takes one life away unless lives are unlimited or already zero.
    pub fn decrease_num_lives(&mut self) {
        self.lives = self.lives.lose(1);
    }

    /// Adds `num` collected gems.
    ///
    /// # Errors
    /// `LevelError::NegativeGemsIncrease` if `num` is negative.
    pub fn increase_num_gems_got(&mut self, num: i32) -> Result<(), LevelError> {
        if num < 0 {
            return Err(LevelError::NegativeGemsIncrease(num));
        }
        self.num_gems_got = self.num_gems_got.saturating_add(num as u32);
        Ok(())
    }

    /// Forgets one collected gem, never going below zero.
    pub fn decrease_num_gems_got(&mut self) {
        self.num_gems_got = self.num_gems_got.saturating_sub(1);
    }

    pub(crate) fn increase_num_moves(&mut self) {
        self.num_moves += 1;
    }

    /// The player has collected every gem of the board.
    pub fn has_won(&self) -> bool {
        self.num_gems_got == self.num_gems_init
    }

    /// The player has run out of lives. Never true with unlimited lives.
    pub fn has_lost(&self) -> bool {
        self.lives == Lives::Finite(0)
    }

    /// Returns the cell at (`row`, `column`).
    pub fn get_cell(&self, row: usize, column: usize) -> Result<&Cell, LevelError> {
        self.board.get_cell(row, column)
    }

    /// Position of the player on the board.
    ///
    /// # Errors
    /// `LevelError::PlayerNotFound` if the board has lost its player, which a
    /// correctly loaded level never does.
    pub fn player_position(&self) -> Result<Position, LevelError> {
        self.board.player_position().ok_or(LevelError::PlayerNotFound)
    }

    /// Level score: `size² + 10·gems − moves − 2·undos`. It can be negative.
    pub fn score(&self) -> i64 {
        let size = self.size() as i64;
        size * size + 10 * self.num_gems_got as i64
            - self.num_moves as i64
            - 2 * self.undo_stack.num_pops() as i64
    }

    /// Records a completed slide so it can be undone.
    pub(crate) fn push(&mut self, item: StackItem) {
        self.undo_stack.push(item);
    }

    /// Clears the cell the player is leaving: a `PlayerStop` leaves its `Stop`
    /// tile behind, anything else becomes `Empty`.
    pub(crate) fn vacate(&mut self, position: Position) -> Result<(), LevelError> {
        let left_behind = match self.board.element_at(position)? {
            Element::PlayerStop => Element::Stop,
            _ => Element::Empty,
        };
        self.board.set_element(position, left_behind)
    }

    /// Reverts the most recent completed slide.
    ///
    /// Returns `Ok(false)` when there is nothing to undo. Undoing restores the
    /// board, the lives and the gems as they were before the slide, but the
    /// move stays counted and the undo itself costs score.
    #[instrument(
        skip(self),
        fields(
            history = self.undo_stack.len(),
            origin = ?self.undo_stack.peek().map(|item| item.origin_position())
        )
    )]
    pub fn undo(&mut self) -> Result<bool, LevelError> {
        let Some(item) = self.undo_stack.pop() else {
            debug!("nothing to undo");
            return Ok(false);
        };

        self.lives = self.lives.lose(item.collected_lives().len() as u32);
        self.num_gems_got = self
            .num_gems_got
            .saturating_sub(item.collected_gems().len() as u32);

        let current = self.player_position()?;
        self.vacate(current)?;
        self.board
            .replace_cell(Cell::new(item.origin_position(), item.origin_element()))?;
        for &gem in item.collected_gems() {
            self.board.set_element(gem, Element::Gem)?;
        }
        for &life in item.collected_lives() {
            self.board.set_element(life, Element::ExtraLife)?;
        }

        debug!(
            origin = %item.origin_position(),
            undos = self.undo_stack.num_pops(),
            "move undone"
        );
        Ok(true)
    }
}

impl fmt::Display for Level {
    /// The board's symbol grid, one line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
/ A small sample level
2

5
/ difficulty
MEDIUM
#####
#@-*#
#S-L#
#X-*#
#####
";

    fn level(text: &str) -> Level {
        text.parse().unwrap()
    }

    #[test]
    fn test_parse_sample_level() {
        let level = level(SAMPLE);
        assert_eq!(level.size(), 5);
        assert_eq!(level.difficulty(), LevelDifficulty::Medium);
        assert_eq!(level.lives(), Lives::Finite(2));
        assert_eq!(level.num_gems_init(), 2);
        assert_eq!(level.num_gems_got(), 0);
        assert_eq!(level.num_moves(), 0);
        assert_eq!(level.history_len(), 0);
        assert_eq!(level.player_position().unwrap(), Position::at(1, 1));
        assert_eq!(level.to_string(), "#####\n#@-*#\n#S-L#\n#X-*#\n#####");
    }

    #[test]
    fn test_non_positive_lives_are_unlimited() {
        let zero = level("0\n3\nEASY\n@*-\n---\n---");
        assert_eq!(zero.lives(), Lives::Unlimited);
        assert_eq!(zero.num_lives(), u32::MAX);
        let negative = level("-7\n3\nEASY\n@*-\n---\n---");
        assert_eq!(negative.lives(), Lives::Unlimited);
        assert!(!negative.has_lost());
    }

    #[test]
    fn test_parse_errors_collapse_to_parsing() {
        let cases = [
            ("", "empty file"),
            ("x\n3\nEASY\n@*-\n---\n---", "bad lives"),
            ("3\nthree\nEASY\n@*-\n---\n---", "bad size"),
            ("3\n2\nEASY\n@*\n--", "size too small"),
            ("3\n3\nEXTREME\n@*-\n---\n---", "unknown difficulty"),
            ("3\n3\neasy\n@*-\n---\n---", "difficulty is case sensitive"),
            ("3\n3\nEASY\n@*-\n--\n---", "short row"),
            ("3\n3\nEASY\n@*-\n---", "missing row"),
            ("3\n3\nEASY\n@*-\n-?-\n---", "unknown symbol"),
            ("3\n3\nEASY\n@*-\n--@\n---", "two players"),
            ("3\n3\nEASY\n-*-\n---\n---", "no player"),
            ("3\n3\nEASY\n$*-\n---\n---", "player on stop is not a start"),
            ("3\n3\nEASY\n@$*\n---\n---", "player and player on stop"),
            ("3\n3\nEASY\n@--\n---\n---", "no gems"),
        ];
        for (text, why) in cases {
            let result = text.parse::<Level>();
            assert!(
                matches!(result, Err(LevelError::Parsing)),
                "expected a parsing error for {}: {:?}",
                why,
                result.map(|l| l.to_string())
            );
        }
    }

    #[test]
    fn test_from_file_missing_is_parsing_error() {
        let path = std::env::temp_dir().join("inertia-no-such-level-file.txt");
        assert!(matches!(Level::from_file(&path), Err(LevelError::Parsing)));
    }

    #[test]
    fn test_increase_num_lives() {
        let mut level = level(SAMPLE);
        level.increase_num_lives(3).unwrap();
        assert_eq!(level.num_lives(), 5);
        level.increase_num_lives(0).unwrap();
        assert_eq!(level.num_lives(), 5);
        assert!(matches!(
            level.increase_num_lives(-1),
            Err(LevelError::NegativeLivesIncrease(-1))
        ));
        assert_eq!(level.num_lives(), 5);
    }

    #[test]
    fn test_unlimited_lives_survive_arithmetic() {
        let mut level = level("0\n3\nEASY\n@*-\n---\n---");
        level.increase_num_lives(4).unwrap();
        level.decrease_num_lives();
        assert_eq!(level.lives(), Lives::Unlimited);
    }

    #[test]
    fn test_decrease_num_lives_floors_at_zero() {
        let mut level = level(SAMPLE);
        level.decrease_num_lives();
        level.decrease_num_lives();
        assert!(level.has_lost());
        level.decrease_num_lives();
        assert_eq!(level.lives(), Lives::Finite(0));
    }

    #[test]
    fn test_gem_counters() {
        let mut level = level(SAMPLE);
        assert!(matches!(
            level.increase_num_gems_got(-2),
            Err(LevelError::NegativeGemsIncrease(-2))
        ));
        level.decrease_num_gems_got();
        assert_eq!(level.num_gems_got(), 0);
        level.increase_num_gems_got(2).unwrap();
        assert!(level.has_won());
        level.decrease_num_gems_got();
        assert_eq!(level.num_gems_got(), 1);
        assert!(!level.has_won());
    }

    #[test]
    fn test_increase_num_gems_got_saturates() {
        let mut level = level(SAMPLE);
        level.increase_num_gems_got(i32::MAX).unwrap();
        level.increase_num_gems_got(i32::MAX).unwrap();
        level.increase_num_gems_got(i32::MAX).unwrap();
        assert_eq!(level.num_gems_got(), u32::MAX);
    }

    #[test]
    fn test_score_formula_can_go_negative() {
        let mut level = level("1\n3\nHARD\n@*-\n---\n---");
        assert_eq!(level.score(), 9);
        level.increase_num_gems_got(1).unwrap();
        assert_eq!(level.score(), 19);
        for _ in 0..25 {
            level.increase_num_moves();
        }
        assert_eq!(level.score(), -6);
    }

    #[test]
    fn test_get_cell_bounds() {
        let level = level(SAMPLE);
        assert_eq!(level.get_cell(3, 1).unwrap().element(), Element::Mine);
        assert!(matches!(
            level.get_cell(5, 0),
            Err(LevelError::IncorrectCellPosition { row: 5, column: 0 })
        ));
    }

    #[test]
    fn test_undo_on_fresh_level_is_a_no_op() {
        let mut level = level(SAMPLE);
        assert!(!level.undo().unwrap());
        assert_eq!(level.num_undos(), 0);
        assert_eq!(level.score(), 25);
    }

    #[test]
    fn test_vacate_keeps_stop_tiles() {
        let mut level = level("1\n3\nEASY\n@*-\n---\n---");
        level.board_mut().set_element(Position::at(1, 1), Element::PlayerStop).unwrap();
        level.vacate(Position::at(1, 1)).unwrap();
        assert_eq!(level.board().element_at(Position::at(1, 1)).unwrap(), Element::Stop);
        level.vacate(Position::at(0, 1)).unwrap();
        assert_eq!(level.board().element_at(Position::at(0, 1)).unwrap(), Element::Empty);
    }

    #[test]
    fn test_difficulty_display_round_trip() {
        for difficulty in [LevelDifficulty::Easy, LevelDifficulty::Medium, LevelDifficulty::Hard] {
            assert_eq!(difficulty.to_string().parse::<LevelDifficulty>(), Ok(difficulty));
        }
    }
}
