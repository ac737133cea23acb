//! Board model for the sliding puzzle.
//!
//! This module defines the board's fundamental components:
//! - `Element`: The different kinds of content a cell can hold.
//! - `Cell`: A fixed position on the board together with its current element.
//! - `Board`: The square grid of cells, with lookup/mutation by position and
//!   text rendering (plain symbols or ANSI colours).
use crate::error::LevelError;
use crate::position::Position;
use std::fmt;

/// Minimum number of rows (and columns) of a board.
pub const MIN_SIZE: usize = 3;

/// Represents the content of a cell on the board.
///
/// Each variant has a one-character symbol used by level files and by the
/// textual rendering of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Element {
    /// Nothing here, the player slides through.
    Empty,
    /// Grants one extra life when crossed.
    ExtraLife,
    /// Collectable gem. All of them must be collected to win.
    Gem,
    /// Kills the player when stepped on.
    Mine,
    /// The player.
    Player,
    /// Stops the player's slide on top of it.
    Stop,
    /// The player standing on a `Stop` tile.
    PlayerStop,
    /// Blocks the slide in front of it.
    Wall,
}

impl Element {
    pub const ALL: [Element; 8] = [
        Element::Empty,
        Element::ExtraLife,
        Element::Gem,
        Element::Mine,
        Element::Player,
        Element::Stop,
        Element::PlayerStop,
        Element::Wall,
    ];

    /// Converts the element to its character representation.
    ///
    /// # Examples
    ///
    /// ```
    /// use inertia::engine::Element;
    /// assert_eq!(Element::Gem.symbol(), '*');
    /// assert_eq!(Element::PlayerStop.symbol(), '$');
    /// ```
    pub fn symbol(&self) -> char {
        match self {
            Element::Empty => '-',
            Element::ExtraLife => 'L',
            Element::Gem => '*',
            Element::Mine => 'X',
            Element::Player => '@',
            Element::Stop => 'S',
            Element::PlayerStop => '$',
            Element::Wall => '#',
        }
    }

    /// Looks up the element whose symbol is `symbol`.
    ///
    /// # Examples
    ///
    /// ```
    /// use inertia::engine::Element;
    /// assert_eq!(Element::from_symbol('#'), Some(Element::Wall));
    /// assert_eq!(Element::from_symbol('?'), None);
    /// ```
    pub fn from_symbol(symbol: char) -> Option<Element> {
        Element::ALL.into_iter().find(|e| e.symbol() == symbol)
    }

    /// Name of the image asset a graphical view would draw for this element.
    pub fn image_src(&self) -> &'static str {
        match self {
            Element::Empty => "empty.png",
            Element::ExtraLife => "life.png",
            Element::Gem => "gem.png",
            Element::Mine => "mine.png",
            Element::Player => "player.png",
            Element::Stop => "stop.png",
            Element::PlayerStop => "player_stop.png",
            Element::Wall => "wall.png",
        }
    }

    /// True for the two elements that mean "the player is here".
    pub fn is_player(&self) -> bool {
        matches!(self, Element::Player | Element::PlayerStop)
    }

    /// Returns the ANSI background colour code used for terminal output.
    fn to_ansi_color_code(&self) -> &'static str {
        match self {
            Element::Empty => "40",
            Element::Mine => "41",
            Element::ExtraLife => "42",
            Element::Gem => "43",
            Element::Player | Element::PlayerStop => "44",
            Element::Stop => "45",
            Element::Wall => "47",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single square of the board. Its position never changes, only its element.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    position: Position,
    element: Element,
}

impl Cell {
    pub fn new(position: Position, element: Element) -> Self {
        Cell { position, element }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn element(&self) -> Element {
        self.element
    }

    pub fn set_element(&mut self, element: Element) {
        self.element = element;
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.element)
    }
}

/// Represents the game board as a square grid of `Cell`s.
///
/// The board only stores cells; the rules about what may be where (one player,
/// at least one gem) are enforced by `Level` when a board is loaded.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    grid: Vec<Vec<Cell>>,
}

impl Board {
    /// Creates a board from rows of elements.
    ///
    /// The caller guarantees `rows` is square; `Level` checks this while parsing.
    pub(crate) fn from_elements(rows: Vec<Vec<Element>>) -> Self {
        let size = rows.len();
        let grid = rows
            .into_iter()
            .enumerate()
            .map(|(r, row)| {
                row.into_iter()
                    .enumerate()
                    .map(|(c, element)| Cell::new(Position::at(r, c), element))
                    .collect()
            })
            .collect();
        Board { size, grid }
    }

    /// Number of rows (and columns) of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the cell at (`row`, `column`).
    ///
    /// # Errors
    /// `LevelError::IncorrectCellPosition` if the coordinates are outside the board.
    pub fn get_cell(&self, row: usize, column: usize) -> Result<&Cell, LevelError> {
        self.grid
            .get(row)
            .and_then(|cells| cells.get(column))
            .ok_or(LevelError::IncorrectCellPosition { row, column })
    }

    fn get_cell_mut(&mut self, position: Position) -> Result<&mut Cell, LevelError> {
        let (row, column) = (position.row(), position.column());
        self.grid
            .get_mut(row)
            .and_then(|cells| cells.get_mut(column))
            .ok_or(LevelError::IncorrectCellPosition { row, column })
    }

    /// Returns the element at `position`.
    pub fn element_at(&self, position: Position) -> Result<Element, LevelError> {
        self.get_cell(position.row(), position.column())
            .map(Cell::element)
    }

    /// Replaces the element at `position`.
    pub fn set_element(&mut self, position: Position, element: Element) -> Result<(), LevelError> {
        self.get_cell_mut(position)?.set_element(element);
        Ok(())
    }

    /// Puts a brand new cell in place of the one sharing its position.
    pub fn replace_cell(&mut self, cell: Cell) -> Result<(), LevelError> {
        let slot = self.get_cell_mut(cell.position())?;
        *slot = cell;
        Ok(())
    }

    /// Iterates over every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.grid.iter().flatten()
    }

    /// Number of cells holding `element`.
    pub fn count(&self, element: Element) -> usize {
        self.cells().filter(|cell| cell.element() == element).count()
    }

    /// Position of the first cell (row-major) holding the player, if any.
    pub fn player_position(&self) -> Option<Position> {
        self.cells()
            .find(|cell| cell.element().is_player())
            .map(Cell::position)
    }

    /// Generates a coloured representation of the board with an optional highlighted position.
    ///
    /// The output includes row and column numbers and uses ANSI escape codes for
    /// the element colours. The symbol of each element is printed inside its
    /// coloured square; the highlighted cell is wrapped in brackets.
    pub fn to_string_with_highlight(&self, pos: Option<Position>) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for c_idx in 0..self.size {
            output.push_str(&format!("{:<3}", c_idx));
        }
        output.push('\n');

        for (r_idx, row) in self.grid.iter().enumerate() {
            output.push_str(&format!("{:<3}", r_idx));

            for cell in row {
                let is_highlight = pos == Some(cell.position());
                let color_code = cell.element().to_ansi_color_code();
                let content = if is_highlight {
                    format!("[{}]", cell.element().symbol())
                } else {
                    format!(" {} ", cell.element().symbol())
                };
                output.push_str(&format!("\x1b[1;{}m{}\x1b[m", color_code, content));
            }
            if r_idx + 1 < self.size {
                output.push('\n');
            }
        }

        output
    }
}

impl fmt::Display for Board {
    /// Formats the board as its symbol grid, one line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r_idx, row) in self.grid.iter().enumerate() {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            if r_idx + 1 < self.size {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(rows: &[&str]) -> Board {
        Board::from_elements(
            rows.iter()
                .map(|row| row.chars().map(|c| Element::from_symbol(c).unwrap()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_symbol_table_round_trips() {
        for element in Element::ALL {
            assert_eq!(Element::from_symbol(element.symbol()), Some(element));
        }
        assert_eq!(Element::from_symbol('.'), None);
        assert_eq!(Element::from_symbol(' '), None);
    }

    #[test]
    fn test_image_src() {
        assert_eq!(Element::ExtraLife.image_src(), "life.png");
        assert_eq!(Element::PlayerStop.image_src(), "player_stop.png");
    }

    #[test]
    fn test_is_player() {
        let players: Vec<Element> = Element::ALL.into_iter().filter(Element::is_player).collect();
        assert_eq!(players, vec![Element::Player, Element::PlayerStop]);
    }

    #[test]
    fn test_cells_know_their_position() {
        let board = board_from(&["#*#", "-@-", "S-X"]);
        assert_eq!(board.size(), 3);
        let cell = board.get_cell(2, 0).unwrap();
        assert_eq!(cell.position(), Position::at(2, 0));
        assert_eq!(cell.element(), Element::Stop);
    }

    #[test]
    fn test_get_cell_out_of_bounds() {
        let mut board = board_from(&["#*#", "-@-", "S-X"]);
        assert!(matches!(
            board.get_cell(3, 0),
            Err(LevelError::IncorrectCellPosition { row: 3, column: 0 })
        ));
        assert!(board.get_cell(0, 3).is_err());
        assert!(board.set_element(Position::at(5, 5), Element::Gem).is_err());
    }

    #[test]
    fn test_set_and_replace() {
        let mut board = board_from(&["#*#", "-@-", "S-X"]);
        board.set_element(Position::at(0, 1), Element::Empty).unwrap();
        assert_eq!(board.element_at(Position::at(0, 1)).unwrap(), Element::Empty);
        board
            .replace_cell(Cell::new(Position::at(2, 2), Element::Wall))
            .unwrap();
        assert_eq!(board.get_cell(2, 2).unwrap().element(), Element::Wall);
        assert_eq!(board.get_cell(2, 2).unwrap().position(), Position::at(2, 2));
    }

    #[test]
    fn test_count_and_player_position() {
        let board = board_from(&["**#", "-$-", "S-*"]);
        assert_eq!(board.count(Element::Gem), 3);
        assert_eq!(board.count(Element::Player), 0);
        assert_eq!(board.player_position(), Some(Position::at(1, 1)));
    }

    #[test]
    fn test_display_board_formatting() {
        let board = board_from(&["#*#", "-@-", "S-X"]);
        assert_eq!(board.to_string(), "#*#\n-@-\nS-X");
    }

    #[test]
    fn test_to_string_with_highlight() {
        let board = board_from(&["#*#", "-@-", "S-X"]);
        let output = board.to_string_with_highlight(Some(Position::at(1, 1)));
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("   0  1  2"));
        assert!(lines[2].contains("\x1b[1;44m[@]\x1b[m"));
        assert!(lines[1].contains("\x1b[1;43m * \x1b[m"));
        assert!(!output.ends_with('\n'));
    }
}
