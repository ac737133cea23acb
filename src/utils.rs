use crate::engine::{Board, Element};

/// Returns the lines of a level description that carry data.
///
/// Blank lines and comment lines (those starting with `/`) are skipped, and a
/// trailing `\r` left by Windows line endings is removed.
///
/// # Examples
/// ```
/// use inertia::utils::content_lines;
///
/// let text = "// lives\n3\n\n/ size\n3\r\n";
/// let lines: Vec<&str> = content_lines(text).collect();
/// assert_eq!(lines, vec!["3", "3"]);
/// ```
pub fn content_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty() && !line.starts_with('/'))
}

/// Parses an array of string slices into a `size x size` `Board`.
///
/// Each string slice in the input array represents a row on the board, starting from row 0,
/// and must contain exactly `size` symbols.
///
/// Valid characters for cells are:
/// - '-': `Element::Empty`
/// - 'L': `Element::ExtraLife`
/// - '*': `Element::Gem`
/// - 'X': `Element::Mine`
/// - '@': `Element::Player`
/// - 'S': `Element::Stop`
/// - '$': `Element::PlayerStop`
/// - '#': `Element::Wall`
///
/// Any other character will result in an error. The function does not check the
/// number of players or gems; that is the level's job.
///
/// # Returns
/// * `Ok(Board)` if parsing is successful.
/// * `Err(String)` if:
///     - The number of rows in `s` differs from `size`.
///     - Any row does not have exactly `size` characters.
///     - An unrecognized character is encountered.
///
/// # Examples
/// ```
/// use inertia::utils::board_from_str_array;
/// use inertia::engine::Element;
///
/// let board = board_from_str_array(&["#*#", "-@-", "S-X"], 3).unwrap();
/// assert_eq!(board.get_cell(0, 1).unwrap().element(), Element::Gem);
/// assert_eq!(board.get_cell(2, 2).unwrap().element(), Element::Mine);
///
/// assert!(board_from_str_array(&["#*#", "-@-", "S-?"], 3).is_err());
/// assert!(board_from_str_array(&["#*#", "-@"], 3).is_err());
/// ```
pub fn board_from_str_array(s: &[&str], size: usize) -> Result<Board, String> {
    if s.len() != size {
        return Err(format!(
            "Invalid number of rows. Expected {}, found {}",
            size,
            s.len()
        ));
    }

    let mut rows = Vec::with_capacity(size);

    for (r, row_str) in s.iter().enumerate() {
        let found = row_str.chars().count();
        if found != size {
            return Err(format!(
                "Row {} has {} characters (expected {})",
                r, found, size
            ));
        }

        let row = row_str
            .chars()
            .enumerate()
            .map(|(c, symbol)| {
                Element::from_symbol(symbol).ok_or_else(|| {
                    format!("Unrecognized character '{}' in row {} col {}", symbol, r, c)
                })
            })
            .collect::<Result<Vec<Element>, String>>()?;
        rows.push(row);
    }

    Ok(Board::from_elements(rows))
}
