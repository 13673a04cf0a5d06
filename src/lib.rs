// Code lints

#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]

// Doc lints

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

//! This crate implements the engine of a Sudoku assistant. The user fills a
//! 9x9 grid cell by cell and can ask the engine for a single-cell hint or the
//! full solution at any point. It supports the following key features:
//!
//! * Parsing and printing 9x9 grids
//! * Checking entries against the row, column, and box uniqueness rules
//! before they are accepted, including which axis a rejected entry conflicts
//! on
//! * Solving grids with an iterative backtracking search that never touches
//! cells fixed by the user
//! * Revealing individual cells from a cached solution without disturbing the
//! state the user sees
//!
//! # Parsing and printing grids
//!
//! See [Grid::parse] for the exact format of a grid code.
//!
//! Codes can be used to exchange grids, while pretty prints can be used to
//! display a grid in a clearer manner. An example of how to parse and display
//! a grid is provided below.
//!
//! ```
//! use sudoku_assist::Grid;
//!
//! let grid = Grid::parse("\
//!      , , , ,8,1, , , ,\
//!      , ,2, , ,7,8, , ,\
//!      ,5,3, , , ,1,7, ,\
//!     3,7, , , , , , , ,\
//!     6, , , , , , , ,3,\
//!      , , , , , , ,2,4,\
//!      ,6,9, , , ,2,3, ,\
//!      , ,5,9, , ,4, , ,\
//!      , , ,6,5, , , , ").unwrap();
//! println!("{}", grid);
//! ```
//!
//! # Checking entries
//!
//! The presentation layer must check every entry with
//! [find_conflict](constraint::find_conflict) before writing it, so that an
//! entry violating one of the uniqueness rules never reaches the grid. The
//! returned [Axis](constraint::Axis) names the rule that would be violated.
//!
//! ```
//! use sudoku_assist::Grid;
//! use sudoku_assist::constraint::{self, Axis};
//!
//! let mut grid = Grid::new();
//! grid.set(0, 0, Some(5), true);
//!
//! // Another 5 in row 0 conflicts on the row axis.
//! assert_eq!(Some(Axis::Row), constraint::find_conflict(&grid, 4, 0, 5));
//! assert_eq!(None, constraint::find_conflict(&grid, 4, 4, 5));
//! ```
//!
//! # Solving and hints
//!
//! A [Session](session::Session) owns the grid the user edits together with
//! the snapshot and solution buffers that make hints non-destructive. Asking
//! for a hint solves a scratch copy, caches the result, and restores the
//! visible grid, so the user only ever sees their own entries plus the cells
//! they chose to reveal.
//!
//! ```
//! use sudoku_assist::session::Session;
//!
//! let mut session = Session::new();
//!
//! // A solved grid with two cells knocked out again.
//! let code = "\
//!      ,4,6,2,8,1,3,5,9,\
//!     9,1,2,5,3,7,8,4,6,\
//!     8,5,3,4,9,6,1,7,2,\
//!     3,7,4,1,2,5,6,9,8,\
//!     6,2,8,7,4,9,5,1,3,\
//!     5,9,1,3,6,8,7,2,4,\
//!     1,6,9,8,7,4,2,3,5,\
//!     2,8,5,9,1,3,4,6,7,\
//!     4,3,7,6,5,2,9,8, ";
//! session.load(sudoku_assist::Grid::parse(code).unwrap());
//!
//! session.solve_one().unwrap();
//! assert_eq!(7, session.reveal(0, 0).unwrap());
//!
//! // The revealed cell is now part of the visible grid, nothing else moved.
//! assert_eq!(Some(7), session.grid().get(0, 0).value());
//! assert_eq!(None, session.grid().get(8, 8).value());
//! ```
//!
//! The solver itself can also be driven directly through
//! [BacktrackingSolver](solver::BacktrackingSolver) if the caller wants to
//! manage its own buffers. Note that it mutates the grid it is given in
//! place; take a snapshot first if the pre-solve state must survive.

pub mod constraint;
pub mod error;
pub mod session;
pub mod solver;

use error::{GridParseError, GridParseResult};

use serde::{Deserialize, Serialize};

use std::fmt::{self, Display, Formatter};

/// The number of cells on each axis of a [Grid], i.e. the length of every
/// row, column, and the total number of 3x3 boxes.
pub const SIZE: usize = 9;

/// The width and height of one box of a [Grid].
pub const BLOCK_SIZE: usize = 3;

pub(crate) const CELL_COUNT: usize = SIZE * SIZE;

/// A single cell of a [Grid]. A cell holds a number in the range `[1, 9]` or
/// is empty, and carries a flag indicating whether it was fixed by the user.
/// Fixed cells are the givens of the puzzle: the solver never alters them,
/// and a revealed hint becomes fixed so it cannot be overwritten afterwards.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Cell {
    value: Option<usize>,
    fixed: bool
}

impl Cell {

    /// Creates a new cell with the given content and fixed flag. A `value` of
    /// `None` represents an empty cell.
    ///
    /// # Panics
    ///
    /// If `value` is `Some(number)` with `number` outside the range `[1, 9]`.
    /// This indicates a defect in the caller, not user input, which must have
    /// been validated before.
    pub fn new(value: Option<usize>, fixed: bool) -> Cell {
        if let Some(number) = value {
            assert!(number >= 1 && number <= SIZE,
                "invalid cell number: {}", number);
        }

        Cell {
            value,
            fixed
        }
    }

    /// Gets the number this cell holds, or `None` if it is empty.
    pub fn value(&self) -> Option<usize> {
        self.value
    }

    /// Indicates whether this cell was fixed by the user (or revealed as a
    /// hint) and must not be altered by the solver.
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }
}

/// A 9x9 Sudoku grid. Each cell may hold a number from 1 to 9 or be empty,
/// and is additionally flagged as fixed if the user entered it (see [Cell]).
/// Cells are addressed by `(column, row)` coordinates, both in the range
/// `[0, 8]`, with `(0, 0)` in the top-left corner.
///
/// The grid itself does not enforce the uniqueness rules; the
/// [constraint](crate::constraint) module checks placements and the
/// [session](crate::session) layer rejects illegal edits before they are
/// written. The grid is a plain container with deep-copy support, which the
/// session uses for its snapshot and solution buffers.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Grid {
    cells: Vec<Cell>
}

fn index(column: usize, row: usize) -> usize {
    assert!(column < SIZE && row < SIZE,
        "cell coordinates ({}, {}) out of range", column, row);
    row * SIZE + column
}

fn to_char(cell: Cell) -> char {
    if let Some(number) = cell.value() {
        (b'0' + number as u8) as char
    }
    else {
        ' '
    }
}

fn line(start: char, thick_sep: char, thin_sep: char,
        segment: impl Fn(usize) -> char, pad: char, end: char, newline: bool)
        -> String {
    let mut result = String::new();

    for x in 0..SIZE {
        if x == 0 {
            result.push(start);
        }
        else if x % BLOCK_SIZE == 0 {
            result.push(thick_sep);
        }
        else {
            result.push(thin_sep);
        }

        result.push(pad);
        result.push(segment(x));
        result.push(pad);
    }

    result.push(end);

    if newline {
        result.push('\n');
    }

    result
}

fn top_row() -> String {
    line('╔', '╦', '╤', |_| '═', '═', '╗', true)
}

fn thin_separator_line() -> String {
    line('╟', '╫', '┼', |_| '─', '─', '╢', true)
}

fn thick_separator_line() -> String {
    line('╠', '╬', '╪', |_| '═', '═', '╣', true)
}

fn bottom_row() -> String {
    line('╚', '╩', '╧', |_| '═', '═', '╝', false)
}

fn content_row(grid: &Grid, y: usize) -> String {
    line('║', '║', '│', |x| to_char(grid.get(x, y)), ' ', '║', true)
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let thin_separator_line = thin_separator_line();
        let thick_separator_line = thick_separator_line();

        for y in 0..SIZE {
            if y == 0 {
                f.write_str(top_row().as_str())?;
            }
            else if y % BLOCK_SIZE == 0 {
                f.write_str(thick_separator_line.as_str())?;
            }
            else {
                f.write_str(thin_separator_line.as_str())?;
            }

            f.write_str(content_row(self, y).as_str())?;
        }

        f.write_str(bottom_row().as_str())?;
        Ok(())
    }
}

fn to_string(cell: &Cell) -> String {
    if let Some(number) = cell.value() {
        number.to_string()
    }
    else {
        String::from("")
    }
}

impl Grid {

    /// Creates a new, empty grid in which no cell is fixed.
    pub fn new() -> Grid {
        Grid {
            cells: vec![Cell::default(); CELL_COUNT]
        }
    }

    /// Parses a code encoding a grid. The code is a comma-separated list of
    /// exactly 81 entries, which are either empty or a number from 1 to 9.
    /// The entries are assigned left-to-right, top-to-bottom, where each row
    /// is completed before the next one is started. Whitespace in the entries
    /// is ignored to allow for more intuitive formatting.
    ///
    /// Since a code states the givens of a puzzle, every non-empty cell of
    /// the parsed grid is marked as fixed.
    ///
    /// As an example, the code
    /// `5, , , , , , , , ,` followed by 72 further empty entries parses to a
    /// grid whose only content is a fixed 5 in the top-left cell.
    ///
    /// # Errors
    ///
    /// Any specialization of [GridParseError] (see that documentation).
    pub fn parse(code: &str) -> GridParseResult<Grid> {
        let entries: Vec<&str> = code.split(',').collect();

        if entries.len() != CELL_COUNT {
            return Err(GridParseError::WrongNumberOfCells);
        }

        let mut grid = Grid::new();

        for (i, entry) in entries.iter().enumerate() {
            let entry = entry.trim();

            if entry.is_empty() {
                continue;
            }

            let number = entry.parse::<usize>()?;

            if number == 0 || number > SIZE {
                return Err(GridParseError::InvalidNumber);
            }

            grid.cells[i] = Cell::new(Some(number), true);
        }

        Ok(grid)
    }

    /// Converts the grid into a `String` in a way that is consistent with
    /// [Grid::parse]. That is, a grid of givens that is converted to a string
    /// and parsed again will not change, as is illustrated below.
    ///
    /// ```
    /// use sudoku_assist::Grid;
    ///
    /// let mut grid = Grid::new();
    /// grid.set(1, 1, Some(4), true);
    /// grid.set(1, 2, Some(5), true);
    ///
    /// let grid_str = grid.to_parseable_string();
    /// let grid_parsed = Grid::parse(grid_str.as_str()).unwrap();
    /// assert_eq!(grid, grid_parsed);
    /// ```
    ///
    /// Note that the code captures cell values only. Parsing marks every
    /// non-empty cell as fixed, so a grid containing non-fixed values (such
    /// as a solver result) round-trips its values but not its flags.
    pub fn to_parseable_string(&self) -> String {
        self.cells.iter()
            .map(to_string)
            .collect::<Vec<String>>()
            .join(",")
    }

    /// Gets the cell at the specified position.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the desired cell. Must be in
    /// the range `[0, 8]`.
    /// * `row`: The row (y-coordinate) of the desired cell. Must be in the
    /// range `[0, 8]`.
    ///
    /// # Panics
    ///
    /// If `column` or `row` is out of range. Out-of-range coordinates are a
    /// contract violation by the caller and fail fast, they are not a
    /// recoverable condition.
    pub fn get(&self, column: usize, row: usize) -> Cell {
        self.cells[index(column, row)]
    }

    /// Indicates whether the cell at the specified position has the given
    /// number. This will return `false` if there is a different number in
    /// that cell or it is empty.
    ///
    /// # Panics
    ///
    /// If `column` or `row` is out of range (see [Grid::get]).
    pub fn has_number(&self, column: usize, row: usize, number: usize)
            -> bool {
        self.get(column, row).value() == Some(number)
    }

    /// Indicates whether the cell at the specified position is fixed, i.e.
    /// off-limits for the solver.
    ///
    /// # Panics
    ///
    /// If `column` or `row` is out of range (see [Grid::get]).
    pub fn is_fixed(&self, column: usize, row: usize) -> bool {
        self.get(column, row).is_fixed()
    }

    /// Sets the content of the cell at the specified position. A `number` of
    /// `None` clears the cell, which also removes its fixed flag, since an
    /// empty cell cannot be fixed.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the assigned cell. Must be in
    /// the range `[0, 8]`.
    /// * `row`: The row (y-coordinate) of the assigned cell. Must be in the
    /// range `[0, 8]`.
    /// * `number`: `Some(n)` with `n` in the range `[1, 9]` to fill the cell,
    /// or `None` to clear it.
    /// * `fixed`: Whether the cell shall be marked as fixed. Ignored when the
    /// cell is cleared.
    ///
    /// # Panics
    ///
    /// If `column` or `row` is out of range or `number` is `Some` of a number
    /// outside `[1, 9]` (see [Grid::get]).
    pub fn set(&mut self, column: usize, row: usize, number: Option<usize>,
            fixed: bool) {
        let i = index(column, row);

        self.cells[i] = match number {
            Some(_) => Cell::new(number, fixed),
            None => Cell::default()
        };
    }

    /// Assigns the content of another grid to this one, i.e. deep-copies all
    /// 81 cells' values and fixed flags from `other`, overwriting existing
    /// content. This is used both to take a snapshot of a grid and to restore
    /// one, as well as to materialize the solution buffer.
    pub fn copy_from(&mut self, other: &Grid) {
        self.cells.copy_from_slice(&other.cells);
    }

    /// Resets all 81 cells to empty and not fixed.
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = Cell::default();
        }
    }

    /// Counts the number of clues given by this grid, that is, the number of
    /// non-empty cells.
    pub fn count_clues(&self) -> usize {
        self.cells.iter().filter(|c| c.value().is_some()).count()
    }

    /// Indicates whether this grid is full, i.e. every cell is filled with a
    /// number. In this case, [Grid::count_clues] returns 81.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.value().is_some())
    }

    /// Indicates whether this grid is empty, i.e. no cell is filled with a
    /// number. In this case, [Grid::count_clues] returns 0.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.value().is_none())
    }
}

impl Default for Grid {
    fn default() -> Grid {
        Grid::new()
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn parse_ok() {
        let code = "\
            1, , ,2, , , , , ,\
             ,3, , ,4, , , , ,\
             , , , , , , , , ,\
             ,2, , , , , , , ,\
             , , , , ,1, , , ,\
             , , , , , , , , ,\
            3, , , , , , , , ,\
             , , , , , , ,5, ,\
             , , , , , , , , ";
        let grid = Grid::parse(code).unwrap();

        assert_eq!(Some(1), grid.get(0, 0).value());
        assert_eq!(None, grid.get(1, 0).value());
        assert_eq!(Some(2), grid.get(3, 0).value());
        assert_eq!(Some(3), grid.get(1, 1).value());
        assert_eq!(Some(4), grid.get(4, 1).value());
        assert_eq!(Some(2), grid.get(1, 3).value());
        assert_eq!(Some(1), grid.get(5, 4).value());
        assert_eq!(Some(3), grid.get(0, 6).value());
        assert_eq!(Some(5), grid.get(7, 7).value());
        assert_eq!(None, grid.get(8, 8).value());
        assert_eq!(7, grid.count_clues());
    }

    #[test]
    fn parse_marks_givens_fixed() {
        let mut code = String::from("5");
        code.push_str(&",".repeat(80));
        let grid = Grid::parse(code.as_str()).unwrap();

        assert!(grid.is_fixed(0, 0));
        assert!(!grid.is_fixed(1, 0));
    }

    #[test]
    fn parse_wrong_number_of_cells() {
        assert_eq!(Err(GridParseError::WrongNumberOfCells),
            Grid::parse("1,2,3"));

        let mut code = String::from("1");
        code.push_str(&",".repeat(81));
        assert_eq!(Err(GridParseError::WrongNumberOfCells),
            Grid::parse(code.as_str()));
    }

    #[test]
    fn parse_number_format_error() {
        let mut code = String::from("#");
        code.push_str(&",".repeat(80));
        assert_eq!(Err(GridParseError::NumberFormatError),
            Grid::parse(code.as_str()));
    }

    #[test]
    fn parse_invalid_number() {
        let mut code = String::from("0");
        code.push_str(&",".repeat(80));
        assert_eq!(Err(GridParseError::InvalidNumber),
            Grid::parse(code.as_str()));

        let mut code = String::from("10");
        code.push_str(&",".repeat(80));
        assert_eq!(Err(GridParseError::InvalidNumber),
            Grid::parse(code.as_str()));
    }

    #[test]
    fn to_parseable_string_round_trip() {
        let mut grid = Grid::new();

        assert_eq!(",".repeat(80), grid.to_parseable_string());

        grid.set(0, 0, Some(1), true);
        grid.set(4, 4, Some(5), true);
        grid.set(8, 8, Some(9), true);

        let parsed = Grid::parse(grid.to_parseable_string().as_str()).unwrap();
        assert_eq!(grid, parsed);
    }

    #[test]
    fn set_and_clear_cell() {
        let mut grid = Grid::new();
        grid.set(3, 5, Some(7), true);

        assert_eq!(Some(7), grid.get(3, 5).value());
        assert!(grid.is_fixed(3, 5));
        assert!(grid.has_number(3, 5, 7));
        assert!(!grid.has_number(3, 5, 6));

        grid.set(3, 5, None, true);

        assert_eq!(None, grid.get(3, 5).value());
        assert!(!grid.is_fixed(3, 5), "cleared cell must not stay fixed");
    }

    #[test]
    fn snapshot_restore_round_trip() {
        let mut grid = Grid::new();
        grid.set(0, 0, Some(5), true);
        grid.set(7, 2, Some(3), false);

        let snapshot = grid.clone();

        grid.set(0, 0, None, false);
        grid.set(4, 4, Some(9), true);
        grid.set(7, 2, Some(1), true);
        assert_ne!(snapshot, grid);

        grid.copy_from(&snapshot);

        assert_eq!(snapshot, grid);
        assert_eq!(Some(5), grid.get(0, 0).value());
        assert!(grid.is_fixed(0, 0));
        assert_eq!(Some(3), grid.get(7, 2).value());
        assert!(!grid.is_fixed(7, 2));
        assert_eq!(None, grid.get(4, 4).value());
    }

    #[test]
    fn clear_resets_all_cells() {
        let mut grid = Grid::new();
        grid.set(1, 1, Some(2), true);
        grid.set(8, 0, Some(8), false);
        assert!(!grid.is_empty());

        grid.clear();

        assert!(grid.is_empty());
        assert_eq!(0, grid.count_clues());
        assert!(!grid.is_fixed(1, 1));
    }

    #[test]
    fn count_clues_and_empty_and_full() {
        let empty = Grid::new();
        assert!(empty.is_empty());
        assert!(!empty.is_full());

        let mut partial = Grid::new();
        partial.set(0, 0, Some(1), true);
        partial.set(5, 3, Some(4), false);
        assert_eq!(2, partial.count_clues());
        assert!(!partial.is_empty());
        assert!(!partial.is_full());

        let mut full = Grid::new();

        for row in 0..SIZE {
            for column in 0..SIZE {
                // Shift each row by its block pattern to get a valid grid,
                // though validity does not matter for this test.
                let number =
                    (column + row * BLOCK_SIZE + row / BLOCK_SIZE) % SIZE + 1;
                full.set(column, row, Some(number), false);
            }
        }

        assert_eq!(CELL_COUNT, full.count_clues());
        assert!(full.is_full());
        assert!(!full.is_empty());
    }

    #[test]
    #[should_panic]
    fn get_out_of_bounds() {
        Grid::new().get(9, 0);
    }

    #[test]
    #[should_panic]
    fn set_invalid_number() {
        Grid::new().set(0, 0, Some(10), false);
    }

    #[test]
    fn serde_round_trip() {
        let mut grid = Grid::new();
        grid.set(2, 6, Some(4), true);
        grid.set(5, 1, Some(8), false);

        let json = serde_json::to_string(&grid).unwrap();
        let deserialized: Grid = serde_json::from_str(&json).unwrap();

        assert_eq!(grid, deserialized);
    }

    #[test]
    fn display_draws_blocks() {
        let mut grid = Grid::new();
        grid.set(0, 0, Some(1), true);
        grid.set(8, 8, Some(9), true);

        let rendered = format!("{}", grid);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(19, lines.len());
        assert!(lines[0].starts_with('╔'));
        assert!(lines[1].contains('1'));
        assert!(lines[17].contains('9'));
        assert!(lines[18].starts_with('╚'));
    }
}
