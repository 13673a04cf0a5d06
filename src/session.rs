//! This module contains the session layer that sits between the presentation
//! layer and the [solver](crate::solver).
//!
//! A [Session] owns the grid the user edits together with the buffers that
//! make hints non-destructive: a snapshot taken before every solve attempt
//! and a solution buffer holding the last solved grid. The solver itself
//! never sees any of this; it is handed the working grid for the duration of
//! one call and nothing else.
//!
//! The session also tracks which [Mode] it is in. The mode is transitioned
//! only by explicit user actions (editing, asking for a hint, revealing the
//! full solution, clearing) and is never inspected by the solver.

use crate::{Grid, SIZE};
use crate::constraint;
use crate::error::{EditError, EditResult, HintError, HintResult};
use crate::solver::{BacktrackingSolver, Outcome};

use log::debug;

use serde::{Deserialize, Serialize};

/// The interaction mode of a [Session]. Replaces the usual tangle of boolean
/// flags with a single state machine owned by the session.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Mode {

    /// The user is entering numbers. No solution buffer is available.
    Editing,

    /// A solution has been computed and cached; the user may reveal
    /// individual cells from it.
    Hinting,

    /// The full solution has been copied into the working grid.
    Revealed
}

/// A puzzle session: the working grid the user edits, the cached solution
/// buffer serving hint reveals, and the current [Mode].
///
/// The working grid persists for the lifetime of one puzzle session and is
/// reset by [Session::clear]. The solution buffer is created fresh on each
/// successful solve attempt and dropped by any edit, since an edited grid
/// may no longer match the cached solution.
///
/// ```
/// use sudoku_assist::session::{Mode, Session};
///
/// let mut session = Session::new();
/// session.enter(0, 0, Some(5), true).unwrap();
///
/// // A second 5 in the same row is rejected before it reaches the grid.
/// assert!(session.enter(4, 0, Some(5), true).is_err());
/// assert_eq!(Mode::Editing, session.mode());
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    working: Grid,
    solution: Option<Grid>,
    mode: Mode
}

impl Session {

    /// Creates a new session with an empty working grid in [Mode::Editing].
    pub fn new() -> Session {
        Session {
            working: Grid::new(),
            solution: None,
            mode: Mode::Editing
        }
    }

    /// Replaces the working grid with the given one, dropping any cached
    /// solution and returning to [Mode::Editing]. This is how the
    /// presentation layer hands over a parsed puzzle.
    pub fn load(&mut self, grid: Grid) {
        self.working = grid;
        self.solution = None;
        self.mode = Mode::Editing;
    }

    /// Gets a reference to the working grid, i.e. the state the user
    /// currently sees.
    pub fn grid(&self) -> &Grid {
        &self.working
    }

    /// Gets the current interaction mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Gets a reference to the cached solution buffer, if a solve attempt
    /// has succeeded since the last edit.
    pub fn solution(&self) -> Option<&Grid> {
        self.solution.as_ref()
    }

    /// Applies a user edit to the cell at the specified position. A `number`
    /// of `None` clears the cell; `Some(n)` fills it after the legality
    /// pre-check passed. Any edit drops the cached solution and returns the
    /// session to [Mode::Editing], since the altered grid may no longer
    /// match it.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the edited cell. Must be in
    /// the range `[0, 8]`.
    /// * `row`: The row (y-coordinate) of the edited cell. Must be in the
    /// range `[0, 8]`.
    /// * `number`: `Some(n)` to enter `n`, which must be in the range
    /// `[1, 9]`, or `None` to clear the cell.
    /// * `fixed`: Whether the entered number shall be marked as fixed, i.e.
    /// protected from the solver. Ignored when clearing.
    ///
    /// # Errors
    ///
    /// * [EditError::InvalidNumber] if `number` is `Some` of a number
    /// outside `[1, 9]`. The grid is not touched.
    /// * [EditError::Conflict] if the number already occurs on an axis
    /// through the edited cell. The grid is not touched and the error names
    /// the conflicting axis for the user-facing message.
    ///
    /// # Panics
    ///
    /// If `column` or `row` is out of range (see [Grid::get]).
    pub fn enter(&mut self, column: usize, row: usize, number: Option<usize>,
            fixed: bool) -> EditResult<()> {
        if let Some(number) = number {
            if number == 0 || number > SIZE {
                return Err(EditError::InvalidNumber);
            }

            if let Some(axis) =
                    constraint::find_conflict(&self.working, column, row,
                        number) {
                return Err(EditError::Conflict {
                    number,
                    axis
                });
            }

            self.working.set(column, row, Some(number), fixed);
        }
        else {
            self.working.set(column, row, None, false);
        }

        self.solution = None;
        self.mode = Mode::Editing;
        Ok(())
    }

    /// Solves the puzzle without disturbing the visible grid, entering
    /// [Mode::Hinting] on success so individual cells can be revealed with
    /// [Session::reveal].
    ///
    /// A snapshot of the working grid is taken first; the solver then runs
    /// on the working grid itself and the snapshot is restored afterwards,
    /// whatever the outcome. On success, the solved grid is kept in the
    /// solution buffer. The user therefore never sees any of the search's
    /// scratch work.
    ///
    /// # Errors
    ///
    /// [HintError::NoSolution] if the search exhausted all candidates. The
    /// working grid is restored to the exact state before the call.
    pub fn solve_one(&mut self) -> HintResult<()> {
        let snapshot = self.working.clone();

        match BacktrackingSolver.solve(&mut self.working) {
            Outcome::Solved => {
                let solution = self.working.clone();
                self.working.copy_from(&snapshot);
                self.solution = Some(solution);
                self.mode = Mode::Hinting;
                debug!("hint solve succeeded, solution cached");
                Ok(())
            },
            Outcome::Exhausted => {
                self.working.copy_from(&snapshot);
                debug!("hint solve found no solution, grid restored");
                Err(HintError::NoSolution)
            }
        }
    }

    /// Reveals the cell at the specified position from the solution buffer.
    /// The revealed number is written into the working grid and marked as
    /// fixed, so it can neither be re-entered nor overwritten by a later
    /// search. No other cell is altered.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the cell to reveal. Must be
    /// in the range `[0, 8]`.
    /// * `row`: The row (y-coordinate) of the cell to reveal. Must be in the
    /// range `[0, 8]`.
    ///
    /// # Errors
    ///
    /// * [HintError::NotHinting] if the session is not in [Mode::Hinting],
    /// i.e. no solution buffer is available.
    /// * [HintError::AlreadySet] if the cell already holds a number. Nothing
    /// is mutated.
    ///
    /// # Panics
    ///
    /// If `column` or `row` is out of range (see [Grid::get]).
    pub fn reveal(&mut self, column: usize, row: usize) -> HintResult<usize> {
        if self.mode != Mode::Hinting {
            return Err(HintError::NotHinting);
        }

        let solution = match self.solution {
            Some(ref solution) => solution,
            None => return Err(HintError::NotHinting)
        };

        if self.working.get(column, row).value().is_some() {
            return Err(HintError::AlreadySet);
        }

        // A solution buffer only ever holds a grid the solver reported as
        // solved, so every cell is filled.
        let number = solution.get(column, row).value().unwrap();
        self.working.set(column, row, Some(number), true);
        debug!("revealed {} at ({}, {})", number, column, row);
        Ok(number)
    }

    /// Copies the full solution into the working grid, entering
    /// [Mode::Revealed]. If a solution buffer exists from a prior successful
    /// solve, it is used directly and no search runs; otherwise the solver
    /// runs on the working grid and its result is kept and cached.
    ///
    /// # Errors
    ///
    /// [HintError::NoSolution] if no cached solution exists and the search
    /// exhausted all candidates. The working grid is restored to the exact
    /// state before the call.
    pub fn solve_all(&mut self) -> HintResult<()> {
        if let Some(ref solution) = self.solution {
            self.working.copy_from(solution);
            self.mode = Mode::Revealed;
            debug!("copied cached solution into working grid");
            return Ok(());
        }

        let snapshot = self.working.clone();

        match BacktrackingSolver.solve(&mut self.working) {
            Outcome::Solved => {
                self.solution = Some(self.working.clone());
                self.mode = Mode::Revealed;
                debug!("full solve succeeded");
                Ok(())
            },
            Outcome::Exhausted => {
                self.working.copy_from(&snapshot);
                debug!("full solve found no solution, grid restored");
                Err(HintError::NoSolution)
            }
        }
    }

    /// Resets the working grid to all-empty and not fixed, drops the cached
    /// solution, and returns to [Mode::Editing]. Confirmation of the reset
    /// (such as requiring a second tap) is the presentation layer's
    /// business.
    pub fn clear(&mut self) {
        self.working.clear();
        self.solution = None;
        self.mode = Mode::Editing;
    }
}

impl Default for Session {
    fn default() -> Session {
        Session::new()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::constraint::Axis;

    // The solved grid from the World Puzzle Federation Sudoku Grand Prix,
    // GP 2020 Round 8, Puzzle 2, with the cells (0, 0) = 7 and (8, 8) = 1
    // knocked out again.

    const NEARLY_SOLVED: &str = "\
         ,4,6,2,8,1,3,5,9,\
        9,1,2,5,3,7,8,4,6,\
        8,5,3,4,9,6,1,7,2,\
        3,7,4,1,2,5,6,9,8,\
        6,2,8,7,4,9,5,1,3,\
        5,9,1,3,6,8,7,2,4,\
        1,6,9,8,7,4,2,3,5,\
        2,8,5,9,1,3,4,6,7,\
        4,3,7,6,5,2,9,8, ";

    fn nearly_solved_session() -> Session {
        let mut session = Session::new();
        session.load(Grid::parse(NEARLY_SOLVED).unwrap());
        session
    }

    #[test]
    fn edit_conflicts_are_rejected_with_axis() {
        let mut session = Session::new();
        session.enter(0, 0, Some(5), true).unwrap();

        let column_conflict = session.enter(0, 5, Some(5), true);
        let row_conflict = session.enter(4, 0, Some(5), true);
        let box_conflict = session.enter(1, 1, Some(5), true);

        assert_eq!(Err(EditError::Conflict {
            number: 5,
            axis: Axis::Column
        }), column_conflict);
        assert_eq!(Err(EditError::Conflict {
            number: 5,
            axis: Axis::Row
        }), row_conflict);
        assert_eq!(Err(EditError::Conflict {
            number: 5,
            axis: Axis::Box
        }), box_conflict);

        // The rejected edits must not have reached the grid.
        assert_eq!(1, session.grid().count_clues());
    }

    #[test]
    fn edit_rejects_invalid_numbers() {
        let mut session = Session::new();

        assert_eq!(Err(EditError::InvalidNumber),
            session.enter(0, 0, Some(0), true));
        assert_eq!(Err(EditError::InvalidNumber),
            session.enter(0, 0, Some(10), true));
        assert!(session.grid().is_empty());
    }

    #[test]
    fn edit_clears_cell() {
        let mut session = Session::new();
        session.enter(3, 3, Some(8), true).unwrap();
        session.enter(3, 3, None, false).unwrap();

        assert!(session.grid().is_empty());
        assert!(!session.grid().is_fixed(3, 3));
    }

    #[test]
    fn hint_flow_preserves_visible_state() {
        let mut session = nearly_solved_session();
        let before = session.grid().clone();

        session.solve_one().unwrap();

        // The search's scratch work must be invisible.
        assert_eq!(&before, session.grid());
        assert_eq!(Mode::Hinting, session.mode());
        assert!(session.solution().unwrap().is_full());

        let number = session.reveal(0, 0).unwrap();

        assert_eq!(7, number);
        assert_eq!(Some(7), session.grid().get(0, 0).value());
        assert!(session.grid().is_fixed(0, 0));

        // No other cell moved, in particular the second hole is still open.
        assert_eq!(None, session.grid().get(8, 8).value());
    }

    #[test]
    fn reveal_of_filled_cell_is_rejected_without_mutation() {
        let mut session = nearly_solved_session();
        session.solve_one().unwrap();
        session.reveal(0, 0).unwrap();

        let before = session.grid().clone();

        assert_eq!(Err(HintError::AlreadySet), session.reveal(0, 0));
        assert_eq!(Err(HintError::AlreadySet), session.reveal(4, 4));
        assert_eq!(&before, session.grid());
        assert_eq!(Mode::Hinting, session.mode());
    }

    #[test]
    fn reveal_outside_hinting_mode_is_rejected() {
        let mut session = nearly_solved_session();

        assert_eq!(Err(HintError::NotHinting), session.reveal(0, 0));
    }

    #[test]
    fn solve_one_failure_restores_grid() {
        let mut session = Session::new();

        // 1 to 8 in the first column and the needed 9 blocked via the box.
        for row in 0..8 {
            session.enter(0, row, Some(row + 1), true).unwrap();
        }

        session.enter(1, 8, Some(9), true).unwrap();

        let before = session.grid().clone();

        assert_eq!(Err(HintError::NoSolution), session.solve_one());
        assert_eq!(&before, session.grid());
        assert_eq!(Mode::Editing, session.mode());
        assert_eq!(None, session.solution());
    }

    #[test]
    fn solve_all_reveals_and_is_idempotent() {
        let mut session = nearly_solved_session();

        session.solve_all().unwrap();

        assert_eq!(Mode::Revealed, session.mode());
        assert!(session.grid().is_full());

        let first = session.grid().clone();

        session.solve_all().unwrap();

        assert_eq!(&first, session.grid());
    }

    #[test]
    fn solve_all_reuses_cached_solution_from_hinting() {
        let mut session = nearly_solved_session();
        session.solve_one().unwrap();

        let solution = session.solution().unwrap().clone();

        session.solve_all().unwrap();

        assert_eq!(Mode::Revealed, session.mode());
        assert_eq!(&solution, session.grid());
    }

    #[test]
    fn edit_drops_cached_solution() {
        let mut session = nearly_solved_session();
        session.solve_one().unwrap();
        assert!(session.solution().is_some());

        session.enter(0, 0, Some(7), true).unwrap();

        assert_eq!(None, session.solution());
        assert_eq!(Mode::Editing, session.mode());
        assert_eq!(Err(HintError::NotHinting), session.reveal(8, 8));
    }

    #[test]
    fn clear_resets_session() {
        let mut session = nearly_solved_session();
        session.solve_one().unwrap();

        session.clear();

        assert!(session.grid().is_empty());
        assert_eq!(None, session.solution());
        assert_eq!(Mode::Editing, session.mode());
    }
}
