//! This module contains the logic for solving a grid.
//!
//! The [BacktrackingSolver] performs a depth-first exhaustive search over the
//! 81 cells of a [Grid]. The search is iterative: instead of recursing, it
//! moves a cursor through the cells in a fixed scan order and keeps a single
//! direction flag that distinguishes advancing into untried cells from
//! retreating to undo earlier placements. Memory usage is therefore constant,
//! and termination is guaranteed since every (cell, candidate) combination is
//! attempted at most once between two cursor moves.

use crate::{Grid, CELL_COUNT, SIZE};
use crate::constraint;

use log::debug;

/// An enumeration of the ways a search can terminate. Unsolvable grids are a
/// normal, expected outcome, not an error: the caller decides how to present
/// them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {

    /// Indicates that the search found an assignment of all non-fixed cells
    /// such that no axis collision exists anywhere. The solved grid is left
    /// in the buffer that was passed to the solver. If the grid admits more
    /// than one solution, the first one found in scan order is reported.
    Solved,

    /// Indicates that the search exhausted all candidates of the first cell
    /// in scan order without finding a solution, i.e. no solution exists for
    /// the given fixed cells.
    Exhausted
}

/// Whether the cursor is advancing into untried cells or retreating to undo
/// earlier placements. Fixed cells are crossed in whichever direction the
/// search is already moving, so backtracking skips over them instead of
/// treating them as choice points.
#[derive(Clone, Copy, Eq, PartialEq)]
enum Direction {
    Forward,
    Backward
}

/// A solver which fills all non-fixed cells of a [Grid] by iterative
/// backtracking. Cells marked as fixed are never altered; the values the
/// search writes into the remaining cells are scratch state until the search
/// succeeds.
///
/// The cursor scans cells column by column, advancing through the rows of a
/// column before moving to the next one. At each non-fixed cell, candidates
/// are tried in increasing order starting above the cell's current value.
/// A candidate that collides on some axis is replaced by the next one; when
/// all nine candidates of a cell are exhausted, the cell is reset to empty
/// and the cursor retreats to retry the previous choice point.
///
/// The solver mutates the grid it is given in place and retains no reference
/// to it afterwards. Callers that need the pre-solve state afterwards must
/// snapshot the grid before the call; the [session](crate::session) layer
/// does exactly that.
pub struct BacktrackingSolver;

impl BacktrackingSolver {

    /// Runs the search on the given grid until it either finds a solution or
    /// proves that none exists. On [Outcome::Solved], every cell of `grid` is
    /// filled and no axis collision exists anywhere; on [Outcome::Exhausted],
    /// the non-fixed cells are left in an undefined intermediate state and
    /// the caller is expected to restore its own snapshot.
    ///
    /// Cells that are fixed are guaranteed to hold the identical value after
    /// the call, whatever the outcome.
    ///
    /// # Arguments
    ///
    /// * `grid`: The grid to solve. Its fixed cells must be mutually free of
    /// axis collisions, and its non-fixed cells should be empty; non-empty
    /// non-fixed cells are treated as partially consumed candidates of an
    /// earlier search over the same grid.
    pub fn solve(&self, grid: &mut Grid) -> Outcome {
        let mut index = 0;
        let mut direction = Direction::Forward;
        let mut steps = 0u64;

        loop {
            let column = index / SIZE;
            let row = index % SIZE;
            steps += 1;

            if grid.is_fixed(column, row) {
                match direction {
                    Direction::Forward => {
                        if index == CELL_COUNT - 1 {
                            debug!("search solved after {} steps", steps);
                            return Outcome::Solved;
                        }

                        index += 1;
                    },
                    Direction::Backward => {
                        if index == 0 {
                            debug!("search exhausted after {} steps", steps);
                            return Outcome::Exhausted;
                        }

                        index -= 1;
                    }
                }

                continue;
            }

            let tried = grid.get(column, row).value().unwrap_or(0);

            if tried == SIZE {
                // Reached backward with all nine candidates consumed: undo
                // this placement and retreat further.
                grid.set(column, row, None, false);

                if index == 0 {
                    debug!("search exhausted after {} steps", steps);
                    return Outcome::Exhausted;
                }

                index -= 1;
                direction = Direction::Backward;
                continue;
            }

            let candidate = tried + 1;
            grid.set(column, row, Some(candidate), false);

            if !constraint::collides(grid, column, row, candidate) {
                if index == CELL_COUNT - 1 {
                    debug!("search solved after {} steps", steps);
                    return Outcome::Solved;
                }

                index += 1;
                direction = Direction::Forward;
            }
            else if candidate == SIZE {
                grid.set(column, row, None, false);

                if index == 0 {
                    debug!("search exhausted after {} steps", steps);
                    return Outcome::Exhausted;
                }

                index -= 1;
                direction = Direction::Backward;
            }

            // A collision with candidates remaining keeps the cursor on this
            // cell; the next pass tries the next candidate.
        }
    }
}
