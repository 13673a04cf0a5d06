//! This module defines the uniqueness rules of the puzzle and the collision
//! checks derived from them.
//!
//! A number placed in a cell must be unique within the cell's row, column,
//! and 3x3 box. Each of these groups is an [Axis]. The functions in this
//! module scan the axes through a queried cell, always excluding the queried
//! cell itself, so a cell never collides with its own content. This makes the
//! checks usable both for validating a proposed entry before it is written
//! and for re-validating a cell that is already filled.
//!
//! [find_conflict] is the entry-point for user edits, since it reports which
//! axis a rejected entry conflicts on. [collides] is the legality predicate
//! used by the [solver](crate::solver) during its search.

use crate::{Grid, BLOCK_SIZE, SIZE};

use serde::{Deserialize, Serialize};

use std::fmt::{self, Display, Formatter};

/// One of the three uniqueness constraint groups of the puzzle. Every cell
/// belongs to exactly one row, one column, and one 3x3 box, and its number
/// must not occur a second time in any of them.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Axis {

    /// The vertical group of 9 cells sharing a cell's column coordinate.
    Column,

    /// The horizontal group of 9 cells sharing a cell's row coordinate.
    Row,

    /// The 3x3 block of cells containing a cell. Box origins are aligned to
    /// multiples of 3 in both coordinates.
    Box
}

impl Display for Axis {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Column => write!(f, "column"),
            Axis::Row => write!(f, "row"),
            Axis::Box => write!(f, "box")
        }
    }
}

fn in_column(grid: &Grid, column: usize, row: usize, number: usize) -> bool {
    for other_row in 0..SIZE {
        if other_row != row && grid.has_number(column, other_row, number) {
            return true;
        }
    }

    false
}

fn in_row(grid: &Grid, column: usize, row: usize, number: usize) -> bool {
    for other_column in 0..SIZE {
        if other_column != column &&
                grid.has_number(other_column, row, number) {
            return true;
        }
    }

    false
}

fn in_box(grid: &Grid, column: usize, row: usize, number: usize) -> bool {
    let box_column = (column / BLOCK_SIZE) * BLOCK_SIZE;
    let box_row = (row / BLOCK_SIZE) * BLOCK_SIZE;

    for other_row in box_row..(box_row + BLOCK_SIZE) {
        for other_column in box_column..(box_column + BLOCK_SIZE) {
            // Exclusion is by exact coordinate identity: cells sharing only
            // the row or only the column with the queried cell are still
            // part of the box scan.
            if (other_column, other_row) != (column, row) &&
                    grid.has_number(other_column, other_row, number) {
                return true;
            }
        }
    }

    false
}

/// Indicates whether `number` already occurs among the cells of the given
/// axis through `(column, row)`, excluding the queried cell itself. The
/// queried cell's own content therefore never counts as an occurrence.
///
/// # Arguments
///
/// * `grid`: The grid whose cells are scanned.
/// * `column`: The column (x-coordinate) of the queried cell. Must be in the
/// range `[0, 8]`.
/// * `row`: The row (y-coordinate) of the queried cell. Must be in the range
/// `[0, 8]`.
/// * `number`: The number to look for on the axis.
/// * `axis`: The [Axis] to scan.
///
/// # Panics
///
/// If `column` or `row` is out of range (see [Grid::get]).
pub fn value_on_axis(grid: &Grid, column: usize, row: usize, number: usize,
        axis: Axis) -> bool {
    match axis {
        Axis::Column => in_column(grid, column, row, number),
        Axis::Row => in_row(grid, column, row, number),
        Axis::Box => in_box(grid, column, row, number)
    }
}

/// Finds the first axis on which placing `number` at `(column, row)` would
/// collide with an existing cell, or `None` if the placement is legal. Axes
/// are checked in the order column, row, box, which is also the order in
/// which conflicts are reported to the user.
///
/// # Panics
///
/// If `column` or `row` is out of range (see [Grid::get]).
pub fn find_conflict(grid: &Grid, column: usize, row: usize, number: usize)
        -> Option<Axis> {
    if in_column(grid, column, row, number) {
        Some(Axis::Column)
    }
    else if in_row(grid, column, row, number) {
        Some(Axis::Row)
    }
    else if in_box(grid, column, row, number) {
        Some(Axis::Box)
    }
    else {
        None
    }
}

/// Indicates whether placing `number` at `(column, row)` collides on any of
/// the three axes. This is the sole legality predicate of the search: a
/// placement for which this returns `false` violates no uniqueness rule.
///
/// # Panics
///
/// If `column` or `row` is out of range (see [Grid::get]).
pub fn collides(grid: &Grid, column: usize, row: usize, number: usize)
        -> bool {
    find_conflict(grid, column, row, number).is_some()
}

/// Indicates whether the entire grid is free of axis collisions, that is,
/// every filled cell's number is unique within its row, column, and box.
/// Empty cells do not violate any rule.
pub fn check(grid: &Grid) -> bool {
    for row in 0..SIZE {
        for column in 0..SIZE {
            if let Some(number) = grid.get(column, row).value() {
                if collides(grid, column, row, number) {
                    return false;
                }
            }
        }
    }

    true
}
