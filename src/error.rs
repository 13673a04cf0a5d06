//! This module contains the error and result definitions used in this crate.

use crate::constraint::Axis;

use std::fmt::{self, Display, Formatter};
use std::num::ParseIntError;

/// An enumeration of the errors that may occur when parsing a
/// [Grid](../struct.Grid.html) from its textual code.
#[derive(Debug, Eq, PartialEq)]
pub enum GridParseError {

    /// Indicates that the number of cells (which are separated by commas)
    /// does not equal 81, the number of cells in a 9x9 grid.
    WrongNumberOfCells,

    /// Indicates that one of the cell entries could not be parsed as a
    /// number.
    NumberFormatError,

    /// Indicates that a cell is filled with an invalid number (0 or more than
    /// 9).
    InvalidNumber
}

impl From<ParseIntError> for GridParseError {
    fn from(_: ParseIntError) -> Self {
        GridParseError::NumberFormatError
    }
}

/// Syntactic sugar for `Result<V, GridParseError>`.
pub type GridParseResult<V> = Result<V, GridParseError>;

/// An enumeration of the ways a user edit can be rejected before it reaches
/// the grid. Rejected edits never mutate any state, so the presentation layer
/// can surface the message and carry on.
#[derive(Debug, Eq, PartialEq)]
pub enum EditError {

    /// Indicates that the entered number is outside the range `[1, 9]`.
    InvalidNumber,

    /// Indicates that the entered number already occurs on one of the three
    /// uniqueness axes through the edited cell. The offending number and the
    /// first conflicting axis are provided for the user-facing message.
    Conflict {

        /// The number whose placement was rejected.
        number: usize,

        /// The axis on which the number already occurs.
        axis: Axis
    }
}

impl Display for EditError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EditError::InvalidNumber =>
                write!(f, "number must be between 1 and 9"),
            EditError::Conflict { number, axis } =>
                write!(f, "{} is already in the {}", number, axis)
        }
    }
}

/// Syntactic sugar for `Result<V, EditError>`.
pub type EditResult<V> = Result<V, EditError>;

/// An enumeration of the recoverable failures of the hint and solve
/// operations on a [Session](../session/struct.Session.html). None of these
/// are fatal; the working grid is always left in the state the user last saw.
#[derive(Debug, Eq, PartialEq)]
pub enum HintError {

    /// Indicates that the search exhausted all candidates without finding a
    /// solution. This is an expected outcome for over-constrained grids, not
    /// an exceptional condition.
    NoSolution,

    /// Indicates that a reveal was requested for a cell that already holds a
    /// number.
    AlreadySet,

    /// Indicates that a reveal was requested while no solution buffer is
    /// available, that is, outside of hinting mode.
    NotHinting
}

impl Display for HintError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            HintError::NoSolution => write!(f, "no solution found"),
            HintError::AlreadySet => write!(f, "already set"),
            HintError::NotHinting => write!(f, "not in hinting mode")
        }
    }
}

/// Syntactic sugar for `Result<V, HintError>`.
pub type HintResult<V> = Result<V, HintError>;

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn conflict_message_names_axis() {
        let error = EditError::Conflict {
            number: 7,
            axis: Axis::Column
        };

        assert_eq!("7 is already in the column", format!("{}", error));
    }

    #[test]
    fn hint_error_messages() {
        assert_eq!("no solution found", format!("{}", HintError::NoSolution));
        assert_eq!("already set", format!("{}", HintError::AlreadySet));
    }
}
