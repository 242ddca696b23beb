//! Typed errors surfaced at the engine's API boundaries.
//!
//! Invalid moves are recoverable no-ops (the board is strictly reverted
//! before the error is returned); only malformed save files and genuinely
//! invalid calls are reported outward.

use crate::types::Pos;

/// Why a swap request was rejected. The board is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SwapError {
    #[error("cannot swap a position with itself: {0:?}")]
    SamePosition(Pos),

    #[error("positions are not adjacent: {0:?} and {1:?}")]
    NotAdjacent(Pos, Pos),

    #[error("position out of bounds: {0:?}")]
    OutOfBounds(Pos),

    #[error("swap produces no match")]
    NoMatch,
}

/// Why a save file failed to load or a board failed to serialize. Loading
/// is atomic: on any error the session it was meant to restore is left
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SaveError {
    #[error("missing score line")]
    MissingScore,

    #[error("cannot save a board with an empty cell at row {row}, column {col}")]
    EmptyCell { row: usize, col: usize },

    #[error("invalid score line: {0:?}")]
    InvalidScore(String),

    #[error("expected {expected} rows, found {found}")]
    WrongRowCount { expected: usize, found: usize },

    #[error("row {row}: expected {expected} columns, found {found}")]
    WrongColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row}, column {col}: unrecognized token {token:?}")]
    BadToken {
        row: usize,
        col: usize,
        token: String,
    },
}
