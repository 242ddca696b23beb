//! Core types shared across the engine
//! This module contains pure data types with no behavior beyond codecs

use serde::{Deserialize, Serialize};

/// Board dimensions
pub const BOARD_ROWS: u8 = 10;
pub const BOARD_COLS: u8 = 10;

/// Default session parameters
pub const DEFAULT_TARGET_SCORE: u32 = 1500;
pub const DEFAULT_MOVES: u32 = 30;
pub const DEFAULT_TIME_SECS: u32 = 120;

/// Safety valve for pathological refill sequences; not a semantic bound.
pub const MAX_CASCADE_PASSES: u32 = 100;

/// Candy colors - exactly four values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandyColor {
    Red,
    Green,
    Blue,
    Yellow,
}

impl CandyColor {
    /// All colors in palette order (used for uniform random draws)
    pub const ALL: [CandyColor; 4] = [
        CandyColor::Red,
        CandyColor::Green,
        CandyColor::Blue,
        CandyColor::Yellow,
    ];

    /// One-character save-file code
    pub fn code(&self) -> &'static str {
        match self {
            CandyColor::Red => "R",
            CandyColor::Green => "G",
            CandyColor::Blue => "B",
            CandyColor::Yellow => "Y",
        }
    }

    /// Parse a save-file color code
    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "R" => Some(CandyColor::Red),
            "G" => Some(CandyColor::Green),
            "B" => Some(CandyColor::Blue),
            "Y" => Some(CandyColor::Yellow),
            _ => None,
        }
    }
}

/// Candy kinds. The kind fixes the score value and the activation footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandyKind {
    Simple,
    RowStriped,
    ColumnStriped,
    Wrapped,
}

impl CandyKind {
    /// Fixed score value per kind
    pub fn score(&self) -> u32 {
        match self {
            CandyKind::Simple => 5,
            CandyKind::RowStriped => 10,
            CandyKind::ColumnStriped => 10,
            CandyKind::Wrapped => 15,
        }
    }

    /// Two-character save-file code
    pub fn code(&self) -> &'static str {
        match self {
            CandyKind::Simple => "SC",
            CandyKind::RowStriped => "LR",
            CandyKind::ColumnStriped => "LC",
            CandyKind::Wrapped => "RC",
        }
    }

    /// Parse a save-file kind code
    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "SC" => Some(CandyKind::Simple),
            "LR" => Some(CandyKind::RowStriped),
            "LC" => Some(CandyKind::ColumnStriped),
            "RC" => Some(CandyKind::Wrapped),
            _ => None,
        }
    }

    pub fn is_special(&self) -> bool {
        !matches!(self, CandyKind::Simple)
    }
}

/// A candy occupying one board cell.
///
/// Candies carry no position or selection state; the board addresses them by
/// `(row, col)` slot and the session tracks at most one selected position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candy {
    pub kind: CandyKind,
    pub color: CandyColor,
}

impl Candy {
    pub fn simple(color: CandyColor) -> Self {
        Self {
            kind: CandyKind::Simple,
            color,
        }
    }

    pub fn new(kind: CandyKind, color: CandyColor) -> Self {
        Self { kind, color }
    }

    pub fn score(&self) -> u32 {
        self.kind.score()
    }
}

/// Cell on the board (None = transiently empty during collapse/refill)
pub type Cell = Option<Candy>;

/// Board position. Derived `Ord` is (row, col), i.e. row-major scan order,
/// which makes `BTreeSet::first` the deterministic match anchor.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another position
    pub fn distance(&self, other: Pos) -> u32 {
        let dr = (self.row as i16 - other.row as i16).unsigned_abs() as u32;
        let dc = (self.col as i16 - other.col as i16).unsigned_abs() as u32;
        dr + dc
    }

    /// True if the two positions share an edge
    pub fn is_adjacent(&self, other: Pos) -> bool {
        self.distance(other) == 1
    }
}

/// A candidate swap of two adjacent cells
pub type Move = (Pos, Pos);

/// Game mode - decides whether the session is move-limited or time-limited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Fixed move budget, no clock
    Classic,
    /// Fixed clock, unlimited moves
    Timed,
}

impl GameMode {
    pub fn is_move_limited(&self) -> bool {
        matches!(self, GameMode::Classic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_scores_are_fixed() {
        assert_eq!(CandyKind::Simple.score(), 5);
        assert_eq!(CandyKind::RowStriped.score(), 10);
        assert_eq!(CandyKind::ColumnStriped.score(), 10);
        assert_eq!(CandyKind::Wrapped.score(), 15);
    }

    #[test]
    fn kind_codes_round_trip() {
        for kind in [
            CandyKind::Simple,
            CandyKind::RowStriped,
            CandyKind::ColumnStriped,
            CandyKind::Wrapped,
        ] {
            assert_eq!(CandyKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(CandyKind::from_code("XX"), None);
    }

    #[test]
    fn color_codes_round_trip() {
        for color in CandyColor::ALL {
            assert_eq!(CandyColor::from_code(color.code()), Some(color));
        }
        // "C" is a kind-code letter, not a color code
        assert_eq!(CandyColor::from_code("C"), None);
    }

    #[test]
    fn pos_ordering_is_row_major() {
        let mut set = std::collections::BTreeSet::new();
        set.insert(Pos::new(1, 0));
        set.insert(Pos::new(0, 9));
        set.insert(Pos::new(0, 2));
        assert_eq!(set.first(), Some(&Pos::new(0, 2)));
    }

    #[test]
    fn pos_adjacency() {
        let p = Pos::new(4, 4);
        assert!(p.is_adjacent(Pos::new(4, 5)));
        assert!(p.is_adjacent(Pos::new(3, 4)));
        assert!(!p.is_adjacent(Pos::new(4, 4)));
        assert!(!p.is_adjacent(Pos::new(5, 5)));
    }
}
