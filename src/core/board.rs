//! Board module - manages the candy grid
//!
//! The board is a 10x10 grid where each cell holds exactly one candy while the
//! board is settled; cells are empty only transiently inside a cascade pass.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (row, col) where row 0 is the top row and col 0 the left column.

use crate::core::rng::SimpleRng;
use crate::types::{Candy, CandyColor, Cell, Pos, BOARD_COLS, BOARD_ROWS};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_ROWS as usize) * (BOARD_COLS as usize);

/// The game board - 10 rows x 10 columns using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * COLS + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn empty() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Create a board filled with random simple candies.
    ///
    /// The result is not necessarily settled; callers that need a match-free
    /// board regenerate until `find_matches` comes back empty.
    pub fn random(rng: &mut SimpleRng) -> Self {
        let mut board = Self::empty();
        for cell in &mut board.cells {
            *cell = Some(Self::random_simple(rng));
        }
        board
    }

    /// Draw a fresh refill candy: uniform color, always kind Simple
    pub fn random_simple(rng: &mut SimpleRng) -> Candy {
        let idx = rng.next_range(CandyColor::ALL.len() as u32) as usize;
        Candy::simple(CandyColor::ALL[idx])
    }

    /// Calculate flat index from (row, col); None when out of bounds
    #[inline(always)]
    fn index(row: i16, col: i16) -> Option<usize> {
        if row < 0 || row >= BOARD_ROWS as i16 || col < 0 || col >= BOARD_COLS as i16 {
            return None;
        }
        Some((row as usize) * (BOARD_COLS as usize) + (col as usize))
    }

    pub fn rows(&self) -> u8 {
        BOARD_ROWS
    }

    pub fn cols(&self) -> u8 {
        BOARD_COLS
    }

    /// Get cell at (row, col). Returns None when out of bounds or empty;
    /// out-of-range probes are routine for neighbor scans, never an error.
    pub fn get(&self, row: i16, col: i16) -> Cell {
        Self::index(row, col).and_then(|idx| self.cells[idx])
    }

    /// Get cell at a known-valid position
    pub fn at(&self, pos: Pos) -> Cell {
        self.get(pos.row as i16, pos.col as i16)
    }

    /// Set cell at (row, col). Returns false when out of bounds.
    pub fn set(&mut self, row: i16, col: i16, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Set cell at a known-valid position
    pub fn put(&mut self, pos: Pos, cell: Cell) {
        self.set(pos.row as i16, pos.col as i16, cell);
    }

    /// Check if position is within bounds
    pub fn is_valid(&self, row: i16, col: i16) -> bool {
        Self::index(row, col).is_some()
    }

    /// Check if position is within bounds and holds a candy
    pub fn is_occupied(&self, row: i16, col: i16) -> bool {
        self.get(row, col).is_some()
    }

    /// Swap the contents of two cells by index; candies are never aliased
    /// between two logical positions.
    pub fn swap(&mut self, a: Pos, b: Pos) {
        if let (Some(ia), Some(ib)) = (
            Self::index(a.row as i16, a.col as i16),
            Self::index(b.row as i16, b.col as i16),
        ) {
            self.cells.swap(ia, ib);
        }
    }

    /// Count empty cells (zero whenever the board is settled)
    pub fn empty_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Create from per-row cell vectors (save loading and tests)
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        assert_eq!(rows.len(), BOARD_ROWS as usize);
        assert!(rows.iter().all(|row| row.len() == BOARD_COLS as usize));

        let mut flat = [None; BOARD_SIZE];
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                flat[r * BOARD_COLS as usize + c] = *cell;
            }
        }
        Self { cells: flat }
    }

    /// Convert to per-row cell vectors (save writing and tests)
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        let cols = BOARD_COLS as usize;
        (0..BOARD_ROWS as usize)
            .map(|r| self.cells[r * cols..(r + 1) * cols].to_vec())
            .collect()
    }

    /// Build a board of simple candies from a color grid (test helper)
    pub fn from_colors(colors: Vec<Vec<CandyColor>>) -> Self {
        Self::from_rows(
            colors
                .into_iter()
                .map(|row| row.into_iter().map(|c| Some(Candy::simple(c))).collect())
                .collect(),
        )
    }
}
