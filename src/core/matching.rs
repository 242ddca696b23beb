//! Match detection - pure streak scan over rows and columns
//!
//! A run is a maximal contiguous sequence of same-colored candies within one
//! row or one column. Every position in a run of length >= 3 is part of the
//! match; a 4 or 5 run is one match, never split into 3-groups. Positions
//! belonging to both a horizontal and a vertical run appear once (set
//! semantics). O(rows * cols), no board mutation.

use std::collections::BTreeSet;

use crate::core::board::Board;
use crate::types::{CandyColor, Pos};

/// Minimum run length that counts as a match
pub const MIN_RUN: usize = 3;

/// Find every position that belongs to a run of >= 3 same-colored candies.
///
/// Empty cells break streaks, so the scan is also safe on mid-cascade boards.
pub fn find_matches(board: &Board) -> BTreeSet<Pos> {
    let mut matches = BTreeSet::new();

    // Horizontal runs
    for row in 0..board.rows() {
        let mut streak_color: Option<CandyColor> = None;
        let mut streak_start: u8 = 0;
        for col in 0..=board.cols() {
            let color = if col < board.cols() {
                board.get(row as i16, col as i16).map(|c| c.color)
            } else {
                None // sentinel: close any open streak at row end
            };
            if color.is_some() && color == streak_color {
                continue;
            }
            if streak_color.is_some() && (col - streak_start) as usize >= MIN_RUN {
                for c in streak_start..col {
                    matches.insert(Pos::new(row, c));
                }
            }
            streak_color = color;
            streak_start = col;
        }
    }

    // Vertical runs
    for col in 0..board.cols() {
        let mut streak_color: Option<CandyColor> = None;
        let mut streak_start: u8 = 0;
        for row in 0..=board.rows() {
            let color = if row < board.rows() {
                board.get(row as i16, col as i16).map(|c| c.color)
            } else {
                None
            };
            if color.is_some() && color == streak_color {
                continue;
            }
            if streak_color.is_some() && (row - streak_start) as usize >= MIN_RUN {
                for r in streak_start..row {
                    matches.insert(Pos::new(r, col));
                }
            }
            streak_color = color;
            streak_start = row;
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use CandyColor::{Blue, Green, Red, Yellow};

    /// 10x10 all-distinct checkerboard-ish base with no runs
    fn quiet_colors() -> Vec<Vec<CandyColor>> {
        (0..10)
            .map(|r| {
                (0..10)
                    .map(|c| match (r + 2 * c) % 4 {
                        0 => Red,
                        1 => Green,
                        2 => Blue,
                        _ => Yellow,
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn quiet_board_has_no_matches() {
        let board = Board::from_colors(quiet_colors());
        assert!(find_matches(&board).is_empty());
    }

    #[test]
    fn horizontal_triple_is_detected() {
        let mut colors = quiet_colors();
        colors[0][0] = Red;
        colors[0][1] = Red;
        colors[0][2] = Red;
        colors[0][3] = Blue;
        colors[1][0] = Green;
        colors[1][1] = Blue;
        colors[1][2] = Yellow;
        let board = Board::from_colors(colors);

        let matches = find_matches(&board);
        assert_eq!(
            matches,
            BTreeSet::from([Pos::new(0, 0), Pos::new(0, 1), Pos::new(0, 2)])
        );
    }

    #[test]
    fn vertical_triple_is_detected() {
        let mut colors = quiet_colors();
        colors[3][5] = Yellow;
        colors[4][5] = Yellow;
        colors[5][5] = Yellow;
        // make sure the neighbors don't extend or cross the run
        colors[2][5] = Red;
        colors[6][5] = Red;
        colors[3][4] = Red;
        colors[3][6] = Green;
        let board = Board::from_colors(colors);

        let matches = find_matches(&board);
        assert!(matches.contains(&Pos::new(3, 5)));
        assert!(matches.contains(&Pos::new(4, 5)));
        assert!(matches.contains(&Pos::new(5, 5)));
        assert_eq!(matches.len(), 3);
    }

    #[test]
    fn run_of_five_is_one_match() {
        let mut colors = quiet_colors();
        for c in 2..7 {
            colors[4][c] = Green;
        }
        colors[4][1] = Red;
        colors[4][7] = Red;
        // break accidental verticals through the run
        colors[3][2] = Blue;
        colors[5][2] = Blue;
        let board = Board::from_colors(colors);

        let matches = find_matches(&board);
        let expected: BTreeSet<Pos> = (2..7).map(|c| Pos::new(4, c)).collect();
        assert_eq!(matches, expected);
    }

    #[test]
    fn cross_intersection_counted_once() {
        let mut colors = quiet_colors();
        // horizontal run at row 2, cols 1..=3; vertical run at col 2, rows 2..=4
        colors[2][1] = Red;
        colors[2][2] = Red;
        colors[2][3] = Red;
        colors[3][2] = Red;
        colors[4][2] = Red;
        colors[2][0] = Blue;
        colors[2][4] = Blue;
        colors[1][2] = Blue;
        colors[5][2] = Blue;
        let board = Board::from_colors(colors);

        let matches = find_matches(&board);
        assert_eq!(matches.len(), 5);
        assert!(matches.contains(&Pos::new(2, 2)));
    }

    #[test]
    fn empty_cells_break_streaks() {
        let mut colors = quiet_colors();
        colors[0][0] = Red;
        colors[0][1] = Red;
        colors[0][2] = Red;
        let mut board = Board::from_colors(colors);
        board.put(Pos::new(0, 1), None);

        assert!(find_matches(&board).is_empty());
    }

    #[test]
    fn run_at_board_edge_is_closed() {
        let mut colors = quiet_colors();
        for c in 7..10 {
            colors[9][c] = Blue;
        }
        colors[9][6] = Red;
        colors[8][7] = Red;
        colors[8][8] = Green;
        colors[8][9] = Yellow;
        let board = Board::from_colors(colors);

        let matches = find_matches(&board);
        assert_eq!(
            matches,
            BTreeSet::from([Pos::new(9, 7), Pos::new(9, 8), Pos::new(9, 9)])
        );
    }
}
