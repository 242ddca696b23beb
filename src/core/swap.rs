//! Swap validation - tentative swap, match test, commit or strict revert
//!
//! `try_swap` commits a swap that produces a match and returns the match set;
//! otherwise it reverts so the board is byte-identical to its pre-call state
//! and reports why. `probe_swap` always reverts; it is the side-effect-free
//! primitive behind `has_valid_moves` and the AI scorer.

use std::collections::BTreeSet;

use tracing::debug;

use crate::core::board::Board;
use crate::core::matching::find_matches;
use crate::error::SwapError;
use crate::types::Pos;

/// Validate and perform a player swap.
///
/// Valid only for two distinct in-bounds positions at Manhattan distance 1.
/// On success the swap stays committed and the resulting match set is
/// returned; on any error the board is unchanged and nothing else happened.
pub fn try_swap(board: &mut Board, a: Pos, b: Pos) -> Result<BTreeSet<Pos>, SwapError> {
    if a == b {
        return Err(SwapError::SamePosition(a));
    }
    if !board.is_valid(a.row as i16, a.col as i16) {
        return Err(SwapError::OutOfBounds(a));
    }
    if !board.is_valid(b.row as i16, b.col as i16) {
        return Err(SwapError::OutOfBounds(b));
    }
    if !a.is_adjacent(b) {
        return Err(SwapError::NotAdjacent(a, b));
    }

    board.swap(a, b);
    let matches = find_matches(board);
    if matches.is_empty() {
        board.swap(a, b);
        debug!(?a, ?b, "swap reverted, no match");
        return Err(SwapError::NoMatch);
    }

    Ok(matches)
}

/// Test what a swap would match without committing it.
///
/// Returns `None` for pairs that are invalid or produce nothing; the board is
/// always restored. Out-of-range neighbors are a routine non-result here,
/// which is what lets hint scanning probe past the edges.
pub fn probe_swap(board: &mut Board, a: Pos, b: Pos) -> Option<BTreeSet<Pos>> {
    if a == b || !a.is_adjacent(b) {
        return None;
    }
    if !board.is_occupied(a.row as i16, a.col as i16)
        || !board.is_occupied(b.row as i16, b.col as i16)
    {
        return None;
    }

    board.swap(a, b);
    let matches = find_matches(board);
    board.swap(a, b);

    if matches.is_empty() {
        None
    } else {
        Some(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CandyColor::{Blue, Green, Red, Yellow};
    use crate::types::CandyColor;

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

    /// Board where swapping (0,2) and (0,3) creates R R R at row 0
    fn one_move_board() -> Board {
        let mut colors = quiet_colors();
        colors[0][0] = Red;
        colors[0][1] = Red;
        colors[0][2] = Blue;
        colors[0][3] = Red;
        colors[0][4] = Green;
        colors[1][0] = Green;
        colors[1][1] = Blue;
        colors[1][2] = Yellow;
        colors[1][3] = Green;
        Board::from_colors(colors)
    }

    #[test]
    fn successful_swap_commits_and_returns_match() {
        let mut board = one_move_board();
        let matches = try_swap(&mut board, Pos::new(0, 2), Pos::new(0, 3)).unwrap();
        assert!(matches.contains(&Pos::new(0, 0)));
        assert!(matches.contains(&Pos::new(0, 1)));
        assert!(matches.contains(&Pos::new(0, 2)));
        // committed: red now sits at (0,2), blue at (0,3)
        assert_eq!(board.at(Pos::new(0, 2)).unwrap().color, Red);
        assert_eq!(board.at(Pos::new(0, 3)).unwrap().color, Blue);
    }

    #[test]
    fn no_match_swap_reverts_exactly() {
        let mut board = one_move_board();
        let before = board.clone();
        let err = try_swap(&mut board, Pos::new(5, 5), Pos::new(5, 6)).unwrap_err();
        assert_eq!(err, SwapError::NoMatch);
        assert_eq!(board, before);
    }

    #[test]
    fn same_position_is_rejected() {
        let mut board = one_move_board();
        let err = try_swap(&mut board, Pos::new(2, 2), Pos::new(2, 2)).unwrap_err();
        assert_eq!(err, SwapError::SamePosition(Pos::new(2, 2)));
    }

    #[test]
    fn non_adjacent_is_rejected_without_mutation() {
        let mut board = one_move_board();
        let before = board.clone();
        let err = try_swap(&mut board, Pos::new(0, 0), Pos::new(2, 0)).unwrap_err();
        assert_eq!(err, SwapError::NotAdjacent(Pos::new(0, 0), Pos::new(2, 0)));
        assert_eq!(board, before);

        let err = try_swap(&mut board, Pos::new(0, 0), Pos::new(1, 1)).unwrap_err();
        assert!(matches!(err, SwapError::NotAdjacent(..)));
        assert_eq!(board, before);
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let mut board = one_move_board();
        let err = try_swap(&mut board, Pos::new(9, 9), Pos::new(9, 10)).unwrap_err();
        assert_eq!(err, SwapError::OutOfBounds(Pos::new(9, 10)));
    }

    #[test]
    fn probe_reports_match_but_never_commits() {
        let mut board = one_move_board();
        let before = board.clone();

        let probed = probe_swap(&mut board, Pos::new(0, 2), Pos::new(0, 3)).unwrap();
        assert_eq!(probed.len(), 3);
        assert_eq!(board, before);

        assert!(probe_swap(&mut board, Pos::new(5, 5), Pos::new(5, 6)).is_none());
        assert_eq!(board, before);
    }
}
