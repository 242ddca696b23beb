//! Cascade resolution - the remove -> collapse -> refill -> re-match loop
//!
//! Drives one player move to a settled board in a single synchronous call:
//! any pacing between the sub-steps belongs to the presentation layer. Each
//! pass decides special-candy creation, expands chained activations, scores
//! and removes, compacts every column downward, refills from the session RNG,
//! and re-scans; a non-empty re-scan starts the next pass.

use std::collections::BTreeSet;

use arrayvec::ArrayVec;
use tracing::{debug, warn};

use crate::core::board::Board;
use crate::core::matching::find_matches;
use crate::core::rng::SimpleRng;
use crate::core::special::{decide, expand_with_chains};
use crate::events::GameEvent;
use crate::types::{Candy, Pos, BOARD_ROWS, MAX_CASCADE_PASSES};

/// What one full cascade did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CascadeOutcome {
    /// Total score gained across all passes
    pub score_delta: u32,
    /// Number of remove/collapse/refill passes
    pub passes: u32,
    /// Total candies removed
    pub removed: u32,
}

/// Resolve a match set to a settled board.
///
/// `initial` is the match set produced by the committing swap. Events for
/// every transition are pushed onto `events` in order; the final event is
/// always `Stable`.
pub fn resolve(
    board: &mut Board,
    initial: BTreeSet<Pos>,
    rng: &mut SimpleRng,
    events: &mut Vec<GameEvent>,
) -> CascadeOutcome {
    let mut outcome = CascadeOutcome::default();
    let mut matches = initial;

    while !matches.is_empty() {
        if outcome.passes >= MAX_CASCADE_PASSES {
            // Safety valve only; the loop terminates on its own in practice.
            warn!(passes = outcome.passes, "cascade pass cap reached");
            break;
        }
        outcome.passes += 1;

        events.push(GameEvent::Match {
            positions: matches.clone(),
        });

        let removed = remove_matches(board, &matches, events);
        outcome.score_delta += removed.1;
        outcome.removed += removed.0;

        collapse(board);
        events.push(GameEvent::Collapse);

        refill(board, rng);

        matches = find_matches(board);
        debug!(
            pass = outcome.passes,
            removed = removed.0,
            rematches = matches.len(),
            "cascade pass complete"
        );
    }

    events.push(GameEvent::Stable);
    outcome
}

/// Remove one expanded match set from the board, scoring every removed candy
/// by its kind score and placing any newly created special at the anchor.
///
/// Returns `(candies_removed, score_delta)`.
fn remove_matches(
    board: &mut Board,
    matches: &BTreeSet<Pos>,
    events: &mut Vec<GameEvent>,
) -> (u32, u32) {
    let spawn = decide(board, matches);
    let removal = expand_with_chains(board, matches);

    let mut score_delta: u32 = 0;
    let mut removed: u32 = 0;
    let mut removed_positions = BTreeSet::new();

    for &pos in &removal {
        // The anchor cell is overwritten by the new special, not scored.
        if let Some(s) = spawn {
            if pos == s.anchor {
                continue;
            }
        }
        if let Some(candy) = board.at(pos) {
            score_delta += candy.score();
            removed += 1;
            removed_positions.insert(pos);
            board.put(pos, None);
        }
    }

    if let Some(s) = spawn {
        board.put(s.anchor, Some(s.candy));
    }

    events.push(GameEvent::Remove {
        positions: removed_positions,
        score_delta,
    });

    (removed, score_delta)
}

/// Compact every column independently: occupied cells fall to the bottom
/// preserving relative order, vacated cells gather at the top.
pub fn collapse(board: &mut Board) {
    for col in 0..board.cols() {
        let mut stack: ArrayVec<Candy, { BOARD_ROWS as usize }> = ArrayVec::new();
        for row in (0..board.rows()).rev() {
            if let Some(candy) = board.get(row as i16, col as i16) {
                stack.push(candy);
            }
        }

        for (i, candy) in stack.iter().enumerate() {
            let row = board.rows() - 1 - i as u8;
            board.set(row as i16, col as i16, Some(*candy));
        }
        for row in 0..board.rows() - stack.len() as u8 {
            board.set(row as i16, col as i16, None);
        }
    }
}

/// Fill every empty cell (always topmost after collapse) with a fresh random
/// simple candy.
pub fn refill(board: &mut Board, rng: &mut SimpleRng) {
    for col in 0..board.cols() {
        for row in 0..board.rows() {
            if board.get(row as i16, col as i16).is_none() {
                let candy = Board::random_simple(rng);
                board.set(row as i16, col as i16, Some(candy));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CandyColor::{Blue, Green, Red, Yellow};
    use crate::types::{CandyColor, CandyKind};

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
    fn collapse_compacts_columns_preserving_order() {
        let mut board = Board::from_colors(quiet_colors());
        let kept_above = board.at(Pos::new(2, 4)).unwrap();
        let kept_top = board.at(Pos::new(0, 4)).unwrap();
        board.put(Pos::new(5, 4), None);
        board.put(Pos::new(8, 4), None);

        collapse(&mut board);

        // Two gaps at the top of column 4, nothing floating below them.
        assert_eq!(board.get(0, 4), None);
        assert_eq!(board.get(1, 4), None);
        for row in 2..10 {
            assert!(board.is_occupied(row, 4));
        }
        // Relative order preserved: the old (0,4) and (2,4) slid down by two.
        assert_eq!(board.at(Pos::new(2, 4)), Some(kept_top));
        assert_eq!(board.at(Pos::new(4, 4)), Some(kept_above));
        // Other columns untouched
        assert!(board.is_occupied(0, 3));
    }

    #[test]
    fn no_column_has_gap_below_occupied_cell_after_collapse() {
        let mut board = Board::from_colors(quiet_colors());
        for &(r, c) in &[(0u8, 0u8), (4, 0), (9, 0), (3, 7), (4, 7), (5, 7)] {
            board.put(Pos::new(r, c), None);
        }

        collapse(&mut board);

        for col in 0..10i16 {
            let mut seen_occupied = false;
            for row in 0..10i16 {
                if board.is_occupied(row, col) {
                    seen_occupied = true;
                } else {
                    assert!(!seen_occupied, "gap below occupied cell in col {col}");
                }
            }
        }
    }

    #[test]
    fn refill_leaves_no_empty_cells() {
        let mut board = Board::from_colors(quiet_colors());
        board.put(Pos::new(0, 0), None);
        board.put(Pos::new(0, 1), None);
        board.put(Pos::new(1, 0), None);

        let mut rng = SimpleRng::new(42);
        refill(&mut board, &mut rng);

        assert_eq!(board.empty_cells(), 0);
        assert_eq!(board.at(Pos::new(0, 0)).unwrap().kind, CandyKind::Simple);
    }

    #[test]
    fn refill_is_deterministic_per_seed() {
        let mut a = Board::from_colors(quiet_colors());
        let mut b = a.clone();
        for board in [&mut a, &mut b] {
            board.put(Pos::new(0, 2), None);
            board.put(Pos::new(0, 3), None);
        }

        refill(&mut a, &mut SimpleRng::new(7));
        refill(&mut b, &mut SimpleRng::new(7));
        assert_eq!(a, b);
    }

    #[test]
    fn simple_triple_scores_fifteen_and_refills() {
        let mut colors = quiet_colors();
        colors[0][0] = Red;
        colors[0][1] = Red;
        colors[0][2] = Red;
        let mut board = Board::from_colors(colors);

        let matches: BTreeSet<Pos> =
            [(0u8, 0u8), (0, 1), (0, 2)].map(|(r, c)| Pos::new(r, c)).into();
        let mut events = Vec::new();
        let mut rng = SimpleRng::new(1);

        let outcome = resolve(&mut board, matches, &mut rng, &mut events);

        assert_eq!(outcome.score_delta % 5, 0);
        assert!(outcome.score_delta >= 15);
        assert!(outcome.passes >= 1);
        assert_eq!(board.empty_cells(), 0);
        assert!(find_matches(&board).is_empty());
        assert_eq!(events.last(), Some(&GameEvent::Stable));
    }

    #[test]
    fn four_match_leaves_row_striped_at_anchor() {
        let mut colors = quiet_colors();
        for c in 3..7 {
            colors[2][c] = Green;
        }
        let mut board = Board::from_colors(colors);
        let matches: BTreeSet<Pos> = (3..7).map(|c| Pos::new(2, c)).collect();

        let mut events = Vec::new();
        let (removed, score) = remove_matches(&mut board, &matches, &mut events);

        // 3 removed + 1 created at the anchor; the anchor candy is not scored
        assert_eq!(removed, 3);
        assert_eq!(score, 15);
        assert_eq!(
            board.at(Pos::new(2, 3)),
            Some(Candy::new(CandyKind::RowStriped, Green))
        );
        for c in 4..7 {
            assert_eq!(board.get(2, c), None);
        }

        // Column 3 had no removals, so the striped candy stays put.
        collapse(&mut board);
        assert_eq!(
            board.at(Pos::new(2, 3)),
            Some(Candy::new(CandyKind::RowStriped, Green))
        );
    }

    #[test]
    fn first_pass_remove_event_matches_scoring() {
        let mut colors = quiet_colors();
        colors[0][0] = Red;
        colors[0][1] = Red;
        colors[0][2] = Red;
        let mut board = Board::from_colors(colors);

        let matches: BTreeSet<Pos> =
            [(0u8, 0u8), (0, 1), (0, 2)].map(|(r, c)| Pos::new(r, c)).into();
        let mut events = Vec::new();
        let mut rng = SimpleRng::new(1);
        resolve(&mut board, matches, &mut rng, &mut events);

        let first_remove = events
            .iter()
            .find_map(|e| match e {
                GameEvent::Remove {
                    positions,
                    score_delta,
                } => Some((positions.clone(), *score_delta)),
                _ => None,
            })
            .unwrap();
        assert_eq!(first_remove.0.len(), 3);
        assert_eq!(first_remove.1, 15);
    }

    #[test]
    fn chained_special_scores_by_kind() {
        let mut colors = quiet_colors();
        colors[9][0] = Red;
        colors[9][1] = Red;
        colors[9][2] = Red;
        let mut board = Board::from_colors(colors);
        // A column-striped candy inside the match footprint chains in.
        board.put(Pos::new(9, 1), Some(Candy::new(CandyKind::ColumnStriped, Red)));

        let matches: BTreeSet<Pos> =
            [(9u8, 0u8), (9, 1), (9, 2)].map(|(r, c)| Pos::new(r, c)).into();
        let mut events = Vec::new();
        let mut rng = SimpleRng::new(3);
        resolve(&mut board, matches, &mut rng, &mut events);

        let (positions, score) = events
            .iter()
            .find_map(|e| match e {
                GameEvent::Remove {
                    positions,
                    score_delta,
                } => Some((positions.clone(), *score_delta)),
                _ => None,
            })
            .unwrap();
        // row triple (2 simples + striped) chains the whole of column 1
        assert_eq!(positions.len(), 3 + 9);
        assert_eq!(score, 11 * 5 + 10);
    }
}
