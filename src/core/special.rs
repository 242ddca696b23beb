//! Special candies - creation policy and activation footprints
//!
//! A match of 4 colinear candies produces a striped candy along the match
//! axis, a non-colinear 4-match falls back to RowStriped (the historical
//! policy; the axis choice is preserved as-is, not re-derived), and a match
//! of 5 or more produces a Wrapped candy. The new special overwrites the
//! anchor cell, which is the first matched position in row-major scan order.
//!
//! Activation expands a special candy into its removal footprint; footprints
//! that touch other specials trigger them in the same pass through an
//! explicit worklist with a visited set, so each special activates exactly
//! once and the chain always terminates.

use std::collections::BTreeSet;

use crate::core::board::Board;
use crate::types::{Candy, CandyKind, Pos};

/// The special candy a match produces, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialSpawn {
    pub kind: CandyKind,
    pub candy: Candy,
    pub anchor: Pos,
}

/// Decide whether a match creates a special candy.
///
/// Policy, in order: 3 candies - nothing; 4 in one row - RowStriped; 4 in one
/// column - ColumnStriped; 4 non-colinear - RowStriped; 5 or more - Wrapped.
/// The spawn inherits the match color and anchors at the first position in
/// scan order.
pub fn decide(board: &Board, matches: &BTreeSet<Pos>) -> Option<SpecialSpawn> {
    if matches.len() < 4 {
        return None;
    }

    let anchor = *matches.first()?;
    let color = board.at(anchor)?.color;

    let kind = if matches.len() >= 5 {
        CandyKind::Wrapped
    } else {
        let same_row = matches.iter().all(|p| p.row == anchor.row);
        let same_col = matches.iter().all(|p| p.col == anchor.col);
        if same_col && !same_row {
            CandyKind::ColumnStriped
        } else {
            // Row-colinear, and also the non-colinear fallback.
            CandyKind::RowStriped
        }
    };

    Some(SpecialSpawn {
        kind,
        candy: Candy::new(kind, color),
        anchor,
    })
}

/// The occupied positions a single special candy clears when activated.
pub fn activation_footprint(board: &Board, pos: Pos, kind: CandyKind) -> BTreeSet<Pos> {
    let mut affected = BTreeSet::new();

    match kind {
        CandyKind::Simple => {}
        CandyKind::RowStriped => {
            for col in 0..board.cols() {
                if board.is_occupied(pos.row as i16, col as i16) {
                    affected.insert(Pos::new(pos.row, col));
                }
            }
        }
        CandyKind::ColumnStriped => {
            for row in 0..board.rows() {
                if board.is_occupied(row as i16, pos.col as i16) {
                    affected.insert(Pos::new(row, pos.col));
                }
            }
        }
        CandyKind::Wrapped => {
            for dr in -1..=1i16 {
                for dc in -1..=1i16 {
                    let row = pos.row as i16 + dr;
                    let col = pos.col as i16 + dc;
                    if board.is_occupied(row, col) {
                        affected.insert(Pos::new(row as u8, col as u8));
                    }
                }
            }
        }
    }

    affected
}

/// Expand a match set with every chained special-candy activation.
///
/// Any special candy inside the growing removal set is activated exactly once
/// (visited set keyed by position); its footprint joins the set and may pull
/// further specials into the chain.
pub fn expand_with_chains(board: &Board, matches: &BTreeSet<Pos>) -> BTreeSet<Pos> {
    let mut removal: BTreeSet<Pos> = matches.clone();
    let mut visited: BTreeSet<Pos> = BTreeSet::new();
    let mut queue: Vec<Pos> = matches.iter().copied().collect();

    while let Some(pos) = queue.pop() {
        let Some(candy) = board.at(pos) else {
            continue;
        };
        if !candy.kind.is_special() || !visited.insert(pos) {
            continue;
        }

        // Every position entering the removal set has been queued exactly
        // once, so pending specials are never skipped.
        for hit in activation_footprint(board, pos, candy.kind) {
            if removal.insert(hit) {
                queue.push(hit);
            }
        }
    }

    removal
}
