//! Hint and auto-play move finding
//!
//! Built entirely on the swap probe: candidate moves are scored by swapping,
//! scanning, and reverting, so the persisted board is never mutated. Three
//! strategies mirror the difficulty ladder: a random valid move, the first
//! valid move in scan order, and an argmax over a simple match heuristic.

use tracing::debug;

use crate::core::board::Board;
use crate::core::game_state::GameState;
use crate::core::rng::SimpleRng;
use crate::core::swap::probe_swap;
use crate::types::{Move, Pos};

/// AI difficulty, selecting the move strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    /// Uniformly random valid move
    Easy,
    /// First valid move in scan order
    Medium,
    /// Highest-scoring move by the match heuristic
    Hard,
}

/// Find the best move at the given difficulty.
///
/// `rng` is only consulted for random tie-breaking at `Easy` (and as the
/// fallback when no scored move exists); passing the session generator keeps
/// full runs reproducible.
pub fn find_move(board: &mut Board, rng: &mut SimpleRng, difficulty: Difficulty) -> Option<Move> {
    match difficulty {
        Difficulty::Easy => random_valid_move(board, rng),
        Difficulty::Medium => GameState::first_valid_move(board),
        Difficulty::Hard => best_scored_move(board).or_else(|| random_valid_move(board, rng)),
    }
}

/// Hint interface: the strongest strategy
pub fn find_best_move(board: &mut Board, rng: &mut SimpleRng) -> Option<Move> {
    find_move(board, rng, Difficulty::Hard)
}

/// Every adjacent pair whose swap would produce a match
fn valid_moves(board: &mut Board) -> Vec<Move> {
    let mut moves = Vec::new();
    for row in 0..board.rows() {
        for col in 0..board.cols() {
            let pos = Pos::new(row, col);
            if col + 1 < board.cols() {
                let right = Pos::new(row, col + 1);
                if probe_swap(board, pos, right).is_some() {
                    moves.push((pos, right));
                }
            }
            if row + 1 < board.rows() {
                let down = Pos::new(row + 1, col);
                if probe_swap(board, pos, down).is_some() {
                    moves.push((pos, down));
                }
            }
        }
    }
    moves
}

fn random_valid_move(board: &mut Board, rng: &mut SimpleRng) -> Option<Move> {
    let moves = valid_moves(board);
    if moves.is_empty() {
        return None;
    }
    let idx = rng.next_range(moves.len() as u32) as usize;
    Some(moves[idx])
}

/// Heuristic value of one candidate swap: 10 per matched candy, +20 per
/// special candy caught in the match, +50 when the match reaches 4.
fn score_move(board: &mut Board, a: Pos, b: Pos) -> u32 {
    let Some(matches) = probe_swap(board, a, b) else {
        return 0;
    };

    let mut score = matches.len() as u32 * 10;
    for &pos in &matches {
        // Look at the post-swap occupant of each matched cell.
        let actual = if pos == a {
            b
        } else if pos == b {
            a
        } else {
            pos
        };
        if let Some(candy) = board.at(actual) {
            if candy.kind.is_special() {
                score += 20;
            }
        }
    }
    if matches.len() >= 4 {
        score += 50;
    }
    score
}

/// Scan every adjacent pair and keep the strict argmax (first wins ties,
/// matching the deterministic scan order).
fn best_scored_move(board: &mut Board) -> Option<Move> {
    let mut best: Option<(u32, Move)> = None;
    for row in 0..board.rows() {
        for col in 0..board.cols() {
            let pos = Pos::new(row, col);
            let mut consider = |board: &mut Board, other: Pos| {
                let score = score_move(board, pos, other);
                if score > 0 && best.as_ref().map_or(true, |(s, _)| score > *s) {
                    best = Some((score, (pos, other)));
                }
            };
            if col + 1 < board.cols() {
                consider(board, Pos::new(row, col + 1));
            }
            if row + 1 < board.rows() {
                consider(board, Pos::new(row + 1, col));
            }
        }
    }

    if let Some((score, mv)) = best {
        debug!(?mv, score, "best scored move");
        return Some(mv);
    }
    None
}
