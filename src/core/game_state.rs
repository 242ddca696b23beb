//! Game state module - session lifecycle around the board
//!
//! Ties together the board, match detection, swap validation, and cascade
//! resolution, and owns everything session-scoped: score, move/time budget,
//! the single selected position, the seeded RNG, and the pending event
//! queue. The engine assumes serialized calls; one swap is resolved to its
//! settled state before the next is accepted.

use std::collections::BTreeSet;

use tracing::info;

use crate::core::board::Board;
use crate::core::cascade::{resolve, CascadeOutcome};
use crate::core::matching::find_matches;
use crate::core::rng::SimpleRng;
use crate::core::swap::{probe_swap, try_swap};
use crate::events::GameEvent;
use crate::types::{
    GameMode, Move, Pos, DEFAULT_MOVES, DEFAULT_TARGET_SCORE, DEFAULT_TIME_SECS,
};

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    rng: SimpleRng,
    mode: GameMode,
    score: u32,
    target_score: u32,
    moves_left: u32,
    time_left_secs: u32,
    selected: Option<Pos>,
    game_over: bool,
    game_won: bool,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new classic-mode session with the given RNG seed.
    ///
    /// The board is regenerated until it is settled, so a fresh session never
    /// starts with pending matches and is fully determined by the seed.
    pub fn new(seed: u32) -> Self {
        Self::with_mode(seed, GameMode::Classic)
    }

    /// Create a new session in the given mode
    pub fn with_mode(seed: u32, mode: GameMode) -> Self {
        let mut rng = SimpleRng::new(seed);
        let mut board = Board::random(&mut rng);
        while !find_matches(&board).is_empty() {
            board = Board::random(&mut rng);
        }

        Self {
            board,
            rng,
            mode,
            score: 0,
            target_score: DEFAULT_TARGET_SCORE,
            moves_left: DEFAULT_MOVES,
            time_left_secs: DEFAULT_TIME_SECS,
            selected: None,
            game_over: false,
            game_won: false,
            events: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn set_target_score(&mut self, target: u32) {
        self.target_score = target;
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    pub fn set_moves_left(&mut self, moves: u32) {
        self.moves_left = moves;
    }

    pub fn time_left_secs(&self) -> u32 {
        self.time_left_secs
    }

    pub fn set_time_left_secs(&mut self, secs: u32) {
        self.time_left_secs = secs;
    }

    pub fn selected(&self) -> Option<Pos> {
        self.selected
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn game_won(&self) -> bool {
        self.game_won
    }

    /// Drain the pending event queue in emission order
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Handle a click on (row, col).
    ///
    /// Selection protocol: nothing selected - select; same candy - deselect;
    /// adjacent candy - attempt the swap; any other candy - move the
    /// selection. Returns true when the click changed anything. Once the
    /// session is over every call is a no-op.
    pub fn select(&mut self, row: i16, col: i16) -> bool {
        if self.game_over || !self.board.is_valid(row, col) {
            return false;
        }
        let pos = Pos::new(row as u8, col as u8);

        match self.selected {
            None => {
                self.selected = Some(pos);
                self.events.push(GameEvent::Selected { pos });
                true
            }
            Some(prev) if prev == pos => {
                self.selected = None;
                self.events.push(GameEvent::Deselected);
                true
            }
            Some(prev) if prev.is_adjacent(pos) => self.attempt_swap(prev, pos),
            Some(_) => {
                self.selected = Some(pos);
                self.events.push(GameEvent::Selected { pos });
                true
            }
        }
    }

    /// Validate and resolve a swap between two positions. The selection is
    /// cleared either way; a failed swap costs nothing.
    fn attempt_swap(&mut self, a: Pos, b: Pos) -> bool {
        self.selected = None;

        let matches = match try_swap(&mut self.board, a, b) {
            Ok(matches) => matches,
            Err(_) => {
                self.events.push(GameEvent::InvalidMove);
                return false;
            }
        };

        if self.mode.is_move_limited() {
            self.moves_left = self.moves_left.saturating_sub(1);
        }

        let outcome = self.resolve_cascade(matches);
        info!(
            score = self.score,
            delta = outcome.score_delta,
            passes = outcome.passes,
            "move resolved"
        );

        self.check_game_state();
        true
    }

    /// Drive the cascade to completion and bank its score
    fn resolve_cascade(&mut self, matches: BTreeSet<Pos>) -> CascadeOutcome {
        let outcome = resolve(&mut self.board, matches, &mut self.rng, &mut self.events);
        self.score += outcome.score_delta;
        outcome
    }

    /// Advance the session clock (timed mode only). The caller decides the
    /// cadence; the engine holds no timer of its own.
    pub fn tick_time(&mut self, elapsed_secs: u32) {
        if self.game_over || self.mode != GameMode::Timed {
            return;
        }
        self.time_left_secs = self.time_left_secs.saturating_sub(elapsed_secs);
        if self.time_left_secs == 0 {
            if self.score >= self.target_score {
                self.finish_won();
            } else {
                self.finish_lost(GameEvent::Lose);
            }
        }
    }

    /// Win/lose evaluation after every settled transition
    fn check_game_state(&mut self) {
        if self.score >= self.target_score {
            self.finish_won();
            return;
        }

        if self.mode.is_move_limited() && self.moves_left == 0 {
            self.finish_lost(GameEvent::Lose);
            return;
        }

        if !self.has_valid_moves() {
            self.finish_lost(GameEvent::NoMoves);
        }
    }

    fn finish_won(&mut self) {
        self.game_won = true;
        self.game_over = true;
        self.selected = None;
        self.events.push(GameEvent::Win);
        info!(score = self.score, "session won");
    }

    fn finish_lost(&mut self, event: GameEvent) {
        self.game_over = true;
        self.selected = None;
        self.events.push(event);
        info!(score = self.score, "session lost");
    }

    /// Exhaustively probe every horizontally/vertically adjacent pair; true
    /// as soon as one swap would match. Strict revert: the board is unchanged
    /// no matter the outcome.
    pub fn has_valid_moves(&mut self) -> bool {
        Self::first_valid_move(&mut self.board).is_some()
    }

    /// First adjacent pair (scan order, right then down) whose swap matches
    pub fn first_valid_move(board: &mut Board) -> Option<Move> {
        for row in 0..board.rows() {
            for col in 0..board.cols() {
                let pos = Pos::new(row, col);
                if col + 1 < board.cols() {
                    let right = Pos::new(row, col + 1);
                    if probe_swap(board, pos, right).is_some() {
                        return Some((pos, right));
                    }
                }
                if row + 1 < board.rows() {
                    let down = Pos::new(row + 1, col);
                    if probe_swap(board, pos, down).is_some() {
                        return Some((pos, down));
                    }
                }
            }
        }
        None
    }

    /// Replace the board and score wholesale (save restore). Selection and
    /// terminal flags reset; budgets are left as configured.
    pub fn restore(&mut self, board: Board, score: u32) {
        self.board = board;
        self.score = score;
        self.selected = None;
        self.game_over = false;
        self.game_won = false;
        self.events.clear();
    }

    /// Borrow the board and RNG independently (AI probes need both halves).
    pub fn board_and_rng_mut(&mut self) -> (&mut Board, &mut SimpleRng) {
        (&mut self.board, &mut self.rng)
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}
