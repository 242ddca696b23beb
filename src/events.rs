//! Engine -> presentation event surface
//!
//! Each board/session transition pushes one typed event onto the session's
//! queue; the caller drains them synchronously after each operation. The
//! engine never blocks on a consumer and keeps no subscriber list - absent
//! or slow consumers simply see the queue later (or never drain it).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::Pos;

/// A discrete notification emitted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A candy was selected
    Selected { pos: Pos },
    /// The current selection was cleared
    Deselected,
    /// A swap attempt was rejected; the board is unchanged
    InvalidMove,
    /// A match was found (initial swap or cascade re-match)
    Match { positions: BTreeSet<Pos> },
    /// Candies were removed and scored
    Remove {
        positions: BTreeSet<Pos>,
        score_delta: u32,
    },
    /// Columns were compacted downward
    Collapse,
    /// The board settled with no pending matches
    Stable,
    /// Target score reached
    Win,
    /// Move or time budget exhausted
    Lose,
    /// No adjacent swap can produce a match
    NoMoves,
}
