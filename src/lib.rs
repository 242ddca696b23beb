//! Candy Crunch - a match-3 grid engine.
//!
//! The crate is split into a pure core (board, match detection, swaps,
//! special candies, cascades, session state machine) and thin surfaces
//! around it: a typed event stream, a text save format, and a move-finding
//! AI used for hints and autoplay.

pub mod ai;
pub mod core;
pub mod error;
pub mod events;
pub mod save;
pub mod types;

pub use crate::core::{Board, GameState, SimpleRng};
pub use events::GameEvent;
pub use types::{Candy, CandyColor, CandyKind, GameMode, Move, Pos};
