//! Core module - pure game logic with no external I/O
//!
//! Everything here operates on in-memory boards and sessions: match
//! detection, swap validation, special candy policy, cascades, and the
//! session state machine.

pub mod board;
pub mod cascade;
pub mod game_state;
pub mod matching;
pub mod rng;
pub mod special;
pub mod swap;

// Re-export commonly used types
pub use board::Board;
pub use cascade::{resolve, CascadeOutcome};
pub use game_state::GameState;
pub use matching::find_matches;
pub use rng::SimpleRng;
pub use swap::{probe_swap, try_swap};
