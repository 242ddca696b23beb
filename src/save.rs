//! Text save format
//!
//! Line 1 is the decimal score; each of the next 10 lines holds 10
//! comma-separated 3-character tokens, a 2-character kind code (`SC`, `LR`,
//! `LC`, `RC`) followed by a 1-character color code (`R`, `G`, `B`, `Y`).
//! Loading parses the whole file before anything is committed, so a
//! malformed file never leaves a half-restored session behind.

use crate::core::board::Board;
use crate::core::game_state::GameState;
use crate::error::SaveError;
use crate::types::{Candy, CandyColor, CandyKind, BOARD_COLS, BOARD_ROWS};

/// A fully parsed save file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedGame {
    pub score: u32,
    pub board: Board,
}

/// Serialize score and grid. Inverse of [`load_from_str`] for any settled
/// board: `save(load(text)) == text`. The format has no token for an empty
/// cell, so a mid-cascade board is rejected rather than written.
pub fn save_to_string(score: u32, board: &Board) -> Result<String, SaveError> {
    let mut out = String::new();
    out.push_str(&score.to_string());
    out.push('\n');

    for (row_idx, row) in board.to_rows().iter().enumerate() {
        let mut tokens = Vec::with_capacity(row.len());
        for (col_idx, cell) in row.iter().enumerate() {
            let candy = cell.ok_or(SaveError::EmptyCell {
                row: row_idx,
                col: col_idx,
            })?;
            tokens.push(format!("{}{}", candy.kind.code(), candy.color.code()));
        }
        out.push_str(&tokens.join(","));
        out.push('\n');
    }

    Ok(out)
}

/// Convenience wrapper serializing a session's persisted state
pub fn save_session(state: &GameState) -> Result<String, SaveError> {
    save_to_string(state.score(), state.board())
}

/// Parse a save file. Any structural problem (wrong row/column count,
/// unrecognized token, bad score line) fails the whole load.
pub fn load_from_str(text: &str) -> Result<SavedGame, SaveError> {
    let mut lines = text.lines();

    let score_line = lines.next().ok_or(SaveError::MissingScore)?;
    let score: u32 = score_line
        .trim()
        .parse()
        .map_err(|_| SaveError::InvalidScore(score_line.to_string()))?;

    let mut rows: Vec<Vec<Option<Candy>>> = Vec::with_capacity(BOARD_ROWS as usize);
    for (row_idx, line) in lines.by_ref().take(BOARD_ROWS as usize).enumerate() {
        let tokens: Vec<&str> = line.split(',').collect();
        if tokens.len() != BOARD_COLS as usize {
            return Err(SaveError::WrongColumnCount {
                row: row_idx,
                expected: BOARD_COLS as usize,
                found: tokens.len(),
            });
        }

        let mut row = Vec::with_capacity(BOARD_COLS as usize);
        for (col_idx, token) in tokens.iter().enumerate() {
            row.push(Some(parse_token(token.trim()).ok_or_else(|| {
                SaveError::BadToken {
                    row: row_idx,
                    col: col_idx,
                    token: token.to_string(),
                }
            })?));
        }
        rows.push(row);
    }

    let extra = lines.filter(|l| !l.trim().is_empty()).count();
    if rows.len() != BOARD_ROWS as usize || extra != 0 {
        return Err(SaveError::WrongRowCount {
            expected: BOARD_ROWS as usize,
            found: rows.len() + extra,
        });
    }

    Ok(SavedGame {
        score,
        board: Board::from_rows(rows),
    })
}

/// Parse one `<kind><color>` token such as `SCR` or `RCB`
fn parse_token(token: &str) -> Option<Candy> {
    if token.len() != 3 {
        return None;
    }
    let kind = CandyKind::from_code(&token[0..2])?;
    let color = CandyColor::from_code(&token[2..3])?;
    Some(Candy::new(kind, color))
}
