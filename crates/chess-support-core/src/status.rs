//! Position status snapshot

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::side::Side;

/// Structured snapshot of the current game.
///
/// Optional fields serialize as `null` so the object always has the same keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// Forsyth-Edwards Notation of the current position
    pub fen: String,
    pub side_to_move: Side,
    pub fullmove_number: u32,
    pub halfmove_clock: u32,
    /// Number of half-moves played since the last reset
    pub ply_count: usize,
    /// FEN castling field, e.g. "KQkq" or "-"
    pub castling_rights: Option<String>,
    /// FEN en passant field, e.g. "e3" or "-"
    pub en_passant_square: Option<String>,
    pub last_move_uci: Option<String>,
    pub last_move_san: Option<String>,
    pub who_moved_last: Option<Side>,
    pub is_check: bool,
    pub is_game_over: bool,
    /// "1-0", "0-1" or "1/2-1/2"; only set once the game is over
    pub result: Option<String>,
    /// Occupied square name to piece symbol, e.g. "e1" -> "K"
    pub pieces: BTreeMap<String, String>,
}

/// FEN field index of the castling rights (0-based)
pub const FEN_CASTLING_FIELD: usize = 2;
/// FEN field index of the en passant target (0-based)
pub const FEN_EN_PASSANT_FIELD: usize = 3;

/// Whitespace-delimited FEN field, `None` when the string is too short.
pub fn fen_field(fen: &str, index: usize) -> Option<String> {
    fen.split_whitespace().nth(index).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn test_fen_fields() {
        assert_eq!(fen_field(START, FEN_CASTLING_FIELD).as_deref(), Some("KQkq"));
        assert_eq!(fen_field(START, FEN_EN_PASSANT_FIELD).as_deref(), Some("-"));
    }

    #[test]
    fn test_short_fen_degrades_to_none() {
        let short = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w";
        assert_eq!(fen_field(short, FEN_CASTLING_FIELD), None);
        assert_eq!(fen_field(short, FEN_EN_PASSANT_FIELD), None);
        assert_eq!(fen_field("", 0), None);
    }
}
