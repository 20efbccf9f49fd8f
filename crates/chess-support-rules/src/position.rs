//! Position with repetition tracking

use shakmaty::fen::Fen;
use shakmaty::{Chess, EnPassantMode, Move, Position};
use std::collections::HashMap;

/// A shakmaty position plus the repetition counts needed for the
/// fivefold and threefold repetition rules.
#[derive(Debug, Clone)]
pub struct TrackedPosition {
    chess: Chess,
    repetitions: HashMap<String, u32>,
}

impl Default for TrackedPosition {
    fn default() -> Self {
        let chess = Chess::default();
        let mut repetitions = HashMap::new();
        repetitions.insert(repetition_key(&chess), 1);
        Self { chess, repetitions }
    }
}

impl TrackedPosition {
    pub fn chess(&self) -> &Chess {
        &self.chess
    }

    /// Play an already validated move and count the resulting position.
    pub(crate) fn play_unchecked(&mut self, mv: &Move) {
        self.chess.play_unchecked(mv);
        *self
            .repetitions
            .entry(repetition_key(&self.chess))
            .or_insert(0) += 1;
    }

    /// How many times the current position has occurred
    pub fn repetition_count(&self) -> u32 {
        self.repetitions
            .get(&repetition_key(&self.chess))
            .copied()
            .unwrap_or(0)
    }

    pub fn fen(&self) -> String {
        Fen::from_position(self.chess.clone(), EnPassantMode::Legal).to_string()
    }
}

/// Placement, turn, castling and en passant fields; clocks excluded.
fn repetition_key(chess: &Chess) -> String {
    let fen = Fen::from_position(chess.clone(), EnPassantMode::Legal).to_string();
    fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
}
