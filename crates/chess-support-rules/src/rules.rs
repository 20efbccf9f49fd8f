//! `RulesEngine` implementation over shakmaty

use chess_support_core::{ChessError, Result, RulesEngine, Side};
use shakmaty::san::SanPlus;
use shakmaty::uci::UciMove;
use shakmaty::{Color, Move, Position};
use std::collections::BTreeMap;
use tracing::debug;

use crate::board::{piece_map, render_ascii};
use crate::position::TrackedPosition;

/// Half-move clock at which the seventy-five-move rule ends the game
const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;
/// Half-move clock at which a fifty-move draw becomes claimable
const FIFTY_MOVE_PLIES: u32 = 100;

/// Standard chess rules backed by shakmaty
#[derive(Debug, Clone, Copy, Default)]
pub struct ShakmatyRules;

impl ShakmatyRules {
    pub fn new() -> Self {
        Self
    }

    fn to_legal_move(&self, pos: &TrackedPosition, mv: &UciMove) -> Result<Move> {
        mv.to_move(pos.chess())
            .map_err(|e| ChessError::EngineFault(format!("{} is not legal here: {}", mv, e)))
    }

    fn is_seventy_five_moves(&self, pos: &TrackedPosition) -> bool {
        pos.chess().halfmoves() >= SEVENTY_FIVE_MOVE_PLIES && !pos.chess().is_checkmate()
    }

    fn is_fivefold_repetition(&self, pos: &TrackedPosition) -> bool {
        pos.repetition_count() >= 5
    }
}

fn side_of(color: Color) -> Side {
    match color {
        Color::White => Side::White,
        Color::Black => Side::Black,
    }
}

impl RulesEngine for ShakmatyRules {
    type Position = TrackedPosition;
    type Move = UciMove;

    fn initial_position(&self) -> TrackedPosition {
        TrackedPosition::default()
    }

    fn parse_move(&self, descriptor: &str) -> std::result::Result<UciMove, String> {
        let mv = descriptor
            .parse::<UciMove>()
            .map_err(|e| format!("{} ('{}')", e, descriptor))?;

        // Promotion letters are lowercase in UCI
        if descriptor.len() == 5 && !descriptor.ends_with(|c: char| c.is_ascii_lowercase()) {
            return Err(format!(
                "promotion piece must be lowercase ('{}')",
                descriptor
            ));
        }
        if let UciMove::Normal { from, to, .. } = mv {
            if from == to {
                return Err(format!(
                    "source and destination are both {} ('{}')",
                    from, descriptor
                ));
            }
        }
        Ok(mv)
    }

    fn is_legal(&self, pos: &TrackedPosition, mv: &UciMove) -> bool {
        mv.to_move(pos.chess()).is_ok()
    }

    fn render_san(&self, pos: &TrackedPosition, mv: &UciMove) -> Result<String> {
        let legal = self.to_legal_move(pos, mv)?;
        Ok(SanPlus::from_move(pos.chess().clone(), &legal).to_string())
    }

    fn apply_move(&self, pos: &mut TrackedPosition, mv: &UciMove) -> Result<()> {
        let legal = self.to_legal_move(pos, mv)?;
        pos.play_unchecked(&legal);
        debug!("Applied {}, now {}", mv, pos.fen());
        Ok(())
    }

    fn fen(&self, pos: &TrackedPosition) -> String {
        pos.fen()
    }

    fn side_to_move(&self, pos: &TrackedPosition) -> Side {
        side_of(pos.chess().turn())
    }

    fn fullmove_number(&self, pos: &TrackedPosition) -> u32 {
        pos.chess().fullmoves().get()
    }

    fn halfmove_clock(&self, pos: &TrackedPosition) -> u32 {
        pos.chess().halfmoves()
    }

    fn pieces(&self, pos: &TrackedPosition) -> BTreeMap<String, String> {
        piece_map(pos.chess().board())
    }

    fn is_check(&self, pos: &TrackedPosition) -> bool {
        pos.chess().is_check()
    }

    fn is_game_over(&self, pos: &TrackedPosition) -> bool {
        pos.chess().is_game_over()
            || self.is_seventy_five_moves(pos)
            || self.is_fivefold_repetition(pos)
    }

    fn result(&self, pos: &TrackedPosition) -> Result<String> {
        let chess = pos.chess();
        if chess.is_checkmate() {
            let result = match side_of(chess.turn()) {
                Side::White => "0-1",
                Side::Black => "1-0",
            };
            return Ok(result.to_string());
        }
        let claimable = pos.repetition_count() >= 3 || chess.halfmoves() >= FIFTY_MOVE_PLIES;
        if self.is_game_over(pos) || claimable {
            return Ok("1/2-1/2".to_string());
        }
        Ok("*".to_string())
    }

    fn render_board(&self, pos: &TrackedPosition) -> String {
        render_ascii(pos.chess().board())
    }
}
