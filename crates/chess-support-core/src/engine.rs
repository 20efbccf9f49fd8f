//! Rules engine trait

use std::collections::BTreeMap;

use crate::error::Result;
use crate::side::Side;

/// Chess rules consumed by the game session.
///
/// Implement this trait to back the session with a concrete move generator.
/// Every method is a synchronous computation over a position; the only one
/// allowed to mutate is [`apply_move`](RulesEngine::apply_move).
pub trait RulesEngine: Send + Sync + 'static {
    /// Full position state (board, side to move, rights, clocks)
    type Position: Clone + Send + Sync;
    /// A parsed move descriptor
    type Move: Clone + Send + Sync;

    /// Standard starting position
    fn initial_position(&self) -> Self::Position;

    /// Parse a compact move descriptor such as "e2e4" or "e7e8q".
    /// The error is a human-readable diagnostic.
    fn parse_move(&self, descriptor: &str) -> std::result::Result<Self::Move, String>;

    /// Whether the move is in the legal move set of `pos`
    fn is_legal(&self, pos: &Self::Position, mv: &Self::Move) -> bool;

    /// SAN for a legal move, rendered against the position it is played from
    fn render_san(&self, pos: &Self::Position, mv: &Self::Move) -> Result<String>;

    /// Play a legal move on `pos`
    fn apply_move(&self, pos: &mut Self::Position, mv: &Self::Move) -> Result<()>;

    /// Serialize to FEN
    fn fen(&self, pos: &Self::Position) -> String;

    fn side_to_move(&self, pos: &Self::Position) -> Side;

    fn fullmove_number(&self, pos: &Self::Position) -> u32;

    fn halfmove_clock(&self, pos: &Self::Position) -> u32;

    /// Half-moves played to reach `pos` from the starting position
    fn ply_count(&self, pos: &Self::Position) -> usize {
        let full = self.fullmove_number(pos).saturating_sub(1) as usize;
        full * 2 + usize::from(self.side_to_move(pos) == Side::Black)
    }

    /// Occupied squares, square name to piece symbol
    fn pieces(&self, pos: &Self::Position) -> BTreeMap<String, String>;

    fn is_check(&self, pos: &Self::Position) -> bool;

    fn is_game_over(&self, pos: &Self::Position) -> bool;

    /// Game result string. Only meaningful when `is_game_over` holds.
    fn result(&self, pos: &Self::Position) -> Result<String>;

    /// Multi-line text board from white's point of view
    fn render_board(&self, pos: &Self::Position) -> String;
}
