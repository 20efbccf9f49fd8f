//! The single game session: position, move history and derived views

use chess_support_core::{
    ChessError, FEN_CASTLING_FIELD, FEN_EN_PASSANT_FIELD, LegalityCheck, MoveOutcome, MoveRecord,
    Result, RulesEngine, Side, Status, fen_field,
};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

/// One live chess game.
///
/// Owns the position and the append-only history. After every operation,
/// including rejected moves, `history.len()` equals the number of half-moves
/// the position has seen since the last reset.
pub struct GameSession<E: RulesEngine> {
    engine: E,
    position: E::Position,
    history: Vec<MoveRecord>,
}

impl<E: RulesEngine> GameSession<E> {
    /// Start a session in the initial position
    pub fn new(engine: E) -> Self {
        let position = engine.initial_position();
        Self {
            engine,
            position,
            history: Vec::new(),
        }
    }

    /// Back to the initial position with an empty history
    pub fn reset(&mut self) {
        self.position = self.engine.initial_position();
        self.history.clear();
        info!("Game reset");
        self.debug_check_invariant();
    }

    /// Try to play `descriptor` for the side to move.
    ///
    /// Unparsable and illegal moves come back as [`MoveOutcome::Rejected`]
    /// with the session untouched. `Err` means the engine broke its contract.
    pub fn attempt_move(&mut self, descriptor: &str) -> Result<MoveOutcome> {
        let mv = match self.engine.parse_move(descriptor) {
            Ok(mv) => mv,
            Err(diagnostic) => {
                debug!("Rejected {:?}: {}", descriptor, diagnostic);
                return Ok(MoveOutcome::parse_error(diagnostic));
            }
        };

        if !self.engine.is_legal(&self.position, &mv) {
            let expected = self.engine.side_to_move(&self.position);
            debug!("Rejected {:?}: illegal, {} to move", descriptor, expected);
            return Ok(MoveOutcome::illegal(expected));
        }

        // SAN depends on the position the move is played from
        let san = self.engine.render_san(&self.position, &mv)?;

        let mut next = self.position.clone();
        self.engine.apply_move(&mut next, &mv)?;
        self.position = next;

        let ply = self.history.len() + 1;
        info!("Ply {}: {} ({}) by {}", ply, descriptor, san, Side::from_ply(ply));
        self.history.push(MoveRecord::new(ply, descriptor, Some(san)));
        self.debug_check_invariant();

        Ok(MoveOutcome::Accepted)
    }

    /// Whether `descriptor` could be played now. Never mutates.
    pub fn is_legal(&self, descriptor: &str) -> LegalityCheck {
        match self.engine.parse_move(descriptor) {
            Ok(mv) => LegalityCheck::legal(self.engine.is_legal(&self.position, &mv)),
            Err(diagnostic) => LegalityCheck::unparsable(diagnostic),
        }
    }

    /// All move descriptors, oldest first
    pub fn all_moves(&self) -> Vec<String> {
        self.history.iter().map(|r| r.uci.clone()).collect()
    }

    /// All move records, oldest first
    pub fn all_moves_detailed(&self) -> Vec<MoveRecord> {
        self.history.clone()
    }

    /// Last `n` descriptors; empty when `n <= 0`
    pub fn last_n(&self, n: i64) -> Vec<String> {
        self.tail(n).iter().map(|r| r.uci.clone()).collect()
    }

    /// Last `n` records; empty when `n <= 0`
    pub fn last_n_detailed(&self, n: i64) -> Vec<MoveRecord> {
        self.tail(n).to_vec()
    }

    fn tail(&self, n: i64) -> &[MoveRecord] {
        if n <= 0 {
            return &[];
        }
        let n = usize::try_from(n).unwrap_or(usize::MAX);
        let start = self.history.len().saturating_sub(n);
        &self.history[start..]
    }

    /// Number of half-moves played since the last reset
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Snapshot of the current position and the last move
    pub fn status(&self) -> Result<Status> {
        let engine = &self.engine;
        let pos = &self.position;

        let fen = engine.fen(pos);
        let last = self.history.last();
        let is_game_over = engine.is_game_over(pos);
        let result = if is_game_over {
            Some(engine.result(pos)?)
        } else {
            None
        };

        Ok(Status {
            castling_rights: fen_field(&fen, FEN_CASTLING_FIELD),
            en_passant_square: fen_field(&fen, FEN_EN_PASSANT_FIELD),
            fen,
            side_to_move: engine.side_to_move(pos),
            fullmove_number: engine.fullmove_number(pos),
            halfmove_clock: engine.halfmove_clock(pos),
            ply_count: self.history.len(),
            last_move_uci: last.map(|r| r.uci.clone()),
            last_move_san: last.and_then(|r| r.san.clone()),
            who_moved_last: last.map(|r| Side::from_ply(r.ply)),
            is_check: engine.is_check(pos),
            is_game_over,
            result,
            pieces: engine.pieces(pos),
        })
    }

    /// Text diagram of the board from white's side
    pub fn board_ascii(&self) -> String {
        self.engine.render_board(&self.position)
    }

    /// SHA-256 over the FEN and the move history, hex encoded
    pub fn state_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.engine.fen(&self.position).as_bytes());
        for record in &self.history {
            hasher.update(b"\n");
            hasher.update(record.uci.as_bytes());
        }
        hex::encode(hasher.finalize())
    }

    /// Verify that history and position agree on the ply count
    pub fn check_invariant(&self) -> Result<()> {
        let derived = self.engine.ply_count(&self.position);
        if derived != self.history.len() {
            return Err(ChessError::EngineFault(format!(
                "history has {} plies but position reports {}",
                self.history.len(),
                derived
            )));
        }
        Ok(())
    }

    fn debug_check_invariant(&self) {
        debug_assert!(
            self.check_invariant().is_ok(),
            "session history out of sync with position"
        );
    }
}
