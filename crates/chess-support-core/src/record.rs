//! Move history entries

use serde::{Deserialize, Serialize};

use crate::side::Side;

/// One accepted move, appended to the session history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 1-based half-move index
    pub ply: usize,
    /// Move descriptor exactly as the caller sent it
    pub uci: String,
    /// SAN rendered against the position the move was played from
    pub san: Option<String>,
    /// Mover, derived from `ply`
    pub side: Side,
}

impl MoveRecord {
    pub fn new(ply: usize, uci: impl Into<String>, san: Option<String>) -> Self {
        Self {
            ply,
            uci: uci.into(),
            san,
            side: Side::from_ply(ply),
        }
    }
}
