//! Tool result payloads shared by the server and the client

use serde::{Deserialize, Serialize};

use crate::outcome::RejectionReason;
use crate::record::MoveRecord;
use crate::side::Side;
use crate::status::Status;

/// Result of create_or_reset_game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetReply {
    pub ok: bool,
    pub status: Status,
    pub moves: Vec<String>,
    pub moves_detailed: Vec<MoveRecord>,
}

/// Result of add_move.
///
/// Accepted moves carry `moves`/`moves_detailed`; rejections carry `reason`
/// plus either `expected_turn` (illegal) or `parse_error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddMoveReply {
    pub accepted: bool,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reason: Option<RejectionReason>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub expected_turn: Option<Side>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub parse_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub moves: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub moves_detailed: Option<Vec<MoveRecord>>,
}
