//! # chess-support-core
//!
//! Core types and traits for the chess support MCP server.
//!
//! This crate provides the types shared by the session, the rules engine
//! adapter and the client:
//! - `RulesEngine` trait for plugging in a move generator
//! - Move records, status snapshots and move outcomes
//! - Tool reply payloads
//! - Error types and JSON-RPC error codes

pub mod engine;
pub mod error;
pub mod outcome;
pub mod record;
pub mod reply;
pub mod side;
pub mod status;

pub use engine::RulesEngine;
pub use error::{ChessError, Result, error_codes};
pub use outcome::{LegalityCheck, MoveOutcome, RejectionReason};
pub use record::MoveRecord;
pub use reply::{AddMoveReply, ResetReply};
pub use side::Side;
pub use status::{FEN_CASTLING_FIELD, FEN_EN_PASSANT_FIELD, Status, fen_field};
