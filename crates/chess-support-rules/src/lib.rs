//! Rules engine for the chess support server
//!
//! Implements `RulesEngine` on top of shakmaty: UCI parsing, legality,
//! SAN rendering, FEN serialization and terminal detection including the
//! seventy-five-move and fivefold repetition rules.

pub mod board;
pub mod position;
pub mod rules;

pub use position::TrackedPosition;
pub use rules::ShakmatyRules;
