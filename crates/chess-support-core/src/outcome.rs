//! Results of move attempts and legality queries

use serde::{Deserialize, Serialize};

use crate::side::Side;

/// Why a move was not played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// Descriptor is not a well-formed move
    ParseError,
    /// Well-formed, but not legal in the current position
    Illegal,
}

/// Outcome of a move attempt on the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Accepted,
    Rejected {
        reason: RejectionReason,
        /// Parser diagnostic, set for `ParseError`
        parse_error: Option<String>,
        /// Side to move, set for `Illegal`
        expected_turn: Option<Side>,
    },
}

impl MoveOutcome {
    pub fn parse_error(diagnostic: impl Into<String>) -> Self {
        MoveOutcome::Rejected {
            reason: RejectionReason::ParseError,
            parse_error: Some(diagnostic.into()),
            expected_turn: None,
        }
    }

    pub fn illegal(expected_turn: Side) -> Self {
        MoveOutcome::Rejected {
            reason: RejectionReason::Illegal,
            parse_error: None,
            expected_turn: Some(expected_turn),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveOutcome::Accepted)
    }
}

/// Answer to a legality query: `{legal}` or `{parse_error, legal:false}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalityCheck {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub parse_error: Option<String>,
    pub legal: bool,
}

impl LegalityCheck {
    pub fn legal(legal: bool) -> Self {
        Self {
            parse_error: None,
            legal,
        }
    }

    pub fn unparsable(diagnostic: impl Into<String>) -> Self {
        Self {
            parse_error: Some(diagnostic.into()),
            legal: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legality_shapes() {
        let ok = serde_json::to_value(LegalityCheck::legal(true)).unwrap();
        assert_eq!(ok, serde_json::json!({ "legal": true }));

        let bad = serde_json::to_value(LegalityCheck::unparsable("invalid uci")).unwrap();
        assert_eq!(
            bad,
            serde_json::json!({ "parse_error": "invalid uci", "legal": false })
        );
    }

    #[test]
    fn test_rejection_constructors() {
        match MoveOutcome::illegal(Side::Black) {
            MoveOutcome::Rejected {
                reason,
                parse_error,
                expected_turn,
            } => {
                assert_eq!(reason, RejectionReason::Illegal);
                assert_eq!(parse_error, None);
                assert_eq!(expected_turn, Some(Side::Black));
            }
            other => panic!("Expected rejection, got {:?}", other),
        }
        assert!(!MoveOutcome::parse_error("bad").is_accepted());
        assert_eq!(
            serde_json::to_string(&RejectionReason::ParseError).unwrap(),
            "\"parse_error\""
        );
    }
}
