//! Error types for the chess support server

use thiserror::Error;

/// Result type for chess support operations
pub type Result<T> = std::result::Result<T, ChessError>;

/// Faults that abort an operation.
///
/// Rejected moves are not errors: they travel in-band as
/// [`MoveOutcome::Rejected`](crate::MoveOutcome::Rejected).
#[derive(Debug, Error)]
pub enum ChessError {
    /// Rules engine broke its contract (e.g. refused to apply a legal move)
    #[error("Rules engine fault: {0}")]
    EngineFault(String),

    /// Tool arguments missing or of the wrong type
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Protocol error
    #[error("Protocol error: {0}")]
    ProtocolError(String),

    /// IPC communication error
    #[error("IPC error: {0}")]
    IpcError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ChessError {
    fn from(err: serde_json::Error) -> Self {
        ChessError::SerializationError(err.to_string())
    }
}

/// JSON-RPC error codes used by the server
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
    pub const ENGINE_FAULT: i32 = -32010;
}

impl ChessError {
    /// JSON-RPC error code for this fault
    pub fn code(&self) -> i32 {
        match self {
            ChessError::EngineFault(_) => error_codes::ENGINE_FAULT,
            ChessError::InvalidParams(_) | ChessError::ProtocolError(_) => {
                error_codes::INVALID_PARAMS
            }
            _ => error_codes::INTERNAL_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ChessError::EngineFault("x".into()).code(),
            error_codes::ENGINE_FAULT
        );
        assert_eq!(
            ChessError::InvalidParams("missing uci".into()).code(),
            error_codes::INVALID_PARAMS
        );
        assert_eq!(
            ChessError::IpcError("closed".into()).code(),
            error_codes::INTERNAL_ERROR
        );
    }

    #[test]
    fn test_from_serde_error() {
        let err: ChessError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ChessError::SerializationError(_)));
        assert!(err.to_string().starts_with("Serialization error"));
    }
}
