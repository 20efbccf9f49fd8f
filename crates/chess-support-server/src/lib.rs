//! # chess-support-server
//!
//! MCP server that manages a single chess game.
//!
//! This crate provides:
//! - `GameSession`, the one live game and its move history
//! - MCP JSON-RPC protocol handling
//! - Tool implementations (add_move, get_status, list_moves, etc.)
//! - A newline-delimited stdio transport

pub mod config;
pub mod mcp;
pub mod session;
pub mod tools;
pub mod transport;

pub use config::{ConfigError, ServerConfig};
pub use session::GameSession;

use chess_support_core::{Result, RulesEngine};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Chess support MCP server.
///
/// Holds exactly one game session for the life of the process; every tool
/// call locks it for the duration of the call.
pub struct ChessSupportServer<E: RulesEngine> {
    /// The game session
    session: Arc<Mutex<GameSession<E>>>,
    /// Server configuration
    config: ServerConfig,
}

impl<E: RulesEngine> ChessSupportServer<E> {
    /// Create a new server with a fresh game in the initial position
    pub fn new(engine: E, config: ServerConfig) -> Self {
        Self {
            session: Arc::new(Mutex::new(GameSession::new(engine))),
            config,
        }
    }

    /// Run the server on stdio transport
    pub async fn run_stdio(self) -> Result<()> {
        transport::stdio::run(self).await
    }

    /// Get the server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Handle to the shared session
    pub fn session(&self) -> &Arc<Mutex<GameSession<E>>> {
        &self.session
    }
}
