//! chess-support-mcp: MCP server for a single chess game
//!
//! Exposes the game as MCP tools over stdio. Logs go to stderr; stdout
//! carries only JSON-RPC.
//!
//! Usage: `chess-support-mcp [log-level]`. `RUST_LOG` takes precedence
//! over both the argument and `CHESS_MCP_LOG`.

use anyhow::Result;
use chess_support_rules::ShakmatyRules;
use chess_support_server::{ChessSupportServer, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config = ServerConfig::from_env()?;
    if let Some(level) = args.get(1) {
        config = config.with_log_level(level)?;
    }

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("Starting {} v{}", config.name, config.version);

    let server = ChessSupportServer::new(ShakmatyRules::new(), config);
    server
        .run_stdio()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down");
    Ok(())
}
