//! Transports for MCP JSON-RPC

pub mod stdio;
