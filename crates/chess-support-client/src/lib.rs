//! MCP client for the chess support server
//!
//! Spawns a server process and drives it over stdio with JSON-RPC, exposing
//! one typed method per tool.

use chess_support_core::{
    AddMoveReply, ChessError, LegalityCheck, MoveRecord, ResetReply, Result, Status,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::debug;

/// Client for a chess support MCP server
pub struct ChessSupportClient {
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: BufReader<ChildStdout>,
    request_id: i64,
}

#[derive(Debug, Serialize)]
struct Request {
    jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    method: String,
    params: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct Response {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: serde_json::Value,
    result: Option<serde_json::Value>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i32,
    message: String,
}

/// Server identity reported by `initialize`
#[derive(Debug, Clone, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl ChessSupportClient {
    /// Spawn a server process and attach to its stdio
    pub async fn spawn(command: &str, args: &[&str]) -> Result<Self> {
        let mut child = Command::new(command)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ChessError::IpcError(format!("Failed to spawn process: {}", e)))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ChessError::IpcError("No stdin".into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ChessError::IpcError("No stdout".into()))?;

        Ok(Self {
            child,
            stdin: Some(stdin),
            stdout: BufReader::new(stdout),
            request_id: 0,
        })
    }

    /// Run the MCP handshake and return the server identity
    pub async fn connect(&mut self, client_name: &str, client_version: &str) -> Result<ServerInfo> {
        let init_result = self
            .send_request(
                "initialize",
                serde_json::json!({
                    "protocolVersion": "2025-06-18",
                    "capabilities": {},
                    "clientInfo": {
                        "name": client_name,
                        "version": client_version
                    }
                }),
            )
            .await?;

        self.send_notification("notifications/initialized").await?;

        let info = init_result
            .get("serverInfo")
            .cloned()
            .ok_or_else(|| ChessError::ProtocolError("Missing serverInfo".into()))?;
        serde_json::from_value(info).map_err(Into::into)
    }

    /// Names of the tools the server offers
    pub async fn list_tools(&mut self) -> Result<Vec<String>> {
        let result = self
            .send_request("tools/list", serde_json::json!({}))
            .await?;

        let tools = result
            .get("tools")
            .and_then(|t| t.as_array())
            .ok_or_else(|| ChessError::ProtocolError("Invalid tools/list response".into()))?;

        Ok(tools
            .iter()
            .filter_map(|t| t.get("name").and_then(|n| n.as_str()))
            .map(str::to_string)
            .collect())
    }

    pub async fn reset(&mut self) -> Result<ResetReply> {
        self.call_typed("create_or_reset_game", serde_json::json!({}))
            .await
    }

    pub async fn status(&mut self) -> Result<Status> {
        self.call_typed("get_status", serde_json::json!({})).await
    }

    pub async fn add_move(&mut self, uci: &str) -> Result<AddMoveReply> {
        self.call_typed("add_move", serde_json::json!({ "uci": uci }))
            .await
    }

    pub async fn is_legal(&mut self, uci: &str) -> Result<LegalityCheck> {
        self.call_typed("is_legal", serde_json::json!({ "uci": uci }))
            .await
    }

    pub async fn list_moves(&mut self) -> Result<Vec<String>> {
        self.call_typed("list_moves", serde_json::json!({})).await
    }

    pub async fn list_moves_detailed(&mut self) -> Result<Vec<MoveRecord>> {
        self.call_typed("list_moves_detailed", serde_json::json!({}))
            .await
    }

    pub async fn last_moves(&mut self, n: i64) -> Result<Vec<String>> {
        self.call_typed("last_moves", serde_json::json!({ "n": n }))
            .await
    }

    pub async fn last_moves_detailed(&mut self, n: i64) -> Result<Vec<MoveRecord>> {
        self.call_typed("last_moves_detailed", serde_json::json!({ "n": n }))
            .await
    }

    pub async fn board_ascii(&mut self) -> Result<String> {
        self.call_typed("board_ascii", serde_json::json!({})).await
    }

    /// Get state hash, to confirm a call left the game untouched
    pub async fn state_hash(&mut self) -> Result<String> {
        let result = self
            .call_tool("get_state_hash", serde_json::json!({}))
            .await?;

        result
            .get("hash")
            .and_then(|h| h.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| ChessError::ProtocolError("Invalid state_hash response".into()))
    }

    async fn call_typed<T: DeserializeOwned>(
        &mut self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<T> {
        let value = self.call_tool(name, arguments).await?;
        serde_json::from_value(value).map_err(Into::into)
    }

    /// Call an MCP tool and return its structured result
    pub async fn call_tool(
        &mut self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value> {
        let mut result = self
            .send_request(
                "tools/call",
                serde_json::json!({
                    "name": name,
                    "arguments": arguments
                }),
            )
            .await?;

        if let Some(value) = result
            .get_mut("structuredContent")
            .and_then(|c| c.get_mut("result"))
        {
            return Ok(value.take());
        }

        // Fall back to the text content
        let content = result
            .get("content")
            .and_then(|c| c.as_array())
            .and_then(|a| a.first())
            .and_then(|c| c.get("text"))
            .and_then(|t| t.as_str())
            .ok_or_else(|| ChessError::ProtocolError("Invalid tool response".into()))?;

        serde_json::from_str(content).map_err(Into::into)
    }

    async fn write_message(&mut self, request: &Request) -> Result<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| ChessError::IpcError("stdin closed".into()))?;

        let request_json = serde_json::to_string(request)?;
        debug!("Sending: {}", request_json);
        stdin
            .write_all(request_json.as_bytes())
            .await
            .map_err(|e| ChessError::IpcError(format!("Write failed: {}", e)))?;
        stdin
            .write_all(b"\n")
            .await
            .map_err(|e| ChessError::IpcError(format!("Write newline failed: {}", e)))?;
        stdin
            .flush()
            .await
            .map_err(|e| ChessError::IpcError(format!("Flush failed: {}", e)))?;
        Ok(())
    }

    async fn send_notification(&mut self, method: &str) -> Result<()> {
        let request = Request {
            jsonrpc: "2.0",
            id: None,
            method: method.to_string(),
            params: serde_json::json!({}),
        };
        self.write_message(&request).await
    }

    /// Send a JSON-RPC request and wait for response
    async fn send_request(
        &mut self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value> {
        self.request_id += 1;
        let request = Request {
            jsonrpc: "2.0",
            id: Some(self.request_id),
            method: method.to_string(),
            params,
        };
        self.write_message(&request).await?;

        let mut line = String::new();
        let bytes_read = self
            .stdout
            .read_line(&mut line)
            .await
            .map_err(|e| ChessError::IpcError(format!("Read failed: {}", e)))?;
        if bytes_read == 0 {
            return Err(ChessError::IpcError("Server closed stdout".into()));
        }

        debug!("Received: {}", line.trim());

        let response: Response = serde_json::from_str(&line)?;

        if let Some(err) = response.error {
            return Err(ChessError::ProtocolError(format!(
                "RPC error {}: {}",
                err.code, err.message
            )));
        }

        response
            .result
            .ok_or_else(|| ChessError::ProtocolError("No result in response".into()))
    }

    /// Close stdin and wait for the server to exit
    pub async fn shutdown(&mut self) -> Result<()> {
        // Dropping stdin signals EOF
        self.stdin.take();
        self.child
            .wait()
            .await
            .map_err(|e| ChessError::IpcError(format!("Wait failed: {}", e)))?;
        Ok(())
    }
}

impl Drop for ChessSupportClient {
    fn drop(&mut self) {
        // Try to kill the child process if still running
        let _ = self.child.start_kill();
    }
}
