//! stdio transport for MCP JSON-RPC

use crate::ChessSupportServer;
use crate::mcp::{
    InitializeParams, InitializeResult, PROTOCOL_VERSION, Request, ResourcesCapability, Response,
    ServerCapabilities, ServerInfo, ToolsCapability,
};
use crate::tools::{handle_tool_call, list_tools};
use chess_support_core::{ChessError, Result, RulesEngine, error_codes};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

const INSTRUCTIONS: &str = "Manages a single chess game: reset, add moves in UCI, list moves, \
check legality and read status. It does not suggest moves.";

/// Run the MCP server on stdio
pub async fn run<E: RulesEngine>(server: ChessSupportServer<E>) -> Result<()> {
    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();

    info!("{} MCP server starting on stdio", server.config.name);
    serve(&server, reader, writer).await
}

/// Serve newline-delimited JSON-RPC until the reader hits EOF.
///
/// Requests are handled one at a time, in arrival order.
pub async fn serve<E, R, W>(
    server: &ChessSupportServer<E>,
    mut reader: R,
    mut writer: W,
) -> Result<()>
where
    E: RulesEngine,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader
            .read_line(&mut line)
            .await
            .map_err(|e| ChessError::IpcError(format!("Failed to read stdin: {}", e)))?;

        if bytes_read == 0 {
            // EOF - client disconnected
            info!("Client disconnected (EOF)");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        debug!("Received: {}", trimmed);

        let response = match serde_json::from_str::<Request>(trimmed) {
            Ok(request) => handle_request(&request, server).await,
            Err(e) => {
                error!("Failed to parse request: {}", e);
                Some(Response::error(
                    None,
                    error_codes::PARSE_ERROR,
                    format!("Parse error: {}", e),
                ))
            }
        };

        let Some(response) = response else {
            continue;
        };

        let response_json = serde_json::to_string(&response)?;
        debug!("Sending: {}", response_json);

        writer
            .write_all(response_json.as_bytes())
            .await
            .map_err(|e| ChessError::IpcError(format!("Failed to write stdout: {}", e)))?;
        writer
            .write_all(b"\n")
            .await
            .map_err(|e| ChessError::IpcError(format!("Failed to write newline: {}", e)))?;
        writer
            .flush()
            .await
            .map_err(|e| ChessError::IpcError(format!("Failed to flush stdout: {}", e)))?;
    }

    Ok(())
}

async fn handle_request<E: RulesEngine>(
    request: &Request,
    server: &ChessSupportServer<E>,
) -> Option<Response> {
    if request.is_notification() {
        match request.method.as_str() {
            "notifications/initialized" | "initialized" => debug!("Client initialized"),
            "notifications/cancelled" => debug!("Ignoring cancellation"),
            other => warn!("Ignoring unknown notification: {}", other),
        }
        return None;
    }

    let response = match request.method.as_str() {
        "initialize" => handle_initialize(request, server),
        "initialized" => Response::success(request.id.clone(), serde_json::json!({})),
        "ping" => Response::success(request.id.clone(), serde_json::json!({})),
        "tools/list" => handle_tools_list(request),
        "tools/call" => handle_tools_call(request, server).await,
        "resources/list" => handle_resources_list(request),
        "resources/read" => handle_resources_read(request, server).await,
        _ => Response::error(
            request.id.clone(),
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", request.method),
        ),
    };
    Some(response)
}

fn handle_initialize<E: RulesEngine>(
    request: &Request,
    server: &ChessSupportServer<E>,
) -> Response {
    let params: InitializeParams = match serde_json::from_value(request.params.clone()) {
        Ok(p) => p,
        Err(e) => {
            return Response::error(
                request.id.clone(),
                error_codes::INVALID_PARAMS,
                format!("Invalid initialize params: {}", e),
            );
        }
    };

    if let Some(client) = &params.client_info {
        info!(
            "Client {} v{} connected (protocol {})",
            client.name, client.version, params.protocol_version
        );
    }

    let result = InitializeResult {
        protocol_version: PROTOCOL_VERSION.to_string(),
        capabilities: ServerCapabilities {
            tools: ToolsCapability {
                list_changed: false,
            },
            resources: ResourcesCapability {
                subscribe: false,
                list_changed: false,
            },
        },
        server_info: ServerInfo {
            name: server.config.name.clone(),
            version: server.config.version.clone(),
        },
        instructions: Some(INSTRUCTIONS.to_string()),
    };

    match serde_json::to_value(result) {
        Ok(value) => Response::success(request.id.clone(), value),
        Err(e) => Response::error(
            request.id.clone(),
            error_codes::INTERNAL_ERROR,
            e.to_string(),
        ),
    }
}

fn handle_tools_list(request: &Request) -> Response {
    let tools = list_tools();
    Response::success(request.id.clone(), serde_json::json!({ "tools": tools }))
}

async fn handle_tools_call<E: RulesEngine>(
    request: &Request,
    server: &ChessSupportServer<E>,
) -> Response {
    #[derive(serde::Deserialize)]
    struct ToolCallParams {
        name: String,
        #[serde(default)]
        arguments: serde_json::Value,
    }

    let params: ToolCallParams = match serde_json::from_value(request.params.clone()) {
        Ok(p) => p,
        Err(e) => {
            return Response::error(
                request.id.clone(),
                error_codes::INVALID_PARAMS,
                format!("Invalid tool call params: {}", e),
            );
        }
    };

    handle_tool_call(
        &params.name,
        params.arguments,
        request.id.clone(),
        &server.session,
    )
    .await
}

fn handle_resources_list(request: &Request) -> Response {
    let resources = vec![
        serde_json::json!({
            "uri": "chess://status",
            "name": "Game Status",
            "description": "Current position metadata, same shape as get_status",
            "mimeType": "application/json"
        }),
        serde_json::json!({
            "uri": "chess://moves",
            "name": "Move History",
            "description": "Detailed move history, oldest first",
            "mimeType": "application/json"
        }),
        serde_json::json!({
            "uri": "chess://board",
            "name": "Board Diagram",
            "description": "ASCII board from White's perspective",
            "mimeType": "text/plain"
        }),
    ];

    Response::success(
        request.id.clone(),
        serde_json::json!({ "resources": resources }),
    )
}

async fn handle_resources_read<E: RulesEngine>(
    request: &Request,
    server: &ChessSupportServer<E>,
) -> Response {
    #[derive(serde::Deserialize)]
    struct ReadParams {
        uri: String,
    }

    let params: ReadParams = match serde_json::from_value(request.params.clone()) {
        Ok(p) => p,
        Err(e) => {
            return Response::error(
                request.id.clone(),
                error_codes::INVALID_PARAMS,
                format!("Invalid read params: {}", e),
            );
        }
    };

    let game = server.session.lock().await;
    let content: Result<(&str, String)> = match params.uri.as_str() {
        "chess://status" => game
            .status()
            .and_then(|s| serde_json::to_string(&s).map_err(Into::into))
            .map(|text| ("application/json", text)),
        "chess://moves" => serde_json::to_string(&game.all_moves_detailed())
            .map(|text| ("application/json", text))
            .map_err(Into::into),
        "chess://board" => Ok(("text/plain", game.board_ascii())),
        _ => {
            return Response::error(
                request.id.clone(),
                error_codes::INVALID_PARAMS,
                format!("Unknown resource: {}", params.uri),
            );
        }
    };
    drop(game);

    match content {
        Ok((mime_type, text)) => Response::success(
            request.id.clone(),
            serde_json::json!({
                "contents": [{
                    "uri": params.uri,
                    "mimeType": mime_type,
                    "text": text
                }]
            }),
        ),
        Err(e) => Response::error(request.id.clone(), e.code(), e.to_string()),
    }
}
