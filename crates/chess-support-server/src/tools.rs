//! MCP tool handlers for the chess session

use chess_support_core::{AddMoveReply, ChessError, MoveOutcome, ResetReply, Result, RulesEngine};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::mcp::{RequestId, Response};
use crate::session::GameSession;

/// Tool definition for MCP tools/list
#[derive(Debug, Clone, Serialize)]
pub struct ToolDef {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

fn no_params() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {}
    })
}

fn uci_param() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "uci": {
                "type": "string",
                "description": "Move in UCI format, e.g. \"e2e4\", \"g1f3\", promotions like \"e7e8q\""
            }
        },
        "required": ["uci"]
    })
}

fn n_param() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "n": {
                "type": "integer",
                "description": "How many trailing moves to return. n <= 0 returns an empty list.",
                "default": 1
            }
        }
    })
}

/// Get list of available tools
pub fn list_tools() -> Vec<ToolDef> {
    vec![
        ToolDef {
            name: "create_or_reset_game".into(),
            description: "Create a new game or reset the current one to the initial position. Returns { ok, status, moves, moves_detailed }. This tool does not suggest moves; it only manages state.".into(),
            input_schema: no_params(),
        },
        ToolDef {
            name: "get_status".into(),
            description: "Get current position metadata: fen, side_to_move, fullmove_number, halfmove_clock, ply_count, castling_rights, en_passant_square, last_move_uci, last_move_san, who_moved_last, is_check, is_game_over, result, and pieces (square-to-piece map, e.g. {\"a2\":\"P\", \"e1\":\"K\"}).".into(),
            input_schema: no_params(),
        },
        ToolDef {
            name: "add_move".into(),
            description: "Apply a move in UCI format if legal. On success: { accepted:true, status, moves, moves_detailed }. On failure: { accepted:false, reason:\"illegal\", expected_turn, status } or { accepted:false, reason:\"parse_error\", parse_error, status }.".into(),
            input_schema: uci_param(),
        },
        ToolDef {
            name: "is_legal".into(),
            description: "Check if a UCI move is legal in the current position. Returns { legal } or, if the move cannot be parsed, { parse_error, legal:false }.".into(),
            input_schema: uci_param(),
        },
        ToolDef {
            name: "list_moves".into(),
            description: "Return all moves played so far in UCI, ordered from the start of the game.".into(),
            input_schema: no_params(),
        },
        ToolDef {
            name: "list_moves_detailed".into(),
            description: "Return detailed move history. Each item: { ply, uci, san, side:\"white\"|\"black\" }.".into(),
            input_schema: no_params(),
        },
        ToolDef {
            name: "last_moves".into(),
            description: "Return the last N moves in UCI (default 1).".into(),
            input_schema: n_param(),
        },
        ToolDef {
            name: "last_moves_detailed".into(),
            description: "Return the last N moves with details (default 1). Each item: { ply, uci, san, side }.".into(),
            input_schema: n_param(),
        },
        ToolDef {
            name: "board_ascii".into(),
            description: "Return an ASCII diagram of the board from White's perspective. For reasoning, prefer the pieces map in get_status.".into(),
            input_schema: no_params(),
        },
        ToolDef {
            name: "get_state_hash".into(),
            description: "Get a hash of the position and move history, to detect whether the game changed.".into(),
            input_schema: no_params(),
        },
    ]
}

/// Parameters for add_move and is_legal
#[derive(Debug, Deserialize)]
pub struct MoveParams {
    pub uci: String,
}

/// Parameters for last_moves and last_moves_detailed
#[derive(Debug, Deserialize)]
pub struct LastMovesParams {
    #[serde(default = "default_n")]
    pub n: i64,
}

fn default_n() -> i64 {
    1
}

/// Wrap a tool result as MCP content. Strings are passed through as text.
pub fn tool_content(value: serde_json::Value) -> serde_json::Value {
    let text = match &value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    serde_json::json!({
        "content": [{ "type": "text", "text": text }],
        "structuredContent": { "result": value }
    })
}

/// Handle a tools/call request
pub async fn handle_tool_call<E: RulesEngine>(
    name: &str,
    params: serde_json::Value,
    id: Option<RequestId>,
    session: &Arc<Mutex<GameSession<E>>>,
) -> Response {
    // One lock per call: nothing interleaves with a move's check, render and apply
    let mut game = session.lock().await;

    let result = match name {
        "create_or_reset_game" => handle_reset(&mut game),
        "get_status" => handle_status(&game),
        "add_move" => handle_add_move(params, &mut game),
        "is_legal" => handle_is_legal(params, &game),
        "list_moves" => Ok(serde_json::json!(game.all_moves())),
        "list_moves_detailed" => to_json(game.all_moves_detailed()),
        "last_moves" => handle_last_moves(params, &game),
        "last_moves_detailed" => handle_last_moves_detailed(params, &game),
        "board_ascii" => Ok(serde_json::Value::String(game.board_ascii())),
        "get_state_hash" => Ok(serde_json::json!({ "hash": game.state_hash() })),
        _ => Err(ChessError::ProtocolError(format!("Unknown tool: {}", name))),
    };
    drop(game);

    match result {
        Ok(value) => Response::success(id, tool_content(value)),
        Err(e) => {
            match &e {
                ChessError::EngineFault(_) => error!("Tool {} failed: {}", name, e),
                _ => debug!("Tool {} failed: {}", name, e),
            }
            Response::error(id, e.code(), e.to_string())
        }
    }
}

fn parse_params<T: DeserializeOwned>(params: serde_json::Value) -> Result<T> {
    // Clients may omit arguments entirely
    let params = if params.is_null() {
        serde_json::json!({})
    } else {
        params
    };
    serde_json::from_value(params).map_err(|e| ChessError::InvalidParams(e.to_string()))
}

fn to_json<T: Serialize>(value: T) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(value)?)
}

fn handle_reset<E: RulesEngine>(game: &mut GameSession<E>) -> Result<serde_json::Value> {
    game.reset();
    to_json(ResetReply {
        ok: true,
        status: game.status()?,
        moves: game.all_moves(),
        moves_detailed: game.all_moves_detailed(),
    })
}

fn handle_status<E: RulesEngine>(game: &GameSession<E>) -> Result<serde_json::Value> {
    to_json(game.status()?)
}

fn handle_add_move<E: RulesEngine>(
    params: serde_json::Value,
    game: &mut GameSession<E>,
) -> Result<serde_json::Value> {
    let p: MoveParams = parse_params(params)?;
    let outcome = game.attempt_move(&p.uci)?;
    let status = game.status()?;

    let response = match outcome {
        MoveOutcome::Accepted => AddMoveReply {
            accepted: true,
            status,
            reason: None,
            expected_turn: None,
            parse_error: None,
            moves: Some(game.all_moves()),
            moves_detailed: Some(game.all_moves_detailed()),
        },
        MoveOutcome::Rejected {
            reason,
            parse_error,
            expected_turn,
        } => AddMoveReply {
            accepted: false,
            status,
            reason: Some(reason),
            expected_turn,
            parse_error,
            moves: None,
            moves_detailed: None,
        },
    };
    to_json(response)
}

fn handle_is_legal<E: RulesEngine>(
    params: serde_json::Value,
    game: &GameSession<E>,
) -> Result<serde_json::Value> {
    let p: MoveParams = parse_params(params)?;
    to_json(game.is_legal(&p.uci))
}

fn handle_last_moves<E: RulesEngine>(
    params: serde_json::Value,
    game: &GameSession<E>,
) -> Result<serde_json::Value> {
    let p: LastMovesParams = parse_params(params)?;
    to_json(game.last_n(p.n))
}

fn handle_last_moves_detailed<E: RulesEngine>(
    params: serde_json::Value,
    game: &GameSession<E>,
) -> Result<serde_json::Value> {
    let p: LastMovesParams = parse_params(params)?;
    to_json(game.last_n_detailed(p.n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_support_core::error_codes;
    use chess_support_rules::ShakmatyRules;
    use serde_json::json;

    fn shared() -> Arc<Mutex<GameSession<ShakmatyRules>>> {
        Arc::new(Mutex::new(GameSession::new(ShakmatyRules::new())))
    }

    async fn call(
        session: &Arc<Mutex<GameSession<ShakmatyRules>>>,
        name: &str,
        args: serde_json::Value,
    ) -> serde_json::Value {
        let response = handle_tool_call(name, args, Some(RequestId::Number(1)), session).await;
        assert!(response.error.is_none(), "{} failed: {:?}", name, response.error);
        response.result.unwrap()["structuredContent"]["result"].clone()
    }

    #[test]
    fn test_tool_names() {
        let names: Vec<String> = list_tools().into_iter().map(|t| t.name).collect();
        for expected in [
            "create_or_reset_game",
            "get_status",
            "add_move",
            "is_legal",
            "list_moves",
            "list_moves_detailed",
            "last_moves",
            "last_moves_detailed",
            "board_ascii",
            "get_state_hash",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing {}", expected);
        }
    }

    #[tokio::test]
    async fn test_reset_then_status() {
        let session = shared();
        let out = call(&session, "create_or_reset_game", json!({})).await;
        assert_eq!(out["ok"], true);
        assert_eq!(out["moves"], json!([]));
        assert_eq!(out["moves_detailed"], json!([]));
        assert_eq!(out["status"]["side_to_move"], "white");
        assert_eq!(out["status"]["ply_count"], 0);
        assert_eq!(out["status"]["pieces"]["a2"], "P");
        assert_eq!(out["status"]["pieces"]["e1"], "K");

        let status = call(&session, "get_status", json!({})).await;
        assert_eq!(status, out["status"]);
        assert!(status["last_move_uci"].is_null());
        assert!(status["result"].is_null());
        assert_eq!(status["castling_rights"], "KQkq");
    }

    #[tokio::test]
    async fn test_add_move_scenarios() {
        let session = shared();

        let a = call(&session, "add_move", json!({ "uci": "e2e4" })).await;
        assert_eq!(a["accepted"], true);
        assert_eq!(a["status"]["last_move_san"], "e4");
        assert_eq!(a["status"]["side_to_move"], "black");
        assert_eq!(a["moves"], json!(["e2e4"]));

        let b = call(&session, "add_move", json!({ "uci": "e2e4" })).await;
        assert_eq!(b["accepted"], false);
        assert_eq!(b["reason"], "illegal");
        assert_eq!(b["expected_turn"], "black");
        assert_eq!(b["status"], a["status"]);
        assert!(b.get("moves").is_none());

        let c = call(&session, "add_move", json!({ "uci": "e7e5" })).await;
        assert_eq!(c["accepted"], true);
        assert_eq!(c["status"]["last_move_san"], "e5");

        let moves = call(&session, "list_moves", json!({})).await;
        assert_eq!(moves, json!(["e2e4", "e7e5"]));

        let detailed = call(&session, "list_moves_detailed", json!({})).await;
        assert_eq!(
            detailed[0],
            json!({ "ply": 1, "uci": "e2e4", "san": "e4", "side": "white" })
        );
        assert_eq!(
            detailed[1],
            json!({ "ply": 2, "uci": "e7e5", "san": "e5", "side": "black" })
        );

        let last = call(&session, "last_moves", json!({ "n": 1 })).await;
        assert_eq!(last, json!(["e7e5"]));
        let last_default = call(&session, "last_moves", json!({})).await;
        assert_eq!(last_default, json!(["e7e5"]));
        let none = call(&session, "last_moves", json!({ "n": -3 })).await;
        assert_eq!(none, json!([]));

        let last_detailed = call(&session, "last_moves_detailed", json!({ "n": 1 })).await;
        assert_eq!(last_detailed[0]["uci"], "e7e5");
        let all_detailed = call(&session, "last_moves_detailed", json!({ "n": 50 })).await;
        assert_eq!(all_detailed, detailed);
    }

    #[tokio::test]
    async fn test_parse_error_variant() {
        let session = shared();
        let before = call(&session, "get_state_hash", json!({})).await;

        let out = call(&session, "add_move", json!({ "uci": "zz99" })).await;
        assert_eq!(out["accepted"], false);
        assert_eq!(out["reason"], "parse_error");
        assert!(!out["parse_error"].as_str().unwrap().is_empty());
        assert!(out.get("expected_turn").is_none());

        let legal = call(&session, "is_legal", json!({ "uci": "zz99" })).await;
        assert_eq!(legal["legal"], false);
        assert!(!legal["parse_error"].as_str().unwrap().is_empty());

        let after = call(&session, "get_state_hash", json!({})).await;
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_is_legal() {
        let session = shared();
        let legal = call(&session, "is_legal", json!({ "uci": "e2e4" })).await;
        assert_eq!(legal, json!({ "legal": true }));
        let illegal = call(&session, "is_legal", json!({ "uci": "e2e5" })).await;
        assert_eq!(illegal, json!({ "legal": false }));
    }

    #[tokio::test]
    async fn test_board_ascii_is_plain_text() {
        let session = shared();
        let response =
            handle_tool_call("board_ascii", json!({}), Some(RequestId::Number(3)), &session).await;
        let result = response.result.unwrap();
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("r n b q k b n r"));
        assert_eq!(result["structuredContent"]["result"], text);
    }

    #[tokio::test]
    async fn test_invalid_params() {
        let session = shared();
        let response =
            handle_tool_call("add_move", json!({}), Some(RequestId::Number(4)), &session).await;
        let err = response.error.unwrap();
        assert_eq!(err.code, error_codes::INVALID_PARAMS);

        let response = handle_tool_call(
            "last_moves",
            json!({ "n": "three" }),
            Some(RequestId::Number(5)),
            &session,
        )
        .await;
        assert_eq!(response.error.unwrap().code, error_codes::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let session = shared();
        let response =
            handle_tool_call("suggest_move", json!({}), Some(RequestId::Number(6)), &session).await;
        let err = response.error.unwrap();
        assert_eq!(err.code, error_codes::INVALID_PARAMS);
        assert!(err.message.contains("Unknown tool: suggest_move"));
    }

    #[tokio::test]
    async fn test_null_arguments_use_defaults() {
        let session = shared();
        call(&session, "add_move", json!({ "uci": "d2d4" })).await;
        let last = call(&session, "last_moves", serde_json::Value::Null).await;
        assert_eq!(last, json!(["d2d4"]));
    }
}
