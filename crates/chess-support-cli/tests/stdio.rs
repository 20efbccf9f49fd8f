//! End-to-end tests against the real binary over stdio

use chess_support_client::ChessSupportClient;
use chess_support_core::{LegalityCheck, RejectionReason, Side};

async fn connected() -> ChessSupportClient {
    let mut client = ChessSupportClient::spawn(env!("CARGO_BIN_EXE_chess-support-mcp"), &["warn"])
        .await
        .unwrap();
    let info = client.connect("stdio-test", "0.0.1").await.unwrap();
    assert_eq!(info.name, "chess-support-mcp");
    client
}

#[tokio::test]
async fn test_reset_and_status() {
    let mut client = connected().await;

    let tools = client.list_tools().await.unwrap();
    assert!(tools.iter().any(|t| t == "create_or_reset_game"));
    assert!(tools.iter().any(|t| t == "get_status"));

    let out = client.reset().await.unwrap();
    assert!(out.ok);
    assert_eq!(out.status.side_to_move, Side::White);
    assert_eq!(out.status.ply_count, 0);
    assert!(out.moves.is_empty());
    assert_eq!(out.status.pieces["a2"], "P");
    assert_eq!(out.status.pieces["e1"], "K");

    let status = client.status().await.unwrap();
    assert_eq!(status.side_to_move, Side::White);

    client.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_add_move_and_list() {
    let mut client = connected().await;
    client.reset().await.unwrap();

    let a = client.add_move("e2e4").await.unwrap();
    assert!(a.accepted);
    assert_eq!(a.status.last_move_san.as_deref(), Some("e4"));

    // Same side tries to move again
    let hash = client.state_hash().await.unwrap();
    let b = client.add_move("e2e4").await.unwrap();
    assert!(!b.accepted);
    assert_eq!(b.reason, Some(RejectionReason::Illegal));
    assert_eq!(b.expected_turn, Some(Side::Black));
    assert_eq!(b.status.last_move_uci.as_deref(), Some("e2e4"));
    assert_eq!(client.state_hash().await.unwrap(), hash);

    let c = client.add_move("e7e5").await.unwrap();
    assert!(c.accepted);
    assert_eq!(c.status.last_move_san.as_deref(), Some("e5"));

    assert_eq!(client.list_moves().await.unwrap(), vec!["e2e4", "e7e5"]);

    let detailed = client.list_moves_detailed().await.unwrap();
    assert_eq!(detailed[0].ply, 1);
    assert_eq!(detailed[0].side, Side::White);
    assert_eq!(detailed[0].san.as_deref(), Some("e4"));
    assert_eq!(detailed[1].ply, 2);
    assert_eq!(detailed[1].side, Side::Black);
    assert_eq!(detailed[1].san.as_deref(), Some("e5"));

    assert_eq!(client.last_moves(1).await.unwrap(), vec!["e7e5"]);
    assert!(client.last_moves(0).await.unwrap().is_empty());
    let last = client.last_moves_detailed(1).await.unwrap();
    assert_eq!(last[0].uci, "e7e5");

    client.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_legality_and_board_ascii() {
    let mut client = connected().await;
    client.reset().await.unwrap();

    assert_eq!(
        client.is_legal("e2e4").await.unwrap(),
        LegalityCheck::legal(true)
    );
    let bad = client.is_legal("zz99").await.unwrap();
    assert!(!bad.legal);
    assert!(bad.parse_error.is_some());

    let board = client.board_ascii().await.unwrap();
    assert_eq!(board.lines().count(), 8);
    assert_eq!(board.lines().last(), Some("R N B Q K B N R"));

    client.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_tool_is_rpc_error() {
    let mut client = connected().await;
    let err = client
        .call_tool("suggest_move", serde_json::json!({}))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Unknown tool"));
    client.shutdown().await.unwrap();
}
