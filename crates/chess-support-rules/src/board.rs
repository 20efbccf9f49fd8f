//! Board views: text diagram and square-to-piece map

use shakmaty::{Board, File, Rank, Square};
use std::collections::BTreeMap;

/// Eight rows, rank 8 first, `.` for empty squares.
pub fn render_ascii(board: &Board) -> String {
    let mut rows = Vec::with_capacity(8);
    for rank in (0..8u32).rev() {
        let row: Vec<String> = (0..8u32)
            .map(|file| {
                let sq = Square::from_coords(File::new(file), Rank::new(rank));
                board
                    .piece_at(sq)
                    .map(|piece| piece.char().to_string())
                    .unwrap_or_else(|| ".".to_string())
            })
            .collect();
        rows.push(row.join(" "));
    }
    rows.join("\n")
}

/// Every occupied square mapped to its piece symbol (uppercase is white).
pub fn piece_map(board: &Board) -> BTreeMap<String, String> {
    Square::ALL
        .into_iter()
        .filter_map(|sq| {
            board
                .piece_at(sq)
                .map(|piece| (sq.to_string(), piece.char().to_string()))
        })
        .collect()
}
