//! Perft (performance test) for rule-engine correctness verification.
//!
//! A forced pass counts as one ply; a finished game is a leaf.

use crate::board::Board;
use crate::player::Player;
use crate::rules::{apply_move, has_legal_move, legal_moves_mask};

/// Count the number of leaf nodes at the given depth with `player` to move.
///
/// Depth 0 returns 1 (the current position). Depth 1 returns the number
/// of legal moves (bulk counting, no recursive apply).
pub fn perft(board: &Board, player: Player, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves_mask(board, player);

    if moves.is_empty() {
        if !has_legal_move(board, !player) {
            return 1;
        }
        return perft(board, !player, depth - 1);
    }

    if depth == 1 {
        return moves.count() as u64;
    }

    moves
        .map(|sq| perft(&apply_move(board, sq, player), !player, depth - 1))
        .sum()
}

/// Run perft with per-move breakdown (useful for debugging).
///
/// Returns `(square, node_count)` pairs in ascending square order.
pub fn divide(board: &Board, player: Player, depth: usize) -> Vec<(String, u64)> {
    legal_moves_mask(board, player)
        .map(|sq| {
            let child = apply_move(board, sq, player);
            let count = if depth <= 1 { 1 } else { perft(&child, !player, depth - 1) };
            (sq.to_string(), count)
        })
        .collect()
}
