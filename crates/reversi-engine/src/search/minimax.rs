//! Depth-limited minimax with alpha-beta pruning.
//!
//! Scores are always from the AI's perspective: the AI is the maximizing side
//! and its opponent the minimizing side. A side without a legal move passes,
//! which costs one ply; when neither side can move the game is scored by disc
//! difference.

use reversi_core::{Board, Player, apply_move, has_legal_move, valid_moves};

use crate::eval::{evaluate, terminal_score};
use crate::search::ordering::ordered_moves;

/// Score representing an unreachable upper/lower bound.
pub const INF: i32 = 1_000_000;

/// State shared across one search call.
pub(crate) struct SearchContext {
    /// Nodes visited so far.
    pub nodes: u64,
    /// The maximizing side.
    pub ai: Player,
    pub mobility_weight: i32,
}

impl SearchContext {
    pub(crate) fn new(ai: Player, mobility_weight: i32) -> Self {
        Self {
            nodes: 0,
            ai,
            mobility_weight,
        }
    }
}

/// Minimax alpha-beta search.
///
/// `maximizing` selects the side to move: the AI when `true`, its opponent
/// otherwise. Returns the minimax value of `board` to `depth` plies.
pub(crate) fn minimax(
    board: &Board,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    ctx: &mut SearchContext,
) -> i32 {
    ctx.nodes += 1;

    if depth == 0 {
        return evaluate(board, ctx.ai, ctx.mobility_weight);
    }

    let mover = if maximizing { ctx.ai } else { !ctx.ai };
    let moves = valid_moves(board, mover);

    if moves.is_empty() {
        if !has_legal_move(board, !mover) {
            return terminal_score(board, ctx.ai);
        }
        // Forced pass: same board, other side, one ply used.
        return minimax(board, depth - 1, alpha, beta, !maximizing, ctx);
    }

    if maximizing {
        let mut best = -INF;
        for mv in ordered_moves(&moves) {
            let child = apply_move(board, mv, mover);
            let score = minimax(&child, depth - 1, alpha, beta, false, ctx);
            best = best.max(score);
            alpha = alpha.max(best);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = INF;
        for mv in ordered_moves(&moves) {
            let child = apply_move(board, mv, mover);
            let score = minimax(&child, depth - 1, alpha, beta, true, ctx);
            best = best.min(score);
            beta = beta.min(best);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}
