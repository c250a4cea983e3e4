//! Mobility term: the difference in legal-move counts between the two sides.
//!
//! A side with more options is harder to force into bad squares, so the term
//! rewards keeping moves available while starving the opponent of them.

use reversi_core::{Board, Player, legal_moves_mask};

/// Legal-move count of `player` minus that of the opponent.
pub fn mobility_difference(board: &Board, player: Player) -> i32 {
    let own = legal_moves_mask(board, player).count() as i32;
    let theirs = legal_moves_mask(board, !player).count() as i32;
    own - theirs
}

/// Mobility contribution from `player`'s perspective, scaled by `weight`.
#[inline]
pub fn evaluate_mobility(board: &Board, player: Player, weight: i32) -> i32 {
    mobility_difference(board, player) * weight
}
