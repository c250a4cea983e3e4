//! Move ordering by positional weight.
//!
//! Good squares first means earlier alpha-beta cutoffs. The sort is stable, so
//! equally weighted moves keep their incoming (ascending index) order.

use reversi_core::{MoveList, Square};

use crate::eval::weights::weight;

/// Sort `moves` in place by descending positional weight.
pub fn sort_by_weight(moves: &mut [Square]) {
    moves.sort_by_key(|&sq| std::cmp::Reverse(weight(sq)));
}

/// Return the moves of `list` ordered by descending positional weight.
pub fn ordered_moves(list: &MoveList) -> Vec<Square> {
    let mut moves = list.as_slice().to_vec();
    sort_by_weight(&mut moves);
    moves
}
