//! Static evaluation: positional weights plus a mobility term.
//!
//! Scores are always from the perspective of the AI side; the opponent is
//! `!ai`. The evaluator is antisymmetric, so swapping the perspective negates
//! the score.

pub mod mobility;
pub mod weights;

use reversi_core::{Board, Player};

use mobility::evaluate_mobility;
use weights::weight;

/// Multiplier for the final disc difference of a finished game.
///
/// Large enough that any decided result outranks every non-terminal score.
pub const WIN_SCALE: i32 = 10_000;

/// Default mobility multiplier.
pub const DEFAULT_MOBILITY_WEIGHT: i32 = 20;

/// Sum of the weights of `ai`'s stones minus those of the opponent.
pub fn positional(board: &Board, ai: Player) -> i32 {
    let own: i32 = board.side(ai).map(weight).sum();
    let theirs: i32 = board.side(!ai).map(weight).sum();
    own - theirs
}

/// Evaluate a position from `ai`'s point of view.
pub fn evaluate(board: &Board, ai: Player, mobility_weight: i32) -> i32 {
    positional(board, ai) + evaluate_mobility(board, ai, mobility_weight)
}

/// Score of a finished game: the final disc difference scaled by [`WIN_SCALE`].
pub fn terminal_score(board: &Board, ai: Player) -> i32 {
    (board.count(ai) as i32 - board.count(!ai) as i32) * WIN_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;
    use reversi_core::{Square, apply_move, valid_moves};
    use weights::WEIGHTS;

    /// Positions along a fixed line of play, always taking the first legal move.
    fn sample_positions() -> Vec<Board> {
        let mut board = Board::starting_position();
        let mut player = Player::Black;
        let mut positions = vec![board];
        for _ in 0..40 {
            let moves = valid_moves(&board, player);
            if let Some(&mv) = moves.as_slice().first() {
                board = apply_move(&board, mv, player);
                positions.push(board);
            }
            player = !player;
        }
        positions
    }

    #[test]
    fn starting_position_is_balanced() {
        let board = Board::starting_position();
        assert_eq!(positional(&board, Player::Black), 0);
        assert_eq!(evaluate(&board, Player::Black, DEFAULT_MOBILITY_WEIGHT), 0);
    }

    #[test]
    fn evaluation_is_antisymmetric() {
        for board in sample_positions() {
            for w in [0, 20, 30] {
                assert_eq!(
                    evaluate(&board, Player::Black, w),
                    -evaluate(&board, Player::White, w),
                    "{board}"
                );
            }
        }
    }

    #[test]
    fn corner_stone_scores_corner_weight() {
        let board: Board = format!("X{}", "-".repeat(63)).parse().unwrap();
        assert_eq!(positional(&board, Player::Black), 150);
        assert_eq!(positional(&board, Player::White), -150);
        // No moves for anyone, so mobility adds nothing.
        assert_eq!(evaluate(&board, Player::Black, 30), 150);
    }

    #[test]
    fn mobility_weight_scales_the_move_difference() {
        let board = apply_move(
            &Board::starting_position(),
            Square::from_algebraic("d3").unwrap(),
            Player::Black,
        );
        let base = evaluate(&board, Player::Black, 0);
        let diff = evaluate(&board, Player::Black, 1) - base;
        assert_eq!(evaluate(&board, Player::Black, 30), base + 30 * diff);
    }

    #[test]
    fn win_scale_dominates_positional_scores() {
        let max_positional: i32 = WEIGHTS.iter().map(|w| w.abs()).sum();
        let max_mobility = Square::COUNT as i32 * 30;
        assert_eq!(max_positional, 1860);
        assert!(WIN_SCALE > max_positional + max_mobility);
    }

    #[test]
    fn terminal_score_counts_discs() {
        let board: Board = format!("{}{}", "X".repeat(40), "O".repeat(24)).parse().unwrap();
        assert_eq!(terminal_score(&board, Player::Black), 16 * WIN_SCALE);
        assert_eq!(terminal_score(&board, Player::White), -16 * WIN_SCALE);
    }
}
