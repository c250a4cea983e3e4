//! Greedy move choice for the weakest tier: grab the most stones, and now and
//! then play something random.

use rand::Rng;
use rand::seq::SliceRandom;
use reversi_core::{Board, MoveList, Player, Square, flippable_stones};

/// The move flipping the most stones; ties go to the lowest index.
pub fn most_flips(board: &Board, player: Player, moves: &MoveList) -> Option<Square> {
    let mut best: Option<(Square, u32)> = None;
    for &mv in moves.as_slice() {
        let flips = flippable_stones(board, mv, player).count();
        if best.is_none_or(|(_, most)| flips > most) {
            best = Some((mv, flips));
        }
    }
    best.map(|(mv, _)| mv)
}

/// Pick a uniformly random move with probability `chance`.
pub fn random_move<R: Rng + ?Sized>(moves: &MoveList, chance: f64, rng: &mut R) -> Option<Square> {
    if chance <= 0.0 || !rng.gen_bool(chance.min(1.0)) {
        return None;
    }
    moves.as_slice().choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use reversi_core::valid_moves;

    #[test]
    fn opening_ties_go_to_lowest_index() {
        let board = Board::starting_position();
        let moves = valid_moves(&board, Player::Black);
        assert_eq!(most_flips(&board, Player::Black, &moves).map(Square::index), Some(19));
    }

    #[test]
    fn prefers_bigger_capture() {
        // h1 flips six, a3 flips one.
        let board: Board = format!("XOOOOOO-O-{}", "-".repeat(54)).parse().unwrap();
        let moves = valid_moves(&board, Player::Black);
        assert_eq!(most_flips(&board, Player::Black, &moves), Some(Square::H1));
    }

    #[test]
    fn random_move_respects_chance() {
        let board = Board::starting_position();
        let moves = valid_moves(&board, Player::Black);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(random_move(&moves, 0.0, &mut rng), None);
            let mv = random_move(&moves, 1.0, &mut rng);
            assert!(mv.is_some_and(|mv| moves.contains(mv)));
        }
    }

    #[test]
    fn empty_list_has_no_random_move() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_move(&MoveList::new(), 1.0, &mut rng), None);
    }
}
