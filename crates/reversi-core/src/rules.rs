//! The rule engine: flip resolution, legal-move generation and move application.
//!
//! Every function here is a pure query over a [`Board`] value. An illegal
//! placement is never an error at this level; it shows up as an empty flip
//! set or as a cell missing from the legal-move list.

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::direction::Direction;
use crate::player::Player;
use crate::square::Square;

/// Stack-allocated buffer of squares in ascending index order.
#[derive(Clone, Copy)]
pub struct MoveList {
    moves: [Square; Square::COUNT],
    len: u8,
}

impl MoveList {
    /// Create an empty move list.
    pub fn new() -> MoveList {
        MoveList {
            moves: [Square::A1; Square::COUNT],
            len: 0,
        }
    }

    /// Push a square onto the list.
    #[inline]
    pub fn push(&mut self, sq: Square) {
        debug_assert!((self.len as usize) < Square::COUNT);
        self.moves[self.len as usize] = sq;
        self.len += 1;
    }

    /// Return the number of moves in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Return `true` if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Square] {
        &self.moves[..self.len as usize]
    }

    /// Return `true` if `sq` is in the list.
    pub fn contains(&self, sq: Square) -> bool {
        self.as_slice().contains(&sq)
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Square;
    #[inline]
    fn index(&self, index: usize) -> &Square {
        &self.as_slice()[index]
    }
}

impl From<Bitboard> for MoveList {
    fn from(bb: Bitboard) -> MoveList {
        let mut list = MoveList::new();
        for sq in bb {
            list.push(sq);
        }
        list
    }
}

/// Return the opponent stones captured by `player` placing on `sq`.
///
/// Empty if `sq` is occupied. Each of the eight rays from `sq` is walked one
/// cell at a time; a ray contributes its run of opponent stones only when the
/// run is closed by one of `player`'s stones. Running off the board or into an
/// empty cell discards the ray.
pub fn flippable_stones(board: &Board, sq: Square, player: Player) -> Bitboard {
    if !board.is_empty(sq) {
        return Bitboard::EMPTY;
    }

    let own = board.side(player);
    let theirs = board.side(!player);
    let mut flips = Bitboard::EMPTY;

    for dir in Direction::ALL {
        let mut ray = Bitboard::EMPTY;
        let mut cursor = sq.offset(dir);
        while let Some(next) = cursor {
            if theirs.contains(next) {
                ray = ray.with(next);
                cursor = next.offset(dir);
            } else {
                if own.contains(next) {
                    flips |= ray;
                }
                break;
            }
        }
    }

    flips
}

/// Return every legal placement for `player` as a bitboard.
///
/// Shift-fills opponent runs outward from `player`'s stones in each direction;
/// an empty cell just past a run is a legal move. Six opponent stones is the
/// longest run that fits between two cells of a line, hence one seed step plus
/// five extension steps.
pub fn legal_moves_mask(board: &Board, player: Player) -> Bitboard {
    let own = board.side(player);
    let theirs = board.side(!player);
    let empty = board.empty_squares();
    let mut moves = Bitboard::EMPTY;

    for dir in Direction::ALL {
        let mut run = dir.shift(own) & theirs;
        for _ in 0..5 {
            run |= dir.shift(run) & theirs;
        }
        moves |= dir.shift(run) & empty;
    }

    moves
}

/// Return the legal placements for `player` in ascending index order.
pub fn valid_moves(board: &Board, player: Player) -> MoveList {
    MoveList::from(legal_moves_mask(board, player))
}

/// Return `true` if `player` has at least one legal placement.
#[inline]
pub fn has_legal_move(board: &Board, player: Player) -> bool {
    legal_moves_mask(board, player).is_nonempty()
}

/// Return `true` when neither player can move (this includes a full board).
pub fn is_game_over(board: &Board) -> bool {
    !has_legal_move(board, Player::Black) && !has_legal_move(board, Player::White)
}

/// Return the board after `player` places on `sq`.
///
/// The input is untouched. Legality is the caller's responsibility: check
/// [`valid_moves`] or [`flippable_stones`] first.
pub fn apply_move(board: &Board, sq: Square, player: Player) -> Board {
    let flips = flippable_stones(board, sq, player);
    debug_assert!(
        flips.is_nonempty(),
        "apply_move called with illegal placement {sq} for {}",
        player.name()
    );
    board.place(sq, flips, player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn indices(moves: &MoveList) -> Vec<usize> {
        moves.as_slice().iter().map(|s| s.index()).collect()
    }

    #[test]
    fn initial_black_moves() {
        let board = Board::starting_position();
        let moves = valid_moves(&board, Player::Black);
        assert_eq!(indices(&moves), vec![19, 26, 37, 44]);
    }

    #[test]
    fn initial_white_moves() {
        let board = Board::starting_position();
        let moves = valid_moves(&board, Player::White);
        let names: Vec<String> = moves.as_slice().iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["e3", "f4", "c5", "d6"]);
    }

    #[test]
    fn black_d3_flips_only_d4() {
        let board = Board::starting_position();
        let flips = flippable_stones(&board, sq("d3"), Player::Black);
        assert_eq!(flips.collect::<Vec<_>>(), vec![Square::D4]);
        assert_eq!(Square::D4.index(), 27);

        let next = apply_move(&board, sq("d3"), Player::Black);
        assert_eq!(next.count(Player::Black), 4);
        assert_eq!(next.count(Player::White), 1);
        assert_eq!(next.empty_count(), 59);
        assert_eq!(next.cell(Square::D4), Cell::Black);
        assert_eq!(next.cell(sq("d3")), Cell::Black);
    }

    #[test]
    fn apply_move_leaves_input_untouched() {
        let board = Board::starting_position();
        let _ = apply_move(&board, sq("f5"), Player::Black);
        assert_eq!(board, Board::starting_position());
    }

    #[test]
    fn occupied_cell_flips_nothing() {
        let board = Board::starting_position();
        assert!(flippable_stones(&board, Square::D4, Player::Black).is_empty());
        assert!(flippable_stones(&board, Square::E4, Player::Black).is_empty());
    }

    fn first_row(row: &str) -> Board {
        format!("{row}{}", "-".repeat(56)).parse().unwrap()
    }

    #[test]
    fn ray_closed_by_own_stone_flips_whole_run() {
        let board = first_row("XOOOOOO-");
        let flips = flippable_stones(&board, Square::H1, Player::Black);
        assert_eq!(flips.count(), 6);
    }

    #[test]
    fn ray_reaching_the_edge_is_discarded() {
        let board = first_row("-OOOOOO-");
        assert!(flippable_stones(&board, Square::H1, Player::Black).is_empty());
        assert!(valid_moves(&board, Player::Black).is_empty());
    }

    #[test]
    fn ray_stopped_by_gap_is_discarded() {
        let board = first_row("---X-OO-");
        assert!(flippable_stones(&board, Square::H1, Player::Black).is_empty());
    }

    #[test]
    fn flips_union_across_directions() {
        // Black to play d4 surrounded by white with black stones behind in
        // three directions.
        let text = "\
            --------\
            -X-X-X--\
            --OOO---\
            -XO-OX--\
            --OOO---\
            -X---X--\
            --------\
            --------";
        let board: Board = text.parse().unwrap();
        let flips = flippable_stones(&board, Square::D4, Player::Black);
        // North (d3), northwest (c3), northeast (e3), west (c4), east (e4),
        // southwest (c5), southeast (e5); south (d5) has no closing stone.
        assert_eq!(flips.count(), 7);
        assert!(!flips.contains(sq("d5")));
    }

    #[test]
    fn full_board_has_no_moves() {
        let board: Board = format!("{}{}", "X".repeat(32), "O".repeat(32)).parse().unwrap();
        assert!(board.is_full());
        assert!(valid_moves(&board, Player::Black).is_empty());
        assert!(valid_moves(&board, Player::White).is_empty());
        assert!(is_game_over(&board));
    }

    #[test]
    fn starting_position_is_not_over() {
        assert!(!is_game_over(&Board::starting_position()));
        assert!(has_legal_move(&Board::starting_position(), Player::White));
    }

    #[test]
    fn mask_and_ray_walk_agree_along_a_game() {
        // Play a deterministic game (always the highest-index move) and check
        // at every ply that both generators describe the same set.
        let mut board = Board::starting_position();
        let mut player = Player::Black;
        for _ in 0..80 {
            for side in Player::ALL {
                let mask = legal_moves_mask(&board, side);
                for cell in Square::all() {
                    let walk = board.is_empty(cell)
                        && flippable_stones(&board, cell, side).is_nonempty();
                    assert_eq!(mask.contains(cell), walk, "{cell} for {side} on {board}");
                }
            }
            let moves = valid_moves(&board, player);
            if let Some(&last) = moves.as_slice().last() {
                board = apply_move(&board, last, player);
            } else if !has_legal_move(&board, !player) {
                break;
            }
            player = !player;
        }
    }

    #[test]
    fn valid_moves_are_empty_cells_with_flips() {
        let board = apply_move(&Board::starting_position(), sq("d3"), Player::Black);
        for side in Player::ALL {
            for &mv in valid_moves(&board, side).as_slice() {
                assert!(board.is_empty(mv));
                assert!(flippable_stones(&board, mv, side).is_nonempty());
            }
        }
    }

    #[test]
    fn apply_move_changes_only_placed_and_flipped() {
        let board = apply_move(&Board::starting_position(), sq("d3"), Player::Black);
        let mv = sq("c3");
        let flips = flippable_stones(&board, mv, Player::White);
        let next = apply_move(&board, mv, Player::White);
        for cell in Square::all() {
            if cell == mv || flips.contains(cell) {
                assert_eq!(next.cell(cell), Cell::White);
            } else {
                assert_eq!(next.cell(cell), board.cell(cell));
            }
        }
    }

    #[test]
    fn move_list_basics() {
        let mut list = MoveList::new();
        assert!(list.is_empty());
        list.push(Square::A1);
        list.push(Square::H8);
        assert_eq!(list.len(), 2);
        assert_eq!(list[1], Square::H8);
        assert!(list.contains(Square::A1));
        assert!(!list.contains(Square::D4));
    }
}
