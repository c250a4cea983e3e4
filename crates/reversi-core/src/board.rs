//! The Othello board: 64 cells, each empty, black or white.

use std::fmt;

use crate::bitboard::Bitboard;
use crate::error::BoardError;
use crate::player::Player;
use crate::square::Square;

/// Contents of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Black,
    White,
}

impl Cell {
    /// Return the owner of the cell, if any.
    #[inline]
    pub const fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Player::Black),
            Cell::White => Some(Player::White),
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Cell {
        match player {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }
}

/// Complete stone placement, stored as one occupancy mask per player.
///
/// `Board` is `Copy`: every simulated move yields an independent value, so
/// search branches never observe each other's speculative positions. The two
/// masks are disjoint by construction.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Stones for each player, indexed by [`Player::index()`].
    sides: [Bitboard; Player::COUNT],
}

impl Board {
    /// A board with no stones.
    pub const EMPTY: Board = Board {
        sides: [Bitboard::EMPTY; Player::COUNT],
    };

    /// Return the standard starting position: white on d4/e5, black on e4/d5.
    pub fn starting_position() -> Board {
        let black = Square::E4.bitboard() | Square::D5.bitboard();
        let white = Square::D4.bitboard() | Square::E5.bitboard();
        Board {
            sides: [black, white],
        }
    }

    /// Build a board from per-player masks, rejecting overlapping stones.
    pub fn from_sides(black: Bitboard, white: Bitboard) -> Result<Board, BoardError> {
        let overlap = black & white;
        if overlap.is_nonempty() {
            return Err(BoardError::Overlap {
                count: overlap.count(),
            });
        }
        Ok(Board {
            sides: [black, white],
        })
    }

    /// Return the contents of the given cell.
    #[inline]
    pub fn cell(&self, sq: Square) -> Cell {
        if self.sides[Player::Black.index()].contains(sq) {
            Cell::Black
        } else if self.sides[Player::White.index()].contains(sq) {
            Cell::White
        } else {
            Cell::Empty
        }
    }

    /// Return a copy of this board with `sq` set to `cell`.
    pub fn with_cell(mut self, sq: Square, cell: Cell) -> Board {
        for side in &mut self.sides {
            *side = side.without(sq);
        }
        if let Some(player) = cell.player() {
            self.sides[player.index()] = self.sides[player.index()].with(sq);
        }
        self
    }

    /// Return the stones of the given player.
    #[inline]
    pub fn side(&self, player: Player) -> Bitboard {
        self.sides[player.index()]
    }

    /// Return all occupied cells.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.sides[0] | self.sides[1]
    }

    /// Return all empty cells.
    #[inline]
    pub fn empty_squares(&self) -> Bitboard {
        !self.occupied()
    }

    /// Return `true` if the given cell holds no stone.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        !self.occupied().contains(sq)
    }

    /// Number of stones owned by `player`.
    #[inline]
    pub fn count(&self, player: Player) -> u32 {
        self.sides[player.index()].count()
    }

    /// Number of empty cells.
    #[inline]
    pub fn empty_count(&self) -> u32 {
        64 - self.occupied().count()
    }

    /// Return `true` if no empty cell remains.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// Set `player`'s stone on `placed` and turn every cell of `flips` over to `player`.
    ///
    /// Used by the rule engine after it has computed the flip set.
    #[inline]
    pub(crate) fn place(mut self, placed: Square, flips: Bitboard, player: Player) -> Board {
        let changed = flips.with(placed);
        self.sides[player.index()] |= changed;
        self.sides[player.opponent().index()] &= !changed;
        self
    }

    /// Return a pretty-printable wrapper for this board.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting_position()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\"{}\")", self)
    }
}

/// Wrapper for pretty-printing a board as an 8x8 grid.
pub struct PrettyBoard<'a>(&'a Board);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        writeln!(f, "   a b c d e f g h")?;
        for row in 0u8..8 {
            write!(f, "{}  ", row + 1)?;
            for col in 0u8..8 {
                let c = match Square::from_coords(row, col).map(|sq| board.cell(sq)) {
                    Some(Cell::Black) => 'X',
                    Some(Cell::White) => 'O',
                    _ => '.',
                };
                if col < 7 {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            if row < 7 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
