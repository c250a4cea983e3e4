//! Board cells, indexed row-major from the top-left corner.

use std::fmt;

use crate::bitboard::Bitboard;
use crate::direction::Direction;

/// A cell on the board, encoded as a `u8` index.
///
/// Index = row * 8 + column, so a1 = 0 (top-left), h1 = 7, a8 = 56, h8 = 63.
/// Columns are lettered `a`..`h`, rows numbered `1`..`8` from the top.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Total number of cells.
    pub const COUNT: usize = 64;

    pub const A1: Square = Square(0);
    pub const H1: Square = Square(7);
    pub const D4: Square = Square(27);
    pub const E4: Square = Square(28);
    pub const D5: Square = Square(35);
    pub const E5: Square = Square(36);
    pub const A8: Square = Square(56);
    pub const H8: Square = Square(63);

    /// Create a square from a zero-based index, returning `None` if out of range.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Square> {
        if index < 64 { Some(Square(index)) } else { None }
    }

    /// Create a square from a zero-based index without bounds checking.
    #[inline]
    pub(crate) const fn from_index_unchecked(index: u8) -> Square {
        debug_assert!(index < 64);
        Square(index)
    }

    /// Create a square from a zero-based row and column.
    #[inline]
    pub const fn from_coords(row: u8, col: u8) -> Option<Square> {
        if row < 8 && col < 8 { Some(Square(row * 8 + col)) } else { None }
    }

    /// Parse algebraic notation (e.g. "d3") into a square.
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }

        let col = bytes[0].to_ascii_lowercase();
        let row = bytes[1];
        if !(b'a'..=b'h').contains(&col) || !(b'1'..=b'8').contains(&row) {
            return None;
        }

        Square::from_coords(row - b'1', col - b'a')
    }

    /// Return the zero-based index (0..63).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Return the zero-based row (0 = top).
    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    /// Return the zero-based column (0 = column `a`).
    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % 8
    }

    /// Return the neighbouring square one step in `dir`, or `None` off the edge.
    #[inline]
    pub const fn offset(self, dir: Direction) -> Option<Square> {
        let (dr, dc) = dir.delta();
        let row = self.row() as i8 + dr;
        let col = self.col() as i8 + dc;
        if row < 0 || row >= 8 || col < 0 || col >= 8 {
            None
        } else {
            Some(Square((row * 8 + col) as u8))
        }
    }

    /// Return `true` for the four corner cells.
    #[inline]
    pub const fn is_corner(self) -> bool {
        Bitboard::CORNERS.contains(self)
    }

    /// Return a bitboard with only this square set.
    #[inline]
    pub const fn bitboard(self) -> Bitboard {
        Bitboard::new(1u64 << self.0)
    }

    /// Iterate over all 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..64).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let col = (b'a' + self.col()) as char;
        let row = (b'1' + self.row()) as char;
        write!(f, "{col}{row}")
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({self})")
    }
}
