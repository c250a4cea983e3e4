//! Bitboard representation: a 64-bit integer where each bit maps to a board cell.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not, Shl, Shr};

use crate::square::Square;

/// A set of cells, one bit per square (bit `i` = row `i / 8`, column `i % 8`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(u64);

impl Bitboard {
    /// Empty bitboard (no cells set).
    pub const EMPTY: Bitboard = Bitboard(0);

    /// Full bitboard (all 64 cells set).
    pub const FULL: Bitboard = Bitboard(!0);

    /// Column `a` (leftmost).
    pub const COLUMN_A: Bitboard = Bitboard(0x0101_0101_0101_0101);

    /// Column `h` (rightmost).
    pub const COLUMN_H: Bitboard = Bitboard(0x8080_8080_8080_8080);

    /// Row 1 (top).
    pub const ROW_1: Bitboard = Bitboard(0x0000_0000_0000_00FF);

    /// Row 8 (bottom).
    pub const ROW_8: Bitboard = Bitboard(0xFF00_0000_0000_0000);

    /// The four corner cells.
    pub const CORNERS: Bitboard = Bitboard(0x8100_0000_0000_0081);

    /// Create a bitboard from a raw `u64`.
    #[inline]
    pub const fn new(bits: u64) -> Bitboard {
        Bitboard(bits)
    }

    /// Return `true` if no bits are set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Return `true` if at least one bit is set.
    #[inline]
    pub const fn is_nonempty(self) -> bool {
        self.0 != 0
    }

    /// Count the number of set bits.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Return `true` if the given square's bit is set.
    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 & (1u64 << sq.index())) != 0
    }

    /// Return a new bitboard with the given square set.
    #[inline]
    pub const fn with(self, sq: Square) -> Bitboard {
        Bitboard(self.0 | (1u64 << sq.index()))
    }

    /// Return a new bitboard with the given square cleared.
    #[inline]
    pub const fn without(self, sq: Square) -> Bitboard {
        Bitboard(self.0 & !(1u64 << sq.index()))
    }
}

// --- Operator impls ---

impl BitAnd for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Bitboard) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.0 |= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

impl Shl<u8> for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn shl(self, rhs: u8) -> Bitboard {
        Bitboard(self.0 << rhs)
    }
}

impl Shr<u8> for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn shr(self, rhs: u8) -> Bitboard {
        Bitboard(self.0 >> rhs)
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Bitboard {
        iter.into_iter().fold(Bitboard::EMPTY, Bitboard::with)
    }
}

// --- Iterator (ascending index order) ---

impl Iterator for Bitboard {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            let sq = Square::from_index_unchecked(self.0.trailing_zeros() as u8);
            self.0 &= self.0 - 1;
            Some(sq)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.count() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for Bitboard {}

// --- Debug (8x8 grid, row 1 on top) ---

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "    a b c d e f g h")?;
        for row in 0..8 {
            write!(f, "  {} ", row + 1)?;
            for col in 0..8 {
                if (self.0 >> (row * 8 + col)) & 1 == 1 {
                    write!(f, "1 ")?;
                } else {
                    write!(f, ". ")?;
                }
            }
            if row < 7 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Bitboard;
    use crate::square::Square;

    #[test]
    fn empty_and_full() {
        assert!(Bitboard::EMPTY.is_empty());
        assert!(Bitboard::FULL.is_nonempty());
        assert_eq!(!Bitboard::EMPTY, Bitboard::FULL);
        assert_eq!(Bitboard::FULL.count(), 64);
    }

    #[test]
    fn set_contains_clear() {
        let bb = Bitboard::EMPTY.with(Square::E4);
        assert!(bb.contains(Square::E4));
        assert!(!bb.contains(Square::D4));
        assert!(bb.without(Square::E4).is_empty());
    }

    #[test]
    fn corners_mask() {
        let corners: Vec<_> = Bitboard::CORNERS.collect();
        assert_eq!(corners, vec![Square::A1, Square::H1, Square::A8, Square::H8]);
    }

    #[test]
    fn edge_masks() {
        assert_eq!(Bitboard::COLUMN_A.count(), 8);
        assert_eq!(Bitboard::COLUMN_H.count(), 8);
        assert_eq!(Bitboard::ROW_1 << 56, Bitboard::ROW_8);
        assert!(Bitboard::COLUMN_A.contains(Square::A8));
        assert!(Bitboard::COLUMN_H.contains(Square::H1));
    }

    #[test]
    fn iterator_is_ascending() {
        let bb = Bitboard::EMPTY.with(Square::H8).with(Square::A1).with(Square::E4);
        let squares: Vec<_> = bb.collect();
        assert_eq!(squares, vec![Square::A1, Square::E4, Square::H8]);
        assert_eq!(bb.len(), 3);
    }

    #[test]
    fn collect_from_squares() {
        let bb: Bitboard = [Square::D4, Square::E5].into_iter().collect();
        assert_eq!(bb.count(), 2);
        assert_eq!(bb.into_iter().next(), Some(Square::D4));
    }

    #[test]
    fn assign_operators() {
        let mut bb = Bitboard::ROW_1;
        bb |= Bitboard::ROW_8;
        assert_eq!(bb.count(), 16);
        bb &= Bitboard::COLUMN_A;
        assert_eq!(bb.count(), 2);
        assert_eq!(bb.collect::<Vec<_>>(), vec![Square::A1, Square::A8]);
    }
}
