//! The eight ray directions used by the flip rule.

use crate::bitboard::Bitboard;

/// A compass direction on the board; north is towards row 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    West,
    East,
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Direction {
    /// All directions: orthogonal first, then diagonal.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// Return the `(row, column)` step of this direction.
    #[inline]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
            Direction::East => (0, 1),
            Direction::NorthWest => (-1, -1),
            Direction::NorthEast => (-1, 1),
            Direction::SouthWest => (1, -1),
            Direction::SouthEast => (1, 1),
        }
    }

    /// Move every cell of `bb` one step in this direction.
    ///
    /// Cells that would leave the board are dropped; nothing wraps from one
    /// edge column to the other.
    #[inline]
    pub fn shift(self, bb: Bitboard) -> Bitboard {
        match self {
            Direction::North => bb >> 8,
            Direction::South => bb << 8,
            Direction::West => (bb >> 1) & !Bitboard::COLUMN_H,
            Direction::East => (bb << 1) & !Bitboard::COLUMN_A,
            Direction::NorthWest => (bb >> 9) & !Bitboard::COLUMN_H,
            Direction::NorthEast => (bb >> 7) & !Bitboard::COLUMN_A,
            Direction::SouthWest => (bb << 7) & !Bitboard::COLUMN_H,
            Direction::SouthEast => (bb << 9) & !Bitboard::COLUMN_A,
        }
    }
}
