//! Positional weight table.
//!
//! Indexed by square (row 1 first, a1 = 0). Corners are worth the most, the
//! X- and C-squares next to them are penalised, and edges are mildly
//! favoured. The table is symmetric under every rotation and reflection of
//! the board.

use reversi_core::Square;

/// Weight of a corner square, the table's maximum.
pub const CORNER_WEIGHT: i32 = 150;

#[rustfmt::skip]
pub const WEIGHTS: [i32; Square::COUNT] = [
    // Row 1
    150, -60,  20,  10,  10,  20, -60, 150,
    // Row 2
    -60,-100,  -5,  -5,  -5,  -5,-100, -60,
    // Row 3
     20,  -5,  10,   2,   2,  10,  -5,  20,
    // Row 4
     10,  -5,   2,   1,   1,   2,  -5,  10,
    // Row 5
     10,  -5,   2,   1,   1,   2,  -5,  10,
    // Row 6
     20,  -5,  10,   2,   2,  10,  -5,  20,
    // Row 7
    -60,-100,  -5,  -5,  -5,  -5,-100, -60,
    // Row 8
    150, -60,  20,  10,  10,  20, -60, 150,
];

/// Look up the positional weight of a square.
#[inline]
pub fn weight(sq: Square) -> i32 {
    WEIGHTS[sq.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(row: u8, col: u8) -> i32 {
        weight(Square::from_coords(row, col).unwrap())
    }

    #[test]
    fn table_is_symmetric() {
        for row in 0..8 {
            for col in 0..8 {
                let w = at(row, col);
                assert_eq!(w, at(7 - row, col), "vertical mirror at ({row}, {col})");
                assert_eq!(w, at(row, 7 - col), "horizontal mirror at ({row}, {col})");
                assert_eq!(w, at(col, row), "diagonal mirror at ({row}, {col})");
            }
        }
    }

    #[test]
    fn corners_hold_the_maximum() {
        let max = WEIGHTS.iter().copied().max().unwrap();
        assert_eq!(max, CORNER_WEIGHT);
        for sq in Square::all() {
            assert_eq!(weight(sq) == CORNER_WEIGHT, sq.is_corner(), "{sq}");
        }
    }

    #[test]
    fn x_squares_are_worst() {
        let min = WEIGHTS.iter().copied().min().unwrap();
        assert_eq!(min, -100);
        assert_eq!(at(1, 1), min);
        assert_eq!(at(6, 6), min);
    }
}
