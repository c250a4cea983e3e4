//! Text notation for boards, squares and players.
//!
//! A board is written as 64 cell characters in index order (row 1 first):
//! `X` for black, `O` for white, `-` for empty. Parsing also accepts `B`/`*`
//! for black, `W` for white and `.` for empty, and ignores whitespace and `/`
//! so row-separated layouts can be pasted directly.

use std::fmt;
use std::str::FromStr;

use crate::board::{Board, Cell};
use crate::error::ParseError;
use crate::player::Player;
use crate::square::Square;

/// The starting position in compact notation.
pub const STARTING_POSITION: &str =
    "---------------------------OX------XO---------------------------";

impl FromStr for Board {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Board, ParseError> {
        let mut board = Board::EMPTY;
        let mut count: usize = 0;

        for c in s.chars().filter(|c| !c.is_whitespace() && *c != '/') {
            let cell = match c {
                'X' | 'x' | 'B' | 'b' | '*' => Cell::Black,
                'O' | 'o' | 'W' | 'w' => Cell::White,
                '-' | '.' => Cell::Empty,
                _ => return Err(ParseError::InvalidCellChar { character: c }),
            };

            if count < Square::COUNT
                && let Some(sq) = Square::from_index(count as u8)
            {
                board = board.with_cell(sq, cell);
            }
            count += 1;
        }

        if count != Square::COUNT {
            return Err(ParseError::WrongCellCount { found: count });
        }

        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sq in Square::all() {
            let c = match self.cell(sq) {
                Cell::Black => 'X',
                Cell::White => 'O',
                Cell::Empty => '-',
            };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl FromStr for Square {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Square, ParseError> {
        Square::from_algebraic(s).ok_or_else(|| ParseError::InvalidSquare {
            found: s.to_string(),
        })
    }
}

impl FromStr for Player {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Player, ParseError> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "black" | "x" => Ok(Player::Black),
            "w" | "white" | "o" => Ok(Player::White),
            _ => Err(ParseError::InvalidPlayer {
                found: s.to_string(),
            }),
        }
    }
}
