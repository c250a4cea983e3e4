//! Error types for notation parsing, board construction and session play.

use crate::player::Player;
use crate::square::Square;

/// Errors that occur when parsing squares, players or board strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A square was not in `a1`..`h8` form.
    #[error("invalid square: \"{found}\"")]
    InvalidSquare {
        /// The rejected text.
        found: String,
    },
    /// A player token was not one of `b`, `w`, `black`, `white`, `x`, `o`.
    #[error("invalid player: \"{found}\"")]
    InvalidPlayer {
        /// The rejected text.
        found: String,
    },
    /// The board string does not describe exactly 64 cells.
    #[error("expected 64 cells, found {found}")]
    WrongCellCount {
        /// Number of cells described.
        found: usize,
    },
    /// An unrecognized character appeared in the board string.
    #[error("invalid cell character: '{character}'")]
    InvalidCellChar {
        /// The invalid character.
        character: char,
    },
}

/// Errors from structural validation of a [`Board`](crate::board::Board).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// A cell is claimed by both players.
    #[error("black and white stones overlap on {count} cells")]
    Overlap {
        /// Number of doubly-claimed cells.
        count: u32,
    },
}

/// Rejected session actions.
///
/// These are ordinary game states surfaced to the caller, not faults.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayError {
    /// The cell is occupied or would flip nothing.
    #[error("illegal placement at {square}")]
    IllegalPlacement {
        /// The rejected cell.
        square: Square,
    },
    /// The game has already ended.
    #[error("the game is over")]
    GameOver,
    /// A pass was requested while the side to move still has a legal move.
    #[error("{} has a legal move and cannot pass", .player.name())]
    PassNotAllowed {
        /// The side that tried to pass.
        player: Player,
    },
    /// There is no recorded move to take back.
    #[error("nothing to undo")]
    NothingToUndo,
}
