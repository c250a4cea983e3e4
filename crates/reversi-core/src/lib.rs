//! Core Othello types: board representation, rule engine, and game sessions.

mod bitboard;
mod board;
mod direction;
mod error;
mod game;
mod notation;
mod perft;
mod player;
mod rules;
mod square;

pub use bitboard::Bitboard;
pub use board::{Board, Cell, PrettyBoard};
pub use direction::Direction;
pub use error::{BoardError, ParseError, PlayError};
pub use game::{Game, MatchScore, MoveRecord, Outcome, PlayReport, Turn};
pub use notation::STARTING_POSITION;
pub use perft::{divide, perft};
pub use player::Player;
pub use rules::{
    MoveList, apply_move, flippable_stones, has_legal_move, is_game_over, legal_moves_mask,
    valid_moves,
};
pub use square::Square;
