//! Game session: turn order, automatic passes, game end, and take-backs.

use std::cmp::Ordering;

use tracing::debug;

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::error::PlayError;
use crate::player::Player;
use crate::rules::{
    MoveList, apply_move, flippable_stones, has_legal_move, is_game_over, valid_moves,
};
use crate::square::Square;

/// Final result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Player),
    Draw,
}

impl Outcome {
    /// Decide the result from final stone counts.
    pub fn from_board(board: &Board) -> Outcome {
        match board.count(Player::Black).cmp(&board.count(Player::White)) {
            Ordering::Greater => Outcome::Winner(Player::Black),
            Ordering::Less => Outcome::Winner(Player::White),
            Ordering::Equal => Outcome::Draw,
        }
    }
}

/// Snapshot taken before each placement (or explicit pass), used for undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    /// Position before the move.
    pub board: Board,
    /// Side that was to move.
    pub to_move: Player,
    /// Cell that was played, `None` for a pass.
    pub last_move: Option<Square>,
}

/// Who moves after a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// The opponent moves next.
    Next(Player),
    /// `passed` had no legal move and was skipped; `to_move` plays again.
    Passed { passed: Player, to_move: Player },
    /// Neither side can move.
    GameOver(Outcome),
}

/// Summary of an accepted placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayReport {
    pub player: Player,
    pub square: Square,
    pub flipped: Bitboard,
    pub turn: Turn,
}

/// A single game in progress.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    to_move: Player,
    history: Vec<MoveRecord>,
    outcome: Option<Outcome>,
}

impl Game {
    /// Start from the standard position with Black to move.
    pub fn new() -> Game {
        Game::from_position(Board::starting_position(), Player::Black)
    }

    /// Start from an arbitrary position.
    pub fn from_position(board: Board, to_move: Player) -> Game {
        let outcome = is_game_over(&board).then(|| Outcome::from_board(&board));
        Game {
            board,
            to_move,
            history: Vec::new(),
            outcome,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    #[inline]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// The most recent placement, if any.
    pub fn last_move(&self) -> Option<Square> {
        self.history.last().and_then(|record| record.last_move)
    }

    /// Legal placements for the side to move (empty once the game is over).
    pub fn legal_moves(&self) -> MoveList {
        if self.outcome.is_some() {
            return MoveList::new();
        }
        valid_moves(&self.board, self.to_move)
    }

    /// Stone counts as `(black, white)`.
    pub fn counts(&self) -> (u32, u32) {
        (self.board.count(Player::Black), self.board.count(Player::White))
    }

    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Place a stone for the side to move and advance the turn.
    pub fn play(&mut self, sq: Square) -> Result<PlayReport, PlayError> {
        if self.outcome.is_some() {
            return Err(PlayError::GameOver);
        }

        let player = self.to_move;
        let flipped = flippable_stones(&self.board, sq, player);
        if flipped.is_empty() {
            return Err(PlayError::IllegalPlacement { square: sq });
        }

        self.history.push(MoveRecord {
            board: self.board,
            to_move: player,
            last_move: Some(sq),
        });
        self.board = apply_move(&self.board, sq, player);
        debug!(player = player.name(), square = %sq, flipped = flipped.count(), "stone placed");

        let turn = self.advance_turn();
        Ok(PlayReport {
            player,
            square: sq,
            flipped,
            turn,
        })
    }

    /// Skip the turn of a side that has no legal placement.
    ///
    /// Only needed for positions set up by hand: [`play`](Self::play) already
    /// passes automatically.
    pub fn pass(&mut self) -> Result<Turn, PlayError> {
        if self.outcome.is_some() {
            return Err(PlayError::GameOver);
        }
        if has_legal_move(&self.board, self.to_move) {
            return Err(PlayError::PassNotAllowed {
                player: self.to_move,
            });
        }

        self.history.push(MoveRecord {
            board: self.board,
            to_move: self.to_move,
            last_move: None,
        });
        self.to_move = !self.to_move;
        Ok(Turn::Next(self.to_move))
    }

    /// Take back the most recent placement or pass.
    pub fn undo(&mut self) -> Result<MoveRecord, PlayError> {
        let record = self.history.pop().ok_or(PlayError::NothingToUndo)?;
        self.board = record.board;
        self.to_move = record.to_move;
        self.outcome = None;
        debug!(to_move = self.to_move.name(), "move taken back");
        Ok(record)
    }

    /// Take back up to `n` moves, returning how many were undone.
    pub fn undo_turns(&mut self, n: usize) -> Result<usize, PlayError> {
        if self.history.is_empty() {
            return Err(PlayError::NothingToUndo);
        }
        let steps = n.min(self.history.len());
        for _ in 0..steps {
            self.undo()?;
        }
        Ok(steps)
    }

    /// Hand the turn to the opponent, passing it automatically when it has no
    /// move, or end the game when neither side can move.
    fn advance_turn(&mut self) -> Turn {
        let mover = self.to_move;
        let opponent = !mover;

        if has_legal_move(&self.board, opponent) {
            self.to_move = opponent;
            return Turn::Next(opponent);
        }

        if has_legal_move(&self.board, mover) {
            debug!(passed = opponent.name(), "no legal move, turn passes");
            return Turn::Passed {
                passed: opponent,
                to_move: mover,
            };
        }

        let outcome = Outcome::from_board(&self.board);
        self.outcome = Some(outcome);
        self.to_move = opponent;
        debug!(
            ?outcome,
            black = self.board.count(Player::Black),
            white = self.board.count(Player::White),
            "game over"
        );
        Turn::GameOver(outcome)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Running tally of results across rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchScore {
    pub black: u32,
    pub white: u32,
    pub draws: u32,
}

impl MatchScore {
    /// Add a finished game to the tally.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Winner(Player::Black) => self.black += 1,
            Outcome::Winner(Player::White) => self.white += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    /// Remove a result added by [`record`](Self::record), for a finished game
    /// that was reopened by undo.
    pub fn retract(&mut self, outcome: Outcome) {
        let slot = match outcome {
            Outcome::Winner(Player::Black) => &mut self.black,
            Outcome::Winner(Player::White) => &mut self.white,
            Outcome::Draw => &mut self.draws,
        };
        *slot = slot.saturating_sub(1);
    }

    /// Total number of games recorded.
    pub fn games(&self) -> u32 {
        self.black + self.white + self.draws
    }
}
