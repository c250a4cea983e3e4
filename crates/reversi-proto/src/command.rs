//! Protocol command parsing.

use std::fmt;

use reversi_core::{Board, Game, Player, Square, Turn};
use reversi_engine::Difficulty;

use crate::error::ProtoError;

/// A move token: a square or an explicit pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveToken {
    Place(Square),
    Pass,
}

impl MoveToken {
    /// Parse `pass` or an algebraic square such as `d3`.
    pub fn parse(token: &str) -> Result<MoveToken, ProtoError> {
        if token.eq_ignore_ascii_case("pass") {
            return Ok(MoveToken::Pass);
        }
        token
            .parse::<Square>()
            .map(MoveToken::Place)
            .map_err(|_| ProtoError::InvalidMove {
                token: token.to_string(),
            })
    }

    /// Apply this move to `game` for the side to move.
    pub fn apply(self, game: &mut Game) -> Result<Turn, ProtoError> {
        let result = match self {
            MoveToken::Place(sq) => game.play(sq).map(|report| report.turn),
            MoveToken::Pass => game.pass(),
        };
        result.map_err(|source| ProtoError::IllegalMove {
            token: self.to_string(),
            source,
        })
    }
}

impl fmt::Display for MoveToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveToken::Place(sq) => write!(f, "{sq}"),
            MoveToken::Pass => f.write_str("pass"),
        }
    }
}

/// An engine option set through `setoption`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineOption {
    /// AI difficulty tier.
    Level(Difficulty),
    /// Seed for the AI's random source.
    Seed(u64),
}

/// A parsed protocol command.
#[derive(Debug)]
pub enum Command {
    /// `reversi` -- identify the engine.
    Reversi,
    /// `isready` -- synchronization ping.
    IsReady,
    /// `newgame` -- start a fresh game, keeping the match tally.
    NewGame,
    /// `position` -- set up a session with optional moves replayed.
    Position(Game),
    /// `setoption` -- change an engine option.
    SetOption(EngineOption),
    /// `go` -- choose a move for the side to move.
    Go,
    /// `play` -- apply a move for the side to move.
    Play(MoveToken),
    /// `moves` -- list legal moves.
    Moves,
    /// `undo [n]` -- take back moves.
    Undo(usize),
    /// `d` -- display the board.
    Display,
    /// `score` -- show the match tally.
    Score,
    /// `quit` -- exit the engine.
    Quit,
    /// Unrecognized command (silently ignored).
    Unknown(String),
}

/// Parse a single line of input into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, ProtoError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Ok(Command::Unknown(String::new()));
    }

    match tokens[0] {
        "reversi" => Ok(Command::Reversi),
        "isready" => Ok(Command::IsReady),
        "newgame" => Ok(Command::NewGame),
        "position" => parse_position(&tokens[1..]),
        "setoption" => parse_setoption(&tokens[1..]),
        "go" => Ok(Command::Go),
        "play" => {
            let token = tokens.get(1).ok_or_else(|| ProtoError::MissingValue {
                command: "play".to_string(),
            })?;
            Ok(Command::Play(MoveToken::parse(token)?))
        }
        "moves" => Ok(Command::Moves),
        "undo" => parse_undo(&tokens[1..]),
        "d" => Ok(Command::Display),
        "score" => Ok(Command::Score),
        "quit" => Ok(Command::Quit),
        _ => Ok(Command::Unknown(tokens[0].to_string())),
    }
}

/// Parse the `position` command arguments.
///
/// Supports:
/// - `position startpos [moves d3 c3 ...]`
/// - `position board <64 cells> <b|w> [moves ...]`
///
/// Passes forced by a placement happen automatically while replaying, so a
/// `pass` token is only needed when the side to move starts without a move.
fn parse_position(tokens: &[&str]) -> Result<Command, ProtoError> {
    if tokens.is_empty() {
        return Err(ProtoError::MalformedPosition);
    }

    let (mut game, rest) = if tokens[0] == "startpos" {
        (Game::new(), &tokens[1..])
    } else if tokens[0] == "board" {
        let cells = tokens.get(1).ok_or(ProtoError::MalformedPosition)?;
        let side = tokens.get(2).ok_or(ProtoError::MalformedPosition)?;
        let board: Board = cells.parse().map_err(|source| ProtoError::InvalidBoard {
            board: cells.to_string(),
            source,
        })?;
        let to_move: Player = side
            .parse()
            .map_err(|source| ProtoError::InvalidPlayer { source })?;
        (Game::from_position(board, to_move), &tokens[3..])
    } else {
        return Err(ProtoError::MalformedPosition);
    };

    if !rest.is_empty() && rest[0] == "moves" {
        for token in &rest[1..] {
            MoveToken::parse(token)?.apply(&mut game)?;
        }
    }

    Ok(Command::Position(game))
}

/// Parse `setoption name <id> value <x>`.
fn parse_setoption(tokens: &[&str]) -> Result<Command, ProtoError> {
    if tokens.first() != Some(&"name") {
        return Err(ProtoError::MalformedOption);
    }
    let value_at = tokens
        .iter()
        .position(|&t| t == "value")
        .ok_or(ProtoError::MalformedOption)?;
    let name = tokens[1..value_at].join(" ");
    let value = tokens[value_at + 1..].join(" ");
    if name.is_empty() {
        return Err(ProtoError::MalformedOption);
    }
    if value.is_empty() {
        return Err(ProtoError::MissingValue { command: name });
    }

    let invalid = || ProtoError::InvalidValue {
        name: name.clone(),
        value: value.clone(),
    };

    let option = match name.to_ascii_lowercase().as_str() {
        "level" => EngineOption::Level(value.parse().map_err(|_| invalid())?),
        "seed" => EngineOption::Seed(value.parse().map_err(|_| invalid())?),
        _ => return Err(ProtoError::UnknownOption { name }),
    };
    Ok(Command::SetOption(option))
}

/// Parse `undo [n]`, defaulting to one move.
fn parse_undo(tokens: &[&str]) -> Result<Command, ProtoError> {
    let Some(value) = tokens.first() else {
        return Ok(Command::Undo(1));
    };
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(Command::Undo(n)),
        _ => Err(ProtoError::InvalidValue {
            name: "undo".to_string(),
            value: value.to_string(),
        }),
    }
}
