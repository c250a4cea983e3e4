//! Protocol errors.

use reversi_core::{ParseError, PlayError};

/// Errors that can occur during protocol handling.
#[derive(Debug, thiserror::Error)]
pub enum ProtoError {
    /// The `position` command is missing `startpos` or `board` keyword.
    #[error("malformed position command: expected startpos or board")]
    MalformedPosition,

    /// A board string could not be parsed.
    #[error("invalid board \"{board}\": {source}")]
    InvalidBoard {
        /// The rejected board text.
        board: String,
        source: ParseError,
    },

    /// The side-to-move token of `position board` was not recognised.
    #[error("invalid side to move: {source}")]
    InvalidPlayer { source: ParseError },

    /// A move token was neither a square nor `pass`.
    #[error("invalid move: {token}")]
    InvalidMove {
        /// The rejected token.
        token: String,
    },

    /// A well-formed move was refused by the game session.
    #[error("illegal move {token}: {source}")]
    IllegalMove {
        /// The refused move.
        token: String,
        source: PlayError,
    },

    /// A command needs an argument that was not given.
    #[error("missing value for {command}")]
    MissingValue {
        /// The command or option missing its argument.
        command: String,
    },

    /// `setoption` was not of the form `name <id> value <x>`.
    #[error("malformed setoption command")]
    MalformedOption,

    /// `setoption` named an option the engine does not have.
    #[error("unknown option: {name}")]
    UnknownOption {
        /// The rejected option name.
        name: String,
    },

    /// An option or count value could not be parsed.
    #[error("invalid value for {name}: {value}")]
    InvalidValue {
        /// Option or command the value belongs to.
        name: String,
        /// The rejected value.
        value: String,
    },

    /// An I/O error occurred while reading input or writing responses.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
