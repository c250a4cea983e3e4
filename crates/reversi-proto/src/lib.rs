//! Line-oriented text protocol for driving a reversi session.

pub mod command;
pub mod engine;
pub mod error;

pub use command::{Command, EngineOption, MoveToken, parse_command};
pub use engine::{EngineConfig, ReversiEngine};
pub use error::ProtoError;
