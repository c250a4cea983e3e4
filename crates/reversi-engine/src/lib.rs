//! Evaluation and move search for reversi.

pub mod error;
pub mod eval;
pub mod search;

pub use error::PolicyError;
pub use eval::weights::{CORNER_WEIGHT, WEIGHTS};
pub use eval::{WIN_SCALE, evaluate};
pub use search::policy::{Depth, Difficulty, PhaseDepth, RootOrder, SearchPolicy, Strategy};
pub use search::{Decision, SearchResult, Searcher, select_move};
