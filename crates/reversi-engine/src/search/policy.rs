//! Difficulty tiers and the search policy each one maps to.

use std::fmt;
use std::str::FromStr;

use crate::error::PolicyError;
use crate::eval::DEFAULT_MOBILITY_WEIGHT;

/// Mobility multiplier used by the strongest tier.
pub const EXPERT_MOBILITY_WEIGHT: i32 = 30;

/// Player-selectable strength, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

impl Difficulty {
    /// All tiers in ascending strength.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
        Difficulty::Expert,
    ];

    /// Lower-case name used on the protocol.
    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
            Difficulty::Expert => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Difficulty, PolicyError> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PolicyError::UnknownDifficulty {
                found: s.to_string(),
            })
    }
}

/// How far to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// A fixed number of plies.
    Plies(u8),
    /// Search to the end of the game.
    Exhaustive,
}

impl Depth {
    /// Number of plies to search on a board with `empties` empty cells.
    ///
    /// Exhaustive depth allows one pass per placement plus the final pass
    /// check, so every line reaches a finished game.
    pub fn plies(self, empties: u32) -> u8 {
        match self {
            Depth::Plies(n) => n,
            Depth::Exhaustive => (2 * empties + 1).min(u8::MAX as u32) as u8,
        }
    }
}

/// Override that applies once the board has at most `max_empty` empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseDepth {
    pub max_empty: u32,
    pub depth: Depth,
}

/// Order in which root candidates are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootOrder {
    /// Random permutation; equal scores resolve unpredictably.
    Shuffled,
    /// Descending positional weight; fully deterministic.
    WeightSorted,
}

/// Move-choice strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    /// Most flips, with an occasional uniformly random move.
    Greedy { random_move_chance: f64 },
    /// Minimax with alpha-beta pruning.
    Search {
        base_depth: Depth,
        /// Checked in order; the first whose threshold admits the position wins.
        phase_depths: Vec<PhaseDepth>,
        root_order: RootOrder,
    },
}

/// Everything that parameterises a move decision.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPolicy {
    pub strategy: Strategy,
    pub mobility_weight: i32,
}

impl SearchPolicy {
    /// Build the policy for a difficulty tier.
    pub fn for_difficulty(difficulty: Difficulty) -> SearchPolicy {
        match difficulty {
            Difficulty::Beginner => SearchPolicy {
                strategy: Strategy::Greedy {
                    random_move_chance: 0.25,
                },
                mobility_weight: DEFAULT_MOBILITY_WEIGHT,
            },
            Difficulty::Intermediate => SearchPolicy {
                strategy: Strategy::Search {
                    base_depth: Depth::Plies(3),
                    phase_depths: Vec::new(),
                    root_order: RootOrder::Shuffled,
                },
                mobility_weight: DEFAULT_MOBILITY_WEIGHT,
            },
            Difficulty::Advanced => SearchPolicy {
                strategy: Strategy::Search {
                    base_depth: Depth::Plies(4),
                    phase_depths: vec![
                        PhaseDepth {
                            max_empty: 12,
                            depth: Depth::Exhaustive,
                        },
                        PhaseDepth {
                            max_empty: 20,
                            depth: Depth::Plies(6),
                        },
                    ],
                    root_order: RootOrder::Shuffled,
                },
                mobility_weight: DEFAULT_MOBILITY_WEIGHT,
            },
            Difficulty::Expert => SearchPolicy {
                strategy: Strategy::Search {
                    base_depth: Depth::Plies(6),
                    phase_depths: vec![
                        PhaseDepth {
                            max_empty: 14,
                            depth: Depth::Exhaustive,
                        },
                        PhaseDepth {
                            max_empty: 20,
                            depth: Depth::Plies(8),
                        },
                    ],
                    root_order: RootOrder::WeightSorted,
                },
                mobility_weight: EXPERT_MOBILITY_WEIGHT,
            },
        }
    }

    /// Depth to use on a board with `empties` empty cells, or `None` for a
    /// greedy policy.
    pub fn depth_for(&self, empties: u32) -> Option<Depth> {
        match &self.strategy {
            Strategy::Greedy { .. } => None,
            Strategy::Search {
                base_depth,
                phase_depths,
                ..
            } => Some(phase_depth(*base_depth, phase_depths, empties)),
        }
    }
}

/// First override admitting `empties`, else the base depth.
pub(crate) fn phase_depth(base_depth: Depth, phase_depths: &[PhaseDepth], empties: u32) -> Depth {
    phase_depths
        .iter()
        .find(|phase| empties <= phase.max_empty)
        .map_or(base_depth, |phase| phase.depth)
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::default())
    }
}

impl From<Difficulty> for SearchPolicy {
    fn from(difficulty: Difficulty) -> Self {
        Self::for_difficulty(difficulty)
    }
}
