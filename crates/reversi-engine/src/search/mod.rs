//! Move selection: corner grabs, greedy play and minimax search.

pub mod greedy;
pub mod minimax;
pub mod ordering;
pub mod policy;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use reversi_core::{Board, Player, Square, apply_move, valid_moves};
use tracing::{debug, trace};

use crate::eval::weights::{CORNER_WEIGHT, weight};
use minimax::{INF, SearchContext, minimax};
use ordering::sort_by_weight;
use policy::{Depth, Difficulty, RootOrder, SearchPolicy, Strategy, phase_depth};

/// How a move was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// No legal move: the side must pass.
    NoMove,
    /// A corner was available and taken without searching.
    Corner,
    /// Most flips.
    Greedy,
    /// Uniformly random legal move.
    Random,
    /// Minimax search.
    Searched,
}

/// Result of a move decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Chosen move, `None` when the side has to pass.
    pub best_move: Option<Square>,
    /// Minimax score from the AI's perspective (searched moves only).
    pub score: Option<i32>,
    /// Total nodes visited.
    pub nodes: u64,
    /// Plies searched (0 when no search ran).
    pub depth: u8,
    pub decision: Decision,
}

impl SearchResult {
    fn unsearched(best_move: Option<Square>, decision: Decision) -> Self {
        Self {
            best_move,
            score: None,
            nodes: 0,
            depth: 0,
            decision,
        }
    }
}

/// Choose a move for `ai` under `policy`.
///
/// Returns `best_move: None` when `ai` has no legal move. A corner is taken
/// immediately whenever one is legal. The input board is never modified.
pub fn select_move<R: Rng + ?Sized>(
    board: &Board,
    ai: Player,
    policy: &SearchPolicy,
    rng: &mut R,
) -> SearchResult {
    let moves = valid_moves(board, ai);
    if moves.is_empty() {
        debug!(player = ai.name(), "no legal move");
        return SearchResult::unsearched(None, Decision::NoMove);
    }

    if let Some(&corner) = moves.as_slice().iter().find(|&&sq| weight(sq) == CORNER_WEIGHT) {
        debug!(player = ai.name(), square = %corner, "corner available");
        return SearchResult::unsearched(Some(corner), Decision::Corner);
    }

    match &policy.strategy {
        Strategy::Greedy { random_move_chance } => {
            if let Some(mv) = greedy::random_move(&moves, *random_move_chance, rng) {
                debug!(player = ai.name(), square = %mv, "random move");
                return SearchResult::unsearched(Some(mv), Decision::Random);
            }
            let mv = greedy::most_flips(board, ai, &moves);
            debug!(player = ai.name(), square = ?mv, "greedy move");
            SearchResult::unsearched(mv, Decision::Greedy)
        }
        Strategy::Search {
            base_depth,
            phase_depths,
            root_order,
        } => {
            let empties = board.empty_count();
            let depth = phase_depth(*base_depth, phase_depths, empties);

            let mut root = moves.as_slice().to_vec();
            match root_order {
                RootOrder::Shuffled => root.shuffle(rng),
                RootOrder::WeightSorted => sort_by_weight(&mut root),
            }

            search_root(board, ai, &root, depth, policy.mobility_weight)
        }
    }
}

/// Search every root candidate in the given order and keep the first best.
fn search_root(
    board: &Board,
    ai: Player,
    root: &[Square],
    depth: Depth,
    mobility_weight: i32,
) -> SearchResult {
    let plies = depth.plies(board.empty_count()).max(1);
    let mut ctx = SearchContext::new(ai, mobility_weight);
    let mut alpha = -INF;
    let mut best: Option<(Square, i32)> = None;

    for &mv in root {
        let child = apply_move(board, mv, ai);
        let score = minimax(&child, plies - 1, alpha, INF, false, &mut ctx);
        trace!(square = %mv, score, "root move");

        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((mv, score));
            alpha = alpha.max(score);
        }
    }

    debug!(
        player = ai.name(),
        square = ?best.map(|(mv, _)| mv),
        score = ?best.map(|(_, score)| score),
        depth = plies,
        nodes = ctx.nodes,
        "search complete"
    );

    SearchResult {
        best_move: best.map(|(mv, _)| mv),
        score: best.map(|(_, score)| score),
        nodes: ctx.nodes,
        depth: plies,
        decision: Decision::Searched,
    }
}

/// A search policy bundled with its random source.
///
/// `Searcher` is `Send`, so a host can move it onto a worker thread for the
/// duration of a search and take it back afterwards.
pub struct Searcher {
    policy: SearchPolicy,
    rng: StdRng,
}

impl Searcher {
    /// Create a searcher for `difficulty`, seeded from system entropy.
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            policy: SearchPolicy::for_difficulty(difficulty),
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a searcher with a fixed seed for reproducible play.
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_policy(SearchPolicy::for_difficulty(difficulty), seed)
    }

    /// Create a searcher for a custom policy.
    pub fn with_policy(policy: SearchPolicy, seed: u64) -> Self {
        Self {
            policy,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The active policy.
    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    /// Switch to the policy of another difficulty tier.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.policy = SearchPolicy::for_difficulty(difficulty);
    }

    /// Restart the random source from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Choose a move for `ai` on `board`.
    pub fn select_move(&mut self, board: &Board, ai: Player) -> SearchResult {
        select_move(board, ai, &self.policy, &mut self.rng)
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn searcher_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Searcher>();
    }

    #[test]
    fn no_move_means_pass() {
        let board: Board = format!("XO{}", "-".repeat(62)).parse().unwrap();
        let mut searcher = Searcher::with_seed(Difficulty::Expert, 1);
        let result = searcher.select_move(&board, Player::White);
        assert_eq!(result.best_move, None);
        assert_eq!(result.decision, Decision::NoMove);
        assert_eq!(result.nodes, 0);
    }

    #[test]
    fn weight_sorted_search_is_deterministic() {
        let board = Board::starting_position();
        let policy = SearchPolicy::for_difficulty(Difficulty::Expert);
        let mut a = StdRng::seed_from_u64(1);
        let mut b = StdRng::seed_from_u64(99);
        let first = select_move(&board, Player::Black, &policy, &mut a);
        let second = select_move(&board, Player::Black, &policy, &mut b);
        assert_eq!(first, second);
        assert_eq!(first.decision, Decision::Searched);
        assert_eq!(first.depth, 6);
        assert!(first.nodes > 0);
    }

    #[test]
    fn root_ties_go_to_first_candidate() {
        // The four opening moves are symmetric, so they all score the same and
        // the weight-sorted order (ascending index on ties) picks d3.
        let policy = SearchPolicy {
            strategy: Strategy::Search {
                base_depth: Depth::Plies(2),
                phase_depths: Vec::new(),
                root_order: RootOrder::WeightSorted,
            },
            mobility_weight: 20,
        };
        let mut rng = StdRng::seed_from_u64(0);
        let result = select_move(&Board::starting_position(), Player::Black, &policy, &mut rng);
        assert_eq!(result.best_move, Some(sq("d3")));
    }

    #[test]
    fn greedy_without_randomness_takes_most_flips() {
        let policy = SearchPolicy {
            strategy: Strategy::Greedy {
                random_move_chance: 0.0,
            },
            mobility_weight: 20,
        };
        let mut rng = StdRng::seed_from_u64(0);
        let result = select_move(&Board::starting_position(), Player::Black, &policy, &mut rng);
        assert_eq!(result.decision, Decision::Greedy);
        assert_eq!(result.best_move, Some(sq("d3")));
        assert_eq!(result.score, None);
    }

    #[test]
    fn input_board_is_untouched() {
        let board = Board::starting_position();
        let copy = board;
        let mut searcher = Searcher::with_seed(Difficulty::Advanced, 5);
        let _ = searcher.select_move(&board, Player::Black);
        assert_eq!(board, copy);
    }
}
