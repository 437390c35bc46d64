//! Expectiminimax search over stick-toss chance nodes.
//!
//! The tree alternates two node kinds:
//! - a **chance node** averages the value of all five rolls with the fixed
//!   stick distribution;
//! - a **decision node** maximizes (for the searching player) or minimizes
//!   (for the opponent) over the legal moves of one known roll, with
//!   alpha-beta cutoffs inside that roll's subtree.
//!
//! Bounds are never carried across different rolls of a chance node, and the
//! root evaluates every candidate's full chance value; only the classic
//! within-roll pruning is performed. Move ordering and the suicide filter are
//! applied to the searching player's own decision nodes only, so the model
//! never assumes the opponent shares the engine's risk aversion.

use crate::constants::{HAPPINESS, ROLL_PROBS};
use crate::eval::{evaluate, EvalWeights};
use crate::rules::{apply_move_unchecked, is_terminal, legal_moves, occupant, skip_turn};
use crate::state::{GameState, Move, MoveKind, Player};

/// Node and leaf counters for one search, returned alongside the result.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Chance nodes visited (including leaves).
    pub nodes: u64,
    /// Leaves evaluated.
    pub leafs: u64,
}

/// The outcome of one root search: the chosen move (`None` when the roll
/// allows no move and the caller must apply `skip_turn`), its expectiminimax
/// value, and the diagnostics accumulator.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub best: Option<Move>,
    pub value: f64,
    pub stats: SearchStats,
}

/// Drop moves that would vacate the happiness square on a small roll.
///
/// Rolls of 4 and 5 pass through untouched. Otherwise the happiness
/// resident's moves are withheld unless nothing else is legal. This is a
/// hand-authored pruning heuristic for the engine's own candidates, not a
/// rule of the game; opponent nodes must never be filtered with it.
pub fn filter_suicide_moves(state: &GameState, moves: Vec<Move>, roll: u8) -> Vec<Move> {
    if roll >= 4 {
        return moves;
    }
    let mine = state.pieces_of(state.turn);
    let (risky, safe): (Vec<Move>, Vec<Move>) = moves
        .into_iter()
        .partition(|mv| mine[mv.piece] == HAPPINESS);
    if safe.is_empty() { risky } else { safe }
}

/// Priority of a move for ordering, higher first. Exits lead (a happiness
/// piece exiting on a 5 above all), then captures by how deep they land,
/// then exact happiness landings, then already-advanced pieces, then
/// everything else by destination.
fn move_priority(state: &GameState, roll: u8, mv: Move) -> i64 {
    let pos = state.pieces_of(state.turn)[mv.piece];
    if mv.kind == MoveKind::Exit {
        return if pos == HAPPINESS {
            60_000_000
        } else {
            50_000_000
        };
    }
    let dest = pos + roll;
    if matches!(occupant(state, dest), Some((owner, _)) if owner != state.turn) {
        return 1_000_000 + i64::from(dest) * 10_000;
    }
    if dest == HAPPINESS {
        return 500_000;
    }
    if pos >= 20 {
        return i64::from(pos) * 1_000;
    }
    i64::from(dest)
}

/// Cheap pre-sort to maximize early alpha-beta cutoffs. The sort is stable,
/// so ties keep their generation order and the search stays reproducible.
pub fn order_moves(moves: &[Move], state: &GameState, roll: u8) -> Vec<Move> {
    let mut ordered = moves.to_vec();
    ordered.sort_by_key(|&mv| std::cmp::Reverse(move_priority(state, roll, mv)));
    ordered
}

/// Depth-limited expectiminimax searcher for one player.
///
/// The searcher owns its evaluation weights and diagnostics; there is no
/// ambient state, so concurrent searchers for different perspectives never
/// interfere. `pruning` exists so tests can assert that alpha-beta cutoffs
/// do not change the result.
pub struct Searcher {
    ai: Player,
    weights: EvalWeights,
    pruning: bool,
    stats: SearchStats,
}

impl Searcher {
    /// A searcher for `ai` with the default weight table and pruning on.
    pub fn new(ai: Player) -> Searcher {
        Searcher::with_weights(ai, EvalWeights::default())
    }

    /// A searcher with an injected weight table.
    pub fn with_weights(ai: Player, weights: EvalWeights) -> Searcher {
        Searcher {
            ai,
            weights,
            pruning: true,
            stats: SearchStats::default(),
        }
    }

    /// Enable or disable alpha-beta cutoffs. The best value is identical
    /// either way, and under the current per-roll window policy so are the
    /// node counts (see the note on `value_after_roll`).
    pub fn set_pruning(&mut self, on: bool) {
        self.pruning = on;
    }

    /// Diagnostics from the most recent [`choose`](Searcher::choose) call.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Root search: pick the best move for the current roll, or `None` when
    /// no move is legal (the caller must then apply `skip_turn`).
    pub fn choose(&mut self, state: &GameState, depth: i32, roll: u8) -> (Option<Move>, f64) {
        self.stats = SearchStats::default();

        let raw = legal_moves(state, roll);
        let moves = if state.turn == self.ai {
            order_moves(&filter_suicide_moves(state, raw, roll), state, roll)
        } else {
            raw
        };

        if moves.is_empty() {
            let value = self.value_turn(&skip_turn(state, roll), depth - 1);
            return (None, value);
        }

        let mut best_move = None;
        let mut best_value = f64::NEG_INFINITY;
        for mv in moves {
            let child = apply_move_unchecked(state, roll, mv);
            let value = self.value_turn(&child, depth - 1);
            if value > best_value {
                best_value = value;
                best_move = Some(mv);
            }
        }
        (best_move, best_value)
    }

    /// Chance node: leaf at the depth horizon or a finished game, otherwise
    /// the probability-weighted expectation over the five rolls. Each roll's
    /// decision subtree starts with a fresh alpha-beta window.
    fn value_turn(&mut self, state: &GameState, depth: i32) -> f64 {
        self.stats.nodes += 1;
        if depth <= 0 || is_terminal(state) {
            self.stats.leafs += 1;
            return evaluate(state, self.ai, &self.weights);
        }

        let mut expectation = 0.0;
        for (roll, prob) in ROLL_PROBS {
            let value =
                self.value_after_roll(state, depth, roll, f64::NEG_INFINITY, f64::INFINITY);
            expectation += prob * value;
        }
        expectation
    }

    /// Decision node for a known roll. The searching player's moves are
    /// filtered and ordered; the opponent's are taken raw. An empty move
    /// list degrades to the forced skip with no branching.
    ///
    /// Note on the cutoff: because chance nodes open every decision subtree
    /// with a fresh `(-inf, +inf)` window and bounds are never threaded
    /// through `value_turn`, one of the two bounds
    /// stays infinite inside any single move loop and `beta <= alpha` cannot
    /// currently fire. The machinery is kept in the shape that would prune
    /// if bounds were ever narrowed across plies; do not go hunting for a
    /// pruning bug when node counts match with pruning disabled.
    fn value_after_roll(
        &mut self,
        state: &GameState,
        depth: i32,
        roll: u8,
        mut alpha: f64,
        mut beta: f64,
    ) -> f64 {
        let raw = legal_moves(state, roll);
        let moves = if state.turn == self.ai {
            order_moves(&filter_suicide_moves(state, raw, roll), state, roll)
        } else {
            raw
        };

        if moves.is_empty() {
            return self.value_turn(&skip_turn(state, roll), depth - 1);
        }

        let maximizing = state.turn == self.ai;
        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        for mv in moves {
            let child = apply_move_unchecked(state, roll, mv);
            let value = self.value_turn(&child, depth - 1);
            if maximizing {
                best = best.max(value);
                alpha = alpha.max(best);
            } else {
                best = best.min(value);
                beta = beta.min(best);
            }
            if self.pruning && beta <= alpha {
                break;
            }
        }
        best
    }
}

/// One-shot search entry point: choose a move for `ai` given the roll.
pub fn choose_move(state: &GameState, ai: Player, depth: i32, roll: u8) -> SearchOutcome {
    let mut searcher = Searcher::new(ai);
    let (best, value) = searcher.choose(state, depth, roll);
    SearchOutcome {
        best,
        value,
        stats: searcher.stats(),
    }
}
