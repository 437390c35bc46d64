//! Positional evaluation.
//!
//! [`evaluate`] scores a position from one player's perspective as a weighted
//! sum of features. The weights live in [`EvalWeights`] so alternative
//! tunings can be swapped in without touching the search. The magnitudes are
//! tiered: promotions dominate everything, special-square occupancy dominates
//! raw progress, progress and vanguard bonuses dominate the tactical terms.
//!
//! The score is per-perspective, not zero-sum: opponent features carry their
//! own independently tuned weights, so `evaluate(s, Black)` is not in general
//! the negation of `evaluate(s, White)`.

use crate::constants::{HAPPINESS, HORUS, OUT, RE_ATOUM, REBIRTH, THREE_TRUTHS, WATER};
use crate::state::{GameState, Player};

/// Tunable evaluation coefficients. All terms are added from the scored
/// player's perspective; negative defaults mark liabilities.
#[derive(Clone, Debug)]
pub struct EvalWeights {
    /// Per own promoted piece. Dominates every other term.
    pub promoted: f64,
    /// Per opponent promoted piece (negative).
    pub opp_promoted: f64,
    /// Own piece on the happiness square.
    pub happiness: f64,
    /// Own piece on the Horus square, one matching roll from promotion.
    pub horus: f64,
    /// Own piece on the Three Truths square.
    pub three_truths: f64,
    /// Own piece on the Re-Atoum square.
    pub re_atoum: f64,
    /// Own piece on the water square (negative; transient states only).
    pub water: f64,
    /// Own piece on the approach squares 24 and 25, where most rolls are
    /// dead and the happiness stop looms (negative).
    pub water_approach: f64,
    /// Own piece parked on the rebirth square (negative, mildly).
    pub rebirth: f64,
    /// Per step of own remaining distance to the exit (negative).
    pub own_step: f64,
    /// Per step of opponent remaining distance (positive: their lag is
    /// our lead). Independently tuned; not forced to mirror `own_step`.
    pub opp_step: f64,
    /// Per square beyond 19 for an own piece at 20 or further.
    pub vanguard: f64,
    /// Own piece in the 20..=26 zone with an opponent piece within reach
    /// behind it, denying passage.
    pub blockade: f64,
    /// Own piece jammed in 20..=25 behind an own happiness resident
    /// (negative).
    pub jam: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        EvalWeights {
            promoted: 100_000.0,
            opp_promoted: -15_000.0,
            happiness: 2_500.0,
            horus: 4_000.0,
            three_truths: 1_500.0,
            re_atoum: 1_800.0,
            water: -5_000.0,
            water_approach: -800.0,
            rebirth: -300.0,
            own_step: -10.0,
            opp_step: 15.0,
            vanguard: 40.0,
            blockade: 25.0,
            jam: -20.0,
        }
    }
}

/// Score `state` from `player`'s perspective. Deterministic and
/// side-effect-free; higher is better for `player`.
pub fn evaluate(state: &GameState, player: Player, w: &EvalWeights) -> f64 {
    let mine = state.pieces_of(player);
    let theirs = state.pieces_of(player.opponent());

    let mut score = 0.0;
    let mut happiness_held = false;

    for &pos in mine {
        if pos == OUT {
            score += w.promoted;
            continue;
        }
        score += w.own_step * f64::from(31 - u16::from(pos));
        match pos {
            HAPPINESS => {
                score += w.happiness;
                happiness_held = true;
            }
            HORUS => score += w.horus,
            THREE_TRUTHS => score += w.three_truths,
            RE_ATOUM => score += w.re_atoum,
            WATER => score += w.water,
            24 | 25 => score += w.water_approach,
            REBIRTH => score += w.rebirth,
            _ => {}
        }
        if pos >= 20 {
            score += w.vanguard * f64::from(pos - 19);
        }
    }

    for &pos in theirs {
        if pos == OUT {
            score += w.opp_promoted;
            continue;
        }
        score += w.opp_step * f64::from(31 - u16::from(pos));
    }

    // Tactical terms, finest-grained tier.
    for &pos in mine {
        if (20..=HAPPINESS).contains(&pos)
            && theirs
                .iter()
                .any(|&t| t != OUT && t < pos && pos - t <= 5)
        {
            score += w.blockade;
        }
        if happiness_held && (20..26).contains(&pos) {
            score += w.jam;
        }
    }

    score
}
