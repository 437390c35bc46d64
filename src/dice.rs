//! The four-stick toss.
//!
//! Senet is rolled with four flat throwing sticks, each landing flat side up
//! or down. The count of flat sides gives the roll, except that zero counts
//! as five. The resulting distribution over `1..=5` is fixed and is the one
//! the search's chance nodes weight by ([`crate::constants::ROLL_PROBS`]).

use crate::constants::ROLL_PROBS;

/// Toss the four sticks with the global RNG. Returns a roll in `1..=5`.
pub fn toss_sticks() -> u8 {
    let flats = (0..4).filter(|_| fastrand::bool()).count() as u8;
    if flats == 0 { 5 } else { flats }
}

/// Toss the four sticks with a caller-supplied RNG, for reproducible games.
pub fn toss_sticks_with(rng: &mut fastrand::Rng) -> u8 {
    let flats = (0..4).filter(|_| rng.bool()).count() as u8;
    if flats == 0 { 5 } else { flats }
}

/// The fixed roll distribution as `(roll, probability)` pairs.
pub fn roll_distribution() -> [(u8, f64); 5] {
    ROLL_PROBS
}
