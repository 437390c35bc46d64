//! Constants for the Senet track, special squares, and dice distribution.
//!
//! The board is a linear track of 30 squares, drawn as 3 rows of 10 in a
//! boustrophedon (snake) layout. All rules and search code work on the
//! linear index `1..=30`; only [`crate::board`] knows about rows and columns.

// =============================================================================
// Board Geometry
// =============================================================================

/// Columns of the drawn board.
pub const BOARD_COLS: usize = 10;

/// Rows of the drawn board.
pub const BOARD_ROWS: usize = 3;

/// Total playable squares on the linear track (`1..=NUM_SQUARES`).
pub const NUM_SQUARES: u8 = (BOARD_COLS * BOARD_ROWS) as u8;

/// Pieces per player. The two sets of 7 start interleaved on squares 1..14.
pub const PIECES_PER_PLAYER: usize = 7;

/// Position value for a promoted piece (off the board).
pub const OUT: u8 = 0;

// =============================================================================
// Special Squares
// =============================================================================

/// House of Rebirth: the safe square trapped pieces are returned to.
pub const REBIRTH: u8 = 15;

/// House of Happiness: mandatory stop, cannot be jumped over,
/// and exits the board on a roll of 5.
pub const HAPPINESS: u8 = 26;

/// House of Water: landing here sends the piece straight back to rebirth.
pub const WATER: u8 = 27;

/// House of Three Truths: exit requires a roll of exactly 3.
pub const THREE_TRUTHS: u8 = 28;

/// House of Re-Atoum: exit requires a roll of exactly 2.
pub const RE_ATOUM: u8 = 29;

/// House of Horus: exit on any roll.
pub const HORUS: u8 = 30;

// =============================================================================
// Dice
// =============================================================================

/// Throwing-stick outcome distribution.
///
/// Four binary sticks give a sum in 0..=4, where a sum of 0 counts as 5:
/// 1 -> 4/16, 2 -> 6/16, 3 -> 4/16, 4 -> 1/16, 5 -> 1/16.
pub const ROLL_PROBS: [(u8, f64); 5] = [
    (1, 4.0 / 16.0),
    (2, 6.0 / 16.0),
    (3, 4.0 / 16.0),
    (4, 1.0 / 16.0),
    (5, 1.0 / 16.0),
];

// =============================================================================
// Search
// =============================================================================

/// Default search depth (decision plies). Each unit multiplies the tree by
/// the 5-way dice fan-out times the legal-move count, so this stays small.
pub const DEFAULT_DEPTH: i32 = 2;
