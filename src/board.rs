//! The drawn board: linear track index to row/column and back, plus a text
//! rendering of a position.
//!
//! The 30 squares snake across 3 rows of 10:
//! row 0 runs 1..10 left to right, row 1 runs 20..11 right to left (20 under
//! 10), row 2 runs 21..30 left to right. Only this module knows the layout;
//! the rules and search work purely on the linear index.

use std::fmt;

use crate::constants::{
    BOARD_COLS, BOARD_ROWS, HAPPINESS, HORUS, NUM_SQUARES, RE_ATOUM, REBIRTH, THREE_TRUTHS, WATER,
};
use crate::rules::{occupant, RulesError};
use crate::state::{GameState, Player, Square};

/// A drawn-board coordinate. Row 0 is the top row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

/// Map a track square in `1..=30` to its drawn cell.
pub fn square_to_cell(square: Square) -> Result<Cell, RulesError> {
    if !(1..=NUM_SQUARES).contains(&square) {
        return Err(RulesError::InvalidSquare(square));
    }
    let sq = square as usize;
    let (row, col) = if sq <= 10 {
        (0, sq - 1)
    } else if sq <= 20 {
        (1, 20 - sq) // middle row runs right to left
    } else {
        (2, sq - 21)
    };
    Ok(Cell { row, col })
}

/// Map a drawn cell back to its track square, or `None` off the grid.
pub fn cell_to_square(row: usize, col: usize) -> Option<Square> {
    if row >= BOARD_ROWS || col >= BOARD_COLS {
        return None;
    }
    let sq = match row {
        0 => col + 1,
        1 => 20 - col,
        _ => 21 + col,
    };
    Some(sq as Square)
}

/// Mark drawn on an empty special square.
fn special_mark(square: Square) -> char {
    match square {
        REBIRTH => 'r',
        HAPPINESS => 'h',
        WATER => 'w',
        THREE_TRUTHS => 't',
        RE_ATOUM => 'a',
        HORUS => 'x',
        _ => '.',
    }
}

/// A displayable view of a position's board.
pub struct BoardView<'a>(pub &'a GameState);

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_ROWS {
            for col in 0..BOARD_COLS {
                let square = cell_to_square(row, col).unwrap_or(0);
                let ch = match occupant(self.0, square) {
                    Some((Player::Black, _)) => 'B',
                    Some((Player::White, _)) => 'W',
                    None => special_mark(square),
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
