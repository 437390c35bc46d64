//! Game state value types: players, moves, pending obligations, positions.
//!
//! [`GameState`] is an immutable value. The rules engine never mutates one in
//! place; every transition clones and returns a new state, which keeps the
//! search free to hold references into any branch without aliasing concerns.

use crate::constants::{NUM_SQUARES, OUT, PIECES_PER_PLAYER};
use crate::rules::RulesError;

/// One of the two sides. Black owns the odd opening squares and moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// The other side.
    pub fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Black => write!(f, "Black"),
            Player::White => write!(f, "White"),
        }
    }
}

/// A square on the linear track. `0` ([`OUT`]) means promoted off the board.
pub type Square = u8;

/// Piece positions, indexed by piece identity `0..=6`. Identity is stable
/// for the whole game; only the position changes.
pub type PieceSet = [Square; PIECES_PER_PLAYER];

/// What a move does with the chosen piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveKind {
    /// Advance along the track by the rolled amount.
    Advance,
    /// Leave the board (promotion); position becomes [`OUT`] permanently.
    Exit,
}

/// A move: which piece, and whether it advances or exits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub piece: usize,
    pub kind: MoveKind,
}

impl Move {
    pub fn advance(piece: usize) -> Move {
        Move {
            piece,
            kind: MoveKind::Advance,
        }
    }

    pub fn exit(piece: usize) -> Move {
        Move {
            piece,
            kind: MoveKind::Exit,
        }
    }
}

/// A recorded obligation: `piece` of `player` must exit with a matching roll
/// on its owner's next turn or be bounced back to the rebirth region.
/// `required` of `None` means any roll qualifies (the Horus square).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pending {
    pub player: Player,
    pub piece: usize,
    pub required: Option<u8>,
}

/// A full Senet position.
///
/// At most one [`Pending`] obligation exists at a time. It is created when
/// its owner lands on a trap square, survives untouched through the
/// opponent's intervening turn, and is consumed (exit or bounce to rebirth)
/// on the owner's next turn. Depending on whose reply is in flight it may
/// therefore name either player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub black: PieceSet,
    pub white: PieceSet,
    pub turn: Player,
    pub pending: Option<Pending>,
}

impl GameState {
    /// Build a state from explicit piece sets, with no pending obligation.
    pub fn new(black: PieceSet, white: PieceSet, turn: Player) -> GameState {
        GameState {
            black,
            white,
            turn,
            pending: None,
        }
    }

    /// The given player's piece positions.
    pub fn pieces_of(&self, player: Player) -> &PieceSet {
        match player {
            Player::Black => &self.black,
            Player::White => &self.white,
        }
    }

    /// A copy of this state with one player's piece set replaced.
    pub fn with_pieces(&self, player: Player, pieces: PieceSet) -> GameState {
        let mut next = self.clone();
        match player {
            Player::Black => next.black = pieces,
            Player::White => next.white = pieces,
        }
        next
    }

    /// A copy of this state with the turn handed to the other player.
    pub fn passed_turn(&self) -> GameState {
        let mut next = self.clone();
        next.turn = self.turn.opponent();
        next
    }

    /// Guard against corrupted positions: every entry must be [`OUT`] or a
    /// track square in `1..=30`. Violations are programming errors, surfaced
    /// as [`RulesError::InvalidSquare`] rather than silently carried along.
    pub fn validate(&self) -> Result<(), RulesError> {
        for &pos in self.black.iter().chain(self.white.iter()) {
            if pos != OUT && !(1..=NUM_SQUARES).contains(&pos) {
                return Err(RulesError::InvalidSquare(pos));
            }
        }
        Ok(())
    }
}
