//! The Senet rules state machine.
//!
//! This module provides the pure game logic:
//! - Legal-move generation for a rolled stick value ([`legal_moves`])
//! - Move application with swap captures and landing effects ([`apply_move`])
//! - No-move turns with forced trap resolution ([`skip_turn`])
//! - Deterministic rebirth placement for trapped pieces
//! - Terminal detection ([`is_terminal`], [`winner`])
//!
//! Every function takes a state by reference and returns a fresh one; the
//! input is never modified. The search engine relies on this: states derived
//! for one branch are independent values with no shared interior.

use crate::constants::{
    HAPPINESS, HORUS, NUM_SQUARES, OUT, PIECES_PER_PLAYER, RE_ATOUM, REBIRTH, THREE_TRUTHS, WATER,
};
use crate::state::{GameState, Move, MoveKind, Pending, PieceSet, Player, Square};

/// A rule violation or internal consistency failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// The requested move is not among `legal_moves` for this state and roll.
    InvalidMove,
    /// A position outside `{0} U 1..=30`.
    InvalidSquare(u8),
    /// No unoccupied square exists anywhere for a rebirth placement.
    RebirthPlacementExhausted,
}

impl std::fmt::Display for RulesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RulesError::InvalidMove => write!(f, "illegal move for this roll"),
            RulesError::InvalidSquare(sq) => write!(f, "square {sq} is not on the board"),
            RulesError::RebirthPlacementExhausted => {
                write!(f, "no free square for rebirth placement")
            }
        }
    }
}

impl std::error::Error for RulesError {}

/// The fixed opening layout: the 14 entry squares are interleaved, odd
/// squares to Black and even squares to White. Black moves first.
pub fn initial_state() -> GameState {
    let mut black: PieceSet = [OUT; PIECES_PER_PLAYER];
    let mut white: PieceSet = [OUT; PIECES_PER_PLAYER];
    for i in 0..PIECES_PER_PLAYER {
        black[i] = (2 * i + 1) as Square;
        white[i] = (2 * i + 2) as Square;
    }
    GameState::new(black, white, Player::Black)
}

/// The game is over once either side has promoted all seven pieces.
pub fn is_terminal(state: &GameState) -> bool {
    state.black.iter().all(|&p| p == OUT) || state.white.iter().all(|&p| p == OUT)
}

/// The player whose pieces are all off the board, if any.
pub fn winner(state: &GameState) -> Option<Player> {
    if state.black.iter().all(|&p| p == OUT) {
        Some(Player::Black)
    } else if state.white.iter().all(|&p| p == OUT) {
        Some(Player::White)
    } else {
        None
    }
}

/// Which piece, if any, sits on the given track square.
pub fn occupant(state: &GameState, square: Square) -> Option<(Player, usize)> {
    if square == OUT {
        return None;
    }
    for (pid, &pos) in state.black.iter().enumerate() {
        if pos == square {
            return Some((Player::Black, pid));
        }
    }
    for (pid, &pos) in state.white.iter().enumerate() {
        if pos == square {
            return Some((Player::White, pid));
        }
    }
    None
}

/// Where a trapped piece would be placed right now: the rebirth square if
/// free, else the first free square scanning 14 down to 1, else 16 up to 30.
///
/// With at most 14 pieces on 30 squares the error is unreachable, but the
/// scan is kept total for arbitrary states.
pub fn rebirth_square(state: &GameState) -> Result<Square, RulesError> {
    if occupant(state, REBIRTH).is_none() {
        return Ok(REBIRTH);
    }
    for sq in (1..REBIRTH).rev() {
        if occupant(state, sq).is_none() {
            return Ok(sq);
        }
    }
    for sq in REBIRTH + 1..=NUM_SQUARES {
        if occupant(state, sq).is_none() {
            return Ok(sq);
        }
    }
    Err(RulesError::RebirthPlacementExhausted)
}

/// Relocate one piece to the rebirth region. If every square is somehow
/// occupied the piece stays where it is, keeping the transition total.
fn send_to_rebirth(state: &GameState, player: Player, piece: usize) -> GameState {
    match rebirth_square(state) {
        Ok(target) => {
            let mut pieces = *state.pieces_of(player);
            pieces[piece] = target;
            state.with_pieces(player, pieces)
        }
        Err(_) => state.clone(),
    }
}

/// All legal moves for the player to move, given a stick roll in `1..=5`.
///
/// A pending exit obligation is offered first when its escape condition is
/// met. Pieces resting on the Three Truths or Re-Atoum squares only act on
/// their required roll; a piece on Happiness exits outright on a 5. Advances
/// are rejected for overshoot, for jumping past the Happiness square, for
/// landing on an own piece, and for capturing beyond Happiness.
pub fn legal_moves(state: &GameState, roll: u8) -> Vec<Move> {
    if is_terminal(state) {
        return Vec::new();
    }

    let p = state.turn;
    let mine = state.pieces_of(p);
    let mut moves = Vec::new();

    if let Some(pend) = state.pending {
        if pend.player == p {
            let pos = mine[pend.piece];
            let escapes = pend.required.is_none_or(|r| r == roll);
            if matches!(pos, THREE_TRUTHS | RE_ATOUM | HORUS) && escapes {
                moves.push(Move::exit(pend.piece));
            }
        }
    }

    for (pid, &from) in mine.iter().enumerate() {
        if from == OUT {
            continue;
        }
        if from == HAPPINESS && roll == 5 {
            moves.push(Move::exit(pid));
            continue;
        }
        if from == THREE_TRUTHS && roll != 3 {
            continue;
        }
        if from == RE_ATOUM && roll != 2 {
            continue;
        }

        // Overshooting the track is no move at all.
        let Some(dest) = from.checked_add(roll).filter(|&d| d <= NUM_SQUARES) else {
            continue;
        };
        // No sliding straight through the trap zone.
        if from == THREE_TRUTHS && roll == 2 && dest == HORUS {
            continue;
        }
        // Cannot jump past the House of Happiness without stopping on it.
        if from < HAPPINESS && dest > HAPPINESS {
            continue;
        }
        match occupant(state, dest) {
            Some((owner, _)) if owner == p => continue,
            Some(_) if dest > HAPPINESS => continue, // no captures past happiness
            _ => {}
        }
        moves.push(Move::advance(pid));
    }

    moves
}

/// Apply a move, first checking it against [`legal_moves`].
///
/// Callers must always re-derive legality from `legal_moves` rather than
/// assume prior validity: the pending and trap-punishment steps can change
/// what is legal between calls.
pub fn apply_move(state: &GameState, roll: u8, mv: Move) -> Result<GameState, RulesError> {
    if !legal_moves(state, roll).contains(&mv) {
        return Err(RulesError::InvalidMove);
    }
    Ok(apply_move_unchecked(state, roll, mv))
}

/// Apply a move known to come from [`legal_moves`] for this state and roll.
/// The search uses this path: it only ever applies moves it generated.
pub(crate) fn apply_move_unchecked(state: &GameState, roll: u8, mv: Move) -> GameState {
    let mover = state.turn;
    let mut state = resolve_obligations(state, roll, Some(mv));

    match mv.kind {
        MoveKind::Exit => {
            let mut mine = *state.pieces_of(mover);
            mine[mv.piece] = OUT;
            state = state.with_pieces(mover, mine);
        }
        MoveKind::Advance => {
            let from = state.pieces_of(mover)[mv.piece];
            let dest = from + roll;

            match occupant(&state, dest) {
                Some((owner, opp_piece)) if owner != mover => {
                    // Swap capture: the opponent piece is bounced back to the
                    // mover's vacated square, not removed from the board.
                    let mut mine = *state.pieces_of(mover);
                    let mut theirs = *state.pieces_of(owner);
                    mine[mv.piece] = dest;
                    theirs[opp_piece] = from;
                    state = state.with_pieces(mover, mine).with_pieces(owner, theirs);
                }
                _ => {
                    let mut mine = *state.pieces_of(mover);
                    mine[mv.piece] = dest;
                    state = state.with_pieces(mover, mine);
                }
            }

            // Landing effects.
            match dest {
                WATER => state = send_to_rebirth(&state, mover, mv.piece),
                THREE_TRUTHS => state.pending = Some(Pending {
                    player: mover,
                    piece: mv.piece,
                    required: Some(3),
                }),
                RE_ATOUM => state.pending = Some(Pending {
                    player: mover,
                    piece: mv.piece,
                    required: Some(2),
                }),
                HORUS => state.pending = Some(Pending {
                    player: mover,
                    piece: mv.piece,
                    required: None,
                }),
                _ => {}
            }
        }
    }

    state.passed_turn()
}

/// Resolve a turn on which the rolled value allows no move: the pending and
/// trap punishments still happen, then the turn passes.
pub fn skip_turn(state: &GameState, roll: u8) -> GameState {
    resolve_obligations(state, roll, None).passed_turn()
}

/// Steps 1-2 of a turn: bounce an unmet pending obligation to rebirth, then
/// bounce every other own piece stuck on a trap square with the wrong roll.
/// `mv` is the move about to be executed, if any; the piece it exits is
/// exempt from punishment.
fn resolve_obligations(state: &GameState, roll: u8, mv: Option<Move>) -> GameState {
    let mover = state.turn;
    let mut state = state.clone();

    if let Some(pend) = state.pending {
        if pend.player == mover {
            let met = mv.is_some_and(|m| {
                m.kind == MoveKind::Exit
                    && m.piece == pend.piece
                    && pend.required.is_none_or(|r| r == roll)
            });
            if !met {
                state = send_to_rebirth(&state, mover, pend.piece);
            }
            state.pending = None;
        }
    }

    for pid in 0..PIECES_PER_PLAYER {
        if mv.is_some_and(|m| m.kind == MoveKind::Exit && m.piece == pid) {
            continue;
        }
        let pos = state.pieces_of(mover)[pid];
        if (pos == THREE_TRUTHS && roll != 3) || (pos == RE_ATOUM && roll != 2) {
            state = send_to_rebirth(&state, mover, pid);
        }
    }

    state
}
