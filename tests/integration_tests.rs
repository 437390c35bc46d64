//! Integration tests for senet-rust.
//!
//! These exercise the rules engine and the search together: randomized
//! playouts check the structural invariants on every reachable transition,
//! and the scenario tests pin down the special-square rules and the
//! pruning-neutrality of the search.

use senet_rust::constants::{
    HAPPINESS, HORUS, NUM_SQUARES, OUT, PIECES_PER_PLAYER, RE_ATOUM, THREE_TRUTHS,
};
use senet_rust::dice::toss_sticks_with;
use senet_rust::rules::{
    apply_move, initial_state, is_terminal, legal_moves, occupant, skip_turn, winner, RulesError,
};
use senet_rust::search::Searcher;
use senet_rust::state::{GameState, Move, MoveKind, Pending, PieceSet, Player, Square};

// =============================================================================
// Helpers
// =============================================================================

/// Place the listed pieces and pad the rest of each set with OUT.
fn setpos(black: &[Square], white: &[Square], turn: Player) -> GameState {
    let mut b: PieceSet = [OUT; PIECES_PER_PLAYER];
    let mut w: PieceSet = [OUT; PIECES_PER_PLAYER];
    b[..black.len()].copy_from_slice(black);
    w[..white.len()].copy_from_slice(white);
    GameState::new(b, w, turn)
}

/// Count the on-board pieces of both sides.
fn on_board(state: &GameState) -> usize {
    state
        .black
        .iter()
        .chain(state.white.iter())
        .filter(|&&p| p != OUT)
        .count()
}

// =============================================================================
// Randomized playout invariants
// =============================================================================

/// Drive a game with random rolls and random legal moves, asserting the
/// structural transition invariants at every step.
fn check_random_playout(seed: u64) {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut state = initial_state();

    for _ in 0..600 {
        if is_terminal(&state) {
            break;
        }
        let roll = toss_sticks_with(&mut rng);
        let moves = legal_moves(&state, roll);
        if moves.is_empty() {
            state = skip_turn(&state, roll);
            state.validate().expect("skip keeps positions on the board");
            continue;
        }

        let mover = state.turn;
        let mv = moves[rng.usize(..moves.len())];
        let from = state.pieces_of(mover)[mv.piece];
        let exited_before: Vec<usize> = (0..PIECES_PER_PLAYER)
            .filter(|&i| state.pieces_of(mover)[i] == OUT)
            .collect();
        let capture_target = match mv.kind {
            MoveKind::Advance => occupant(&state, from + roll).filter(|&(owner, _)| owner != mover),
            MoveKind::Exit => None,
        };
        let pieces_before = on_board(&state);

        // Every move from legal_moves is accepted without error.
        let next = apply_move(&state, roll, mv).expect("generated move must apply");

        // Piece sets keep their shape and range.
        next.validate().expect("positions stay in {0} U 1..=30");

        // Promotion is monotone: exited pieces stay out forever.
        for i in exited_before {
            assert_eq!(next.pieces_of(mover)[i], OUT);
        }

        // The happiness square cannot be jumped: an advance never goes from
        // below 26 to beyond it.
        if mv.kind == MoveKind::Advance && from < HAPPINESS {
            let landed = next.pieces_of(mover)[mv.piece];
            assert!(landed <= HAPPINESS, "jumped happiness: {from} -> {landed}");
        }

        // Swap symmetry: a capture exchanges the two squares, removing no one.
        if let Some((owner, opp_piece)) = capture_target {
            assert_eq!(next.pieces_of(mover)[mv.piece], from + roll);
            assert_eq!(next.pieces_of(owner)[opp_piece], from);
            assert_eq!(on_board(&next), pieces_before);
        }

        // Turn always passes. A pending obligation is either one the mover
        // just created by landing on a trap square, or the opponent's own
        // obligation carried through the mover's turn unchanged.
        assert_eq!(next.turn, mover.opponent());
        if let Some(p) = next.pending {
            assert!(p.player == mover || Some(p) == state.pending);
        }

        state = next;
    }
}

#[test]
fn test_random_playout_invariants() {
    for seed in [1, 7, 42, 1234, 987_654] {
        check_random_playout(seed);
    }
}

// =============================================================================
// Scenario tests
// =============================================================================

#[test]
fn test_opening_roll_one() {
    // From the opening layout every Black piece on the odd squares 1..13 can
    // step onto the adjacent even square; nothing is blocked.
    let state = initial_state();
    let moves = legal_moves(&state, 1);
    assert_eq!(moves.len(), PIECES_PER_PLAYER);
    for (i, mv) in moves.iter().enumerate() {
        assert_eq!(*mv, Move::advance(i));
        let next = apply_move(&state, 1, *mv).unwrap();
        assert_eq!(next.black[i], (2 * i + 2) as Square);
    }
}

#[test]
fn test_advance_from_25_with_4_is_absent() {
    // 25 + 4 = 29 would cross square 26 without stopping on it.
    let state = setpos(&[25, 5], &[10], Player::Black);
    let moves = legal_moves(&state, 4);
    assert!(!moves.contains(&Move::advance(0)));
    assert_eq!(
        apply_move(&state, 4, Move::advance(0)),
        Err(RulesError::InvalidMove)
    );
}

#[test]
fn test_horus_exit_on_every_roll() {
    for roll in 1..=5u8 {
        let mut state = setpos(&[HORUS, 5], &[10], Player::Black);
        state.pending = Some(Pending {
            player: Player::Black,
            piece: 0,
            required: None,
        });
        let moves = legal_moves(&state, roll);
        assert_eq!(moves[0], Move::exit(0), "roll {roll}");
        let next = apply_move(&state, roll, Move::exit(0)).unwrap();
        assert_eq!(next.black[0], OUT, "roll {roll} must promote");
    }
}

#[test]
fn test_trap_exit_determinism() {
    // A piece on 26 advances 2 onto the Three Truths square and is pending.
    let state = setpos(&[HAPPINESS, 5], &[10], Player::White).passed_turn();
    let state = apply_move(&state, 2, Move::advance(0)).unwrap();
    assert_eq!(
        state.pending,
        Some(Pending {
            player: Player::Black,
            piece: 0,
            required: Some(3),
        })
    );

    // White replies; the obligation survives to Black's next turn: it still
    // names Black's piece even while White was the one moving.
    let state = apply_move(&state, 1, Move::advance(0)).unwrap();
    assert_eq!(state.turn, Player::Black);
    assert_eq!(
        state.pending,
        Some(Pending {
            player: Player::Black,
            piece: 0,
            required: Some(3),
        })
    );

    // While pending, the trapped piece never advances: each roll offers
    // either its exit (roll 3) or moves of other pieces only.
    for roll in 1..=5u8 {
        for mv in legal_moves(&state, roll) {
            if mv.piece == 0 {
                assert_eq!(mv.kind, MoveKind::Exit);
                assert_eq!(roll, 3);
            }
        }
    }

    // On a non-matching roll, moving another piece bounces it to rebirth.
    let bounced = apply_move(&state, 1, Move::advance(1)).unwrap();
    assert!(bounced.black[0] < THREE_TRUTHS);
    assert_ne!(bounced.black[0], OUT);
    assert!(bounced.pending.is_none());
}

#[test]
fn test_exited_piece_stays_out() {
    let mut state = setpos(&[RE_ATOUM, 5], &[10, 12], Player::Black);
    state.pending = Some(Pending {
        player: Player::Black,
        piece: 0,
        required: Some(2),
    });
    let state = apply_move(&state, 2, Move::exit(0)).unwrap();
    assert_eq!(state.black[0], OUT);

    // Play on: the exited index never reappears on the board.
    let state = apply_move(&state, 1, Move::advance(0)).unwrap();
    let state = apply_move(&state, 1, Move::advance(1)).unwrap();
    assert_eq!(state.black[0], OUT);
    assert_eq!(state.turn, Player::White);
}

#[test]
fn test_game_can_be_won() {
    let state = setpos(&[HAPPINESS], &[5, 6], Player::Black);
    let state = apply_move(&state, 5, Move::exit(0)).unwrap();
    assert!(is_terminal(&state));
    assert_eq!(winner(&state), Some(Player::Black));
    assert!(legal_moves(&state, 3).is_empty());
    assert!(legal_moves(&state.passed_turn(), 3).is_empty());
}

// =============================================================================
// Search properties
// =============================================================================

#[test]
fn test_search_pruning_neutral_from_opening() {
    let state = initial_state();
    for roll in 1..=5u8 {
        let mut pruned = Searcher::new(Player::Black);
        let mut full = Searcher::new(Player::Black);
        full.set_pruning(false);
        let (_, v1) = pruned.choose(&state, 2, roll);
        let (_, v2) = full.choose(&state, 2, roll);
        assert!((v1 - v2).abs() < 1e-9, "roll {roll}: {v1} != {v2}");
    }
}

#[test]
fn test_search_pruning_neutral_midgame() {
    let state = setpos(&[3, 9, 17, 22, HAPPINESS], &[6, 11, 19, 24], Player::Black);
    for roll in 1..=5u8 {
        let mut pruned = Searcher::new(Player::Black);
        let mut full = Searcher::new(Player::Black);
        full.set_pruning(false);
        let (_, v1) = pruned.choose(&state, 2, roll);
        let (_, v2) = full.choose(&state, 2, roll);
        assert!((v1 - v2).abs() < 1e-9, "roll {roll}: {v1} != {v2}");
        assert!(pruned.stats().nodes <= full.stats().nodes);
    }
}

#[test]
fn test_search_move_always_applies() {
    // Whatever the search picks must round-trip through the checked path.
    let mut rng = fastrand::Rng::with_seed(99);
    let mut state = initial_state();
    for _ in 0..60 {
        if is_terminal(&state) {
            break;
        }
        let roll = toss_sticks_with(&mut rng);
        let mut searcher = Searcher::new(state.turn);
        let (best, _) = searcher.choose(&state, 2, roll);
        state = match best {
            Some(mv) => apply_move(&state, roll, mv).expect("search move must be legal"),
            None => skip_turn(&state, roll),
        };
        state.validate().unwrap();
    }
}

#[test]
fn test_positions_never_exceed_track() {
    let state = initial_state();
    for &pos in state.black.iter().chain(state.white.iter()) {
        assert!(pos >= 1 && pos <= NUM_SQUARES);
    }
}
