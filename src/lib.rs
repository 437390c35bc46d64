//! Senet-Rust: an engine for the ancient Egyptian race game Senet.
//!
//! The crate tracks board state, enforces the ruleset with its
//! special-square obligations, and chooses moves with a depth-limited
//! expectiminimax search over the stick-toss outcomes.
//!
//! ## Modules
//!
//! - [`constants`] - Track geometry, special squares, dice distribution
//! - [`state`] - Players, moves, pending obligations, the immutable game state
//! - [`rules`] - Legal-move generation, move application, trap resolution
//! - [`eval`] - Tunable positional evaluation
//! - [`search`] - Expectiminimax with alpha-beta pruning and move ordering
//! - [`dice`] - The four-stick toss
//! - [`board`] - Snake-layout geometry and text rendering
//! - [`cli`] - Interactive terminal play
//!
//! ## Example
//!
//! ```
//! use senet_rust::rules::{initial_state, apply_move, legal_moves};
//! use senet_rust::search::choose_move;
//! use senet_rust::state::Player;
//!
//! // Black opens with a roll of 2.
//! let state = initial_state();
//! let outcome = choose_move(&state, Player::Black, 2, 2);
//! let best = outcome.best.expect("the opening always has moves");
//! assert!(legal_moves(&state, 2).contains(&best));
//!
//! let state = apply_move(&state, 2, best).unwrap();
//! assert_eq!(state.turn, Player::White);
//! ```

pub mod board;
pub mod cli;
pub mod constants;
pub mod dice;
pub mod eval;
pub mod rules;
pub mod search;
pub mod state;
