//! Interactive terminal play.
//!
//! A [`Session`] runs a human-vs-engine game over stdin/stdout: the board is
//! printed, the human tosses and picks from the numbered legal moves, the
//! engine tosses and searches. All rule enforcement stays in
//! [`crate::rules`]; this module only translates lines of text to and from
//! the core operations.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use crate::board::BoardView;
use crate::constants::OUT;
use crate::dice::toss_sticks;
use crate::eval::EvalWeights;
use crate::rules::{apply_move, is_terminal, legal_moves, skip_turn, winner};
use crate::search::Searcher;
use crate::state::{GameState, Move, MoveKind, Player};

/// Human-readable description of a move in the given position.
pub fn describe_move(state: &GameState, roll: u8, mv: Move) -> String {
    let from = state.pieces_of(state.turn)[mv.piece];
    match mv.kind {
        MoveKind::Exit => format!("piece at {from} exits the board"),
        MoveKind::Advance => {
            let dest = from + roll;
            match crate::rules::occupant(state, dest) {
                Some((owner, _)) if owner != state.turn => {
                    format!("piece at {from} -> {dest}, swapping the {owner} piece back")
                }
                _ => format!("piece at {from} -> {dest}"),
            }
        }
    }
}

/// One interactive game.
pub struct Session {
    state: GameState,
    human: Player,
    depth: i32,
    weights: EvalWeights,
}

impl Session {
    /// A fresh game from the opening layout. `human` takes that side; the
    /// engine plays the other with the given search depth.
    pub fn new(human: Player, depth: i32) -> Session {
        Session {
            state: crate::rules::initial_state(),
            human,
            depth,
            weights: EvalWeights::default(),
        }
    }

    /// Run the game loop until the game ends or the human quits.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        println!("You play {}. Black moves first.", self.human);
        loop {
            println!("\n{}", BoardView(&self.state));
            if is_terminal(&self.state) {
                let champion = winner(&self.state).context("terminal game has a winner")?;
                println!("{champion} wins!");
                return Ok(());
            }

            if self.state.turn == self.human {
                print!("[{}] press enter to toss (q to quit): ", self.human);
                io::stdout().flush()?;
                match lines.next() {
                    Some(line) => {
                        if line?.trim() == "q" {
                            return Ok(());
                        }
                    }
                    None => return Ok(()),
                }
                let roll = toss_sticks();
                println!("You rolled {roll}.");
                self.human_turn(roll, &mut lines)?;
            } else {
                let roll = toss_sticks();
                println!("[{}] engine rolled {roll}.", self.state.turn);
                self.engine_turn(roll)?;
            }
        }
    }

    fn human_turn(
        &mut self,
        roll: u8,
        lines: &mut impl Iterator<Item = io::Result<String>>,
    ) -> Result<()> {
        let moves = legal_moves(&self.state, roll);
        if moves.is_empty() {
            println!("No legal move; turn passes.");
            self.state = skip_turn(&self.state, roll);
            return Ok(());
        }

        for (i, &mv) in moves.iter().enumerate() {
            println!("  {i}: {}", describe_move(&self.state, roll, mv));
        }
        loop {
            print!("choose a move: ");
            io::stdout().flush()?;
            let line = match lines.next() {
                Some(line) => line?,
                None => return Ok(()),
            };
            let Ok(index) = line.trim().parse::<usize>() else {
                println!("enter a number 0..{}", moves.len() - 1);
                continue;
            };
            let Some(&mv) = moves.get(index) else {
                println!("enter a number 0..{}", moves.len() - 1);
                continue;
            };
            // The move came from legal_moves an instant ago, but legality is
            // always re-derived on application.
            self.state = apply_move(&self.state, roll, mv)?;
            return Ok(());
        }
    }

    fn engine_turn(&mut self, roll: u8) -> Result<()> {
        let ai = self.human.opponent();
        let mut searcher = Searcher::with_weights(ai, self.weights.clone());
        let (best, value) = searcher.choose(&self.state, self.depth, roll);
        let stats = searcher.stats();
        match best {
            Some(mv) => {
                println!(
                    "engine: {} (value {value:.1}, {} nodes / {} leaves)",
                    describe_move(&self.state, roll, mv),
                    stats.nodes,
                    stats.leafs
                );
                self.state = apply_move(&self.state, roll, mv)?;
            }
            None => {
                println!("engine has no move; turn passes.");
                self.state = skip_turn(&self.state, roll);
            }
        }
        Ok(())
    }

    /// Remaining on-board pieces for both sides, for progress display.
    pub fn pieces_left(&self) -> (usize, usize) {
        let on_board = |pieces: &[u8]| pieces.iter().filter(|&&p| p != OUT).count();
        (on_board(&self.state.black), on_board(&self.state.white))
    }
}
