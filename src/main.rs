//! Senet-Rust: play the engine or watch it play itself.
//!
//! ## Usage
//!
//! - `senet-rust` - Watch an engine-vs-engine demo game
//! - `senet-rust demo` - Same, with a configurable search depth
//! - `senet-rust play` - Play against the engine in the terminal

use anyhow::Result;
use clap::{Parser, Subcommand};

use senet_rust::board::BoardView;
use senet_rust::cli::{describe_move, Session};
use senet_rust::constants::DEFAULT_DEPTH;
use senet_rust::dice::toss_sticks_with;
use senet_rust::rules::{apply_move, is_terminal, skip_turn, winner};
use senet_rust::search::Searcher;
use senet_rust::state::Player;

/// Senet-Rust: a Senet engine with expectiminimax search
#[derive(Parser)]
#[command(name = "senet-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the engine in the terminal
    Play {
        /// Search depth in decision plies
        #[arg(long, default_value_t = DEFAULT_DEPTH)]
        depth: i32,
        /// Take the White pieces (Black moves first)
        #[arg(long)]
        white: bool,
    },
    /// Watch the engine play both sides
    Demo {
        /// Search depth in decision plies
        #[arg(long, default_value_t = DEFAULT_DEPTH)]
        depth: i32,
        /// Seed for the stick tosses, for a reproducible game
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play { depth, white }) => {
            let human = if white { Player::White } else { Player::Black };
            Session::new(human, depth).run()
        }
        Some(Commands::Demo { depth, seed }) => run_demo(depth, seed),
        None => run_demo(DEFAULT_DEPTH, None),
    }
}

/// Engine vs engine: two independent searchers, one per side, sharing nothing.
fn run_demo(depth: i32, seed: Option<u64>) -> Result<()> {
    println!("Senet-Rust: engine vs engine at depth {depth}\n");

    let mut rng = match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let mut black = Searcher::new(Player::Black);
    let mut white = Searcher::new(Player::White);
    let mut state = senet_rust::rules::initial_state();

    // Senet games are finite in practice but not provably so; cap the demo.
    for turn in 1..=2000 {
        if is_terminal(&state) {
            break;
        }
        let mover = state.turn;
        let roll = toss_sticks_with(&mut rng);
        let searcher = match mover {
            Player::Black => &mut black,
            Player::White => &mut white,
        };
        let (best, value) = searcher.choose(&state, depth, roll);
        match best {
            Some(mv) => {
                println!(
                    "{turn:4}. {mover} rolls {roll}: {} ({value:.1})",
                    describe_move(&state, roll, mv)
                );
                state = apply_move(&state, roll, mv)?;
            }
            None => {
                println!("{turn:4}. {mover} rolls {roll}: no move, turn passes");
                state = skip_turn(&state, roll);
            }
        }
    }

    println!("\n{}", BoardView(&state));
    match winner(&state) {
        Some(champion) => println!("{champion} wins!"),
        None => println!("no winner within the turn cap"),
    }
    Ok(())
}
