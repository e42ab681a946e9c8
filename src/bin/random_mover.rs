//! A tiny UCI engine that plays a random legal move.
//!
//! Useful as a stand-in opponent and as a fixture for the engine plumbing.
//! `--seed <n>` makes its choices repeatable.

use std::env;
use std::io::{self, BufRead, Write};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use chess_rules::board::GameState;
use chess_rules::uci::{position_from_parts, UciCommand, UciReply};

fn main() {
    if let Err(e) = chess_rules::logging::init() {
        eprintln!("{e}");
    }

    let mut rng = match seed_from_args() {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut state = GameState::new();

    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let Some(cmd) = UciCommand::parse(&line) else {
            continue;
        };

        let replies = match cmd {
            UciCommand::Uci => vec![
                UciReply::Id("name RandomMover".to_string()),
                UciReply::Id("author chess_rules".to_string()),
                UciReply::UciOk,
            ],
            UciCommand::IsReady => vec![UciReply::ReadyOk],
            UciCommand::UciNewGame => {
                state = GameState::new();
                vec![]
            }
            UciCommand::Position { fen, moves } => {
                match position_from_parts(fen.as_deref(), &moves) {
                    Ok(next) => state = next,
                    Err(e) => log::warn!("Ignoring position: {e}"),
                }
                vec![]
            }
            UciCommand::Go(_) => {
                let moves = state.legal_moves();
                match moves.choose(&mut rng) {
                    Some(&mv) => vec![UciReply::BestMove { mv, ponder: None }],
                    None => vec![UciReply::NoMove],
                }
            }
            UciCommand::SetOption { .. } | UciCommand::Stop => vec![],
            UciCommand::Quit => break,
        };

        for reply in replies {
            if writeln!(stdout, "{}", reply.to_uci_string()).is_err() {
                return;
            }
        }
        if stdout.flush().is_err() {
            return;
        }
    }
}

fn seed_from_args() -> Option<u64> {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--seed" {
            return args.next().and_then(|s| s.parse().ok());
        }
    }
    None
}
