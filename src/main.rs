//! Terminal game against an external UCI engine.
//!
//! ```text
//! chess_rules [--human white|black] [--engine <path>] [--movetime <ms>] ...
//! ```
//!
//! Without `--engine` the bundled `random_mover` next to this executable is
//! used. Moves are typed as `e2e4` (`e7e8q` to promote); `moves` lists the
//! legal moves, `new` restarts, `quit` leaves. When the engine fails to
//! answer, the game stays where it was and `retry` asks it again.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use chess_rules::board::{Color, GameState, Move};
use chess_rules::engine::{EngineConfig, UciEngine};
use chess_rules::session::GameSession;
use chess_rules::sync::StopFlag;

const USAGE: &str = "usage: chess_rules [--human white|black] [--engine <path>] \
[--engine-arg <arg>] [--movetime <ms>] [--depth <n>] [--timeout <ms>] \
[--handshake-timeout <ms>] [--option <name>=<value>]";

fn main() -> ExitCode {
    if let Err(e) = chess_rules::logging::init() {
        eprintln!("{e}");
    }

    let (human, config) = match parse_args(env::args().skip(1).collect()) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let mut engine = match UciEngine::start(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    println!(
        "Playing {} against {}",
        human,
        engine.name().unwrap_or("the engine")
    );

    let session = GameSession::new(human);
    let stop = StopFlag::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut engine_paused = false;

    loop {
        let state = session.snapshot();
        print_state(&state);

        if state.is_game_over() {
            println!("Type 'new' to play again or 'quit' to leave.");
        } else if session.is_engine_turn() && !engine_paused {
            match session.play_engine(&mut engine, &stop) {
                Ok(_) => continue,
                Err(e) => {
                    println!("Engine failed: {e}");
                    println!("Type 'retry' to ask again, 'new' to restart or 'quit' to leave.");
                    engine_paused = true;
                }
            }
        }

        print!("{}> ", state.side_to_move());
        let _ = io::stdout().flush();
        let Some(Ok(line)) = lines.next() else {
            break;
        };

        match line.trim() {
            "" => {}
            "quit" | "exit" => break,
            "retry" => engine_paused = false,
            "new" => {
                session.reset();
                engine_paused = false;
                if let Err(e) = engine.new_game() {
                    println!("Engine failed: {e}");
                    engine_paused = true;
                }
            }
            "moves" => {
                let moves: Vec<String> = state.legal_moves().iter().map(Move::to_string).collect();
                println!("{}", moves.join(" "));
            }
            "fen" => println!("{}", state.to_fen()),
            token => match token.parse::<Move>() {
                Ok(mv) => {
                    if let Err(e) = session.play_human(mv.from, mv.to, mv.promotion) {
                        println!("{e}");
                    }
                }
                Err(e) => println!("{e}"),
            },
        }
    }

    ExitCode::SUCCESS
}

fn print_state(state: &GameState) {
    println!();
    println!("{}", state.grid());
    if let Some(last) = state.last_move() {
        println!("Last move: {last}");
    }
    println!("{} to move, {}", state.side_to_move(), state.status());
}

fn parse_args(args: Vec<String>) -> Result<(Color, EngineConfig), String> {
    let mut human = Color::White;
    let mut rest = Vec::new();
    let mut iter = args.into_iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--human" => {
                human = match iter.next().as_deref() {
                    Some("white" | "w") => Color::White,
                    Some("black" | "b") => Color::Black,
                    Some(other) => return Err(format!("Unknown side '{other}'")),
                    None => return Err("--human needs a value".to_string()),
                };
            }
            "-h" | "--help" => return Err("Help requested".to_string()),
            _ => rest.push(arg),
        }
    }

    let has_engine = rest.iter().any(|a| a == "--engine");
    let mut config = EngineConfig::from_args(rest).map_err(|e| e.to_string())?;
    if !has_engine {
        if let Some(bundled) = bundled_engine() {
            config.program = bundled;
        }
    }
    Ok((human, config))
}

/// `random_mover` next to the running executable, if it is there
fn bundled_engine() -> Option<PathBuf> {
    let exe = env::current_exe().ok()?;
    let path = exe
        .parent()?
        .join(format!("random_mover{}", env::consts::EXE_SUFFIX));
    path.is_file().then_some(path)
}
