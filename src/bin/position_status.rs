use std::env;
use std::process::ExitCode;

use chess_rules::board::GameState;
use chess_rules::uci::position_from_parts;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("usage: position_status [--fen <fen>] <move1> <move2> ...");
        return ExitCode::FAILURE;
    }

    let (fen, moves) = match args.split_first() {
        Some((flag, rest)) if flag == "--fen" => match rest.split_first() {
            Some((fen, moves)) => (Some(fen.as_str()), moves),
            None => {
                eprintln!("--fen needs a value");
                return ExitCode::FAILURE;
            }
        },
        _ => (None, args.as_slice()),
    };

    let state = match position_from_parts(fen, moves) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match report(&state) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn report(state: &GameState) -> Result<(), chess_rules::board::RulesError> {
    let mover = state.side_to_move();
    let legal_moves = state.legal_moves();

    println!("fen: {}", state.to_fen());
    println!("side_to_move: {mover}");
    println!("legal_moves: {}", legal_moves.len());
    println!("check: {}", state.is_in_check(mover)?);
    println!("checkmate: {}", state.is_checkmate(mover)?);
    println!("stalemate: {}", state.is_stalemate(mover)?);
    for mv in &legal_moves {
        println!("{mv}");
    }
    Ok(())
}
