//! Property-based tests using proptest.
//!
//! Each property plays a random game from the initial position, choosing
//! moves with a seeded `StdRng` so failures shrink to a reproducible seed.

use crate::board::{Color, GameState, Move, MoveKind, Piece, TerminalStatus};
use proptest::prelude::*;
use rand::prelude::*;

/// Strategy to generate a random legal move sequence length
fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=40usize
}

/// Strategy to generate a random seed for move selection
fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

fn random_move(state: &GameState, rng: &mut StdRng) -> Option<Move> {
    state.legal_moves().choose(rng).copied()
}

/// Play up to `plies` random moves, returning every state visited
fn random_walk(seed: u64, plies: usize) -> Vec<GameState> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut states = vec![GameState::new()];
    for _ in 0..plies {
        let current = &states[states.len() - 1];
        let Some(mv) = random_move(current, &mut rng) else {
            break;
        };
        let next = current.apply(mv).unwrap();
        states.push(next);
    }
    states
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: no legal move leaves the mover's own king attacked
    #[test]
    fn prop_mover_never_left_in_check(seed in seed_strategy(), plies in move_count_strategy()) {
        let states = random_walk(seed, plies);
        let state = &states[states.len() - 1];
        let mover = state.side_to_move();
        for mv in state.legal_moves() {
            let next = state.apply(mv).unwrap();
            prop_assert_eq!(next.is_in_check(mover), Ok(false),
                "{} left {} in check from {}", mv, mover, state.to_fen());
        }
    }

    /// Property: castling rights never come back
    #[test]
    fn prop_castling_rights_monotonic(seed in seed_strategy(), plies in move_count_strategy()) {
        let states = random_walk(seed, plies);
        for pair in states.windows(2) {
            prop_assert!(pair[1].castling_rights().is_subset_of(pair[0].castling_rights()));
        }
    }

    /// Property: an en-passant target exists exactly after a double pawn push
    #[test]
    fn prop_en_passant_only_after_double_push(seed in seed_strategy(), plies in move_count_strategy()) {
        for state in random_walk(seed, plies).iter().skip(1) {
            let last = state.last_move().unwrap();
            prop_assert_eq!(
                state.en_passant_target().is_some(),
                last.kind == MoveKind::DoublePawnPush
            );
        }
    }

    /// Property: the fullmove number follows the ply count from the start
    #[test]
    fn prop_fullmove_tracks_plies(seed in seed_strategy(), plies in move_count_strategy()) {
        for state in random_walk(seed, plies) {
            let played = state.history().len() as u32;
            prop_assert_eq!(state.fullmove_number(), played / 2 + 1);
            let expected_side = if played % 2 == 0 { Color::White } else { Color::Black };
            prop_assert_eq!(state.side_to_move(), expected_side);
        }
    }

    /// Property: FEN round-trip preserves position
    #[test]
    fn prop_fen_roundtrip(seed in seed_strategy(), plies in move_count_strategy()) {
        let states = random_walk(seed, plies);
        let state = &states[states.len() - 1];

        let fen = state.to_fen();
        let restored = GameState::try_from_fen(&fen).unwrap();

        prop_assert_eq!(restored.grid(), state.grid());
        prop_assert_eq!(restored.side_to_move(), state.side_to_move());
        prop_assert_eq!(restored.castling_rights(), state.castling_rights());
        prop_assert_eq!(restored.en_passant_target(), state.en_passant_target());
        prop_assert_eq!(restored.halfmove_clock(), state.halfmove_clock());
        prop_assert_eq!(restored.status(), state.status());
        prop_assert_eq!(restored.to_fen(), fen);
    }

    /// Property: each side keeps exactly one king
    #[test]
    fn prop_one_king_each(seed in seed_strategy(), plies in move_count_strategy()) {
        for state in random_walk(seed, plies) {
            for color in Color::BOTH {
                prop_assert_eq!(state.grid().count(color, Piece::King), 1);
            }
        }
    }

    /// Property: the stored status agrees with the detector queries
    #[test]
    fn prop_status_consistent(seed in seed_strategy(), plies in move_count_strategy()) {
        for state in random_walk(seed, plies) {
            let side = state.side_to_move();
            let expected = match (state.is_in_check(side).unwrap(), state.legal_moves().is_empty()) {
                (true, true) => TerminalStatus::Checkmate,
                (true, false) => TerminalStatus::Check,
                (false, true) => TerminalStatus::Stalemate,
                (false, false) => TerminalStatus::InProgress,
            };
            prop_assert_eq!(state.status(), expected);
            prop_assert_eq!(state.is_checkmate(side).unwrap(), expected == TerminalStatus::Checkmate);
            prop_assert_eq!(state.is_stalemate(side).unwrap(), expected == TerminalStatus::Stalemate);
        }
    }

    /// Property: a rejected move leaves nothing changed
    #[test]
    fn prop_rejected_move_is_harmless(seed in seed_strategy(), plies in move_count_strategy(),
                                      from in 0..64usize, to in 0..64usize) {
        let states = random_walk(seed, plies);
        let state = &states[states.len() - 1];
        let before = state.clone();
        let from = crate::board::Square::from_index(from);
        let to = crate::board::Square::from_index(to);
        if state.apply_move(from, to, None).is_err() {
            prop_assert_eq!(state, &before);
        }
    }
}
