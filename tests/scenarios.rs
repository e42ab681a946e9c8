use chess_rules::board::prelude::*;
use chess_rules::board::{CastleSide, MoveKind};
use chess_rules::uci::position_from_parts;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

#[test]
fn ruy_lopez_with_castling() {
    let state = position_from_parts(
        None,
        &[
            "e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "a7a6", "b5a4", "g8f6", "e1g1",
        ],
    )
    .unwrap();

    assert_eq!(
        state.to_fen(),
        "r1bqkb1r/1ppp1ppp/p1n2n2/4p3/B3P3/5N2/PPPP1PPP/RNBQ1RK1 b kq - 3 5"
    );
    let last = state.last_move().unwrap();
    assert_eq!(last.kind, MoveKind::CastleKingside);
    assert!(!state.castling_rights().has(Color::White, CastleSide::Kingside));
    assert!(state.castling_rights().has(Color::Black, CastleSide::Queenside));
}

#[test]
fn en_passant_window_opens_and_closes() {
    let state = position_from_parts(None, &["e2e4", "a7a6", "e4e5", "d7d5"]).unwrap();
    assert_eq!(
        state.to_fen(),
        "rnbqkbnr/1pp1pppp/p7/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3"
    );
    assert!(state.is_legal_move(sq("e5"), sq("d6")));

    let taken = state.apply_move(sq("e5"), sq("d6"), None).unwrap();
    assert_eq!(
        taken.to_fen(),
        "rnbqkbnr/1pp1pppp/p2P4/8/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 3"
    );
    assert_eq!(taken.last_move().unwrap().kind, MoveKind::EnPassant);

    // one tempo later the capture is gone
    let waited = state
        .apply_move(sq("g1"), sq("f3"), None)
        .and_then(|s| s.apply_move(sq("h7"), sq("h6"), None))
        .unwrap();
    assert_eq!(waited.en_passant_target(), None);
    assert!(!waited.is_legal_move(sq("e5"), sq("d6")));
}

#[test]
fn hover_queries_do_not_change_the_game() {
    let state = GameState::new();
    let before = state.clone();

    let mut knight = state.legal_destinations(sq("g1"));
    knight.sort_by_key(|s| (s.0, s.1));
    assert_eq!(knight, vec![sq("f3"), sq("h3")]);
    assert!(state.legal_destinations(sq("e4")).is_empty());
    assert!(!state.is_legal_move(sq("e7"), sq("e5")));

    assert!(state.apply_move(sq("e2"), sq("e5"), None).is_err());
    assert_eq!(state, before);
}

#[test]
fn promotion_needs_a_choice() {
    let state = GameBuilder::new()
        .piece(sq("e1"), Color::White, Piece::King)
        .piece(sq("e8"), Color::Black, Piece::King)
        .piece(sq("a7"), Color::White, Piece::Pawn)
        .build();

    assert_eq!(
        state.apply_move(sq("a7"), sq("a8"), None),
        Err(RulesError::PromotionRequired {
            from: sq("a7"),
            to: sq("a8")
        })
    );

    let promoted = state
        .apply_move(sq("a7"), sq("a8"), Some(Piece::Rook))
        .unwrap();
    assert_eq!(promoted.status(), TerminalStatus::Check);
    assert_eq!(promoted.to_fen(), "R3k3/8/8/8/8/8/8/4K3 b - - 0 1");
}

#[test]
fn engine_round_trip_through_notation() {
    let state = position_from_parts(None, &["d2d4", "g8f6"]).unwrap();
    let fen = state.encode_for_engine();
    let parsed: GameState = fen.parse().unwrap();
    assert_eq!(parsed.to_fen(), fen);

    let reply = decode_engine_reply(" c2c4\n").unwrap();
    let next = parsed.apply(reply).unwrap();
    assert_eq!(next.side_to_move(), Color::Black);
    assert_eq!(next.fullmove_number(), 2);

    assert!(decode_engine_reply("c2c9").is_err());
}
