//! Applying a legal move to produce the successor state.

use super::{CastleSide, Color, GameState, Move, MoveKind, MoveRecord, Piece, RulesError, Square};

impl GameState {
    /// Play `from` -> `to` for the side to move and return the new state.
    ///
    /// `promotion` must be given exactly when a pawn reaches its last rank.
    /// On error `self` is untouched and no new state exists.
    pub fn apply_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Result<GameState, RulesError> {
        let kind = self.check_move(from, to).map_err(|e| {
            log::trace!("rejected {from}{to}: {e}");
            e
        })?;
        validate_promotion(kind, from, to, promotion)?;

        let mut next = self.successor(from, to, kind, promotion)?;
        next.status = next.compute_status()?;

        if let Some(record) = next.last_move() {
            log::debug!("{} played {record}, now {}", record.color, next.status);
        }
        if next.status.is_game_over() {
            log::info!("game over: {} ({} to move)", next.status, next.side_to_move);
        }
        Ok(next)
    }

    /// The state after a move already classified as `kind`, with the status
    /// left as it was.
    pub(crate) fn successor(
        &self,
        from: Square,
        to: Square,
        kind: MoveKind,
        promotion: Option<Piece>,
    ) -> Result<GameState, RulesError> {
        let mover = self
            .grid
            .piece_at(from)
            .ok_or(RulesError::NoPieceAtSource { square: from })?;
        let color = mover.color;
        let captured = match kind {
            MoveKind::EnPassant => Some(Piece::Pawn),
            _ => self.grid.piece_at(to).map(|p| p.piece),
        };

        let mut rights = self.castling_rights;
        if mover.piece == Piece::King {
            rights.clear_color(color);
        }
        if mover.piece == Piece::Rook && from.0 == color.back_rank() {
            if let Some(side) = CastleSide::for_rook_file(from.1) {
                rights.clear(color, side);
            }
        }
        if captured == Some(Piece::Rook) && to.0 == color.opponent().back_rank() {
            if let Some(side) = CastleSide::for_rook_file(to.1) {
                rights.clear(color.opponent(), side);
            }
        }

        let en_passant_target = match kind {
            MoveKind::DoublePawnPush => from.offset(color.pawn_direction(), 0),
            _ => None,
        };

        let halfmove_clock = if mover.piece == Piece::Pawn || captured.is_some() {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
        let fullmove_number = match color {
            Color::White => self.fullmove_number,
            Color::Black => self.fullmove_number.saturating_add(1),
        };

        let mut history = self.history.clone();
        history.push(MoveRecord {
            from,
            to,
            color,
            piece: promotion.unwrap_or(mover.piece),
            captured,
            promotion,
            kind,
        });

        Ok(GameState {
            grid: self.resulting_grid(from, to, kind, promotion),
            side_to_move: color.opponent(),
            castling_rights: rights,
            en_passant_target,
            halfmove_clock,
            fullmove_number,
            history,
            status: self.status,
        })
    }

    /// [`apply_move`](Self::apply_move) for a structured move
    pub fn apply(&self, mv: Move) -> Result<GameState, RulesError> {
        self.apply_move(mv.from, mv.to, mv.promotion)
    }
}

fn validate_promotion(
    kind: MoveKind,
    from: Square,
    to: Square,
    promotion: Option<Piece>,
) -> Result<(), RulesError> {
    match (kind, promotion) {
        (MoveKind::Promotion, None) => Err(RulesError::PromotionRequired { from, to }),
        (MoveKind::Promotion, Some(piece)) if !piece.is_promotion_target() => {
            Err(RulesError::InvalidPromotion { piece })
        }
        (MoveKind::Promotion, Some(_)) | (_, None) => Ok(()),
        (_, Some(piece)) => Err(RulesError::InvalidPromotion { piece }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{CastlingRights, ColoredPiece, GameBuilder, TerminalStatus};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn play(state: &GameState, moves: &[&str]) -> GameState {
        moves.iter().fold(state.clone(), |s, m| {
            s.apply(m.parse().unwrap())
                .unwrap_or_else(|e| panic!("{m}: {e}"))
        })
    }

    #[test]
    fn test_apply_leaves_input_untouched() {
        let start = GameState::new();
        let next = start.apply_move(sq("e2"), sq("e4"), None).unwrap();
        assert_eq!(start, GameState::new());
        assert_ne!(next, start);
        assert_eq!(next.side_to_move(), Color::Black);
    }

    #[test]
    fn test_double_push_sets_en_passant_target() {
        let next = play(&GameState::new(), &["e2e4"]);
        assert_eq!(next.en_passant_target(), Some(sq("e3")));
        let after = play(&next, &["g8f6"]);
        assert_eq!(after.en_passant_target(), None);
    }

    #[test]
    fn test_en_passant_removes_captured_pawn() {
        let state = play(&GameState::new(), &["e2e4", "a7a6", "e4e5", "d7d5"]);
        assert_eq!(state.en_passant_target(), Some(sq("d6")));
        let next = play(&state, &["e5d6"]);
        assert!(next.grid().is_empty(sq("d5")));
        assert_eq!(
            next.grid().piece_at(sq("d6")),
            Some(ColoredPiece::new(Color::White, Piece::Pawn))
        );
        let record = next.last_move().unwrap();
        assert_eq!(record.kind, MoveKind::EnPassant);
        assert_eq!(record.captured, Some(Piece::Pawn));
        assert_eq!(next.halfmove_clock(), 0);
    }

    #[test]
    fn test_en_passant_expires_after_one_ply() {
        let state = play(&GameState::new(), &["e2e4", "a7a6", "e4e5", "d7d5", "b1c3", "a6a5"]);
        assert!(!state.is_legal_move(sq("e5"), sq("d6")));
    }

    #[test]
    fn test_kingside_castle_moves_rook() {
        let state = play(
            &GameState::new(),
            &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "e1g1"],
        );
        let grid = state.grid();
        assert_eq!(
            grid.piece_at(sq("g1")),
            Some(ColoredPiece::new(Color::White, Piece::King))
        );
        assert_eq!(
            grid.piece_at(sq("f1")),
            Some(ColoredPiece::new(Color::White, Piece::Rook))
        );
        assert!(grid.is_empty(sq("h1")));
        assert!(grid.is_empty(sq("e1")));
        assert!(!state.castling_rights().has_any(Color::White));
        assert!(state.castling_rights().has_any(Color::Black));
        assert_eq!(state.last_move().unwrap().kind, MoveKind::CastleKingside);
    }

    #[test]
    fn test_queenside_castle_moves_rook() {
        let state = GameBuilder::new()
            .piece(sq("e8"), Color::Black, Piece::King)
            .piece(sq("a8"), Color::Black, Piece::Rook)
            .piece(sq("e1"), Color::White, Piece::King)
            .side_to_move(Color::Black)
            .all_castling_rights()
            .build();
        let next = state.apply_move(sq("e8"), sq("c8"), None).unwrap();
        assert_eq!(
            next.grid().piece_at(sq("d8")),
            Some(ColoredPiece::new(Color::Black, Piece::Rook))
        );
        assert!(next.grid().is_empty(sq("a8")));
        assert!(!next.castling_rights().has_any(Color::Black));
    }

    #[test]
    fn test_rook_move_clears_one_flag() {
        let state = play(&GameState::new(), &["h2h4", "a7a5", "h1h3"]);
        let rights = state.castling_rights();
        assert!(!rights.has(Color::White, CastleSide::Kingside));
        assert!(rights.has(Color::White, CastleSide::Queenside));
        assert!(rights.has(Color::Black, CastleSide::Kingside));
    }

    #[test]
    fn test_capturing_rook_on_corner_clears_victim_flag() {
        let state = GameBuilder::new()
            .piece(sq("e1"), Color::White, Piece::King)
            .piece(sq("h1"), Color::White, Piece::Rook)
            .piece(sq("e8"), Color::Black, Piece::King)
            .piece(sq("h8"), Color::Black, Piece::Rook)
            .all_castling_rights()
            .build();
        let next = state.apply_move(sq("h1"), sq("h8"), None).unwrap();
        let rights = next.castling_rights();
        assert!(!rights.has(Color::Black, CastleSide::Kingside));
        assert!(rights.has(Color::Black, CastleSide::Queenside));
        assert!(!rights.has(Color::White, CastleSide::Kingside));
        assert!(rights.is_subset_of(CastlingRights::all()));
    }

    #[test]
    fn test_promotion_choices() {
        let state = GameBuilder::new()
            .piece(sq("a1"), Color::White, Piece::King)
            .piece(sq("h8"), Color::Black, Piece::King)
            .piece(sq("b7"), Color::White, Piece::Pawn)
            .build();
        assert_eq!(
            state.apply_move(sq("b7"), sq("b8"), None),
            Err(RulesError::PromotionRequired {
                from: sq("b7"),
                to: sq("b8")
            })
        );
        assert_eq!(
            state.apply_move(sq("b7"), sq("b8"), Some(Piece::King)),
            Err(RulesError::InvalidPromotion { piece: Piece::King })
        );
        let next = state.apply_move(sq("b7"), sq("b8"), Some(Piece::Knight)).unwrap();
        assert_eq!(
            next.grid().piece_at(sq("b8")),
            Some(ColoredPiece::new(Color::White, Piece::Knight))
        );
        let record = next.last_move().unwrap();
        assert_eq!(record.promotion, Some(Piece::Knight));
        assert_eq!(record.piece, Piece::Knight);

        let queened = state.apply_move(sq("b7"), sq("b8"), Some(Piece::Queen)).unwrap();
        assert_eq!(queened.last_move().unwrap().piece, Piece::Queen);

        let quiet = state.apply_move(sq("a1"), sq("a2"), None).unwrap();
        assert_eq!(quiet.last_move().unwrap().piece, Piece::King);
    }

    #[test]
    fn test_counters_saturate_at_max() {
        let state = GameState::try_from_fen("4k1n1/8/8/8/8/8/8/4K3 b - - 0 4294967295").unwrap();
        let next = state.apply_move(sq("g8"), sq("f6"), None).unwrap();
        assert_eq!(next.fullmove_number(), u32::MAX);
        assert_eq!(next.halfmove_clock(), 1);

        let state = GameState::try_from_fen("4k3/8/8/8/8/8/8/4K1N1 w - - 4294967295 1").unwrap();
        let next = state.apply_move(sq("g1"), sq("f3"), None).unwrap();
        assert_eq!(next.halfmove_clock(), u32::MAX);
        assert_eq!(next.fullmove_number(), 1);
    }

    #[test]
    fn test_promotion_on_non_promoting_move_rejected() {
        let state = GameState::new();
        assert_eq!(
            state.apply_move(sq("e2"), sq("e4"), Some(Piece::Queen)),
            Err(RulesError::InvalidPromotion { piece: Piece::Queen })
        );
    }

    #[test]
    fn test_clocks() {
        let state = play(&GameState::new(), &["g1f3"]);
        assert_eq!(state.halfmove_clock(), 1);
        assert_eq!(state.fullmove_number(), 1);
        let state = play(&state, &["g8f6"]);
        assert_eq!(state.halfmove_clock(), 2);
        assert_eq!(state.fullmove_number(), 2);
        let state = play(&state, &["e2e4"]);
        assert_eq!(state.halfmove_clock(), 0);
        assert_eq!(state.fullmove_number(), 2);
    }

    #[test]
    fn test_history_records_moves() {
        let state = play(&GameState::new(), &["e2e4", "e7e5", "g1f3"]);
        let tokens: Vec<String> = state
            .history()
            .iter()
            .map(|r| r.as_move().to_string())
            .collect();
        assert_eq!(tokens, ["e2e4", "e7e5", "g1f3"]);
        assert_eq!(state.history()[1].color, Color::Black);
    }

    #[test]
    fn test_same_move_twice_rejected() {
        // the source square is empty after the first play, which is reported
        // ahead of any side-to-move or geometry check
        let state = play(&GameState::new(), &["e2e4"]);
        assert!(matches!(
            state.apply_move(sq("e2"), sq("e4"), None),
            Err(RulesError::NoPieceAtSource { .. })
        ));
    }

    #[test]
    fn test_status_updated_after_move() {
        let state = play(&GameState::new(), &["e2e4", "f7f6", "d2d4", "g7g5"]);
        assert_eq!(state.status(), TerminalStatus::InProgress);
        let mated = play(&state, &["d1h5"]);
        assert_eq!(mated.status(), TerminalStatus::Checkmate);
        assert!(mated.is_game_over());
    }
}
