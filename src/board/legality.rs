//! Move legality.
//!
//! A candidate (from, to) is first tested against the moving piece's
//! geometry (pseudo-legality), then played out on a scratch copy of the grid,
//! including the en-passant victim's removal and the castling rook's hop. The
//! move is legal only if the mover's king is not attacked afterwards.

use super::attacks::{
    is_diagonal, is_king_step, is_knight_jump, is_path_clear, is_square_attacked, is_straight,
};
use super::{
    CastleSide, Color, ColoredPiece, GameState, Grid, Move, MoveKind, Piece, RulesError, Square,
    PROMOTION_PIECES,
};

/// Build the error for a kingless position, making sure it is seen.
pub(crate) fn missing_king(color: Color) -> RulesError {
    log::error!("invariant violated: no {color} king on the board");
    RulesError::NoKingFound { color }
}

impl GameState {
    /// Classify `from` -> `to` for the side to move, or explain why it is
    /// not a legal move.
    pub fn check_move(&self, from: Square, to: Square) -> Result<MoveKind, RulesError> {
        let from = from.validate()?;
        let to = to.validate()?;

        let mover = self
            .grid
            .piece_at(from)
            .ok_or(RulesError::NoPieceAtSource { square: from })?;
        if mover.color != self.side_to_move {
            return Err(RulesError::WrongSideToMove {
                square: from,
                to_move: self.side_to_move,
            });
        }
        if self.grid.color_on(to) == Some(mover.color) {
            return Err(RulesError::IllegalMove { from, to });
        }

        let kind = self
            .pseudo_legal_kind(mover, from, to)
            .ok_or(RulesError::IllegalMove { from, to })?;

        let after = self.resulting_grid(from, to, kind, None);
        let king = after
            .find_king(mover.color)
            .ok_or_else(|| missing_king(mover.color))?;
        if is_square_attacked(king, mover.color.opponent(), &after) {
            return Err(RulesError::IllegalMove { from, to });
        }

        Ok(kind)
    }

    /// True if the side to move may play `from` -> `to`
    #[must_use]
    pub fn is_legal_move(&self, from: Square, to: Square) -> bool {
        self.check_move(from, to).is_ok()
    }

    /// Every legal move for the side to move. Promotions appear once per
    /// promotion piece.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        self.classified_moves().into_iter().map(|(mv, _)| mv).collect()
    }

    /// Legal moves paired with their kind
    pub(crate) fn classified_moves(&self) -> Vec<(Move, MoveKind)> {
        let mut moves = Vec::new();
        for (from, _) in self.grid.pieces(self.side_to_move) {
            for to in Square::all() {
                match self.check_move(from, to) {
                    Ok(MoveKind::Promotion) => {
                        moves.extend(PROMOTION_PIECES.iter().map(|&piece| {
                            (Move::with_promotion(from, to, piece), MoveKind::Promotion)
                        }));
                    }
                    Ok(kind) => moves.push((Move::new(from, to), kind)),
                    Err(_) => {}
                }
            }
        }
        moves
    }

    /// Legal destinations of the piece on `from` (empty if it cannot move or
    /// is not the side to move's)
    #[must_use]
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        Square::all()
            .filter(|&to| self.is_legal_move(from, to))
            .collect()
    }

    /// True if the side to move has at least one legal move
    pub(crate) fn has_legal_move(&self) -> Result<bool, RulesError> {
        for (from, _) in self.grid.pieces(self.side_to_move) {
            for to in Square::all() {
                match self.check_move(from, to) {
                    Ok(_) => return Ok(true),
                    Err(e @ RulesError::NoKingFound { .. }) => return Err(e),
                    Err(_) => {}
                }
            }
        }
        Ok(false)
    }

    /// Geometry test for `mover` going `from` -> `to`, ignoring king safety.
    /// The destination is known not to hold a friendly piece.
    fn pseudo_legal_kind(&self, mover: ColoredPiece, from: Square, to: Square) -> Option<MoveKind> {
        let grid = &self.grid;
        match mover.piece {
            Piece::Pawn => self.pawn_move_kind(mover.color, from, to),
            Piece::Knight => is_knight_jump(from, to).then_some(MoveKind::Normal),
            Piece::Bishop => {
                (is_diagonal(from, to) && is_path_clear(from, to, grid)).then_some(MoveKind::Normal)
            }
            Piece::Rook => {
                (is_straight(from, to) && is_path_clear(from, to, grid)).then_some(MoveKind::Normal)
            }
            Piece::Queen => ((is_straight(from, to) || is_diagonal(from, to))
                && is_path_clear(from, to, grid))
            .then_some(MoveKind::Normal),
            Piece::King => {
                if is_king_step(from, to) {
                    Some(MoveKind::Normal)
                } else {
                    self.castle_side(mover.color, from, to).map(|side| match side {
                        CastleSide::Kingside => MoveKind::CastleKingside,
                        CastleSide::Queenside => MoveKind::CastleQueenside,
                    })
                }
            }
        }
    }

    fn pawn_move_kind(&self, color: Color, from: Square, to: Square) -> Option<MoveKind> {
        let grid = &self.grid;
        let dir = color.pawn_direction();
        let (dr, df) = from.delta(to);
        let reaches_last_rank = to.0 == color.pawn_promotion_rank();
        let advance = if reaches_last_rank {
            MoveKind::Promotion
        } else {
            MoveKind::Normal
        };

        if df == 0 {
            if dr == dir && grid.is_empty(to) {
                return Some(advance);
            }
            if dr == 2 * dir && from.0 == color.pawn_start_rank() && grid.is_empty(to) {
                let skipped = from.offset(dir, 0)?;
                return grid.is_empty(skipped).then_some(MoveKind::DoublePawnPush);
            }
            return None;
        }

        if df.abs() == 1 && dr == dir {
            match grid.piece_at(to) {
                Some(target) if target.color != color => return Some(advance),
                Some(_) => return None,
                None => {
                    return self
                        .en_passant_allowed(color, from, to)
                        .then_some(MoveKind::EnPassant)
                }
            }
        }

        None
    }

    /// A diagonal pawn step onto the en-passant target, with the enemy pawn
    /// that just advanced standing beside the capturer.
    fn en_passant_allowed(&self, color: Color, from: Square, to: Square) -> bool {
        if self.en_passant_target != Some(to) {
            return false;
        }
        let victim = Square(from.0, to.1);
        self.grid.piece_at(victim) == Some(ColoredPiece::new(color.opponent(), Piece::Pawn))
    }

    /// Which wing a two-file king move castles to, if every castling
    /// condition holds.
    fn castle_side(&self, color: Color, from: Square, to: Square) -> Option<CastleSide> {
        let back = color.back_rank();
        if from != Square(back, 4) || to.0 != back {
            return None;
        }
        let side = match to.1 {
            6 => CastleSide::Kingside,
            2 => CastleSide::Queenside,
            _ => return None,
        };
        if !self.castling_rights.has(color, side) {
            return None;
        }

        let grid = &self.grid;
        let rook_sq = Square(back, side.rook_from_file());
        if grid.piece_at(rook_sq) != Some(ColoredPiece::new(color, Piece::Rook)) {
            return None;
        }
        if !is_path_clear(from, rook_sq, grid) {
            return None;
        }

        let opponent = color.opponent();
        let king_path = [from.1, (from.1 + to.1) / 2, to.1];
        if king_path
            .iter()
            .any(|&file| is_square_attacked(Square(back, file), opponent, grid))
        {
            return None;
        }

        Some(side)
    }

    /// The grid after playing `from` -> `to` as a move of `kind`.
    ///
    /// `promotion` replaces the pawn on arrival; the check-safety simulation
    /// passes `None` since the promoted piece's type cannot affect whether
    /// its own king is attacked.
    pub(crate) fn resulting_grid(
        &self,
        from: Square,
        to: Square,
        kind: MoveKind,
        promotion: Option<Piece>,
    ) -> Grid {
        let mut grid = self.grid.with_piece_moved(from, to);
        match kind {
            MoveKind::EnPassant => {
                grid = grid.with_piece_removed(Square(from.0, to.1));
            }
            MoveKind::CastleKingside | MoveKind::CastleQueenside => {
                let side = if kind == MoveKind::CastleKingside {
                    CastleSide::Kingside
                } else {
                    CastleSide::Queenside
                };
                grid = grid.with_piece_moved(
                    Square(from.0, side.rook_from_file()),
                    Square(from.0, side.rook_to_file()),
                );
            }
            MoveKind::Promotion => {
                if let Some(piece) = promotion {
                    grid = grid.with_piece_placed(to, ColoredPiece::new(self.side_to_move, piece));
                }
            }
            MoveKind::Normal | MoveKind::DoublePawnPush => {}
        }
        grid
    }
}
