//! Position notation (FEN) and engine move tokens.

use std::str::FromStr;

use super::error::{FenError, MoveParseError};
use super::{
    CastleSide, CastlingRights, Color, ColoredPiece, GameState, Grid, Move, Piece, Square,
};

impl GameState {
    /// Parse a game state from FEN notation.
    ///
    /// The halfmove clock and fullmove number are optional and default to
    /// `0` and `1`. Each color must have exactly one king.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        let grid = parse_placement(parts[0])?;
        for color in Color::BOTH {
            let kings = grid.count(color, Piece::King);
            if kings != 1 {
                return Err(FenError::InvalidKingCount {
                    color,
                    found: kings,
                });
            }
        }

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        let mut castling_rights = CastlingRights::none();
        if parts[2] != "-" {
            for c in parts[2].chars() {
                let (color, side) = match c {
                    'K' => (Color::White, CastleSide::Kingside),
                    'Q' => (Color::White, CastleSide::Queenside),
                    'k' => (Color::Black, CastleSide::Kingside),
                    'q' => (Color::Black, CastleSide::Queenside),
                    _ => return Err(FenError::InvalidCastling { char: c }),
                };
                castling_rights = castling_rights.with(color, side);
            }
        }

        let en_passant_target = match parts[3] {
            "-" => None,
            field => {
                let invalid = || FenError::InvalidEnPassant {
                    found: field.to_string(),
                };
                let sq: Square = field.parse().map_err(|_| invalid())?;
                if sq.0 != 2 && sq.0 != 5 {
                    return Err(invalid());
                }
                Some(sq)
            }
        };

        let halfmove_clock = match parts.get(4) {
            Some(field) => parse_counter(field)?,
            None => 0,
        };
        let fullmove_number = match parts.get(5) {
            Some(field) => match parse_counter(field)? {
                0 => {
                    return Err(FenError::InvalidCounter {
                        found: (*field).to_string(),
                    })
                }
                n => n,
            },
            None => 1,
        };

        let mut state = GameState {
            grid,
            side_to_move,
            castling_rights,
            en_passant_target,
            halfmove_clock,
            fullmove_number,
            history: Vec::new(),
            status: Default::default(),
        };
        state.status = state.compute_status().unwrap_or_default();
        Ok(state)
    }

    /// Convert the game state to FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                match self.grid.piece_at(Square(rank, file)) {
                    Some(piece) => {
                        if empty > 0 {
                            row.push_str(&empty.to_string());
                            empty = 0;
                        }
                        row.push(piece.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let ep = self
            .en_passant_target
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            self.side_to_move.fen_char(),
            self.castling_rights,
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// The position string sent to an engine
    #[inline]
    #[must_use]
    pub fn encode_for_engine(&self) -> String {
        self.to_fen()
    }
}

impl FromStr for GameState {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameState::try_from_fen(s)
    }
}

/// Decode an engine's best-move token (e.g. `e2e4`, `e7e8q`).
///
/// Surrounding whitespace is ignored. Only the syntax is checked here.
pub fn decode_engine_reply(token: &str) -> Result<Move, MoveParseError> {
    token.trim().parse()
}

fn parse_placement(field: &str) -> Result<Grid, FenError> {
    let rows: Vec<&str> = field.split('/').collect();
    if rows.len() != 8 {
        return Err(FenError::InvalidRankCount { found: rows.len() });
    }

    let mut grid = Grid::empty();
    for (row_idx, row) in rows.iter().enumerate() {
        let rank = 7 - row_idx;
        let mut file = 0;
        for c in row.chars() {
            match c {
                '1'..='8' => file += c as usize - '0' as usize,
                _ => {
                    let piece =
                        ColoredPiece::from_fen_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                    if file < 8 {
                        grid = grid.with_piece_placed(Square(rank, file), piece);
                    }
                    file += 1;
                }
            }
        }
        if file != 8 {
            return Err(FenError::InvalidFileCount {
                rank: rank + 1,
                files: file,
            });
        }
    }
    Ok(grid)
}

fn parse_counter(field: &str) -> Result<u32, FenError> {
    field.parse().map_err(|_| FenError::InvalidCounter {
        found: field.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TerminalStatus;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn test_initial_position_encoding() {
        assert_eq!(GameState::new().to_fen(), START);
        assert_eq!(GameState::new().encode_for_engine(), START);
    }

    #[test]
    fn test_fen_round_trip() {
        let fens = [
            START,
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 12 40",
            "8/8/8/8/8/8/8/K1k5 b - - 99 120",
        ];
        for fen in fens {
            assert_eq!(GameState::try_from_fen(fen).unwrap().to_fen(), fen);
        }
    }

    #[test]
    fn test_encoding_after_moves() {
        let state = GameState::new()
            .apply_move(Square(1, 4), Square(3, 4), None)
            .unwrap();
        assert_eq!(
            state.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
        let state = state
            .apply_move(Square(7, 6), Square(5, 5), None)
            .unwrap();
        assert_eq!(
            state.to_fen(),
            "rnbqkb1r/pppppppp/5n2/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 1 2"
        );
    }

    #[test]
    fn test_fen_black_to_move() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let state = GameState::try_from_fen(fen).unwrap();
        assert_eq!(state.side_to_move(), Color::Black);
        assert_eq!(state.en_passant_target(), Some(Square(2, 4)));
    }

    #[test]
    fn test_counters_optional() {
        let state =
            GameState::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -")
                .unwrap();
        assert_eq!(state.halfmove_clock(), 0);
        assert_eq!(state.fullmove_number(), 1);
    }

    #[test]
    fn test_fen_status_computed() {
        let state = GameState::try_from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(state.status(), TerminalStatus::Stalemate);
    }

    #[test]
    fn test_fen_error_too_few_parts() {
        let result = GameState::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w");
        assert!(matches!(result, Err(FenError::TooFewParts { found: 2 })));
    }

    #[test]
    fn test_fen_error_invalid_piece() {
        let result =
            GameState::try_from_fen("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidPiece { char: 'x' })));
    }

    #[test]
    fn test_fen_error_rank_and_file_counts() {
        let result = GameState::try_from_fen("rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -");
        assert!(matches!(result, Err(FenError::InvalidRankCount { found: 7 })));

        let result =
            GameState::try_from_fen("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -");
        assert!(matches!(
            result,
            Err(FenError::InvalidFileCount { rank: 7, files: 7 })
        ));

        let result =
            GameState::try_from_fen("rnbqkbnr/pppppppp/54/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -");
        assert!(matches!(result, Err(FenError::InvalidFileCount { .. })));
    }

    #[test]
    fn test_fen_error_king_count() {
        let result = GameState::try_from_fen("8/8/8/8/8/8/8/K7 w - - 0 1");
        assert!(matches!(
            result,
            Err(FenError::InvalidKingCount {
                color: Color::Black,
                found: 0
            })
        ));
        let result = GameState::try_from_fen("kk6/8/8/8/8/8/8/K7 w - - 0 1");
        assert!(matches!(
            result,
            Err(FenError::InvalidKingCount {
                color: Color::Black,
                found: 2
            })
        ));
    }

    #[test]
    fn test_fen_error_invalid_side_to_move() {
        let result =
            GameState::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidSideToMove { .. })));
    }

    #[test]
    fn test_fen_error_invalid_castling() {
        let result =
            GameState::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w XQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidCastling { char: 'X' })));
    }

    #[test]
    fn test_fen_error_invalid_en_passant() {
        for ep in ["z9", "e4"] {
            let fen = format!("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq {ep} 0 1");
            assert!(matches!(
                GameState::try_from_fen(&fen),
                Err(FenError::InvalidEnPassant { .. })
            ));
        }
    }

    #[test]
    fn test_fen_error_invalid_counter() {
        let result =
            GameState::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1");
        assert!(matches!(result, Err(FenError::InvalidCounter { .. })));
        let result =
            GameState::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0");
        assert!(matches!(result, Err(FenError::InvalidCounter { .. })));
    }

    #[test]
    fn test_fen_partial_castling() {
        let state =
            GameState::try_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").unwrap();
        let rights = state.castling_rights();
        assert!(rights.has(Color::White, CastleSide::Kingside));
        assert!(!rights.has(Color::White, CastleSide::Queenside));
        assert!(!rights.has(Color::Black, CastleSide::Kingside));
        assert!(rights.has(Color::Black, CastleSide::Queenside));
    }

    #[test]
    fn test_from_str_trait() {
        let state: GameState = START.parse().unwrap();
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_decode_engine_reply() {
        assert_eq!(
            decode_engine_reply("e2e4\n"),
            Ok(Move::new(Square(1, 4), Square(3, 4)))
        );
        assert_eq!(
            decode_engine_reply("a7a8q"),
            Ok(Move::with_promotion(Square(6, 0), Square(7, 0), Piece::Queen))
        );
    }

    #[test]
    fn test_decode_engine_reply_errors() {
        assert!(matches!(
            decode_engine_reply("e2"),
            Err(MoveParseError::InvalidLength { len: 2, .. })
        ));
        assert!(matches!(
            decode_engine_reply("z9z9"),
            Err(MoveParseError::InvalidSquare { .. })
        ));
        assert!(matches!(
            decode_engine_reply("a7a8k"),
            Err(MoveParseError::InvalidPromotion { char: 'k', .. })
        ));
        assert!(matches!(
            decode_engine_reply("a7a8Q"),
            Err(MoveParseError::InvalidPromotion { .. })
        ));
    }

    #[test]
    fn test_decoded_illegal_move_rejected_on_apply() {
        let mv = decode_engine_reply("e2e5").unwrap();
        assert!(GameState::new().apply(mv).is_err());
    }
}
