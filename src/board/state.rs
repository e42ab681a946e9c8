use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{CastlingRights, Color, Grid, MoveRecord, Square};

/// Whether the game is still going for the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TerminalStatus {
    #[default]
    InProgress,
    /// The side to move is in check but has a way out
    Check,
    /// The side to move is in check with no legal move
    Checkmate,
    /// The side to move is not in check and has no legal move (a draw)
    Stalemate,
}

impl TerminalStatus {
    #[inline]
    #[must_use]
    pub const fn is_game_over(self) -> bool {
        matches!(self, TerminalStatus::Checkmate | TerminalStatus::Stalemate)
    }
}

impl fmt::Display for TerminalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TerminalStatus::InProgress => "in progress",
            TerminalStatus::Check => "check",
            TerminalStatus::Checkmate => "checkmate",
            TerminalStatus::Stalemate => "stalemate",
        };
        f.write_str(text)
    }
}

/// Complete state of one game.
///
/// A value type: the rules operations read it through `&self` and
/// `apply_move` returns the successor state, so a state held by a reader is
/// never modified behind its back.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameState {
    pub(crate) grid: Grid,
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) history: Vec<MoveRecord>,
    pub(crate) status: TerminalStatus,
}

impl GameState {
    /// The standard initial position, White to move, all castling rights
    #[must_use]
    pub fn new() -> Self {
        GameState {
            grid: Grid::starting_position(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::all(),
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
            status: TerminalStatus::InProgress,
        }
    }

    #[inline]
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// Square skipped by the pawn that just advanced two ranks, if any
    #[inline]
    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    /// Plies since the last capture or pawn move
    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Moves played since this state was set up, oldest first
    #[inline]
    #[must_use]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    #[inline]
    #[must_use]
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /// Status for the side to move, as of the last applied move
    #[inline]
    #[must_use]
    pub fn status(&self) -> TerminalStatus {
        self.status
    }

    #[inline]
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over()
    }

    /// Fifty-move rule: a hundred plies without a capture or pawn move
    #[must_use]
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Neither side has enough material left to deliver mate.
    ///
    /// Covers bare kings, a single minor piece, and bishops that all stand on
    /// squares of one color.
    #[must_use]
    pub fn is_insufficient_material(&self) -> bool {
        use super::Piece;

        let mut minors = 0;
        let mut knights = 0;
        let mut bishop_square_colors = [false; 2];
        for (sq, piece) in self.grid.occupied() {
            match piece.piece {
                Piece::King => {}
                Piece::Pawn | Piece::Rook | Piece::Queen => return false,
                Piece::Knight => {
                    minors += 1;
                    knights += 1;
                }
                Piece::Bishop => {
                    minors += 1;
                    bishop_square_colors[(sq.0 + sq.1) % 2] = true;
                }
            }
        }

        if minors <= 1 {
            return true;
        }
        knights == 0 && !(bishop_square_colors[0] && bishop_square_colors[1])
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.grid)?;
        write!(
            f,
            "{} to move, move {} ({})",
            self.side_to_move, self.fullmove_number, self.status
        )
    }
}
