//! Fluent builder for constructing game positions.
//!
//! Allows creating positions piece by piece rather than parsing FEN strings.
//!
//! # Example
//! ```
//! use chess_rules::board::{Color, GameBuilder, Piece, Square};
//!
//! let state = GameBuilder::new()
//!     .piece(Square(0, 4), Color::White, Piece::King)
//!     .piece(Square(7, 4), Color::Black, Piece::King)
//!     .piece(Square(1, 0), Color::White, Piece::Pawn)
//!     .side_to_move(Color::White)
//!     .build();
//! assert_eq!(state.legal_moves().len(), 7);
//! ```

use super::{CastleSide, CastlingRights, Color, ColoredPiece, GameState, Grid, Piece, Square};

/// A fluent builder for constructing `GameState` positions.
#[derive(Clone, Debug)]
pub struct GameBuilder {
    grid: Grid,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBuilder {
    /// Create a new empty board builder.
    #[must_use]
    pub fn new() -> Self {
        GameBuilder {
            grid: Grid::empty(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Create a builder starting from the standard initial position.
    #[must_use]
    pub fn starting_position() -> Self {
        GameBuilder {
            grid: Grid::starting_position(),
            castling_rights: CastlingRights::all(),
            ..Self::new()
        }
    }

    /// Place a piece, replacing anything already on the square.
    #[must_use]
    pub fn piece(mut self, square: Square, color: Color, piece: Piece) -> Self {
        self.grid = self
            .grid
            .with_piece_placed(square, ColoredPiece::new(color, piece));
        self
    }

    /// Remove a piece from a square.
    #[must_use]
    pub fn clear(mut self, square: Square) -> Self {
        self.grid = self.grid.with_piece_removed(square);
        self
    }

    #[must_use]
    pub const fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    /// Set castling rights from a `CastlingRights` value.
    #[must_use]
    pub const fn castling(mut self, rights: CastlingRights) -> Self {
        self.castling_rights = rights;
        self
    }

    /// Enable one castling right.
    #[must_use]
    pub const fn castle(mut self, color: Color, side: CastleSide) -> Self {
        self.castling_rights = self.castling_rights.with(color, side);
        self
    }

    #[must_use]
    pub const fn all_castling_rights(mut self) -> Self {
        self.castling_rights = CastlingRights::all();
        self
    }

    #[must_use]
    pub const fn no_castling_rights(mut self) -> Self {
        self.castling_rights = CastlingRights::none();
        self
    }

    /// Set the en passant target square.
    #[must_use]
    pub const fn en_passant(mut self, target: Square) -> Self {
        self.en_passant_target = Some(target);
        self
    }

    #[must_use]
    pub const fn clear_en_passant(mut self) -> Self {
        self.en_passant_target = None;
        self
    }

    /// Set the halfmove clock (for 50-move rule).
    #[must_use]
    pub const fn halfmove_clock(mut self, clock: u32) -> Self {
        self.halfmove_clock = clock;
        self
    }

    #[must_use]
    pub const fn fullmove_number(mut self, number: u32) -> Self {
        self.fullmove_number = number;
        self
    }

    /// Build the game state with an empty history.
    ///
    /// The status is computed for the side to move. A position missing a
    /// king is still built (its status reads as in progress); rules queries
    /// on it report `NoKingFound`.
    #[must_use]
    pub fn build(self) -> GameState {
        let mut state = GameState {
            grid: self.grid,
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights,
            en_passant_target: self.en_passant_target,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            history: Vec::new(),
            status: Default::default(),
        };
        state.status = state.compute_status().unwrap_or_default();
        state
    }
}
