//! Chess rules and game state.
//!
//! A [`GameState`] is an immutable-by-convention value: every query takes
//! `&self`, and [`GameState::apply_move`] returns the successor state instead
//! of changing the one it was called on. Supports full chess rules including
//! castling, en passant, promotions, check, checkmate and stalemate.
//!
//! # Example
//! ```
//! use chess_rules::board::{GameState, Square, TerminalStatus};
//!
//! let state = GameState::new();
//! assert_eq!(state.legal_moves().len(), 20);
//!
//! let next = state.apply_move(Square(1, 4), Square(3, 4), None).unwrap();
//! assert_eq!(next.status(), TerminalStatus::InProgress);
//! assert_eq!(
//!     next.to_fen(),
//!     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
//! );
//! ```

mod apply;
pub mod attacks;
mod builder;
mod error;
mod fen;
mod grid;
mod legality;
mod perft;
pub mod prelude;
mod state;
mod status;
mod types;

#[cfg(test)]
mod tests;

pub use builder::GameBuilder;
pub use error::{FenError, MoveParseError, RulesError, SquareError};
pub use fen::decode_engine_reply;
pub use grid::Grid;
pub use state::{GameState, TerminalStatus};
pub use types::{
    CastleSide, CastlingRights, Color, ColoredPiece, Move, MoveKind, MoveRecord, Piece, Square,
    PROMOTION_PIECES,
};
