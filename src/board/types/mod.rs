//! Core chess types.
//!
//! This module contains the fundamental types used throughout the rules engine:
//! - `Piece`, `Color` and `ColoredPiece` - chess piece types and colors
//! - `Square` - (rank, file) board coordinate
//! - `Move` and `MoveRecord` - engine-facing moves and history entries
//! - `CastlingRights` - castling state

mod castling;
mod moves;
mod piece;
mod square;

pub use castling::{CastleSide, CastlingRights};
pub use moves::{Move, MoveKind, MoveRecord};
pub use piece::{Color, ColoredPiece, Piece, PROMOTION_PIECES};
pub use square::Square;
