//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! # Example
//! ```
//! use chess_rules::board::prelude::*;
//!
//! let state = GameState::new();
//! assert!(state.is_legal_move(Square(0, 6), Square(2, 5)));
//! ```

pub use super::{
    decode_engine_reply, Color, FenError, GameBuilder, GameState, Move, MoveParseError, Piece,
    RulesError, Square, SquareError, TerminalStatus,
};
