//! Universal Chess Interface (UCI) protocol types.
//!
//! Both directions of the conversation are modelled: [`UciCommand`] is what
//! the game sends an engine, [`UciReply`] is what comes back. Spawning and
//! talking to an engine process lives in [`crate::engine`].

use std::fmt;

use crate::board::{FenError, GameState, Move, MoveParseError, RulesError};

pub mod command;
pub mod reply;

pub use command::{GoLimit, UciCommand};
pub use reply::UciReply;

/// Error type for rebuilding a position from a `position` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciError {
    /// Invalid FEN string
    InvalidFen(FenError),
    /// A move in the move list is not a valid token
    InvalidMove {
        move_str: String,
        error: MoveParseError,
    },
    /// A move in the move list is not legal in the position it is played in
    IllegalMove { move_str: String, error: RulesError },
}

impl fmt::Display for UciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UciError::InvalidFen(e) => write!(f, "Invalid FEN: {e}"),
            UciError::InvalidMove { move_str, error } => {
                write!(f, "Invalid move '{move_str}': {error}")
            }
            UciError::IllegalMove { move_str, error } => {
                write!(f, "Illegal move '{move_str}': {error}")
            }
        }
    }
}

impl std::error::Error for UciError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UciError::InvalidFen(e) => Some(e),
            UciError::InvalidMove { error, .. } => Some(error),
            UciError::IllegalMove { error, .. } => Some(error),
        }
    }
}

impl From<FenError> for UciError {
    fn from(e: FenError) -> Self {
        UciError::InvalidFen(e)
    }
}

/// Rebuild the game a `position` command describes: the start position (or
/// `fen`) followed by every move in `moves`.
pub fn position_from_parts<S: AsRef<str>>(
    fen: Option<&str>,
    moves: &[S],
) -> Result<GameState, UciError> {
    let mut state = match fen {
        Some(fen) => GameState::try_from_fen(fen)?,
        None => GameState::new(),
    };

    for token in moves {
        let token = token.as_ref();
        let mv = token.parse::<Move>().map_err(|error| UciError::InvalidMove {
            move_str: token.to_string(),
            error,
        })?;
        state = state.apply(mv).map_err(|error| UciError::IllegalMove {
            move_str: token.to_string(),
            error,
        })?;
    }

    Ok(state)
}
