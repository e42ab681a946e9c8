//! External engine orchestration.
//!
//! The game asks a [`MoveProvider`] for the engine side's move. [`UciEngine`]
//! is the provider backed by a real engine process speaking UCI over its
//! standard input and output; [`EngineConfig`] says how to start it.

use std::fmt;

mod config;
mod process;
mod provider;

pub use config::{ConfigError, EngineConfig, DEFAULT_ENGINE_PROGRAM};
pub use process::UciEngine;
pub use provider::MoveProvider;

/// Error type for engine requests.
///
/// None of these change the game: the caller still holds the position it
/// asked about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The engine could not be started, or its process went away
    Unavailable { reason: String },
    /// No answer arrived before the deadline
    Timeout { waited_ms: u64 },
    /// The engine answered with something that is not a move
    MalformedReply { reply: String },
    /// The request was abandoned through its stop flag
    Cancelled,
    /// The engine reported that it has no move to play
    NoMove,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Unavailable { reason } => write!(f, "Engine unavailable: {reason}"),
            EngineError::Timeout { waited_ms } => {
                write!(f, "Engine did not answer within {waited_ms}ms")
            }
            EngineError::MalformedReply { reply } => {
                write!(f, "Malformed engine reply: '{reply}'")
            }
            EngineError::Cancelled => write!(f, "Engine request cancelled"),
            EngineError::NoMove => write!(f, "Engine has no move to play"),
        }
    }
}

impl std::error::Error for EngineError {}
