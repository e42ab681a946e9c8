pub mod board;
pub mod engine;
pub mod logging;
pub mod session;
pub mod sync;
pub mod uci;

pub use board::{Color, GameState, Move, Piece, Square, TerminalStatus};
pub use engine::{EngineConfig, EngineError, MoveProvider, UciEngine};
pub use session::{GameSession, SessionError};
pub use sync::StopFlag;
