//! The seam between the game and whatever picks the engine side's moves.

use crate::board::Move;
use crate::sync::StopFlag;

use super::EngineError;

/// Something that can answer "what is the best move in this position?".
///
/// The position arrives as FEN. Implementations block until they have an
/// answer, the request fails, or `stop` is raised.
pub trait MoveProvider {
    fn best_move(&mut self, fen: &str, stop: &StopFlag) -> Result<Move, EngineError>;
}

impl<P: MoveProvider + ?Sized> MoveProvider for &mut P {
    fn best_move(&mut self, fen: &str, stop: &StopFlag) -> Result<Move, EngineError> {
        (**self).best_move(fen, stop)
    }
}

impl<P: MoveProvider + ?Sized> MoveProvider for Box<P> {
    fn best_move(&mut self, fen: &str, stop: &StopFlag) -> Result<Move, EngineError> {
        (**self).best_move(fen, stop)
    }
}
