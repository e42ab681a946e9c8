//! Check, checkmate and stalemate detection.

use super::attacks::is_square_attacked;
use super::legality::missing_king;
use super::{Color, GameState, RulesError, TerminalStatus};

impl GameState {
    /// True if `color`'s king is attacked by any enemy piece
    pub fn is_in_check(&self, color: Color) -> Result<bool, RulesError> {
        let king = self.grid.find_king(color).ok_or_else(|| missing_king(color))?;
        Ok(is_square_attacked(king, color.opponent(), &self.grid))
    }

    /// True if `color` is in check and has no legal move.
    ///
    /// Legal moves only exist for the side to move, so this is always false
    /// for the other color.
    pub fn is_checkmate(&self, color: Color) -> Result<bool, RulesError> {
        if !self.is_in_check(color)? || color != self.side_to_move {
            return Ok(false);
        }
        Ok(!self.has_legal_move()?)
    }

    /// True if `color` is to move, not in check, and has no legal move
    pub fn is_stalemate(&self, color: Color) -> Result<bool, RulesError> {
        if self.is_in_check(color)? || color != self.side_to_move {
            return Ok(false);
        }
        Ok(!self.has_legal_move()?)
    }

    /// Status of the side to move
    pub(crate) fn compute_status(&self) -> Result<TerminalStatus, RulesError> {
        let in_check = self.is_in_check(self.side_to_move)?;
        let can_move = self.has_legal_move()?;
        Ok(match (in_check, can_move) {
            (true, true) => TerminalStatus::Check,
            (true, false) => TerminalStatus::Checkmate,
            (false, true) => TerminalStatus::InProgress,
            (false, false) => TerminalStatus::Stalemate,
        })
    }
}
