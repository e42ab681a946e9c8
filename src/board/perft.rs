use super::{GameState, Move, RulesError};

impl GameState {
    /// Count the leaf positions `depth` plies below this one.
    pub fn perft(&self, depth: usize) -> Result<u64, RulesError> {
        if depth == 0 {
            return Ok(1);
        }

        let moves = self.classified_moves();
        if depth == 1 {
            return Ok(moves.len() as u64);
        }

        let mut nodes = 0;
        for (mv, kind) in moves {
            let next = self.successor(mv.from, mv.to, kind, mv.promotion)?;
            nodes += next.perft(depth - 1)?;
        }
        Ok(nodes)
    }

    /// Per-move leaf counts at `depth`, in move order
    pub fn perft_divide(&self, depth: usize) -> Result<Vec<(Move, u64)>, RulesError> {
        let mut counts = Vec::new();
        for (mv, kind) in self.classified_moves() {
            let next = self.successor(mv.from, mv.to, kind, mv.promotion)?;
            counts.push((mv, next.perft(depth.saturating_sub(1))?));
        }
        Ok(counts)
    }
}
