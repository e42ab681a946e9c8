//! Attack and path analysis.
//!
//! Stateless functions over a [`Grid`]. Nothing here knows whose turn it is
//! or whether a king would be left in check; these are raw geometric tests
//! that both the legality engine and the check detector build on.

use std::sync::LazyLock;

use super::{Color, ColoredPiece, Grid, Piece, Square};

const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

const KING_OFFSETS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

fn build_targets(offsets: &[(isize, isize)]) -> Vec<Vec<Square>> {
    Square::all()
        .map(|sq| {
            offsets
                .iter()
                .filter_map(|&(dr, df)| sq.offset(dr, df))
                .collect()
        })
        .collect()
}

/// Knight destinations for each square index
pub(crate) static KNIGHT_TARGETS: LazyLock<Vec<Vec<Square>>> =
    LazyLock::new(|| build_targets(&KNIGHT_OFFSETS));

/// King destinations (one step) for each square index
pub(crate) static KING_TARGETS: LazyLock<Vec<Vec<Square>>> =
    LazyLock::new(|| build_targets(&KING_OFFSETS));

/// Same rank or same file, and not the same square
#[inline]
#[must_use]
pub fn is_straight(from: Square, to: Square) -> bool {
    from != to && (from.0 == to.0 || from.1 == to.1)
}

/// On a common diagonal, and not the same square
#[inline]
#[must_use]
pub fn is_diagonal(from: Square, to: Square) -> bool {
    let (dr, df) = from.delta(to);
    dr != 0 && dr.abs() == df.abs()
}

#[inline]
#[must_use]
pub fn is_knight_jump(from: Square, to: Square) -> bool {
    let (dr, df) = from.delta(to);
    matches!((dr.abs(), df.abs()), (1, 2) | (2, 1))
}

#[inline]
#[must_use]
pub fn is_king_step(from: Square, to: Square) -> bool {
    let (dr, df) = from.delta(to);
    from != to && dr.abs() <= 1 && df.abs() <= 1
}

/// True if every square strictly between `from` and `to` is empty.
///
/// Only meaningful when the two squares share a rank, file or diagonal;
/// callers check alignment first.
#[must_use]
pub fn is_path_clear(from: Square, to: Square, grid: &Grid) -> bool {
    let (dr, df) = from.delta(to);
    let step = (dr.signum(), df.signum());
    let mut current = from;
    loop {
        current = match current.offset(step.0, step.1) {
            Some(next) => next,
            None => return true,
        };
        if current == to {
            return true;
        }
        if !grid.is_empty(current) {
            return false;
        }
    }
}

/// True if `piece`, standing on `from`, attacks `target`.
///
/// Pawns attack only their two forward diagonals; castling is never an
/// attack. Sliders must have a clear path.
#[must_use]
pub fn attacks_square(piece: ColoredPiece, from: Square, target: Square, grid: &Grid) -> bool {
    if from == target {
        return false;
    }
    match piece.piece {
        Piece::Pawn => {
            let dir = piece.color.pawn_direction();
            let (dr, df) = from.delta(target);
            dr == dir && df.abs() == 1
        }
        Piece::Knight => KNIGHT_TARGETS[from.as_index()].contains(&target),
        Piece::King => KING_TARGETS[from.as_index()].contains(&target),
        Piece::Bishop => is_diagonal(from, target) && is_path_clear(from, target, grid),
        Piece::Rook => is_straight(from, target) && is_path_clear(from, target, grid),
        Piece::Queen => {
            (is_straight(from, target) || is_diagonal(from, target))
                && is_path_clear(from, target, grid)
        }
    }
}

/// True if any piece of `by` attacks `square`.
///
/// Raw attack test: pinned pieces still attack, and no check-safety
/// filtering is applied.
#[must_use]
pub fn is_square_attacked(square: Square, by: Color, grid: &Grid) -> bool {
    grid.pieces(by)
        .any(|(from, piece)| attacks_square(piece, from, square, grid))
}

/// Squares of every `by` piece attacking `square`
#[must_use]
pub fn attackers_of(square: Square, by: Color, grid: &Grid) -> Vec<Square> {
    grid.pieces(by)
        .filter(|&(from, piece)| attacks_square(piece, from, square, grid))
        .map(|(from, _)| from)
        .collect()
}
