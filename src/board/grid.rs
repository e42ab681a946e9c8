//! The 8x8 board model.
//!
//! `Grid` is a plain `Copy` value. Every "mutation" returns a new grid, so a
//! grid handed out as a snapshot can never change underneath its reader.
//! No legality checking happens here.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Color, ColoredPiece, Piece, Square};

const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

/// Occupancy of all 64 squares, indexed `[rank][file]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid {
    squares: [[Option<ColoredPiece>; 8]; 8],
}

impl Grid {
    /// An empty board
    #[must_use]
    pub const fn empty() -> Self {
        Grid {
            squares: [[None; 8]; 8],
        }
    }

    /// The standard initial position
    #[must_use]
    pub fn starting_position() -> Self {
        let mut grid = Grid::empty();
        for (file, piece) in BACK_RANK.iter().enumerate() {
            grid.squares[0][file] = Some(ColoredPiece::new(Color::White, *piece));
            grid.squares[1][file] = Some(ColoredPiece::new(Color::White, Piece::Pawn));
            grid.squares[6][file] = Some(ColoredPiece::new(Color::Black, Piece::Pawn));
            grid.squares[7][file] = Some(ColoredPiece::new(Color::Black, *piece));
        }
        grid
    }

    /// The piece on `sq`, if any
    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<ColoredPiece> {
        self.squares[sq.0][sq.1]
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Color of the piece on `sq`, if any
    #[inline]
    #[must_use]
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|p| p.color)
    }

    /// Move whatever stands on `from` to `to`, replacing anything on `to`.
    #[must_use]
    pub fn with_piece_moved(mut self, from: Square, to: Square) -> Self {
        let moving = self.squares[from.0][from.1].take();
        self.squares[to.0][to.1] = moving;
        self
    }

    #[must_use]
    pub fn with_piece_removed(mut self, sq: Square) -> Self {
        self.squares[sq.0][sq.1] = None;
        self
    }

    /// Put `piece` on `sq`, replacing anything already there
    #[must_use]
    pub fn with_piece_placed(mut self, sq: Square, piece: ColoredPiece) -> Self {
        self.squares[sq.0][sq.1] = Some(piece);
        self
    }

    /// Square of `color`'s king, scanning from a1
    #[must_use]
    pub fn find_king(&self, color: Color) -> Option<Square> {
        Square::all().find(|&sq| self.piece_at(sq) == Some(ColoredPiece::new(color, Piece::King)))
    }

    /// Every occupied square with its piece, a1 first
    pub fn occupied(&self) -> impl Iterator<Item = (Square, ColoredPiece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Every piece of `color` with its square
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, ColoredPiece)> + '_ {
        self.occupied().filter(move |(_, p)| p.color == color)
    }

    /// Number of pieces of the given kind
    #[must_use]
    pub fn count(&self, color: Color, piece: Piece) -> usize {
        self.pieces(color).filter(|(_, p)| p.piece == piece).count()
    }
}

/// Board diagram, rank 8 at the top, `.` for empty squares
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let c = self
                    .piece_at(Square(rank, file))
                    .map_or('.', ColoredPiece::to_fen_char);
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid(")?;
        writeln!(f, "{self}")?;
        write!(f, ")")
    }
}
