//! Move types and move records.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::{Color, Piece};
use super::square::{file_to_index, rank_to_index, Square};
use crate::board::error::MoveParseError;

/// A move as exchanged with an engine: source, destination and an optional
/// promotion piece.
///
/// Renders as a long-algebraic token (`e2e4`, `e7e8q`).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Piece>,
}

impl Move {
    #[inline]
    #[must_use]
    pub const fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_promotion(from: Square, to: Square, piece: Piece) -> Self {
        Move {
            from,
            to,
            promotion: Some(piece),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}{}", self.from, self.to)?;
        if let Some(promo) = self.promotion {
            write!(f, "={}", promo.to_char().to_ascii_uppercase())?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promo) = self.promotion {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

/// Parse a long-algebraic move token (e.g., "e2e4", "e7e8q").
///
/// Purely syntactic: whether the move is legal is decided when it is applied.
impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = token.chars().collect();
        if chars.len() < 4 || chars.len() > 5 {
            return Err(MoveParseError::InvalidLength {
                token: token.to_string(),
                len: chars.len(),
            });
        }

        if !('a'..='h').contains(&chars[0])
            || !('1'..='8').contains(&chars[1])
            || !('a'..='h').contains(&chars[2])
            || !('1'..='8').contains(&chars[3])
        {
            return Err(MoveParseError::InvalidSquare {
                token: token.to_string(),
            });
        }

        let from = Square(rank_to_index(chars[1]), file_to_index(chars[0]));
        let to = Square(rank_to_index(chars[3]), file_to_index(chars[2]));

        let promotion = match chars.get(4) {
            None => None,
            Some(&c) => match c {
                'q' => Some(Piece::Queen),
                'r' => Some(Piece::Rook),
                'b' => Some(Piece::Bishop),
                'n' => Some(Piece::Knight),
                _ => {
                    return Err(MoveParseError::InvalidPromotion {
                        token: token.to_string(),
                        char: c,
                    })
                }
            },
        };

        Ok(Move {
            from,
            to,
            promotion,
        })
    }
}

/// What kind of move a history entry was.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoveKind {
    Normal,
    DoublePawnPush,
    EnPassant,
    CastleKingside,
    CastleQueenside,
    Promotion,
}

impl MoveKind {
    #[inline]
    #[must_use]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveKind::CastleKingside | MoveKind::CastleQueenside)
    }
}

/// One entry of a game's move history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub color: Color,
    /// Piece type after the move (the promoted type on promotion)
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub promotion: Option<Piece>,
    pub kind: MoveKind,
}

impl MoveRecord {
    /// The engine-facing move this record was made from
    #[must_use]
    pub const fn as_move(&self) -> Move {
        Move {
            from: self.from,
            to: self.to,
            promotion: self.promotion,
        }
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MoveKind::CastleKingside => return f.write_str("O-O"),
            MoveKind::CastleQueenside => return f.write_str("O-O-O"),
            _ => {}
        }
        let sep = if self.captured.is_some() { 'x' } else { '-' };
        write!(f, "{}{}{}", self.from, sep, self.to)?;
        if let Some(promo) = self.promotion {
            write!(f, "={}", promo.to_char().to_ascii_uppercase())?;
        }
        if self.kind == MoveKind::EnPassant {
            write!(f, " e.p.")?;
        }
        Ok(())
    }
}
