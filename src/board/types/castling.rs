//! Castling rights type.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;

const CASTLE_WHITE_K: u8 = 1 << 0;
const CASTLE_WHITE_Q: u8 = 1 << 1;
const CASTLE_BLACK_K: u8 = 1 << 2;
const CASTLE_BLACK_Q: u8 = 1 << 3;

const ALL_CASTLING_RIGHTS: u8 = CASTLE_WHITE_K | CASTLE_WHITE_Q | CASTLE_BLACK_K | CASTLE_BLACK_Q;

/// Which wing a castling move goes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// File the rook starts on
    #[inline]
    #[must_use]
    pub const fn rook_from_file(self) -> usize {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    /// File the rook lands on
    #[inline]
    #[must_use]
    pub const fn rook_to_file(self) -> usize {
        match self {
            CastleSide::Kingside => 5,
            CastleSide::Queenside => 3,
        }
    }

    /// File the king lands on
    #[inline]
    #[must_use]
    pub const fn king_to_file(self) -> usize {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 2,
        }
    }

    /// Side whose rook starts on `file`, if any
    #[must_use]
    pub const fn for_rook_file(file: usize) -> Option<CastleSide> {
        match file {
            7 => Some(CastleSide::Kingside),
            0 => Some(CastleSide::Queenside),
            _ => None,
        }
    }
}

/// The four castling flags.
///
/// Flags only ever get cleared during a game; the only constructors that set
/// them are the ones used when a position is first set up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// No castling rights
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights(0)
    }

    /// All castling rights (both sides can castle kingside and queenside)
    #[must_use]
    pub const fn all() -> Self {
        CastlingRights(ALL_CASTLING_RIGHTS)
    }

    /// Rights with exactly the given flags set; used when setting up a position
    #[must_use]
    pub const fn with(self, color: Color, side: CastleSide) -> Self {
        CastlingRights(self.0 | Self::bit_for(color, side))
    }

    /// Check if a specific castling right is set
    #[inline]
    #[must_use]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::bit_for(color, side) != 0
    }

    /// Check if `color` may still castle on either wing
    #[inline]
    #[must_use]
    pub const fn has_any(self, color: Color) -> bool {
        self.has(color, CastleSide::Kingside) || self.has(color, CastleSide::Queenside)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Remove a specific castling right
    #[inline]
    pub fn clear(&mut self, color: Color, side: CastleSide) {
        self.0 &= !Self::bit_for(color, side);
    }

    /// Remove both castling rights of a color
    #[inline]
    pub fn clear_color(&mut self, color: Color) {
        self.clear(color, CastleSide::Kingside);
        self.clear(color, CastleSide::Queenside);
    }

    /// True if every flag set in `self` is also set in `earlier`
    #[must_use]
    pub const fn is_subset_of(self, earlier: CastlingRights) -> bool {
        self.0 & !earlier.0 == 0
    }

    #[inline]
    const fn bit_for(color: Color, side: CastleSide) -> u8 {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => CASTLE_WHITE_K,
            (Color::White, CastleSide::Queenside) => CASTLE_WHITE_Q,
            (Color::Black, CastleSide::Kingside) => CASTLE_BLACK_K,
            (Color::Black, CastleSide::Queenside) => CASTLE_BLACK_Q,
        }
    }
}

/// Position-notation form: a `KQkq` subset, or `-`
impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        for (bit, c) in [
            (CASTLE_WHITE_K, 'K'),
            (CASTLE_WHITE_Q, 'Q'),
            (CASTLE_BLACK_K, 'k'),
            (CASTLE_BLACK_Q, 'q'),
        ] {
            if self.0 & bit != 0 {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}
