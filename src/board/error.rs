//! Error types for chess rules operations.

use std::fmt;

use super::{Color, Piece, Square};

/// Error type for position-notation parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// Notation has too few fields (needs at least 4)
    TooFewParts { found: usize },
    /// Invalid piece character in the placement field
    InvalidPiece { char: char },
    /// Invalid castling character
    InvalidCastling { char: char },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid en passant square
    InvalidEnPassant { found: String },
    /// Placement field does not describe exactly 8 ranks
    InvalidRankCount { found: usize },
    /// A rank does not describe exactly 8 files
    InvalidFileCount { rank: usize, files: usize },
    /// Halfmove clock or fullmove number is not a number
    InvalidCounter { found: String },
    /// A color has no king, or more than one
    InvalidKingCount { color: Color, found: usize },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewParts { found } => {
                write!(f, "FEN must have at least 4 parts, found {found}")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in FEN")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "Invalid castling character '{char}' in FEN")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "Invalid en passant square '{found}'")
            }
            FenError::InvalidRankCount { found } => {
                write!(f, "FEN placement must have 8 ranks, found {found}")
            }
            FenError::InvalidFileCount { rank, files } => {
                write!(f, "Rank {rank} describes {files} files, expected 8")
            }
            FenError::InvalidCounter { found } => {
                write!(f, "Invalid move counter '{found}' in FEN")
            }
            FenError::InvalidKingCount { color, found } => {
                write!(f, "{color} must have exactly one king, found {found}")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for engine move-token parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move token has invalid length (must be 4-5 characters)
    InvalidLength { token: String, len: usize },
    /// Invalid square notation in move
    InvalidSquare { token: String },
    /// Invalid promotion piece
    InvalidPromotion { token: String, char: char },
}

impl MoveParseError {
    /// The token that failed to parse
    #[must_use]
    pub fn token(&self) -> &str {
        match self {
            MoveParseError::InvalidLength { token, .. }
            | MoveParseError::InvalidSquare { token }
            | MoveParseError::InvalidPromotion { token, .. } => token,
        }
    }
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { token, len } => {
                write!(f, "Move '{token}' must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { token } => {
                write!(f, "Invalid square notation in '{token}'")
            }
            MoveParseError::InvalidPromotion { token, char } => {
                write!(f, "Invalid promotion piece '{char}' in '{token}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Rank out of bounds (must be 0-7)
    RankOutOfBounds { rank: usize },
    /// File out of bounds (must be 0-7)
    FileOutOfBounds { file: usize },
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::RankOutOfBounds { rank } => {
                write!(f, "Rank {rank} out of bounds (must be 0-7)")
            }
            SquareError::FileOutOfBounds { file } => {
                write!(f, "File {file} out of bounds (must be 0-7)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// Error type for rejected moves and invalid game states.
///
/// A rejected move never changes the game it was tried on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// A coordinate is outside the board
    InvalidSquare(SquareError),
    /// The source square is empty
    NoPieceAtSource { square: Square },
    /// The source piece does not belong to the side to move
    WrongSideToMove { square: Square, to_move: Color },
    /// The move breaks the piece's geometry or leaves the mover's king attacked
    IllegalMove { from: Square, to: Square },
    /// A pawn reaches the last rank but no promotion piece was chosen
    PromotionRequired { from: Square, to: Square },
    /// The promotion piece is not allowed, or the move does not promote
    InvalidPromotion { piece: Piece },
    /// The position has no king of this color
    NoKingFound { color: Color },
}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulesError::InvalidSquare(e) => write!(f, "Invalid square: {e}"),
            RulesError::NoPieceAtSource { square } => write!(f, "No piece on {square}"),
            RulesError::WrongSideToMove { square, to_move } => {
                write!(f, "Piece on {square} does not belong to {to_move}, who is to move")
            }
            RulesError::IllegalMove { from, to } => write!(f, "Illegal move {from}{to}"),
            RulesError::PromotionRequired { from, to } => {
                write!(f, "Move {from}{to} needs a promotion piece")
            }
            RulesError::InvalidPromotion { piece } => {
                write!(f, "Cannot promote to {piece} here")
            }
            RulesError::NoKingFound { color } => write!(f, "No {color} king on the board"),
        }
    }
}

impl std::error::Error for RulesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RulesError::InvalidSquare(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SquareError> for RulesError {
    fn from(e: SquareError) -> Self {
        RulesError::InvalidSquare(e)
    }
}
