//! Error types for position, notation and game-record operations.

use std::error::Error;
use std::fmt;

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string needs 4 to 6 space-separated fields
    WrongFieldCount { found: usize },
    /// Placement field does not have exactly 8 ranks
    WrongRankCount { found: usize },
    /// A rank does not describe exactly 8 files
    WrongFileCount { rank: usize, files: usize },
    /// Invalid piece character in placement
    InvalidPiece { char: char },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid castling character
    InvalidCastling { char: char },
    /// Invalid en passant square
    InvalidEnPassant { found: String },
    /// Half-move clock or full-move number is not a number
    InvalidCounter { found: String },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::WrongFieldCount { found } => {
                write!(f, "FEN must have 4 to 6 fields, found {found}")
            }
            FenError::WrongRankCount { found } => {
                write!(f, "FEN placement must have 8 ranks, found {found}")
            }
            FenError::WrongFileCount { rank, files } => {
                write!(f, "FEN rank {rank} describes {files} files, expected 8")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in FEN")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "Invalid castling character '{char}' in FEN")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "Invalid en passant square '{found}'")
            }
            FenError::InvalidCounter { found } => {
                write!(f, "Invalid move counter '{found}' in FEN")
            }
        }
    }
}

impl Error for FenError {}

/// Error type for coordinate (UCI) move parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move string has invalid length (must be 4-5 characters)
    InvalidLength { len: usize },
    /// Invalid square notation in move
    InvalidSquare { notation: String },
    /// Invalid promotion piece
    InvalidPromotion { char: char },
    /// Token does not carry the move-token prefix
    MissingPrefix { token: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "Move must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "Invalid square notation in '{notation}'")
            }
            MoveParseError::InvalidPromotion { char } => {
                write!(f, "Invalid promotion piece '{char}'")
            }
            MoveParseError::MissingPrefix { token } => {
                write!(f, "Move token '{token}' does not start with 'M'")
            }
        }
    }
}

impl Error for MoveParseError {}

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

impl Error for SquareError {}

/// Error type for SAN (Standard Algebraic Notation) parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanError {
    /// Empty SAN string
    Empty,
    /// Text is not shaped like SAN
    Malformed { san: String },
    /// Several legal moves match
    AmbiguousMove { san: String },
    /// No matching legal move found
    NoMatchingMove { san: String },
}

impl fmt::Display for SanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SanError::Empty => write!(f, "Empty SAN string"),
            SanError::Malformed { san } => write!(f, "Malformed SAN '{san}'"),
            SanError::AmbiguousMove { san } => write!(f, "Ambiguous move '{san}'"),
            SanError::NoMatchingMove { san } => write!(f, "No legal move matches '{san}'"),
        }
    }
}

impl Error for SanError {}

/// Errors surfaced by position mutators and game-record construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    MalformedFen(FenError),
    /// Move is not legal in the position it was applied to
    IllegalMove { notation: String },
    MalformedUci(MoveParseError),
    AmbiguousOrIllegalSan(SanError),
    /// `undo_move` at the construction state
    NoMoveToUndo,
    /// Truncation past the end of a game record
    OutOfRange { requested: usize, len: usize },
    /// A `[` line that is not a `[Tag "Value"]` pair
    MalformedHeader { line: String },
}

impl fmt::Display for ChessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChessError::MalformedFen(err) => write!(f, "Malformed FEN: {err}"),
            ChessError::IllegalMove { notation } => write!(f, "Illegal move '{notation}'"),
            ChessError::MalformedUci(err) => write!(f, "Malformed UCI move: {err}"),
            ChessError::AmbiguousOrIllegalSan(err) => write!(f, "Bad SAN: {err}"),
            ChessError::NoMoveToUndo => write!(f, "No move to undo"),
            ChessError::OutOfRange { requested, len } => {
                write!(f, "Length {requested} out of range (record has {len} moves)")
            }
            ChessError::MalformedHeader { line } => write!(f, "Malformed PGN header '{line}'"),
        }
    }
}

impl Error for ChessError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ChessError::MalformedFen(err) => Some(err),
            ChessError::MalformedUci(err) => Some(err),
            ChessError::AmbiguousOrIllegalSan(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FenError> for ChessError {
    fn from(err: FenError) -> Self {
        ChessError::MalformedFen(err)
    }
}

impl From<MoveParseError> for ChessError {
    fn from(err: MoveParseError) -> Self {
        ChessError::MalformedUci(err)
    }
}

impl From<SanError> for ChessError {
    fn from(err: SanError) -> Self {
        ChessError::AmbiguousOrIllegalSan(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_error_field_count() {
        let err = FenError::WrongFieldCount { found: 2 };
        assert!(err.to_string().contains('2'));
        assert!(err.to_string().contains("4 to 6"));
    }

    #[test]
    fn test_fen_error_invalid_piece() {
        let err = FenError::InvalidPiece { char: 'z' };
        assert!(err.to_string().contains("'z'"));
    }

    #[test]
    fn test_move_error_invalid_length() {
        let err = MoveParseError::InvalidLength { len: 3 };
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_square_error_invalid_notation() {
        let err = SquareError::InvalidNotation {
            notation: "xyz".to_string(),
        };
        assert!(err.to_string().contains("xyz"));
    }

    #[test]
    fn test_san_error_ambiguous() {
        let err = SanError::AmbiguousMove {
            san: "Nc3".to_string(),
        };
        assert!(err.to_string().contains("Nc3"));
    }

    #[test]
    fn test_chess_error_conversions() {
        let err: ChessError = FenError::InvalidPiece { char: 'x' }.into();
        assert!(matches!(err, ChessError::MalformedFen(_)));
        assert!(err.source().is_some());

        let err: ChessError = SanError::Empty.into();
        assert!(matches!(err, ChessError::AmbiguousOrIllegalSan(SanError::Empty)));

        let err = ChessError::OutOfRange {
            requested: 5,
            len: 3,
        };
        assert!(err.to_string().contains('5'));
        assert!(err.source().is_none());
    }
}
