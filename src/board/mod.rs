//! Chess position representation and rules.
//!
//! Uses bitboards for placement and attack detection, with pseudo-legal
//! generation filtered by make/unmake. Supports the full rules of movement:
//! castling, en passant and promotion.
//!
//! # Example
//! ```
//! use chess_notation::board::Position;
//!
//! let position = Position::new();
//! let moves = position.legal_moves();
//! println!("Starting position has {} legal moves", moves.len());
//! ```

mod attack_tables;
mod error;
mod fen;
mod info;
mod make_unmake;
mod movegen;
mod san;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use error::{ChessError, FenError, MoveParseError, SanError, SquareError};
pub use fen::START_FEN;
pub use info::MoveInfo;
pub use state::Position;
pub use types::{Bitboard, CastleSide, CastlingRights, Color, Move, Piece, Square};

pub(crate) use types::PROMOTION_PIECES;
