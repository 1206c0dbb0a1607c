//! Core chess types.
//!
//! - `Piece` and `Color` - piece kinds and colors
//! - `Square` - always-in-range board square
//! - `Bitboard` - 64-bit square set
//! - `Move` - compact (from, to, promotion) triple
//! - `CastlingRights` - four independent castling flags

mod bitboard;
mod castling;
mod moves;
mod piece;
mod square;

pub use bitboard::Bitboard;
pub use castling::{CastleSide, CastlingRights};
pub use moves::Move;
pub use piece::{Color, Piece};
pub use square::Square;

pub(crate) use piece::PROMOTION_PIECES;
