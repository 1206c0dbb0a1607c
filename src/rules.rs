//! The rules backend seen by game records, the PGN tokenizer and composite
//! records.
//!
//! Everything above the board talks to a position through [`Rules`], so an
//! alternative backend (a variant, or a wrapper around another move
//! generator) can be dropped in without touching notation or game code.

use std::fmt;

use crate::board::{ChessError, Color, FenError, Move, Piece, Position, SanError, Square};

pub trait Rules: Clone + PartialEq + Default + fmt::Debug {
    fn from_fen(fen: &str) -> Result<Self, FenError>;

    /// Parse FEN, recovering with the standard initial position.
    fn from_fen_or_default(fen: &str) -> Self;

    fn to_fen(&self) -> String;

    fn side_to_move(&self) -> Color;

    fn fullmove_number(&self) -> u32;

    fn piece_at(&self, sq: Square) -> Option<(Color, Piece)>;

    /// Legal moves in a deterministic order.
    fn legal_moves(&self) -> Vec<Move>;

    fn is_legal(&self, mv: Move) -> bool {
        self.legal_moves().contains(&mv)
    }

    fn apply_move(&mut self, mv: Move) -> Result<(), ChessError>;

    fn to_san(&self, mv: Move) -> String;

    fn from_san(&self, text: &str) -> Result<Move, SanError>;

    /// Independent copy of the current state, without undo history.
    fn snapshot(&self) -> Self;

    /// Key that agrees with equality: equal positions give equal keys.
    fn zobrist_key(&self) -> u64;
}

impl Rules for Position {
    fn from_fen(fen: &str) -> Result<Self, FenError> {
        Position::from_fen(fen)
    }

    fn from_fen_or_default(fen: &str) -> Self {
        Position::from_fen_or_default(fen)
    }

    fn to_fen(&self) -> String {
        Position::to_fen(self)
    }

    fn side_to_move(&self) -> Color {
        Position::side_to_move(self)
    }

    fn fullmove_number(&self) -> u32 {
        Position::fullmove_number(self)
    }

    fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        Position::piece_at(self, sq)
    }

    fn legal_moves(&self) -> Vec<Move> {
        Position::legal_moves(self)
    }

    fn is_legal(&self, mv: Move) -> bool {
        Position::is_legal(self, mv)
    }

    fn apply_move(&mut self, mv: Move) -> Result<(), ChessError> {
        Position::apply_move(self, mv)
    }

    fn to_san(&self, mv: Move) -> String {
        self.move_to_san(mv)
    }

    fn from_san(&self, text: &str) -> Result<Move, SanError> {
        self.parse_san(text)
    }

    fn snapshot(&self) -> Self {
        Position::snapshot(self)
    }

    fn zobrist_key(&self) -> u64 {
        Position::zobrist_key(self)
    }
}
