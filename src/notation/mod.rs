//! Move notation: coordinate (UCI) text, SAN and move tokens.
//!
//! # Examples
//! ```
//! use chess_notation::notation::{from_uci, to_san, to_uci};
//! use chess_notation::Position;
//!
//! let position = Position::new();
//! let mv = from_uci("g1f3", &position).unwrap();
//! assert_eq!(to_uci(mv), "g1f3");
//! assert_eq!(to_san(mv, &position), "Nf3");
//! ```

mod token;

pub use token::MoveToken;

use crate::board::{
    CastleSide, ChessError, Color, Move, MoveParseError, Piece, SanError, Square,
};
use crate::rules::Rules;

/// Coordinate text: `<from><to>[nbrq]`, lower case.
#[must_use]
pub fn to_uci(mv: Move) -> String {
    mv.to_string()
}

/// Parse coordinate text. The result is well formed but not necessarily
/// legal in `position`.
///
/// `position` is only consulted to rewrite king-takes-own-rook castling
/// (`e1h1`) into the king's two-square move (`e1g1`).
pub fn from_uci<P: Rules>(text: &str, position: &P) -> Result<Move, MoveParseError> {
    let text = text.trim();
    let chars: Vec<char> = text.chars().collect();
    if !(4..=5).contains(&chars.len()) {
        return Err(MoveParseError::InvalidLength { len: chars.len() });
    }

    let parse_square = |pair: &[char]| -> Result<Square, MoveParseError> {
        pair.iter()
            .collect::<String>()
            .parse()
            .map_err(|_| MoveParseError::InvalidSquare {
                notation: text.to_string(),
            })
    };
    let from = parse_square(&chars[0..2])?;
    let to = parse_square(&chars[2..4])?;

    let promotion = match chars.get(4).copied() {
        None => None,
        Some(c) => Some(
            Piece::from_char(c)
                .filter(|p| p.is_promotable())
                .ok_or(MoveParseError::InvalidPromotion { char: c })?,
        ),
    };

    let to = normalize_castling(from, to, position).unwrap_or(to);
    Ok(Move::new(from, to, promotion))
}

/// King on its home square "capturing" its own rook on a corner.
fn normalize_castling<P: Rules>(from: Square, to: Square, position: &P) -> Option<Square> {
    let color = position.side_to_move();
    let home = Square::new(color.back_rank(), 4)?;
    if from != home
        || position.piece_at(from) != Some((color, Piece::King))
        || position.piece_at(to) != Some((color, Piece::Rook))
        || to.rank() != from.rank()
    {
        return None;
    }
    let side = match to.file() {
        7 => CastleSide::King,
        0 => CastleSide::Queen,
        _ => return None,
    };
    Square::new(from.rank(), side.king_to_file())
}

/// SAN text for a legal move.
#[must_use]
pub fn to_san<P: Rules>(mv: Move, position: &P) -> String {
    position.to_san(mv)
}

/// Resolve SAN text against `position`.
pub fn from_san<P: Rules>(text: &str, position: &P) -> Result<Move, SanError> {
    position.from_san(text)
}

#[must_use]
pub fn to_token(mv: Move) -> MoveToken {
    MoveToken::from_move(mv)
}

/// Decode a token as coordinate text against `position`.
pub fn from_token<P: Rules>(token: &MoveToken, position: &P) -> Result<Move, MoveParseError> {
    from_uci(token.body(), position)
}

/// Space-separated coordinate text for a move list.
#[must_use]
pub fn uci_line(moves: &[Move]) -> String {
    moves.iter().map(|mv| to_uci(*mv)).collect::<Vec<_>>().join(" ")
}

/// Parse and replay a space-separated coordinate line on a copy of
/// `position`, stopping at the first malformed or illegal move.
pub fn parse_uci_line<P: Rules>(text: &str, position: &P) -> Result<Vec<Move>, ChessError> {
    let mut board = position.snapshot();
    let mut moves = Vec::new();
    for word in text.split_whitespace() {
        let mv = from_uci(word, &board)?;
        board.apply_move(mv)?;
        moves.push(mv);
    }
    Ok(moves)
}

/// Numbered SAN movetext for `moves` played from `position`, e.g.
/// `1. e4 e5 2. Nf3`, or `5... Qh4#` when black moves first.
pub fn san_line<P: Rules>(moves: &[Move], position: &P) -> Result<String, ChessError> {
    let mut board = position.snapshot();
    let mut parts = Vec::with_capacity(moves.len() * 3 / 2 + 1);
    for (i, &mv) in moves.iter().enumerate() {
        let number = board.fullmove_number();
        match board.side_to_move() {
            Color::White => parts.push(format!("{number}.")),
            Color::Black if i == 0 => parts.push(format!("{number}...")),
            Color::Black => {}
        }
        parts.push(board.to_san(mv));
        board.apply_move(mv)?;
    }
    Ok(parts.join(" "))
}
