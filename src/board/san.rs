//! Standard Algebraic Notation (SAN) support.
//!
//! SAN is the human-readable notation used in scoresheets, books and PGN
//! movetext. Examples: "e4", "Nf3", "Bxc6+", "O-O", "e8=Q#"
//!
//! # Examples
//! ```
//! use chess_notation::Position;
//!
//! let position = Position::new();
//! let mv = position.parse_san("Nf3").unwrap();
//! assert_eq!(position.move_to_san(mv), "Nf3");
//! ```

use super::error::SanError;
use super::{CastleSide, Move, Piece, Position, Square};

impl Position {
    /// Format a move in Standard Algebraic Notation.
    ///
    /// The move is expected to be legal here; a move from an empty square
    /// falls back to its coordinate form.
    #[must_use]
    pub fn move_to_san(&self, mv: Move) -> String {
        let Some(piece) = self.piece_on(mv.from()) else {
            return mv.to_string();
        };

        let mut san = String::new();
        if let Some(side) = self.castling_side(mv) {
            san.push_str(side.san());
        } else {
            let capture = self.is_capture(mv);
            match piece.san_letter() {
                Some(letter) => {
                    san.push(letter);
                    let (needs_file, needs_rank) = self.needs_disambiguation(mv, piece);
                    if needs_file {
                        san.push(mv.from().file_char());
                    }
                    if needs_rank {
                        san.push(mv.from().rank_char());
                    }
                }
                None if capture => san.push(mv.from().file_char()),
                None => {}
            }
            if capture {
                san.push('x');
            }
            san.push_str(&mv.to().to_string());
            if let Some(promo) = mv.promotion().and_then(Piece::san_letter) {
                san.push('=');
                san.push(promo);
            }
        }

        if let Some(after) = self.position_after(mv) {
            if after.is_checkmate() {
                san.push('#');
            } else if after.is_check() {
                san.push('+');
            }
        }
        san
    }

    /// Copy of the position with `mv` played, or `None` if `from` is empty.
    pub(crate) fn position_after(&self, mv: Move) -> Option<Position> {
        let mut after = self.snapshot();
        after.make_move(mv)?;
        Some(after)
    }

    /// Returns (`needs_file`, `needs_rank`): file alone when it separates the
    /// candidates, else rank alone, else both.
    fn needs_disambiguation(&self, mv: Move, piece: Piece) -> (bool, bool) {
        let rivals: Vec<Square> = self
            .legal_moves()
            .into_iter()
            .filter(|m| {
                m.to() == mv.to()
                    && m.from() != mv.from()
                    && self.piece_on(m.from()) == Some(piece)
                    && self.castling_side(*m).is_none()
            })
            .map(Move::from)
            .collect();

        if rivals.is_empty() {
            return (false, false);
        }

        let same_file = rivals.iter().any(|sq| sq.file() == mv.from().file());
        let same_rank = rivals.iter().any(|sq| sq.rank() == mv.from().rank());

        match (same_file, same_rank) {
            (false, _) => (true, false),
            (true, false) => (false, true),
            (true, true) => (true, true),
        }
    }

    /// Parse a move in Standard Algebraic Notation against this position.
    ///
    /// Trailing `+`, `#`, `!` and `?` are ignored. Accepts `O-O` or `0-0`,
    /// capture marks `x`, `:` or `-`, and promotions with or without `=`.
    pub fn parse_san(&self, san: &str) -> Result<Move, SanError> {
        let trimmed = san.trim();
        if trimmed.is_empty() {
            return Err(SanError::Empty);
        }
        let body = trimmed.trim_end_matches(['+', '#', '!', '?']);
        if body.is_empty() {
            return Err(malformed(trimmed));
        }

        match body {
            "O-O" | "0-0" | "o-o" => return self.find_castling_move(CastleSide::King, trimmed),
            "O-O-O" | "0-0-0" | "o-o-o" => {
                return self.find_castling_move(CastleSide::Queen, trimmed)
            }
            _ => {}
        }

        let chars: Vec<char> = body.chars().collect();
        let (piece, mut rest) = match chars[0] {
            'N' | 'B' | 'R' | 'Q' | 'K' | 'P' => {
                let piece = Piece::from_char(chars[0]).ok_or_else(|| malformed(trimmed))?;
                (piece, &chars[1..])
            }
            _ => (Piece::Pawn, &chars[..]),
        };

        // a trailing letter can only be a promotion piece
        let mut promotion = None;
        if let Some((&last, head)) = rest.split_last() {
            if last.is_ascii_alphabetic() {
                let promo = Piece::from_char(last)
                    .filter(|p| p.is_promotable())
                    .ok_or_else(|| malformed(trimmed))?;
                promotion = Some(promo);
                rest = head.strip_suffix(&['=']).unwrap_or(head);
            }
        }

        if rest.len() < 2 {
            return Err(malformed(trimmed));
        }
        let (middle, dest) = rest.split_at(rest.len() - 2);
        let dest: Square = dest
            .iter()
            .collect::<String>()
            .parse()
            .map_err(|_| malformed(trimmed))?;

        let hints: Vec<char> = middle
            .iter()
            .copied()
            .filter(|c| !matches!(c, 'x' | ':' | '-'))
            .collect();
        let (from_file, from_rank) = match hints.as_slice() {
            [] => (None, None),
            [f @ 'a'..='h'] => (Some(file_index(*f)), None),
            [r @ '1'..='8'] => (None, Some(rank_index(*r))),
            [f @ 'a'..='h', r @ '1'..='8'] => (Some(file_index(*f)), Some(rank_index(*r))),
            _ => return Err(malformed(trimmed)),
        };

        let candidates: Vec<Move> = self
            .legal_moves()
            .into_iter()
            .filter(|m| {
                m.to() == dest
                    && m.promotion() == promotion
                    && self.piece_on(m.from()) == Some(piece)
                    && from_file.map_or(true, |f| m.from().file() == f)
                    && from_rank.map_or(true, |r| m.from().rank() == r)
            })
            .collect();

        match candidates.as_slice() {
            [mv] => Ok(*mv),
            [] => Err(SanError::NoMatchingMove {
                san: trimmed.to_string(),
            }),
            _ => Err(SanError::AmbiguousMove {
                san: trimmed.to_string(),
            }),
        }
    }

    fn find_castling_move(&self, side: CastleSide, san: &str) -> Result<Move, SanError> {
        self.legal_moves()
            .into_iter()
            .find(|mv| self.castling_side(*mv) == Some(side))
            .ok_or_else(|| SanError::NoMatchingMove {
                san: san.to_string(),
            })
    }
}

fn malformed(san: &str) -> SanError {
    SanError::Malformed {
        san: san.to_string(),
    }
}

fn file_index(c: char) -> usize {
    c as usize - 'a' as usize
}

fn rank_index(c: char) -> usize {
    c as usize - '1' as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_san_pawn_push() {
        let position = Position::new();
        let mv = position.parse_san("e4").unwrap();
        assert_eq!(mv, Move::quiet(sq("e2"), sq("e4")));
        assert_eq!(position.move_to_san(mv), "e4");
    }

    #[test]
    fn test_san_knight_move() {
        let position = Position::new();
        let mv = position.parse_san("Nf3").unwrap();
        assert_eq!(mv, Move::quiet(sq("g1"), sq("f3")));
        assert_eq!(position.move_to_san(mv), "Nf3");
    }

    #[test]
    fn test_san_pawn_capture() {
        let position =
            Position::from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2")
                .unwrap();
        let mv = position.parse_san("exd5").unwrap();
        assert_eq!(position.move_to_san(mv), "exd5");
        assert_eq!(position.parse_san("e4xd5").unwrap(), mv);
        assert_eq!(position.parse_san("e:d5").unwrap(), mv);
    }

    #[test]
    fn test_san_castling() {
        let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let short = position.parse_san("O-O").unwrap();
        assert_eq!(short, Move::quiet(sq("e1"), sq("g1")));
        assert_eq!(position.move_to_san(short), "O-O");
        let long = position.parse_san("0-0-0").unwrap();
        assert_eq!(long, Move::quiet(sq("e1"), sq("c1")));
        assert_eq!(position.move_to_san(long), "O-O-O");
    }

    #[test]
    fn test_san_king_step_spelling_of_castling() {
        let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        assert_eq!(position.parse_san("Kg1").unwrap(), Move::quiet(sq("e1"), sq("g1")));
        assert_eq!(position.parse_san("Kc1").unwrap(), Move::quiet(sq("e1"), sq("c1")));

        let no_rights = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
        assert!(matches!(no_rights.parse_san("Kg1"), Err(SanError::NoMatchingMove { .. })));
    }

    #[test]
    fn test_san_promotion_forms() {
        let position = Position::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1").unwrap();
        let queen = Move::new(sq("a7"), sq("a8"), Some(Piece::Queen));
        assert_eq!(position.parse_san("a8=Q").unwrap(), queen);
        assert_eq!(position.parse_san("a8Q").unwrap(), queen);
        assert_eq!(position.parse_san("a8q").unwrap(), queen);
        assert_eq!(position.move_to_san(queen), "a8=Q");
        let knight = position.parse_san("a8=N").unwrap();
        assert_eq!(knight.promotion(), Some(Piece::Knight));
        assert!(matches!(
            position.parse_san("a8"),
            Err(SanError::NoMatchingMove { .. })
        ));
    }

    #[test]
    fn test_san_file_disambiguation() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/R4RK1 w - - 0 1").unwrap();
        let mv = Move::quiet(sq("a1"), sq("d1"));
        assert_eq!(position.move_to_san(mv), "Rad1");
        assert_eq!(position.parse_san("Rad1").unwrap(), mv);
        assert!(matches!(
            position.parse_san("Rd1"),
            Err(SanError::AmbiguousMove { .. })
        ));
    }

    #[test]
    fn test_san_rank_disambiguation() {
        let position = Position::from_fen("4k3/8/8/R7/8/8/8/R3K3 w - - 0 1").unwrap();
        let mv = Move::quiet(sq("a1"), sq("a3"));
        assert_eq!(position.move_to_san(mv), "R1a3");
        assert_eq!(position.parse_san("R1a3").unwrap(), mv);
    }

    #[test]
    fn test_san_full_disambiguation() {
        let position = Position::from_fen("k7/8/8/8/8/2Q1Q3/8/4Q2K w - - 0 1").unwrap();
        let mv = Move::quiet(sq("e3"), sq("d2"));
        assert_eq!(position.move_to_san(mv), "Qe3d2");
        assert_eq!(position.parse_san("Qe3d2").unwrap(), mv);
    }

    #[test]
    fn test_san_suffixes_ignored() {
        let position = Position::new();
        let mv = position.parse_san("e4!?").unwrap();
        assert_eq!(mv, Move::quiet(sq("e2"), sq("e4")));
        assert_eq!(position.parse_san("Nf3+").unwrap().to(), sq("f3"));
    }

    #[test]
    fn test_san_check_and_mate_suffix() {
        let position = Position::from_fen(
            "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2",
        )
        .unwrap();
        let mv = position.parse_san("Qh4").unwrap();
        assert_eq!(position.move_to_san(mv), "Qh4#");

        let position = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let mv = position.parse_san("Ra8").unwrap();
        assert_eq!(position.move_to_san(mv), "Ra8+");
    }

    #[test]
    fn test_san_errors() {
        let position = Position::new();
        assert_eq!(position.parse_san("  "), Err(SanError::Empty));
        assert!(matches!(position.parse_san("Zz9"), Err(SanError::Malformed { .. })));
        assert!(matches!(position.parse_san("e5"), Err(SanError::NoMatchingMove { .. })));
        assert!(matches!(position.parse_san("O-O"), Err(SanError::NoMatchingMove { .. })));
        assert!(matches!(position.parse_san("+"), Err(SanError::Malformed { .. })));
    }

    #[test]
    fn test_san_en_passant() {
        let position =
            Position::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
                .unwrap();
        let mv = position.parse_san("exf6").unwrap();
        assert!(position.is_en_passant(mv));
        assert_eq!(position.move_to_san(mv), "exf6");
    }
}
