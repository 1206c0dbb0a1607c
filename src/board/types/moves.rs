//! Move type.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Piece;
use super::square::Square;

const PROMO_NONE: u16 = 0;
const PROMO_KNIGHT: u16 = 1;
const PROMO_BISHOP: u16 = 2;
const PROMO_ROOK: u16 = 3;
const PROMO_QUEEN: u16 = 4;

/// Compact 16-bit move: (from, to, optional promotion).
///
/// Encoding:
/// - bits 0-5:   from square (0-63)
/// - bits 6-11:  to square (0-63)
/// - bits 12-14: promotion (0 = none, 1 = N, 2 = B, 3 = R, 4 = Q)
///
/// Equality is structural. Whether a move is a capture, castle or en passant
/// depends on the position it is played in, so those questions are asked of
/// [`Position`](crate::Position) rather than of the move.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move(u16);

impl Move {
    /// Create a move; promotion kinds other than N/B/R/Q are ignored
    #[inline]
    #[must_use]
    pub const fn new(from: Square, to: Square, promotion: Option<Piece>) -> Self {
        let promo = match promotion {
            Some(Piece::Knight) => PROMO_KNIGHT,
            Some(Piece::Bishop) => PROMO_BISHOP,
            Some(Piece::Rook) => PROMO_ROOK,
            Some(Piece::Queen) => PROMO_QUEEN,
            _ => PROMO_NONE,
        };
        Move(from.index() as u16 | ((to.index() as u16) << 6) | (promo << 12))
    }

    /// Create a non-promoting move
    #[inline]
    #[must_use]
    pub const fn quiet(from: Square, to: Square) -> Self {
        Move::new(from, to, None)
    }

    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        Square::from_index_unchecked((self.0 & 0x3F) as usize)
    }

    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        Square::from_index_unchecked(((self.0 >> 6) & 0x3F) as usize)
    }

    #[inline]
    #[must_use]
    pub const fn promotion(self) -> Option<Piece> {
        match self.0 >> 12 {
            PROMO_KNIGHT => Some(Piece::Knight),
            PROMO_BISHOP => Some(Piece::Bishop),
            PROMO_ROOK => Some(Piece::Rook),
            PROMO_QUEEN => Some(Piece::Queen),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        self.0 >> 12 != PROMO_NONE
    }

    /// Ordering key: from square, then to square, then promotion kind.
    #[inline]
    #[must_use]
    pub(crate) const fn sort_key(self) -> (usize, usize, u16) {
        (self.from().index(), self.to().index(), self.0 >> 12)
    }

    /// Raw 16-bit value
    #[inline]
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self})")
    }
}

/// UCI form: `e2e4`, `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(promo) = self.promotion() {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_packing() {
        let mv = Move::new(sq("e7"), sq("e8"), Some(Piece::Knight));
        assert_eq!(mv.from(), sq("e7"));
        assert_eq!(mv.to(), sq("e8"));
        assert_eq!(mv.promotion(), Some(Piece::Knight));
        assert_eq!(mv.to_string(), "e7e8n");
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(Move::quiet(sq("g1"), sq("f3")), Move::new(sq("g1"), sq("f3"), None));
        assert_ne!(
            Move::new(sq("a7"), sq("a8"), Some(Piece::Queen)),
            Move::new(sq("a7"), sq("a8"), Some(Piece::Rook))
        );
    }

    #[test]
    fn test_invalid_promotion_is_dropped() {
        let mv = Move::new(sq("a7"), sq("a8"), Some(Piece::King));
        assert_eq!(mv.promotion(), None);
        assert!(!mv.is_promotion());
    }
}
