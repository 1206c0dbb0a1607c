//! Per-move facts a GUI needs to render or announce a move.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{CastleSide, Move, Piece, Position};

/// Description of one legal move in the position it was generated from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveInfo {
    pub mv: Move,
    /// Kind of the moving piece
    pub piece: Piece,
    /// Kind of the piece removed, if any
    pub captured: Option<Piece>,
    pub en_passant: bool,
    pub castle: Option<CastleSide>,
    pub check: bool,
    pub mate: bool,
    pub san: String,
}

impl Position {
    /// Facts about `mv`, or `None` if it is not legal here.
    #[must_use]
    pub fn move_info(&self, mv: Move) -> Option<MoveInfo> {
        if !self.is_legal(mv) {
            return None;
        }
        self.describe(mv)
    }

    /// [`MoveInfo`] for every legal move, in `legal_moves` order.
    #[must_use]
    pub fn legal_move_infos(&self) -> Vec<MoveInfo> {
        self.legal_moves()
            .into_iter()
            .filter_map(|mv| self.describe(mv))
            .collect()
    }

    /// Returns true if playing `mv` leaves the opponent in check
    #[must_use]
    pub fn gives_check(&self, mv: Move) -> bool {
        self.position_after(mv).is_some_and(|after| after.is_check())
    }

    /// Returns true if playing `mv` checkmates the opponent
    #[must_use]
    pub fn gives_mate(&self, mv: Move) -> bool {
        self.position_after(mv)
            .is_some_and(|after| after.is_checkmate())
    }

    fn describe(&self, mv: Move) -> Option<MoveInfo> {
        let piece = self.piece_on(mv.from())?;
        let en_passant = self.is_en_passant(mv);
        let captured = if en_passant {
            Some(Piece::Pawn)
        } else if self.is_capture(mv) {
            self.piece_on(mv.to())
        } else {
            None
        };
        let after = self.position_after(mv)?;
        let check = after.is_check();
        let mate = check && after.legal_moves().is_empty();
        Some(MoveInfo {
            mv,
            piece,
            captured,
            en_passant,
            castle: self.castling_side(mv),
            check,
            mate,
            san: self.move_to_san(mv),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_for_king_capture() {
        let position =
            Position::from_fen("4k3/8/8/8/8/8/3q4/R3K3 w Q - 0 1").unwrap();
        let mv = position.parse_san("Kxd2").unwrap();
        let info = position.move_info(mv).unwrap();
        assert_eq!(info.piece, Piece::King);
        assert_eq!(info.captured, Some(Piece::Queen));
        assert!(!info.check);
        assert_eq!(info.san, "Kxd2");
    }

    #[test]
    fn test_info_for_mate() {
        let position = Position::from_fen(
            "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2",
        )
        .unwrap();
        let mv = position.parse_san("Qh4").unwrap();
        let info = position.move_info(mv).unwrap();
        assert!(info.check);
        assert!(info.mate);
        assert!(position.gives_check(mv));
        assert!(position.gives_mate(mv));
    }

    #[test]
    fn test_info_rejects_illegal() {
        let position = Position::new();
        let e2: crate::Square = "e2".parse().unwrap();
        let e5: crate::Square = "e5".parse().unwrap();
        assert!(position.move_info(Move::quiet(e2, e5)).is_none());
    }

    #[test]
    fn test_infos_cover_all_moves() {
        let position = Position::new();
        let infos = position.legal_move_infos();
        assert_eq!(infos.len(), 20);
        assert!(infos.iter().all(|info| info.captured.is_none() && !info.check));
    }

    #[test]
    fn test_info_castle_and_en_passant() {
        let position =
            Position::from_fen("r3k2r/8/8/3pP3/8/8/8/R3K2R w KQkq d6 0 1").unwrap();
        let castle = position.parse_san("O-O-O").unwrap();
        assert_eq!(
            position.move_info(castle).unwrap().castle,
            Some(CastleSide::Queen)
        );
        let ep = position.parse_san("exd6").unwrap();
        let info = position.move_info(ep).unwrap();
        assert!(info.en_passant);
        assert_eq!(info.captured, Some(Piece::Pawn));
    }
}
