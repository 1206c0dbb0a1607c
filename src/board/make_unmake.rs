use super::state::UndoInfo;
use super::{CastleSide, ChessError, Color, Move, Piece, Position, Square};

impl Position {
    /// Castling wing if `mv` is a king's two-square move from its home square.
    #[must_use]
    pub fn castling_side(&self, mv: Move) -> Option<CastleSide> {
        let (color, piece) = self.piece_at(mv.from())?;
        let back_rank = color.back_rank();
        if piece != Piece::King
            || mv.from().rank() != back_rank
            || mv.to().rank() != back_rank
            || mv.from().file() != 4
        {
            return None;
        }
        match mv.to().file() {
            6 => Some(CastleSide::King),
            2 => Some(CastleSide::Queen),
            _ => None,
        }
    }

    /// Returns true if `mv` is a pawn capturing onto the en-passant target
    #[must_use]
    pub fn is_en_passant(&self, mv: Move) -> bool {
        self.piece_at(mv.from()) == Some((self.side_to_move, Piece::Pawn))
            && mv.from().file() != mv.to().file()
            && Some(mv.to()) == self.en_passant_target
            && self.en_passant_victim(mv.to()) == Square::new(mv.from().rank(), mv.to().file())
    }

    /// Returns true if `mv` removes an enemy piece (including en passant)
    #[must_use]
    pub fn is_capture(&self, mv: Move) -> bool {
        match (self.piece_at(mv.from()), self.piece_at(mv.to())) {
            (Some((mover, _)), Some((victim, _))) => mover != victim,
            _ => self.is_en_passant(mv),
        }
    }

    /// Play a pseudo-legal move without touching the undo stack.
    ///
    /// Returns `None`, leaving the position untouched, if `from` is empty.
    pub(crate) fn make_move(&mut self, mv: Move) -> Option<UndoInfo> {
        let from = mv.from();
        let to = mv.to();
        let (color, moved) = self.piece_at(from)?;
        let castle = self.castling_side(mv);
        let en_passant = self.is_en_passant(mv);

        let mut info = UndoInfo {
            mv,
            moved,
            captured: None,
            castle,
            en_passant,
            previous_en_passant_target: self.en_passant_target,
            previous_castling_rights: self.castling_rights,
            previous_halfmove_clock: self.halfmove_clock,
            previous_fullmove_number: self.fullmove_number,
        };

        if en_passant {
            if let Some(victim_sq) = Square::new(from.rank(), to.file()) {
                self.remove_piece(victim_sq, color.opponent(), Piece::Pawn);
                info.captured = Some((color.opponent(), Piece::Pawn));
            }
        } else if let Some((victim_color, victim)) = self.piece_at(to) {
            self.remove_piece(to, victim_color, victim);
            info.captured = Some((victim_color, victim));
        }

        self.remove_piece(from, color, moved);
        self.set_piece(to, color, mv.promotion().unwrap_or(moved));

        if let Some(side) = castle {
            let (rook_from, rook_to) = side.rook_files();
            if let (Some(rook_from), Some(rook_to)) = (
                Square::new(from.rank(), rook_from),
                Square::new(from.rank(), rook_to),
            ) {
                self.remove_piece(rook_from, color, Piece::Rook);
                self.set_piece(rook_to, color, Piece::Rook);
            }
        }

        self.en_passant_target = None;
        if moved == Piece::Pawn && from.rank().abs_diff(to.rank()) == 2 {
            self.en_passant_target = Square::new((from.rank() + to.rank()) / 2, from.file());
        }

        if moved == Piece::Pawn || info.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }

        if moved == Piece::King {
            self.castling_rights.remove_color(color);
        }
        for sq in [from, to] {
            self.clear_corner_right(sq);
        }

        if color == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = color.opponent();

        Some(info)
    }

    /// A move from or onto a rook's home corner ends castling on that wing.
    fn clear_corner_right(&mut self, sq: Square) {
        let color = match sq.rank() {
            0 => Color::White,
            7 => Color::Black,
            _ => return,
        };
        match sq.file() {
            0 => self.castling_rights.remove(color, CastleSide::Queen),
            7 => self.castling_rights.remove(color, CastleSide::King),
            _ => {}
        }
    }

    pub(crate) fn unmake_move(&mut self, info: UndoInfo) {
        let color = self.side_to_move.opponent();
        let from = info.mv.from();
        let to = info.mv.to();

        self.side_to_move = color;
        self.en_passant_target = info.previous_en_passant_target;
        self.castling_rights = info.previous_castling_rights;
        self.halfmove_clock = info.previous_halfmove_clock;
        self.fullmove_number = info.previous_fullmove_number;

        if let Some(side) = info.castle {
            let (rook_from, rook_to) = side.rook_files();
            if let (Some(rook_from), Some(rook_to)) = (
                Square::new(from.rank(), rook_from),
                Square::new(from.rank(), rook_to),
            ) {
                self.remove_piece(rook_to, color, Piece::Rook);
                self.set_piece(rook_from, color, Piece::Rook);
            }
        }

        self.remove_piece(to, color, info.mv.promotion().unwrap_or(info.moved));
        self.set_piece(from, color, info.moved);

        if let Some((victim_color, victim)) = info.captured {
            let victim_sq = if info.en_passant {
                Square::new(from.rank(), to.file())
            } else {
                Some(to)
            };
            if let Some(sq) = victim_sq {
                self.set_piece(sq, victim_color, victim);
            }
        }
    }

    /// Apply a legal move in place.
    ///
    /// Fails with [`ChessError::IllegalMove`] if `mv` is not in
    /// [`legal_moves`](Position::legal_moves); the position is then unchanged.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), ChessError> {
        if !self.is_legal(mv) {
            return Err(ChessError::IllegalMove {
                notation: mv.to_string(),
            });
        }
        let info = self.make_move(mv).ok_or_else(|| ChessError::IllegalMove {
            notation: mv.to_string(),
        })?;
        self.history.push(info);
        Ok(())
    }

    /// Take back the most recently applied move, returning it.
    pub fn undo_move(&mut self) -> Result<Move, ChessError> {
        let info = self.history.pop().ok_or(ChessError::NoMoveToUndo)?;
        let mv = info.mv;
        self.unmake_move(info);
        Ok(mv)
    }
}
