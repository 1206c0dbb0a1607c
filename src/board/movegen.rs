use super::attack_tables::{
    slider_attacks, BISHOP_DIRECTIONS, KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS,
    ROOK_DIRECTIONS,
};
use super::{
    Bitboard, CastleSide, Color, Move, Piece, Position, Square, PROMOTION_PIECES,
};

impl Position {
    fn generate_pseudo_moves(&self) -> Vec<Move> {
        let color = self.side_to_move;
        let mut moves = Vec::with_capacity(64);

        for piece in Piece::ALL {
            for from in self.pieces_of(color, piece).iter() {
                match piece {
                    Piece::Pawn => self.generate_pawn_moves(from, &mut moves),
                    Piece::King => self.generate_king_moves(from, &mut moves),
                    _ => {
                        let targets = self.piece_attacks(from, piece).0
                            & !self.occupied[color.index()].0;
                        push_targets(from, Bitboard(targets), &mut moves);
                    }
                }
            }
        }
        moves
    }

    /// Squares a non-pawn piece on `from` attacks with the current occupancy.
    fn piece_attacks(&self, from: Square, piece: Piece) -> Bitboard {
        let idx = from.index();
        let occ = self.all_occupied.0;
        match piece {
            Piece::Knight => KNIGHT_ATTACKS[idx],
            Piece::Bishop => slider_attacks(idx, occ, &BISHOP_DIRECTIONS),
            Piece::Rook => slider_attacks(idx, occ, &ROOK_DIRECTIONS),
            Piece::Queen => Bitboard(
                slider_attacks(idx, occ, &ROOK_DIRECTIONS).0
                    | slider_attacks(idx, occ, &BISHOP_DIRECTIONS).0,
            ),
            Piece::King => KING_ATTACKS[idx],
            Piece::Pawn => PAWN_ATTACKS[self.side_to_move.index()][idx],
        }
    }

    fn generate_pawn_moves(&self, from: Square, moves: &mut Vec<Move>) {
        let color = self.side_to_move;
        let dir = color.pawn_direction();
        let promotion_rank = color.pawn_promotion_rank();

        let push_pawn_move = |to: Square, moves: &mut Vec<Move>| {
            if to.rank() == promotion_rank {
                for promo in PROMOTION_PIECES {
                    moves.push(Move::new(from, to, Some(promo)));
                }
            } else {
                moves.push(Move::quiet(from, to));
            }
        };

        if let Some(one) = from.offset(dir, 0) {
            if self.is_empty(one) {
                push_pawn_move(one, moves);
                if from.rank() == color.pawn_start_rank() {
                    if let Some(two) = one.offset(dir, 0) {
                        if self.is_empty(two) {
                            moves.push(Move::quiet(from, two));
                        }
                    }
                }
            }
        }

        let enemies = self.occupied[color.opponent().index()];
        for to in PAWN_ATTACKS[color.index()][from.index()].iter() {
            if enemies.contains(to) {
                push_pawn_move(to, moves);
            } else if self.is_en_passant(Move::quiet(from, to)) {
                moves.push(Move::quiet(from, to));
            }
        }
    }

    fn generate_king_moves(&self, from: Square, moves: &mut Vec<Move>) {
        let color = self.side_to_move;
        let targets = KING_ATTACKS[from.index()].0 & !self.occupied[color.index()].0;
        push_targets(from, Bitboard(targets), moves);

        let back_rank = color.back_rank();
        if Square::new(back_rank, 4) != Some(from) {
            return;
        }
        let opponent = color.opponent();
        for side in [CastleSide::King, CastleSide::Queen] {
            if !self.castling_rights.has(color, side) {
                continue;
            }
            let (rook_file, _) = side.rook_files();
            let king_to = side.king_to_file();
            let rook_home = Square::new(back_rank, rook_file);
            if rook_home.and_then(|sq| self.piece_at(sq)) != Some((color, Piece::Rook)) {
                continue;
            }
            let (lo, hi) = (rook_file.min(4) + 1, rook_file.max(4));
            let path_clear = (lo..hi)
                .filter_map(|file| Square::new(back_rank, file))
                .all(|sq| self.is_empty(sq));
            // king may not start in, pass through, or land in check
            let (k_lo, k_hi) = (king_to.min(4), king_to.max(4));
            let path_safe = (k_lo..=k_hi)
                .filter_map(|file| Square::new(back_rank, file))
                .all(|sq| !self.is_square_attacked(sq, opponent));
            if path_clear && path_safe {
                if let Some(to) = Square::new(back_rank, king_to) {
                    moves.push(Move::quiet(from, to));
                }
            }
        }
    }

    pub(crate) fn is_square_attacked(&self, square: Square, attacker: Color) -> bool {
        let idx = square.index();
        let occ = self.all_occupied.0;

        // attacking pawns sit where a defending pawn on `square` would attack
        if PAWN_ATTACKS[attacker.opponent().index()][idx].0
            & self.pieces_of(attacker, Piece::Pawn).0
            != 0
        {
            return true;
        }
        if KNIGHT_ATTACKS[idx].0 & self.pieces_of(attacker, Piece::Knight).0 != 0 {
            return true;
        }
        if KING_ATTACKS[idx].0 & self.pieces_of(attacker, Piece::King).0 != 0 {
            return true;
        }

        let queens = self.pieces_of(attacker, Piece::Queen).0;
        let rook_like = self.pieces_of(attacker, Piece::Rook).0 | queens;
        let bishop_like = self.pieces_of(attacker, Piece::Bishop).0 | queens;

        slider_attacks(idx, occ, &ROOK_DIRECTIONS).0 & rook_like != 0
            || slider_attacks(idx, occ, &BISHOP_DIRECTIONS).0 & bishop_like != 0
    }

    /// True if any king of `color` is attacked; a side without a king is never in check.
    pub(crate) fn is_in_check(&self, color: Color) -> bool {
        self.pieces_of(color, Piece::King)
            .iter()
            .any(|king| self.is_square_attacked(king, color.opponent()))
    }

    /// Legal moves computed in place: every pseudo-legal move is made and
    /// unmade, so `self` ends exactly as it started.
    pub(crate) fn generate_legal(&mut self) -> Vec<Move> {
        let color = self.side_to_move;
        let mut legal = Vec::new();
        for mv in self.generate_pseudo_moves() {
            if let Some(info) = self.make_move(mv) {
                if !self.is_in_check(color) {
                    legal.push(mv);
                }
                self.unmake_move(info);
            }
        }
        legal.sort_by_key(|mv| mv.sort_key());
        legal
    }

    /// Every legal move for the side to move, ordered by from square, then
    /// to square, then promotion kind.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        self.snapshot().generate_legal()
    }

    #[must_use]
    pub fn is_legal(&self, mv: Move) -> bool {
        self.legal_moves().contains(&mv)
    }

    /// Legal captures only (en passant included)
    #[must_use]
    pub fn capture_moves(&self) -> Vec<Move> {
        self.legal_moves()
            .into_iter()
            .filter(|&mv| self.is_capture(mv))
            .collect()
    }

    /// Side to move is in check
    #[must_use]
    pub fn is_check(&self) -> bool {
        self.is_in_check(self.side_to_move)
    }

    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.is_check() && self.legal_moves().is_empty()
    }

    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && self.legal_moves().is_empty()
    }

    /// Count leaf nodes of the legal move tree to `depth`.
    #[must_use]
    pub fn perft(&self, depth: usize) -> u64 {
        self.snapshot().perft_inner(depth)
    }

    fn perft_inner(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.generate_legal();
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut nodes = 0;
        for mv in moves {
            if let Some(info) = self.make_move(mv) {
                nodes += self.perft_inner(depth - 1);
                self.unmake_move(info);
            }
        }
        nodes
    }
}

fn push_targets(from: Square, targets: Bitboard, moves: &mut Vec<Move>) {
    moves.extend(targets.iter().map(|to| Move::quiet(from, to)));
}
