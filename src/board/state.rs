use std::fmt;
use std::hash::{Hash, Hasher};

use super::attack_tables::PAWN_ATTACKS;
use super::{Bitboard, CastleSide, CastlingRights, Color, Move, Piece, Square};
use crate::zobrist::ZOBRIST;

/// Everything `unmake_move` needs to restore the position bit for bit.
#[derive(Clone, Debug)]
pub(crate) struct UndoInfo {
    pub(crate) mv: Move,
    pub(crate) moved: Piece,
    pub(crate) captured: Option<(Color, Piece)>,
    pub(crate) castle: Option<CastleSide>,
    pub(crate) en_passant: bool,
    pub(crate) previous_en_passant_target: Option<Square>,
    pub(crate) previous_castling_rights: CastlingRights,
    pub(crate) previous_halfmove_clock: u32,
    pub(crate) previous_fullmove_number: u32,
}

/// A chess position: placement, side to move, castling rights, en-passant
/// target and move counters, plus the undo stack of moves applied to it.
///
/// Equality compares placement, side to move, castling rights and the
/// en-passant target; the target only counts when a pawn of the side to move
/// could actually capture onto it. Move counters and undo history never take
/// part, so a position reached by replay equals the same position read from
/// FEN.
#[derive(Clone, Debug)]
pub struct Position {
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) all_occupied: Bitboard,
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) history: Vec<UndoInfo>,
}

impl Position {
    /// The standard initial position
    #[must_use]
    pub fn new() -> Self {
        let mut position = Position::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, piece) in back_rank.iter().enumerate() {
            for (color, rank, pawn_rank) in [(Color::White, 0, 1), (Color::Black, 7, 6)] {
                if let (Some(sq), Some(pawn_sq)) = (Square::new(rank, file), Square::new(pawn_rank, file)) {
                    position.set_piece(sq, color, *piece);
                    position.set_piece(pawn_sq, color, Piece::Pawn);
                }
            }
        }
        position.castling_rights = CastlingRights::all();
        position
    }

    pub(crate) fn empty() -> Self {
        Position {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupied: [Bitboard::EMPTY; 2],
            all_occupied: Bitboard::EMPTY,
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
        }
    }

    /// Copy of this position whose construction state is the current state
    /// (the undo stack is not carried over).
    #[must_use]
    pub fn snapshot(&self) -> Position {
        Position {
            pieces: self.pieces,
            occupied: self.occupied,
            all_occupied: self.all_occupied,
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights,
            en_passant_target: self.en_passant_target,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// En-passant target exactly as stored (set after every double push)
    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Number of moves applied since construction that can still be undone
    #[must_use]
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Moves applied since construction, oldest first
    pub fn applied_moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.history.iter().map(|info| info.mv)
    }

    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        self.pieces[color.index()][piece.index()].insert(sq);
        self.occupied[color.index()].insert(sq);
        self.all_occupied.insert(sq);
    }

    pub(crate) fn remove_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        self.pieces[color.index()][piece.index()].remove(sq);
        self.occupied[color.index()].remove(sq);
        self.all_occupied.remove(sq);
    }

    /// Piece and color on a square
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        if !self.all_occupied.contains(sq) {
            return None;
        }
        let color = if self.occupied[Color::White.index()].contains(sq) {
            Color::White
        } else {
            Color::Black
        };
        Piece::ALL
            .into_iter()
            .find(|piece| self.pieces[color.index()][piece.index()].contains(sq))
            .map(|piece| (color, piece))
    }

    /// Piece kind on a square, without color
    #[must_use]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.piece_at(sq).map(|(_, piece)| piece)
    }

    pub(crate) fn is_empty(&self, sq: Square) -> bool {
        !self.all_occupied.contains(sq)
    }

    pub(crate) fn pieces_of(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    /// Square of the enemy pawn that double-pushed past `target`, if it is
    /// still there and `target` itself is empty.
    pub(crate) fn en_passant_victim(&self, target: Square) -> Option<Square> {
        let us = self.side_to_move;
        let victim = target.offset(-us.pawn_direction(), 0)?;
        (self.is_empty(target) && self.pieces_of(us.opponent(), Piece::Pawn).contains(victim))
            .then_some(victim)
    }

    /// En-passant target when a pawn of the side to move stands ready to take.
    pub(crate) fn capturable_en_passant(&self) -> Option<Square> {
        let target = self.en_passant_target?;
        let us = self.side_to_move;
        // our pawns that attack `target` sit where an enemy pawn on `target` would attack
        let attackers = PAWN_ATTACKS[us.opponent().index()][target.index()].0
            & self.pieces_of(us, Piece::Pawn).0;
        (attackers != 0).then_some(target)
    }

    /// Zobrist key over the fields that take part in equality
    #[must_use]
    pub fn zobrist_key(&self) -> u64 {
        let mut key = 0u64;
        for color in Color::BOTH {
            for piece in Piece::ALL {
                for sq in self.pieces_of(color, piece).iter() {
                    key ^= ZOBRIST.piece_keys[piece.index()][color.index()][sq.index()];
                }
            }
        }
        if self.side_to_move == Color::Black {
            key ^= ZOBRIST.black_to_move_key;
        }
        key ^= ZOBRIST.castling_keys[usize::from(self.castling_rights.as_u8())];
        if let Some(ep) = self.capturable_en_passant() {
            key ^= ZOBRIST.en_passant_keys[ep.file()];
        }
        key
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.pieces == other.pieces
            && self.side_to_move == other.side_to_move
            && self.castling_rights == other.castling_rights
            && self.capturable_en_passant() == other.capturable_en_passant()
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.zobrist_key());
    }
}

/// Board diagram, rank 8 first, `.` for empty squares, followed by the FEN.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            let row: String = (0..8)
                .filter_map(|file| Square::new(rank, file))
                .map(|sq| {
                    self.piece_at(sq)
                        .map_or('.', |(color, piece)| piece.to_fen_char(color))
                })
                .collect();
            writeln!(f, "{} {}", rank + 1, row)?;
        }
        writeln!(f, "  abcdefgh")?;
        write!(f, "{}", self.to_fen())
    }
}
