//! Chess position, move and notation core.
//!
//! - [`board`]: the [`Position`] state machine, legal move generation, FEN and SAN.
//! - [`notation`]: conversions between [`Move`], UCI text, SAN and [`MoveToken`]s.
//! - [`rules`]: the [`Rules`] capability trait the game layer is written against.
//! - [`game`]: [`GameRecord`], the PGN tokenizer and composite tactics lines.
//!
//! # Example
//! ```
//! use chess_notation::{CompositeRecord, Position};
//!
//! let line = "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2|Fool's mate|2... Qh4#";
//! let record: CompositeRecord = line.parse().unwrap();
//! let solution = record.solution().unwrap();
//! assert_eq!(solution.len(), 1);
//! assert!(solution.tail().is_checkmate());
//! ```

pub mod board;
pub mod game;
pub mod notation;
pub mod rules;
mod zobrist;

pub use board::{
    CastleSide, CastlingRights, ChessError, Color, FenError, Move, MoveInfo, MoveParseError,
    Piece, Position, SanError, Square, SquareError, START_FEN,
};
pub use game::{CompositeRecord, GameRecord, PgnTokenizer, RecordEntry, Token};
pub use notation::MoveToken;
pub use rules::Rules;
