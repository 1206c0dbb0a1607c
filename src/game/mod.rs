//! Game text: the PGN tokenizer, game records built from its output, and
//! composite tactics records.
//!
//! # Example
//! ```
//! use chess_notation::{GameRecord, Position};
//!
//! let record: GameRecord = GameRecord::from_pgn("1. e4 e5 2. Nf3 Nc6").unwrap();
//! assert_eq!(record.len(), 4);
//! assert_eq!(record.uci_moves(), "e2e4 e7e5 g1f3 b8c6");
//! assert_ne!(record.tail(), &Position::new());
//! ```

mod composite;
mod pgn;
mod record;

pub use composite::{CompositeRecord, STARTPOS};
pub use pgn::{PgnTokenizer, Token};
pub use record::{GameRecord, RecordEntry};
