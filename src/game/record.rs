use crate::board::{ChessError, Color, Move, Position};
use crate::notation::{from_token, uci_line};
use crate::rules::Rules;

use super::pgn::{PgnTokenizer, Token};

/// One applied move and the position it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordEntry<P = Position> {
    mv: Move,
    san: String,
    position: P,
    comment: Option<String>,
}

impl<P> RecordEntry<P> {
    pub fn mv(&self) -> Move {
        self.mv
    }

    /// SAN as written against the position before the move
    pub fn san(&self) -> &str {
        &self.san
    }

    /// Position after the move
    pub fn position(&self) -> &P {
        &self.position
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

/// Ordered sequence of legal moves anchored to a starting position.
///
/// Every entry keeps its own snapshot of the resulting position, so lookups
/// and truncation never replay moves.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord<P = Position> {
    start: P,
    entries: Vec<RecordEntry<P>>,
    tags: Vec<(String, String)>,
    leading_comment: Option<String>,
    result: Option<String>,
    result_unknown: bool,
}

impl<P: Rules> Default for GameRecord<P> {
    fn default() -> Self {
        GameRecord::new(P::default())
    }
}

impl<P: Rules> GameRecord<P> {
    /// Empty record starting at a copy of `start`.
    #[must_use]
    pub fn new(start: P) -> Self {
        GameRecord {
            start: start.snapshot(),
            entries: Vec::new(),
            tags: Vec::new(),
            leading_comment: None,
            result: None,
            result_unknown: false,
        }
    }

    /// Build a record from PGN text, starting at the standard position unless
    /// the text carries a `FEN` header.
    ///
    /// Movetext that the tokenizer could not resolve makes the whole record
    /// fail with [`ChessError::IllegalMove`].
    pub fn from_pgn(text: &str) -> Result<Self, ChessError> {
        let start = P::default();
        let tokens = PgnTokenizer::with_start(text, start.snapshot()).tokens()?;
        GameRecord::from_tokens(&tokens, start)
    }

    /// Replay tokenizer output from `start`.
    pub fn from_tokens(tokens: &[Token], start: P) -> Result<Self, ChessError> {
        let mut record = GameRecord::new(start);
        for token in tokens {
            match token {
                Token::Header { tag, value } => {
                    if tag.eq_ignore_ascii_case("fen") && record.is_empty() {
                        record.start = P::from_fen_or_default(value);
                    }
                    record.set_tag(tag, value);
                }
                Token::Move(token) => {
                    let mv = from_token(token, record.tail())?;
                    record.append(mv)?;
                }
                Token::Verbatim(token) => {
                    return Err(ChessError::IllegalMove {
                        notation: token.body().to_string(),
                    })
                }
                Token::Comment(text) => record.add_comment(text),
                Token::Result(result) => record.result = Some(result.clone()),
            }
        }
        Ok(record)
    }

    /// Append a move legal at the tail.
    pub fn append(&mut self, mv: Move) -> Result<(), ChessError> {
        let tail = self.tail();
        let mut next = tail.snapshot();
        next.apply_move(mv)?;
        let san = tail.to_san(mv);
        self.entries.push(RecordEntry {
            mv,
            san,
            position: next.snapshot(),
            comment: None,
        });
        Ok(())
    }

    /// Resolve SAN at the tail and append it.
    pub fn append_san(&mut self, san: &str) -> Result<Move, ChessError> {
        let mv = self.tail().from_san(san)?;
        self.append(mv)?;
        Ok(mv)
    }

    /// Keep only the first `len` moves.
    pub fn truncate(&mut self, len: usize) -> Result<(), ChessError> {
        if len > self.entries.len() {
            return Err(ChessError::OutOfRange {
                requested: len,
                len: self.entries.len(),
            });
        }
        self.entries.truncate(len);
        Ok(())
    }

    /// Index of the latest move whose resulting position equals `target`.
    ///
    /// Scans from the last move backwards, so when a position recurs the most
    /// recent occurrence wins.
    pub fn find_position(&self, target: &P) -> Option<usize> {
        let key = target.zobrist_key();
        self.entries
            .iter()
            .rposition(|entry| entry.position.zobrist_key() == key && entry.position == *target)
    }

    pub fn set_result_unknown(&mut self, unknown: bool) {
        self.result_unknown = unknown;
    }

    pub fn is_result_unknown(&self) -> bool {
        self.result_unknown
    }

    pub fn start(&self) -> &P {
        &self.start
    }

    /// Position after the last move, or the start when empty
    pub fn tail(&self) -> &P {
        self.entries
            .last()
            .map_or(&self.start, |entry| &entry.position)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RecordEntry<P>] {
        &self.entries
    }

    pub fn moves(&self) -> Vec<Move> {
        self.entries.iter().map(|entry| entry.mv).collect()
    }

    /// Position after move `index` (0-based)
    pub fn position_after(&self, index: usize) -> Option<&P> {
        self.entries.get(index).map(|entry| &entry.position)
    }

    /// Position the move at `index` was played from
    fn position_before(&self, index: usize) -> &P {
        match index.checked_sub(1) {
            Some(prev) => &self.entries[prev].position,
            None => &self.start,
        }
    }

    pub fn tags(&self) -> &[(String, String)] {
        &self.tags
    }

    /// Tag value, matching the name case-insensitively
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(tag, _)| tag.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Set a tag, replacing an existing one of the same name.
    pub fn set_tag(&mut self, name: &str, value: &str) {
        match self
            .tags
            .iter_mut()
            .find(|(tag, _)| tag.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.tags.push((name.to_string(), value.to_string())),
        }
    }

    /// Comment before the first move
    pub fn leading_comment(&self) -> Option<&str> {
        self.leading_comment.as_deref()
    }

    /// Attach a comment to the last move, or before the first move when the
    /// record is empty. Repeated comments are joined with a space.
    pub fn add_comment(&mut self, text: &str) {
        let slot = match self.entries.last_mut() {
            Some(entry) => &mut entry.comment,
            None => &mut self.leading_comment,
        };
        match slot {
            Some(existing) => {
                existing.push(' ');
                existing.push_str(text);
            }
            None => *slot = Some(text.to_string()),
        }
    }

    /// Game result as read from the movetext
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn set_result(&mut self, result: Option<&str>) {
        self.result = result.map(str::to_string);
    }

    /// Moves as space-separated coordinate text
    pub fn uci_moves(&self) -> String {
        uci_line(&self.moves())
    }

    /// Export as PGN: tag pairs, numbered SAN movetext with comments, result.
    ///
    /// A start other than the standard position gets a `FEN` tag if none is
    /// present. The result is `*` while the result is flagged unknown.
    pub fn to_pgn(&self) -> String {
        let mut out = String::new();
        for (tag, value) in &self.tags {
            out.push_str(&Token::Header {
                tag: tag.clone(),
                value: value.clone(),
            }
            .to_string());
            out.push('\n');
        }
        if self.tag("FEN").is_none() && self.start != P::default() {
            out.push_str(&format!("[SetUp \"1\"]\n[FEN \"{}\"]\n", self.start.to_fen()));
        }
        if !out.is_empty() {
            out.push('\n');
        }

        let mut words: Vec<String> = Vec::new();
        if let Some(comment) = &self.leading_comment {
            words.push(format!("{{{comment}}}"));
        }
        let mut after_comment = true;
        for (i, entry) in self.entries.iter().enumerate() {
            let before = self.position_before(i);
            let number = before.fullmove_number();
            match before.side_to_move() {
                Color::White => words.push(format!("{number}.")),
                Color::Black if after_comment => words.push(format!("{number}...")),
                Color::Black => {}
            }
            words.push(entry.san.clone());
            after_comment = false;
            if let Some(comment) = &entry.comment {
                words.push(format!("{{{comment}}}"));
                after_comment = true;
            }
        }

        let result = if self.result_unknown {
            "*"
        } else {
            self.result.as_deref().unwrap_or("*")
        };
        words.push(result.to_string());
        out.push_str(&words.join(" "));
        out.push('\n');
        out
    }
}
