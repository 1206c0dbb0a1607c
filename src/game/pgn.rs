//! Line-oriented PGN tokenizer.
//!
//! Movetext is resolved against a tracked position as it is scanned, so the
//! output is a flat sequence of headers, comments, results and move tokens
//! that carry coordinate text regardless of how the source spelled them.

use std::fmt;

use log::{debug, trace};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{ChessError, Position};
use crate::notation::{from_uci, to_token, MoveToken};
use crate::rules::Rules;

/// One unit of tokenized PGN text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Token {
    /// `[Tag "Value"]` pair, quotes removed
    Header { tag: String, value: String },
    /// Move resolved against the tracked position
    Move(MoveToken),
    /// Movetext that did not resolve; the tracked position was not advanced
    Verbatim(MoveToken),
    /// Brace comment, braces stripped
    Comment(String),
    /// `1-0`, `0-1`, `1/2-1/2` or `*`
    Result(String),
}

/// Flat text form: headers as PGN tag pairs, comments in braces, moves as
/// their token text.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Header { tag, value } => {
                write!(f, "[{tag} \"{}\"]", value.replace('\\', "\\\\").replace('"', "\\\""))
            }
            Token::Move(token) | Token::Verbatim(token) => write!(f, "{token}"),
            Token::Comment(text) => write!(f, "{{{text}}}"),
            Token::Result(result) => f.write_str(result),
        }
    }
}

const RESULTS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

pub(crate) fn is_result(word: &str) -> bool {
    RESULTS.contains(&word)
}

/// Tokenizer over one PGN text with a fixed initial position.
///
/// Each call to [`tokens`](PgnTokenizer::tokens) scans the text from the
/// start again; nothing is carried between calls.
#[derive(Debug, Clone)]
pub struct PgnTokenizer<'a, P = Position> {
    text: &'a str,
    start: P,
}

impl<'a> PgnTokenizer<'a> {
    /// Tokenizer starting from the standard initial position.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        PgnTokenizer::with_start(text, Position::new())
    }
}

impl<'a, P: Rules> PgnTokenizer<'a, P> {
    #[must_use]
    pub fn with_start(text: &'a str, start: P) -> Self {
        PgnTokenizer { text, start }
    }

    pub fn tokens(&self) -> Result<Vec<Token>, ChessError> {
        self.tokens_with_position().map(|(tokens, _)| tokens)
    }

    /// Tokens plus the tracked position after the last resolved move.
    pub fn tokens_with_position(&self) -> Result<(Vec<Token>, P), ChessError> {
        let mut scan = Scan {
            position: self.start.snapshot(),
            tokens: Vec::new(),
            comment: None,
        };
        for line in self.text.lines() {
            scan.line(line)?;
        }
        if let Some(text) = scan.comment.take() {
            scan.tokens.push(Token::Comment(squash(&text)));
        }
        Ok((scan.tokens, scan.position))
    }
}

struct Scan<P> {
    position: P,
    tokens: Vec<Token>,
    // open brace comment
    comment: Option<String>,
}

impl<P: Rules> Scan<P> {
    fn line(&mut self, line: &str) -> Result<(), ChessError> {
        let mut rest = line.trim();
        if self.comment.is_none() {
            if rest.starts_with('%') {
                return Ok(());
            }
            if rest.starts_with('[') {
                let (tag, value, after) = parse_header(rest)?;
                self.header(tag, value);
                rest = after;
            }
        }

        loop {
            if let Some(buf) = self.comment.as_mut() {
                match rest.find('}') {
                    Some(close) => {
                        buf.push(' ');
                        buf.push_str(&rest[..close]);
                        let text = squash(buf);
                        self.comment = None;
                        self.tokens.push(Token::Comment(text));
                        rest = &rest[close + 1..];
                        continue;
                    }
                    None => {
                        buf.push(' ');
                        buf.push_str(rest);
                        return Ok(());
                    }
                }
            }

            rest = rest.trim_start();
            if rest.is_empty() || rest.starts_with(';') {
                return Ok(());
            }
            if let Some(after) = rest.strip_prefix('{') {
                self.comment = Some(String::new());
                rest = after;
                continue;
            }

            let end = rest
                .find(|c: char| c.is_whitespace() || c == '{' || c == ';')
                .unwrap_or(rest.len());
            let (word, after) = rest.split_at(end);
            self.word(word)?;
            rest = after;
        }
    }

    fn header(&mut self, tag: String, value: String) {
        if tag.eq_ignore_ascii_case("fen") {
            trace!("FEN header resets tracked position to {value:?}");
            self.position = P::from_fen_or_default(&value);
        }
        self.tokens.push(Token::Header { tag, value });
    }

    fn word(&mut self, word: &str) -> Result<(), ChessError> {
        if is_result(word) {
            self.tokens.push(Token::Result(word.to_string()));
            return Ok(());
        }
        if word.starts_with('$') {
            return Ok(());
        }
        let word = strip_move_number(word);
        if word.is_empty() {
            return Ok(());
        }

        match self.resolve(word) {
            Some(mv) => {
                self.position.apply_move(mv)?;
                self.tokens.push(Token::Move(to_token(mv)));
            }
            None => {
                debug!("unresolved movetext {word:?} kept verbatim");
                self.tokens.push(Token::Verbatim(MoveToken::verbatim(word)));
            }
        }
        Ok(())
    }

    /// SAN first, then coordinate text that is legal here.
    fn resolve(&self, word: &str) -> Option<crate::board::Move> {
        if let Ok(mv) = self.position.from_san(word) {
            return Some(mv);
        }
        let bare = word.trim_end_matches(['+', '#', '!', '?']);
        if !looks_like_coordinates(bare) {
            return None;
        }
        from_uci(bare, &self.position)
            .ok()
            .filter(|mv| self.position.is_legal(*mv))
    }
}

/// Drops a leading move number (`17.`, `17...`), keeping anything glued on.
fn strip_move_number(word: &str) -> &str {
    let digits = word.len() - word.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return word;
    }
    let after_digits = &word[digits..];
    let rest = after_digits.trim_start_matches('.');
    if rest.len() == after_digits.len() {
        word
    } else {
        rest
    }
}

fn looks_like_coordinates(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() >= 4 && (b'a'..=b'h').contains(&bytes[0]) && (b'1'..=b'8').contains(&bytes[1])
}

fn squash(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits `[Tag "Value"] rest` into its parts.
fn parse_header(line: &str) -> Result<(String, String, &str), ChessError> {
    let malformed = || ChessError::MalformedHeader {
        line: line.to_string(),
    };

    let inner = line.strip_prefix('[').ok_or_else(malformed)?.trim_start();
    let tag_end = inner
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(inner.len());
    if tag_end == 0 {
        return Err(malformed());
    }
    let tag = inner[..tag_end].to_string();

    let quoted = inner[tag_end..].trim_start();
    let body = quoted.strip_prefix('"').ok_or_else(malformed)?;
    let mut value = String::new();
    let mut chars = body.char_indices();
    let close = loop {
        match chars.next() {
            Some((_, '\\')) => {
                if let Some((_, escaped)) = chars.next() {
                    value.push(escaped);
                }
            }
            Some((i, '"')) => break i,
            Some((_, c)) => value.push(c),
            None => return Err(malformed()),
        }
    };

    let after = body[close + 1..].trim_start();
    let after = after.strip_prefix(']').ok_or_else(malformed)?;
    Ok((tag, value, after))
}
