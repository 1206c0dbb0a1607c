//! Composite tactics records: `FEN|label|solution|original` lines.
//!
//! The solution movetext is played from the record's position. The original
//! game, when present, is read from the standard opening and cut off at the
//! move that reaches the record's position.

use std::str::FromStr;

use log::debug;

use crate::board::{ChessError, Position};
use crate::rules::Rules;

use super::record::GameRecord;

const DELIMITER: char = '|';

/// Field-0 keyword for the standard initial position
pub const STARTPOS: &str = "startpos";

#[derive(Debug, Clone, PartialEq)]
pub struct CompositeRecord<P = Position> {
    line: String,
    position: P,
    label: String,
    solution: Option<GameRecord<P>>,
    original: Option<GameRecord<P>>,
}

impl<P: Rules> CompositeRecord<P> {
    /// Parse one record line.
    ///
    /// Only an unreadable position field is an error. A solution that does
    /// not replay leaves the record without a solution (and the original is
    /// then not read); an original game that never reaches the position is
    /// dropped.
    pub fn parse(line: &str) -> Result<Self, ChessError> {
        // fields past the fourth are ignored
        let mut fields = line.split(DELIMITER);
        let fen = fields.next().unwrap_or_default().trim();
        let label = fields.next().unwrap_or_default();
        let solution_text = fields.next();
        let original_text = fields.next();

        let position = if fen.eq_ignore_ascii_case(STARTPOS) {
            P::default()
        } else {
            P::from_fen(fen)?
        };

        // an empty solution field still yields a zero-move solution
        let solution = solution_text.and_then(|text| read_solution(&position, text));

        let original = match (&solution, original_text) {
            (Some(_), Some(text)) if !text.trim().is_empty() => read_original(&position, text)?,
            _ => None,
        };

        Ok(CompositeRecord {
            line: line.to_string(),
            position,
            label: label.to_string(),
            solution,
            original,
        })
    }

    /// Parse every non-blank line, keeping going past bad ones. Each result
    /// is paired with its 1-based line number.
    pub fn read_all(text: &str) -> Vec<(usize, Result<Self, ChessError>)> {
        text.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| (i + 1, CompositeRecord::parse(line)))
            .collect()
    }

    /// The source line as given
    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn position(&self) -> &P {
        &self.position
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn solution(&self) -> Option<&GameRecord<P>> {
        self.solution.as_ref()
    }

    pub fn original(&self) -> Option<&GameRecord<P>> {
        self.original.as_ref()
    }

    pub fn has_solution(&self) -> bool {
        self.solution.is_some()
    }

    pub fn has_original(&self) -> bool {
        self.original.is_some()
    }
}

fn read_solution<P: Rules>(position: &P, text: &str) -> Option<GameRecord<P>> {
    let pgn = format!("[FEN \"{}\"]\n{}", position.to_fen(), text);
    match GameRecord::from_pgn(&pgn) {
        Ok(record) => Some(record),
        Err(err) => {
            debug!("solution {text:?} does not replay: {err}");
            None
        }
    }
}

/// Headers pasted onto one line get split back onto their own lines.
fn normalize_original(text: &str) -> String {
    text.replace(']', "]\n").replace(" [", "[")
}

fn read_original<P: Rules>(position: &P, text: &str) -> Result<Option<GameRecord<P>>, ChessError> {
    let mut record = match GameRecord::<P>::from_pgn(&normalize_original(text)) {
        Ok(record) => record,
        Err(err) => {
            debug!("original game skipped: {err}");
            return Ok(None);
        }
    };
    let Some(index) = record.find_position(position) else {
        debug!("original game never reaches {}", position.to_fen());
        return Ok(None);
    };
    record.truncate(index + 1)?;
    record.set_result_unknown(true);
    Ok(Some(record))
}

impl<P: Rules> FromStr for CompositeRecord<P> {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CompositeRecord::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOOLS_MATE: &str = "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2";
    const SCHOLARS: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";

    fn parse(line: &str) -> CompositeRecord {
        line.parse().unwrap()
    }

    #[test]
    fn test_mate_in_one_solution() {
        let record = parse(&format!("{SCHOLARS}|mate in 1|4. Qxf7#"));
        assert_eq!(record.label(), "mate in 1");
        let solution = record.solution().unwrap();
        assert_eq!(solution.len(), 1);
        assert!(solution.tail().is_checkmate());
        assert!(!record.has_original());
    }

    #[test]
    fn test_startpos_keyword() {
        let record = parse("startpos|opening|1. e4 e5 2. Nf3");
        assert_eq!(record.position(), &Position::new());
        assert_eq!(record.solution().map(GameRecord::len), Some(3));
    }

    #[test]
    fn test_bad_position_is_fatal() {
        let err = "8/8/8 w - -|label".parse::<CompositeRecord>().unwrap_err();
        assert!(matches!(err, ChessError::MalformedFen(_)));
    }

    #[test]
    fn test_bad_solution_is_not_fatal() {
        let record = parse(&format!("{FOOLS_MATE}|broken|2... Qh5 Qxz9|1. f3 e5 2. g4"));
        assert!(!record.has_solution());
        assert!(!record.has_original());
        assert_eq!(record.label(), "broken");
    }

    #[test]
    fn test_original_truncated_at_position() {
        let line = format!(
            "{FOOLS_MATE}|Fool's mate|2... Qh4#|[Event \"Casual\"] [White \"X\"] 1. f3 e5 2. g4 Qh4# 0-1"
        );
        let record = parse(&line);
        assert!(record.has_solution());
        let original = record.original().unwrap();
        assert_eq!(original.len(), 3);
        assert_eq!(original.tail(), record.position());
        assert!(original.is_result_unknown());
        assert_eq!(original.tag("White"), Some("X"));
        assert_eq!(record.line(), line);
    }

    #[test]
    fn test_original_missing_position_is_dropped() {
        let record = parse(&format!("{FOOLS_MATE}|x|2... Qh4#|1. e4 e5 2. Nf3"));
        assert!(record.has_solution());
        assert!(!record.has_original());
    }

    #[test]
    fn test_missing_fields() {
        let record = parse(FOOLS_MATE);
        assert_eq!(record.label(), "");
        assert!(!record.has_solution());

        let record = parse(&format!("{FOOLS_MATE}|label only"));
        assert_eq!(record.label(), "label only");
        assert!(!record.has_solution());
    }

    #[test]
    fn test_empty_solution_keeps_original() {
        let record = parse(&format!("{FOOLS_MATE}|no line||1. f3 e5 2. g4 Qh4# 0-1"));
        let solution = record.solution().unwrap();
        assert!(solution.is_empty());
        assert_eq!(solution.tail(), record.position());
        let original = record.original().unwrap();
        assert_eq!(original.len(), 3);
        assert!(original.is_result_unknown());
    }

    #[test]
    fn test_extra_fields_ignored() {
        let record = parse(&format!("{FOOLS_MATE}|x|2... Qh4#|1. f3 e5 2. g4|junk|more"));
        assert!(record.has_solution());
        assert_eq!(record.original().map(GameRecord::len), Some(3));
    }

    #[test]
    fn test_read_all_keeps_going() {
        let text = format!("{FOOLS_MATE}|a|2... Qh4#\n\nnot a fen|b\nstartpos|c\n");
        let results: Vec<(usize, Result<CompositeRecord, ChessError>)> =
            CompositeRecord::read_all(&text);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0, 1);
        assert!(results[0].1.is_ok());
        assert_eq!(results[1].0, 3);
        assert!(results[1].1.is_err());
        assert_eq!(results[2].0, 4);
        assert!(results[2].1.is_ok());
    }
}
