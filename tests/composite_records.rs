use serde::Deserialize;

use chess_notation::{ChessError, CompositeRecord, GameRecord, Position};

#[derive(Deserialize)]
struct RecordSet {
    records: Vec<RecordCase>,
}

#[derive(Deserialize)]
struct RecordCase {
    name: String,
    line: String,
    solution_len: Option<usize>,
    mate: bool,
    original_len: Option<usize>,
}

fn load() -> RecordSet {
    let data = include_str!("data/composite_lines.json");
    serde_json::from_str(data).expect("invalid composite_lines.json")
}

#[test]
fn composite_record_suite() {
    for case in load().records {
        let record: CompositeRecord = case
            .line
            .parse()
            .unwrap_or_else(|err| panic!("{}: {err}", case.name));

        assert_eq!(
            record.solution().map(GameRecord::len),
            case.solution_len,
            "solution length for {}",
            case.name
        );
        assert_eq!(
            record.solution().is_some_and(|s| s.tail().is_checkmate()),
            case.mate,
            "mate status for {}",
            case.name
        );
        assert_eq!(
            record.original().map(GameRecord::len),
            case.original_len,
            "original length for {}",
            case.name
        );

        if let Some(original) = record.original() {
            assert_eq!(original.tail(), record.position(), "{}", case.name);
            assert!(original.is_result_unknown(), "{}", case.name);
        }
    }
}

#[test]
fn read_all_over_the_suite() {
    let set = load();
    let text: String = set
        .records
        .iter()
        .map(|case| format!("{}\n", case.line))
        .collect();
    let results = CompositeRecord::<Position>::read_all(&text);
    assert_eq!(results.len(), set.records.len());
    assert!(results.iter().all(|(_, result)| result.is_ok()));
}

#[test]
fn malformed_position_field_is_fatal() {
    for line in ["", "rnbqkbnr/pppppppp w KQkq -|x", "startpos extra|x"] {
        let result = line.parse::<CompositeRecord>();
        assert!(
            matches!(result, Err(ChessError::MalformedFen(_))),
            "{line:?} should be rejected"
        );
    }
}

#[test]
fn solution_starts_from_record_position() {
    let record: CompositeRecord =
        "6k1/5ppp/8/8/8/8/8/3R2K1 w - - 0 1|back rank|1. Rd8#".parse().unwrap();
    let solution = record.solution().unwrap();
    assert_eq!(solution.start(), record.position());
    assert_eq!(solution.entries()[0].san(), "Rd8#");
    assert_eq!(solution.tag("FEN"), Some("6k1/5ppp/8/8/8/8/8/3R2K1 w - - 0 1"));
}
