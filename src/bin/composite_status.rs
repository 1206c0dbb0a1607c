use std::env;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use chess_notation::{CompositeRecord, GameRecord, Position};

fn describe(record: &GameRecord) -> String {
    let tail = record.tail();
    let status = if tail.is_checkmate() {
        "checkmate"
    } else if tail.is_stalemate() {
        "stalemate"
    } else if tail.is_check() {
        "check"
    } else {
        "open"
    };
    format!("{} moves, {}", record.len(), status)
}

fn report(source: &str, text: &str) -> usize {
    let mut failures = 0;
    for (line_no, result) in CompositeRecord::<Position>::read_all(text) {
        match result {
            Ok(record) => {
                println!("{source}:{line_no}: {}", record.label());
                println!("  side_to_move: {}", record.position().side_to_move());
                println!("  legal_moves: {}", record.position().legal_moves().len());
                match record.solution() {
                    Some(solution) => println!("  solution: {}", describe(solution)),
                    None => println!("  solution: none"),
                }
                match record.original() {
                    Some(original) => println!("  original: {}", describe(original)),
                    None => println!("  original: none"),
                }
            }
            Err(err) => {
                failures += 1;
                println!("{source}:{line_no}: error: {err}");
            }
        }
    }
    failures
}

fn main() -> ExitCode {
    env_logger::init();

    let paths: Vec<String> = env::args().skip(1).collect();
    let mut failures = 0;

    if paths.is_empty() {
        let mut text = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut text) {
            eprintln!("stdin: {err}");
            return ExitCode::FAILURE;
        }
        failures += report("<stdin>", &text);
    }

    for path in &paths {
        match fs::read_to_string(path) {
            Ok(text) => failures += report(path, &text),
            Err(err) => {
                eprintln!("{path}: {err}");
                failures += 1;
            }
        }
    }

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
