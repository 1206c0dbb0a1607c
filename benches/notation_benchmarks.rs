//! Benchmarks for move generation, notation and PGN reading.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chess_notation::{CompositeRecord, GameRecord, PgnTokenizer, Position};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

const OPERA_GAME: &str = "[Event \"Paris\"]\n[Result \"1-0\"]\n\n\
1. e4 e5 2. Nf3 d6 3. d4 Bg4 4. dxe5 Bxf3 5. Qxf3 dxe5 6. Bc4 Nf6 7. Qb3 Qe7 \
8. Nc3 c6 9. Bg5 b5 10. Nxb5 cxb5 11. Bxb5+ Nbd7 12. O-O-O Rd8 13. Rxd7 Rxd7 \
14. Rd1 Qe6 15. Bxd7+ Nxd7 16. Qb8+ Nxb8 17. Rd8# 1-0";

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");

    let startpos = Position::new();
    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| startpos.perft(black_box(depth)))
        });
    }

    let kiwipete = Position::from_fen(KIWIPETE).unwrap();
    for depth in 1..=2 {
        group.bench_with_input(BenchmarkId::new("kiwipete", depth), &depth, |b, &depth| {
            b.iter(|| kiwipete.perft(black_box(depth)))
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    let startpos = Position::new();
    group.bench_function("startpos", |b| b.iter(|| black_box(startpos.legal_moves())));

    let kiwipete = Position::from_fen(KIWIPETE).unwrap();
    group.bench_function("kiwipete", |b| b.iter(|| black_box(kiwipete.legal_moves())));

    group.finish();
}

fn bench_san(c: &mut Criterion) {
    let mut group = c.benchmark_group("san");
    let kiwipete = Position::from_fen(KIWIPETE).unwrap();
    let moves = kiwipete.legal_moves();

    group.bench_function("format_all", |b| {
        b.iter(|| {
            for mv in &moves {
                black_box(kiwipete.move_to_san(*mv));
            }
        })
    });

    let sans: Vec<String> = moves.iter().map(|mv| kiwipete.move_to_san(*mv)).collect();
    group.bench_function("parse_all", |b| {
        b.iter(|| {
            for san in &sans {
                black_box(kiwipete.parse_san(san).ok());
            }
        })
    });

    group.finish();
}

fn bench_pgn(c: &mut Criterion) {
    let mut group = c.benchmark_group("pgn");

    group.bench_function("tokenize_opera", |b| {
        b.iter(|| black_box(PgnTokenizer::new(black_box(OPERA_GAME)).tokens().ok()))
    });

    group.bench_function("record_opera", |b| {
        b.iter(|| black_box(GameRecord::<Position>::from_pgn(black_box(OPERA_GAME)).ok()))
    });

    let line = "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2|Fool's mate|2... Qh4#|1. f3 e5 2. g4 Qh4# 0-1";
    group.bench_function("composite_line", |b| {
        b.iter(|| black_box(CompositeRecord::<Position>::parse(black_box(line)).ok()))
    });

    group.finish();
}

criterion_group!(benches, bench_perft, bench_movegen, bench_san, bench_pgn);
criterion_main!(benches);
