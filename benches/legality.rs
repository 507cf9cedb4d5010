use criterion::{criterion_group, criterion_main, Criterion};
use lib::chess::{Board, Color, Move, Square};
use lib::util::Integer;

fn bench(c: &mut Criterion) {
    let board = Board::default();

    c.bench_function("moves", |b| {
        b.iter(|| board.moves(Color::White).count());
    });

    c.bench_function("legality", |b| {
        b.iter(|| {
            Square::iter()
                .flat_map(|wc| Square::iter().map(move |wt| Move(wc, wt)))
                .filter(|&m| {
                    board
                        .piece_on(m.whence())
                        .is_some_and(|p| board.is_legal(p, m))
                })
                .count()
        });
    });
}

criterion_group!(benches, bench);
criterion_main!(benches);
