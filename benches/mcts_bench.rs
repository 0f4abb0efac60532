use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fourbot::mcts::playout;
use fourbot::{Board, Mcts, SearchParams};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::Duration;

fn midgame() -> Board {
    let mut b = Board::default();
    for c in [3, 3, 2, 4, 4, 2, 5, 1, 0, 6] {
        b.place(c);
    }
    b
}

fn bench_board(c: &mut Criterion) {
    let b = midgame();
    c.bench_function("game_state_midgame", |ben| ben.iter(|| black_box(&b).game_state()));

    let mut rng = SmallRng::seed_from_u64(11);
    c.bench_function("playout_empty_board", |ben| {
        let empty = Board::default();
        ben.iter(|| playout(black_box(&empty), &mut rng))
    });
}

fn bench_search(c: &mut Criterion) {
    let params = SearchParams {
        movetime: Duration::MAX,
        max_iterations: Some(1_000),
        seed: Some(5),
        ..SearchParams::default()
    };
    c.bench_function("mcts_1000_iterations_empty", |ben| {
        ben.iter(|| {
            let mut m = Mcts::new(&Board::default(), params);
            black_box(m.search().map(|r| r.best_move).ok())
        })
    });
    let b = midgame();
    c.bench_function("mcts_1000_iterations_midgame", |ben| {
        ben.iter(|| {
            let mut m = Mcts::new(black_box(&b), params);
            black_box(m.search().map(|r| r.best_move).ok())
        })
    });
}

criterion_group!(benches, bench_board, bench_search);
criterion_main!(benches);
