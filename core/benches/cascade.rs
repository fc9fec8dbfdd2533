use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tripwire_core::*;

fn first_reveal(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_reveal");

    for (name, config) in [
        ("beginner", GameConfig::beginner()),
        ("expert", GameConfig::expert()),
        ("empty_255", GameConfig::new(255, 255, 0).unwrap()),
    ] {
        let center = (config.width / 2, config.height / 2);
        let mut seed = 0;
        group.bench_function(name, |b| {
            b.iter_batched(
                || {
                    seed += 1;
                    Board::new(config, seed)
                },
                |mut board| black_box(board.reveal(center)),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, first_reveal);
criterion_main!(benches);
