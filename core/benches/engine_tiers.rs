use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sweeper_core::*;

fn placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement");
    for difficulty in Difficulty::ALL {
        let config = difficulty.config();
        let safe = Pos::new(config.rows / 2, config.cols / 2);
        group.bench_with_input(
            BenchmarkId::from_parameter(difficulty),
            &config,
            |b, &config| {
                let mut sampler = RejectionSampler::new(0x5eed);
                b.iter(|| sampler.generate(black_box(config), safe))
            },
        );
    }
    group.finish();
}

fn first_reveal(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_reveal");
    for difficulty in Difficulty::ALL {
        group.bench_function(BenchmarkId::from_parameter(difficulty), |b| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                let mut session = Session::new(difficulty, seed);
                session.reveal(black_box(Pos::new(0, 0)))
            })
        });
    }
    group.finish();
}

fn open_field(c: &mut Criterion) {
    // a single corner mine makes the whole board one flood-fill region
    let config = GameConfig::new(255, 255, 1).unwrap();
    c.bench_function("open_field_255", |b| {
        b.iter(|| {
            let mut session =
                Session::with_generator(config, FixedLayout::new([Pos::new(254, 254)]));
            session.reveal(black_box(Pos::new(0, 0)))
        })
    });
}

criterion_group!(benches, placement, first_reveal, open_field);
criterion_main!(benches);
