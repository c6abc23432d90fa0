//! Strategy overhead benchmarks
//!
//! Behaviors are trivial on purpose: the numbers measure engine bookkeeping
//! (timing capture, shuffling, draws, event dispatch), not the behaviors.
//!
//! Run with: cargo bench --bench experiment

use contender::Experiment;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_run_overhead(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_overhead");

    let comparative = Experiment::builder(|| Ok(1u64))
        .candidate("doubled", || Ok(2u64))
        .unwrap()
        .candidate("shifted", || Ok(4u64))
        .unwrap()
        .comparative()
        .unwrap()
        .build()
        .unwrap();
    group.bench_function("comparative_two_candidates", |b| {
        b.iter(|| black_box(comparative.run().unwrap()));
    });

    let weighted = Experiment::builder(|| Ok(1u64))
        .candidate("doubled", || Ok(2u64))
        .unwrap()
        .random_weighted(0.5)
        .unwrap()
        .rng_seed(42)
        .build()
        .unwrap();
    group.bench_function("random_weighted", |b| {
        b.iter(|| black_box(weighted.run().unwrap()));
    });

    let selected = Experiment::builder(|| Ok(1u64))
        .candidate("doubled", || Ok(2u64))
        .unwrap()
        .custom_selector(|_, candidates| candidates[0].clone())
        .unwrap()
        .build()
        .unwrap();
    group.bench_function("custom_selector", |b| {
        b.iter(|| black_box(selected.run().unwrap()));
    });

    let control_only = Experiment::builder(|| Ok(1u64))
        .control_only()
        .unwrap()
        .build()
        .unwrap();
    group.bench_function("control_only", |b| {
        b.iter(|| black_box(control_only.run().unwrap()));
    });

    group.finish();
}

fn bench_observer_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("observer_dispatch");

    for observers in [0usize, 1, 8] {
        let mut builder = Experiment::builder(|| Ok(1u64)).control_only().unwrap();
        for _ in 0..observers {
            builder = builder.on_completion(|event| {
                black_box(event);
            });
        }
        let experiment = builder.build().unwrap();
        group.bench_function(format!("observers_{observers}"), |b| {
            b.iter(|| black_box(experiment.run().unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_run_overhead, bench_observer_dispatch);
criterion_main!(benches);
