//! Criterion benchmark: parsing and aggregating a full reference-sized sweep
//! of synthetic benchmark output (8000 invocations).

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use membench::aggregate::aggregate;
use membench::invoker::RawOutput;
use membench::parser::parse_output;
use membench::record::Record;
use membench::strategy::strategy_label;
use membench::sweep::SweepConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn synthetic_outputs() -> Vec<RawOutput> {
    let config = SweepConfig::reference();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut outputs = Vec::with_capacity(config.total_invocations());
    for _ in 0..config.trials {
        let bytes = config.draw_bytes(&mut rng);
        for params in config.trial_grid(bytes) {
            let stdout = format!(
                "{}|madvise {}|{}|{}|us\np: 0x7fec95afc000\n",
                strategy_label(params.strategy),
                if params.advise { "ON" } else { "OFF" },
                params.bytes,
                rng.gen_range(1..200_000u64)
            );
            outputs.push(RawOutput {
                stdout: stdout.into_bytes(),
                stderr: Vec::new(),
            });
        }
    }
    outputs
}

fn bench_parse(c: &mut Criterion) {
    let outputs = synthetic_outputs();
    c.bench_function("parse/reference_sweep", |b| {
        b.iter(|| {
            let records: Vec<Record> = outputs.iter().flat_map(parse_output).collect();
            black_box(records)
        })
    });
}

fn bench_aggregate(c: &mut Criterion) {
    let records: Vec<Record> = synthetic_outputs().iter().flat_map(parse_output).collect();
    c.bench_function("aggregate/reference_sweep", |b| {
        b.iter(|| black_box(aggregate(&records).expect("aggregate failed")))
    });
}

criterion_group!(benches, bench_parse, bench_aggregate);
criterion_main!(benches);
