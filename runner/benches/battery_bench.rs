//! Criterion benchmark harness: measures the per-battery overhead of the
//! runner itself (key formatting, filler, dispatch) against the in-process
//! store, so client-side cost can be told apart from server latency.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use kv_core::types::{BenchmarkSpec, EndpointRole};
use kvbench_runner::battery::{run_trial, KeyPrefix};
use kvbench_runner::memory_store::MemoryStore;

const OPERATIONS: usize = 1000;

fn bench_batteries(c: &mut Criterion) {
    let mut group = c.benchmark_group("battery/memory");
    group.sample_size(30);

    for spec in BenchmarkSpec::standard_list(&[10, 1000]) {
        let prefix = KeyPrefix::new(EndpointRole::Primary, spec, 0);
        group.bench_with_input(BenchmarkId::from_parameter(spec), &spec, |b, &spec| {
            b.iter(|| {
                let mut store = MemoryStore::new();
                run_trial(&mut store, spec, &prefix, OPERATIONS).expect("battery failed")
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_batteries);
criterion_main!(benches);
