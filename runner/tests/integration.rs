//! Integration tests: batteries, timing windows and full runs against the
//! in-process store, plus the fail-fast connection path against a closed port.

use std::collections::HashSet;
use std::time::Duration;

use kv_core::types::{BenchmarkSpec, EndpointRole, Operation, ResultDocument};
use kv_core::BenchError;
use kvbench_runner::battery::{run_trial, KeyPrefix};
use kvbench_runner::config::{Endpoint, RunnerConfig};
use kvbench_runner::memory_store::MemoryStore;
use kvbench_runner::store::{self, KvStore};
use kvbench_runner::{run_benchmarks, run_with_stores};

fn all_specs() -> Vec<BenchmarkSpec> {
    BenchmarkSpec::standard_list(&[10, 1000])
}

// ── Timing ──────────────────────────────────────────────────────────

#[test]
fn fixed_latency_gives_operations_times_latency_for_every_battery() {
    const OPS: usize = 10;
    let latency = Duration::from_millis(2);
    let expected = OPS as f64 * latency.as_secs_f64();

    for spec in all_specs() {
        let mut store = MemoryStore::with_latency(latency);
        let prefix = KeyPrefix::new(EndpointRole::Primary, spec, 0);
        let elapsed = run_trial(&mut store, spec, &prefix, OPS).unwrap();

        assert!(elapsed >= expected, "{spec}: {elapsed} < {expected}");
        // Setup calls sleep too; a window that included them would be at
        // least twice as long for get/incr/lpop.
        assert!(elapsed < expected * 2.0, "{spec}: {elapsed} too slow");
    }
}

#[test]
fn get_timed_window_excludes_the_seeding_writes() {
    const OPS: usize = 10;
    let spec = BenchmarkSpec::sized(Operation::Get, 10);
    let mut store =
        MemoryStore::new().with_operation_latency(Operation::Set, Duration::from_millis(20));
    let prefix = KeyPrefix::new(EndpointRole::Primary, spec, 0);

    let elapsed = run_trial(&mut store, spec, &prefix, OPS).unwrap();

    // Seeding alone takes 200ms.
    assert!(elapsed < 0.1, "timed window included setup: {elapsed}");
    let ops: Vec<Operation> = store.calls().iter().map(|c| c.operation).collect();
    let mut expected = vec![Operation::Set; OPS];
    expected.extend(vec![Operation::Get; OPS]);
    assert_eq!(ops, expected);
}

#[test]
fn lpop_never_pops_an_empty_list_inside_the_window() {
    const OPS: usize = 25;
    let spec = BenchmarkSpec::plain(Operation::Lpop);
    let prefix = KeyPrefix::new(EndpointRole::Secondary, spec, 1);
    let mut store = MemoryStore::new();

    run_trial(&mut store, spec, &prefix, OPS).unwrap();

    let pushes = store
        .calls()
        .iter()
        .filter(|c| c.operation == Operation::Lpush)
        .count();
    let pops = store
        .calls()
        .iter()
        .filter(|c| c.operation == Operation::Lpop)
        .count();
    assert_eq!(pushes, OPS);
    assert_eq!(pops, OPS);

    // Every pop found an element: one more pop would be the first miss.
    let key = format!("{}:list:pop", prefix.as_str());
    assert_eq!(store.lpop(&key).unwrap(), None);
}

// ── Key namespaces ──────────────────────────────────────────────────

#[test]
fn endpoints_sharing_a_keyspace_never_collide() {
    const OPS: usize = 30;
    let mut shared = MemoryStore::new();
    let mut keys_by_role: Vec<HashSet<String>> = Vec::new();

    for role in EndpointRole::BOTH {
        shared.clear_calls();
        for spec in [
            BenchmarkSpec::sized(Operation::Set, 10),
            BenchmarkSpec::sized(Operation::Get, 10),
        ] {
            for trial in 0..3 {
                let prefix = KeyPrefix::new(role, spec, trial);
                run_trial(&mut shared, spec, &prefix, OPS).unwrap();
            }
        }
        keys_by_role.push(shared.calls().iter().map(|c| c.key.clone()).collect());
    }

    assert!(keys_by_role[0].is_disjoint(&keys_by_role[1]));
    assert!(keys_by_role[0].iter().all(|k| k.starts_with("primary:")));
    assert!(keys_by_role[1].iter().all(|k| k.starts_with("secondary:")));
}

#[test]
fn trials_of_one_benchmark_use_distinct_prefixes() {
    let spec = BenchmarkSpec::sized(Operation::Lpush, 10);
    let prefixes: HashSet<KeyPrefix> = (0..3)
        .map(|trial| KeyPrefix::new(EndpointRole::Primary, spec, trial))
        .collect();
    assert_eq!(prefixes.len(), 3);

    let other_size = KeyPrefix::new(
        EndpointRole::Primary,
        BenchmarkSpec::sized(Operation::Lpush, 1000),
        0,
    );
    assert!(!prefixes.contains(&other_size));
}

// ── Full runs ───────────────────────────────────────────────────────

#[test]
fn full_run_produces_eight_benchmarks_per_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let config = RunnerConfig {
        results_path: dir.path().join("results").join("benchmark_results.json"),
        ..RunnerConfig::default()
    };
    let mut primary = MemoryStore::new();
    let mut secondary = MemoryStore::new();

    let document = run_with_stores(&config, &mut primary, &mut secondary).unwrap();

    let expected: Vec<String> = [
        "set_10",
        "set_1000",
        "get_10",
        "get_1000",
        "incr",
        "lpush_10",
        "lpush_1000",
        "lpop",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    for role in EndpointRole::BOTH {
        let keys: Vec<String> = document.results(role).keys().map(|s| s.key()).collect();
        assert_eq!(keys, expected, "{role}");
        for stat in document.results(role).values() {
            assert_eq!(stat.raw.len(), 3);
            assert!(stat.min <= stat.median && stat.median <= stat.max);
            assert!(stat.min <= stat.mean && stat.mean <= stat.max);
        }
    }
    assert_eq!(document.metadata.num_operations, 1000);

    document.save(&config.results_path).unwrap();
    let reloaded = ResultDocument::load(&config.results_path).unwrap();
    assert_eq!(reloaded, document);
}

#[test]
fn unreachable_endpoint_fails_fast_without_writing_results() {
    let dir = tempfile::tempdir().unwrap();
    let results_path = dir.path().join("benchmark_results.json");
    let config = RunnerConfig {
        // Nothing listens on port 1 locally; the connect is refused.
        primary: Endpoint::new("127.0.0.1", 1),
        secondary: Endpoint::new("127.0.0.1", 1),
        connect_timeout: Duration::from_secs(2),
        results_path: results_path.clone(),
        ..RunnerConfig::default()
    };

    match run_benchmarks(&config) {
        Err(BenchError::ConnectionFailure {
            endpoint, address, ..
        }) => {
            assert_eq!(endpoint, "primary");
            assert_eq!(address, "127.0.0.1:1");
        }
        other => panic!("expected a connection failure, got {:?}", other.map(|_| ())),
    }
    assert!(!results_path.exists());
}

#[test]
fn connect_reports_the_failing_endpoint() {
    let endpoint = Endpoint::new("127.0.0.1", 1);
    let result = store::connect(EndpointRole::Secondary, &endpoint, Duration::from_secs(2));
    match result {
        Err(err @ BenchError::ConnectionFailure { .. }) => {
            let message = err.to_string();
            assert!(message.contains("secondary"), "{message}");
            assert!(message.contains("127.0.0.1:1"), "{message}");
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("connected to a closed port"),
    }
}
