//! Measurement Runner library crate: exposes the pieces the binary, the
//! integration tests and the criterion bench share.

/// Runner configuration resolved from the environment.
///
/// Provides [`config::RunnerConfig::from_env`] and the per-endpoint
/// [`config::Endpoint`] connection parameters.
pub mod config;

/// The [`store::KvStore`] seam and its redis-backed implementation.
///
/// [`store::connect`] opens and PING-checks one endpoint.
pub mod store;

/// In-process [`store::KvStore`] that records calls, for tests and benches.
pub mod memory_store;

/// Timed batteries and the per-trial key namespace.
pub mod battery;

/// Orchestration: every benchmark, every endpoint, every trial.
pub mod runner;

pub use runner::{failure_message, run_benchmarks, run_with_connector, run_with_stores};
