use kv_core::stats::AggregateStat;
use kv_core::types::{BenchmarkSpec, EndpointInfo, EndpointRole, Metadata, ResultDocument};
use kv_core::BenchError;

use crate::battery::{run_trial, KeyPrefix};
use crate::config::{Endpoint, RunnerConfig};
use crate::store::{self, KvStore};

/// Connect to both configured endpoints and run the full battery list.
///
/// Both connections are opened before anything is measured; if either fails
/// the run stops there and no document is produced.
pub fn run_benchmarks(config: &RunnerConfig) -> Result<ResultDocument, BenchError> {
    run_with_connector(config, |role, endpoint| {
        store::connect(role, endpoint, config.connect_timeout)
    })
}

/// As [`run_benchmarks`], with the connection step supplied by the caller.
pub fn run_with_connector<S, F>(
    config: &RunnerConfig,
    mut connect: F,
) -> Result<ResultDocument, BenchError>
where
    S: KvStore,
    F: FnMut(EndpointRole, &Endpoint) -> Result<S, BenchError>,
{
    let mut primary = connect_endpoint(config, EndpointRole::Primary, &mut connect)?;
    let mut secondary = connect_endpoint(config, EndpointRole::Secondary, &mut connect)?;
    run_with_stores(config, &mut primary, &mut secondary)
}

fn connect_endpoint<S, F>(
    config: &RunnerConfig,
    role: EndpointRole,
    connect: &mut F,
) -> Result<S, BenchError>
where
    F: FnMut(EndpointRole, &Endpoint) -> Result<S, BenchError>,
{
    let endpoint = config.endpoint(role);
    let label = config.label(role);
    match connect(role, endpoint) {
        Ok(store) => {
            println!("Connected to {label} ({role}) at {}", endpoint.address());
            log::info!("Connected to {role} endpoint {}", endpoint.address());
            Ok(store)
        }
        Err(err) => {
            println!("Failed to connect to {label}: {err}");
            log::error!("Connection to {role} endpoint {} failed", endpoint.address());
            Err(err)
        }
    }
}

/// Run every benchmark against both already-connected stores.
///
/// Order is benchmark, then endpoint, then trial. A failing store call
/// aborts the whole run.
pub fn run_with_stores(
    config: &RunnerConfig,
    primary: &mut dyn KvStore,
    secondary: &mut dyn KvStore,
) -> Result<ResultDocument, BenchError> {
    let mut metadata = Metadata::now(
        config.operations_per_battery,
        config.repeat_count,
        &config.data_sizes,
    );
    for role in EndpointRole::BOTH {
        metadata.endpoints.insert(
            role.name().to_string(),
            EndpointInfo {
                label: config.label(role).to_string(),
                address: config.endpoint(role).address(),
            },
        );
    }
    let mut document = ResultDocument::new(metadata);

    for spec in BenchmarkSpec::standard_list(&config.data_sizes) {
        log::info!("Benchmarking {spec}");
        for role in EndpointRole::BOTH {
            let store: &mut dyn KvStore = match role {
                EndpointRole::Primary => &mut *primary,
                EndpointRole::Secondary => &mut *secondary,
            };
            let samples = measure(store, role, spec, config)?;

            match AggregateStat::from_samples(&samples) {
                Some(stat) => {
                    log::info!(
                        "  {role} {spec}: mean {:.6}s (min {:.6}s, max {:.6}s)",
                        stat.mean,
                        stat.min,
                        stat.max
                    );
                    document.results_mut(role).insert(spec, stat);
                }
                None => log::warn!("  {role} {spec}: no usable trials, nothing recorded"),
            }
        }
    }

    Ok(document)
}

/// User-facing line for a failed run. Only connection failures point at the
/// endpoints.
pub fn failure_message(config: &RunnerConfig, err: &BenchError) -> String {
    match err {
        BenchError::ConnectionFailure { .. } => format!(
            "Benchmark failed. Check connections to {} and {}.",
            config.primary_label, config.secondary_label
        ),
        other => format!("Benchmark failed: {other}"),
    }
}

/// All trials of one benchmark against one endpoint, in trial order.
fn measure(
    store: &mut dyn KvStore,
    role: EndpointRole,
    spec: BenchmarkSpec,
    config: &RunnerConfig,
) -> Result<Vec<f64>, BenchError> {
    let mut samples = Vec::with_capacity(config.repeat_count);
    for trial in 0..config.repeat_count {
        let prefix = KeyPrefix::new(role, spec, trial);
        let elapsed = run_trial(store, spec, &prefix, config.operations_per_battery)?;
        log::debug!("    trial {trial} ({}): {elapsed:.6}s", prefix.as_str());
        samples.push(elapsed);
    }
    Ok(samples)
}
