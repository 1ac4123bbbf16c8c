//! Runner configuration, resolved once from the environment at startup.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use kv_core::constants::*;
use kv_core::types::EndpointRole;

/// Connection parameters of one server under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Endpoint {
            host: host.into(),
            port,
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn url(&self) -> String {
        format!("redis://{}:{}/", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunnerConfig {
    pub primary: Endpoint,
    pub secondary: Endpoint,
    pub primary_label: String,
    pub secondary_label: String,
    pub operations_per_battery: usize,
    pub repeat_count: usize,
    pub data_sizes: Vec<usize>,
    pub results_path: PathBuf,
    pub connect_timeout: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        RunnerConfig {
            primary: Endpoint::new(DEFAULT_PRIMARY_HOST, DEFAULT_PORT),
            secondary: Endpoint::new(DEFAULT_SECONDARY_HOST, DEFAULT_PORT),
            primary_label: DEFAULT_PRIMARY_LABEL.to_string(),
            secondary_label: DEFAULT_SECONDARY_LABEL.to_string(),
            operations_per_battery: NUM_OPERATIONS,
            repeat_count: REPEAT_COUNT,
            data_sizes: DATA_SIZES.to_vec(),
            results_path: PathBuf::from(DEFAULT_RESULTS_PATH),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl RunnerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup; unset or
    /// unparseable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = RunnerConfig::default();
        let string = |key: &str, default: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };

        RunnerConfig {
            primary: Endpoint::new(
                string("PRIMARY_HOST", defaults.primary.host),
                parsed(&lookup, "PRIMARY_PORT", defaults.primary.port),
            ),
            secondary: Endpoint::new(
                string("SECONDARY_HOST", defaults.secondary.host),
                parsed(&lookup, "SECONDARY_PORT", defaults.secondary.port),
            ),
            primary_label: string("PRIMARY_LABEL", defaults.primary_label),
            secondary_label: string("SECONDARY_LABEL", defaults.secondary_label),
            results_path: PathBuf::from(string(
                "KVBENCH_RESULTS_PATH",
                defaults.results_path.to_string_lossy().into_owned(),
            )),
            connect_timeout: Duration::from_secs(connect_timeout_secs(&lookup)),
            ..defaults
        }
    }

    pub fn endpoint(&self, role: EndpointRole) -> &Endpoint {
        match role {
            EndpointRole::Primary => &self.primary,
            EndpointRole::Secondary => &self.secondary,
        }
    }

    pub fn label(&self, role: EndpointRole) -> &str {
        match role {
            EndpointRole::Primary => &self.primary_label,
            EndpointRole::Secondary => &self.secondary_label,
        }
    }
}

fn parsed<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse::<T>().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {key}={raw:?}, using {default}");
            default
        }),
        None => default,
    }
}

/// A zero timeout is rejected by the socket layer, so it counts as invalid.
fn connect_timeout_secs<F>(lookup: &F) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    const KEY: &str = "KVBENCH_CONNECT_TIMEOUT_SECS";
    match parsed(lookup, KEY, DEFAULT_CONNECT_TIMEOUT_SECS) {
        0 => {
            log::warn!("Ignoring {KEY}=0, using {DEFAULT_CONNECT_TIMEOUT_SECS}");
            DEFAULT_CONNECT_TIMEOUT_SECS
        }
        secs => secs,
    }
}
