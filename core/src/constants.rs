//! Constants module - fixed parameters of the benchmark battery

// =============================================================================
// Battery shape
// =============================================================================

/// Operations issued per battery (one trial).
pub const NUM_OPERATIONS: usize = 1000;

/// Trials per (endpoint, benchmark) pair.
pub const REPEAT_COUNT: usize = 3;

/// Payload sizes, in bytes, for the size-parameterized families.
pub const DATA_SIZES: [usize; 2] = [10, 1000];

/// Filler size used to pre-populate the LPOP list.
pub const LPOP_VALUE_SIZE: usize = 100;

/// Byte used to build filler values.
pub const FILLER_BYTE: char = 'x';

/// Value every INCR key is reset to before the timed loop.
pub const INCR_INITIAL_VALUE: &str = "0";

// =============================================================================
// Endpoints
// =============================================================================

pub const DEFAULT_PRIMARY_HOST: &str = "redis";
pub const DEFAULT_SECONDARY_HOST: &str = "valkey";
pub const DEFAULT_PORT: u16 = 6379;

pub const DEFAULT_PRIMARY_LABEL: &str = "Redis";
pub const DEFAULT_SECONDARY_LABEL: &str = "Valkey";

// =============================================================================
// Files
// =============================================================================

/// Where the Runner writes and the Renderer reads the result document.
pub const DEFAULT_RESULTS_PATH: &str = "results/benchmark_results.json";

/// Directory, next to the results file, that receives the PNG charts.
pub const CHARTS_DIR_NAME: &str = "charts";

/// Timestamp format embedded in chart filenames.
pub const CHART_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Seconds to wait for the initial connection to each endpoint.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Default log file; `none` in `KVBENCH_LOG_FILE` disables it.
pub const DEFAULT_LOG_FILE: &str = "kvbench.log";
