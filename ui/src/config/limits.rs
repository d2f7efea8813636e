//! Hard limits for configuration values

/// Shortest accepted request timeout
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Longest accepted request timeout (5 minutes)
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Levels accepted by `logging.level`
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Schemes accepted for `api.base_url`
pub const URL_SCHEMES: [&str; 2] = ["http://", "https://"];
