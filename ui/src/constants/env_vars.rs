/// Environment variable name constants
/// Settings are read from `FACEFINDER__<SECTION>__<KEY>`, e.g.
/// `FACEFINDER__API__BASE_URL` or `FACEFINDER__LOGGING__LEVEL`.
pub const ENV_PREFIX: &str = "FACEFINDER";
pub const ENV_SEPARATOR: &str = "__";
