//! Environment variable parsing helpers
//!
//! Missing or malformed values fall back to the caller's default instead of
//! failing, so optional pool tuning never blocks a service from booting.

use std::str::FromStr;

/// Parse an environment variable, falling back to `default`
///
/// # Example
/// ```
/// use db_pool::env_utils::parse_env_with_default;
///
/// let max: u32 = parse_env_with_default("DB_MAX_CONNECTIONS_UNSET_EXAMPLE", 10);
/// assert_eq!(max, 10);
/// ```
pub fn parse_env_with_default<T: FromStr>(key: &str, default: T) -> T {
    parse_env_optional(key).unwrap_or(default)
}

/// Parse an environment variable, `None` when it is missing, blank or invalid
pub fn parse_env_optional<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| raw.parse().ok())
}
