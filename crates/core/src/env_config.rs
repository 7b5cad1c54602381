//! Environment variable parsing with warn-level logging for invalid values.

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    parse_with_default(var, std::env::var(var).ok().as_deref(), default)
}

/// Read a string environment variable, treating empty values as unset.
#[must_use]
pub fn env_string_with_default(var: &str, default: &str) -> String {
    std::env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_owned())
}

/// Parse an already-read raw value; split out so it can be tested without touching
/// process environment.
pub fn parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    raw: Option<&str>,
    default: T,
) -> T {
    let Some(v) = raw else {
        return default;
    };
    match v.trim().parse() {
        Ok(n) => n,
        Err(_) => {
            tracing::warn!(
                var,
                value = %v,
                default = %default,
                "invalid env var value, using default"
            );
            default
        },
    }
}
