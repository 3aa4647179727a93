//! Log sanitization utilities.
//!
//! Prevents sensitive data (mailbox passwords, API keys, session
//! tokens) from being exposed in debug/error logs.

/// Maximum number of characters to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Form parameter keys whose values must never be logged.
const SECRET_PARAMS: &[&str] = &["password", "apikey", "api_key", "credential"];

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit,
/// otherwise returns the first `TRUNCATE_LIMIT` characters with a suffix
/// indicating the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Render form parameters for debug logging with secret values masked.
///
/// Values of password/key parameters are replaced by `***`; everything
/// else is logged as-is.
pub fn redact_form_params(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| {
            if SECRET_PARAMS.contains(&key.to_ascii_lowercase().as_str()) {
                format!("{key}=***")
            } else {
                format!("{key}={value}")
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}
