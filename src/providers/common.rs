//! Helpers shared by the provider adapters.

use std::time::Duration;

use reqwest::Client;

// ============ HTTP Client ============

/// Default connect timeout (seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds). Every facade operation runs under
/// this fixed per-call budget; a slower call surfaces as `Timeout`.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Create an HTTP client with the shared timeout configuration.
pub fn create_http_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client")
}

// ============ Wire value parsing ============

/// Parse a `"yes"`/`"no"` wire flag.
pub fn parse_yes_no(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

/// Render a boolean as the `"yes"`/`"no"` wire form.
pub fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Convert a quota amount with unit label to MiB.
///
/// GleSys labels mailbox quotas with SI-style units but sizes them in
/// binary steps, so `"MB"` is taken as MiB and `"GB"` as GiB.
pub fn quota_to_mib(amount: u32, unit: &str) -> Option<u32> {
    match unit.to_ascii_uppercase().as_str() {
        "MB" | "MIB" => Some(amount),
        "GB" | "GIB" => amount.checked_mul(1024),
        "TB" | "TIB" => amount.checked_mul(1024 * 1024),
        _ => None,
    }
}
