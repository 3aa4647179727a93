use serde::{Deserialize, Serialize};

/// Unified error type for all hosting provider operations.
///
/// Each variant includes a `provider` field identifying which provider produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on retry:
/// - [`NetworkError`](Self::NetworkError) — network connectivity issues
/// - [`Timeout`](Self::Timeout) — request timed out
/// - [`RateLimited`](Self::RateLimited) — API rate limit exceeded
///
/// The built-in HTTP client automatically retries these with exponential backoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    ///
    /// This is a transient error and is automatically retried.
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    ///
    /// Every remote call runs under the shared client's fixed 30-second
    /// request timeout. This is a transient error and is automatically retried.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The API rate limit has been exceeded (HTTP 429 or equivalent).
    ///
    /// This is a transient error; the request should succeed after waiting.
    RateLimited {
        /// Provider that produced the error.
        provider: String,
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The provided credentials are invalid, or the session has expired.
    InvalidCredentials {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The authenticated account lacks permission for the requested operation.
    PermissionDenied {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// An email account or alias with that address already exists.
    AccountExists {
        /// Provider that produced the error.
        provider: String,
        /// The conflicting address.
        address: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The specified email account or alias was not found.
    AccountNotFound {
        /// Provider that produced the error.
        provider: String,
        /// The address that was not found.
        address: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The specified domain is not registered with, or not owned by, this account.
    DomainNotFound {
        /// Provider that produced the error.
        provider: String,
        /// Domain name that was not found.
        domain: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// A request parameter is invalid (e.g., malformed address, bad quota value,
    /// alias target that does not resolve to a real account).
    InvalidParameter {
        /// Provider that produced the error.
        provider: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// The account's resource quota has been exceeded (e.g., maximum number of
    /// mail accounts reached).
    ///
    /// Unlike [`RateLimited`](Self::RateLimited), this is not a transient condition.
    QuotaExceeded {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The specified task was not found.
    ///
    /// Tasks expire server-side (by default 24 hours after their start time);
    /// querying an expired task also surfaces as this error.
    TaskNotFound {
        /// Provider that produced the error.
        provider: String,
        /// Identifier or href of the task that was not found.
        task_id: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The provider does not implement the requested capability
    /// (e.g., asking a task-tracking provider for email management).
    UnsupportedCapability {
        /// Provider that produced the error.
        provider: String,
        /// Name of the missing capability.
        capability: String,
    },

    /// Failed to parse the provider's API response.
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// An unrecognized error from the provider API.
    ///
    /// This is a catch-all for error codes not yet mapped to a specific variant.
    Unknown {
        /// Provider that produced the error.
        provider: String,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl ProviderError {
    /// Whether this error is expected behavior (user input, missing resources etc.),
    /// used for log level selection.
    ///
    /// Returns `true` for `warn`-level errors, `false` for `error`-level ones.
    /// **Keep this method in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::AccountExists { .. }
                | Self::AccountNotFound { .. }
                | Self::DomainNotFound { .. }
                | Self::InvalidParameter { .. }
                | Self::QuotaExceeded { .. }
                | Self::TaskNotFound { .. }
                | Self::UnsupportedCapability { .. }
        )
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{provider}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{provider}] Rate limited")
                }
            }
            Self::InvalidCredentials {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{provider}] Invalid credentials")
                }
            }
            Self::PermissionDenied {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Permission denied: {msg}")
                } else {
                    write!(f, "[{provider}] Permission denied")
                }
            }
            Self::AccountExists {
                provider, address, ..
            } => {
                write!(f, "[{provider}] Address '{address}' already exists")
            }
            Self::AccountNotFound {
                provider, address, ..
            } => {
                write!(f, "[{provider}] Address '{address}' not found")
            }
            Self::DomainNotFound {
                provider,
                domain,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Domain '{domain}' not found: {msg}")
                } else {
                    write!(f, "[{provider}] Domain '{domain}' not found")
                }
            }
            Self::InvalidParameter {
                provider,
                param,
                detail,
            } => {
                write!(f, "[{provider}] Invalid parameter '{param}': {detail}")
            }
            Self::QuotaExceeded { provider, .. } => {
                write!(f, "[{provider}] Quota exceeded")
            }
            Self::TaskNotFound {
                provider,
                task_id,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Task '{task_id}' not found: {msg}")
                } else {
                    write!(f, "[{provider}] Task '{task_id}' not found")
                }
            }
            Self::UnsupportedCapability {
                provider,
                capability,
            } => {
                write!(f, "[{provider}] Capability '{capability}' is not supported")
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::SerializationError { provider, detail } => {
                write!(f, "[{provider}] Serialization error: {detail}")
            }
            Self::Unknown {
                provider,
                raw_message,
                ..
            } => {
                write!(f, "[{provider}] {raw_message}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_network_error() {
        let e = ProviderError::NetworkError {
            provider: "test".to_string(),
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "[test] Network error: connection refused");
    }

    #[test]
    fn display_timeout() {
        let e = ProviderError::Timeout {
            provider: "glesys".to_string(),
            detail: "30s elapsed".to_string(),
        };
        assert_eq!(e.to_string(), "[glesys] Request timeout: 30s elapsed");
    }

    #[test]
    fn display_rate_limited_with_retry() {
        let e = ProviderError::RateLimited {
            provider: "glesys".to_string(),
            retry_after: Some(30),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[glesys] Rate limited (retry after 30s)");
    }

    #[test]
    fn display_rate_limited_without_retry() {
        let e = ProviderError::RateLimited {
            provider: "vcloud".to_string(),
            retry_after: None,
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[vcloud] Rate limited");
    }

    #[test]
    fn display_invalid_credentials_with_message() {
        let e = ProviderError::InvalidCredentials {
            provider: "glesys".to_string(),
            raw_message: Some("bad api key".to_string()),
        };
        assert_eq!(e.to_string(), "[glesys] Invalid credentials: bad api key");
    }

    #[test]
    fn display_invalid_credentials_without_message() {
        let e = ProviderError::InvalidCredentials {
            provider: "glesys".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[glesys] Invalid credentials");
    }

    #[test]
    fn display_account_exists() {
        let e = ProviderError::AccountExists {
            provider: "glesys".to_string(),
            address: "bob@example.com".to_string(),
            raw_message: None,
        };
        assert_eq!(
            e.to_string(),
            "[glesys] Address 'bob@example.com' already exists"
        );
    }

    #[test]
    fn display_account_not_found() {
        let e = ProviderError::AccountNotFound {
            provider: "glesys".to_string(),
            address: "gone@example.com".to_string(),
            raw_message: Some("Object not found".to_string()),
        };
        assert_eq!(e.to_string(), "[glesys] Address 'gone@example.com' not found");
    }

    #[test]
    fn display_domain_not_found() {
        let e = ProviderError::DomainNotFound {
            provider: "glesys".to_string(),
            domain: "example.org".to_string(),
            raw_message: Some("no such domain".to_string()),
        };
        assert_eq!(
            e.to_string(),
            "[glesys] Domain 'example.org' not found: no such domain"
        );
    }

    #[test]
    fn display_invalid_parameter() {
        let e = ProviderError::InvalidParameter {
            provider: "glesys".to_string(),
            param: "goto".to_string(),
            detail: "target account does not exist".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "[glesys] Invalid parameter 'goto': target account does not exist"
        );
    }

    #[test]
    fn display_quota_exceeded() {
        let e = ProviderError::QuotaExceeded {
            provider: "glesys".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[glesys] Quota exceeded");
    }

    #[test]
    fn display_task_not_found() {
        let e = ProviderError::TaskNotFound {
            provider: "vcloud".to_string(),
            task_id: "task-42".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[vcloud] Task 'task-42' not found");
    }

    #[test]
    fn display_unsupported_capability() {
        let e = ProviderError::UnsupportedCapability {
            provider: "vcloud".to_string(),
            capability: "email-management".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "[vcloud] Capability 'email-management' is not supported"
        );
    }

    #[test]
    fn display_parse_error() {
        let e = ProviderError::ParseError {
            provider: "vcloud".to_string(),
            detail: "bad xml".to_string(),
        };
        assert_eq!(e.to_string(), "[vcloud] Parse error: bad xml");
    }

    #[test]
    fn display_unknown() {
        let e = ProviderError::Unknown {
            provider: "glesys".to_string(),
            raw_code: Some("500".to_string()),
            raw_message: "something broke".to_string(),
        };
        assert_eq!(e.to_string(), "[glesys] something broke");
    }

    #[test]
    fn serialize_json_tagged_by_code() {
        let e = ProviderError::RateLimited {
            provider: "glesys".to_string(),
            retry_after: Some(60),
            raw_message: Some("too many requests".to_string()),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"code\":\"RateLimited\""));
        assert!(json.contains("\"retry_after\":60"));
    }

    #[test]
    fn deserialize_json_round_trip() {
        let original = ProviderError::AccountExists {
            provider: "glesys".to_string(),
            address: "bob@example.com".to_string(),
            raw_message: None,
        };
        let json = serde_json::to_string(&original).unwrap();
        let back: ProviderError = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_string(), original.to_string());
    }

    #[test]
    fn deserialize_all_variants() {
        let variants: Vec<ProviderError> = vec![
            ProviderError::NetworkError {
                provider: "t".into(),
                detail: "d".into(),
            },
            ProviderError::Timeout {
                provider: "t".into(),
                detail: "30s".into(),
            },
            ProviderError::RateLimited {
                provider: "t".into(),
                retry_after: Some(30),
                raw_message: None,
            },
            ProviderError::InvalidCredentials {
                provider: "t".into(),
                raw_message: None,
            },
            ProviderError::PermissionDenied {
                provider: "t".into(),
                raw_message: None,
            },
            ProviderError::AccountExists {
                provider: "t".into(),
                address: "a@x.com".into(),
                raw_message: None,
            },
            ProviderError::AccountNotFound {
                provider: "t".into(),
                address: "a@x.com".into(),
                raw_message: None,
            },
            ProviderError::DomainNotFound {
                provider: "t".into(),
                domain: "x.com".into(),
                raw_message: None,
            },
            ProviderError::InvalidParameter {
                provider: "t".into(),
                param: "quota".into(),
                detail: "bad".into(),
            },
            ProviderError::QuotaExceeded {
                provider: "t".into(),
                raw_message: None,
            },
            ProviderError::TaskNotFound {
                provider: "t".into(),
                task_id: "task-1".into(),
                raw_message: None,
            },
            ProviderError::UnsupportedCapability {
                provider: "t".into(),
                capability: "task-tracking".into(),
            },
            ProviderError::ParseError {
                provider: "t".into(),
                detail: "bad".into(),
            },
            ProviderError::SerializationError {
                provider: "t".into(),
                detail: "fail".into(),
            },
            ProviderError::Unknown {
                provider: "t".into(),
                raw_code: Some("E1".into()),
                raw_message: "oops".into(),
            },
        ];

        for v in &variants {
            let json = serde_json::to_string(v).unwrap();
            let back: ProviderError = serde_json::from_str(&json).unwrap();
            assert_eq!(back.to_string(), v.to_string());
        }
    }

    #[test]
    fn expected_errors_are_warn_level() {
        assert!(ProviderError::AccountNotFound {
            provider: "t".into(),
            address: "a@x.com".into(),
            raw_message: None,
        }
        .is_expected());
        assert!(ProviderError::AccountExists {
            provider: "t".into(),
            address: "a@x.com".into(),
            raw_message: None,
        }
        .is_expected());
        assert!(ProviderError::TaskNotFound {
            provider: "t".into(),
            task_id: "1".into(),
            raw_message: None,
        }
        .is_expected());
        assert!(!ProviderError::NetworkError {
            provider: "t".into(),
            detail: "x".into(),
        }
        .is_expected());
        assert!(!ProviderError::ParseError {
            provider: "t".into(),
            detail: "x".into(),
        }
        .is_expected());
    }
}
