//! GleSys error mapping.

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::GlesysProvider;

impl ProviderErrorMapper for GlesysProvider {
    fn provider_name(&self) -> &'static str {
        "glesys"
    }

    /// GleSys envelope status codes mirror HTTP semantics:
    /// - 400: validation failure (the text says which parameter)
    /// - 401: bad username/API key
    /// - 403: key valid but not allowed for this module
    /// - 404: object not found (account, alias or domain per context)
    /// - 409: address already taken
    /// - 429: rate limited
    /// - 5xx: server side failure
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let provider = self.provider_name().to_string();
        let code = raw.code.as_deref().unwrap_or("");

        match code {
            "401" => ProviderError::InvalidCredentials {
                provider,
                raw_message: Some(raw.message),
            },
            "403" => ProviderError::PermissionDenied {
                provider,
                raw_message: Some(raw.message),
            },
            "404" => not_found(provider, raw, context),
            "400" => bad_request(provider, raw, context),
            "409" => ProviderError::AccountExists {
                provider,
                address: context.address.unwrap_or_default(),
                raw_message: Some(raw.message),
            },
            "429" => ProviderError::RateLimited {
                provider,
                retry_after: None,
                raw_message: Some(raw.message),
            },
            _ => self.unknown_error(raw),
        }
    }
}

/// A 404 names the account unless the operation only knows a domain.
fn not_found(provider: String, raw: RawApiError, context: ErrorContext) -> ProviderError {
    match (context.address, context.domain) {
        (Some(address), _) => ProviderError::AccountNotFound {
            provider,
            address,
            raw_message: Some(raw.message),
        },
        (None, Some(domain)) => ProviderError::DomainNotFound {
            provider,
            domain,
            raw_message: Some(raw.message),
        },
        (None, None) => ProviderError::Unknown {
            provider,
            raw_code: raw.code,
            raw_message: raw.message,
        },
    }
}

/// GleSys reports most business failures as 400 with a descriptive
/// text, so the message is sniffed for the known cases.
fn bad_request(provider: String, raw: RawApiError, context: ErrorContext) -> ProviderError {
    let lower = raw.message.to_ascii_lowercase();

    if lower.contains("already exist") || lower.contains("already taken") {
        return ProviderError::AccountExists {
            provider,
            address: context.address.unwrap_or_default(),
            raw_message: Some(raw.message),
        };
    }
    if lower.contains("does not exist") || lower.contains("not found") {
        // Alias operations can also fail because the forwarding target is
        // missing; that is a bad `goto` parameter, not a missing account
        if let Some(target) = &context.target {
            if lower.contains(&target.to_ascii_lowercase()) || lower.contains("goto") {
                return ProviderError::InvalidParameter {
                    provider,
                    param: "goto".to_string(),
                    detail: raw.message,
                };
            }
        }
        return not_found(provider, raw, context);
    }
    if lower.contains("maximum number") || lower.contains("quota exceeded") {
        return ProviderError::QuotaExceeded {
            provider,
            raw_message: Some(raw.message),
        };
    }

    ProviderError::InvalidParameter {
        provider,
        param: extract_param(&raw.message).unwrap_or_else(|| "request".to_string()),
        detail: raw.message,
    }
}

/// Pull the offending parameter name out of messages shaped like
/// `"Invalid value for parameter quota"`.
fn extract_param(message: &str) -> Option<String> {
    let (_, rest) = message.split_once("parameter ")?;
    let name = rest.split_whitespace().next()?;
    let name = name.trim_matches(|c: char| !c.is_ascii_alphanumeric());
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
