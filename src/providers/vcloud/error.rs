//! vCloud error mapping.

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::VcloudTaskClient;

impl ProviderErrorMapper for VcloudTaskClient {
    fn provider_name(&self) -> &'static str {
        "vcloud"
    }

    /// vCloud failures arrive as plain HTTP status codes:
    /// - 400: malformed request
    /// - 401: session missing, expired or rejected
    /// - 403: authenticated but not allowed
    /// - 404: no such task, including tasks past their expiry time
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let provider = self.provider_name().to_string();

        match raw.code.as_deref() {
            Some("401") => ProviderError::InvalidCredentials {
                provider,
                raw_message: Some(raw.message),
            },
            Some("403") => ProviderError::PermissionDenied {
                provider,
                raw_message: Some(raw.message),
            },
            Some("404") => ProviderError::TaskNotFound {
                provider,
                task_id: context.task_id.unwrap_or_default(),
                raw_message: Some(raw.message),
            },
            Some("400") => ProviderError::InvalidParameter {
                provider,
                param: "request".to_string(),
                detail: raw.message,
            },
            _ => self.unknown_error(raw),
        }
    }
}
