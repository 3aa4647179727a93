//! GleSys HTTP request methods.

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::redact_form_params;

use super::{GlesysProvider, GlesysResponse, GLESYS_API_BASE, MAX_RETRIES};

impl GlesysProvider {
    /// Execute a GleSys action and deserialize its payload.
    ///
    /// Every GleSys call is a form-encoded `POST` to
    /// `/{module}/{action}/format/json` under HTTP Basic auth. A
    /// non-200 envelope status is mapped through the error mapper with
    /// the caller-supplied context.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        action: &str,
        params: &[(&str, String)],
        context: ErrorContext,
    ) -> Result<T> {
        let text = self.call_raw(action, params, &context).await?;
        HttpUtils::parse_json(&text, self.provider_name())
    }

    /// Execute a side-effect-only GleSys action, checking the envelope
    /// status but discarding any payload.
    pub(crate) async fn call_ok(
        &self,
        action: &str,
        params: &[(&str, String)],
        context: ErrorContext,
    ) -> Result<()> {
        self.call_raw(action, params, &context).await.map(|_| ())
    }

    /// Shared request path: send, unwrap the envelope status, and hand
    /// back the raw body for typed parsing.
    async fn call_raw(
        &self,
        action: &str,
        params: &[(&str, String)],
        context: &ErrorContext,
    ) -> Result<String> {
        let url = format!("{GLESYS_API_BASE}/{action}/format/json");
        log::debug!(
            "[{}] Request Body: {}",
            self.provider_name(),
            redact_form_params(params)
        );

        let builder = self
            .client
            .post(&url)
            .basic_auth(&self.username, Some(&self.api_key))
            .form(params);

        let (_status, text) = HttpUtils::execute_request_with_retry(
            builder,
            self.provider_name(),
            "POST",
            action,
            MAX_RETRIES,
        )
        .await?;

        // The envelope status is authoritative; parse it before any payload
        let envelope: GlesysResponse<serde_json::Value> =
            HttpUtils::parse_json(&text, self.provider_name())?;
        let status = envelope.response.status;
        if status.code != 200 {
            log::warn!(
                "[{}] API error {}: {}",
                self.provider_name(),
                status.code,
                status.text
            );
            return Err(self.map_error(
                RawApiError::with_code(status.code.to_string(), status.text),
                context.clone(),
            ));
        }

        Ok(text)
    }
}
